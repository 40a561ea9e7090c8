//! Damage analytics
//!
//! Tracks how effective each skill has been over its last few uses.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::damage::DamageBreakdown;

/// Uses kept per skill
pub const ANALYTICS_WINDOW: usize = 5;

/// Relative change between window halves that counts as a trend
const TREND_THRESHOLD: f64 = 0.05;

/// Direction of a skill's recent effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Diagnostic record for one attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInsight {
    pub skill: String,
    /// Final damage over stage-1 base damage
    pub effectiveness: f64,
    pub rolling_average: f64,
    pub trend: Trend,
    pub samples: usize,
}

/// Rolling per-skill effectiveness history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageAnalytics {
    history: HashMap<String, VecDeque<f64>>,
}

impl DamageAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one use of `skill` and summarize its window
    pub fn record(&mut self, skill: &str, breakdown: &DamageBreakdown) -> SkillInsight {
        let effectiveness = breakdown.effectiveness();
        let window = self.history.entry(skill.to_string()).or_default();
        window.push_back(effectiveness);
        while window.len() > ANALYTICS_WINDOW {
            window.pop_front();
        }

        SkillInsight {
            skill: skill.to_string(),
            effectiveness,
            rolling_average: mean(window.iter().copied()),
            trend: classify(window),
            samples: window.len(),
        }
    }

    pub fn rolling_average(&self, skill: &str) -> Option<f64> {
        self.history.get(skill).map(|w| mean(w.iter().copied()))
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Compare the newer half of the window with the older half
fn classify(window: &VecDeque<f64>) -> Trend {
    if window.len() < 2 {
        return Trend::Stable;
    }
    let half = window.len() / 2;
    let older = mean(window.iter().take(half).copied());
    let newer = mean(window.iter().skip(window.len() - half).copied());
    if older <= 0.0 {
        return Trend::Stable;
    }
    let change = (newer - older) / older;
    if change > TREND_THRESHOLD {
        Trend::Improving
    } else if change < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
