//! Active status effects
//!
//! Handles DoT effects (poison, burn, bleed), turn-denying effects
//! (stun, freeze) and outgoing-damage debuffs (slow, weakness).

use serde::{Deserialize, Serialize};

use super::resistance::StatusKind;

/// An effect currently afflicting a combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    /// Remaining rounds
    pub rounds: u32,
    /// Damage per tick for DoTs
    pub intensity: f64,
}

/// Result of ticking status effects at round end
#[derive(Debug, Clone, Default)]
pub struct StatusTickResult {
    /// Total damage dealt from DoT effects
    pub damage_dealt: f64,
    /// Messages to display
    pub messages: Vec<String>,
    /// Effects that ran out this tick
    pub expired: Vec<StatusKind>,
}

/// Collection of active status effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub effects: Vec<ActiveStatus>,
}

impl StatusKind {
    /// How many rounds a fresh application lasts
    pub fn default_rounds(&self) -> u32 {
        match self {
            StatusKind::Stun | StatusKind::Freeze => 1,
            StatusKind::Slow | StatusKind::Weakness => 2,
            StatusKind::Poison | StatusKind::Burn | StatusKind::Bleed => 3,
        }
    }

    /// Is this a DoT effect?
    pub fn is_dot(&self) -> bool {
        matches!(self, StatusKind::Poison | StatusKind::Burn | StatusKind::Bleed)
    }

    /// Does this effect cost the afflicted side its action?
    pub fn skips_turn(&self) -> bool {
        matches!(self, StatusKind::Stun | StatusKind::Freeze)
    }

    /// Multiplier on the afflicted side's outgoing damage
    pub fn damage_multiplier(&self) -> f64 {
        match self {
            StatusKind::Slow => 0.85,
            StatusKind::Weakness => 0.75,
            _ => 1.0,
        }
    }
}

impl StatusEffects {
    /// Add a status effect. Reapplying refreshes duration and keeps the
    /// stronger intensity.
    pub fn add_effect(&mut self, kind: StatusKind, rounds: u32, intensity: f64) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.rounds = existing.rounds.max(rounds);
            existing.intensity = existing.intensity.max(intensity);
        } else {
            self.effects.push(ActiveStatus { kind, rounds, intensity });
        }
    }

    /// Check if an effect is active
    pub fn has_effect(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Consume a turn-denying effect, returning which one fired
    pub fn take_skip(&mut self) -> Option<StatusKind> {
        let index = self.effects.iter().position(|e| e.kind.skips_turn())?;
        let kind = self.effects[index].kind;
        self.effects.remove(index);
        Some(kind)
    }

    /// Combined multiplier on outgoing damage
    pub fn damage_multiplier(&self) -> f64 {
        self.effects.iter().map(|e| e.kind.damage_multiplier()).product()
    }

    /// Tick all effects at the end of a round. Turn-denying effects are
    /// left alone; they only end through [`StatusEffects::take_skip`].
    pub fn tick(&mut self, entity_name: &str) -> StatusTickResult {
        let mut result = StatusTickResult::default();

        for effect in self.effects.iter_mut().filter(|e| !e.kind.skips_turn()) {
            effect.rounds = effect.rounds.saturating_sub(1);

            match effect.kind {
                StatusKind::Poison => {
                    result.damage_dealt += effect.intensity;
                    result.messages.push(format!("{} takes {:.1} poison damage!", entity_name, effect.intensity));
                }
                StatusKind::Burn => {
                    result.damage_dealt += effect.intensity;
                    result.messages.push(format!("{} burns for {:.1} damage!", entity_name, effect.intensity));
                }
                StatusKind::Bleed => {
                    result.damage_dealt += effect.intensity;
                    result.messages.push(format!("{} bleeds for {:.1} damage!", entity_name, effect.intensity));
                }
                _ => {}
            }
        }

        for effect in self.effects.iter().filter(|e| e.rounds == 0) {
            result.expired.push(effect.kind);
        }
        self.effects.retain(|e| e.rounds > 0);

        result
    }
}
