//! Experience ledger
//!
//! Three XP counters per player. Levels and points are always derived from
//! the counters, so re-deriving can never drift from what was granted.

use serde::{Deserialize, Serialize};

use super::xp::{level_from_total_xp, points_from_level, XpPool, XpReward};

/// Level movement caused by one XP grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub pool: XpPool,
    pub amount: u64,
    pub old_level: u32,
    pub new_level: u32,
    pub class_points_gained: u32,
    pub skill_points_gained: u32,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Per-player XP counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceLedger {
    pub base_xp: u64,
    pub class_xp: u64,
    pub skill_xp: u64,
    /// Allocated at character creation, never recalculated
    base_points: u32,
}

impl ExperienceLedger {
    pub fn new(base_points: u32) -> Self {
        Self {
            base_points,
            ..Self::default()
        }
    }

    pub fn xp(&self, pool: XpPool) -> u64 {
        match pool {
            XpPool::Base => self.base_xp,
            XpPool::Class => self.class_xp,
            XpPool::Skill => self.skill_xp,
        }
    }

    pub fn level(&self, pool: XpPool) -> u32 {
        level_from_total_xp(self.xp(pool)).0
    }

    /// XP banked toward the next level of `pool`
    pub fn progress(&self, pool: XpPool) -> u64 {
        level_from_total_xp(self.xp(pool)).1
    }

    pub fn class_level(&self) -> u32 {
        self.level(XpPool::Class)
    }

    pub fn skill_level(&self) -> u32 {
        self.level(XpPool::Skill)
    }

    pub fn player_level(&self) -> u32 {
        self.class_level() + self.skill_level()
    }

    pub fn class_points(&self) -> u32 {
        points_from_level(self.class_level()).class_points
    }

    pub fn skill_points(&self) -> u32 {
        points_from_level(self.skill_level()).skill_points
    }

    pub fn base_points(&self) -> u32 {
        self.base_points
    }

    /// Add XP to one pool
    pub fn add_xp(&mut self, pool: XpPool, amount: u64) -> LevelChange {
        let old_level = self.level(pool);
        let old_class_points = self.class_points();
        let old_skill_points = self.skill_points();

        let counter = match pool {
            XpPool::Base => &mut self.base_xp,
            XpPool::Class => &mut self.class_xp,
            XpPool::Skill => &mut self.skill_xp,
        };
        *counter = counter.saturating_add(amount);

        LevelChange {
            pool,
            amount,
            old_level,
            new_level: self.level(pool),
            class_points_gained: self.class_points() - old_class_points,
            skill_points_gained: self.skill_points() - old_skill_points,
        }
    }

    /// Add a full reward, one change per pool
    pub fn add_reward(&mut self, reward: &XpReward) -> Vec<LevelChange> {
        XpPool::ALL
            .iter()
            .map(|&pool| self.add_xp(pool, reward.get(pool)))
            .collect()
    }
}
