//! Experience and leveling
//!
//! Pure mappings between cumulative XP and levels, plus monster XP rewards.
//! All functions are total for non-negative inputs.

use serde::{Deserialize, Serialize};

use crate::combat::Archetype;

/// XP needed to go from level 1 to level 2
pub const BASE_XP_PER_LEVEL: u64 = 100;

/// Growth of the per-level XP cost
pub const LEVEL_MULTIPLIER: f64 = 1.025;

/// Class levels needed per class point
pub const CLASS_LEVELS_PER_POINT: u32 = 3;

/// XP base reward per monster level
const XP_PER_MONSTER_LEVEL: f64 = 10.0;

/// The three independent experience pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XpPool {
    Base,
    Class,
    Skill,
}

impl XpPool {
    pub const ALL: [XpPool; 3] = [XpPool::Base, XpPool::Class, XpPool::Skill];

    pub fn name(&self) -> &'static str {
        match self {
            XpPool::Base => "base",
            XpPool::Class => "class",
            XpPool::Skill => "skill",
        }
    }
}

/// Monster category for reward purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonsterCategory {
    #[default]
    Regular,
    Wild,
    Unique,
}

impl MonsterCategory {
    /// Category from the two monster flags. Unique wins over wild.
    pub fn from_flags(is_wild: bool, is_unique: bool) -> Self {
        if is_unique {
            MonsterCategory::Unique
        } else if is_wild {
            MonsterCategory::Wild
        } else {
            MonsterCategory::Regular
        }
    }

    /// Reward multiplier for one XP pool
    pub fn xp_multiplier(&self, pool: XpPool) -> f64 {
        match (self, pool) {
            (MonsterCategory::Regular, _) => 1.0,
            (MonsterCategory::Wild, XpPool::Base) => 2.0,
            (MonsterCategory::Wild, XpPool::Class) => 1.5,
            (MonsterCategory::Wild, XpPool::Skill) => 1.8,
            (MonsterCategory::Unique, XpPool::Base) => 5.0,
            (MonsterCategory::Unique, XpPool::Class) => 3.0,
            (MonsterCategory::Unique, XpPool::Skill) => 4.0,
        }
    }
}

/// XP granted per pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XpReward {
    pub base: u64,
    pub class: u64,
    pub skill: u64,
}

impl XpReward {
    pub fn get(&self, pool: XpPool) -> u64 {
        match pool {
            XpPool::Base => self.base,
            XpPool::Class => self.class,
            XpPool::Skill => self.skill,
        }
    }

    /// Scale every pool by an integer factor
    pub fn scaled(&self, factor: u64) -> Self {
        Self {
            base: self.base * factor,
            class: self.class * factor,
            skill: self.skill * factor,
        }
    }

    pub fn total(&self) -> u64 {
        self.base + self.class + self.skill
    }
}

/// Points derived from a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelPoints {
    pub class_points: u32,
    pub skill_points: u32,
    pub base_points: u32,
}

/// XP needed to advance from `level` to `level + 1`
pub fn xp_required_for_level(level: u32) -> u64 {
    if level == 0 {
        return BASE_XP_PER_LEVEL;
    }
    (BASE_XP_PER_LEVEL as f64 * LEVEL_MULTIPLIER.powi(level as i32 - 1)) as u64
}

/// Total XP needed from level 1 to reach `level`
pub fn total_xp_for_level(level: u32) -> u64 {
    (1..level).map(xp_required_for_level).sum()
}

/// Level reached with `total_xp`, plus XP banked toward the next level
pub fn level_from_total_xp(total_xp: u64) -> (u32, u64) {
    let mut level = 1;
    let mut remainder = total_xp;
    loop {
        let cost = xp_required_for_level(level);
        if remainder < cost {
            return (level, remainder);
        }
        remainder -= cost;
        level += 1;
    }
}

/// Points granted by a level. Base points never come from levels.
pub fn points_from_level(level: u32) -> LevelPoints {
    LevelPoints {
        class_points: level / CLASS_LEVELS_PER_POINT,
        skill_points: level,
        base_points: 0,
    }
}

/// Extra XP share a player archetype receives per pool
pub fn archetype_xp_bonus(archetype: Archetype, pool: XpPool) -> f64 {
    match (archetype, pool) {
        (Archetype::Melee, XpPool::Base) => 0.10,
        (Archetype::Ranged, XpPool::Class) => 0.10,
        (Archetype::Magic, XpPool::Skill) => 0.10,
        (Archetype::Wild, _) => 0.20,
        _ => 0.0,
    }
}

/// XP granted for defeating a monster
pub fn monster_xp_reward(
    monster_level: u32,
    is_wild: bool,
    is_unique: bool,
    player_archetype: Archetype,
) -> XpReward {
    let category = MonsterCategory::from_flags(is_wild, is_unique);
    let base = monster_level as f64 * XP_PER_MONSTER_LEVEL;

    // Small epsilon keeps 1.1 * 500 from truncating to 549
    let pool_reward = |pool: XpPool| {
        let value = base * category.xp_multiplier(pool) * (1.0 + archetype_xp_bonus(player_archetype, pool));
        (value + 1e-9).floor() as u64
    };

    XpReward {
        base: pool_reward(XpPool::Base),
        class: pool_reward(XpPool::Class),
        skill: pool_reward(XpPool::Skill),
    }
}

/// Get a title/rank based on player level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Wanderer",
        5..=9 => "Initiate",
        10..=19 => "Veteran",
        20..=34 => "Champion",
        35..=59 => "Warden of Ruin",
        _ => "Legend",
    }
}
