//! Progression systems

pub mod ledger;
pub mod skills;
pub mod xp;

pub use ledger::{ExperienceLedger, LevelChange};
pub use skills::{default_skills, starting_skills, Skill, StatusApplication, Ward, RANK_DAMAGE_BONUS};
pub use xp::{
    archetype_xp_bonus, level_from_total_xp, level_title, monster_xp_reward, points_from_level, total_xp_for_level,
    xp_required_for_level, LevelPoints, MonsterCategory, XpPool, XpReward,
};
