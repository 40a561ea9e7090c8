//! Entity creation and management

pub mod bosses;
pub mod monsters;
pub mod player;
pub mod stats;

pub use bosses::{create_district_boss, Boss};
pub use monsters::{Monster, MonsterGenerator, TemplateMonsterGenerator};
pub use player::{archetype_attributes, create_player, Player, BASE_POINT_BUDGET};
pub use stats::{Attribute, Attributes, CombatStats, Pool};
