//! Data loading and external game content
//!
//! This module handles loading game content from external RON files,
//! allowing for data-driven monsters, bosses, skills and loot.

pub mod bosses;
pub mod loader;
pub mod monsters;

pub use bosses::{default_boss_templates, BossTemplate, BossTemplates};
pub use loader::{export_default_data, DataManager, DEFAULT_DATA_DIR};
pub use monsters::{default_monster_templates, MonsterTemplate, MonsterTemplates};
