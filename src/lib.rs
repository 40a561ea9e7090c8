//! Chronicles of Ruin - combat and progression core
//!
//! Damage resolution, resistances, XP and levelling, regular encounters
//! and multi-phase district boss fights for a text role-playing game.

pub mod combat;
pub mod config;
pub mod data;
pub mod entities;
pub mod error;
pub mod game;
pub mod items;
pub mod progression;
pub mod rng;
pub mod store;

// Re-export commonly used types
pub use config::GameConfig;
pub use error::{CombatError, ConfigError};
pub use game::Chronicle;
pub use rng::{RandomSource, ScriptedRolls};
