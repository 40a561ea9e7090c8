//! Combat snapshots
//!
//! Encounters copy every participant into a [`Combatant`]. Nothing done to a
//! snapshot leaks back to the persistent record.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use super::resistance::{EntityKind, ResistanceModifier, ResistanceProfile};
use super::status::StatusEffects;
use crate::entities::{CombatStats, Pool};

/// Temporary resistance buff on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveWard {
    pub modifier: ResistanceModifier,
    pub rounds: u32,
}

/// One participant's in-combat state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub kind: EntityKind,
    pub archetype: Archetype,
    pub is_wild: bool,
    pub is_unique: bool,
    pub health: Pool,
    /// Scales skill damage (x0.4 in the pipeline)
    pub power: f64,
    /// Flat damage stat, used by simplified monster attacks
    pub damage: f64,
    pub defense: f64,
    pub stats: CombatStats,
    pub resistances: Option<ResistanceProfile>,
    #[serde(default)]
    pub wards: Vec<ActiveWard>,
    #[serde(default)]
    pub statuses: StatusEffects,
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    /// Resistance profile with active wards layered on top
    pub fn effective_resistances(&self) -> Option<ResistanceProfile> {
        self.resistances
            .as_ref()
            .map(|profile| profile.with_modifiers(self.wards.iter().map(|w| &w.modifier)))
    }

    pub fn add_ward(&mut self, modifier: ResistanceModifier, rounds: u32) {
        self.wards.push(ActiveWard { modifier, rounds });
    }

    /// Count down ward durations, dropping expired ones
    pub fn tick_wards(&mut self) {
        for ward in &mut self.wards {
            ward.rounds = ward.rounds.saturating_sub(1);
        }
        self.wards.retain(|w| w.rounds > 0);
    }

    /// Remove health, returning the amount actually removed
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        self.health.take_damage(amount)
    }
}
