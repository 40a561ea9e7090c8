//! Archetypes and the combat triangle
//!
//! Melee beats ranged, ranged beats magic, magic beats melee. Wild sits
//! outside the cycle.

use serde::{Deserialize, Serialize};

/// Fighting style of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Archetype {
    #[default]
    Melee,
    Ranged,
    Magic,
    Wild,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Melee,
        Archetype::Ranged,
        Archetype::Magic,
        Archetype::Wild,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Melee => "melee",
            Archetype::Ranged => "ranged",
            Archetype::Magic => "magic",
            Archetype::Wild => "wild",
        }
    }

    /// The archetype this one has the advantage over, if any
    pub fn beats(&self) -> Option<Archetype> {
        match self {
            Archetype::Melee => Some(Archetype::Ranged),
            Archetype::Ranged => Some(Archetype::Magic),
            Archetype::Magic => Some(Archetype::Melee),
            Archetype::Wild => None,
        }
    }

    pub fn has_advantage_over(&self, other: Archetype) -> bool {
        self.beats() == Some(other)
    }
}

/// Damage multiplier from the combat triangle.
///
/// `triangle_bonus` is the advantage swing (0.20 by default). A wild target of
/// the attacker's own archetype adds `wild_affinity_bonus` on top.
pub fn triangle_multiplier(
    attacker: Archetype,
    defender: Archetype,
    defender_is_wild: bool,
    triangle_bonus: f64,
    wild_affinity_bonus: f64,
) -> f64 {
    let mut multiplier = if attacker.has_advantage_over(defender) {
        1.0 + triangle_bonus
    } else if defender.has_advantage_over(attacker) {
        1.0 - triangle_bonus
    } else {
        1.0
    };

    if defender_is_wild && attacker == defender {
        multiplier += wild_affinity_bonus;
    }

    multiplier
}
