//! District boss creation
//!
//! Bosses are built from templates and handed to the phase controller as
//! a combat snapshot plus their ability list and loot tier.

use serde::{Deserialize, Serialize};

use super::stats::{CombatStats, Pool};
use crate::combat::{Archetype, BossAbility, Combatant, EntityKind, ResistanceProfile, StatusEffects};
use crate::data::BossTemplates;
use crate::error::CombatError;
use crate::items::LootQuality;

/// A boss ready for a fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub template_id: String,
    pub name: String,
    pub district: String,
    pub level: u32,
    pub archetype: Archetype,
    pub max_health: f64,
    pub damage: f64,
    pub power: f64,
    pub defense: f64,
    pub stats: CombatStats,
    pub abilities: Vec<BossAbility>,
    pub loot_quality: LootQuality,
    pub resistances: ResistanceProfile,
    pub intro: Option<String>,
}

impl Boss {
    pub fn into_combatant(self) -> Combatant {
        Combatant {
            name: self.name,
            level: self.level,
            kind: EntityKind::Boss,
            archetype: self.archetype,
            is_wild: false,
            is_unique: false,
            health: Pool::new(self.max_health),
            power: self.power,
            damage: self.damage,
            defense: self.defense,
            stats: self.stats,
            resistances: Some(self.resistances),
            wards: Vec::new(),
            statuses: StatusEffects::default(),
        }
    }
}

/// Build a district boss from its template. `level` defaults to the
/// template's own level.
pub fn create_district_boss(
    templates: &BossTemplates,
    template_id: &str,
    level: Option<u32>,
) -> Result<Boss, CombatError> {
    let template = templates
        .find(template_id)
        .ok_or_else(|| CombatError::UnknownBossTemplate(template_id.to_string()))?;

    let level = level.unwrap_or(template.default_level).max(1);
    let growth = level.saturating_sub(1) as f64;

    Ok(Boss {
        template_id: template.id.clone(),
        name: template.name.clone(),
        district: template.district.clone(),
        level,
        archetype: template.archetype,
        max_health: (template.base_health + template.health_per_level * growth).round(),
        damage: template.base_damage + template.damage_per_level * growth,
        power: template.power_per_level * level as f64,
        defense: template.defense,
        stats: CombatStats {
            crit_chance: template.crit_chance,
            ..CombatStats::default()
        },
        abilities: template.abilities.clone(),
        loot_quality: template.loot_quality,
        resistances: template.resistances.clone(),
        intro: template.intro.clone(),
    })
}
