//! Monster generation
//!
//! Encounters ask a [`MonsterGenerator`] for a monster scaled to the area
//! level. The default generator draws from the loaded templates.

use serde::{Deserialize, Serialize};

use super::stats::{CombatStats, Pool};
use crate::combat::{Archetype, Combatant, EntityKind, ResistanceProfile, StatusEffects};
use crate::config::SpawnTuning;
use crate::data::{default_monster_templates, MonsterTemplate, MonsterTemplates};
use crate::progression::MonsterCategory;
use crate::rng::RandomSource;

impl MonsterCategory {
    pub fn health_multiplier(&self) -> f64 {
        match self {
            MonsterCategory::Regular => 1.0,
            MonsterCategory::Wild => 1.3,
            MonsterCategory::Unique => 2.0,
        }
    }

    pub fn damage_multiplier(&self) -> f64 {
        match self {
            MonsterCategory::Regular => 1.0,
            MonsterCategory::Wild => 1.2,
            MonsterCategory::Unique => 1.5,
        }
    }

    pub fn gold_multiplier(&self) -> u64 {
        match self {
            MonsterCategory::Regular => 1,
            MonsterCategory::Wild => 2,
            MonsterCategory::Unique => 5,
        }
    }
}

/// A generated monster, alive for one encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub template_id: String,
    pub name: String,
    pub level: u32,
    pub archetype: Archetype,
    pub category: MonsterCategory,
    pub max_health: f64,
    pub damage: f64,
    pub power: f64,
    pub defense: f64,
    pub stats: CombatStats,
    pub resistances: ResistanceProfile,
}

impl Monster {
    pub fn is_wild(&self) -> bool {
        self.category == MonsterCategory::Wild
    }

    pub fn is_unique(&self) -> bool {
        self.category == MonsterCategory::Unique
    }

    /// Gold paid out when this monster is defeated
    pub fn gold_reward(&self, gold_per_level: u64) -> u64 {
        gold_per_level * self.level as u64 * self.category.gold_multiplier()
    }

    pub fn into_combatant(self) -> Combatant {
        let is_wild = self.is_wild();
        let is_unique = self.is_unique();
        Combatant {
            name: self.name,
            level: self.level,
            kind: EntityKind::RegularMonster,
            archetype: self.archetype,
            is_wild,
            is_unique,
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

/// Produces monsters for encounters
pub trait MonsterGenerator {
    fn generate(
        &self,
        area_level: u32,
        archetype: Option<Archetype>,
        category: Option<MonsterCategory>,
        rng: &mut impl RandomSource,
    ) -> Monster;
}

/// Generator backed by monster templates
#[derive(Debug, Clone)]
pub struct TemplateMonsterGenerator {
    templates: MonsterTemplates,
    spawning: SpawnTuning,
}

impl TemplateMonsterGenerator {
    pub fn new(templates: MonsterTemplates, spawning: SpawnTuning) -> Self {
        let templates = if templates.templates.is_empty() {
            log::warn!("No monster templates loaded, using built-in set");
            default_monster_templates()
        } else {
            templates
        };
        Self { templates, spawning }
    }

    fn roll_category(&self, rng: &mut impl RandomSource) -> MonsterCategory {
        let roll = rng.roll();
        if roll < self.spawning.unique_chance {
            MonsterCategory::Unique
        } else if roll < self.spawning.unique_chance + self.spawning.wild_chance {
            MonsterCategory::Wild
        } else {
            MonsterCategory::Regular
        }
    }
}

fn display_name(template: &MonsterTemplate, category: MonsterCategory) -> String {
    match category {
        MonsterCategory::Regular => template.name.clone(),
        MonsterCategory::Wild => format!("Wild {}", template.name),
        MonsterCategory::Unique => format!("{} the Unbroken", template.name),
    }
}

impl MonsterGenerator for TemplateMonsterGenerator {
    fn generate(
        &self,
        area_level: u32,
        archetype: Option<Archetype>,
        category: Option<MonsterCategory>,
        rng: &mut impl RandomSource,
    ) -> Monster {
        let level = area_level.max(1);

        // Wild archetype has no dedicated templates; borrow any body
        let pool: Vec<&MonsterTemplate> = match archetype {
            Some(wanted) => {
                let matching = self.templates.for_archetype(wanted);
                if matching.is_empty() {
                    self.templates.templates.iter().collect()
                } else {
                    matching
                }
            }
            None => self.templates.templates.iter().collect(),
        };
        let template = pool[rng.pick(pool.len())];
        let category = category.unwrap_or_else(|| self.roll_category(rng));

        Monster {
            template_id: template.id.clone(),
            name: display_name(template, category),
            level,
            archetype: archetype.unwrap_or(template.archetype),
            category,
            max_health: (template.health_at(level) * category.health_multiplier()).round(),
            damage: template.damage_at(level) * category.damage_multiplier(),
            power: template.power_at(level),
            defense: template.defense_at(level),
            stats: CombatStats {
                crit_chance: template.crit_chance,
                dodge: template.dodge,
                ..CombatStats::default()
            },
            resistances: template.resistances.clone(),
        }
    }
}
