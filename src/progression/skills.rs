//! Skill system
//!
//! Skills a player can use in combat. Skill points raise a skill's rank,
//! each rank adding 10% to its base damage.

use serde::{Deserialize, Serialize};

use crate::combat::{Archetype, DamageType, ResistanceModifier, ResistanceTarget, StatusKind};

/// Damage bonus per allocated skill rank
pub const RANK_DAMAGE_BONUS: f64 = 0.10;

/// A status a skill tries to inflict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusApplication {
    pub kind: StatusKind,
    /// Chance before resistance (1.0 = always, if unresisted)
    pub chance: f64,
}

/// Temporary self-buff granted when the skill is used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ward {
    pub modifier: ResistanceModifier,
    pub rounds: u32,
}

/// A skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub archetype: Option<Archetype>,
    pub base_damage: f64,
    pub damage_type: DamageType,
    #[serde(default)]
    pub effects: Vec<StatusApplication>,
    #[serde(default)]
    pub ward: Option<Ward>,
}

impl Skill {
    pub fn new(name: impl Into<String>, base_damage: f64, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            archetype: None,
            base_damage,
            damage_type,
            effects: Vec::new(),
            ward: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn for_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn with_effect(mut self, kind: StatusKind, chance: f64) -> Self {
        self.effects.push(StatusApplication { kind, chance });
        self
    }

    pub fn with_ward(mut self, modifier: ResistanceModifier, rounds: u32) -> Self {
        self.ward = Some(Ward { modifier, rounds });
        self
    }

    /// Plain weapon swing used when no skill is chosen
    pub fn basic_attack() -> Self {
        Self::new("Attack", 0.0, DamageType::Physical)
    }

    /// Copy of this skill with rank bonuses folded into base damage
    pub fn at_rank(&self, rank: u32) -> Self {
        let mut ranked = self.clone();
        ranked.base_damage *= 1.0 + rank as f64 * RANK_DAMAGE_BONUS;
        ranked
    }
}

pub fn skill_cleave() -> Skill {
    Skill::new("Cleave", 4.0, DamageType::Physical)
        .with_description("A heavy arc that opens wounds.")
        .for_archetype(Archetype::Melee)
        .with_effect(StatusKind::Bleed, 0.5)
}

pub fn skill_shield_bash() -> Skill {
    Skill::new("Shield Bash", 2.0, DamageType::Physical)
        .with_description("Slam the target, leaving it dazed.")
        .for_archetype(Archetype::Melee)
        .with_effect(StatusKind::Stun, 0.35)
}

pub fn skill_stone_skin() -> Skill {
    Skill::new("Stone Skin", 1.0, DamageType::Physical)
        .with_description("Strike while hardening against blows.")
        .for_archetype(Archetype::Melee)
        .with_ward(
            ResistanceModifier {
                target: ResistanceTarget::Damage(DamageType::Physical),
                amount: 30,
            },
            2,
        )
}

pub fn skill_piercing_shot() -> Skill {
    Skill::new("Piercing Shot", 4.5, DamageType::Physical)
        .with_description("An arrow aimed at a gap in the armor.")
        .for_archetype(Archetype::Ranged)
}

pub fn skill_crippling_arrow() -> Skill {
    Skill::new("Crippling Arrow", 2.5, DamageType::Poison)
        .with_description("A barbed, venom-tipped shaft.")
        .for_archetype(Archetype::Ranged)
        .with_effect(StatusKind::Slow, 0.6)
        .with_effect(StatusKind::Poison, 0.6)
}

pub fn skill_firebolt() -> Skill {
    Skill::new("Firebolt", 5.0, DamageType::Fire)
        .with_description("Hurl a searing bolt.")
        .for_archetype(Archetype::Magic)
        .with_effect(StatusKind::Burn, 0.5)
}

pub fn skill_frost_lance() -> Skill {
    Skill::new("Frost Lance", 4.0, DamageType::Ice)
        .with_description("A shard of ice that can lock joints in place.")
        .for_archetype(Archetype::Magic)
        .with_effect(StatusKind::Freeze, 0.3)
}

pub fn skill_savage_maul() -> Skill {
    Skill::new("Savage Maul", 4.5, DamageType::Physical)
        .with_description("Tear into the target like a beast.")
        .for_archetype(Archetype::Wild)
        .with_effect(StatusKind::Bleed, 0.4)
        .with_effect(StatusKind::Weakness, 0.3)
}

/// Every built-in skill
pub fn default_skills() -> Vec<Skill> {
    vec![
        skill_cleave(),
        skill_shield_bash(),
        skill_stone_skin(),
        skill_piercing_shot(),
        skill_crippling_arrow(),
        skill_firebolt(),
        skill_frost_lance(),
        skill_savage_maul(),
    ]
}

/// Skills from `catalogue` a new character of `archetype` starts with
pub fn starting_skills(catalogue: &[Skill], archetype: Archetype) -> Vec<Skill> {
    catalogue
        .iter()
        .filter(|s| s.archetype == Some(archetype))
        .cloned()
        .collect()
}
