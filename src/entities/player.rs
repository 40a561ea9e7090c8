//! Player records
//!
//! Creation, XP/point bookkeeping, and the combat snapshot used by
//! encounters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::stats::{Attribute, Attributes, CombatStats, Pool};
use crate::combat::{Archetype, Combatant, EntityKind, ResistanceProfile, StatusEffects};
use crate::error::CombatError;
use crate::items::{Equipment, LootDrop, Weapon};
use crate::progression::{default_skills, starting_skills, ExperienceLedger, LevelChange, Skill, XpPool, XpReward};

/// Attribute points handed out at character creation
pub const BASE_POINT_BUDGET: u32 = 10;

/// A persistent player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub attributes: Attributes,
    pub health: Pool,
    pub mana: Pool,
    pub stamina: Pool,
    pub combat_stats: CombatStats,
    pub experience: ExperienceLedger,
    /// Base points not yet placed into attributes
    pub unspent_base_points: u32,
    pub class_points_earned: u32,
    pub class_points_spent: u32,
    pub skill_points_earned: u32,
    pub skill_ranks: HashMap<String, u32>,
    pub gold: u64,
    pub loot: Vec<LootDrop>,
    pub weapon: Weapon,
    pub equipment: Equipment,
    pub skills: Vec<Skill>,
}

/// Starting attributes before the player's own allocation
pub fn archetype_attributes(archetype: Archetype) -> Attributes {
    match archetype {
        Archetype::Melee => Attributes::new(4, 3, 2, 1),
        Archetype::Ranged => Attributes::new(2, 2, 4, 2),
        Archetype::Magic => Attributes::new(1, 2, 2, 5),
        Archetype::Wild => Attributes::new(3, 3, 3, 1),
    }
}

fn starting_weapon(archetype: Archetype) -> Weapon {
    match archetype {
        Archetype::Melee => Weapon::new("Worn Longsword", 2.0),
        Archetype::Ranged => Weapon::new("Hunting Bow", 1.5).with_crit(0.05, 0.0),
        Archetype::Magic => Weapon::new("Ashwood Staff", 1.0).with_crit(0.0, 0.25),
        Archetype::Wild => Weapon::new("Bone Claws", 1.5).with_crit(0.03, 0.1),
    }
}

/// Create a new player. `allocation` spends part of the base-point budget
/// on top of the archetype's starting attributes.
pub fn create_player(
    id: impl Into<String>,
    name: impl Into<String>,
    archetype: Archetype,
    allocation: Attributes,
) -> Result<Player, CombatError> {
    let id = id.into();
    let name = name.into();
    if id.trim().is_empty() {
        return Err(CombatError::InvalidAllocation("player id must not be empty".to_string()));
    }
    if allocation.total() > BASE_POINT_BUDGET {
        return Err(CombatError::InvalidAllocation(format!(
            "allocated {} base points, budget is {}",
            allocation.total(),
            BASE_POINT_BUDGET
        )));
    }

    let attributes = archetype_attributes(archetype).plus(&allocation);
    let experience = ExperienceLedger::new(BASE_POINT_BUDGET);

    let mut player = Player {
        id,
        name,
        archetype,
        attributes,
        health: Pool::new(0.0),
        mana: Pool::new(0.0),
        stamina: Pool::new(0.0),
        combat_stats: CombatStats::default(),
        unspent_base_points: BASE_POINT_BUDGET - allocation.total(),
        class_points_earned: experience.class_points(),
        class_points_spent: 0,
        skill_points_earned: experience.skill_points(),
        skill_ranks: HashMap::new(),
        experience,
        gold: 0,
        loot: Vec::new(),
        weapon: starting_weapon(archetype),
        equipment: Equipment::new(),
        skills: starting_skills(&default_skills(), archetype),
    };
    player.refresh_derived();
    player.health.refill();
    player.mana.refill();
    player.stamina.refill();

    log::info!(
        "Created {} {} ({}) with attributes {:?}",
        player.archetype.name(),
        player.name,
        player.id,
        player.attributes
    );
    Ok(player)
}

impl Player {
    pub fn level(&self) -> u32 {
        self.experience.player_level()
    }

    pub fn available_class_points(&self) -> u32 {
        self.class_points_earned - self.class_points_spent
    }

    pub fn allocated_skill_points(&self) -> u32 {
        self.skill_ranks.values().sum()
    }

    pub fn available_skill_points(&self) -> u32 {
        self.skill_points_earned.saturating_sub(self.allocated_skill_points())
    }

    /// Recompute pool maxima and combat stats from attributes.
    /// Growing a pool's max grows its current value by the same amount.
    pub fn refresh_derived(&mut self) {
        let a = self.attributes;
        let resize = |pool: &mut Pool, max: f64| {
            let gained = (max - pool.max).max(0.0);
            pool.max = max;
            pool.current = (pool.current + gained).min(max);
        };
        resize(&mut self.health, 50.0 + 10.0 * a.toughness as f64);
        resize(&mut self.mana, 20.0 + 5.0 * a.intellect as f64);
        resize(&mut self.stamina, 20.0 + 5.0 * a.agility as f64);

        self.combat_stats = CombatStats {
            crit_chance: (0.05 + 0.01 * a.agility as f64).min(0.5),
            crit_damage: 1.5,
            accuracy: (0.85 + 0.01 * a.intellect as f64).min(0.99),
            dodge: (0.03 + 0.01 * a.agility as f64).min(0.4),
        };
    }

    /// Grant XP to one pool, keeping point counters in step
    pub fn add_xp(&mut self, pool: XpPool, amount: u64) -> LevelChange {
        let change = self.experience.add_xp(pool, amount);
        self.class_points_earned += change.class_points_gained;
        self.skill_points_earned += change.skill_points_gained;
        if change.leveled_up() {
            log::info!(
                "{} reached {} level {} (+{} class, +{} skill points)",
                self.name,
                pool.name(),
                change.new_level,
                change.class_points_gained,
                change.skill_points_gained
            );
        }
        change
    }

    /// Grant a reward across all three pools
    pub fn add_reward(&mut self, reward: &XpReward) -> Vec<LevelChange> {
        XpPool::ALL
            .iter()
            .map(|&pool| self.add_xp(pool, reward.get(pool)))
            .collect()
    }

    /// Place a leftover base point into an attribute
    pub fn spend_base_point(&mut self, attribute: Attribute) -> Result<(), CombatError> {
        if self.unspent_base_points == 0 {
            return Err(CombatError::InsufficientPoints { kind: "base", needed: 1, available: 0 });
        }
        self.unspent_base_points -= 1;
        self.attributes.raise(attribute, 1);
        self.refresh_derived();
        Ok(())
    }

    /// Permanently raise an attribute with a class point
    pub fn spend_class_point(&mut self, attribute: Attribute) -> Result<(), CombatError> {
        let available = self.available_class_points();
        if available == 0 {
            return Err(CombatError::InsufficientPoints { kind: "class", needed: 1, available });
        }
        self.class_points_spent += 1;
        self.attributes.raise(attribute, 1);
        self.refresh_derived();
        log::debug!("{} raised {:?} to {}", self.name, attribute, self.attributes.get(attribute));
        Ok(())
    }

    /// Put a skill point into a known skill
    pub fn allocate_skill_point(&mut self, skill: &str) -> Result<u32, CombatError> {
        if !self.skills.iter().any(|s| s.name == skill) {
            return Err(CombatError::UnknownSkill(skill.to_string()));
        }
        let available = self.available_skill_points();
        if available == 0 {
            return Err(CombatError::InsufficientPoints { kind: "skill", needed: 1, available });
        }
        let rank = self.skill_ranks.entry(skill.to_string()).or_insert(0);
        *rank += 1;
        Ok(*rank)
    }

    /// Refund every allocated skill point, returning how many came back
    pub fn reset_skill_points(&mut self) -> u32 {
        let refunded = self.allocated_skill_points();
        self.skill_ranks.clear();
        refunded
    }

    pub fn skill_rank(&self, skill: &str) -> u32 {
        self.skill_ranks.get(skill).copied().unwrap_or(0)
    }

    /// A known skill with its rank bonus applied
    pub fn ranked_skill(&self, name: &str) -> Result<Skill, CombatError> {
        self.skills
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.at_rank(self.skill_rank(name)))
            .ok_or_else(|| CombatError::UnknownSkill(name.to_string()))
    }

    pub fn learn_skill(&mut self, skill: Skill) {
        if !self.skills.iter().any(|s| s.name == skill.name) {
            self.skills.push(skill);
        }
    }

    /// Replace the starting skills with the ones `catalogue` gives this
    /// archetype. A catalogue with none for it keeps the built-in set.
    pub fn with_skill_book(mut self, catalogue: &[Skill]) -> Self {
        let skills = starting_skills(catalogue, self.archetype);
        if skills.is_empty() {
            log::warn!("Skill catalogue has no {} skills, keeping built-ins", self.archetype.name());
            return self;
        }
        self.skills.clear();
        for skill in skills {
            self.learn_skill(skill);
        }
        self
    }

    /// In-combat copy of this player
    pub fn combat_snapshot(&self) -> Combatant {
        Combatant {
            name: self.name.clone(),
            level: self.level(),
            kind: EntityKind::Player,
            archetype: self.archetype,
            is_wild: false,
            is_unique: false,
            health: self.health,
            power: self.attributes.power as f64,
            damage: self.weapon.flat_damage,
            defense: self.attributes.toughness as f64 + self.equipment.total_defense(),
            stats: self.combat_stats,
            resistances: Some(ResistanceProfile::player()),
            wards: Vec::new(),
            statuses: StatusEffects::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::progression::points_from_level;
    use proptest::prelude::*;

    fn melee() -> Player {
        create_player("p1", "Aldric", Archetype::Melee, Attributes::new(2, 2, 0, 0)).unwrap()
    }

    #[test]
    fn test_create_player_applies_allocation() {
        let player = melee();
        assert_eq!(player.attributes, Attributes::new(6, 5, 2, 1));
        assert_eq!(player.health.max, 100.0);
        assert_eq!(player.health.current, 100.0);
        assert_eq!(player.unspent_base_points, 6);
        assert_eq!(player.experience.base_points(), BASE_POINT_BUDGET);
        assert_eq!(player.level(), 2);
    }

    #[test]
    fn test_over_allocation_rejected() {
        let err = create_player("p2", "Greedy", Archetype::Magic, Attributes::new(5, 5, 5, 5)).unwrap_err();
        assert!(matches!(err, CombatError::InvalidAllocation(_)));
    }

    #[test]
    fn test_class_points_require_levels() {
        let mut player = melee();
        assert!(matches!(
            player.spend_class_point(Attribute::Power),
            Err(CombatError::InsufficientPoints { kind: "class", .. })
        ));

        player.add_xp(XpPool::Class, 202); // class level 3
        assert_eq!(player.available_class_points(), 1);
        player.spend_class_point(Attribute::Toughness).unwrap();
        assert_eq!(player.attributes.toughness, 6);
        assert_eq!(player.health.max, 110.0);
        assert_eq!(player.available_class_points(), 0);
    }

    #[test]
    fn test_skill_points_are_reallocatable() {
        let mut player = melee();
        assert_eq!(player.available_skill_points(), 1);
        assert_eq!(player.allocate_skill_point("Cleave").unwrap(), 1);
        assert!(player.allocate_skill_point("Cleave").is_err());
        assert!(matches!(
            player.allocate_skill_point("Firebolt"),
            Err(CombatError::UnknownSkill(_))
        ));

        assert!((player.ranked_skill("Cleave").unwrap().base_damage - 4.4).abs() < 1e-9);
        assert_eq!(player.reset_skill_points(), 1);
        assert_eq!(player.available_skill_points(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let player = melee();
        let mut snapshot = player.combat_snapshot();
        snapshot.take_damage(50.0);
        assert_eq!(player.health.current, 100.0);
        assert_eq!(snapshot.kind, EntityKind::Player);
    }

    #[test]
    fn test_skill_book_replaces_starting_skills() {
        let catalogue = vec![
            Skill::new("Rend", 6.0, DamageType::Physical).for_archetype(Archetype::Melee),
            Skill::new("Rend", 9.0, DamageType::Physical).for_archetype(Archetype::Melee),
            Skill::new("Hex", 3.0, DamageType::Dark).for_archetype(Archetype::Magic),
        ];
        let player = melee().with_skill_book(&catalogue);
        let names: Vec<&str> = player.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rend"]);
        assert_eq!(player.ranked_skill("Rend").unwrap().base_damage, 6.0);

        let untouched = melee().with_skill_book(&catalogue[2..]);
        assert_eq!(untouched.skills, melee().skills);
    }

    proptest! {
        #[test]
        fn prop_point_counters_never_drift(
            grants in proptest::collection::vec((0usize..3, 0u64..1_500), 0..30)
        ) {
            let mut player = melee();
            for (pool, amount) in grants {
                player.add_xp(XpPool::ALL[pool], amount);
            }
            let class = points_from_level(player.experience.class_level()).class_points;
            let skill = points_from_level(player.experience.skill_level()).skill_points;
            prop_assert_eq!(player.class_points_earned, class);
            prop_assert_eq!(player.skill_points_earned, skill);
        }
    }
}
