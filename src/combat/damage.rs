//! Damage calculation
//!
//! One attack runs through a fixed sequence of stages:
//!
//! 1. base = power * 0.4 + weapon damage + skill damage
//! 2. equipment percentage bonuses for the skill's damage type
//! 3. combat triangle (plus wild affinity)
//! 4. target resistance
//! 5. damage floor
//! 6. critical hit on the floored value
//! 7. status effect rolls
//!
//! The order matters: crits multiply the post-floor value, and statuses are
//! rolled after the crit roll.

use serde::{Deserialize, Serialize};

use super::archetype::triangle_multiplier;
use super::combatant::Combatant;
use super::resistance::{
    apply_resistance, status_apply_chance, EntityKind, StatusKind, BOSS_SLOW_FACTOR,
};
use crate::config::CombatTuning;
use crate::items::{Equipment, Weapon};
use crate::progression::Skill;
use crate::rng::RandomSource;

/// Everything an attack needs
#[derive(Debug, Clone, Copy)]
pub struct AttackInput<'a> {
    pub attacker: &'a Combatant,
    pub target: &'a Combatant,
    pub skill: &'a Skill,
    pub weapon: Option<&'a Weapon>,
    pub equipment: Option<&'a Equipment>,
}

/// Value after each pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub base: f64,
    pub equipment_bonus: f64,
    pub after_equipment: f64,
    pub triangle_multiplier: f64,
    pub after_triangle: f64,
    pub after_resistance: f64,
    /// Floored value, before any crit
    pub pre_crit: f64,
    pub is_crit: bool,
    pub crit_multiplier: f64,
    pub final_damage: f64,
}

impl DamageBreakdown {
    /// Final damage relative to stage-1 base damage
    pub fn effectiveness(&self) -> f64 {
        if self.base <= 0.0 {
            0.0
        } else {
            self.final_damage / self.base
        }
    }
}

/// Result of one attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub damage: f64,
    pub applied_effects: Vec<StatusKind>,
    pub breakdown: DamageBreakdown,
}

/// Stage 1
pub fn base_damage(power: f64, weapon: Option<&Weapon>, skill: &Skill, tuning: &CombatTuning) -> f64 {
    let weapon_damage = weapon.map(|w| w.flat_damage).unwrap_or(0.0);
    power * tuning.power_scaling + weapon_damage + skill.base_damage
}

/// Stages 1-5: deterministic damage before the crit roll
pub fn pre_crit_damage(input: &AttackInput<'_>, tuning: &CombatTuning) -> DamageBreakdown {
    let base = base_damage(input.attacker.power, input.weapon, input.skill, tuning);

    let equipment_bonus = input
        .equipment
        .map(|e| e.percent_bonus(input.skill.damage_type))
        .unwrap_or(0.0);
    let after_equipment = base * (1.0 + equipment_bonus);

    let triangle = triangle_multiplier(
        input.attacker.archetype,
        input.target.archetype,
        input.target.is_wild,
        tuning.triangle_bonus,
        tuning.wild_affinity_bonus,
    );
    let after_triangle = after_equipment * triangle;

    let after_resistance = match input.target.effective_resistances() {
        Some(profile) => apply_resistance(after_triangle, input.skill.damage_type, &profile),
        None => after_triangle,
    };

    let pre_crit = after_resistance.max(tuning.damage_floor);

    DamageBreakdown {
        base,
        equipment_bonus,
        after_equipment,
        triangle_multiplier: triangle,
        after_triangle,
        after_resistance,
        pre_crit,
        is_crit: false,
        crit_multiplier: 1.0,
        final_damage: pre_crit,
    }
}

/// Chance that a skill's status lands on `target`
pub fn status_chance(target: &Combatant, kind: StatusKind, base_chance: f64, tuning: &CombatTuning) -> f64 {
    let is_boss = target.kind == EntityKind::Boss;
    if is_boss && kind.is_boss_immune() {
        return 0.0;
    }
    match target.effective_resistances() {
        Some(profile) => status_apply_chance(kind, &profile, base_chance),
        None if is_boss && kind == StatusKind::Slow => tuning.default_status_chance * BOSS_SLOW_FACTOR,
        None => tuning.default_status_chance,
    }
}

/// Run the full pipeline for one attack.
///
/// Consumes one roll for the crit, then one roll per status the skill can
/// still apply (statuses with zero chance are skipped without rolling).
pub fn resolve_attack(input: &AttackInput<'_>, tuning: &CombatTuning, rng: &mut impl RandomSource) -> AttackOutcome {
    let mut breakdown = pre_crit_damage(input, tuning);

    let (crit_bonus, crit_multiplier_bonus) = input
        .weapon
        .map(|w| (w.crit_bonus, w.crit_multiplier_bonus))
        .unwrap_or((0.0, 0.0));
    let crit_chance = input.attacker.stats.crit_chance + crit_bonus;
    if rng.roll() < crit_chance {
        breakdown.is_crit = true;
        breakdown.crit_multiplier = tuning.crit_multiplier + crit_multiplier_bonus;
        breakdown.final_damage = breakdown.pre_crit * breakdown.crit_multiplier;
    }

    let mut applied_effects = Vec::new();
    for application in &input.skill.effects {
        let chance = status_chance(input.target, application.kind, application.chance, tuning);
        if chance <= 0.0 {
            continue;
        }
        if rng.roll() < chance {
            applied_effects.push(application.kind);
        }
    }

    AttackOutcome {
        damage: breakdown.final_damage,
        applied_effects,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Archetype, DamageType, ResistanceProfile, StatusEffects};
    use crate::entities::{CombatStats, Pool};
    use crate::items::{BonusTarget, EquipSlot, Gear};
    use crate::rng::ScriptedRolls;

    fn combatant(archetype: Archetype, kind: EntityKind, power: f64) -> Combatant {
        Combatant {
            name: format!("{:?}", archetype),
            level: 1,
            kind,
            archetype,
            is_wild: false,
            is_unique: false,
            health: Pool::new(100.0),
            power,
            damage: 4.0,
            defense: 2.0,
            stats: CombatStats { crit_chance: 0.05, ..CombatStats::default() },
            resistances: None,
            wards: Vec::new(),
            statuses: StatusEffects::default(),
        }
    }

    #[test]
    fn test_reference_scenario_pre_crit() {
        let attacker = combatant(Archetype::Melee, EntityKind::Player, 2.0);
        let target = combatant(Archetype::Ranged, EntityKind::RegularMonster, 1.0);
        let skill = Skill::new("Strike", 1.0, DamageType::Physical);
        let weapon = Weapon::new("Club", 1.0);
        let input = AttackInput {
            attacker: &attacker,
            target: &target,
            skill: &skill,
            weapon: Some(&weapon),
            equipment: None,
        };

        let breakdown = pre_crit_damage(&input, &CombatTuning::default());
        assert!((breakdown.base - 2.8).abs() < 1e-9);
        assert!((breakdown.triangle_multiplier - 1.2).abs() < 1e-12);
        assert!((breakdown.pre_crit - 3.36).abs() < 1e-9);

        // No crit: roll above 0.05
        let mut rolls = ScriptedRolls::new([0.5]);
        let outcome = resolve_attack(&input, &CombatTuning::default(), &mut rolls);
        assert!((outcome.damage - 3.36).abs() < 1e-9);
        assert!(outcome.applied_effects.is_empty());
    }

    #[test]
    fn test_crit_multiplies_floored_damage() {
        let attacker = combatant(Archetype::Wild, EntityKind::Player, 0.0);
        let mut target = combatant(Archetype::Melee, EntityKind::RegularMonster, 1.0);
        target.resistances = Some(ResistanceProfile::regular_monster().with_damage(DamageType::Physical, 99));
        let skill = Skill::new("Poke", 2.0, DamageType::Physical);
        let weapon = Weapon::new("Needle", 0.0).with_crit(0.10, 0.5);
        let input = AttackInput {
            attacker: &attacker,
            target: &target,
            skill: &skill,
            weapon: Some(&weapon),
            equipment: None,
        };

        let mut rolls = ScriptedRolls::new([0.1]); // below 0.05 + 0.10
        let outcome = resolve_attack(&input, &CombatTuning::default(), &mut rolls);
        assert!(outcome.breakdown.is_crit);
        assert_eq!(outcome.breakdown.pre_crit, 1.0);
        assert!((outcome.damage - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_equipment_bonus_applies_before_triangle() {
        let attacker = combatant(Archetype::Magic, EntityKind::Player, 5.0);
        let target = combatant(Archetype::Melee, EntityKind::RegularMonster, 1.0);
        let skill = Skill::new("Firebolt", 8.0, DamageType::Fire);
        let mut equipment = Equipment::new();
        equipment.equip(Gear::new("Ember Ring", EquipSlot::Ring).with_bonus(BonusTarget::Type(DamageType::Fire), 0.25));
        let input = AttackInput {
            attacker: &attacker,
            target: &target,
            skill: &skill,
            weapon: None,
            equipment: Some(&equipment),
        };

        let breakdown = pre_crit_damage(&input, &CombatTuning::default());
        assert!((breakdown.base - 10.0).abs() < 1e-12);
        assert!((breakdown.after_equipment - 12.5).abs() < 1e-12);
        assert!((breakdown.pre_crit - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_boss_status_rules_in_pipeline() {
        let attacker = combatant(Archetype::Magic, EntityKind::Player, 5.0);
        let mut boss = combatant(Archetype::Melee, EntityKind::Boss, 5.0);
        boss.resistances = Some(ResistanceProfile::boss());
        let skill = Skill::new("Frost Chain", 3.0, DamageType::Ice)
            .with_effect(StatusKind::Stun, 1.0)
            .with_effect(StatusKind::Freeze, 1.0)
            .with_effect(StatusKind::Slow, 1.0);
        let input = AttackInput {
            attacker: &attacker,
            target: &boss,
            skill: &skill,
            weapon: None,
            equipment: None,
        };

        // crit roll, then only slow rolls (30% gate)
        let mut rolls = ScriptedRolls::new([0.9, 0.29]);
        let outcome = resolve_attack(&input, &CombatTuning::default(), &mut rolls);
        assert_eq!(outcome.applied_effects, vec![StatusKind::Slow]);
        assert_eq!(rolls.remaining(), 0);

        let mut rolls = ScriptedRolls::new([0.9, 0.31]);
        let outcome = resolve_attack(&input, &CombatTuning::default(), &mut rolls);
        assert!(outcome.applied_effects.is_empty());
    }

    #[test]
    fn test_default_status_chance_without_profile() {
        let target = combatant(Archetype::Melee, EntityKind::RegularMonster, 1.0);
        let tuning = CombatTuning::default();
        assert_eq!(status_chance(&target, StatusKind::Burn, 1.0, &tuning), 0.7);

        let boss = combatant(Archetype::Melee, EntityKind::Boss, 1.0);
        assert_eq!(status_chance(&boss, StatusKind::Stun, 1.0, &tuning), 0.0);
        assert!((status_chance(&boss, StatusKind::Slow, 1.0, &tuning) - 0.21).abs() < 1e-12);
    }
}
