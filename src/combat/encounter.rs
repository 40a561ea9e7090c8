//! Regular combat encounters
//!
//! A one-on-one fight between a player snapshot and a generated monster.
//! The encounter is `Active` until one side drops to zero health, after
//! which every attack call is ignored.

use serde::{Deserialize, Serialize};

use super::analytics::{DamageAnalytics, SkillInsight};
use super::archetype::Archetype;
use super::combatant::Combatant;
use super::damage::{resolve_attack, AttackInput};
use super::resistance::{DamageType, StatusKind};
use crate::config::{CombatTuning, GameConfig};
use crate::entities::{Monster, MonsterGenerator, Player};
use crate::game::{Side, TurnTracker};
use crate::items::{Equipment, Weapon};
use crate::progression::{monster_xp_reward, MonsterCategory, Skill, XpReward};
use crate::rng::RandomSource;

/// Where an encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    Active,
    Victory,
    Defeat,
}

/// What the player earns for winning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterReward {
    pub xp: XpReward,
    pub gold: u64,
}

/// Result of one attack call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub actor: Side,
    pub action: String,
    pub damage: f64,
    pub is_crit: bool,
    pub applied_effects: Vec<StatusKind>,
    /// Set when a stun or freeze cost the actor its turn
    pub skipped_by: Option<StatusKind>,
    pub insight: Option<SkillInsight>,
    pub player_health: f64,
    pub monster_health: f64,
    pub state: EncounterState,
}

/// A regular fight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub player_id: String,
    pub player: Combatant,
    pub monster: Combatant,
    pub monster_template: String,
    pub weapon: Weapon,
    pub equipment: Equipment,
    pub turns: TurnTracker,
    pub log: Vec<String>,
    pub combat_active: bool,
    pub state: EncounterState,
    pub reward: Option<EncounterReward>,
    gold_on_victory: u64,
    reward_claimed: bool,
    analytics: DamageAnalytics,
    tuning: CombatTuning,
}

/// Build an encounter against a freshly generated monster
pub fn create_encounter(
    player: &Player,
    area_level: u32,
    forced_archetype: Option<Archetype>,
    forced_category: Option<MonsterCategory>,
    generator: &impl MonsterGenerator,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> Encounter {
    let monster = generator.generate(area_level, forced_archetype, forced_category, rng);
    Encounter::new(player, monster, config)
}

impl Encounter {
    pub fn new(player: &Player, monster: Monster, config: &GameConfig) -> Self {
        let gold_on_victory = monster.gold_reward(config.rewards.gold_per_level);
        let monster_template = monster.template_id.clone();
        let monster = monster.into_combatant();
        let opening = format!(
            "{} (level {}) encounters {} (level {} {}).",
            player.name,
            player.level(),
            monster.name,
            monster.level,
            monster.archetype.name()
        );
        log::info!("{}", opening);

        Self {
            player_id: player.id.clone(),
            player: player.combat_snapshot(),
            monster,
            monster_template,
            weapon: player.weapon.clone(),
            equipment: player.equipment.clone(),
            turns: TurnTracker::new(),
            log: vec![opening],
            combat_active: true,
            state: EncounterState::Active,
            reward: None,
            gold_on_victory,
            reward_claimed: false,
            analytics: DamageAnalytics::new(),
            tuning: config.combat.clone(),
        }
    }

    pub fn round(&self) -> u32 {
        self.turns.round()
    }

    /// The player's move. Falls back to a basic attack and the player's
    /// own weapon. Returns `None` once the fight is over.
    pub fn player_attack(
        &mut self,
        skill: Option<&Skill>,
        weapon: Option<&Weapon>,
        rng: &mut impl RandomSource,
    ) -> Option<TurnReport> {
        if !self.combat_active {
            return None;
        }

        if let Some(kind) = self.player.statuses.take_skip() {
            self.log.push(format!("{} is {} and cannot act!", self.player.name, kind.name()));
            self.turns.hand_over(Side::Enemy);
            return Some(self.skipped_report(Side::Player, kind));
        }

        let basic = Skill::basic_attack();
        let skill = skill.unwrap_or(&basic);
        let weapon = weapon.unwrap_or(&self.weapon);

        let outcome = resolve_attack(
            &AttackInput {
                attacker: &self.player,
                target: &self.monster,
                skill,
                weapon: Some(weapon),
                equipment: Some(&self.equipment),
            },
            &self.tuning,
            rng,
        );
        let damage = debuffed(outcome.damage, &self.player, &self.tuning);
        self.monster.take_damage(damage);
        self.log.push(hit_line(&self.player.name, &self.monster.name, &skill.name, damage, outcome.breakdown.is_crit));
        inflict(&mut self.monster, &outcome.applied_effects, damage, &self.tuning, &mut self.log);
        if let Some(ward) = skill.ward {
            self.player.add_ward(ward.modifier, ward.rounds);
        }
        let insight = self.analytics.record(&skill.name, &outcome.breakdown);

        if !self.monster.is_alive() {
            self.finish_victory();
        } else {
            self.turns.hand_over(Side::Enemy);
        }

        Some(TurnReport {
            actor: Side::Player,
            action: skill.name.clone(),
            damage,
            is_crit: outcome.breakdown.is_crit,
            applied_effects: outcome.applied_effects,
            skipped_by: None,
            insight: Some(insight),
            player_health: self.player.health.current,
            monster_health: self.monster.health.current,
            state: self.state,
        })
    }

    /// The monster's move, followed by round-end effects.
    /// Returns `None` once the fight is over.
    pub fn monster_attack(&mut self, rng: &mut impl RandomSource) -> Option<TurnReport> {
        if !self.combat_active {
            return None;
        }

        let report = match self.monster.statuses.take_skip() {
            Some(kind) => {
                self.log.push(format!("{} is {} and cannot act!", self.monster.name, kind.name()));
                self.skipped_report(Side::Enemy, kind)
            }
            None => {
                let skill = Skill::new(
                    "Attack",
                    self.monster.damage * self.tuning.monster_skill_scaling,
                    DamageType::Physical,
                );
                let outcome = resolve_attack(
                    &AttackInput {
                        attacker: &self.monster,
                        target: &self.player,
                        skill: &skill,
                        weapon: None,
                        equipment: None,
                    },
                    &self.tuning,
                    rng,
                );
                let damage = debuffed(outcome.damage, &self.monster, &self.tuning);
                self.player.take_damage(damage);
                self.log.push(hit_line(&self.monster.name, &self.player.name, "attack", damage, outcome.breakdown.is_crit));

                TurnReport {
                    actor: Side::Enemy,
                    action: skill.name,
                    damage,
                    is_crit: outcome.breakdown.is_crit,
                    applied_effects: outcome.applied_effects,
                    skipped_by: None,
                    insight: None,
                    player_health: 0.0,
                    monster_health: 0.0,
                    state: EncounterState::Active,
                }
            }
        };

        if !self.player.is_alive() {
            self.finish_defeat();
        } else {
            self.end_round();
        }

        Some(TurnReport {
            player_health: self.player.health.current,
            monster_health: self.monster.health.current,
            state: self.state,
            ..report
        })
    }

    /// Hand out the victory reward once. Later calls return `None`.
    pub fn take_reward(&mut self) -> Option<EncounterReward> {
        if self.reward_claimed {
            return None;
        }
        let reward = self.reward?;
        self.reward_claimed = true;
        Some(reward)
    }

    pub fn skill_average(&self, skill: &str) -> Option<f64> {
        self.analytics.rolling_average(skill)
    }

    fn end_round(&mut self) {
        tick_round_effects(&mut self.monster, &mut self.log);
        if !self.monster.is_alive() {
            self.finish_victory();
            return;
        }
        tick_round_effects(&mut self.player, &mut self.log);
        if !self.player.is_alive() {
            self.finish_defeat();
            return;
        }
        self.turns.end_round();
    }

    fn finish_victory(&mut self) {
        self.combat_active = false;
        self.state = EncounterState::Victory;
        let xp = monster_xp_reward(
            self.monster.level,
            self.monster.is_wild,
            self.monster.is_unique,
            self.player.archetype,
        );
        self.reward = Some(EncounterReward { xp, gold: self.gold_on_victory });
        self.log.push(format!("{} is defeated! {} is victorious.", self.monster.name, self.player.name));
        log::info!(
            "{} defeated {} in round {} ({} XP, {} gold)",
            self.player.name,
            self.monster.name,
            self.turns.round(),
            xp.total(),
            self.gold_on_victory
        );
    }

    fn finish_defeat(&mut self) {
        self.combat_active = false;
        self.state = EncounterState::Defeat;
        self.log.push(format!("{} has fallen to {}.", self.player.name, self.monster.name));
        log::info!("{} was defeated by {} in round {}", self.player.name, self.monster.name, self.turns.round());
    }

    fn skipped_report(&self, actor: Side, kind: StatusKind) -> TurnReport {
        TurnReport {
            actor,
            action: "skip".to_string(),
            damage: 0.0,
            is_crit: false,
            applied_effects: Vec::new(),
            skipped_by: Some(kind),
            insight: None,
            player_health: self.player.health.current,
            monster_health: self.monster.health.current,
            state: self.state,
        }
    }
}

/// Outgoing damage after the attacker's slow/weakness, floored again
pub(crate) fn debuffed(damage: f64, attacker: &Combatant, tuning: &CombatTuning) -> f64 {
    let multiplier = attacker.statuses.damage_multiplier();
    if multiplier < 1.0 {
        (damage * multiplier).max(tuning.damage_floor)
    } else {
        damage
    }
}

/// Put landed statuses on the target. DoTs tick for a share of the hit.
pub(crate) fn inflict(
    target: &mut Combatant,
    effects: &[StatusKind],
    damage: f64,
    tuning: &CombatTuning,
    log: &mut Vec<String>,
) {
    for &kind in effects {
        let intensity = if kind.is_dot() {
            (damage * tuning.dot_intensity).max(tuning.damage_floor)
        } else {
            0.0
        };
        target.statuses.add_effect(kind, kind.default_rounds(), intensity);
        log.push(format!("{} is afflicted with {}.", target.name, kind.name()));
    }
}

/// Round-end upkeep for one combatant: DoT damage, expiry, ward countdown
pub(crate) fn tick_round_effects(combatant: &mut Combatant, log: &mut Vec<String>) {
    let result = combatant.statuses.tick(&combatant.name);
    log.extend(result.messages);
    if result.damage_dealt > 0.0 {
        combatant.take_damage(result.damage_dealt);
    }
    for kind in result.expired {
        log.push(format!("{}'s {} wears off.", combatant.name, kind.name()));
    }
    combatant.tick_wards();
}

pub(crate) fn hit_line(attacker: &str, target: &str, action: &str, damage: f64, is_crit: bool) -> String {
    if is_crit {
        format!("{} lands a critical {} on {} for {:.1} damage!", attacker, action, target, damage)
    } else {
        format!("{} uses {} on {} for {:.1} damage.", attacker, action, target, damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_monster_templates;
    use crate::entities::{create_player, Attributes, TemplateMonsterGenerator};
    use crate::config::SpawnTuning;
    use crate::rng::ScriptedRolls;

    fn setup(category: MonsterCategory) -> (Player, Encounter) {
        let player = create_player("p1", "Aldric", Archetype::Melee, Attributes::new(2, 2, 0, 0)).unwrap();
        let generator = TemplateMonsterGenerator::new(default_monster_templates(), SpawnTuning::default());
        let mut rolls = ScriptedRolls::new([0.0]);
        let encounter = create_encounter(
            &player,
            2,
            Some(Archetype::Ranged),
            Some(category),
            &generator,
            &GameConfig::default(),
            &mut rolls,
        );
        (player, encounter)
    }

    #[test]
    fn test_new_encounter_starts_active() {
        let (_, encounter) = setup(MonsterCategory::Regular);
        assert!(encounter.combat_active);
        assert_eq!(encounter.round(), 1);
        assert_eq!(encounter.turns.current(), Side::Player);
        assert_eq!(encounter.log.len(), 1);
        assert_eq!(encounter.monster_template, "rooftop_stalker");
    }

    #[test]
    fn test_player_attack_flips_turn_and_monster_attack_advances_round() {
        let (_, mut encounter) = setup(MonsterCategory::Regular);
        let mut rolls = ScriptedRolls::new(Vec::<f64>::new());
        let report = encounter.player_attack(None, None, &mut rolls).unwrap();
        assert_eq!(report.actor, Side::Player);
        assert!(report.damage >= 1.0);
        assert_eq!(encounter.skill_average("Attack"), report.insight.map(|i| i.rolling_average));
        assert_eq!(encounter.turns.current(), Side::Enemy);

        let before = encounter.player.health.current;
        let report = encounter.monster_attack(&mut rolls).unwrap();
        assert!(report.damage >= 1.0);
        assert!(encounter.player.health.current < before);
        assert_eq!(encounter.turns.current(), Side::Player);
        assert_eq!(encounter.round(), 2);
    }

    #[test]
    fn test_victory_records_reward_once() {
        let (player, mut encounter) = setup(MonsterCategory::Unique);
        encounter.monster.health.current = 1.0;
        let mut rolls = ScriptedRolls::new(Vec::<f64>::new());
        let report = encounter.player_attack(None, None, &mut rolls).unwrap();
        assert_eq!(report.state, EncounterState::Victory);
        assert!(!encounter.combat_active);

        let reward = encounter.take_reward().unwrap();
        assert_eq!(reward.xp, monster_xp_reward(2, false, true, player.archetype));
        assert_eq!(reward.gold, 10 * 2 * 5);
        assert!(encounter.take_reward().is_none());
    }

    #[test]
    fn test_finished_encounter_is_untouched() {
        let (_, mut encounter) = setup(MonsterCategory::Regular);
        encounter.player.health.current = 0.5;
        encounter.monster.damage = 50.0;
        let mut rolls = ScriptedRolls::new(Vec::<f64>::new());
        encounter.monster_attack(&mut rolls).unwrap();
        assert_eq!(encounter.state, EncounterState::Defeat);

        let log_len = encounter.log.len();
        let monster_health = encounter.monster.health.current;
        assert!(encounter.player_attack(None, None, &mut rolls).is_none());
        assert!(encounter.monster_attack(&mut rolls).is_none());
        assert_eq!(encounter.log.len(), log_len);
        assert_eq!(encounter.monster.health.current, monster_health);
        assert!(encounter.take_reward().is_none());
    }

    #[test]
    fn test_stunned_monster_loses_its_turn() {
        let (_, mut encounter) = setup(MonsterCategory::Regular);
        encounter.monster.statuses.add_effect(StatusKind::Stun, 1, 0.0);
        let before = encounter.player.health.current;
        let mut rolls = ScriptedRolls::new(Vec::<f64>::new());
        let report = encounter.monster_attack(&mut rolls).unwrap();
        assert_eq!(report.skipped_by, Some(StatusKind::Stun));
        assert_eq!(encounter.player.health.current, before);
        assert_eq!(encounter.round(), 2);
    }

    #[test]
    fn test_dot_can_finish_the_fight() {
        let (_, mut encounter) = setup(MonsterCategory::Regular);
        encounter.monster.health.current = 2.0;
        encounter.monster.statuses.add_effect(StatusKind::Burn, 3, 5.0);
        encounter.monster.statuses.add_effect(StatusKind::Stun, 1, 0.0);
        let mut rolls = ScriptedRolls::new(Vec::<f64>::new());
        let report = encounter.monster_attack(&mut rolls).unwrap();
        assert_eq!(report.state, EncounterState::Victory);
        assert!(encounter.reward.is_some());
    }
}
