//! Chronicle service
//!
//! Owns the player store, the table of active boss fights, content data,
//! configuration and the random generator. This is where encounter
//! results are committed back to persistent players.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat::{
    create_encounter, Archetype, BossEncounter, BossStatus, Encounter, PlayerAction, RoundReport, TurnReport,
};
use crate::config::GameConfig;
use crate::data::DataManager;
use crate::entities::{create_district_boss, create_player, Attribute, Attributes, Player, TemplateMonsterGenerator};
use crate::error::CombatError;
use crate::progression::{LevelChange, MonsterCategory, Skill, XpPool};
use crate::store::{InMemoryRepository, Repository};

/// The combat and progression service
pub struct Chronicle {
    config: GameConfig,
    data: DataManager,
    generator: TemplateMonsterGenerator,
    players: InMemoryRepository<Player>,
    /// Boss fights in progress, keyed by boss id
    bosses: InMemoryRepository<BossEncounter>,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    boss_counter: u64,
}

impl Chronicle {
    /// Create a service. `seed` makes every roll reproducible.
    pub fn new(config: GameConfig, data: DataManager, seed: Option<u64>) -> Self {
        let generator = TemplateMonsterGenerator::new(data.monsters.clone(), config.spawning.clone());
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            data,
            generator,
            players: InMemoryRepository::new(),
            bosses: InMemoryRepository::new(),
            rng,
            boss_counter: 0,
        }
    }

    /// Default configuration and built-in content
    pub fn with_defaults(seed: Option<u64>) -> Self {
        Self::new(GameConfig::default(), DataManager::default(), seed)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    // === Players ===

    pub fn create_player(
        &mut self,
        id: &str,
        name: &str,
        archetype: Archetype,
        allocation: Attributes,
    ) -> Result<&Player, CombatError> {
        if self.players.contains(id) {
            return Err(CombatError::DuplicatePlayer(id.to_string()));
        }
        let player = create_player(id, name, archetype, allocation)?.with_skill_book(&self.data.skills);
        self.players.put(id.to_string(), player);
        self.player(id)
    }

    pub fn player(&self, id: &str) -> Result<&Player, CombatError> {
        self.players.get(id).ok_or_else(|| CombatError::UnknownPlayer(id.to_string()))
    }

    fn player_mut(&mut self, id: &str) -> Result<&mut Player, CombatError> {
        self.players.get_mut(id).ok_or_else(|| CombatError::UnknownPlayer(id.to_string()))
    }

    pub fn add_xp(&mut self, player_id: &str, pool: XpPool, amount: u64) -> Result<LevelChange, CombatError> {
        Ok(self.player_mut(player_id)?.add_xp(pool, amount))
    }

    pub fn spend_base_point(&mut self, player_id: &str, attribute: Attribute) -> Result<(), CombatError> {
        self.player_mut(player_id)?.spend_base_point(attribute)
    }

    pub fn spend_class_point(&mut self, player_id: &str, attribute: Attribute) -> Result<(), CombatError> {
        self.player_mut(player_id)?.spend_class_point(attribute)
    }

    pub fn allocate_skill_point(&mut self, player_id: &str, skill: &str) -> Result<u32, CombatError> {
        self.player_mut(player_id)?.allocate_skill_point(skill)
    }

    pub fn reset_skill_points(&mut self, player_id: &str) -> Result<u32, CombatError> {
        Ok(self.player_mut(player_id)?.reset_skill_points())
    }

    /// Resolve an optional skill name against the player's known skills
    fn player_skill(&self, player_id: &str, skill: Option<&str>) -> Result<Option<Skill>, CombatError> {
        match skill {
            Some(name) => Ok(Some(self.player(player_id)?.ranked_skill(name)?)),
            None => Ok(None),
        }
    }

    // === Regular encounters ===

    pub fn create_encounter(
        &mut self,
        player_id: &str,
        area_level: u32,
        forced_archetype: Option<Archetype>,
        forced_category: Option<MonsterCategory>,
    ) -> Result<Encounter, CombatError> {
        let player = self.players.get(player_id).ok_or_else(|| CombatError::UnknownPlayer(player_id.to_string()))?;
        Ok(create_encounter(
            player,
            area_level,
            forced_archetype,
            forced_category,
            &self.generator,
            &self.config,
            &mut self.rng,
        ))
    }

    /// Player turn. A win commits XP and gold to the stored player.
    /// Finished encounters return `Ok(None)` untouched.
    pub fn player_attack(
        &mut self,
        encounter: &mut Encounter,
        skill: Option<&str>,
    ) -> Result<Option<TurnReport>, CombatError> {
        if !encounter.combat_active {
            self.commit_reward(encounter)?;
            return Ok(None);
        }
        let skill = self.player_skill(&encounter.player_id, skill)?;
        let report = encounter.player_attack(skill.as_ref(), None, &mut self.rng);
        self.commit_reward(encounter)?;
        Ok(report)
    }

    /// Monster turn. The round-end tick can kill the monster, so a win
    /// is committed here too.
    pub fn monster_attack(&mut self, encounter: &mut Encounter) -> Result<Option<TurnReport>, CombatError> {
        if !encounter.combat_active {
            self.commit_reward(encounter)?;
            return Ok(None);
        }
        let report = encounter.monster_attack(&mut self.rng);
        self.commit_reward(encounter)?;
        Ok(report)
    }

    fn commit_reward(&mut self, encounter: &mut Encounter) -> Result<(), CombatError> {
        if let Some(reward) = encounter.take_reward() {
            let player = self.player_mut(&encounter.player_id)?;
            player.add_reward(&reward.xp);
            player.gold += reward.gold;
            log::info!("Committed {} XP and {} gold to {}", reward.xp.total(), reward.gold, player.id);
        }
        Ok(())
    }

    // === Boss fights ===

    /// Start a fight against a district boss, returning its boss id
    pub fn start_boss_combat(
        &mut self,
        player_id: &str,
        template_id: &str,
        level: Option<u32>,
    ) -> Result<String, CombatError> {
        let player = self.players.get(player_id).ok_or_else(|| CombatError::UnknownPlayer(player_id.to_string()))?;
        if self.bosses.values().any(|b| b.player_id == player_id) {
            return Err(CombatError::BossAlreadyActive(player_id.to_string()));
        }
        let boss = create_district_boss(&self.data.bosses, template_id, level)?;

        self.boss_counter += 1;
        let boss_id = format!("{}-{}", template_id, self.boss_counter);
        let encounter = BossEncounter::new(boss_id.clone(), player, boss, &self.config, self.data.loot.clone());
        self.bosses.put(boss_id.clone(), encounter);
        Ok(boss_id)
    }

    /// Run one boss round. When the fight ends it leaves the active table,
    /// and a win commits XP, gold and loot to the player.
    pub fn process_boss_combat_round(
        &mut self,
        boss_id: &str,
        action: PlayerAction,
        skill: Option<&str>,
    ) -> Result<RoundReport, CombatError> {
        let player_id = self
            .bosses
            .get(boss_id)
            .map(|b| b.player_id.clone())
            .ok_or_else(|| CombatError::UnknownBoss(boss_id.to_string()))?;
        let skill = self.player_skill(&player_id, skill)?;

        let encounter = self
            .bosses
            .get_mut(boss_id)
            .ok_or_else(|| CombatError::UnknownBoss(boss_id.to_string()))?;
        let report = encounter
            .process_round(action, skill.as_ref(), &mut self.rng)
            .ok_or_else(|| CombatError::UnknownBoss(boss_id.to_string()))?;

        if !report.combat_active {
            self.bosses.delete(boss_id);
            log::debug!("Boss fight {} closed", boss_id);
            if let Some(rewards) = &report.rewards {
                let player = self.player_mut(&player_id)?;
                player.add_reward(&rewards.xp);
                player.gold += rewards.gold;
                player.loot.extend(rewards.loot.iter().cloned());
                log::info!(
                    "Committed boss rewards to {}: {} XP, {} gold, {} items",
                    player.id,
                    rewards.xp.total(),
                    rewards.gold,
                    rewards.loot.len()
                );
            }
        }
        Ok(report)
    }

    pub fn boss_status(&self, boss_id: &str) -> Result<BossStatus, CombatError> {
        self.bosses
            .get(boss_id)
            .map(BossEncounter::status)
            .ok_or_else(|| CombatError::UnknownBoss(boss_id.to_string()))
    }

    pub fn active_boss_ids(&self) -> Vec<String> {
        self.bosses.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageType, EncounterState, StatusKind};

    fn service() -> Chronicle {
        let mut chronicle = Chronicle::with_defaults(Some(42));
        chronicle
            .create_player("p1", "Aldric", Archetype::Melee, Attributes::new(4, 4, 2, 0))
            .unwrap();
        chronicle
    }

    #[test]
    fn test_duplicate_and_unknown_players() {
        let mut chronicle = service();
        let err = chronicle
            .create_player("p1", "Again", Archetype::Magic, Attributes::default())
            .unwrap_err();
        assert_eq!(err, CombatError::DuplicatePlayer("p1".to_string()));
        assert!(matches!(chronicle.add_xp("ghost", XpPool::Base, 10), Err(CombatError::UnknownPlayer(_))));
    }

    #[test]
    fn test_leftover_base_points_raise_attributes() {
        let mut chronicle = service();
        assert_eq!(chronicle.player("p1").unwrap().unspent_base_points, 0);
        let before = chronicle
            .create_player("p2", "Wren", Archetype::Ranged, Attributes::new(4, 4, 0, 0))
            .unwrap()
            .attributes
            .power;
        for _ in 0..2 {
            chronicle.spend_base_point("p2", Attribute::Power).unwrap();
        }
        let player = chronicle.player("p2").unwrap();
        assert_eq!(player.attributes.power, before + 2);
        assert_eq!(player.unspent_base_points, 0);
        assert!(matches!(
            chronicle.spend_base_point("p2", Attribute::Power),
            Err(CombatError::InsufficientPoints { kind: "base", .. })
        ));
    }

    #[test]
    fn test_unknown_boss_is_an_error_payload() {
        let mut chronicle = service();
        let err = chronicle
            .process_boss_combat_round("nope", PlayerAction::Attack, None)
            .unwrap_err();
        assert_eq!(err.to_payload()["error"], "Boss encounter not found: nope");
        assert!(chronicle.boss_status("nope").is_err());
    }

    #[test]
    fn test_unknown_skill_rejected_before_attacking() {
        let mut chronicle = service();
        let mut encounter = chronicle.create_encounter("p1", 1, None, None).unwrap();
        let err = chronicle.player_attack(&mut encounter, Some("Firebolt")).unwrap_err();
        assert_eq!(err, CombatError::UnknownSkill("Firebolt".to_string()));
        assert_eq!(encounter.log.len(), 1);
    }

    #[test]
    fn test_victory_commits_xp_to_stored_player() {
        let mut chronicle = service();
        let mut encounter = chronicle
            .create_encounter("p1", 3, Some(Archetype::Ranged), Some(MonsterCategory::Wild))
            .unwrap();
        encounter.monster.health.current = 1.0;

        let report = chronicle.player_attack(&mut encounter, Some("Cleave")).unwrap().unwrap();
        assert_eq!(report.state, EncounterState::Victory);

        let player = chronicle.player("p1").unwrap();
        let reward = encounter.reward.unwrap();
        assert_eq!(player.experience.base_xp, reward.xp.base);
        assert_eq!(player.gold, reward.gold);
        assert!(chronicle.player_attack(&mut encounter, None).unwrap().is_none());
    }

    #[test]
    fn test_damage_over_time_kill_commits_reward() {
        let mut chronicle = service();
        let mut encounter = chronicle
            .create_encounter("p1", 2, Some(Archetype::Ranged), Some(MonsterCategory::Regular))
            .unwrap();
        encounter.monster.health.current = 2.0;
        encounter.monster.statuses.add_effect(StatusKind::Burn, 3, 5.0);
        encounter.monster.statuses.add_effect(StatusKind::Stun, 1, 0.0);

        let report = chronicle.monster_attack(&mut encounter).unwrap().unwrap();
        assert_eq!(report.state, EncounterState::Victory);

        let reward = encounter.reward.unwrap();
        let player = chronicle.player("p1").unwrap();
        assert!(reward.xp.base > 0);
        assert_eq!(player.experience.base_xp, reward.xp.base);
        assert_eq!(player.gold, reward.gold);

        assert!(chronicle.player_attack(&mut encounter, None).unwrap().is_none());
        assert!(chronicle.monster_attack(&mut encounter).unwrap().is_none());
        let player = chronicle.player("p1").unwrap();
        assert_eq!(player.experience.base_xp, reward.xp.base);
        assert_eq!(player.gold, reward.gold);
    }

    #[test]
    fn test_players_learn_from_loaded_skill_catalogue() {
        let dir = std::env::temp_dir().join(format!("chronicle-skills-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let catalogue = vec![
            Skill::new("Sundering Blow", 7.0, DamageType::Physical).for_archetype(Archetype::Melee),
            Skill::new("Ember Dart", 3.0, DamageType::Fire).for_archetype(Archetype::Magic),
        ];
        let text = ron::ser::to_string_pretty(&catalogue, ron::ser::PrettyConfig::default()).unwrap();
        std::fs::write(dir.join("skills.ron"), text).unwrap();

        let data = DataManager::load_from(&dir);
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(data.skills, catalogue);

        let mut chronicle = Chronicle::new(GameConfig::default(), data, Some(1));
        let player = chronicle
            .create_player("p1", "Aldric", Archetype::Melee, Attributes::new(4, 4, 2, 0))
            .unwrap();
        assert_eq!(player.skills, vec![catalogue[0].clone()]);

        let mut encounter = chronicle.create_encounter("p1", 1, None, None).unwrap();
        assert_eq!(
            chronicle.player_attack(&mut encounter, Some("Cleave")).unwrap_err(),
            CombatError::UnknownSkill("Cleave".to_string())
        );
        assert!(chronicle.player_attack(&mut encounter, Some("Sundering Blow")).unwrap().is_some());
    }

    #[test]
    fn test_one_boss_at_a_time_and_table_cleanup() {
        let mut chronicle = service();
        let boss_id = chronicle.start_boss_combat("p1", "iron_warden", Some(1)).unwrap();
        assert!(matches!(
            chronicle.start_boss_combat("p1", "plague_matron", None),
            Err(CombatError::BossAlreadyActive(_))
        ));
        assert!(matches!(
            chronicle.start_boss_combat("p1", "nobody", None),
            Err(CombatError::BossAlreadyActive(_))
        ));

        let mut rounds = 0;
        loop {
            let report = chronicle
                .process_boss_combat_round(&boss_id, PlayerAction::Attack, Some("Cleave"))
                .unwrap();
            rounds += 1;
            if !report.combat_active {
                break;
            }
            assert!(rounds < 500, "boss fight never ended");
        }
        assert!(chronicle.active_boss_ids().is_empty());
        assert!(matches!(
            chronicle.process_boss_combat_round(&boss_id, PlayerAction::Attack, None),
            Err(CombatError::UnknownBoss(_))
        ));
    }
}
