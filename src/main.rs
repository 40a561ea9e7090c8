//! Chronicles of Ruin - combat simulation
//!
//! Creates a player, fights one regular encounter and one district boss
//! to completion, and logs what happened. Pass a number as the first
//! argument to seed the run.

use anyhow::{Context, Result};

use chronicles::combat::{Archetype, PlayerAction};
use chronicles::data::DataManager;
use chronicles::entities::Attributes;
use chronicles::game::Chronicle;
use chronicles::progression::level_title;
use chronicles::GameConfig;

const CONFIG_PATH: &str = "config.ron";
const PLAYER_ID: &str = "sim-1";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse::<u64>().with_context(|| format!("invalid seed: {}", arg))?),
        None => None,
    };
    log::info!("Starting Chronicles of Ruin simulation v{} (seed {:?})", env!("CARGO_PKG_VERSION"), seed);

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let max_rounds = config.simulation.max_rounds;
    let mut chronicle = Chronicle::new(config, DataManager::new(), seed);

    chronicle.create_player(PLAYER_ID, "Wren", Archetype::Melee, Attributes::new(4, 4, 2, 0))?;

    run_encounter(&mut chronicle, max_rounds)?;
    run_boss_fight(&mut chronicle, max_rounds)?;

    let player = chronicle.player(PLAYER_ID)?;
    log::info!(
        "{} the {} finished at level {} with {} gold and {} items",
        player.name,
        level_title(player.level()),
        player.level(),
        player.gold,
        player.loot.len()
    );
    Ok(())
}

fn run_encounter(chronicle: &mut Chronicle, max_rounds: u32) -> Result<()> {
    let mut encounter = chronicle.create_encounter(PLAYER_ID, 2, None, None)?;

    while encounter.combat_active && encounter.round() <= max_rounds {
        chronicle.player_attack(&mut encounter, Some("Cleave"))?;
        chronicle.monster_attack(&mut encounter)?;
    }

    for line in &encounter.log {
        log::debug!("{}", line);
    }
    if encounter.combat_active {
        log::warn!("Encounter hit the {}-round guard", max_rounds);
    }
    log::info!("Encounter ended in round {}: {:?}", encounter.round(), encounter.state);
    Ok(())
}

fn run_boss_fight(chronicle: &mut Chronicle, max_rounds: u32) -> Result<()> {
    let boss_id = chronicle.start_boss_combat(PLAYER_ID, "iron_warden", Some(2))?;

    for _ in 0..max_rounds {
        let report = chronicle.process_boss_combat_round(&boss_id, PlayerAction::Attack, Some("Cleave"))?;
        log::info!("{}", serde_json::to_string(&report)?);
        if !report.combat_active {
            log::info!("Boss fight over: {:?} wins", report.winner);
            return Ok(());
        }
    }

    let status = chronicle.boss_status(&boss_id)?;
    log::warn!("Boss fight hit the {}-round guard in {}", max_rounds, status.phase.name());
    Ok(())
}
