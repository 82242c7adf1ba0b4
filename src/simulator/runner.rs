//! Full-run simulation: one hero climbs every floor until it clears the last
//! one, dies, or runs out of turns in a fight.

use super::config::SimConfig;
use super::report::{HeroSummary, SimReport};
use crate::combat::{CombatEngine, Enemy, Hero};
use crate::config::{BalanceConfig, Encounter, EncounterKind};
use crate::error::{GameError, Result};
use crate::policy::GreedyPolicy;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    Cleared,
    Defeated,
    TurnCap,
}

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub hero_key: String,
    pub floors_cleared: u32,
    pub total_turns: u32,
    pub combats: u32,
    pub won: bool,
    pub ended_by: RunEnd,
    /// Floor the run ended on; the final floor for a cleared run.
    pub end_floor: u32,
    pub gold: u32,
    pub potions: u32,
    pub hp_remaining: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, balance: &BalanceConfig) -> Result<SimReport> {
    balance.validate()?;
    if !(0.0..=1.0).contains(&config.elite_chance) {
        return Err(GameError::InvalidConfig(format!(
            "elite chance must be within 0..=1, got {}",
            config.elite_chance
        )));
    }

    let hero_keys: Vec<String> = if config.heroes.is_empty() {
        balance.heroes.iter().map(|h| h.key.clone()).collect()
    } else {
        config.heroes.clone()
    };
    // Fail on bad keys before spending time on runs
    for key in &hero_keys {
        balance.hero(key)?;
    }
    for name in &config.equipment {
        balance.equipment_item(name)?;
    }

    let mut summaries = Vec::with_capacity(hero_keys.len());
    for key in &hero_keys {
        if config.verbosity >= 1 {
            info!(hero = %key, runs = config.runs_per_hero, "simulating hero");
        }

        let mut runs = Vec::with_capacity(config.runs_per_hero as usize);
        for run_idx in 0..config.runs_per_hero {
            let mut rng = match config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
                None => ChaCha8Rng::from_entropy(),
            };

            let record = simulate_run(key, config, balance, &mut rng)?;
            if config.verbosity >= 2 {
                debug!(
                    hero = %key,
                    run = run_idx + 1,
                    floors = record.floors_cleared,
                    turns = record.total_turns,
                    ended_by = ?record.ended_by,
                    "run finished"
                );
            }
            runs.push(record);
        }

        let summary = HeroSummary::from_runs(key, &runs, &balance.targets);
        if config.verbosity >= 1 {
            info!(
                hero = %key,
                win_rate = summary.win_rate,
                avg_floors = summary.avg_floors,
                turns_per_combat = summary.avg_turns_per_combat,
                "hero finished"
            );
        }
        summaries.push(summary);
    }

    Ok(SimReport::new(
        config.runs_per_hero,
        config.seed,
        summaries,
        balance.targets,
    ))
}

/// Simulate one run for `hero_key`. Every random draw comes from `rng`.
pub fn simulate_run(
    hero_key: &str,
    config: &SimConfig,
    balance: &BalanceConfig,
    rng: &mut impl Rng,
) -> Result<RunRecord> {
    let mut hero = Hero::from_template(balance.hero(hero_key)?);
    for name in &config.equipment {
        hero.equip(balance.equipment_item(name)?);
    }
    let policy = GreedyPolicy::new(&balance.gems);
    let economy = &balance.economy;
    let growth = &balance.growth;

    let mut floors: Vec<&Encounter> = balance.floors.iter().collect();
    floors.sort_by_key(|e| e.floor);

    let mut record = RunRecord {
        hero_key: hero_key.to_string(),
        floors_cleared: 0,
        total_turns: 0,
        combats: 0,
        won: false,
        ended_by: RunEnd::Cleared,
        end_floor: 0,
        gold: economy.starting_gold,
        potions: economy.starting_potions,
        hp_remaining: hero.current_hp,
    };

    for encounter in floors {
        let floor = encounter.floor;
        let (enemy, elite) = spawn_enemy(encounter, balance, config.elite_chance, rng)?;
        debug!(floor, enemy = %enemy.name, hp = enemy.max_hp, "encounter");

        let mut combat = CombatEngine::new(hero, enemy, balance, config.rules, &mut *rng)?;
        let result = combat.run_combat(&policy, config.max_turns, config.use_skills);
        hero = combat.into_hero();

        record.combats += 1;
        record.total_turns += result.turns_played;
        record.end_floor = floor;

        if !result.won {
            record.ended_by = if result.timed_out {
                RunEnd::TurnCap
            } else {
                RunEnd::Defeated
            };
            record.hp_remaining = hero.current_hp;
            return Ok(record);
        }

        record.floors_cleared = floor;
        record.gold += result.gold_earned;

        if !encounter.is_boss() {
            let rest = (hero.max_hp as f64 * growth.between_floor_heal).round() as u32;
            hero.heal(rest);
        }

        if growth.offense_interval > 0 && floor % growth.offense_interval == 0 {
            hero.atk += 1;
            hero.matk += 1;
        }
        if growth.defense_interval > 0 && floor % growth.defense_interval == 0 {
            hero.def += 1;
            hero.max_hp += growth.hp_growth;
            hero.current_hp += growth.hp_growth;
        }

        let reward = if elite {
            economy.gold_per_elite
        } else {
            economy.gold_per_combat
        };
        record.gold += reward.roll(rng);
        if rng.gen::<f64>() < economy.potion_drop_chance {
            record.potions += 1;
        }

        if record.potions > 0 && hero.hp_ratio() < economy.potion_threshold {
            record.potions -= 1;
            hero.heal((hero.max_hp as f64 * economy.potion_heal).round() as u32);
        }
    }

    record.won = true;
    record.hp_remaining = hero.current_hp;
    Ok(record)
}

/// Build the floor's enemy. Returns it with whether it rolled elite.
fn spawn_enemy(
    encounter: &Encounter,
    balance: &BalanceConfig,
    elite_chance: f64,
    rng: &mut impl Rng,
) -> Result<(Enemy, bool)> {
    match &encounter.kind {
        EncounterKind::Boss(key) => Ok((Enemy::from_boss(balance.boss(key)?), false)),
        EncounterKind::Enemies(pool) => {
            let key = pool.choose(rng).ok_or_else(|| {
                GameError::InvalidConfig(format!(
                    "floor {} has an empty enemy pool",
                    encounter.floor
                ))
            })?;
            // Only draw when elites are possible, so elite-free runs keep their streams
            let elite = elite_chance > 0.0 && rng.gen::<f64>() < elite_chance;
            let enemy = Enemy::from_template(
                balance.enemy(key)?,
                encounter.floor,
                &balance.enemy_scaling,
                elite,
            );
            Ok((enemy, elite))
        }
    }
}
