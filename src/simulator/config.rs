//! Simulation configuration.

use crate::board::BoardRules;
use crate::config::balance::MAX_COMBAT_TURNS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs per hero
    pub runs_per_hero: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Hero keys to simulate (empty = every configured hero)
    pub heroes: Vec<String>,

    /// Hero turns per combat before it counts as a loss
    pub max_turns: u32,

    /// Spend skill charge whenever the skill is ready
    pub use_skills: bool,

    /// Chance that a normal floor rolls an elite instead
    pub elite_chance: f64,

    /// Equipment names every hero starts with
    pub equipment: Vec<String>,

    /// Board rule switches
    pub rules: BoardRules,

    /// Log verbosity (0 = silent, 1 = per-hero `info!`, 2 = also per-run `debug!`)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs_per_hero: 200,
            seed: None,
            heroes: Vec::new(),
            max_turns: MAX_COMBAT_TURNS,
            use_skills: false,
            elite_chance: 0.0,
            equipment: Vec::new(),
            rules: BoardRules::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for smoke tests
    pub fn quick(seed: u64) -> Self {
        Self {
            runs_per_hero: 20,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Large batch for judging balance against the targets
    pub fn balance_check() -> Self {
        Self {
            runs_per_hero: 1000,
            ..Default::default()
        }
    }
}
