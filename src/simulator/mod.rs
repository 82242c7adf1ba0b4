//! Balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded playthroughs per hero to measure:
//! - Win rate over the full floor climb
//! - Where runs end, and whether by death or by the turn cap
//! - Turns per fight against the pacing targets
//!
//! Every combat goes through `CombatEngine`, the same engine an interactive
//! front end drives, so simulated results match real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{HeroSummary, SimReport};
pub use runner::{run_simulation, simulate_run, RunEnd, RunRecord};
