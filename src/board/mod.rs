//! The match-3 board: grid, match detection, special tiles and the cascade engine.

pub mod engine;
pub mod matching;
pub mod specials;
pub mod types;

pub use engine::{BoardEngine, BoardRules, CascadeReport, CascadeStep, SwapOutcome, SwapRejection};
pub use matching::{find_matches, has_match};
pub use specials::{affected_cells, plan_specials, PlannedSpecial};
pub use types::{Cell, Direction, Grid, Match, Pos, Special, Swap};
