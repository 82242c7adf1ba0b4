//! Gemcrawl - headless match-3 RPG combat and balance simulation.
//!
//! The board engine, combat rules and run simulator behind a match-3 dungeon
//! crawler, with no rendering or input. Front ends drive `CombatEngine`; the
//! `simulate` binary drives `simulator::run_simulation`.

pub mod board;
pub mod combat;
pub mod config;
pub mod error;
pub mod gems;
pub mod policy;
pub mod simulator;

pub use config::BalanceConfig;
pub use error::{GameError, Result};
