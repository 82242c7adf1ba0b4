//! Turn-based combat: match effects, damage formulas, boss mechanics, hero
//! skills and the combat engine that ties them to the board.

pub mod engine;
pub mod math;
pub mod mechanics;
pub mod resolver;
pub mod skills;
pub mod types;

pub use engine::{
    CombatEngine, CombatPhase, CombatResult, EnemyTurnReport, HeroTurnReport, MoveOutcome,
    SkillReport,
};
pub use resolver::resolve_matches;
pub use types::{EffectBundle, EncounterTier, Enemy, Hero, MechanicState};
