//! Error type shared by configuration loading and simulation setup.
//!
//! Rejected swaps and dead boards are not errors; see `board::SwapOutcome`.

/// Setup-time failures. Everything here means the tables or the request are
/// unusable, so callers should stop rather than fall back to defaults.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Reading a config file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `BalanceConfig`
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown hero: {0}")]
    UnknownHero(String),

    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),

    #[error("unknown boss: {0}")]
    UnknownBoss(String),

    #[error("unknown equipment: {0}")]
    UnknownEquipment(String),

    #[error("no encounter configured for floor {0}")]
    UnknownFloor(u32),

    /// Tables loaded but break an engine assumption (gem ids, board size, ...)
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::UnknownHero("bard".to_string()).to_string(),
            "unknown hero: bard"
        );
        assert_eq!(
            GameError::UnknownFloor(21).to_string(),
            "no encounter configured for floor 21"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let err: GameError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GameError::Parse(_)));
    }
}
