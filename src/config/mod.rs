//! Balance configuration: the read-only tables every engine is built from.
//!
//! `BalanceConfig::default()` reproduces the shipped game. A JSON file with the
//! same shape can replace it for what-if balance runs; it is validated on load.

pub mod balance;
pub mod tables;
pub mod templates;

pub use templates::*;

use crate::error::{GameError, Result};
use crate::gems::GemType;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub gems: Vec<GemType>,
    pub board: BoardDims,
    pub formulas: Formulas,
    pub enemy_scaling: EnemyScaling,
    pub economy: Economy,
    pub growth: Growth,
    pub targets: SimTargets,
    pub heroes: Vec<HeroTemplate>,
    pub enemies: Vec<EnemyTemplate>,
    pub bosses: Vec<BossTemplate>,
    pub floors: Vec<Encounter>,
    pub equipment: Vec<EquipmentItem>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            gems: tables::default_gems(),
            board: BoardDims::default(),
            formulas: Formulas::default(),
            enemy_scaling: EnemyScaling::default(),
            economy: Economy::default(),
            growth: Growth::default(),
            targets: SimTargets::default(),
            heroes: tables::default_heroes(),
            enemies: tables::default_enemies(),
            bosses: tables::default_bosses(),
            floors: tables::default_floors(),
            equipment: tables::default_equipment(),
        }
    }
}

impl BalanceConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BalanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the assumptions the engines rely on.
    pub fn validate(&self) -> Result<()> {
        if self.gems.len() < 3 {
            return Err(GameError::InvalidConfig(format!(
                "need at least 3 gem types, got {}",
                self.gems.len()
            )));
        }
        if self.gems.len() > u8::MAX as usize {
            return Err(GameError::InvalidConfig("too many gem types".to_string()));
        }
        for (i, gem) in self.gems.iter().enumerate() {
            if gem.id.index() != i {
                return Err(GameError::InvalidConfig(format!(
                    "gem ids must be dense and ordered: '{}' has id {} at position {}",
                    gem.name, gem.id, i
                )));
            }
        }
        if self.board.rows < 3 || self.board.cols < 3 {
            return Err(GameError::InvalidConfig(format!(
                "board must be at least 3x3, got {}x{}",
                self.board.rows, self.board.cols
            )));
        }
        if self.heroes.is_empty() {
            return Err(GameError::InvalidConfig("no heroes".to_string()));
        }
        if self.floors.is_empty() {
            return Err(GameError::InvalidConfig("no floors".to_string()));
        }
        for encounter in &self.floors {
            match &encounter.kind {
                EncounterKind::Enemies(pool) => {
                    if pool.is_empty() {
                        return Err(GameError::InvalidConfig(format!(
                            "floor {} has an empty enemy pool",
                            encounter.floor
                        )));
                    }
                    for key in pool {
                        self.enemy(key)?;
                    }
                }
                EncounterKind::Boss(key) => {
                    self.boss(key)?;
                }
            }
        }
        Ok(())
    }

    pub fn hero(&self, key: &str) -> Result<&HeroTemplate> {
        self.heroes
            .iter()
            .find(|h| h.key == key)
            .ok_or_else(|| GameError::UnknownHero(key.to_string()))
    }

    pub fn enemy(&self, key: &str) -> Result<&EnemyTemplate> {
        self.enemies
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| GameError::UnknownEnemy(key.to_string()))
    }

    pub fn boss(&self, key: &str) -> Result<&BossTemplate> {
        self.bosses
            .iter()
            .find(|b| b.key == key)
            .ok_or_else(|| GameError::UnknownBoss(key.to_string()))
    }

    pub fn encounter(&self, floor: u32) -> Result<&Encounter> {
        self.floors
            .iter()
            .find(|e| e.floor == floor)
            .ok_or(GameError::UnknownFloor(floor))
    }

    /// Case-insensitive lookup by item name.
    pub fn equipment_item(&self, name: &str) -> Result<&EquipmentItem> {
        self.equipment
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::UnknownEquipment(name.to_string()))
    }

    /// Highest configured floor; a run that clears it is a win.
    pub fn final_floor(&self) -> u32 {
        self.floors.iter().map(|e| e.floor).max().unwrap_or(0)
    }

    pub fn gem_count(&self) -> u8 {
        self.gems.len() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BalanceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gem_count(), 6);
        assert_eq!(config.final_floor(), 20);
        assert_eq!(config.board, BoardDims { rows: 7, cols: 7 });
    }

    #[test]
    fn test_json_round_trip() {
        let config = BalanceConfig::default();
        let json = config.to_json().unwrap();
        let parsed = BalanceConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.gems, config.gems);
        assert_eq!(parsed.heroes, config.heroes);
        assert_eq!(parsed.enemies, config.enemies);
        assert_eq!(parsed.floors, config.floors);
        let drift = parsed.formulas.cascade_bonus - config.formulas.cascade_bonus;
        assert!(drift.abs() < 1e-12);
    }

    #[test]
    fn test_lookups() {
        let config = BalanceConfig::default();
        assert_eq!(config.hero("warrior").unwrap().atk, 12);
        assert_eq!(config.enemy("slime").unwrap().hp, 80);
        assert_eq!(config.boss("lich_lord").unwrap().hp, 580);
        assert!(config.encounter(5).unwrap().is_boss());
        assert_eq!(
            config.equipment_item("vampiric ring").unwrap().stat,
            EquipStat::Lifesteal
        );
    }

    #[test]
    fn test_unknown_keys_are_errors() {
        let config = BalanceConfig::default();
        assert!(matches!(
            config.hero("bard"),
            Err(GameError::UnknownHero(_))
        ));
        assert!(matches!(
            config.enemy("dragon"),
            Err(GameError::UnknownEnemy(_))
        ));
        assert!(matches!(
            config.boss("slime"),
            Err(GameError::UnknownBoss(_))
        ));
        assert!(matches!(
            config.encounter(21),
            Err(GameError::UnknownFloor(21))
        ));
        assert!(matches!(
            config.equipment_item("Excalibur"),
            Err(GameError::UnknownEquipment(_))
        ));
    }

    #[test]
    fn test_dangling_floor_key_fails_validation() {
        let mut config = BalanceConfig::default();
        config.floors[0].kind = EncounterKind::Enemies(vec!["ghost".to_string()]);
        assert!(matches!(config.validate(), Err(GameError::UnknownEnemy(_))));
    }

    #[test]
    fn test_too_few_gems_fails_validation() {
        let mut config = BalanceConfig::default();
        config.gems.truncate(2);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_small_board_fails_validation() {
        let mut config = BalanceConfig::default();
        config.board.cols = 2;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            BalanceConfig::from_json_str("{\"gems\": 3}"),
            Err(GameError::Parse(_))
        ));
    }
}
