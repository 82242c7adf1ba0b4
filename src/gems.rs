//! Gem catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a gem type. Ids are dense: `0..gem_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GemId(pub u8);

impl GemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What matching a gem does in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    PhysicalDamage,
    MagicDamage,
    Armor,
    Heal,
    Gold,
    Charge,
}

impl EffectKind {
    /// Whether the effect damages the enemy.
    pub fn is_damage(self) -> bool {
        matches!(self, EffectKind::PhysicalDamage | EffectKind::MagicDamage)
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemType {
    pub id: GemId,
    pub name: String,
    pub effect: EffectKind,
}

/// Effect of `id` in `catalog`, if the id is known.
pub fn effect_of(catalog: &[GemType], id: GemId) -> Option<EffectKind> {
    catalog.iter().find(|g| g.id == id).map(|g| g.effect)
}

/// First gem in `catalog` with the given effect.
pub fn gem_with_effect(catalog: &[GemType], effect: EffectKind) -> Option<GemId> {
    catalog.iter().find(|g| g.effect == effect).map(|g| g.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tables::default_gems;

    #[test]
    fn test_default_catalog_lookup() {
        let gems = default_gems();
        assert_eq!(effect_of(&gems, GemId(0)), Some(EffectKind::PhysicalDamage));
        assert_eq!(effect_of(&gems, GemId(5)), Some(EffectKind::Charge));
        assert_eq!(effect_of(&gems, GemId(9)), None);
        assert_eq!(gem_with_effect(&gems, EffectKind::Heal), Some(GemId(3)));
    }

    #[test]
    fn test_damage_kinds() {
        assert!(EffectKind::PhysicalDamage.is_damage());
        assert!(EffectKind::MagicDamage.is_damage());
        assert!(!EffectKind::Heal.is_damage());
    }
}
