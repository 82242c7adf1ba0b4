//! Template and rule types that make up a `BalanceConfig`.

use super::balance::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Combat formula constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formulas {
    pub base_sword_dmg: f64,
    pub base_fire_dmg: f64,
    pub atk_scaling: f64,
    pub matk_scaling: f64,
    pub base_shield: f64,
    pub base_heal: f64,
    pub base_gold: f64,
    pub base_charge: f64,
    pub cascade_bonus: f64,
    pub armor_constant: f64,
    pub armor_decay: f64,
    pub damage_variance: f64,
}

impl Default for Formulas {
    fn default() -> Self {
        Self {
            base_sword_dmg: BASE_SWORD_DMG,
            base_fire_dmg: BASE_FIRE_DMG,
            atk_scaling: ATK_SCALING,
            matk_scaling: MATK_SCALING,
            base_shield: BASE_SHIELD,
            base_heal: BASE_HEAL,
            base_gold: BASE_GOLD,
            base_charge: BASE_CHARGE,
            cascade_bonus: CASCADE_BONUS,
            armor_constant: ARMOR_CONSTANT,
            armor_decay: ARMOR_DECAY,
            damage_variance: DAMAGE_VARIANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDims {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardDims {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
        }
    }
}

/// Per-floor multiplicative growth for normal and elite enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyScaling {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub elite_multiplier: f64,
}

impl Default for EnemyScaling {
    fn default() -> Self {
        Self {
            hp: ENEMY_HP_SCALING,
            atk: ENEMY_ATK_SCALING,
            def: ENEMY_DEF_SCALING,
            elite_multiplier: ELITE_STAT_MULTIPLIER,
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    /// Uniform draw from `min..=max`; a reversed range is read the right way round.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        rng.gen_range(lo..=hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub gold_per_combat: Range,
    pub gold_per_elite: Range,
    pub starting_gold: u32,
    pub starting_potions: u32,
    pub potion_drop_chance: f64,
    pub potion_heal: f64,
    pub potion_threshold: f64,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            gold_per_combat: Range {
                min: GOLD_PER_COMBAT_MIN,
                max: GOLD_PER_COMBAT_MAX,
            },
            gold_per_elite: Range {
                min: GOLD_PER_ELITE_MIN,
                max: GOLD_PER_ELITE_MAX,
            },
            starting_gold: STARTING_GOLD,
            starting_potions: STARTING_POTIONS,
            potion_drop_chance: POTION_DROP_CHANCE,
            potion_heal: POTION_HEAL,
            potion_threshold: POTION_THRESHOLD,
        }
    }
}

/// Approximate reward growth applied by the run simulator between floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub between_floor_heal: f64,
    pub offense_interval: u32,
    pub defense_interval: u32,
    pub hp_growth: u32,
}

impl Default for Growth {
    fn default() -> Self {
        Self {
            between_floor_heal: BETWEEN_FLOOR_HEAL,
            offense_interval: OFFENSE_GROWTH_INTERVAL,
            defense_interval: DEFENSE_GROWTH_INTERVAL,
            hp_growth: HP_GROWTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTargets {
    pub win_rate_min: f64,
    pub win_rate_max: f64,
    pub turns_per_combat_min: f64,
    pub turns_per_combat_max: f64,
}

impl Default for SimTargets {
    fn default() -> Self {
        Self {
            win_rate_min: TARGET_WIN_RATE_MIN,
            win_rate_max: TARGET_WIN_RATE_MAX,
            turns_per_combat_min: TARGET_TURNS_PER_COMBAT_MIN,
            turns_per_combat_max: TARGET_TURNS_PER_COMBAT_MAX,
        }
    }
}

/// Hero skill effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillKind {
    /// Boosted sword hit, then converts random gems to swords.
    BladeStorm { multiplier: f64, convert_count: usize },
    /// Boosted fire hit that ignores enemy defense.
    Meteor { multiplier: f64 },
    /// Full heal plus armor worth a fraction of max HP.
    HolyShield { armor_fraction: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub name: String,
    pub cost: u32,
    pub effect: SkillKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroTemplate {
    pub key: String,
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub matk: u32,
    pub def: u32,
    pub skill: SkillTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub key: String,
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
}

/// Boss-specific rule, one per boss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mechanic {
    /// Attack is multiplied once HP drops to `threshold * max_hp`.
    Enrage { threshold: f64, multiplier: f64 },
    /// A random column is blocked every `interval` enemy turns.
    ColumnBlock { interval: u32 },
    /// Heals from damage dealt and poisons the hero every turn.
    LifestealPoison { lifesteal: f64, poison_percent: f64 },
    /// Marks random cells as burned every turn. Display only.
    GemBurn { burn_count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub key: String,
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub mechanic: Mechanic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    /// One key is picked at random per visit.
    Enemies(Vec<String>),
    Boss(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub floor: u32,
    pub kind: EncounterKind,
    /// Cosmetic only.
    pub theme: String,
}

impl Encounter {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EncounterKind::Boss(_))
    }
}

/// Bonus granted by an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipStat {
    SwordBonus,
    FireBonus,
    ShieldBonus,
    HealBonus,
    /// Sword matches also deal this fraction as magic damage.
    FireSwordHybrid,
    /// Fraction of match damage returned as healing.
    Lifesteal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    pub tier: u8,
    pub stat: EquipStat,
    pub value: f64,
}
