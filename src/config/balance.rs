//! Balance constants used by the built-in tables.
//!
//! All core balance numbers should be defined here.
//! Change once, test everywhere.

// =============================================================================
// BOARD
// =============================================================================

/// Default board rows.
pub const BOARD_ROWS: usize = 7;

/// Default board columns.
pub const BOARD_COLS: usize = 7;

/// Shortest run that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

// =============================================================================
// MATCH EFFECT FORMULAS
// =============================================================================

/// Physical: swords * BASE_SWORD_DMG * (1 + atk * ATK_SCALING)
/// A 3-sword match at ATK 12 is 3 * 8 * 1.96 = 47 before defense.
pub const BASE_SWORD_DMG: f64 = 8.0;

/// Magic: fires * BASE_FIRE_DMG * (1 + matk * MATK_SCALING)
pub const BASE_FIRE_DMG: f64 = 9.0;

pub const ATK_SCALING: f64 = 0.08;
pub const MATK_SCALING: f64 = 0.10;

/// Armor per shield gem.
pub const BASE_SHIELD: f64 = 5.0;

/// HP per heart gem.
pub const BASE_HEAL: f64 = 8.0;

/// Gold per coin gem.
pub const BASE_GOLD: f64 = 2.0;

/// Skill charge per star gem. Skills cost ~100.
pub const BASE_CHARGE: f64 = 10.0;

/// Each cascade level past the first adds this fraction to every effect.
pub const CASCADE_BONUS: f64 = 0.25;

// =============================================================================
// DEFENSE / ARMOR
// =============================================================================

/// Damage reduction: dmg * (1 - def / (def + ARMOR_CONSTANT)).
pub const ARMOR_CONSTANT: f64 = 50.0;

/// Fraction of hero armor kept after each enemy turn.
pub const ARMOR_DECAY: f64 = 0.5;

/// Damage rolls are scaled by a uniform factor in [1 - V, 1 + V].
pub const DAMAGE_VARIANCE: f64 = 0.1;

// =============================================================================
// ENEMY SCALING
// =============================================================================

/// enemy_stat = base * (1 + floor * factor)
pub const ENEMY_HP_SCALING: f64 = 0.06;
pub const ENEMY_ATK_SCALING: f64 = 0.05;
pub const ENEMY_DEF_SCALING: f64 = 0.03;

/// Elite encounters multiply hp/atk/def.
pub const ELITE_STAT_MULTIPLIER: f64 = 1.5;

// =============================================================================
// RUN PROGRESSION
// =============================================================================

/// Heal between non-boss floors, as a fraction of max HP.
pub const BETWEEN_FLOOR_HEAL: f64 = 0.35;

/// Every Nth floor cleared grants +1 atk and +1 matk.
pub const OFFENSE_GROWTH_INTERVAL: u32 = 2;

/// Every Nth floor cleared grants +1 def and +HP_GROWTH max HP.
pub const DEFENSE_GROWTH_INTERVAL: u32 = 3;

pub const HP_GROWTH: u32 = 15;

/// Combat turn ceiling; reaching it counts as a loss.
pub const MAX_COMBAT_TURNS: u32 = 50;

// =============================================================================
// ECONOMY
// =============================================================================

pub const GOLD_PER_COMBAT_MIN: u32 = 10;
pub const GOLD_PER_COMBAT_MAX: u32 = 20;
pub const GOLD_PER_ELITE_MIN: u32 = 25;
pub const GOLD_PER_ELITE_MAX: u32 = 40;

pub const STARTING_GOLD: u32 = 0;
pub const STARTING_POTIONS: u32 = 2;

/// Chance to find a potion after a won floor.
pub const POTION_DROP_CHANCE: f64 = 0.20;

/// Potion heal as a fraction of max HP.
pub const POTION_HEAL: f64 = 0.25;

/// Drink a potion when HP falls below this fraction of max HP.
pub const POTION_THRESHOLD: f64 = 0.40;

// =============================================================================
// SIMULATION TARGETS
// =============================================================================

pub const TARGET_WIN_RATE_MIN: f64 = 0.30;
pub const TARGET_WIN_RATE_MAX: f64 = 0.55;
pub const TARGET_TURNS_PER_COMBAT_MIN: f64 = 5.0;
pub const TARGET_TURNS_PER_COMBAT_MAX: f64 = 12.0;
