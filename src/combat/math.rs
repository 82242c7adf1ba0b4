//! Damage formulas shared by hero hits, enemy attacks and skills.

use rand::Rng;

/// Fraction of damage that gets through `def`.
pub fn defense_multiplier(def: u32, armor_constant: f64) -> f64 {
    let def = def as f64;
    if def + armor_constant <= 0.0 {
        return 1.0;
    }
    1.0 - def / (def + armor_constant)
}

/// Uniform roll in `[1 - variance, 1 + variance]`.
pub fn roll_variance(variance: f64, rng: &mut impl Rng) -> f64 {
    if variance <= 0.0 {
        return 1.0;
    }
    1.0 + rng.gen_range(-variance..=variance)
}

/// Reduce `damage` by defense and apply a variance roll. Never below 1.
pub fn apply_defense(damage: f64, def: u32, variance_roll: f64, armor_constant: f64) -> u32 {
    let reduced = damage * defense_multiplier(def, armor_constant) * variance_roll;
    reduced.round().max(1.0) as u32
}
