//! Hero skills. Each hero has one, paid for with skill charge from Star gems.

use super::math::{apply_defense, roll_variance};
use super::types::{Enemy, Hero};
use crate::board::{BoardEngine, Pos};
use crate::config::{Formulas, SkillKind};
use crate::gems::{gem_with_effect, EffectKind, GemType};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direct result of a skill, before any cascade it sets off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOutcome {
    pub damage: u32,
    pub healed: u32,
    pub armor_gained: u32,
    /// Cells turned into the sword gem. The board needs settling afterwards.
    pub converted: Vec<Pos>,
}

/// Spend the hero's charge and apply the skill. The caller checks readiness.
pub fn cast(
    hero: &mut Hero,
    enemy: &mut Enemy,
    board: &mut BoardEngine,
    gems: &[GemType],
    formulas: &Formulas,
    rng: &mut impl Rng,
) -> SkillOutcome {
    hero.skill_charge = hero.skill_charge.saturating_sub(hero.skill.cost);
    let mut out = SkillOutcome::default();

    match hero.skill.effect {
        SkillKind::BladeStorm {
            multiplier,
            convert_count,
        } => {
            let raw = formulas.base_sword_dmg
                * (1.0 + hero.atk as f64 * formulas.atk_scaling)
                * multiplier;
            let variance = roll_variance(formulas.damage_variance, rng);
            out.damage = apply_defense(raw, enemy.def, variance, formulas.armor_constant);
            enemy.take_damage(out.damage);

            if let Some(sword) = gem_with_effect(gems, EffectKind::PhysicalDamage) {
                out.converted = board.convert_random_cells(sword, convert_count, rng);
            }
        }
        SkillKind::Meteor { multiplier } => {
            let raw = formulas.base_fire_dmg
                * (1.0 + hero.matk as f64 * formulas.matk_scaling)
                * multiplier;
            let variance = roll_variance(formulas.damage_variance, rng);
            out.damage = (raw * variance).round().max(1.0) as u32;
            enemy.take_damage(out.damage);
        }
        SkillKind::HolyShield { armor_fraction } => {
            out.healed = hero.heal(hero.max_hp);
            out.armor_gained = (hero.max_hp as f64 * armor_fraction).round() as u32;
            hero.armor += out.armor_gained;
        }
    }

    out
}
