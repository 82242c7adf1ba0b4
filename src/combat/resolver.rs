//! Turns per-gem match counts into combat effects.

use super::types::{EffectBundle, Hero};
use crate::config::{EquipStat, Formulas};
use crate::gems::{effect_of, EffectKind, GemId, GemType};
use std::collections::BTreeMap;

/// `1 + (depth - 1) * cascade_bonus`; depth 1 is the swap's own matches.
pub fn cascade_multiplier(depth: u32, formulas: &Formulas) -> f64 {
    1.0 + depth.saturating_sub(1) as f64 * formulas.cascade_bonus
}

/// Effects of one cascade step.
///
/// Armor, heal, gold and charge are rounded per gem entry. Damage is summed
/// unrounded and rounded once at the end, after lifesteal is taken from the
/// raw total. Ids missing from `gems` are ignored.
pub fn resolve_matches(
    counts: &BTreeMap<GemId, u32>,
    depth: u32,
    hero: &Hero,
    gems: &[GemType],
    formulas: &Formulas,
) -> EffectBundle {
    let cascade = cascade_multiplier(depth, formulas);
    let mut bundle = EffectBundle::default();
    let mut physical = 0.0;
    let mut magic = 0.0;

    for (&gem, &count) in counts {
        let Some(effect) = effect_of(gems, gem) else {
            continue;
        };
        let count = count as f64;

        match effect {
            EffectKind::PhysicalDamage => {
                let dmg = count
                    * formulas.base_sword_dmg
                    * (1.0 + hero.atk as f64 * formulas.atk_scaling)
                    * cascade
                    * (1.0 + hero.bonus(EquipStat::SwordBonus));
                physical += dmg;
                magic += dmg * hero.bonus(EquipStat::FireSwordHybrid);
            }
            EffectKind::MagicDamage => {
                magic += count
                    * formulas.base_fire_dmg
                    * (1.0 + hero.matk as f64 * formulas.matk_scaling)
                    * cascade
                    * (1.0 + hero.bonus(EquipStat::FireBonus));
            }
            EffectKind::Armor => {
                let armor = count
                    * formulas.base_shield
                    * cascade
                    * (1.0 + hero.bonus(EquipStat::ShieldBonus));
                bundle.armor += armor.round() as u32;
            }
            EffectKind::Heal => {
                let heal =
                    count * formulas.base_heal * cascade * (1.0 + hero.bonus(EquipStat::HealBonus));
                bundle.heal += heal.round() as u32;
            }
            EffectKind::Gold => {
                bundle.gold += (count * formulas.base_gold * cascade).round() as u32;
            }
            EffectKind::Charge => {
                bundle.charge += (count * formulas.base_charge * cascade).round() as u32;
            }
        }
    }

    let lifesteal = hero.bonus(EquipStat::Lifesteal);
    if lifesteal > 0.0 {
        bundle.lifesteal_heal = ((physical + magic) * lifesteal).round() as u32;
    }
    bundle.physical_damage = physical.round() as u32;
    bundle.magic_damage = magic.round() as u32;

    bundle
}
