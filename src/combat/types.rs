use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{
    BossTemplate, EnemyScaling, EnemyTemplate, EquipStat, EquipmentItem, HeroTemplate, Mechanic,
    SkillTemplate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub key: String,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub atk: u32,
    pub matk: u32,
    pub def: u32,
    /// Absorbs enemy damage before defense; decays after every enemy turn.
    pub armor: u32,
    pub skill_charge: u32,
    /// Summed equipment bonuses per stat.
    pub equipment: BTreeMap<EquipStat, f64>,
    pub skill: SkillTemplate,
}

impl Hero {
    pub fn from_template(template: &HeroTemplate) -> Self {
        Self {
            key: template.key.clone(),
            name: template.name.clone(),
            max_hp: template.hp,
            current_hp: template.hp,
            atk: template.atk,
            matk: template.matk,
            def: template.def,
            armor: 0,
            skill_charge: 0,
            equipment: BTreeMap::new(),
            skill: template.skill.clone(),
        }
    }

    /// Stack an item's bonus onto the hero.
    pub fn equip(&mut self, item: &EquipmentItem) {
        *self.equipment.entry(item.stat).or_insert(0.0) += item.value;
    }

    /// Total bonus for `stat`, 0 when nothing grants it.
    pub fn bonus(&self, stat: EquipStat) -> f64 {
        self.equipment.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    /// Heal up to max HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn skill_ready(&self) -> bool {
        self.skill_charge >= self.skill.cost
    }

    /// Armor and skill charge do not carry between encounters; HP does.
    pub fn reset_for_encounter(&mut self) {
        self.armor = 0;
        self.skill_charge = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterTier {
    Normal,
    Elite,
    Boss,
}

/// Runtime state for boss mechanics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanicState {
    pub enraged: bool,
    pub turns_since_block: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub key: String,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub tier: EncounterTier,
    pub mechanic: Option<Mechanic>,
    pub state: MechanicState,
}

fn scale_stat(base: u32, floor: u32, factor: f64, tier_mult: f64) -> u32 {
    (base as f64 * (1.0 + floor as f64 * factor) * tier_mult).round() as u32
}

impl Enemy {
    /// Normal or elite enemy scaled to `floor`.
    pub fn from_template(
        template: &EnemyTemplate,
        floor: u32,
        scaling: &EnemyScaling,
        elite: bool,
    ) -> Self {
        let mult = if elite { scaling.elite_multiplier } else { 1.0 };
        let max_hp = scale_stat(template.hp, floor, scaling.hp, mult).max(1);
        Self {
            key: template.key.clone(),
            name: if elite {
                format!("Elite {}", template.name)
            } else {
                template.name.clone()
            },
            max_hp,
            current_hp: max_hp,
            atk: scale_stat(template.atk, floor, scaling.atk, mult),
            def: scale_stat(template.def, floor, scaling.def, mult),
            tier: if elite {
                EncounterTier::Elite
            } else {
                EncounterTier::Normal
            },
            mechanic: None,
            state: MechanicState::default(),
        }
    }

    /// Bosses use their template stats unscaled.
    pub fn from_boss(template: &BossTemplate) -> Self {
        Self {
            key: template.key.clone(),
            name: template.name.clone(),
            max_hp: template.hp.max(1),
            current_hp: template.hp.max(1),
            atk: template.atk,
            def: template.def,
            tier: EncounterTier::Boss,
            mechanic: Some(template.mechanic),
            state: MechanicState::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
    }
}

/// Effects produced by one cascade step, all non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBundle {
    pub physical_damage: u32,
    pub magic_damage: u32,
    pub heal: u32,
    pub armor: u32,
    pub gold: u32,
    pub charge: u32,
    pub lifesteal_heal: u32,
}
