//! Built-in game tables: gems, heroes, enemies, bosses, floors, equipment.

use super::templates::*;
use crate::gems::{EffectKind, GemId, GemType};

fn gem(id: u8, name: &str, effect: EffectKind) -> GemType {
    GemType {
        id: GemId(id),
        name: name.to_string(),
        effect,
    }
}

/// The six gem types, ids 0..5.
pub fn default_gems() -> Vec<GemType> {
    vec![
        gem(0, "Sword", EffectKind::PhysicalDamage),
        gem(1, "Fire", EffectKind::MagicDamage),
        gem(2, "Shield", EffectKind::Armor),
        gem(3, "Heart", EffectKind::Heal),
        gem(4, "Coin", EffectKind::Gold),
        gem(5, "Star", EffectKind::Charge),
    ]
}

/// Playable heroes, in menu order.
pub fn default_heroes() -> Vec<HeroTemplate> {
    vec![
        // Tanky, favors sword matches
        HeroTemplate {
            key: "warrior".to_string(),
            name: "Warrior".to_string(),
            hp: 250,
            atk: 12,
            matk: 5,
            def: 12,
            skill: SkillTemplate {
                name: "Blade Storm".to_string(),
                cost: 100,
                effect: SkillKind::BladeStorm {
                    multiplier: 2.0,
                    convert_count: 5,
                },
            },
        },
        // Glass cannon, favors fire matches
        HeroTemplate {
            key: "mage".to_string(),
            name: "Mage".to_string(),
            hp: 200,
            atk: 5,
            matk: 14,
            def: 8,
            skill: SkillTemplate {
                name: "Meteor".to_string(),
                cost: 100,
                effect: SkillKind::Meteor { multiplier: 3.0 },
            },
        },
        HeroTemplate {
            key: "paladin".to_string(),
            name: "Paladin".to_string(),
            hp: 270,
            atk: 8,
            matk: 8,
            def: 12,
            skill: SkillTemplate {
                name: "Holy Shield".to_string(),
                cost: 120,
                effect: SkillKind::HolyShield {
                    armor_fraction: 0.5,
                },
            },
        },
    ]
}

fn enemy(key: &str, name: &str, hp: u32, atk: u32, def: u32) -> EnemyTemplate {
    EnemyTemplate {
        key: key.to_string(),
        name: name.to_string(),
        hp,
        atk,
        def,
    }
}

/// Normal enemy templates before floor scaling.
pub fn default_enemies() -> Vec<EnemyTemplate> {
    vec![
        // Grassland
        enemy("slime", "Slime", 80, 5, 2),
        enemy("goblin", "Goblin", 70, 6, 3),
        enemy("wolf", "Wolf", 100, 7, 3),
        enemy("goblin_archer", "Goblin Archer", 60, 9, 2),
        // Desert
        enemy("scorpion", "Scorpion", 110, 8, 5),
        enemy("mummy", "Mummy", 140, 7, 10),
        enemy("sand_mage", "Sand Mage", 70, 11, 3),
        // Frostlands
        enemy("ice_golem", "Ice Golem", 180, 9, 14),
        enemy("frost_witch", "Frost Witch", 80, 14, 3),
        enemy("skeleton", "Skeleton", 120, 10, 5),
        // Infernal
        enemy("imp", "Imp", 110, 11, 4),
        enemy("fire_elemental", "Fire Elemental", 150, 14, 7),
        enemy("demon_knight", "Demon Knight", 200, 12, 12),
    ]
}

/// Bosses. Boss stats are used as-is, without floor scaling.
pub fn default_bosses() -> Vec<BossTemplate> {
    vec![
        BossTemplate {
            key: "ogre_king".to_string(),
            name: "Ogre King".to_string(),
            hp: 350,
            atk: 12,
            def: 6,
            mechanic: Mechanic::Enrage {
                threshold: 0.3,
                multiplier: 1.5,
            },
        },
        BossTemplate {
            key: "sand_wyrm".to_string(),
            name: "Sand Wyrm".to_string(),
            hp: 500,
            atk: 16,
            def: 8,
            mechanic: Mechanic::ColumnBlock { interval: 3 },
        },
        BossTemplate {
            key: "lich_lord".to_string(),
            name: "Lich Lord".to_string(),
            hp: 580,
            atk: 16,
            def: 8,
            mechanic: Mechanic::LifestealPoison {
                lifesteal: 0.3,
                poison_percent: 0.05,
            },
        },
        BossTemplate {
            key: "dragon_emperor".to_string(),
            name: "Dragon Emperor".to_string(),
            hp: 750,
            atk: 20,
            def: 10,
            mechanic: Mechanic::GemBurn { burn_count: 3 },
        },
    ]
}

fn floor(floor: u32, enemies: &[&str], theme: &str) -> Encounter {
    Encounter {
        floor,
        kind: EncounterKind::Enemies(enemies.iter().map(|k| k.to_string()).collect()),
        theme: theme.to_string(),
    }
}

fn boss_floor(floor: u32, boss: &str, theme: &str) -> Encounter {
    Encounter {
        floor,
        kind: EncounterKind::Boss(boss.to_string()),
        theme: theme.to_string(),
    }
}

/// Floors 1-20; every fifth floor is a boss.
pub fn default_floors() -> Vec<Encounter> {
    vec![
        floor(1, &["slime"], "grassland"),
        floor(2, &["goblin"], "grassland"),
        floor(3, &["wolf"], "grassland"),
        floor(4, &["goblin_archer"], "grassland"),
        boss_floor(5, "ogre_king", "grassland"),
        floor(6, &["scorpion"], "desert"),
        floor(7, &["scorpion"], "desert"),
        floor(8, &["mummy"], "desert"),
        floor(9, &["sand_mage"], "desert"),
        boss_floor(10, "sand_wyrm", "desert"),
        floor(11, &["skeleton"], "frostlands"),
        floor(12, &["ice_golem"], "frostlands"),
        floor(13, &["frost_witch"], "frostlands"),
        floor(14, &["skeleton"], "frostlands"),
        boss_floor(15, "lich_lord", "frostlands"),
        floor(16, &["imp"], "infernal"),
        floor(17, &["fire_elemental"], "infernal"),
        floor(18, &["demon_knight"], "infernal"),
        floor(19, &["imp"], "infernal"),
        boss_floor(20, "dragon_emperor", "infernal"),
    ]
}

fn item(name: &str, tier: u8, stat: EquipStat, value: f64) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        tier,
        stat,
        value,
    }
}

/// Reward equipment by tier.
pub fn default_equipment() -> Vec<EquipmentItem> {
    vec![
        item("Iron Sword", 1, EquipStat::SwordBonus, 0.15),
        item("Flame Staff", 1, EquipStat::FireBonus, 0.15),
        item("Oak Shield", 1, EquipStat::ShieldBonus, 0.20),
        item("Healing Ring", 1, EquipStat::HealBonus, 0.20),
        item("Steel Blade", 2, EquipStat::SwordBonus, 0.30),
        item("Inferno Rod", 2, EquipStat::FireBonus, 0.30),
        item("Tower Shield", 2, EquipStat::ShieldBonus, 0.40),
        item("Life Amulet", 2, EquipStat::HealBonus, 0.40),
        item("Dragon Fang", 3, EquipStat::SwordBonus, 0.50),
        item("Arcane Orb", 3, EquipStat::FireBonus, 0.50),
        item("Flame Sword", 3, EquipStat::FireSwordHybrid, 0.30),
        item("Vampiric Ring", 3, EquipStat::Lifesteal, 0.10),
    ]
}
