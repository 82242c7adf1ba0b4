//! Boss mechanics, applied around the enemy's attack.

use super::types::{Enemy, Hero};
use crate::board::{BoardEngine, Pos};
use crate::config::Mechanic;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a mechanic did before the attack landed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreAttack {
    /// Enrage triggered this turn.
    pub enraged: bool,
    /// A column was (re)blocked this turn.
    pub blocked_column: Option<usize>,
    pub burned: Vec<Pos>,
}

/// What a mechanic did after the attack landed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAttack {
    pub enemy_healed: u32,
    pub poison_damage: u32,
}

pub fn before_attack(enemy: &mut Enemy, board: &mut BoardEngine, rng: &mut impl Rng) -> PreAttack {
    let mut out = PreAttack::default();
    let Some(mechanic) = enemy.mechanic else {
        return out;
    };

    match mechanic {
        Mechanic::Enrage {
            threshold,
            multiplier,
        } => {
            // One-shot; the boosted attack stays for the rest of the fight
            if !enemy.state.enraged && enemy.current_hp as f64 <= enemy.max_hp as f64 * threshold {
                enemy.state.enraged = true;
                enemy.atk = (enemy.atk as f64 * multiplier).round() as u32;
                out.enraged = true;
                debug!(enemy = %enemy.name, atk = enemy.atk, "enraged");
            }
        }
        Mechanic::ColumnBlock { interval } => {
            enemy.state.turns_since_block += 1;
            if enemy.state.turns_since_block >= interval {
                enemy.state.turns_since_block = 0;
                let col = rng.gen_range(0..board.grid().cols);
                board.set_blocked_column(Some(col));
                out.blocked_column = Some(col);
            }
        }
        Mechanic::GemBurn { burn_count } => {
            out.burned = board.burn_random_cells(burn_count, rng);
        }
        Mechanic::LifestealPoison { .. } => {}
    }

    out
}

/// `damage_dealt` is the HP the hero lost to the attack itself.
pub fn after_attack(enemy: &mut Enemy, hero: &mut Hero, damage_dealt: u32) -> PostAttack {
    let mut out = PostAttack::default();
    if let Some(Mechanic::LifestealPoison {
        lifesteal,
        poison_percent,
    }) = enemy.mechanic
    {
        let before = enemy.current_hp;
        enemy.heal((damage_dealt as f64 * lifesteal).round() as u32);
        out.enemy_healed = enemy.current_hp - before;

        out.poison_damage = (hero.max_hp as f64 * poison_percent).round() as u32;
        hero.take_damage(out.poison_damage);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardRules;
    use crate::config::BalanceConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(boss: &str) -> (Enemy, Hero, BoardEngine, ChaCha8Rng) {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let board = BoardEngine::new(7, 7, 6, BoardRules::default(), &mut rng);
        let enemy = Enemy::from_boss(config.boss(boss).unwrap());
        let hero = Hero::from_template(config.hero("paladin").unwrap());
        (enemy, hero, board, rng)
    }

    #[test]
    fn test_enrage_triggers_once_at_threshold() {
        let (mut enemy, _, mut board, mut rng) = setup("ogre_king");
        let base_atk = enemy.atk;

        assert!(!before_attack(&mut enemy, &mut board, &mut rng).enraged);
        assert_eq!(enemy.atk, base_atk);

        enemy.current_hp = (enemy.max_hp as f64 * 0.3) as u32;
        assert!(before_attack(&mut enemy, &mut board, &mut rng).enraged);
        let enraged_atk = enemy.atk;
        assert_eq!(enraged_atk, (base_atk as f64 * 1.5).round() as u32);

        assert!(!before_attack(&mut enemy, &mut board, &mut rng).enraged);
        assert_eq!(enemy.atk, enraged_atk);
    }

    #[test]
    fn test_column_block_every_interval() {
        let (mut enemy, _, mut board, mut rng) = setup("sand_wyrm");
        for _ in 0..2 {
            let pre = before_attack(&mut enemy, &mut board, &mut rng);
            assert_eq!(pre.blocked_column, None);
        }
        let third = before_attack(&mut enemy, &mut board, &mut rng);
        assert!(third.blocked_column.is_some());
        assert_eq!(board.blocked_column(), third.blocked_column);
        assert_eq!(enemy.state.turns_since_block, 0);
    }

    #[test]
    fn test_gem_burn_marks_cells() {
        let (mut enemy, _, mut board, mut rng) = setup("dragon_emperor");
        let pre = before_attack(&mut enemy, &mut board, &mut rng);
        assert_eq!(pre.burned.len(), 3);
        assert_eq!(board.burned_cells().len(), 3);
    }

    #[test]
    fn test_lifesteal_and_poison() {
        let (mut enemy, mut hero, _, _) = setup("lich_lord");
        enemy.current_hp = 100;
        let post = after_attack(&mut enemy, &mut hero, 20);
        assert_eq!(post.enemy_healed, 6);
        assert_eq!(enemy.current_hp, 106);
        let poison = (hero.max_hp as f64 * 0.05).round() as u32;
        assert_eq!(post.poison_damage, poison);
        assert_eq!(hero.current_hp, hero.max_hp - poison);
    }

    #[test]
    fn test_lifesteal_capped_at_max() {
        let (mut enemy, mut hero, _, _) = setup("lich_lord");
        let post = after_attack(&mut enemy, &mut hero, 50);
        assert_eq!(post.enemy_healed, 0);
        assert_eq!(enemy.current_hp, enemy.max_hp);
    }

    #[test]
    fn test_normal_enemy_has_no_mechanic() {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut board = BoardEngine::new(7, 7, 6, BoardRules::default(), &mut rng);
        let template = config.enemy("slime").unwrap();
        let mut enemy = Enemy::from_template(template, 1, &config.enemy_scaling, false);
        let mut hero = Hero::from_template(config.hero("warrior").unwrap());
        let pre = before_attack(&mut enemy, &mut board, &mut rng);
        let post = after_attack(&mut enemy, &mut hero, 10);
        assert_eq!(pre, PreAttack::default());
        assert_eq!(post, PostAttack::default());
        assert_eq!(hero.current_hp, hero.max_hp);
    }
}
