//! Turn-based combat between one hero and one enemy on a match-3 board.

use super::math::{apply_defense, roll_variance};
use super::mechanics::{self, PostAttack, PreAttack};
use super::resolver::resolve_matches;
use super::skills::{self, SkillOutcome};
use super::types::{EffectBundle, Enemy, Hero};
use crate::board::{
    BoardEngine, BoardRules, CascadeReport, CascadeStep, Swap, SwapOutcome, SwapRejection,
};
use crate::config::{BalanceConfig, Formulas};
use crate::error::Result;
use crate::gems::GemType;
use crate::policy::MovePolicy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reshuffles in one combat before it is worth a warning.
const RESHUFFLE_WARN_THRESHOLD: u32 = 3;

/// Consecutive turns without an accepted swap before a simulated combat gives up.
const MAX_STALLED_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    HeroTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_over(self) -> bool {
        matches!(self, CombatPhase::Victory | CombatPhase::Defeat)
    }
}

/// Result of an accepted hero swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroTurnReport {
    pub cascade: CascadeReport,
    /// One bundle per cascade step applied. Steps after the enemy died are
    /// resolved on the board but not applied.
    pub effects: Vec<EffectBundle>,
    pub damage_dealt: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Rejected(SwapRejection),
    Resolved(HeroTurnReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTurnReport {
    pub mechanic: PreAttack,
    pub armor_absorbed: u32,
    /// HP the hero lost to the attack, after armor and defense.
    pub damage: u32,
    pub after: PostAttack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillReport {
    pub name: String,
    pub outcome: SkillOutcome,
    /// Cascades set off by gems the skill converted.
    pub cascade: Vec<CascadeStep>,
    pub effects: Vec<EffectBundle>,
}

/// Summary of a finished simulated combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub won: bool,
    /// Lost because the turn cap ran out, not because the hero died.
    pub timed_out: bool,
    pub turns_played: u32,
    pub hero_hp_remaining: u32,
    pub damage_dealt: u32,
    pub gold_earned: u32,
    pub reshuffles: u32,
}

pub struct CombatEngine<R: Rng> {
    hero: Hero,
    enemy: Enemy,
    board: BoardEngine,
    rng: R,
    gems: Vec<GemType>,
    formulas: Formulas,
    phase: CombatPhase,
    turns: u32,
    damage_dealt: u32,
    gold_earned: u32,
    reshuffles: u32,
}

impl<R: Rng> CombatEngine<R> {
    /// Start an encounter on a fresh board. The hero keeps its HP; armor and
    /// skill charge start from zero.
    ///
    /// Fails if `config` does not validate; a board needs at least 3 gem types
    /// and 3x3 cells before it can be populated.
    pub fn new(
        mut hero: Hero,
        enemy: Enemy,
        config: &BalanceConfig,
        rules: BoardRules,
        mut rng: R,
    ) -> Result<Self> {
        config.validate()?;
        hero.reset_for_encounter();
        let board = BoardEngine::new(
            config.board.rows,
            config.board.cols,
            config.gem_count(),
            rules,
            &mut rng,
        );
        Ok(Self {
            hero,
            enemy,
            board,
            rng,
            gems: config.gems.clone(),
            formulas: config.formulas,
            phase: CombatPhase::HeroTurn,
            turns: 0,
            damage_dealt: 0,
            gold_earned: 0,
            reshuffles: 0,
        })
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn board(&self) -> &BoardEngine {
        &self.board
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Accepted hero swaps so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn gold_earned(&self) -> u32 {
        self.gold_earned
    }

    /// Hand the hero back once the encounter is over.
    pub fn into_hero(self) -> Hero {
        self.hero
    }

    /// Play a swap for the hero and resolve every cascade it sets off.
    pub fn hero_move(&mut self, swap: Swap) -> MoveOutcome {
        if self.phase != CombatPhase::HeroTurn {
            return MoveOutcome::Rejected(SwapRejection::NotHeroTurn);
        }

        let cascade = match self.board.attempt_swap(swap, &mut self.rng) {
            SwapOutcome::Rejected(reason) => return MoveOutcome::Rejected(reason),
            SwapOutcome::Resolved(report) => report,
        };

        self.turns += 1;
        let (effects, damage_dealt) = self.apply_cascade(&cascade.steps);
        self.phase = if self.enemy.is_alive() {
            CombatPhase::EnemyTurn
        } else {
            CombatPhase::Victory
        };

        MoveOutcome::Resolved(HeroTurnReport {
            cascade,
            effects,
            damage_dealt,
        })
    }

    /// Resolve and apply cascade steps in order, stopping once the enemy dies.
    fn apply_cascade(&mut self, steps: &[CascadeStep]) -> (Vec<EffectBundle>, u32) {
        let mut effects = Vec::with_capacity(steps.len());
        let mut dealt = 0;
        for step in steps {
            if !self.enemy.is_alive() {
                break;
            }
            let bundle = resolve_matches(
                &step.gem_counts,
                step.depth,
                &self.hero,
                &self.gems,
                &self.formulas,
            );
            dealt += self.apply_effects(&bundle);
            effects.push(bundle);
        }
        (effects, dealt)
    }

    /// Returns the HP the enemy lost.
    fn apply_effects(&mut self, bundle: &EffectBundle) -> u32 {
        let mut dealt = 0;
        for raw in [bundle.physical_damage, bundle.magic_damage] {
            if raw == 0 {
                continue;
            }
            let variance = roll_variance(self.formulas.damage_variance, &mut self.rng);
            let damage = apply_defense(
                raw as f64,
                self.enemy.def,
                variance,
                self.formulas.armor_constant,
            );
            self.enemy.take_damage(damage);
            dealt += damage;
        }
        self.damage_dealt += dealt;

        self.hero.heal(bundle.heal);
        self.hero.armor += bundle.armor;
        self.hero.skill_charge += bundle.charge;
        self.gold_earned += bundle.gold;
        self.hero.heal(bundle.lifesteal_heal);

        dealt
    }

    /// The enemy attacks. `None` outside the enemy's turn.
    pub fn enemy_turn(&mut self) -> Option<EnemyTurnReport> {
        if self.phase != CombatPhase::EnemyTurn {
            return None;
        }

        let mechanic = mechanics::before_attack(&mut self.enemy, &mut self.board, &mut self.rng);

        let mut raw = self.enemy.atk;
        let armor_absorbed = self.hero.armor.min(raw);
        self.hero.armor -= armor_absorbed;
        raw -= armor_absorbed;

        let variance = roll_variance(self.formulas.damage_variance, &mut self.rng);
        let damage = apply_defense(
            raw as f64,
            self.hero.def,
            variance,
            self.formulas.armor_constant,
        );
        self.hero.take_damage(damage);

        let mut report = EnemyTurnReport {
            mechanic,
            armor_absorbed,
            damage,
            after: PostAttack::default(),
        };
        if !self.hero.is_alive() {
            self.phase = CombatPhase::Defeat;
            return Some(report);
        }

        report.after = mechanics::after_attack(&mut self.enemy, &mut self.hero, damage);
        if !self.hero.is_alive() {
            self.phase = CombatPhase::Defeat;
            return Some(report);
        }

        self.hero.armor = (self.hero.armor as f64 * self.formulas.armor_decay).floor() as u32;
        self.phase = CombatPhase::HeroTurn;
        Some(report)
    }

    /// Spend skill charge on the hero's skill. Does not use up the turn.
    /// `None` outside the hero's turn or without enough charge.
    pub fn activate_skill(&mut self) -> Option<SkillReport> {
        if self.phase != CombatPhase::HeroTurn || !self.hero.skill_ready() {
            return None;
        }

        let outcome = skills::cast(
            &mut self.hero,
            &mut self.enemy,
            &mut self.board,
            &self.gems,
            &self.formulas,
            &mut self.rng,
        );
        self.damage_dealt += outcome.damage;

        let cascade = if outcome.converted.is_empty() {
            Vec::new()
        } else {
            self.board.settle(&mut self.rng)
        };
        let (effects, _) = self.apply_cascade(&cascade);

        if !self.enemy.is_alive() {
            self.phase = CombatPhase::Victory;
        }
        debug!(skill = %self.hero.skill.name, damage = outcome.damage, "skill used");

        Some(SkillReport {
            name: self.hero.skill.name.clone(),
            outcome,
            cascade,
            effects,
        })
    }

    /// Reshuffle if the board has no valid move. Returns whether it did.
    pub fn ensure_playable(&mut self) -> bool {
        if self.board.has_valid_move() {
            return false;
        }
        self.reshuffle();
        true
    }

    fn reshuffle(&mut self) {
        self.board.reshuffle(&mut self.rng);
        self.reshuffles += 1;
        if self.reshuffles == RESHUFFLE_WARN_THRESHOLD {
            warn!(
                hero = %self.hero.key,
                enemy = %self.enemy.key,
                reshuffles = self.reshuffles,
                "board keeps running out of moves"
            );
        }
    }

    /// Play the encounter out with `policy` until someone wins or the hero has
    /// taken `max_turns` turns. Running out of turns counts as a loss.
    pub fn run_combat(
        &mut self,
        policy: &impl MovePolicy,
        max_turns: u32,
        use_skills: bool,
    ) -> CombatResult {
        let mut stalled = 0;

        while self.phase == CombatPhase::HeroTurn && self.turns < max_turns {
            if use_skills && self.hero.skill_ready() {
                self.activate_skill();
                if self.phase.is_over() {
                    break;
                }
            }

            self.ensure_playable();
            let accepted = match policy.choose_swap(&self.board, &self.hero) {
                Some(swap) => matches!(self.hero_move(swap), MoveOutcome::Resolved(_)),
                None => false,
            };
            if !accepted {
                stalled += 1;
                if stalled >= MAX_STALLED_ATTEMPTS {
                    warn!(hero = %self.hero.key, stalled, "policy produced no playable move");
                    break;
                }
                self.reshuffle();
                continue;
            }
            stalled = 0;

            self.enemy_turn();
        }

        let won = self.phase == CombatPhase::Victory;
        let result = CombatResult {
            won,
            timed_out: !self.phase.is_over(),
            turns_played: self.turns,
            hero_hp_remaining: self.hero.current_hp,
            damage_dealt: self.damage_dealt,
            gold_earned: self.gold_earned,
            reshuffles: self.reshuffles,
        };

        debug!(
            hero = %self.hero.key,
            enemy = %self.enemy.name,
            won,
            turns = self.turns,
            hp = self.hero.current_hp,
            "combat finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::error::GameError;
    use crate::policy::GreedyPolicy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine(hero: &str, enemy: Enemy, seed: u64) -> CombatEngine<ChaCha8Rng> {
        let config = BalanceConfig::default();
        let hero = Hero::from_template(config.hero(hero).unwrap());
        let rng = ChaCha8Rng::seed_from_u64(seed);
        CombatEngine::new(hero, enemy, &config, BoardRules::default(), rng).unwrap()
    }

    fn slime() -> Enemy {
        let config = BalanceConfig::default();
        let template = config.enemy("slime").unwrap();
        Enemy::from_template(template, 1, &config.enemy_scaling, false)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = BalanceConfig::default();
        config.gems.truncate(2);
        let hero = Hero::from_template(config.hero("warrior").unwrap());
        let rng = ChaCha8Rng::seed_from_u64(1);
        let result = CombatEngine::new(hero, slime(), &config, BoardRules::default(), rng);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_phases_alternate() {
        let mut tank = slime();
        tank.max_hp = 10_000;
        tank.current_hp = 10_000;
        let mut combat = engine("warrior", tank, 3);
        assert_eq!(combat.phase(), CombatPhase::HeroTurn);
        assert!(combat.enemy_turn().is_none());

        let swap = combat.board().valid_swaps()[0];
        let MoveOutcome::Resolved(report) = combat.hero_move(swap) else {
            panic!("valid swap rejected");
        };
        assert_eq!(combat.turns(), 1);
        assert!(!report.effects.is_empty());
        assert_eq!(combat.phase(), CombatPhase::EnemyTurn);

        assert_eq!(
            combat.hero_move(swap),
            MoveOutcome::Rejected(SwapRejection::NotHeroTurn)
        );

        let before = combat.hero().current_hp + combat.hero().armor;
        let attack = combat.enemy_turn().unwrap();
        assert!(attack.damage >= 1);
        assert!(combat.hero().current_hp < before);
        assert_eq!(combat.phase(), CombatPhase::HeroTurn);
    }

    #[test]
    fn test_rejected_swap_keeps_turn() {
        let mut combat = engine("mage", slime(), 5);
        let outcome = combat.hero_move(Swap::new(Pos::new(0, 0), Pos::new(2, 2)));
        assert_eq!(outcome, MoveOutcome::Rejected(SwapRejection::NotAdjacent));
        assert_eq!(combat.turns(), 0);
        assert_eq!(combat.phase(), CombatPhase::HeroTurn);
    }

    #[test]
    fn test_armor_absorbs_then_decays() {
        let mut combat = engine("paladin", slime(), 8);
        combat.hero.armor = 100;
        combat.phase = CombatPhase::EnemyTurn;
        let atk = combat.enemy().atk;

        let report = combat.enemy_turn().unwrap();
        assert_eq!(report.armor_absorbed, atk);
        // Fully absorbed attacks still chip for 1
        assert_eq!(report.damage, 1);
        assert_eq!(combat.hero().armor, (100 - atk) / 2);
    }

    #[test]
    fn test_overwhelming_enemy_defeats_hero() {
        let mut brute = slime();
        brute.atk = 100_000;
        brute.max_hp = 100_000;
        brute.current_hp = 100_000;
        let mut combat = engine("warrior", brute, 11);
        let policy = GreedyPolicy::new(&BalanceConfig::default().gems);
        let result = combat.run_combat(&policy, 50, false);
        assert!(!result.won);
        assert!(!result.timed_out);
        assert_eq!(result.hero_hp_remaining, 0);
        assert_eq!(combat.phase(), CombatPhase::Defeat);
    }

    #[test]
    fn test_turn_cap_is_a_timeout() {
        let mut wall = slime();
        wall.max_hp = 1_000_000;
        wall.current_hp = 1_000_000;
        wall.atk = 0;
        let mut combat = engine("warrior", wall, 12);
        let policy = GreedyPolicy::new(&BalanceConfig::default().gems);
        let result = combat.run_combat(&policy, 5, false);
        assert!(!result.won);
        assert!(result.timed_out);
        assert_eq!(result.turns_played, 5);
        assert!(result.hero_hp_remaining > 0);
    }

    #[test]
    fn test_skill_does_not_end_turn() {
        let mut combat = engine("mage", slime(), 4);
        assert!(combat.activate_skill().is_none());

        combat.hero.skill_charge = combat.hero.skill.cost;
        let report = combat.activate_skill().unwrap();
        assert!(report.outcome.damage > 0);
        assert_eq!(combat.hero().skill_charge, 0);
        assert!(matches!(
            combat.phase(),
            CombatPhase::HeroTurn | CombatPhase::Victory
        ));
    }

    #[test]
    fn test_blade_storm_settles_board() {
        let config = BalanceConfig::default();
        let boss = Enemy::from_boss(config.boss("dragon_emperor").unwrap());
        let mut combat = engine("warrior", boss, 21);
        combat.hero.skill_charge = combat.hero.skill.cost;
        let report = combat.activate_skill().unwrap();
        assert_eq!(report.outcome.converted.len(), 5);
        assert!(combat.board().is_stable());
        assert_eq!(report.effects.len(), report.cascade.len());
    }

    #[test]
    fn test_warrior_beats_slime() {
        let policy = GreedyPolicy::new(&BalanceConfig::default().gems);
        let mut combat = engine("warrior", slime(), 99);
        let result = combat.run_combat(&policy, 50, false);
        if result.won {
            assert!(result.hero_hp_remaining > 0);
            assert_eq!(combat.phase(), CombatPhase::Victory);
        }
        assert!(result.damage_dealt > 0);
    }
}
