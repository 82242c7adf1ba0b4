//! Move selection for simulated heroes.

use crate::board::{BoardEngine, Swap};
use crate::combat::Hero;
use crate::gems::{EffectKind, GemId, GemType};
use std::collections::HashMap;

/// Picks the hero's next swap. `None` means no move is worth making (or none
/// exists); the combat engine reshuffles and asks again.
pub trait MovePolicy {
    fn choose_swap(&self, board: &BoardEngine, hero: &Hero) -> Option<Swap>;
}

/// One-ply greedy scorer: weights matched gems by what they do for the hero
/// right now and prefers long matches.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    effects: HashMap<GemId, EffectKind>,
}

/// Heal weight switches below this HP ratio.
const LOW_HP_RATIO: f64 = 0.5;

impl GreedyPolicy {
    pub fn new(gems: &[GemType]) -> Self {
        Self {
            effects: gems.iter().map(|g| (g.id, g.effect)).collect(),
        }
    }

    fn weight(&self, gem: GemId, hero: &Hero) -> f64 {
        match self.effects.get(&gem) {
            Some(EffectKind::PhysicalDamage | EffectKind::MagicDamage) => 3.0,
            Some(EffectKind::Armor) => 1.5,
            Some(EffectKind::Heal) => {
                if hero.hp_ratio() < LOW_HP_RATIO {
                    4.0
                } else {
                    1.0
                }
            }
            Some(EffectKind::Gold) => 0.5,
            Some(EffectKind::Charge) => 1.0,
            None => 0.0,
        }
    }

    /// Score of a swap, or `None` if it makes no match.
    pub fn score(&self, board: &BoardEngine, swap: Swap, hero: &Hero) -> Option<f64> {
        let matches = board.preview_swap(swap)?;
        if matches.is_empty() {
            return None;
        }
        let score = matches
            .iter()
            .map(|m| {
                let len = m.len();
                let mut s = len as f64 * self.weight(m.gem, hero);
                if len >= 4 {
                    s += 3.0;
                }
                if len >= 5 {
                    s += 5.0;
                }
                s
            })
            .sum();
        Some(score)
    }
}

impl MovePolicy for GreedyPolicy {
    fn choose_swap(&self, board: &BoardEngine, hero: &Hero) -> Option<Swap> {
        let mut best: Option<(Swap, f64)> = None;
        for swap in board.valid_swaps() {
            let Some(score) = self.score(board, swap, hero) else {
                continue;
            };
            // Strictly greater, so ties keep the earliest swap in scan order
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((swap, score));
            }
        }
        best.map(|(swap, _)| swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRules, Cell, Grid, Pos};
    use crate::config::BalanceConfig;

    /// No runs and no valid moves.
    fn quiet_grid() -> Grid {
        let rows: Vec<Vec<u8>> = (0..7)
            .map(|r| (0..7).map(|c| ((r * 2 + c) % 6) as u8).collect())
            .collect();
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        Grid::from_ids(&refs)
    }

    fn setup() -> (GreedyPolicy, Hero) {
        let config = BalanceConfig::default();
        (
            GreedyPolicy::new(&config.gems),
            Hero::from_template(config.hero("warrior").unwrap()),
        )
    }

    #[test]
    fn test_dead_board_has_no_choice() {
        let (policy, hero) = setup();
        let board = BoardEngine::from_grid(quiet_grid(), 6, BoardRules::default());
        assert_eq!(policy.choose_swap(&board, &hero), None);
    }

    #[test]
    fn test_prefers_damage_over_gold() {
        let (policy, hero) = setup();
        let mut grid = quiet_grid();
        // Coin (4) run available in row 0 via a down swap at (0,2)
        grid.cells[0][0] = Cell::with_gem(GemId(4));
        grid.cells[0][1] = Cell::with_gem(GemId(4));
        grid.cells[1][2] = Cell::with_gem(GemId(4));
        // Sword (0) match-4 in row 6 via a down swap at (5,5)
        grid.cells[6][3] = Cell::with_gem(GemId(0));
        grid.cells[6][4] = Cell::with_gem(GemId(0));
        grid.cells[5][5] = Cell::with_gem(GemId(0));
        let board = BoardEngine::from_grid(grid, 6, BoardRules::default());

        let swap = policy.choose_swap(&board, &hero).unwrap();
        let matches = board.preview_swap(swap).unwrap();
        assert!(matches.iter().any(|m| m.gem == GemId(0)));
    }

    #[test]
    fn test_heal_weight_rises_when_low() {
        let (policy, mut hero) = setup();
        let mut grid = quiet_grid();
        grid.cells[0][0] = Cell::with_gem(GemId(3));
        grid.cells[0][1] = Cell::with_gem(GemId(3));
        grid.cells[1][2] = Cell::with_gem(GemId(3));
        let board = BoardEngine::from_grid(grid, 6, BoardRules::default());
        let swap = Swap::new(Pos::new(0, 2), Pos::new(1, 2));

        let healthy = policy.score(&board, swap, &hero).unwrap();
        hero.current_hp = hero.max_hp / 4;
        let hurt = policy.score(&board, swap, &hero).unwrap();
        assert!(hurt > healthy);
    }

    #[test]
    fn test_long_match_bonus() {
        let (policy, hero) = setup();
        let mut grid = quiet_grid();
        // Row 3: 2 2 5 2 2 with a 2 below the gap -> match-5 on swap
        grid.cells[3][0] = Cell::with_gem(GemId(2));
        grid.cells[3][2] = Cell::with_gem(GemId(5));
        grid.cells[3][1] = Cell::with_gem(GemId(2));
        grid.cells[3][3] = Cell::with_gem(GemId(2));
        grid.cells[3][4] = Cell::with_gem(GemId(2));
        grid.cells[4][2] = Cell::with_gem(GemId(2));
        let board = BoardEngine::from_grid(grid, 6, BoardRules::default());
        let swap = Swap::new(Pos::new(3, 2), Pos::new(4, 2));
        let score = policy.score(&board, swap, &hero).unwrap();
        // 5 shields at 1.5, +3 and +5 length bonuses
        assert!((score - (7.5 + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_non_matching_swap_has_no_score() {
        let (policy, hero) = setup();
        let board = BoardEngine::from_grid(quiet_grid(), 6, BoardRules::default());
        assert_eq!(
            policy.score(&board, Swap::new(Pos::new(0, 0), Pos::new(0, 1)), &hero),
            None
        );
    }
}
