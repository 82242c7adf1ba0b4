//! Special tiles: which ones a cascade step creates, and what they clear.
//!
//! Match-5+ makes a color bomb, match-4 a line special in the run's direction,
//! and a cell shared by a horizontal and a vertical match an area bomb.

use super::types::{Direction, Grid, Match, Pos, Special};
use crate::gems::GemId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A special tile to place once the step's cells are cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSpecial {
    pub pos: Pos,
    pub kind: Special,
    /// Gem the tile keeps; color bombs target it.
    pub gem: GemId,
}

/// Special tile a single match earns on its own, if any.
pub fn special_for_match(m: &Match) -> Option<PlannedSpecial> {
    let kind = match m.len() {
        n if n >= 5 => Special::ColorBomb,
        4 => match m.direction {
            Direction::Horizontal => Special::LineHorizontal,
            Direction::Vertical => Special::LineVertical,
        },
        _ => return None,
    };
    Some(PlannedSpecial {
        pos: m.middle(),
        kind,
        gem: m.gem,
    })
}

/// Plan every special for one cascade step.
///
/// Per-match specials register first, in match order; crossing cells then become
/// area bombs. A cell keeps the first special registered for it.
pub fn plan_specials(matches: &[Match]) -> Vec<PlannedSpecial> {
    fn register(sp: PlannedSpecial, planned: &mut Vec<PlannedSpecial>) {
        if !planned.iter().any(|p| p.pos == sp.pos) {
            planned.push(sp);
        }
    }

    let mut planned: Vec<PlannedSpecial> = Vec::new();

    for m in matches {
        if let Some(sp) = special_for_match(m) {
            register(sp, &mut planned);
        }
    }

    let vertical: HashSet<Pos> = matches
        .iter()
        .filter(|m| m.direction == Direction::Vertical)
        .flat_map(|m| m.cells.iter().copied())
        .collect();

    let horizontal = matches
        .iter()
        .filter(|m| m.direction == Direction::Horizontal);
    for m in horizontal {
        for &pos in &m.cells {
            if vertical.contains(&pos) {
                register(
                    PlannedSpecial {
                        pos,
                        kind: Special::AreaBomb,
                        gem: m.gem,
                    },
                    &mut planned,
                );
            }
        }
    }

    planned
}

/// Cells cleared when the special at `pos` detonates.
///
/// Line specials clear their row or column, area bombs a 3x3 block clipped to
/// the board, color bombs every cell holding `gem`.
pub fn affected_cells(kind: Special, pos: Pos, gem: GemId, grid: &Grid) -> Vec<Pos> {
    match kind {
        Special::LineHorizontal => (0..grid.cols).map(|c| Pos::new(pos.row, c)).collect(),
        Special::LineVertical => (0..grid.rows).map(|r| Pos::new(r, pos.col)).collect(),
        Special::AreaBomb => {
            let mut cells = Vec::with_capacity(9);
            for row in pos.row.saturating_sub(1)..=(pos.row + 1).min(grid.rows - 1) {
                for col in pos.col.saturating_sub(1)..=(pos.col + 1).min(grid.cols - 1) {
                    cells.push(Pos::new(row, col));
                }
            }
            cells
        }
        Special::ColorBomb => grid
            .positions()
            .filter(|&p| grid.gem(p) == Some(gem))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(gem: u8, cells: &[(usize, usize)], direction: Direction) -> Match {
        Match {
            gem: GemId(gem),
            cells: cells.iter().map(|&(r, c)| Pos::new(r, c)).collect(),
            direction,
        }
    }

    #[test]
    fn test_match_three_makes_nothing() {
        let m = run(0, &[(0, 0), (0, 1), (0, 2)], Direction::Horizontal);
        assert!(special_for_match(&m).is_none());
    }

    #[test]
    fn test_match_four_line_follows_direction() {
        let h = run(1, &[(2, 0), (2, 1), (2, 2), (2, 3)], Direction::Horizontal);
        let sp = special_for_match(&h).unwrap();
        assert_eq!(sp.kind, Special::LineHorizontal);
        assert_eq!(sp.pos, Pos::new(2, 2));
        assert_eq!(sp.gem, GemId(1));

        let v = run(1, &[(0, 4), (1, 4), (2, 4), (3, 4)], Direction::Vertical);
        assert_eq!(special_for_match(&v).unwrap().kind, Special::LineVertical);
    }

    #[test]
    fn test_match_five_color_bomb_in_middle() {
        let cells = [(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)];
        let m = run(2, &cells, Direction::Horizontal);
        let sp = special_for_match(&m).unwrap();
        assert_eq!(sp.kind, Special::ColorBomb);
        assert_eq!(sp.pos, Pos::new(0, 3));
    }

    #[test]
    fn test_l_shape_makes_area_bomb() {
        let matches = vec![
            run(3, &[(4, 0), (4, 1), (4, 2)], Direction::Horizontal),
            run(3, &[(2, 0), (3, 0), (4, 0)], Direction::Vertical),
        ];
        let planned = plan_specials(&matches);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].kind, Special::AreaBomb);
        assert_eq!(planned[0].pos, Pos::new(4, 0));
    }

    #[test]
    fn test_color_bomb_beats_area_bomb_on_shared_cell() {
        let row = [(3, 1), (3, 2), (3, 3), (3, 4), (3, 5)];
        let matches = vec![
            run(0, &row, Direction::Horizontal),
            run(0, &[(1, 3), (2, 3), (3, 3)], Direction::Vertical),
        ];
        let planned = plan_specials(&matches);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].kind, Special::ColorBomb);
        assert_eq!(planned[0].pos, Pos::new(3, 3));
    }

    #[test]
    fn test_first_registered_wins() {
        // Two match-4s crossing at their shared middle cell
        let matches = vec![
            run(0, &[(2, 0), (2, 1), (2, 2), (2, 3)], Direction::Horizontal),
            run(0, &[(0, 2), (1, 2), (2, 2), (3, 2)], Direction::Vertical),
        ];
        let planned = plan_specials(&matches);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].kind, Special::LineHorizontal);
    }

    #[test]
    fn test_affected_cells_footprints() {
        let grid = Grid::from_ids(&[&[0, 1, 2, 0], &[1, 2, 0, 1], &[2, 0, 1, 2]]);

        let row = affected_cells(Special::LineHorizontal, Pos::new(1, 2), GemId(0), &grid);
        assert_eq!(row.len(), 4);
        assert!(row.iter().all(|p| p.row == 1));

        let col = affected_cells(Special::LineVertical, Pos::new(1, 2), GemId(0), &grid);
        assert_eq!(col.len(), 3);
        assert!(col.iter().all(|p| p.col == 2));

        let center = affected_cells(Special::AreaBomb, Pos::new(1, 1), GemId(0), &grid);
        assert_eq!(center.len(), 9);
        let corner = affected_cells(Special::AreaBomb, Pos::new(0, 0), GemId(0), &grid);
        assert_eq!(corner.len(), 4);

        let color = affected_cells(Special::ColorBomb, Pos::new(0, 0), GemId(0), &grid);
        assert_eq!(
            color,
            vec![Pos::new(0, 0), Pos::new(0, 3), Pos::new(1, 2), Pos::new(2, 1)]
        );
    }
}
