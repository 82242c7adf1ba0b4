//! Board data structures.

use crate::gems::GemId;
use serde::{Deserialize, Serialize};

/// Grid coordinate, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 4-neighbor adjacency.
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Swap request between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub from: Pos,
    pub to: Pos,
}

impl Swap {
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}

/// Special tile created by long or crossing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    LineHorizontal,
    LineVertical,
    AreaBomb,
    ColorBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// None while the cell is cleared and waiting for refill.
    pub gem: Option<GemId>,
    pub special: Option<Special>,
    /// Gem-burn mark. Display only.
    pub burned: bool,
}

impl Cell {
    pub fn with_gem(gem: GemId) -> Self {
        Self {
            gem: Some(gem),
            special: None,
            burned: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gem.is_none()
    }
}

/// Rectangular grid of cells, indexed as `cells[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// All-empty grid.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    /// Build from gem ids; handy for hand-made boards.
    pub fn from_ids(rows: &[&[u8]]) -> Self {
        let cell = |&id: &u8| Cell::with_gem(GemId(id));
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.iter().map(cell).collect())
            .collect();
        Self {
            rows: cells.len(),
            cols: cells.first().map_or(0, |r| r.len()),
            cells,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    pub fn gem(&self, pos: Pos) -> Option<GemId> {
        self.cells[pos.row][pos.col].gem
    }

    pub fn swap_cells(&mut self, a: Pos, b: Pos) {
        let tmp = self.cells[a.row][a.col];
        self.cells[a.row][a.col] = self.cells[b.row][b.col];
        self.cells[b.row][b.col] = tmp;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Iterate all positions row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }
}

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// One maximal run of identical gems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub gem: GemId,
    pub cells: Vec<Pos>,
    pub direction: Direction,
}

impl Match {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Middle cell, where a special tile lands.
    pub fn middle(&self) -> Pos {
        self.cells[self.cells.len() / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(Pos::new(3, 5)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn test_grid_from_ids() {
        let grid = Grid::from_ids(&[&[0, 1, 2], &[3, 4, 5]]);
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.gem(Pos::new(1, 2)), Some(GemId(5)));
        assert!(grid.is_full());
    }

    #[test]
    fn test_swap_cells() {
        let mut grid = Grid::from_ids(&[&[0, 1]]);
        grid.swap_cells(Pos::new(0, 0), Pos::new(0, 1));
        assert_eq!(grid.gem(Pos::new(0, 0)), Some(GemId(1)));
        assert_eq!(grid.gem(Pos::new(0, 1)), Some(GemId(0)));
    }

    #[test]
    fn test_match_middle() {
        let m = Match {
            gem: GemId(0),
            cells: (0..4).map(|c| Pos::new(0, c)).collect(),
            direction: Direction::Horizontal,
        };
        assert_eq!(m.middle(), Pos::new(0, 2));
    }
}
