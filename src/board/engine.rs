//! Board engine: swaps, the cascade loop, refills and dead-board handling.
//!
//! The engine never owns randomness. Every call that draws gems takes the
//! caller's RNG so a whole combat replays from one seed.

use super::matching::{find_matches, has_match};
use super::specials::{affected_cells, plan_specials, PlannedSpecial};
use super::types::{Cell, Grid, Match, Pos, Swap};
use crate::gems::GemId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Optional rule switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRules {
    /// Special tiles caught in a clear detonate their footprint. Off in the
    /// shipped game, where specials are inert markers.
    pub detonate_specials: bool,
}

/// Why a swap request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapRejection {
    OutOfBounds,
    NotAdjacent,
    BlockedColumn,
    /// The swap would not form a match; it was reverted.
    NoMatch,
    /// Issued by the combat engine outside the hero's turn.
    NotHeroTurn,
}

/// One detect → clear → drop → refill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// 1 for the matches the swap made, +1 per follow-up pass.
    pub depth: u32,
    pub matches: Vec<Match>,
    /// Matched cells per gem, summed over matches. A crossing cell counts once
    /// per match it belongs to; detonated cells add one each.
    pub gem_counts: BTreeMap<GemId, u32>,
    /// Every cell emptied this step, matched or detonated.
    pub cleared: Vec<Pos>,
    /// Cleared cells that were not part of a match.
    pub detonated: Vec<Pos>,
    pub specials: Vec<PlannedSpecial>,
}

/// Everything an accepted swap set off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub swap: Swap,
    pub steps: Vec<CascadeStep>,
}

impl CascadeReport {
    pub fn depth(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.depth)
    }

    pub fn cells_cleared(&self) -> usize {
        self.steps.iter().map(|s| s.cleared.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Rejected(SwapRejection),
    Resolved(CascadeReport),
}

#[derive(Debug, Clone)]
pub struct BoardEngine {
    grid: Grid,
    gem_count: u8,
    rules: BoardRules,
    blocked_column: Option<usize>,
}

impl BoardEngine {
    /// Fresh board with no matches and at least one valid move.
    ///
    /// `gem_count` must be at least 3 or population cannot avoid runs.
    pub fn new(
        rows: usize,
        cols: usize,
        gem_count: u8,
        rules: BoardRules,
        rng: &mut impl Rng,
    ) -> Self {
        debug_assert!(gem_count >= 3, "need at least 3 gem types");
        let mut engine = Self {
            grid: Grid::empty(rows, cols),
            gem_count,
            rules,
            blocked_column: None,
        };
        engine.reshuffle(rng);
        engine
    }

    /// Wrap an existing grid as-is (restored state, hand-made test boards).
    pub fn from_grid(grid: Grid, gem_count: u8, rules: BoardRules) -> Self {
        Self {
            grid,
            gem_count,
            rules,
            blocked_column: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn gem_count(&self) -> u8 {
        self.gem_count
    }

    pub fn blocked_column(&self) -> Option<usize> {
        self.blocked_column
    }

    /// Block a column for swapping, or clear the block with `None`.
    pub fn set_blocked_column(&mut self, col: Option<usize>) {
        self.blocked_column = col.filter(|&c| c < self.grid.cols);
    }

    /// No matches left and no empty cells.
    pub fn is_stable(&self) -> bool {
        self.grid.is_full() && !has_match(&self.grid)
    }

    fn check_swap(&self, swap: Swap) -> Result<(), SwapRejection> {
        if !self.grid.in_bounds(swap.from) || !self.grid.in_bounds(swap.to) {
            return Err(SwapRejection::OutOfBounds);
        }
        if !swap.from.is_adjacent(swap.to) {
            return Err(SwapRejection::NotAdjacent);
        }
        if let Some(col) = self.blocked_column {
            if swap.from.col == col || swap.to.col == col {
                return Err(SwapRejection::BlockedColumn);
            }
        }
        Ok(())
    }

    /// Swap two cells and run the cascade loop to completion.
    ///
    /// A rejected swap leaves the grid exactly as it was.
    pub fn attempt_swap(&mut self, swap: Swap, rng: &mut impl Rng) -> SwapOutcome {
        if let Err(reason) = self.check_swap(swap) {
            return SwapOutcome::Rejected(reason);
        }

        self.grid.swap_cells(swap.from, swap.to);
        if !has_match(&self.grid) {
            self.grid.swap_cells(swap.from, swap.to);
            return SwapOutcome::Rejected(SwapRejection::NoMatch);
        }

        let steps = self.settle(rng);
        SwapOutcome::Resolved(CascadeReport { swap, steps })
    }

    /// Matches a swap would make, without touching the board.
    /// `None` if the swap is not allowed at all.
    pub fn preview_swap(&self, swap: Swap) -> Option<Vec<Match>> {
        self.check_swap(swap).ok()?;
        let mut scratch = self.grid.clone();
        scratch.swap_cells(swap.from, swap.to);
        Some(find_matches(&scratch))
    }

    /// Every allowed swap that makes a match, in scan order: row-major,
    /// right neighbor before down neighbor.
    pub fn valid_swaps(&self) -> Vec<Swap> {
        let mut scratch = self.grid.clone();
        candidate_swaps(&self.grid)
            .filter(|&swap| self.check_swap(swap).is_ok())
            .filter(|&swap| swap_makes_match(&mut scratch, swap))
            .collect()
    }

    pub fn has_valid_move(&self) -> bool {
        let mut scratch = self.grid.clone();
        candidate_swaps(&self.grid)
            .filter(|&swap| self.check_swap(swap).is_ok())
            .any(|swap| swap_makes_match(&mut scratch, swap))
    }

    /// Regenerate the whole board until it has a valid move.
    /// Specials and burn marks are lost; the blocked column stays.
    pub fn reshuffle(&mut self, rng: &mut impl Rng) {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            self.grid = populate(self.grid.rows, self.grid.cols, self.gem_count, rng);
            if self.has_valid_move() {
                break;
            }
        }
        trace!(attempts, "board populated");
    }

    /// Run detect → clear → drop → refill until nothing matches.
    ///
    /// Depth starts at 1 on every call.
    pub fn settle(&mut self, rng: &mut impl Rng) -> Vec<CascadeStep> {
        let mut steps = Vec::new();
        let mut depth = 0;

        loop {
            let matches = find_matches(&self.grid);
            if matches.is_empty() {
                break;
            }
            depth += 1;
            steps.push(self.resolve_step(depth, matches, rng));
        }

        steps
    }

    fn resolve_step(&mut self, depth: u32, matches: Vec<Match>, rng: &mut impl Rng) -> CascadeStep {
        let mut gem_counts: BTreeMap<GemId, u32> = BTreeMap::new();
        let mut to_clear: BTreeSet<Pos> = BTreeSet::new();

        for m in &matches {
            *gem_counts.entry(m.gem).or_insert(0) += m.len() as u32;
            to_clear.extend(m.cells.iter().copied());
        }

        let specials = plan_specials(&matches);

        let detonated = if self.rules.detonate_specials {
            self.detonate(&mut to_clear)
        } else {
            Vec::new()
        };
        for &pos in &detonated {
            if let Some(gem) = self.grid.gem(pos) {
                *gem_counts.entry(gem).or_insert(0) += 1;
            }
        }

        for &pos in &to_clear {
            *self.grid.cell_mut(pos) = Cell::default();
        }
        for sp in &specials {
            *self.grid.cell_mut(sp.pos) = Cell {
                gem: Some(sp.gem),
                special: Some(sp.kind),
                burned: false,
            };
        }

        self.drop_and_fill(rng);

        trace!(
            depth,
            matches = matches.len(),
            cleared = to_clear.len(),
            specials = specials.len(),
            "cascade step"
        );

        CascadeStep {
            depth,
            matches,
            gem_counts,
            cleared: to_clear.into_iter().collect(),
            detonated,
            specials,
        }
    }

    /// Grow `to_clear` by the footprint of every special inside it, chaining
    /// through specials caught in a footprint. Returns the added cells.
    fn detonate(&self, to_clear: &mut BTreeSet<Pos>) -> Vec<Pos> {
        let mut added = Vec::new();
        let mut pending: Vec<Pos> = to_clear
            .iter()
            .copied()
            .filter(|&p| self.grid.cell(p).special.is_some())
            .collect();

        while let Some(pos) = pending.pop() {
            let cell = *self.grid.cell(pos);
            let (Some(kind), Some(gem)) = (cell.special, cell.gem) else {
                continue;
            };
            for hit in affected_cells(kind, pos, gem, &self.grid) {
                if to_clear.insert(hit) {
                    added.push(hit);
                    if self.grid.cell(hit).special.is_some() {
                        pending.push(hit);
                    }
                }
            }
        }

        added
    }

    /// Gravity then refill: surviving cells fall to the bottom of their column
    /// in their original order, and fresh random gems fill the top.
    pub fn drop_and_fill(&mut self, rng: &mut impl Rng) {
        let rows = self.grid.rows;
        for col in 0..self.grid.cols {
            let mut column: Vec<Cell> = (0..rows)
                .rev()
                .map(|row| self.grid.cells[row][col])
                .filter(|cell| !cell.is_empty())
                .collect();
            while column.len() < rows {
                column.push(Cell::with_gem(random_gem(self.gem_count, rng)));
            }
            for (i, cell) in column.into_iter().enumerate() {
                self.grid.cells[rows - 1 - i][col] = cell;
            }
        }
    }

    /// Clear old burn marks and burn up to `count` random cells outside the
    /// blocked column. Returns the burned cells.
    pub fn burn_random_cells(&mut self, count: usize, rng: &mut impl Rng) -> Vec<Pos> {
        for cell in self.grid.cells.iter_mut().flatten() {
            cell.burned = false;
        }
        let chosen = self.pick_random_cells(count, |_| true, rng);
        for &pos in &chosen {
            self.grid.cell_mut(pos).burned = true;
        }
        chosen
    }

    pub fn burned_cells(&self) -> Vec<Pos> {
        self.grid
            .positions()
            .filter(|&p| self.grid.cell(p).burned)
            .collect()
    }

    /// Turn up to `count` random cells that hold another gem into `target`.
    /// The board may hold matches afterwards; call `settle`.
    pub fn convert_random_cells(
        &mut self,
        target: GemId,
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<Pos> {
        let chosen = self.pick_random_cells(count, |cell| cell.gem != Some(target), rng);
        for &pos in &chosen {
            self.grid.cell_mut(pos).gem = Some(target);
        }
        chosen
    }

    fn pick_random_cells(
        &self,
        count: usize,
        keep: impl Fn(&Cell) -> bool,
        rng: &mut impl Rng,
    ) -> Vec<Pos> {
        let mut available: Vec<Pos> = self
            .grid
            .positions()
            .filter(|p| Some(p.col) != self.blocked_column)
            .filter(|&p| {
                let cell = self.grid.cell(p);
                !cell.is_empty() && keep(cell)
            })
            .collect();
        available.shuffle(rng);
        available.truncate(count);
        available
    }
}

fn random_gem(gem_count: u8, rng: &mut impl Rng) -> GemId {
    GemId(rng.gen_range(0..gem_count))
}

/// Would placing `gem` at (row, col) complete a run with the two cells to the
/// left or the two above?
fn would_match_at(grid: &Grid, row: usize, col: usize, gem: GemId) -> bool {
    let same = |r: usize, c: usize| grid.cells[r][c].gem == Some(gem);
    (col >= 2 && same(row, col - 1) && same(row, col - 2))
        || (row >= 2 && same(row - 1, col) && same(row - 2, col))
}

/// Fill a grid cell by cell, redrawing any gem that would complete a run.
fn populate(rows: usize, cols: usize, gem_count: u8, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::empty(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let gem = loop {
                let gem = random_gem(gem_count, rng);
                if !would_match_at(&grid, row, col, gem) {
                    break gem;
                }
            };
            grid.cells[row][col] = Cell::with_gem(gem);
        }
    }
    grid
}

fn candidate_swaps(grid: &Grid) -> impl Iterator<Item = Swap> + '_ {
    grid.positions().flat_map(move |pos| {
        let right = (pos.col + 1 < grid.cols)
            .then(|| Swap::new(pos, Pos::new(pos.row, pos.col + 1)));
        let down = (pos.row + 1 < grid.rows)
            .then(|| Swap::new(pos, Pos::new(pos.row + 1, pos.col)));
        right.into_iter().chain(down)
    })
}

/// Try a swap on `scratch` and put it back.
fn swap_makes_match(scratch: &mut Grid, swap: Swap) -> bool {
    scratch.swap_cells(swap.from, swap.to);
    let found = has_match(scratch);
    scratch.swap_cells(swap.from, swap.to);
    found
}
