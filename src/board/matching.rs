//! Match detection.

use super::types::{Direction, Grid, Match, Pos};
use crate::config::balance::MIN_MATCH_LEN;
use crate::gems::GemId;

/// Find every maximal run of at least three identical gems.
///
/// Rows are scanned first (top to bottom, left to right), then columns. A cell
/// shared by a horizontal and a vertical run shows up in both matches.
/// Empty cells never match and break runs.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut matches = Vec::new();

    for row in 0..grid.rows {
        let pos_at = |i| Pos::new(row, i);
        scan_line(grid.cols, pos_at, grid, Direction::Horizontal, &mut matches);
    }
    for col in 0..grid.cols {
        let pos_at = |i| Pos::new(i, col);
        scan_line(grid.rows, pos_at, grid, Direction::Vertical, &mut matches);
    }

    matches
}

/// True if any run of three exists. Cheaper than `find_matches` for move search.
pub fn has_match(grid: &Grid) -> bool {
    let run_at = |a: Pos, b: Pos, c: Pos| -> bool {
        match grid.gem(a) {
            Some(gem) => grid.gem(b) == Some(gem) && grid.gem(c) == Some(gem),
            None => false,
        }
    };

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let here = Pos::new(row, col);
            if col + 2 < grid.cols && run_at(here, Pos::new(row, col + 1), Pos::new(row, col + 2)) {
                return true;
            }
            if row + 2 < grid.rows && run_at(here, Pos::new(row + 1, col), Pos::new(row + 2, col)) {
                return true;
            }
        }
    }
    false
}

fn scan_line(
    len: usize,
    pos_at: impl Fn(usize) -> Pos,
    grid: &Grid,
    direction: Direction,
    out: &mut Vec<Match>,
) {
    let mut i = 0;
    while i < len {
        let Some(gem) = grid.gem(pos_at(i)) else {
            i += 1;
            continue;
        };
        let run = run_length(i, len, &pos_at, grid, gem);
        if run >= MIN_MATCH_LEN {
            out.push(Match {
                gem,
                cells: (i..i + run).map(&pos_at).collect(),
                direction,
            });
        }
        i += run;
    }
}

fn run_length(
    start: usize,
    len: usize,
    pos_at: &impl Fn(usize) -> Pos,
    grid: &Grid,
    gem: GemId,
) -> usize {
    let mut run = 1;
    while start + run < len && grid.gem(pos_at(start + run)) == Some(gem) {
        run += 1;
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Cell;

    /// 7x7 board with no runs, built from gems 1..=5.
    fn quiet_grid() -> Grid {
        let rows: Vec<Vec<u8>> = (0..7)
            .map(|r| (0..7).map(|c| ((r * 2 + c) % 5 + 1) as u8).collect())
            .collect();
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        Grid::from_ids(&refs)
    }

    #[test]
    fn test_quiet_grid_has_no_matches() {
        let grid = quiet_grid();
        assert!(find_matches(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_cross_reports_both_runs() {
        let mut grid = quiet_grid();
        for col in 1..=5 {
            *grid.cell_mut(Pos::new(3, col)) = Cell::with_gem(GemId(0));
        }
        for row in 1..=2 {
            *grid.cell_mut(Pos::new(row, 3)) = Cell::with_gem(GemId(0));
        }

        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].gem, GemId(0));
        assert_eq!(matches[0].direction, Direction::Horizontal);
        assert_eq!(matches[0].len(), 5);
        assert_eq!(
            matches[0].cells,
            (1..=5).map(|c| Pos::new(3, c)).collect::<Vec<_>>()
        );

        assert_eq!(matches[1].direction, Direction::Vertical);
        assert_eq!(matches[1].len(), 3);
        assert_eq!(
            matches[1].cells,
            vec![Pos::new(1, 3), Pos::new(2, 3), Pos::new(3, 3)]
        );
        assert!(has_match(&grid));
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let mut grid = Grid::from_ids(&[&[0, 0, 0, 0]]);
        grid.cell_mut(Pos::new(0, 1)).gem = None;
        assert!(find_matches(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_run_reaching_edge() {
        let grid = Grid::from_ids(&[&[1, 2, 2, 2]]);
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].cells[0], Pos::new(0, 1));
        assert_eq!(matches[0].len(), 3);
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let grid = Grid::from_ids(&[&[1, 1, 1, 2, 3, 3, 3]]);
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].gem, GemId(1));
        assert_eq!(matches[1].gem, GemId(3));
    }
}
