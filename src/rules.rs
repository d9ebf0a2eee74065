/// Rules module for Conway's Game of Life simulation
///
/// Neighbor counting on a toroidal grid and the fixed B3/S23 rule. Pattern
/// definitions and placement live in [`patterns`].
pub mod patterns;

use crate::grid::{wrap, Cell, Grid, ALIVE, DEAD};

/// Game of Life standard rules (B3/S23):
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
pub const SURVIVAL_MIN: u8 = 2;
pub const SURVIVAL_MAX: u8 = 3;
pub const BIRTH_COUNT: u8 = 3;

/// Next state of a single cell given its live neighbor count.
#[inline]
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    let alive = cell == ALIVE;
    let lives = if alive {
        (SURVIVAL_MIN..=SURVIVAL_MAX).contains(&neighbors)
    } else {
        neighbors == BIRTH_COUNT
    };
    if lives {
        ALIVE
    } else {
        DEAD
    }
}

/// Live neighbor count of every cell, with both axes wrapping (torus).
pub fn count_neighbors(grid: &Grid<Cell>) -> Grid<u8> {
    let (height, width) = grid.dimensions();
    let mut counts = Grid::new(width, height);

    for row in 0..height {
        for col in 0..width {
            let mut count = 0u8;
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    // Skip the cell itself
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = wrap(row as isize + dr, height);
                    let nc = wrap(col as isize + dc, width);
                    count += grid.get(nr, nc);
                }
            }
            counts.set(row, col, count);
        }
    }

    counts
}

/// Apply Game of Life rules for one generation, producing a fresh grid.
pub fn apply_rules(grid: &Grid<Cell>, neighbors: &Grid<u8>) -> Grid<Cell> {
    assert_eq!(grid.dimensions(), neighbors.dimensions());
    let (height, width) = grid.dimensions();
    let mut next = Grid::new(width, height);

    for row in 0..height {
        for col in 0..width {
            next.set(row, col, next_state(grid.get(row, col), neighbors.get(row, col)));
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid<Cell> {
        let mut grid = Grid::new(width, height);
        for &(row, col) in alive {
            grid.set(row, col, ALIVE);
        }
        grid
    }

    fn step(grid: &Grid<Cell>) -> Grid<Cell> {
        apply_rules(grid, &count_neighbors(grid))
    }

    #[test]
    fn test_next_state_table() {
        for n in 0..=8u8 {
            let survives = n == 2 || n == 3;
            assert_eq!(next_state(ALIVE, n) == ALIVE, survives, "alive with {n}");
            assert_eq!(next_state(DEAD, n) == ALIVE, n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_birth_on_three_by_three_torus() {
        let grid = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let next = step(&grid);
        assert!(next.is_alive(0, 1));
        assert!(next.is_alive(1, 1));
        assert!(next.is_alive(2, 1));
    }

    #[test]
    fn test_death_by_underpopulation() {
        let grid = grid_with(3, 3, &[(1, 1), (1, 2)]);
        let counts = count_neighbors(&grid);
        assert_eq!(counts.get(1, 1), 1);
        let next = step(&grid);
        assert!(!next.is_alive(1, 1));
    }

    #[test]
    fn test_death_by_overpopulation() {
        // Center of a plus sign has four neighbors
        let grid = grid_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(count_neighbors(&grid).get(2, 2), 4);
        assert!(!step(&grid).is_alive(2, 2));
    }

    #[test]
    fn test_wraparound_from_origin() {
        let (width, height) = (5, 4);
        let grid = grid_with(width, height, &[(0, 0)]);
        let counts = count_neighbors(&grid);

        // Only reachable through the wrapped edges
        assert_eq!(counts.get(height - 1, width - 1), 1);
        assert_eq!(counts.get(height - 1, 0), 1);
        assert_eq!(counts.get(0, width - 1), 1);
        assert_eq!(counts.get(1, width - 1), 1);
        assert_eq!(counts.get(height - 1, 1), 1);
        // Not a neighbor
        assert_eq!(counts.get(2, 2), 0);
        assert_eq!(counts.get(0, 0), 0);
    }

    #[test]
    fn test_blinker_oscillates_across_edge() {
        // Vertical blinker straddling the top/bottom seam
        let grid = grid_with(6, 6, &[(5, 2), (0, 2), (1, 2)]);
        let once = step(&grid);
        assert_eq!(once, grid_with(6, 6, &[(0, 1), (0, 2), (0, 3)]));
        assert_eq!(step(&once), grid);
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(step(&grid), grid);
    }

    #[test]
    fn test_counts_match_grid_dimensions() {
        let grid = grid_with(13, 10, &[(4, 4)]);
        let counts = count_neighbors(&grid);
        assert_eq!(counts.dimensions(), grid.dimensions());
        assert!(counts.as_slice().iter().all(|&n| n <= 8));
    }
}
