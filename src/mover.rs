//! Single-cell movement shared by pacman and the ghosts, including the tunnel wrap.

use crate::{
    grid::Grid,
    variables::Direction::{self, *},
};

/// An entity that occupies one grid cell at a time.
pub trait Mobile {
    fn cell(&self) -> (usize, usize);
    fn set_cell(&mut self, cell: (usize, usize));
}

/// Returns the cell on the far side of the tunnel if stepping from `from` in `direction`
/// leaves the grid through one end of the tunnel row.
pub fn wrap_target(grid: &Grid, from: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
    let (row, col) = from;
    let last = grid.size() - 1;
    if row != grid.tunnel_row() {
        return None;
    }
    let target = match (direction, col) {
        (Left, 0) => (row, last),
        (Right, c) if c == last => (row, 0),
        _ => return None,
    };
    grid.is_open(target.0, target.1).then_some(target)
}

/// Returns the cell a move from `from` in `direction` would land on, or None if the move is
/// blocked by a wall or the edge of the grid.
pub fn step_target(grid: &Grid, from: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
    wrap_target(grid, from, direction).or_else(|| {
        grid.offset(from, direction)
            .filter(|&(row, col)| grid.is_open(row, col))
    })
}

/// Moves `entity` one cell in `direction`. A blocked move leaves it where it is.
pub fn try_move(grid: &Grid, entity: &mut impl Mobile, direction: Direction) -> bool {
    match step_target(grid, entity.cell(), direction) {
        Some(cell) => {
            entity.set_cell(cell);
            true
        }
        None => false,
    }
}
