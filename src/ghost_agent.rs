use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::trace;
use ndarray::Array2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use ordered_float::OrderedFloat;
use rand::{seq::SliceRandom, Rng};

use crate::{
    collideable::Occupant,
    grid::Grid,
    mover::{try_move, Mobile},
    variables::Direction::{self, *},
};

/// Identifies one of the four ghosts. The color only selects a ghost's targeting constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum GhostColor {
    Orange = 0,
    Red = 1,
    Pink = 2,
    Cyan = 3,
}

impl GhostColor {
    pub const ALL: [GhostColor; 4] = [
        GhostColor::Orange,
        GhostColor::Red,
        GhostColor::Pink,
        GhostColor::Cyan,
    ];

    /// Index of this ghost in per-ghost tables.
    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GhostState {
    /// Waiting in the pen queue, off the field. Unlike the arcade pen, a penned ghost does not
    /// move and cannot collide with pacman until it is released.
    Penned,
    /// On the field and dangerous.
    Active,
    /// On the field, vulnerable and evading.
    Frightened,
}

#[derive(Clone, Debug)]
pub struct GhostAgent {
    color: GhostColor,
    start_pos: (usize, usize),
    start_state: GhostState,
    init_direction: Direction,
    pub pos: (usize, usize),
    direction: Direction,
    pub state: GhostState,
}

impl GhostAgent {
    pub fn new(
        color: GhostColor,
        start_pos: (usize, usize),
        start_state: GhostState,
        init_direction: Direction,
    ) -> Self {
        Self {
            color,
            start_pos,
            start_state,
            init_direction,
            pos: start_pos,
            direction: init_direction,
            state: start_state,
        }
    }

    pub fn color(&self) -> GhostColor {
        self.color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true if the ghost is on the field (not waiting in the pen).
    pub fn is_on_field(&self) -> bool {
        self.state != GhostState::Penned
    }

    /// Returns true if the ghost is frightened.
    pub fn is_frightened(&self) -> bool {
        self.state == GhostState::Frightened
    }

    /// The pixel position of the ghost's top-left corner.
    pub fn pixel_pos(&self, square_width: u32) -> (f64, f64) {
        let width = f64::from(square_width);
        (self.pos.1 as f64 * width, self.pos.0 as f64 * width)
    }

    /// Returns the open cells next to `pos` that do not reverse the ghost's current direction.
    fn possible_moves(&self, grid: &Grid, pos: (usize, usize)) -> ArrayVec<(Direction, (usize, usize)), 4> {
        grid.open_neighbors(pos)
            .into_iter()
            .filter(|(dir, _)| *dir != self.direction.opposite())
            .collect()
    }

    /// If the ghost stands on either end of the tunnel row, BFS is skipped: the ghost crosses
    /// the tunnel, or keeps going if it has just come through it.
    fn wrap_direction(&self, grid: &Grid) -> Option<Direction> {
        let (row, col) = self.pos;
        let last = grid.size() - 1;
        if col != 0 && col != last {
            return None;
        }
        let crossing = if col == 0 { Left } else { Right };
        if row == grid.tunnel_row() && self.direction != crossing.opposite() {
            Some(crossing)
        } else {
            Some(self.direction)
        }
    }

    /// Direction used when every non-reversing move is blocked: turn around in a dead end, or
    /// stay put if the ghost is walled in completely.
    fn dead_end_direction(&self, grid: &Grid) -> Direction {
        let reverse = self.direction.opposite();
        match grid.offset(self.pos, reverse) {
            Some((row, col)) if grid.is_open(row, col) => reverse,
            _ => self.direction,
        }
    }

    /// Breadth-first search over the maze that answers which first step leads to the reachable
    /// cell closest (in straight-line pixel distance) to `target`. Every discovered cell is
    /// labeled with the first step of the path that found it.
    pub fn target_direction(&self, grid: &Grid, target: (isize, isize), square_width: u32) -> Direction {
        if let Some(direction) = self.wrap_direction(grid) {
            return direction;
        }

        let mut first_steps: Array2<Option<Direction>> = Array2::from_elem((grid.size(), grid.size()), None);
        let mut queue = VecDeque::new();
        for (direction, next) in self.possible_moves(grid, self.pos) {
            first_steps[next] = Some(direction);
            queue.push_back((next, direction));
        }

        let mut best: Option<(OrderedFloat<f64>, Direction)> = None;
        while let Some((cell, first_step)) = queue.pop_front() {
            let distance = OrderedFloat(pixel_distance(cell, target, square_width));
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, first_step));
            }
            for (_, next) in self.possible_moves(grid, cell) {
                if next != self.pos && first_steps[next].is_none() {
                    first_steps[next] = Some(first_step);
                    queue.push_back((next, first_step));
                }
            }
        }

        best.map_or_else(|| self.dead_end_direction(grid), |(_, direction)| direction)
    }

    /// Returns a random non-reversing direction.
    pub fn frightened_direction<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Direction {
        if let Some(direction) = self.wrap_direction(grid) {
            return direction;
        }
        let options: ArrayVec<Direction, 4> =
            self.possible_moves(grid, self.pos).into_iter().map(|(dir, _)| dir).collect();
        match options.choose(rng) {
            Some(direction) => *direction,
            None => self.dead_end_direction(grid),
        }
    }

    /// Picks the next direction (chasing `target`, or evading if there is none), moves one cell
    /// and keeps the grid's occupant registry in sync.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        target: Option<(isize, isize)>,
        square_width: u32,
        rng: &mut R,
    ) {
        grid.remove_occupant(self.pos.0, self.pos.1, Occupant::Ghost(self.color));
        let direction = match target {
            Some(target) => self.target_direction(grid, target, square_width),
            None => self.frightened_direction(grid, rng),
        };
        self.direction = direction;
        let moved = try_move(grid, self, direction);
        trace!(
            "{:?} ghost heads {:?} towards {:?} (moved: {moved}) to {:?}",
            self.color,
            direction,
            target,
            self.pos
        );
        grid.register_occupant(self.pos.0, self.pos.1, Occupant::Ghost(self.color));
    }

    /// Takes the ghost off the field and parks it in the pen. The caller removes it from the grid.
    pub fn send_to_pen(&mut self, park_pos: (usize, usize)) {
        self.pos = park_pos;
        self.state = GhostState::Penned;
    }

    /// Puts the ghost back on the field. The caller registers it on the grid.
    pub fn release(&mut self, release_pos: (usize, usize), frightened: bool) {
        self.pos = release_pos;
        self.state = if frightened {
            GhostState::Frightened
        } else {
            GhostState::Active
        };
    }

    /// Restores the ghost's position and behavior at the beginning of a round.
    pub fn respawn(&mut self) {
        self.pos = self.start_pos;
        self.direction = self.init_direction;
        self.state = self.start_state;
    }
}

impl Mobile for GhostAgent {
    fn cell(&self) -> (usize, usize) {
        self.pos
    }

    fn set_cell(&mut self, cell: (usize, usize)) {
        self.pos = cell;
    }
}

/// Straight-line distance between the pixel positions of two cells.
fn pixel_distance(cell: (usize, usize), target: (isize, isize), square_width: u32) -> f64 {
    let width = f64::from(square_width);
    let dy = (cell.0 as isize - target.0) as f64 * width;
    let dx = (cell.1 as isize - target.1) as f64 * width;
    (dx * dx + dy * dy).sqrt()
}
