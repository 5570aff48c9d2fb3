use std::time::Duration;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    /// Every direction, in the fixed order used for neighbor enumeration.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Row offset of a single step in this direction. Rows grow downwards.
    pub fn step_row(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }

    /// Column offset of a single step in this direction.
    pub fn step_col(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }
}

/// Enum for maze layout cell tags.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CellTag {
    /// Wall
    Wall = 1,
    /// Empty open space
    Open = 2,
    /// Normal dot
    Dot = 3,
    /// Energizer (power pellet)
    Energizer = 4,
    /// Where pacman starts each round
    AgentStart = 5,
    /// Anchor cell of the ghost pen
    GhostStart = 6,
}

impl CellTag {
    pub fn is_wall(self) -> bool {
        self == CellTag::Wall
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, CellTag::Dot | CellTag::Energizer)
    }
}

// maze geometry
pub const MAZE_DIMENSION: usize = 23;
pub const TUNNEL_ROW: usize = 11;
pub const SQ_WIDTH: u32 = 25;
pub const PACMAN_SPEED: u32 = 25;

// game params
pub const STARTING_LIVES: u8 = 3;
pub const TOTAL_COLLECTIBLES: u32 = 186;
pub const DOT_SCORE: u32 = 10;
pub const ENERGIZER_SCORE: u32 = 100;
pub const GHOST_SCORE: u32 = 200;
pub const DEFAULT_SEED: u64 = 0x5eed_1e55;

// timing; mode limits are tick counts at the default tick duration
pub const TICK_DURATION: Duration = Duration::from_millis(300);
pub const CHASE_LIMIT: u32 = 34;
pub const SCATTER_LIMIT: u32 = 57;
pub const FRIGHTENED_LIMIT: u32 = 24;
pub const PEN_RELEASE_INTERVAL: Duration = Duration::from_secs(5);

const_assert!(SCATTER_LIMIT > CHASE_LIMIT);
const_assert!(TUNNEL_ROW < MAZE_DIMENSION);
const_assert!(PACMAN_SPEED == SQ_WIDTH);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_order_starts_with_left() {
        assert_eq!(
            Direction::ALL,
            [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
        );
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(u8::from(direction) as usize, index);
        }
    }
}
