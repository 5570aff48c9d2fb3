//! Errors raised while setting up a game. Once a [`GameState`](crate::game_state::GameState)
//! exists, ticking it cannot fail.

use thiserror::Error;

/// A configuration value that cannot drive a simulation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be non-zero")]
    EmptyGrid,
    #[error("tunnel row {tunnel_row} is outside a {grid_size}x{grid_size} grid")]
    TunnelRowOutOfRange { tunnel_row: usize, grid_size: usize },
    #[error("move speed {move_speed}px must equal the square width {square_width}px")]
    SpeedMismatch { move_speed: u32, square_width: u32 },
    #[error("tick duration must be non-zero")]
    ZeroTickDuration,
    #[error("chase limit must be non-zero")]
    ZeroChaseLimit,
    #[error("scatter limit {scatter} must exceed chase limit {chase}")]
    ScatterBeforeChase { chase: u32, scatter: u32 },
    #[error("frightened limit must be non-zero")]
    ZeroFrightenedLimit,
    #[error("starting lives must be non-zero")]
    NoLives,
    #[error("{name} point {pos:?} is outside the grid")]
    PointOutOfRange { name: &'static str, pos: (usize, usize) },
}

/// A maze layout that does not describe a playable board.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LayoutError {
    #[error("layout has {actual} rows, expected {expected}")]
    WrongRowCount { expected: usize, actual: usize },
    #[error("layout row {row} has {actual} cells, expected {expected}")]
    WrongRowLength { row: usize, expected: usize, actual: usize },
    #[error("unknown layout character {ch:?} at ({row}, {col})")]
    UnknownCell { ch: char, row: usize, col: usize },
    #[error("layout has no pacman start cell")]
    MissingAgentStart,
    #[error("layout has more than one pacman start cell")]
    DuplicateAgentStart,
    #[error("layout has no ghost start cell")]
    MissingGhostStart,
    #[error("layout has more than one ghost start cell")]
    DuplicateGhostStart,
    #[error("layout places {actual} collectibles, configuration declares {declared}")]
    CollectibleCount { declared: u32, actual: u32 },
    #[error("{name} cell {pos:?} is not an open cell of the layout")]
    BlockedCell { name: &'static str, pos: (isize, isize) },
}

/// Any fatal problem found by [`GameState::new`](crate::game_state::GameState::new).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
