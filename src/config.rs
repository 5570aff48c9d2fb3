use std::time::Duration;

use crate::{
    error::ConfigError,
    ghost_paths::*,
    variables::{
        CHASE_LIMIT, DEFAULT_SEED, DOT_SCORE, ENERGIZER_SCORE, FRIGHTENED_LIMIT, GHOST_SCORE,
        MAZE_DIMENSION, PACMAN_SPEED, PEN_RELEASE_INTERVAL, SCATTER_LIMIT, SQ_WIDTH,
        STARTING_LIVES, TICK_DURATION, TOTAL_COLLECTIBLES, TUNNEL_ROW,
    },
};

/// Every tunable of a simulation. `Default` reproduces the reference game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Width and height of the square grid, in cells.
    pub grid_size: usize,
    /// The only row on which horizontal wrap-around is allowed.
    pub tunnel_row: usize,
    /// Side length of one cell, in pixels.
    pub square_width: u32,
    /// Distance covered by one move, in pixels. Must equal `square_width`.
    pub move_speed: u32,
    /// Wall-clock length of one tick.
    pub tick_duration: Duration,
    /// Base-cycle tick at which Chase gives way to Scatter.
    pub chase_limit: u32,
    /// Base-cycle tick at which the cycle restarts in Chase.
    pub scatter_limit: u32,
    /// Number of ticks a Frightened interrupt lasts.
    pub frightened_limit: u32,
    /// Time between two pen releases.
    pub pen_release_interval: Duration,
    /// Number of dots and energizers the layout must contain.
    pub total_collectibles: u32,
    pub starting_lives: u8,
    pub dot_score: u32,
    pub energizer_score: u32,
    pub ghost_score: u32,
    /// Chase offsets K1 (Orange, rows), K2 (Pink, columns) and K3 (Cyan, columns).
    pub chase_offsets: (isize, isize, isize),
    /// Scatter corners, indexed by ghost.
    pub scatter_corners: [(isize, isize); 4],
    /// Start cells relative to the layout's ghost start cell, indexed by ghost.
    pub ghost_start_offsets: [(isize, isize); 4],
    pub pen_release_point: (usize, usize),
    pub pen_park_point: (usize, usize),
    /// Seed of the random source used by frightened ghosts.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: MAZE_DIMENSION,
            tunnel_row: TUNNEL_ROW,
            square_width: SQ_WIDTH,
            move_speed: PACMAN_SPEED,
            tick_duration: TICK_DURATION,
            chase_limit: CHASE_LIMIT,
            scatter_limit: SCATTER_LIMIT,
            frightened_limit: FRIGHTENED_LIMIT,
            pen_release_interval: PEN_RELEASE_INTERVAL,
            total_collectibles: TOTAL_COLLECTIBLES,
            starting_lives: STARTING_LIVES,
            dot_score: DOT_SCORE,
            energizer_score: ENERGIZER_SCORE,
            ghost_score: GHOST_SCORE,
            chase_offsets: (
                ORANGE_CHASE_ROW_OFFSET,
                PINK_CHASE_COL_OFFSET,
                CYAN_CHASE_COL_OFFSET,
            ),
            scatter_corners: [
                ORANGE_SCATTER_POS,
                RED_SCATTER_POS,
                PINK_SCATTER_POS,
                CYAN_SCATTER_POS,
            ],
            ghost_start_offsets: [
                ORANGE_START_OFFSET,
                RED_START_OFFSET,
                PINK_START_OFFSET,
                CYAN_START_OFFSET,
            ],
            pen_release_point: PEN_RELEASE_POS,
            pen_park_point: PEN_PARK_POS,
            rng_seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Checks the values that cannot be checked against a layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tunnel_row >= self.grid_size {
            return Err(ConfigError::TunnelRowOutOfRange {
                tunnel_row: self.tunnel_row,
                grid_size: self.grid_size,
            });
        }
        if self.move_speed != self.square_width {
            return Err(ConfigError::SpeedMismatch {
                move_speed: self.move_speed,
                square_width: self.square_width,
            });
        }
        if self.tick_duration.is_zero() {
            return Err(ConfigError::ZeroTickDuration);
        }
        if self.chase_limit == 0 {
            return Err(ConfigError::ZeroChaseLimit);
        }
        if self.scatter_limit <= self.chase_limit {
            return Err(ConfigError::ScatterBeforeChase {
                chase: self.chase_limit,
                scatter: self.scatter_limit,
            });
        }
        if self.frightened_limit == 0 {
            return Err(ConfigError::ZeroFrightenedLimit);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        for (name, pos) in [
            ("pen release", self.pen_release_point),
            ("pen park", self.pen_park_point),
        ] {
            if pos.0 >= self.grid_size || pos.1 >= self.grid_size {
                return Err(ConfigError::PointOutOfRange { name, pos });
            }
        }
        Ok(())
    }

    /// Ticks needed for the pen to accumulate one release interval.
    pub fn ticks_per_release(&self) -> u32 {
        let ticks = self.pen_release_interval.as_secs_f64() / self.tick_duration.as_secs_f64();
        ticks.ceil() as u32
    }
}
