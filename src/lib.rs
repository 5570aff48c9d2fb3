pub mod collideable;
pub mod config;
pub mod error;
pub mod game_state;
pub mod ghost_agent;
pub mod ghost_paths;
pub mod grid;
pub mod mover;
pub mod pacman;
pub mod variables;

pub use config::GameConfig;
pub use error::{ConfigError, LayoutError, SetupError};
pub use game_state::{GameEvent, GameState, TickResult};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module exposing the Rust pacman simulation.
#[cfg(feature = "python")]
#[pymodule]
fn pacman_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<game_state::py_wrappers::PyGameState>()?;
    Ok(())
}
