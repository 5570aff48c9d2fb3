use ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::{exceptions::PyValueError, prelude::*};

use super::env::{Action, PacmanEnv};
use super::{GameState, Terminal};
use crate::{
    collideable::Occupant,
    config::GameConfig,
    variables::{CellTag, Direction},
};

impl<'source> FromPyObject<'source> for Action {
    fn extract(ob: &'source PyAny) -> PyResult<Self> {
        let index: u8 = ob.extract()?;
        Action::try_from(index).map_err(|_| PyValueError::new_err("Invalid action"))
    }
}

/// Python handle to a game on the bundled maze.
#[pyclass(name = "GameState", unsendable)]
pub struct PyGameState {
    env: PacmanEnv,
}

#[pymethods]
impl PyGameState {
    #[new]
    #[pyo3(signature = (seed = None))]
    fn new(seed: Option<u64>) -> PyResult<Self> {
        let mut config = GameConfig::default();
        if let Some(seed) = seed {
            config.rng_seed = seed;
        }
        let game_state = GameState::with_default_layout(config)
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(Self {
            env: PacmanEnv::new(game_state, false),
        })
    }

    fn reset(&mut self) {
        self.env.reset();
    }

    /// Buffers a direction for the next tick (0 = left, 1 = right, 2 = up, 3 = down).
    fn set_intent(&mut self, direction: u8) -> PyResult<()> {
        let direction =
            Direction::try_from(direction).map_err(|_| PyValueError::new_err("Invalid direction"))?;
        self.env.game_state.set_intent(direction);
        Ok(())
    }

    /// Advances the game by one tick.
    /// Returns (score_delta, lives_delta, collected_total, terminal), where terminal is
    /// "won", "lost" or None.
    fn tick(&mut self) -> (i64, i32, u32, Option<&'static str>) {
        let result = self.env.game_state.tick();
        let terminal = result.terminal.map(|terminal| match terminal {
            Terminal::Won => "won",
            Terminal::Lost => "lost",
        });
        (
            result.score_delta,
            result.lives_delta,
            result.collected_total,
            terminal,
        )
    }

    /// Performs an action and ticks the game once.
    /// Returns (reward, done).
    fn step(&mut self, action: Action) -> (i64, bool) {
        self.env.step(action)
    }

    #[getter]
    fn score(&self) -> u64 {
        self.env.score()
    }

    #[getter]
    fn lives(&self) -> u8 {
        self.env.game_state.lives()
    }

    #[getter]
    fn done(&self) -> bool {
        self.env.is_done()
    }

    /// The current mode as an integer (1 = scatter, 2 = chase, 3 = frightened).
    #[getter]
    fn mode(&self) -> u8 {
        self.env.game_state.mode().into()
    }

    #[getter]
    fn pacman_pos(&self) -> (usize, usize) {
        self.env.game_state.pacman().pos
    }

    /// Positions of the ghosts in the order orange, red, pink, cyan; None for penned ghosts.
    #[getter]
    fn ghost_positions(&self) -> Vec<Option<(usize, usize)>> {
        self.env
            .game_state
            .ghosts()
            .iter()
            .map(|ghost| ghost.is_on_field().then_some(ghost.pos))
            .collect()
    }

    /// The board as a 2D array of cell tag values (walls, open cells, remaining dots and
    /// energizers).
    fn grid_tags<'py>(&self, py: Python<'py>) -> &'py PyArray2<u8> {
        let grid = self.env.game_state.grid();
        let size = grid.size();
        let tags = Array2::from_shape_fn((size, size), |(row, col)| {
            let tag = if !grid.is_open(row, col) {
                CellTag::Wall
            } else if grid.occupants_at(row, col).contains(&Occupant::Energizer) {
                CellTag::Energizer
            } else if grid.occupants_at(row, col).contains(&Occupant::Dot) {
                CellTag::Dot
            } else {
                CellTag::Open
            };
            u8::from(tag)
        });
        tags.into_pyarray(py)
    }

    fn render(&self) -> String {
        self.env.render()
    }
}
