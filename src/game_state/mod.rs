pub mod env;
pub mod mode;
pub mod pen;
#[cfg(feature = "python")]
pub mod py_wrappers;
pub mod score;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    collideable::{Collectible, Occupant, Outcome},
    config::GameConfig,
    error::{LayoutError, SetupError},
    ghost_agent::{GhostAgent, GhostColor, GhostState},
    ghost_paths::{GHOST_INIT_DIR, STARTS_IN_PEN},
    grid::{Grid, Layout},
    mover::{step_target, try_move},
    pacman::Pacman,
    variables::{CellTag, Direction},
};

pub use self::{
    mode::{Mode, ModeController},
    pen::PenScheduler,
    score::{ScoreTracker, Terminal},
};

/// The counters every per-tick component reads or updates, owned by the tick loop.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub mode: ModeController,
    pub score: ScoreTracker,
    pub pen: PenScheduler,
}

impl SimulationState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            mode: ModeController::new(config),
            score: ScoreTracker::new(config.total_collectibles, config.starting_lives),
            pen: PenScheduler::new(config.pen_release_interval),
        }
    }
}

/// Something that happened during a tick that a renderer may want to show.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameEvent {
    /// A dot or energizer was eaten and removed from `pos`.
    Collected { pos: (usize, usize), kind: Collectible },
    GhostCaptured(GhostColor),
    GhostReleased(GhostColor),
    /// Pacman was caught. Unless that was the last life, the board has been rebuilt.
    LifeLost,
    ModeChanged { from: Mode, to: Mode },
}

/// The outcome of one call to [`GameState::tick`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickResult {
    pub score_delta: i64,
    pub lives_delta: i32,
    pub collected_total: u32,
    pub terminal: Option<Terminal>,
    pub events: Vec<GameEvent>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flow {
    Continue,
    RoundOver,
}

#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    layout: Layout,
    grid: Grid,
    pacman: Pacman,
    ghosts: [GhostAgent; 4],
    state: SimulationState,
    /// The latest direction requested by the player, consumed by the next tick.
    intent: Option<Direction>,
    rng: StdRng,
    ticks: u64,
    terminal: Option<Terminal>,
}

impl GameState {
    /// Validates `config` against `layout`, builds the board and places every entity.
    pub fn new(layout: Layout, config: GameConfig) -> Result<Self, SetupError> {
        config.validate()?;
        if layout.size() != config.grid_size {
            return Err(LayoutError::WrongRowCount {
                expected: config.grid_size,
                actual: layout.size(),
            }
            .into());
        }
        let pacman_start = layout.find_unique(
            CellTag::AgentStart,
            LayoutError::MissingAgentStart,
            LayoutError::DuplicateAgentStart,
        )?;
        let ghost_start = layout.find_unique(
            CellTag::GhostStart,
            LayoutError::MissingGhostStart,
            LayoutError::DuplicateGhostStart,
        )?;
        let collectibles = layout.collectible_count();
        if collectibles != config.total_collectibles {
            return Err(LayoutError::CollectibleCount {
                declared: config.total_collectibles,
                actual: collectibles,
            }
            .into());
        }

        let open_cell = |name: &'static str, pos: (isize, isize)| {
            let size = layout.size() as isize;
            if (0..size).contains(&pos.0)
                && (0..size).contains(&pos.1)
                && !layout.tag(pos.0 as usize, pos.1 as usize).is_wall()
            {
                Ok((pos.0 as usize, pos.1 as usize))
            } else {
                Err(LayoutError::BlockedCell { name, pos })
            }
        };
        let ghosts = array_init::try_array_init(|i| {
            let (row_offset, col_offset) = config.ghost_start_offsets[i];
            let start = open_cell(
                "ghost start",
                (
                    ghost_start.0 as isize + row_offset,
                    ghost_start.1 as isize + col_offset,
                ),
            )?;
            let state = if STARTS_IN_PEN[i] {
                GhostState::Penned
            } else {
                GhostState::Active
            };
            Ok::<_, LayoutError>(GhostAgent::new(GhostColor::ALL[i], start, state, GHOST_INIT_DIR))
        })?;
        for (name, (row, col)) in [
            ("pen release", config.pen_release_point),
            ("pen park", config.pen_park_point),
        ] {
            open_cell(name, (row as isize, col as isize))?;
        }

        let mut game_state = Self {
            grid: Grid::from_layout(&layout, config.tunnel_row),
            pacman: Pacman::new(pacman_start),
            ghosts,
            state: SimulationState::new(&config),
            intent: None,
            rng: StdRng::seed_from_u64(config.rng_seed),
            ticks: 0,
            terminal: None,
            layout,
            config,
        };
        game_state.start_round();
        info!(
            "game initialized: {}x{} grid, {} collectibles, pacman at {:?}",
            game_state.config.grid_size,
            game_state.config.grid_size,
            collectibles,
            pacman_start
        );
        Ok(game_state)
    }

    /// Builds a game on the bundled maze.
    pub fn with_default_layout(config: GameConfig) -> Result<Self, SetupError> {
        let layout = Layout::parse(crate::grid::DEFAULT_LAYOUT, config.grid_size)?;
        Self::new(layout, config)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    pub fn ghosts(&self) -> &[GhostAgent; 4] {
        &self.ghosts
    }

    pub fn ghost(&self, color: GhostColor) -> &GhostAgent {
        &self.ghosts[color.index()]
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode.mode()
    }

    pub fn is_frightened(&self) -> bool {
        self.state.mode.is_frightened()
    }

    pub fn score(&self) -> u64 {
        self.state.score.points()
    }

    pub fn lives(&self) -> u8 {
        self.state.score.lives()
    }

    pub fn collected(&self) -> u32 {
        self.state.score.collected()
    }

    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    /// Number of ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Buffers the player's desired direction. Only the latest intent is kept; it is read once,
    /// at the start of the next tick.
    pub fn set_intent(&mut self, direction: Direction) {
        self.intent = Some(direction);
    }

    /// Advances the simulation by one step. Once the game is won or lost nothing moves anymore.
    pub fn tick(&mut self) -> TickResult {
        let points_before = self.state.score.points();
        let lives_before = self.state.score.lives();
        let mut events = Vec::new();

        if self.terminal.is_none() {
            self.ticks += 1;
            self.release_from_pen(&mut events);
            self.move_pacman();
            // Checking both before and after the ghosts move catches pacman and a ghost
            // swapping cells within one tick.
            if self.arbitrate(&mut events) == Flow::Continue {
                self.move_ghosts(&mut events);
                self.arbitrate(&mut events);
            }
            self.terminal = self.state.score.terminal();
            if let Some(terminal) = self.terminal {
                info!(
                    "game over after {} ticks: {:?} with score {}",
                    self.ticks,
                    terminal,
                    self.state.score.points()
                );
            }
        }

        TickResult {
            score_delta: (self.state.score.points() - points_before) as i64,
            lives_delta: i32::from(self.state.score.lives()) - i32::from(lives_before),
            collected_total: self.state.score.collected(),
            terminal: self.terminal,
            events,
        }
    }
}

// separate impl block for the steps of a tick
impl GameState {
    /// Rebuilds the board for a new round. Score and lives are untouched.
    fn start_round(&mut self) {
        self.grid = Grid::from_layout(&self.layout, self.config.tunnel_row);
        self.pacman.respawn();
        self.intent = None;
        self.state.mode.reset();
        self.state.pen.reset();
        self.state.score.reset_collected();
        for ghost in &mut self.ghosts {
            ghost.respawn();
            if ghost.is_on_field() {
                self.grid
                    .register_occupant(ghost.pos.0, ghost.pos.1, Occupant::Ghost(ghost.color()));
            } else {
                self.state.pen.push(ghost.color());
            }
        }
    }

    /// Lets the oldest penned ghost out once the release interval has passed.
    fn release_from_pen(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(color) = self.state.pen.tick(self.config.tick_duration) {
            let (row, col) = self.config.pen_release_point;
            self.ghosts[color.index()].release((row, col), self.state.mode.is_frightened());
            self.grid.register_occupant(row, col, Occupant::Ghost(color));
            debug!("{color:?} ghost released at {:?}", (row, col));
            events.push(GameEvent::GhostReleased(color));
        }
    }

    /// Applies the buffered intent if it points somewhere pacman can go, then moves pacman.
    fn move_pacman(&mut self) {
        if let Some(intent) = self.intent.take() {
            if step_target(&self.grid, self.pacman.pos, intent).is_some() {
                self.pacman.direction = Some(intent);
            }
        }
        if let Some(direction) = self.pacman.direction {
            try_move(&self.grid, &mut self.pacman, direction);
        }
    }

    /// Resolves everything registered on pacman's cell, in registration order.
    fn arbitrate(&mut self, events: &mut Vec<GameEvent>) -> Flow {
        let (row, col) = self.pacman.pos;
        let occupants = self.grid.occupants_at(row, col).to_vec();
        for occupant in occupants {
            match occupant.effect(self.state.mode.is_frightened(), &self.config) {
                Outcome::Collected { kind, points } => {
                    self.grid.remove_occupant(row, col, occupant);
                    self.state.score.record_collectible(points);
                    events.push(GameEvent::Collected {
                        pos: (row, col),
                        kind,
                    });
                    if kind == Collectible::Energizer {
                        self.become_frightened(events);
                    }
                }
                Outcome::GhostCaptured { ghost, points } => {
                    self.state.score.add_points(points);
                    self.capture(ghost);
                    events.push(GameEvent::GhostCaptured(ghost));
                }
                Outcome::LifeLost => {
                    self.lose_life(events);
                    return Flow::RoundOver;
                }
            }
        }
        self.grid.clear_occupants(row, col);
        Flow::Continue
    }

    /// Advances the mode counters, then moves every ghost on the field towards its target.
    fn move_ghosts(&mut self, events: &mut Vec<GameEvent>) {
        let previous = self.state.mode.mode();
        let tick_mode = self.state.mode.advance();
        let pacman_pos = self.pacman.pos;
        let targets: [Option<(isize, isize)>; 4] = array_init::array_init(|i| {
            self.state.mode.target(GhostColor::ALL[i], tick_mode, pacman_pos)
        });
        for (ghost, target) in self.ghosts.iter_mut().zip(targets) {
            if ghost.is_on_field() {
                ghost.update(&mut self.grid, target, self.config.square_width, &mut self.rng);
            }
        }
        self.sync_ghost_states();
        self.note_mode_change(previous, events);
    }

    /// Frightens all of the ghosts on the field.
    fn become_frightened(&mut self, events: &mut Vec<GameEvent>) {
        let previous = self.state.mode.mode();
        self.state.mode.become_frightened();
        self.sync_ghost_states();
        self.note_mode_change(previous, events);
    }

    fn sync_ghost_states(&mut self) {
        let state = if self.state.mode.is_frightened() {
            GhostState::Frightened
        } else {
            GhostState::Active
        };
        for ghost in self.ghosts.iter_mut().filter(|ghost| ghost.is_on_field()) {
            ghost.state = state;
        }
    }

    fn note_mode_change(&self, previous: Mode, events: &mut Vec<GameEvent>) {
        let current = self.state.mode.mode();
        if current != previous {
            debug!("mode {previous:?} -> {current:?} at tick {}", self.ticks);
            events.push(GameEvent::ModeChanged {
                from: previous,
                to: current,
            });
        }
    }

    /// Sends an eaten ghost to the back of the pen queue.
    fn capture(&mut self, color: GhostColor) {
        let ghost = &mut self.ghosts[color.index()];
        self.grid
            .remove_occupant(ghost.pos.0, ghost.pos.1, Occupant::Ghost(color));
        ghost.send_to_pen(self.config.pen_park_point);
        self.state.pen.push(color);
        debug!("{color:?} ghost captured; {} in the pen", self.state.pen.len());
    }

    /// Takes a life and, if any are left, starts a new round.
    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        let lives = self.state.score.lose_life();
        events.push(GameEvent::LifeLost);
        info!("pacman caught at {:?}; {lives} lives left", self.pacman.pos);
        if lives > 0 {
            let previous = self.state.mode.mode();
            self.start_round();
            self.note_mode_change(previous, events);
        }
    }
}
