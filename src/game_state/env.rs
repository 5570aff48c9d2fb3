use std::{fmt::Write, thread, time::Instant};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{collideable::Occupant, ghost_agent::GhostColor, variables::Direction};

use super::{GameState, Terminal};

#[derive(Clone, Copy, Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Action {
    Stay = 0,
    Down = 1,
    Up = 2,
    Left = 3,
    Right = 4,
}

impl Action {
    /// The intent this action sends to the game, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Stay => None,
            Action::Down => Some(Direction::Down),
            Action::Up => Some(Direction::Up),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
        }
    }
}

/// How a call to [`PacmanEnv::run`] ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u64,
    pub lives: u8,
    pub terminal: Option<Terminal>,
}

/// Drives a [`GameState`] one tick per step, optionally paced to wall-clock time.
#[derive(Clone, Debug)]
pub struct PacmanEnv {
    pub game_state: GameState,
    initial_state: GameState,
    /// Whether `run` sleeps so that each tick lasts the configured tick duration.
    pub paced: bool,
}

impl PacmanEnv {
    pub fn new(game_state: GameState, paced: bool) -> Self {
        Self {
            initial_state: game_state.clone(),
            game_state,
            paced,
        }
    }

    /// Puts the game back the way it was when the environment was created.
    pub fn reset(&mut self) {
        self.game_state = self.initial_state.clone();
    }

    /// Performs an action and ticks the game once.
    /// Returns (reward, done).
    pub fn step(&mut self, action: Action) -> (i64, bool) {
        if let Some(direction) = action.direction() {
            self.game_state.set_intent(direction);
        }
        let result = self.game_state.tick();
        (result.score_delta, result.terminal.is_some())
    }

    /// Steps until the game ends or `max_ticks` steps have been taken, asking `policy` for an
    /// action before every step.
    pub fn run(&mut self, max_ticks: u64, mut policy: impl FnMut(&GameState) -> Action) -> RunSummary {
        let tick_duration = self.game_state.config().tick_duration;
        let mut ticks = 0;
        while ticks < max_ticks && !self.is_done() {
            let started = Instant::now();
            let action = policy(&self.game_state);
            self.step(action);
            ticks += 1;
            if self.paced {
                thread::sleep(tick_duration.saturating_sub(started.elapsed()));
            }
        }
        RunSummary {
            ticks,
            score: self.score(),
            lives: self.game_state.lives(),
            terminal: self.game_state.terminal(),
        }
    }

    pub fn score(&self) -> u64 {
        self.game_state.score()
    }

    pub fn is_done(&self) -> bool {
        self.game_state.terminal().is_some()
    }

    /// Draws the board with ANSI colors, one text line per grid row, under a status line.
    pub fn render(&self) -> String {
        let game_state = &self.game_state;
        let mut out = String::new();

        // status line
        let _ = write!(
            out,
            "Score: {}  Lives: {}  Mode: {:?}",
            game_state.score(),
            game_state.lives(),
            game_state.mode()
        );
        if let Some(terminal) = game_state.terminal() {
            let _ = write!(out, "  [{terminal:?}]");
        }
        out.push('\n');

        let grid = game_state.grid();
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let (ch, style) = if (row, col) == game_state.pacman().pos {
                    ('@', "93")
                } else if let Some(color) = self.ghost_at((row, col)) {
                    let frightened = game_state.ghost(color).is_frightened();
                    let style = if frightened { "96" } else { "38;5;206" };
                    (['O', 'R', 'P', 'C'][color.index()], style)
                } else if !grid.is_open(row, col) {
                    ('#', "90")
                } else {
                    match grid.occupants_at(row, col).first() {
                        Some(Occupant::Dot) => ('.', ""),
                        Some(Occupant::Energizer) => ('o', ""),
                        _ => (' ', ""),
                    }
                };
                let _ = write!(out, "\x1b[{style}m{ch}\x1b[0m");
            }
            out.push('\n');
        }
        out
    }

    pub fn print_game_state(&self) {
        print!("{}", self.render());
    }

    /// The ghost on the field at `pos`, if any. Penned ghosts are never reported.
    pub fn ghost_at(&self, pos: (usize, usize)) -> Option<GhostColor> {
        self.game_state
            .ghosts()
            .iter()
            .find(|ghost| ghost.is_on_field() && ghost.pos == pos)
            .map(|ghost| ghost.color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn env() -> PacmanEnv {
        let game_state = GameState::with_default_layout(GameConfig::default()).unwrap();
        PacmanEnv::new(game_state, false)
    }

    #[test]
    fn actions_convert_from_indices() {
        assert_eq!(Action::try_from(3u8), Ok(Action::Left));
        assert!(Action::try_from(5u8).is_err());
        assert_eq!(Action::Stay.direction(), None);
        assert_eq!(Action::Down.direction(), Some(Direction::Down));
    }

    #[test]
    fn step_reports_reward() {
        let mut env = env();
        // pacman starts on a row of dots
        let (reward, done) = env.step(Action::Left);
        assert_eq!(reward, 10);
        assert!(!done);
        assert_eq!(env.game_state.pacman().pos, (17, 10));
    }

    #[test]
    fn reset_restores_the_initial_game() {
        let mut env = env();
        for _ in 0..5 {
            env.step(Action::Right);
        }
        assert!(env.score() > 0);
        env.reset();
        assert_eq!(env.score(), 0);
        assert_eq!(env.game_state.ticks(), 0);
        assert_eq!(env.game_state.pacman().pos, (17, 11));
    }

    #[test]
    fn run_stops_at_the_tick_limit() {
        let mut env = env();
        let summary = env.run(10, |_| Action::Stay);
        assert_eq!(summary.ticks, 10);
        assert_eq!(env.game_state.ticks(), 10);
        assert_eq!(summary.lives, env.game_state.lives());
    }

    #[test]
    fn render_draws_every_row() {
        let env = env();
        let text = env.render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 23);
        assert!(lines[0].starts_with("Score: 0  Lives: 3"));
        assert!(lines[18].contains('@'));
        assert_eq!(env.ghost_at((8, 11)), Some(GhostColor::Red));
        // orange waits in the pen at the ghost start cell and is not drawn
        assert_eq!(env.ghost_at((10, 11)), None);
        assert!(lines[1 + 8].contains("\x1b[38;5;206mR\x1b[0m"));
        assert!(!lines[1 + 10].contains('O'));
    }
}
