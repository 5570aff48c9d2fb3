use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{config::GameConfig, ghost_agent::GhostColor};

#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Mode {
    Scatter = 1,
    Chase = 2,
    Frightened = 3,
}

/// Tick-counted Chase/Scatter cycle with the Frightened interrupt on top.
///
/// The base counter drives the Chase/Scatter cycle and is frozen while Frightened is active, so
/// an interrupt never skips a phase. The frightened counter only runs during the interrupt.
#[derive(Clone, Debug)]
pub struct ModeController {
    mode: Mode,
    frightened: bool,
    base_counter: u32,
    frightened_counter: u32,
    chase_limit: u32,
    scatter_limit: u32,
    frightened_limit: u32,
    chase_offsets: (isize, isize, isize),
    scatter_corners: [(isize, isize); 4],
}

impl ModeController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            mode: Mode::Chase,
            frightened: false,
            base_counter: 0,
            frightened_counter: 0,
            chase_limit: config.chase_limit,
            scatter_limit: config.scatter_limit,
            frightened_limit: config.frightened_limit,
            chase_offsets: config.chase_offsets,
            scatter_corners: config.scatter_corners,
        }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether the Frightened interrupt is active.
    pub fn is_frightened(&self) -> bool {
        self.frightened
    }

    pub fn base_counter(&self) -> u32 {
        self.base_counter
    }

    pub fn frightened_counter(&self) -> u32 {
        self.frightened_counter
    }

    /// Starts (or restarts) the Frightened interrupt. Called when pacman eats an energizer.
    pub fn become_frightened(&mut self) {
        self.frightened = true;
        self.frightened_counter = 0;
        self.mode = Mode::Frightened;
    }

    /// The phase of the Chase/Scatter cycle the base counter points at.
    fn base_mode(&self) -> Mode {
        if self.base_counter >= self.chase_limit {
            Mode::Scatter
        } else {
            Mode::Chase
        }
    }

    /// Advances the counters by one tick and returns the mode the ghosts use for this tick.
    pub fn advance(&mut self) -> Mode {
        if self.frightened {
            self.frightened_counter += 1;
            if self.frightened_counter >= self.frightened_limit {
                self.frightened = false;
                self.frightened_counter = 0;
                self.mode = self.base_mode();
            }
            return Mode::Frightened;
        }

        self.base_counter += 1;
        if self.base_counter >= self.scatter_limit {
            self.base_counter = 0;
        }
        self.mode = self.base_mode();
        self.mode
    }

    /// The cell `ghost` aims for in `mode`, or None when it should evade instead.
    pub fn target(&self, ghost: GhostColor, mode: Mode, pacman_pos: (usize, usize)) -> Option<(isize, isize)> {
        let (row, col) = (pacman_pos.0 as isize, pacman_pos.1 as isize);
        let (k1, k2, k3) = self.chase_offsets;
        match mode {
            Mode::Chase => Some(match ghost {
                GhostColor::Orange => (row - k1, col),
                GhostColor::Red => (row, col),
                GhostColor::Pink => (row + 1, col - k2),
                GhostColor::Cyan => (row, col + k3),
            }),
            Mode::Scatter => Some(self.scatter_corners[ghost.index()]),
            Mode::Frightened => None,
        }
    }

    /// Back to the start of the Chase phase with no interrupt.
    pub fn reset(&mut self) {
        self.mode = Mode::Chase;
        self.frightened = false;
        self.base_counter = 0;
        self.frightened_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ModeController {
        ModeController::new(&GameConfig::default())
    }

    #[test]
    fn cycles_between_chase_and_scatter() {
        let config = GameConfig::default();
        let mut modes = controller();
        assert_eq!(modes.mode(), Mode::Chase);

        for _ in 0..config.chase_limit - 1 {
            assert_eq!(modes.advance(), Mode::Chase);
        }
        assert_eq!(modes.advance(), Mode::Scatter);
        assert_eq!(modes.base_counter(), config.chase_limit);

        for _ in config.chase_limit..config.scatter_limit - 1 {
            assert_eq!(modes.advance(), Mode::Scatter);
        }
        assert_eq!(modes.advance(), Mode::Chase);
        assert_eq!(modes.base_counter(), 0);
    }

    #[test]
    fn frightened_interrupts_and_resumes() {
        let config = GameConfig::default();
        let mut modes = controller();
        for _ in 0..10 {
            modes.advance();
        }

        modes.become_frightened();
        assert_eq!(modes.mode(), Mode::Frightened);
        for _ in 0..config.frightened_limit {
            assert_eq!(modes.advance(), Mode::Frightened);
        }
        assert!(!modes.is_frightened());
        assert_eq!(modes.frightened_counter(), 0);
        // the base cycle did not move during the interrupt
        assert_eq!(modes.base_counter(), 10);
        assert_eq!(modes.mode(), Mode::Chase);
        assert_eq!(modes.advance(), Mode::Chase);
        assert_eq!(modes.base_counter(), 11);
    }

    #[test]
    fn second_energizer_restarts_interrupt() {
        let config = GameConfig::default();
        let mut modes = controller();
        modes.become_frightened();
        for _ in 0..config.frightened_limit - 1 {
            modes.advance();
        }
        modes.become_frightened();
        for _ in 0..config.frightened_limit - 1 {
            assert_eq!(modes.advance(), Mode::Frightened);
            assert!(modes.is_frightened());
        }
        modes.advance();
        assert!(!modes.is_frightened());
    }

    #[test]
    fn interrupt_ending_in_scatter_resumes_scatter() {
        let config = GameConfig::default();
        let mut modes = controller();
        for _ in 0..config.chase_limit {
            modes.advance();
        }
        modes.become_frightened();
        for _ in 0..config.frightened_limit {
            modes.advance();
        }
        assert_eq!(modes.mode(), Mode::Scatter);
    }

    #[test]
    fn targets_follow_mode() {
        let modes = controller();
        let pacman = (17, 11);
        assert_eq!(
            modes.target(GhostColor::Orange, Mode::Chase, pacman),
            Some((13, 11))
        );
        assert_eq!(
            modes.target(GhostColor::Red, Mode::Chase, pacman),
            Some((17, 11))
        );
        assert_eq!(
            modes.target(GhostColor::Pink, Mode::Chase, pacman),
            Some((18, 8))
        );
        assert_eq!(
            modes.target(GhostColor::Cyan, Mode::Chase, pacman),
            Some((17, 13))
        );
        assert_eq!(
            modes.target(GhostColor::Red, Mode::Scatter, pacman),
            Some((22, 1))
        );
        for ghost in GhostColor::ALL {
            assert_eq!(modes.target(ghost, Mode::Frightened, pacman), None);
        }
    }

    #[test]
    fn targets_use_configured_offsets_and_corners() {
        let config = GameConfig {
            chase_offsets: (2, 5, 1),
            scatter_corners: [(0, 0), (0, 8), (8, 0), (8, 8)],
            ..GameConfig::default()
        };
        let modes = ModeController::new(&config);
        let pacman = (6, 6);
        assert_eq!(modes.target(GhostColor::Orange, Mode::Chase, pacman), Some((4, 6)));
        assert_eq!(modes.target(GhostColor::Pink, Mode::Chase, pacman), Some((7, 1)));
        assert_eq!(modes.target(GhostColor::Cyan, Mode::Chase, pacman), Some((6, 7)));
        assert_eq!(modes.target(GhostColor::Pink, Mode::Scatter, pacman), Some((8, 0)));
    }
}
