use std::{collections::VecDeque, time::Duration};

use crate::ghost_agent::GhostColor;

/// FIFO queue of ghosts waiting to return to the field, released one at a time on a timer.
#[derive(Clone, Debug)]
pub struct PenScheduler {
    queue: VecDeque<GhostColor>,
    elapsed: Duration,
    release_interval: Duration,
}

impl PenScheduler {
    pub fn new(release_interval: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            elapsed: Duration::ZERO,
            release_interval,
        }
    }

    /// Parks a ghost at the back of the queue.
    pub fn push(&mut self, ghost: GhostColor) {
        self.queue.push_back(ghost);
    }

    /// Adds `dt` to the accumulator. Once a full interval has built up and a ghost is waiting,
    /// returns the oldest ghost and starts accumulating again from zero.
    pub fn tick(&mut self, dt: Duration) -> Option<GhostColor> {
        self.elapsed += dt;
        if self.elapsed < self.release_interval {
            return None;
        }
        let ghost = self.queue.pop_front()?;
        self.elapsed = Duration::ZERO;
        Some(ghost)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, ghost: GhostColor) -> bool {
        self.queue.contains(&ghost)
    }

    /// Empties the queue and the accumulator.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn releases_in_fifo_order_on_the_interval() {
        let config = GameConfig::default();
        let mut pen = PenScheduler::new(config.pen_release_interval);
        pen.push(GhostColor::Orange);
        pen.push(GhostColor::Pink);

        let ticks = config.ticks_per_release();
        for _ in 0..ticks - 1 {
            assert_eq!(pen.tick(config.tick_duration), None);
        }
        assert_eq!(pen.tick(config.tick_duration), Some(GhostColor::Orange));
        for _ in 0..ticks - 1 {
            assert_eq!(pen.tick(config.tick_duration), None);
        }
        assert_eq!(pen.tick(config.tick_duration), Some(GhostColor::Pink));
        assert!(pen.is_empty());
    }

    #[test]
    fn empty_pen_keeps_accumulating() {
        let mut pen = PenScheduler::new(Duration::from_secs(1));
        for _ in 0..5 {
            assert_eq!(pen.tick(Duration::from_millis(500)), None);
        }
        pen.push(GhostColor::Cyan);
        assert_eq!(pen.tick(Duration::from_millis(500)), Some(GhostColor::Cyan));
    }
}
