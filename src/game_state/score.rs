#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Terminal {
    Won,
    Lost,
}

/// Collectible, point and life counters. Terminal state is derived from them.
#[derive(Clone, Debug)]
pub struct ScoreTracker {
    collected: u32,
    points: u64,
    lives: u8,
    total_collectibles: u32,
}

impl ScoreTracker {
    pub fn new(total_collectibles: u32, lives: u8) -> Self {
        Self {
            collected: 0,
            points: 0,
            lives,
            total_collectibles,
        }
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Counts one eaten dot or energizer.
    pub fn record_collectible(&mut self, points: u32) {
        self.collected += 1;
        self.add_points(points);
    }

    pub fn add_points(&mut self, points: u32) {
        self.points += u64::from(points);
    }

    /// Takes away a life and returns how many are left.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Collectibles come back when the board is rebuilt after a lost life.
    pub fn reset_collected(&mut self) {
        self.collected = 0;
    }

    pub fn terminal(&self) -> Option<Terminal> {
        if self.collected >= self.total_collectibles {
            Some(Terminal::Won)
        } else if self.lives == 0 {
            Some(Terminal::Lost)
        } else {
            None
        }
    }
}
