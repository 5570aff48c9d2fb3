use crate::{mover::Mobile, variables::Direction};

#[derive(Clone, Debug)]
pub struct Pacman {
    pub pos: (usize, usize),
    /// None until the player gives a first valid direction; pacman stands still until then.
    pub direction: Option<Direction>,
    start_pos: (usize, usize),
}

impl Pacman {
    pub fn new(start_pos: (usize, usize)) -> Self {
        Self {
            pos: start_pos,
            direction: None,
            start_pos,
        }
    }

    pub fn respawn(&mut self) {
        self.pos = self.start_pos;
        self.direction = None;
    }

    /// The pixel position of pacman's centre.
    pub fn pixel_pos(&self, square_width: u32) -> (f64, f64) {
        let width = f64::from(square_width);
        let (row, col) = self.pos;
        (col as f64 * width + width / 2.0, row as f64 * width + width / 2.0)
    }
}

impl Mobile for Pacman {
    fn cell(&self) -> (usize, usize) {
        self.pos
    }

    fn set_cell(&mut self, cell: (usize, usize)) {
        self.pos = cell;
    }
}
