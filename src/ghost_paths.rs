use crate::variables::Direction::{self, *};

// Chase targets are offsets from pacman's cell. Orange aims K1 rows above pacman, Red aims at
// pacman itself, Pink aims one row below and K2 columns to the left, and Cyan aims K3 columns to
// the right.

pub const ORANGE_CHASE_ROW_OFFSET: isize = 4;
pub const PINK_CHASE_COL_OFFSET: isize = 3;
pub const CYAN_CHASE_COL_OFFSET: isize = 2;

// These are the (row, col) cells the ghosts attempt to move towards when they are in scatter mode.

pub const ORANGE_SCATTER_POS: (isize, isize) = (1, 1);
pub const RED_SCATTER_POS: (isize, isize) = (22, 1);
pub const PINK_SCATTER_POS: (isize, isize) = (1, 22);
pub const CYAN_SCATTER_POS: (isize, isize) = (22, 22);

// These are the locations the ghosts begin in at the start of a round, relative to the ghost
// start cell of the layout. Red begins outside the pen; the others wait in the pen queue.

pub const ORANGE_START_OFFSET: (isize, isize) = (0, 0);
pub const RED_START_OFFSET: (isize, isize) = (-2, 0);
pub const PINK_START_OFFSET: (isize, isize) = (0, -1);
pub const CYAN_START_OFFSET: (isize, isize) = (1, 0);

/// Whether each ghost (Orange, Red, Pink, Cyan) waits in the pen when a round begins. Penned
/// ghosts are queued for release in this order.
pub const STARTS_IN_PEN: [bool; 4] = [true, false, true, true];

pub const GHOST_INIT_DIR: Direction = Up;

/// The field cell a ghost is placed on when the pen releases it.
pub const PEN_RELEASE_POS: (usize, usize) = (8, 11);

/// The cell a ghost is parked at after pacman captures it.
pub const PEN_PARK_POS: (usize, usize) = (10, 10);
