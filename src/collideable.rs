use crate::{config::GameConfig, ghost_agent::GhostColor};

/// Kinds of items pacman eats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collectible {
    Dot,
    Energizer,
}

/// Something registered in a grid cell that reacts when pacman enters it.
/// Ghosts are referenced by handle; the ghosts themselves live in the game state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Occupant {
    Dot,
    Energizer,
    Ghost(GhostColor),
}

/// What resolving one occupant does to the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The item is eaten and scored. An energizer also starts the frightened interrupt.
    Collected { kind: Collectible, points: u32 },
    /// A frightened ghost is eaten and sent back to the pen.
    GhostCaptured { ghost: GhostColor, points: u32 },
    /// A ghost catches pacman.
    LifeLost,
}

impl Occupant {
    pub fn is_collectible(self) -> bool {
        matches!(self, Occupant::Dot | Occupant::Energizer)
    }

    /// The effect of pacman colliding with this occupant.
    pub fn effect(self, frightened: bool, config: &GameConfig) -> Outcome {
        match self {
            Occupant::Dot => Outcome::Collected {
                kind: Collectible::Dot,
                points: config.dot_score,
            },
            Occupant::Energizer => Outcome::Collected {
                kind: Collectible::Energizer,
                points: config.energizer_score,
            },
            Occupant::Ghost(ghost) if frightened => Outcome::GhostCaptured {
                ghost,
                points: config.ghost_score,
            },
            Occupant::Ghost(_) => Outcome::LifeLost,
        }
    }
}
