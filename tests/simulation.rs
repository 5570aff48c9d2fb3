use std::collections::VecDeque;

use ndarray::Array2;
use pacman_rs::{
    game_state::{GameEvent, GameState, Mode, Terminal},
    grid::{Grid, Layout},
    variables::{CellTag, Direction, TOTAL_COLLECTIBLES},
    GameConfig,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

const SIZE: usize = 23;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A walled 23x23 square with an open interior.
fn open_board() -> Vec<Vec<CellTag>> {
    let mut rows = vec![vec![CellTag::Open; SIZE]; SIZE];
    for i in 0..SIZE {
        rows[0][i] = CellTag::Wall;
        rows[SIZE - 1][i] = CellTag::Wall;
        rows[i][0] = CellTag::Wall;
        rows[i][SIZE - 1] = CellTag::Wall;
    }
    rows
}

/// Direction of the first step on a shortest path from pacman to the nearest collectible.
fn towards_nearest_collectible(grid: &Grid, from: (usize, usize)) -> Option<Direction> {
    let mut first_steps: Array2<Option<Direction>> = Array2::from_elem((grid.size(), grid.size()), None);
    let mut queue = VecDeque::new();
    for (direction, next) in grid.open_neighbors(from) {
        first_steps[next] = Some(direction);
        queue.push_back((next, direction));
    }
    while let Some((cell, first_step)) = queue.pop_front() {
        if grid.occupants_at(cell.0, cell.1).iter().any(|o| o.is_collectible()) {
            return Some(first_step);
        }
        for (_, next) in grid.open_neighbors(cell) {
            if next != from && first_steps[next].is_none() {
                first_steps[next] = Some(first_step);
                queue.push_back((next, first_step));
            }
        }
    }
    None
}

#[test]
fn greedy_player_clears_the_board() {
    init_logging();

    // the ghosts are sealed in a box around the pen so they never reach pacman
    let mut rows = open_board();
    for (row, col) in itertools::iproduct!(7..=13, 8..=14) {
        if row == 7 || row == 13 || col == 8 || col == 14 {
            rows[row][col] = CellTag::Wall;
        }
    }
    for (row, col) in [(1, 1), (1, 21), (21, 1), (21, 21)] {
        rows[row][col] = CellTag::Energizer;
    }
    rows[20][11] = CellTag::AgentStart;
    rows[10][11] = CellTag::GhostStart;
    // dots on the first open cells outside the box, up to the reference total
    let mut placed = 4;
    for (row, col) in itertools::iproduct!(0..SIZE, 0..SIZE) {
        let in_box = (7..=13).contains(&row) && (8..=14).contains(&col);
        if placed < TOTAL_COLLECTIBLES && rows[row][col] == CellTag::Open && !in_box {
            rows[row][col] = CellTag::Dot;
            placed += 1;
        }
    }
    let layout = Layout::from_rows(&rows, SIZE).unwrap();
    let total = layout.collectible_count();
    assert_eq!(total, TOTAL_COLLECTIBLES);

    let mut game = GameState::new(layout, GameConfig::default()).unwrap();

    let mut score = 0;
    let mut frightened_starts = 0;
    for _ in 0..10_000 {
        if let Some(direction) = towards_nearest_collectible(game.grid(), game.pacman().pos) {
            game.set_intent(direction);
        }
        let result = game.tick();
        score += result.score_delta;
        frightened_starts += result
            .events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    GameEvent::ModeChanged {
                        to: Mode::Frightened,
                        ..
                    }
                )
            })
            .count();
        if result.terminal.is_some() {
            break;
        }
    }

    assert_eq!(game.terminal(), Some(Terminal::Won));
    assert_eq!(game.collected(), total);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.grid().collectibles_remaining(), 0);
    assert_eq!(score, (i64::from(total) - 4) * 10 + 4 * 100);
    assert_eq!(game.score(), score as u64);
    assert!(frightened_starts >= 1);
}

#[test]
fn standing_still_loses_every_life() {
    init_logging();

    let mut rows = open_board();
    rows[3][11] = CellTag::AgentStart;
    rows[10][11] = CellTag::GhostStart;
    rows[21][21] = CellTag::Dot;
    let layout = Layout::from_rows(&rows, SIZE).unwrap();
    let config = GameConfig {
        total_collectibles: 1,
        ..GameConfig::default()
    };
    let mut game = GameState::new(layout, config).unwrap();

    let mut lives_delta = 0;
    let mut lives_lost = 0;
    for _ in 0..1_000 {
        let result = game.tick();
        lives_delta += result.lives_delta;
        lives_lost += result
            .events
            .iter()
            .filter(|event| **event == GameEvent::LifeLost)
            .count();
        if result.terminal.is_some() {
            break;
        }
    }

    assert_eq!(game.terminal(), Some(Terminal::Lost));
    assert_eq!(game.lives(), 0);
    assert_eq!(lives_delta, -3);
    assert_eq!(lives_lost, 3);
    assert_eq!(game.score(), 0);
}

#[test]
fn same_seed_same_game() {
    init_logging();

    let play = |seed: u64| {
        let config = GameConfig {
            rng_seed: seed,
            ..GameConfig::default()
        };
        let mut game = GameState::with_default_layout(config).unwrap();
        let mut player = StdRng::seed_from_u64(99);
        let mut results = Vec::new();
        for _ in 0..300 {
            if let Some(direction) = Direction::ALL.choose(&mut player) {
                game.set_intent(*direction);
            }
            results.push(game.tick());
        }
        (results, game.score(), game.pacman().pos)
    };
    assert_eq!(play(7), play(7));
}
