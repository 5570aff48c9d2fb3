use arrayvec::ArrayVec;
use itertools::iproduct;
use ndarray::Array2;
use phf::phf_map;
use static_assertions::const_assert_eq;

use crate::{
    collideable::Occupant,
    error::LayoutError,
    variables::{CellTag, Direction, MAZE_DIMENSION, TOTAL_COLLECTIBLES},
};

// data computed by the build script (build.rs):

macro_rules! include_generated {
    ($filename:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $filename))
    };
}

/// The bundled maze, in the text format accepted by [`Layout::parse`].
pub const DEFAULT_LAYOUT: &str = include_str!("layout_data.txt");
pub const DEFAULT_DOT_COUNT: u32 = include_generated!("LAYOUT_DOT_COUNT.txt");
pub const DEFAULT_ENERGIZER_COUNT: u32 = include_generated!("LAYOUT_ENERGIZER_COUNT.txt");
const DEFAULT_LAYOUT_ROWS: usize = include_generated!("LAYOUT_ROWS.txt");

const_assert_eq!(DEFAULT_DOT_COUNT + DEFAULT_ENERGIZER_COUNT, TOTAL_COLLECTIBLES);
const_assert_eq!(DEFAULT_LAYOUT_ROWS, MAZE_DIMENSION);

/// Layout text characters.
static LAYOUT_CHARS: phf::Map<char, CellTag> = phf_map! {
    '#' => CellTag::Wall,
    '-' => CellTag::Open,
    '.' => CellTag::Dot,
    'o' => CellTag::Energizer,
    'P' => CellTag::AgentStart,
    'G' => CellTag::GhostStart,
};

/// Upper bound on simultaneous occupants of one cell: one collectible plus every ghost.
pub const MAX_OCCUPANTS: usize = 8;

/// A square grid of cell tags describing a maze before any entity is placed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    tags: Array2<CellTag>,
}

impl Layout {
    /// Parses a text layout with exactly `size` lines of `size` characters each.
    pub fn parse(text: &str, size: usize) -> Result<Self, LayoutError> {
        let rows = text
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        LAYOUT_CHARS
                            .get(&ch)
                            .copied()
                            .ok_or(LayoutError::UnknownCell { ch, row, col })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows, size)
    }

    /// Builds a layout from rows of tags, checking that it is `size` by `size`.
    pub fn from_rows(rows: &[Vec<CellTag>], size: usize) -> Result<Self, LayoutError> {
        if rows.len() != size {
            return Err(LayoutError::WrongRowCount {
                expected: size,
                actual: rows.len(),
            });
        }
        if let Some((row, tags)) = rows.iter().enumerate().find(|(_, tags)| tags.len() != size) {
            return Err(LayoutError::WrongRowLength {
                row,
                expected: size,
                actual: tags.len(),
            });
        }
        Ok(Self {
            tags: Array2::from_shape_fn((size, size), |(row, col)| rows[row][col]),
        })
    }

    /// The bundled 23x23 maze.
    pub fn default_maze() -> Result<Self, LayoutError> {
        Self::parse(DEFAULT_LAYOUT, MAZE_DIMENSION)
    }

    pub fn size(&self) -> usize {
        self.tags.nrows()
    }

    pub fn tag(&self, row: usize, col: usize) -> CellTag {
        self.tags[(row, col)]
    }

    pub fn tags(&self) -> &Array2<CellTag> {
        &self.tags
    }

    /// Number of dots and energizers in the layout.
    pub fn collectible_count(&self) -> u32 {
        self.tags.iter().filter(|tag| tag.is_collectible()).count() as u32
    }

    /// Returns the position of the single cell carrying `tag`.
    pub fn find_unique(
        &self,
        tag: CellTag,
        missing: LayoutError,
        duplicate: LayoutError,
    ) -> Result<(usize, usize), LayoutError> {
        let mut found = self.tags.indexed_iter().filter(|(_, t)| **t == tag).map(|(pos, _)| pos);
        match (found.next(), found.next()) {
            (Some(pos), None) => Ok(pos),
            (None, _) => Err(missing),
            (Some(_), Some(_)) => Err(duplicate),
        }
    }
}

/// One square of the maze and the things pacman can collide with on it.
#[derive(Clone, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    is_wall: bool,
    /// Insertion order is collision resolution order.
    occupants: ArrayVec<Occupant, MAX_OCCUPANTS>,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_wall: false,
            occupants: ArrayVec::new(),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }
}

/// The fixed-size maze. Its dimensions never change once built.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    tunnel_row: usize,
}

impl Grid {
    /// Creates an all-open grid with no occupants.
    pub fn new(size: usize, tunnel_row: usize) -> Self {
        Self {
            cells: Array2::from_shape_fn((size, size), |(row, col)| Cell::new(row, col)),
            tunnel_row,
        }
    }

    /// Builds the walls of a layout and registers its dots and energizers.
    pub fn from_layout(layout: &Layout, tunnel_row: usize) -> Self {
        let mut grid = Self::new(layout.size(), tunnel_row);
        for (row, col) in iproduct!(0..layout.size(), 0..layout.size()) {
            match layout.tag(row, col) {
                CellTag::Wall => grid.set_wall(row, col),
                CellTag::Dot => grid.register_occupant(row, col, Occupant::Dot),
                CellTag::Energizer => grid.register_occupant(row, col, Occupant::Energizer),
                CellTag::Open | CellTag::AgentStart | CellTag::GhostStart => {}
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn tunnel_row(&self) -> usize {
        self.tunnel_row
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[(row, col)]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Converts signed coordinates into a cell position, or None if they are off the grid.
    pub fn in_bounds(&self, row: isize, col: isize) -> Option<(usize, usize)> {
        let size = self.size() as isize;
        ((0..size).contains(&row) && (0..size).contains(&col)).then(|| (row as usize, col as usize))
    }

    /// The neighboring cell one step away in `direction`, without wrapping.
    pub fn offset(&self, pos: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
        self.in_bounds(
            pos.0 as isize + direction.step_row(),
            pos.1 as isize + direction.step_col(),
        )
    }

    pub fn set_wall(&mut self, row: usize, col: usize) {
        self.cells[(row, col)].is_wall = true;
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        !self.cells[(row, col)].is_wall
    }

    /// Open cells next to `pos`, in the fixed direction order. Wrap-around is not considered.
    pub fn open_neighbors(&self, pos: (usize, usize)) -> ArrayVec<(Direction, (usize, usize)), 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.offset(pos, dir).map(|next| (dir, next)))
            .filter(|(_, (row, col))| self.is_open(*row, *col))
            .collect()
    }

    /// Appends `occupant` to the cell's registry. An occupant already present is not added twice.
    pub fn register_occupant(&mut self, row: usize, col: usize, occupant: Occupant) {
        let occupants = &mut self.cells[(row, col)].occupants;
        if !occupants.contains(&occupant) {
            occupants.push(occupant);
        }
    }

    /// Removes `occupant` from the cell's registry, keeping the order of the rest.
    /// Returns whether it was present.
    pub fn remove_occupant(&mut self, row: usize, col: usize, occupant: Occupant) -> bool {
        let occupants = &mut self.cells[(row, col)].occupants;
        match occupants.iter().position(|o| *o == occupant) {
            Some(index) => {
                occupants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_occupants(&mut self, row: usize, col: usize) {
        self.cells[(row, col)].occupants.clear();
    }

    pub fn occupants_at(&self, row: usize, col: usize) -> &[Occupant] {
        &self.cells[(row, col)].occupants
    }

    /// Number of dots and energizers still registered anywhere on the grid.
    pub fn collectibles_remaining(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|cell| cell.occupants.iter())
            .filter(|occupant| occupant.is_collectible())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ghost_agent::GhostColor;

    #[test]
    fn default_maze_matches_declared_totals() {
        let layout = Layout::default_maze().unwrap();
        assert_eq!(layout.size(), MAZE_DIMENSION);
        assert_eq!(layout.collectible_count(), TOTAL_COLLECTIBLES);

        let grid = Grid::from_layout(&layout, 11);
        assert_eq!(grid.collectibles_remaining(), TOTAL_COLLECTIBLES as usize);
        // the tunnel opens on both sides
        assert!(grid.is_open(11, 0));
        assert!(grid.is_open(11, 22));
    }

    #[test]
    fn parse_rejects_bad_dimensions() {
        assert_eq!(
            Layout::parse("#-#\n#-#\n", 3),
            Err(LayoutError::WrongRowCount {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            Layout::parse("###\n#-\n###\n", 3),
            Err(LayoutError::WrongRowLength {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn parse_rejects_unknown_characters() {
        assert_eq!(
            Layout::parse("###\n#x#\n###\n", 3),
            Err(LayoutError::UnknownCell {
                ch: 'x',
                row: 1,
                col: 1
            })
        );
    }

    #[test]
    fn find_unique_reports_missing_and_duplicates() {
        let layout = Layout::parse("PP-\n---\n--G\n", 3).unwrap();
        assert_eq!(
            layout.find_unique(
                CellTag::AgentStart,
                LayoutError::MissingAgentStart,
                LayoutError::DuplicateAgentStart
            ),
            Err(LayoutError::DuplicateAgentStart)
        );
        assert_eq!(
            layout.find_unique(
                CellTag::GhostStart,
                LayoutError::MissingGhostStart,
                LayoutError::DuplicateGhostStart
            ),
            Ok((2, 2))
        );
    }

    #[test]
    fn occupants_keep_insertion_order() {
        let mut grid = Grid::new(3, 1);
        let red = Occupant::Ghost(GhostColor::Red);
        let pink = Occupant::Ghost(GhostColor::Pink);
        grid.register_occupant(1, 1, Occupant::Dot);
        grid.register_occupant(1, 1, red);
        grid.register_occupant(1, 1, pink);
        grid.register_occupant(1, 1, red);
        assert_eq!(grid.occupants_at(1, 1), &[Occupant::Dot, red, pink]);

        assert!(grid.remove_occupant(1, 1, red));
        assert!(!grid.remove_occupant(1, 1, red));
        assert_eq!(grid.occupants_at(1, 1), &[Occupant::Dot, pink]);

        grid.clear_occupants(1, 1);
        assert!(grid.occupants_at(1, 1).is_empty());
    }

    #[test]
    fn open_neighbors_skip_walls_and_edges() {
        let mut grid = Grid::new(3, 1);
        grid.set_wall(0, 1);
        let neighbors: Vec<_> = grid.open_neighbors((0, 0)).into_iter().collect();
        assert_eq!(neighbors, vec![(Direction::Down, (1, 0))]);
    }
}
