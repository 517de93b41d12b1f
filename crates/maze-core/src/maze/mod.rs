//! Maze topology
//!
//! A `size`×`size` grid of walled cells plus one exit cell sitting just
//! outside the grid on one edge. The outer ring is walled off except for the
//! breach leading to the exit; the interior starts fully open.

mod cell;
mod direction;
mod position;

use std::ops::Index;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error::ConfigError;

pub use cell::{Cell, CellContent, Walls};
pub use direction::Direction;
pub use position::Position;

/// Create the default grid: solid perimeter, open interior
fn default_cells(size: usize) -> Vec<Vec<Cell>> {
    (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let mut walls = Walls::empty();
                    walls.set(Walls::UP, row == 0);
                    walls.set(Walls::DOWN, row == size - 1);
                    walls.set(Walls::LEFT, col == 0);
                    walls.set(Walls::RIGHT, col == size - 1);
                    Cell::new(walls)
                })
                .collect()
        })
        .collect()
}

/// Direction leading from the exit into the grid, or why there is none
fn exit_inward(size: usize, exit: Position) -> Result<Direction, ConfigError> {
    let edge = size as i32;
    let on_edge = |v: i32| v == -1 || v == edge;
    let in_range = |v: i32| (0..edge).contains(&v);

    if on_edge(exit.row) && on_edge(exit.col) {
        return Err(ConfigError::CornerExit { exit });
    }

    match (exit.row, exit.col) {
        (-1, col) if in_range(col) => Ok(Direction::Down),
        (row, col) if row == edge && in_range(col) => Ok(Direction::Up),
        (row, -1) if in_range(row) => Ok(Direction::Right),
        (row, col) if col == edge && in_range(row) => Ok(Direction::Left),
        _ => Err(ConfigError::InvalidExit { exit, size }),
    }
}

/// A square maze with a single exit.
///
/// Serializes for inspection only. Mazes are loaded through
/// [`crate::layout::MazeLayout`], which validates the exit and every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    size: usize,
    exit: Position,
    /// Direction from the exit toward its neighbouring grid cell
    inward: Direction,
    exit_cell: Cell,
    /// Grid cells, indexed `[row][col]`
    cells: Vec<Vec<Cell>>,
}

impl Maze {
    /// Create a maze with the exit to the right of the top-right cell
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_exit(size, Position::new(0, size as i32))
    }

    /// Create a maze with an explicit exit position.
    ///
    /// The exit must lie on exactly one of the lines just outside the grid
    /// (row or column `-1` or `size`) and must not be a corner.
    pub fn with_exit(size: usize, exit: Position) -> Result<Self, ConfigError> {
        if size == 0 || size > i32::MAX as usize {
            return Err(ConfigError::InvalidSize);
        }
        let inward = exit_inward(size, exit)?;

        let mut maze = Self {
            size,
            exit,
            inward,
            exit_cell: Cell::exit().without_wall(inward),
            cells: default_cells(size),
        };

        let neighbour = inward.step(exit);
        let opened = maze[neighbour].without_wall(inward.reverse());
        maze.cells[neighbour.row as usize][neighbour.col as usize] = opened;

        Ok(maze)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Grid cell adjacent to the exit
    pub fn exit_neighbour(&self) -> Position {
        self.inward.step(self.exit)
    }

    /// Direction to step from `exit_neighbour()` to reach the exit
    pub fn exit_approach(&self) -> Direction {
        self.inward.reverse()
    }

    /// Check if a position is in the grid (the exit does not count)
    pub fn in_grid(&self, pos: Position) -> bool {
        pos.in_grid(self.size)
    }

    /// Check if a position is in the grid or is the exit
    pub fn contains(&self, pos: Position) -> bool {
        pos == self.exit || self.in_grid(pos)
    }

    /// Look up a cell. Returns `None` for off-grid positions.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos == self.exit {
            Some(self.exit_cell)
        } else if self.in_grid(pos) {
            Some(self.cells[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    /// Replace a grid cell.
    ///
    /// Walls that differ from the current cell are edited on both sides, as
    /// with [`Maze::add_wall`] and [`Maze::remove_wall`]. If any of those
    /// edits is not allowed the maze is left untouched.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> Result<(), ConfigError> {
        let current = *self.grid_cell_mut(pos)?;
        let changes: Vec<(Direction, bool)> = Direction::iter()
            .filter(|&dir| current.has_wall(dir) != cell.has_wall(dir))
            .map(|dir| (dir, cell.has_wall(dir)))
            .collect();

        for &(dir, wall) in &changes {
            self.wall_neighbour(pos, dir, wall)?;
        }
        for (dir, wall) in changes {
            self.edit_wall(pos, dir, wall)?;
        }
        self.grid_cell_mut(pos)?.content = cell.content;
        Ok(())
    }

    /// Put the treasure on an empty cell. Returns false, leaving the maze
    /// untouched, if the cell is anything but empty floor.
    pub fn place_treasure(&mut self, pos: Position) -> bool {
        self.place_content(pos, CellContent::Treasure)
    }

    /// Turn an empty cell into swamp, with the same rules as
    /// [`Maze::place_treasure`].
    pub fn place_swamp(&mut self, pos: Position) -> bool {
        self.place_content(pos, CellContent::Swamp)
    }

    fn place_content(&mut self, pos: Position, content: CellContent) -> bool {
        match self.grid_cell_mut(pos) {
            Ok(cell) if cell.content == CellContent::Empty => {
                *cell = cell.with_content(content);
                true
            }
            _ => false,
        }
    }

    /// Wall off the side `dir` of `pos`, and the matching side of the
    /// neighbour when it is in the grid.
    pub fn add_wall(&mut self, pos: Position, dir: Direction) -> Result<(), ConfigError> {
        self.edit_wall(pos, dir, true)
    }

    /// Open the side `dir` of `pos` and the matching side of its neighbour.
    /// The perimeter can not be opened.
    pub fn remove_wall(&mut self, pos: Position, dir: Direction) -> Result<(), ConfigError> {
        self.edit_wall(pos, dir, false)
    }

    /// Check a wall edit on side `dir` of `pos`. Returns the grid cell on the
    /// other side, or `None` for a perimeter wall that is already there.
    fn wall_neighbour(
        &self,
        pos: Position,
        dir: Direction,
        wall: bool,
    ) -> Result<Option<Position>, ConfigError> {
        if !self.in_grid(pos) {
            return Err(ConfigError::OutOfBounds { position: pos });
        }
        let neighbour = dir.step(pos);
        if neighbour == self.exit {
            return Err(ConfigError::ExitNotEditable { position: neighbour });
        }
        if self.in_grid(neighbour) {
            Ok(Some(neighbour))
        } else if wall {
            Ok(None)
        } else {
            Err(ConfigError::OpenBoundary {
                position: pos,
                direction: dir,
            })
        }
    }

    fn edit_wall(&mut self, pos: Position, dir: Direction, wall: bool) -> Result<(), ConfigError> {
        let Some(neighbour) = self.wall_neighbour(pos, dir, wall)? else {
            return Ok(());
        };

        let toggle = |cell: Cell, side: Direction| {
            if wall {
                cell.with_wall(side)
            } else {
                cell.without_wall(side)
            }
        };
        let here = toggle(self[pos], dir);
        let there = toggle(self[neighbour], dir.reverse());
        self.cells[pos.row as usize][pos.col as usize] = here;
        self.cells[neighbour.row as usize][neighbour.col as usize] = there;
        Ok(())
    }

    fn grid_cell_mut(&mut self, pos: Position) -> Result<&mut Cell, ConfigError> {
        if pos == self.exit {
            return Err(ConfigError::ExitNotEditable { position: pos });
        }
        if !self.in_grid(pos) {
            return Err(ConfigError::OutOfBounds { position: pos });
        }
        Ok(&mut self.cells[pos.row as usize][pos.col as usize])
    }

    /// Iterate over every grid cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Position::new(row as i32, col as i32), *cell))
        })
    }

    /// All grid positions a player could spawn on
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, cell)| cell.content.allows_spawn())
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl Index<Position> for Maze {
    type Output = Cell;

    /// Panics on off-grid positions; use [`Maze::get`] to probe.
    fn index(&self, pos: Position) -> &Self::Output {
        if pos == self.exit {
            &self.exit_cell
        } else {
            assert!(self.in_grid(pos), "position {pos} is off the grid");
            &self.cells[pos.row as usize][pos.col as usize]
        }
    }
}
