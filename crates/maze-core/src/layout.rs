//! Declarative maze descriptions
//!
//! A `MazeLayout` lists what to put on top of the default maze: exit
//! location, interior walls, the treasure and swamps. Drivers load it from
//! JSON or build it in code and call [`MazeLayout::build`].
//!
//! ```
//! use maze_core::layout::MazeLayout;
//! use maze_core::maze::{CellContent, Position};
//!
//! let layout: MazeLayout = serde_json::from_str(
//!     r#"{ "size": 3, "treasure": [2, 2], "swamps": [[1, 1]] }"#,
//! ).unwrap();
//! let maze = layout.build().unwrap();
//! assert_eq!(maze[Position::new(2, 2)].content, CellContent::Treasure);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAZE_SIZE;
use crate::error::ConfigError;
use crate::maze::{Direction, Maze, Position};

/// One interior wall, on side `direction` of cell `at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSpec {
    pub at: Position,
    pub direction: Direction,
}

/// Description of a maze to build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub size: usize,

    /// Exit position. `None` for the default, right of the top-right cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasure: Option<Position>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swamps: Vec<Position>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<WallSpec>,
}

impl MazeLayout {
    /// Open maze of the given size with the default exit
    pub fn new(size: usize) -> Self {
        Self {
            size,
            exit: None,
            treasure: None,
            swamps: Vec::new(),
            walls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exit(mut self, exit: Position) -> Self {
        self.exit = Some(exit);
        self
    }

    #[must_use]
    pub fn with_treasure(mut self, at: Position) -> Self {
        self.treasure = Some(at);
        self
    }

    #[must_use]
    pub fn with_swamp(mut self, at: Position) -> Self {
        self.swamps.push(at);
        self
    }

    #[must_use]
    pub fn with_wall(mut self, at: Position, direction: Direction) -> Self {
        self.walls.push(WallSpec { at, direction });
        self
    }

    /// Build the maze: walls first, then the treasure, then swamps.
    ///
    /// Treasure and swamps must land on empty cells, so a swamp listed on
    /// the treasure cell (or twice) is an error.
    pub fn build(&self) -> Result<Maze, ConfigError> {
        let mut maze = match self.exit {
            Some(exit) => Maze::with_exit(self.size, exit)?,
            None => Maze::new(self.size)?,
        };

        for wall in &self.walls {
            maze.add_wall(wall.at, wall.direction)?;
        }
        if let Some(position) = self.treasure {
            if !maze.place_treasure(position) {
                return Err(ConfigError::TreasureNotPlaced { position });
            }
        }
        for &position in &self.swamps {
            if !maze.place_swamp(position) {
                return Err(ConfigError::SwampNotPlaced { position });
            }
        }

        Ok(maze)
    }
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAZE_SIZE)
    }
}
