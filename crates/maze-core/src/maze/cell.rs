//! Maze cell types

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Direction;

/// What occupies a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum CellContent {
    #[default]
    Empty = 0,
    Treasure = 1,
    Exit = 2,
    Swamp = 3,
}

impl CellContent {
    /// Players may only spawn on empty floor
    pub const fn allows_spawn(&self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

bitflags! {
    /// Walls on the four sides of a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Walls: u8 {
        const UP = 0x01;
        const DOWN = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
    }
}

// Manual serde impl for Walls
impl Serialize for Walls {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Walls {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Walls::from_bits_truncate(bits))
    }
}

/// A single maze cell.
///
/// Cells are plain values: changing one means building a new value and
/// storing it back in the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub content: CellContent,
    pub walls: Walls,
}

impl Cell {
    /// Empty cell with the given walls
    pub const fn new(walls: Walls) -> Self {
        Self {
            content: CellContent::Empty,
            walls,
        }
    }

    /// The synthetic exit cell, closed on every side
    pub const fn exit() -> Self {
        Self {
            content: CellContent::Exit,
            walls: Walls::all(),
        }
    }

    #[must_use]
    pub const fn with_content(self, content: CellContent) -> Self {
        Self { content, ..self }
    }

    #[must_use]
    pub const fn with_walls(self, walls: Walls) -> Self {
        Self { walls, ..self }
    }

    #[must_use]
    pub fn with_wall(self, dir: Direction) -> Self {
        self.with_walls(self.walls | dir.wall())
    }

    #[must_use]
    pub fn without_wall(self, dir: Direction) -> Self {
        self.with_walls(self.walls - dir.wall())
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls.contains(dir.wall())
    }
}
