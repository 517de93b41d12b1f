//! Cardinal movement directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Position, Walls};

/// One of the four directions a player can step in.
///
/// Parses case-insensitively from its name or first letter:
///
/// ```
/// use maze_core::maze::Direction;
///
/// assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
/// assert_eq!("r".parse::<Direction>(), Ok(Direction::Right));
/// assert_eq!(Direction::Left.to_string(), "left");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "up", serialize = "u")]
    Up,
    #[strum(to_string = "down", serialize = "d")]
    Down,
    #[strum(to_string = "left", serialize = "l")]
    Left,
    #[strum(to_string = "right", serialize = "r")]
    Right,
}

impl Direction {
    /// Get the (drow, dcol) delta for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The position one step away in this direction
    pub const fn step(&self, from: Position) -> Position {
        from.offset(self.delta())
    }

    pub const fn reverse(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Wall flag on the side of a cell facing this direction
    pub const fn wall(&self) -> Walls {
        match self {
            Direction::Up => Walls::UP,
            Direction::Down => Walls::DOWN,
            Direction::Left => Walls::LEFT,
            Direction::Right => Walls::RIGHT,
        }
    }
}
