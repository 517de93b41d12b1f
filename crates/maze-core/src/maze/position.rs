//! Grid coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate.
///
/// Rows grow downward and columns grow rightward. Coordinates are signed
/// because the exit sits one step outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset by a `(drow, dcol)` delta
    pub const fn offset(self, (drow, dcol): (i32, i32)) -> Self {
        Self::new(self.row + drow, self.col + dcol)
    }

    /// Check if both coordinates lie in `[0, size)`
    pub fn in_grid(self, size: usize) -> bool {
        let size = size as i64;
        (0..size).contains(&(self.row as i64)) && (0..size).contains(&(self.col as i64))
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_grid() {
        assert!(Position::new(0, 0).in_grid(1));
        assert!(Position::new(1, 1).in_grid(2));
        assert!(!Position::new(2, 0).in_grid(2));
        assert!(!Position::new(0, -1).in_grid(2));
        assert!(!Position::new(0, 0).in_grid(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(-1, 3).to_string(), "(-1, 3)");
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&Position::new(0, 2)).unwrap();
        assert_eq!(json, "[0,2]");
        let pos: Position = serde_json::from_str("[2,-1]").unwrap();
        assert_eq!(pos, Position::new(2, -1));
    }
}
