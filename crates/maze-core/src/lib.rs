//! maze-core: Rules engine for a turn-based multiplayer maze game
//!
//! Players spawn on a square grid of walled cells and take turns stepping
//! one cell at a time. The first to pick up the treasure and walk out of
//! the exit wins. Swamps cost the player who steps in them their next turn.
//!
//! This crate contains only game rules, with no I/O. Drivers build a
//! [`Maze`] (directly or from a [`layout::MazeLayout`]), wrap it in a
//! [`Game`] and feed it one [`Direction`] per turn.
//!
//! ```
//! use maze_core::{Direction, Game, GameState, Maze, MoveOutcome, Position};
//!
//! let mut maze = Maze::new(2)?;
//! maze.place_treasure(Position::new(0, 1));
//!
//! let mut game = Game::new(maze, ["p1", "p2"])?;
//! game.start_at(&[Position::new(0, 0), Position::new(1, 0)])?;
//!
//! assert_eq!(game.try_move(Direction::Right)?, MoveOutcome::FoundTreasure);
//! assert_eq!(game.try_move(Direction::Up)?, MoveOutcome::Moved);
//! assert_eq!(game.try_move(Direction::Right)?, MoveOutcome::Victory);
//! assert_eq!(game.winner().map(|p| p.name()), Some("p1"));
//! assert_eq!(game.state(), GameState::Running);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod game;
pub mod layout;
pub mod maze;
pub mod player;

mod consts;
mod rng;

pub use consts::*;
pub use error::{ConfigError, GameError, LifecycleError};
pub use game::{Game, GameState};
pub use maze::{Cell, CellContent, Direction, Maze, Position, Walls};
pub use player::{MoveOutcome, Player, PlayerId};
pub use rng::GameRng;
