//! Error types for maze construction and game lifecycle

use thiserror::Error;

use crate::game::GameState;
use crate::maze::{Direction, Position};

/// Invalid maze, layout, or player setup. Fatal to the construction
/// attempt only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Maze size must be at least 1")]
    InvalidSize,

    #[error("Illegal exit {exit}: one coordinate must be -1 or {size}, the other in the grid")]
    InvalidExit { exit: Position, size: usize },

    #[error("Illegal exit {exit}: exit must not be in a corner")]
    CornerExit { exit: Position },

    #[error("Position {position} is outside the grid")]
    OutOfBounds { position: Position },

    #[error("The exit cell at {position} can not be edited")]
    ExitNotEditable { position: Position },

    #[error("Can not open the outer wall {direction} of {position}")]
    OpenBoundary {
        position: Position,
        direction: Direction,
    },

    #[error("Can not spawn outside of the maze at {position}")]
    SpawnOutOfBounds { position: Position },

    #[error("Can not spawn a player over a non-empty place at {position}")]
    SpawnBlocked { position: Position },

    #[error("Maze has no valid spawn cells")]
    NoSpawnCells,

    #[error("Expected {expected} spawn positions, got {found}")]
    SpawnCountMismatch { expected: usize, found: usize },

    #[error("A game needs at least {min} players, got {found}")]
    NotEnoughPlayers { min: usize, found: usize },

    #[error("Can not place treasure at {position}: cell is not empty")]
    TreasureNotPlaced { position: Position },

    #[error("Can not place swamp at {position}: cell is not empty")]
    SwampNotPlaced { position: Position },
}

/// Operation attempted in the wrong game state
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Game is not running (state: {state})")]
    NotRunning { state: GameState },

    #[error("Game can only be started once (state: {state})")]
    AlreadyStarted { state: GameState },
}

/// Anything `Game::start` can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
