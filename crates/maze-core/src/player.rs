//! Players and single-step movement
//!
//! A player only knows its own position and whether it carries the
//! treasure. Each move is resolved against the maze it is given.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::trace;

use crate::error::ConfigError;
use crate::maze::{CellContent, Direction, Maze, Position};

/// Index of a player in the game's roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Result of one attempted step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MoveOutcome {
    /// Wall or grid edge in the way, nothing changed
    #[strum(to_string = "hit the wall")]
    HitWall,
    #[strum(to_string = "ok")]
    Moved,
    #[strum(to_string = "found the treasure")]
    FoundTreasure,
    /// Reached the exit without the treasure
    #[strum(to_string = "found the exit")]
    FoundExit,
    /// Reached the exit carrying the treasure
    #[strum(to_string = "victory")]
    Victory,
    /// Stepped into a swamp and will lose the next turn
    #[strum(to_string = "stuck in the swamp")]
    StuckInSwamp,
}

impl MoveOutcome {
    /// Everything except a wall hit passes the turn on
    pub const fn ends_turn(&self) -> bool {
        !matches!(self, MoveOutcome::HitWall)
    }
}

/// A player in the maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    position: Position,
    has_treasure: bool,
}

impl Player {
    /// Spawn a player.
    ///
    /// The position must be a grid cell whose content allows spawning; the
    /// exit and anything off the grid are rejected.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        maze: &Maze,
        position: Position,
    ) -> Result<Self, ConfigError> {
        let cell = maze
            .get(position)
            .filter(|_| maze.in_grid(position))
            .ok_or(ConfigError::SpawnOutOfBounds { position })?;
        if !cell.content.allows_spawn() {
            return Err(ConfigError::SpawnBlocked { position });
        }

        Ok(Self {
            id,
            name: name.into(),
            position,
            has_treasure: false,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Once picked up, the treasure is never lost
    pub fn has_treasure(&self) -> bool {
        self.has_treasure
    }

    /// Try to take one step.
    ///
    /// The player moves unless the target is outside the maze or the
    /// current cell is walled on that side. Standing on the exit does not
    /// end anything; the exit cell's own walls still apply.
    pub fn try_move(&mut self, maze: &Maze, direction: Direction) -> MoveOutcome {
        let target = direction.step(self.position);
        let blocked = maze
            .get(self.position)
            .is_none_or(|cell| cell.has_wall(direction));

        let outcome = match maze.get(target) {
            None => MoveOutcome::HitWall,
            Some(_) if blocked => MoveOutcome::HitWall,
            Some(cell) => {
                self.position = target;
                match cell.content {
                    CellContent::Treasure => {
                        self.has_treasure = true;
                        MoveOutcome::FoundTreasure
                    }
                    CellContent::Exit if self.has_treasure => MoveOutcome::Victory,
                    CellContent::Exit => MoveOutcome::FoundExit,
                    CellContent::Swamp => MoveOutcome::StuckInSwamp,
                    CellContent::Empty => MoveOutcome::Moved,
                }
            }
        };

        trace!(
            player = %self.name,
            %direction,
            %outcome,
            position = %self.position,
            "move resolved"
        );
        outcome
    }
}
