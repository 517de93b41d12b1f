//! Core game constants

/// Grid dimension used when a driver does not ask for one
pub const DEFAULT_MAZE_SIZE: usize = 5;

/// Random spawn draws before falling back to enumerating empty cells
pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

/// A game needs at least two players
pub const MIN_PLAYERS: usize = 2;
