//! Turn coordination
//!
//! `Game` owns the maze, the roster and the turn state. Each call to
//! [`Game::try_move`] moves the current player one step and decides who
//! plays next.

mod turn;

use std::cell::OnceCell;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, warn};

use crate::consts::{MAX_SPAWN_ATTEMPTS, MIN_PLAYERS};
use crate::error::{ConfigError, GameError, LifecycleError};
use crate::maze::{Direction, Maze, Position};
use crate::player::{MoveOutcome, Player, PlayerId};
use crate::rng::GameRng;

pub use turn::{TurnAdvance, next_turn};

/// Game lifecycle: `New -> Running -> Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameState {
    #[default]
    New,
    Running,
    Stopped,
}

/// Pick a spawn cell.
///
/// Draws random grid positions until one is empty. After
/// `MAX_SPAWN_ATTEMPTS` misses it picks among all empty cells instead, so a
/// maze with few or no empty cells can not hang the caller.
fn sample_spawn(maze: &Maze, rng: &mut GameRng) -> Result<Position, ConfigError> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = rng.random_position(maze.size());
        if maze[pos].content.allows_spawn() {
            return Ok(pos);
        }
    }

    let candidates = maze.empty_cells();
    warn!(
        attempts = MAX_SPAWN_ATTEMPTS,
        candidates = candidates.len(),
        "spawn sampling fell back to enumeration"
    );
    rng.choose(&candidates)
        .copied()
        .ok_or(ConfigError::NoSpawnCells)
}

/// A multiplayer maze game
#[derive(Debug, Clone)]
pub struct Game {
    maze: Maze,
    names: Vec<String>,
    /// Empty until the game starts
    players: Vec<Player>,
    current: PlayerId,
    stuck: BTreeSet<PlayerId>,
    /// First player to win; never overwritten
    winner: OnceCell<PlayerId>,
    state: GameState,
    moves: u64,
    rng: GameRng,
}

impl Game {
    /// Create a game over `maze` for the given players, in turn order.
    pub fn new<I, S>(maze: Maze, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < MIN_PLAYERS {
            return Err(ConfigError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                found: names.len(),
            });
        }

        Ok(Self {
            maze,
            names,
            players: Vec::new(),
            current: PlayerId::new(0),
            stuck: BTreeSet::new(),
            winner: OnceCell::new(),
            state: GameState::New,
            moves: 0,
            rng: GameRng::default(),
        })
    }

    /// Use this RNG for spawn placement
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Use a seeded RNG so spawns are reproducible
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(GameRng::new(seed))
    }

    /// Spawn every player on a random empty cell and hand the first turn to
    /// the first player.
    pub fn start(&mut self) -> Result<&mut Self, GameError> {
        self.ensure_new()?;

        let mut players = Vec::with_capacity(self.names.len());
        for (i, name) in self.names.iter().enumerate() {
            let position = sample_spawn(&self.maze, &mut self.rng)?;
            players.push(Player::new(
                PlayerId::new(i as u32),
                name.clone(),
                &self.maze,
                position,
            )?);
        }

        self.begin(players);
        Ok(self)
    }

    /// Start with fixed spawn positions, one per player in roster order.
    pub fn start_at(&mut self, spawns: &[Position]) -> Result<&mut Self, GameError> {
        self.ensure_new()?;
        if spawns.len() != self.names.len() {
            return Err(ConfigError::SpawnCountMismatch {
                expected: self.names.len(),
                found: spawns.len(),
            }
            .into());
        }

        let players = self
            .names
            .iter()
            .zip(spawns)
            .enumerate()
            .map(|(i, (name, &position))| {
                Player::new(PlayerId::new(i as u32), name.clone(), &self.maze, position)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.begin(players);
        Ok(self)
    }

    fn ensure_new(&self) -> Result<(), LifecycleError> {
        match self.state {
            GameState::New => Ok(()),
            state => Err(LifecycleError::AlreadyStarted { state }),
        }
    }

    fn begin(&mut self, players: Vec<Player>) {
        for player in &players {
            debug!(player = %player.name(), position = %player.position(), "spawned");
        }
        self.players = players;
        self.current = PlayerId::new(0);
        self.state = GameState::Running;
        info!(
            players = self.players.len(),
            size = self.maze.size(),
            seed = self.rng.seed(),
            "game started"
        );
    }

    /// Move the current player one step.
    ///
    /// A wall hit keeps the turn. Any other outcome passes it to the next
    /// player who is not stuck. Gameplay results are returned as the
    /// outcome; only calling outside `Running` is an error.
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome, LifecycleError> {
        if self.state != GameState::Running {
            return Err(LifecycleError::NotRunning { state: self.state });
        }

        let current = self.current;
        let outcome = self.players[current.index()].try_move(&self.maze, direction);
        self.moves += 1;
        debug!(player = %self.players[current.index()].name(), %direction, %outcome, "move");

        match outcome {
            MoveOutcome::StuckInSwamp => {
                self.stuck.insert(current);
            }
            MoveOutcome::Victory => {
                if self.winner.set(current).is_ok() {
                    let name = self.players[current.index()].name();
                    info!(player = %name, moves = self.moves, "winner");
                }
            }
            _ => {}
        }

        if outcome.ends_turn() {
            let advance = next_turn(self.players.len(), current, &self.stuck);
            for id in &advance.skipped {
                self.stuck.remove(id);
                debug!(player = %self.players[id.index()].name(), "skipped while stuck");
            }
            self.current = advance.next;
        }

        Ok(outcome)
    }

    /// Stop the game. Further moves fail; calling again is harmless.
    pub fn cancel(&mut self) {
        if self.state != GameState::Stopped {
            info!(moves = self.moves, "game cancelled");
        }
        self.state = GameState::Stopped;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Player names in turn order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Spawned players in turn order; empty before the game starts
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(Player::id)
    }

    /// Player whose turn it is; `None` before the game starts
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current)
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.get().and_then(|id| self.player(*id))
    }

    /// Players who will sit out their next turn
    pub fn stuck_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.stuck.iter().copied()
    }

    pub fn is_stuck(&self, id: PlayerId) -> bool {
        self.stuck.contains(&id)
    }

    /// Moves processed so far, wall hits included
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::CellContent;

    fn corner_game(maze: Maze, names: &[&str]) -> Game {
        let mut game = Game::new(maze, names.iter().copied()).unwrap();
        let spawns = vec![Position::new(0, 0); names.len()];
        game.start_at(&spawns).unwrap();
        game
    }

    #[test]
    fn test_start_stop() {
        let mut maze = Maze::new(2).unwrap();
        assert!(maze.place_treasure(Position::new(1, 1)));

        let mut game = Game::new(maze, ["Player 1", "Player 2"]).unwrap().with_seed(3);
        assert_eq!(game.state(), GameState::New);
        assert!(game.current_player().is_none());

        game.start().unwrap();
        let names: Vec<_> = game.players().iter().map(Player::name).collect();
        assert_eq!(names, ["Player 1", "Player 2"]);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.current_player_id(), Some(PlayerId::new(0)));

        for player in game.players() {
            assert_eq!(game.maze()[player.position()].content, CellContent::Empty);
        }

        game.cancel();
        assert_eq!(game.state(), GameState::Stopped);
        game.cancel();
        assert_eq!(game.state(), GameState::Stopped);
    }

    #[test]
    fn test_needs_two_players() {
        let maze = Maze::new(2).unwrap();
        assert_eq!(
            Game::new(maze, ["solo"]).unwrap_err(),
            ConfigError::NotEnoughPlayers { min: 2, found: 1 }
        );
    }

    #[test]
    fn test_move_before_start_fails() {
        let mut game = Game::new(Maze::new(2).unwrap(), ["a", "b"]).unwrap();
        assert_eq!(
            game.try_move(Direction::Right),
            Err(LifecycleError::NotRunning {
                state: GameState::New
            })
        );
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn test_move_after_cancel_fails() {
        let mut game = corner_game(Maze::new(2).unwrap(), &["a", "b"]);
        game.cancel();
        assert_eq!(
            game.try_move(Direction::Right),
            Err(LifecycleError::NotRunning {
                state: GameState::Stopped
            })
        );
    }

    #[test]
    fn test_start_twice_fails() {
        let mut game = corner_game(Maze::new(2).unwrap(), &["a", "b"]);
        let before: Vec<_> = game.players().to_vec();

        assert_eq!(
            game.start().unwrap_err(),
            GameError::Lifecycle(LifecycleError::AlreadyStarted {
                state: GameState::Running
            })
        );
        assert_eq!(game.players(), before.as_slice());

        game.cancel();
        assert!(matches!(
            game.start_at(&[Position::new(0, 0); 2]),
            Err(GameError::Lifecycle(LifecycleError::AlreadyStarted {
                state: GameState::Stopped
            }))
        ));
    }

    #[test]
    fn test_cancel_before_start() {
        let mut game = Game::new(Maze::new(2).unwrap(), ["a", "b"]).unwrap();
        game.cancel();
        assert_eq!(game.state(), GameState::Stopped);
        assert!(game.start().is_err());
    }

    #[test]
    fn test_start_at_validates_spawns() {
        let mut maze = Maze::new(2).unwrap();
        maze.place_treasure(Position::new(1, 1));
        let mut game = Game::new(maze, ["a", "b"]).unwrap();

        assert_eq!(
            game.start_at(&[Position::new(0, 0)]).unwrap_err(),
            GameError::Config(ConfigError::SpawnCountMismatch {
                expected: 2,
                found: 1
            })
        );
        let spawns = [Position::new(0, 0), Position::new(1, 1)];
        assert_eq!(
            game.start_at(&spawns).unwrap_err(),
            GameError::Config(ConfigError::SpawnBlocked {
                position: Position::new(1, 1)
            })
        );
        assert_eq!(game.state(), GameState::New);
    }

    #[test]
    fn test_no_spawn_cells() {
        let mut maze = Maze::new(1).unwrap();
        maze.place_swamp(Position::new(0, 0));
        let mut game = Game::new(maze, ["a", "b"]).unwrap().with_seed(1);

        assert_eq!(
            game.start().unwrap_err(),
            GameError::Config(ConfigError::NoSpawnCells)
        );
        assert_eq!(game.state(), GameState::New);
    }

    #[test]
    fn test_sparse_maze_still_spawns() {
        let mut maze = Maze::new(20).unwrap();
        let open = Position::new(13, 7);
        let others: Vec<_> = maze
            .cells()
            .map(|(pos, _)| pos)
            .filter(|&pos| pos != open)
            .collect();
        for pos in others {
            assert!(maze.place_swamp(pos));
        }

        let mut game = Game::new(maze, ["a", "b", "c"]).unwrap().with_seed(99);
        game.start().unwrap();
        assert!(game.players().iter().all(|p| p.position() == open));
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let spawns = |seed| {
            let mut game = Game::new(Maze::new(6).unwrap(), ["a", "b", "c"])
                .unwrap()
                .with_seed(seed);
            game.start().unwrap();
            game.players().iter().map(Player::position).collect::<Vec<_>>()
        };
        assert_eq!(spawns(11), spawns(11));
    }

    #[test]
    fn test_wall_hit_keeps_turn_and_counts() {
        let mut game = corner_game(Maze::new(2).unwrap(), &["a", "b"]);

        assert_eq!(game.try_move(Direction::Up), Ok(MoveOutcome::HitWall));
        assert_eq!(game.current_player_id(), Some(PlayerId::new(0)));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_stuck_marks() {
        let mut maze = Maze::new(2).unwrap();
        maze.place_swamp(Position::new(1, 0));
        let mut game = corner_game(maze, &["p1", "p2", "p3"]);

        assert_eq!(game.try_move(Direction::Down), Ok(MoveOutcome::StuckInSwamp));
        assert!(game.is_stuck(PlayerId::new(0)));
        assert_eq!(game.stuck_players().collect::<Vec<_>>(), [PlayerId::new(0)]);

        game.try_move(Direction::Right).unwrap();
        game.try_move(Direction::Right).unwrap();
        assert!(!game.is_stuck(PlayerId::new(0)));
        assert_eq!(game.current_player_id(), Some(PlayerId::new(1)));
    }
}
