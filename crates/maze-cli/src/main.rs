//! Terminal driver for the maze game
//!
//! Builds a maze from flags or a JSON layout, spawns the named players and
//! reads one command per line from stdin.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use maze_core::layout::MazeLayout;
use maze_core::{DEFAULT_MAZE_SIZE, Direction, Game, MoveOutcome, Position};

/// Turn-based multiplayer maze: grab the treasure and get out first
#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the square grid
    #[arg(short = 's', long = "size", default_value_t = DEFAULT_MAZE_SIZE)]
    size: usize,

    /// Exit position, just outside the grid (default: right of the top-right cell)
    #[arg(
        short = 'e',
        long = "exit",
        value_name = "ROW,COL",
        value_parser = parse_position,
        allow_hyphen_values = true
    )]
    exit: Option<Position>,

    /// Treasure position
    #[arg(
        short = 't',
        long = "treasure",
        value_name = "ROW,COL",
        value_parser = parse_position,
        allow_hyphen_values = true
    )]
    treasure: Option<Position>,

    /// Swamp position; repeat for more swamps
    #[arg(
        long = "swamp",
        value_name = "ROW,COL",
        value_parser = parse_position,
        allow_hyphen_values = true
    )]
    swamps: Vec<Position>,

    /// Load the maze from a JSON layout file instead
    #[arg(
        short = 'l',
        long = "layout",
        value_name = "FILE",
        conflicts_with_all = ["size", "exit", "treasure", "swamps"]
    )]
    layout: Option<PathBuf>,

    /// Seed for spawn placement
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// Player names, in turn order
    #[arg(required = true, num_args = 2..)]
    names: Vec<String>,
}

impl Args {
    fn layout(&self) -> Result<MazeLayout> {
        if let Some(path) = &self.layout {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read layout {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("failed to parse layout {}", path.display()));
        }

        let mut layout = MazeLayout::new(self.size);
        layout.exit = self.exit;
        layout.treasure = self.treasure;
        layout.swamps = self.swamps.clone();
        Ok(layout)
    }
}

/// Parse `ROW,COL`
fn parse_position(s: &str) -> Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{s}`"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row `{row}`: {e}"))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad column `{col}`: {e}"))?;
    Ok(Position::new(row, col))
}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Status,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.to_ascii_lowercase().as_str() {
            "status" | "s" => Some(Command::Status),
            "quit" | "q" | "exit" => Some(Command::Quit),
            other => other.parse().ok().map(Command::Move),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let maze = args.layout()?.build().context("invalid maze")?;
    let game = Game::new(maze, args.names.iter().cloned())?;
    let mut game = match args.seed {
        Some(seed) => game.with_seed(seed),
        None => game,
    };
    game.start().context("failed to start game")?;
    info!(seed = game.seed(), players = game.players().len(), "maze ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&mut game, stdin.lock(), stdout.lock())
}

/// Feed commands from `input` to the game until it is won, the player quits
/// or input runs out. The game is cancelled on return.
fn play<R: BufRead, W: Write>(game: &mut Game, input: R, mut out: W) -> Result<()> {
    announce_turn(game, &mut out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Some(Command::Quit) => break,
            Some(Command::Status) => write_status(game, &mut out)?,
            Some(Command::Move(direction)) => {
                let Some(name) = game.current_player().map(|p| p.name().to_string()) else {
                    break;
                };
                let outcome = game.try_move(direction)?;
                writeln!(out, "{name}: {outcome}")?;

                if outcome == MoveOutcome::Victory {
                    writeln!(out, "{name} wins!")?;
                    break;
                }
                if outcome.ends_turn() {
                    announce_turn(game, &mut out)?;
                }
            }
            None => writeln!(
                out,
                "unknown command `{line}` (up, down, left, right, status, quit)"
            )?,
        }
    }

    game.cancel();
    Ok(())
}

fn announce_turn<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    match game.current_player() {
        Some(player) => writeln!(out, "{} to move", player.name()),
        None => Ok(()),
    }
}

fn write_status<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    for player in game.players() {
        let mut line = format!("{} at {}", player.name(), player.position());
        if player.has_treasure() {
            line.push_str(", carrying the treasure");
        }
        if game.is_stuck(player.id()) {
            line.push_str(", stuck");
        }
        writeln!(out, "{line}")?;
    }
    announce_turn(game, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{ConfigError, GameState, Maze};
    use std::io::Cursor;

    fn two_player_game() -> Game {
        let mut maze = Maze::new(2).unwrap();
        maze.place_treasure(Position::new(0, 1));
        let mut game = Game::new(maze, ["ann", "bob"]).unwrap();
        game.start_at(&[Position::new(0, 0), Position::new(1, 0)]).unwrap();
        game
    }

    fn run(game: &mut Game, input: &str) -> String {
        let mut out = Vec::new();
        play(game, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1,2"), Ok(Position::new(1, 2)));
        assert_eq!(parse_position(" -1 , 0"), Ok(Position::new(-1, 0)));
        assert!(parse_position("1").is_err());
        assert!(parse_position("a,2").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("UP"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::parse("l"), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::parse("status"), Some(Command::Status));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("jump"), None);
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "maze", "--size", "3", "--exit", "-1,1", "--swamp", "1,1", "--swamp", "2,2", "a", "b",
        ])
        .unwrap();
        let layout = args.layout().unwrap();
        assert_eq!(layout.size, 3);
        assert_eq!(layout.exit, Some(Position::new(-1, 1)));
        assert_eq!(layout.swamps.len(), 2);
        assert!(layout.build().is_ok());
    }

    #[test]
    fn test_negative_positions_reach_layout() {
        let args = Args::try_parse_from([
            "maze", "--size", "2", "--treasure", "-1,0", "--swamp", "-1,1", "a", "b",
        ])
        .unwrap();
        assert_eq!(args.treasure, Some(Position::new(-1, 0)));
        assert_eq!(args.swamps, vec![Position::new(-1, 1)]);
        assert_eq!(
            args.layout().unwrap().build().unwrap_err(),
            ConfigError::TreasureNotPlaced {
                position: Position::new(-1, 0)
            }
        );
    }

    #[test]
    fn test_args_need_two_players() {
        assert!(Args::try_parse_from(["maze", "solo"]).is_err());
    }

    #[test]
    fn test_play_to_victory() {
        let mut game = two_player_game();
        let transcript = run(&mut game, "right\n\nu\nbogus\nr\nleft\n");

        assert_eq!(
            transcript,
            "ann to move\n\
             ann: found the treasure\n\
             bob to move\n\
             bob: ok\n\
             ann to move\n\
             unknown command `bogus` (up, down, left, right, status, quit)\n\
             ann: victory\n\
             ann wins!\n"
        );
        assert_eq!(game.winner().map(|p| p.name()), Some("ann"));
        assert_eq!(game.state(), GameState::Stopped);
    }

    #[test]
    fn test_wall_hit_keeps_turn_and_status() {
        let mut game = two_player_game();
        let transcript = run(&mut game, "up\nstatus\nquit\nright\n");

        assert_eq!(
            transcript,
            "ann to move\n\
             ann: hit the wall\n\
             ann at (0, 0)\n\
             bob at (1, 0)\n\
             ann to move\n"
        );
        assert_eq!(game.moves(), 1);
        assert_eq!(game.state(), GameState::Stopped);
    }
}
