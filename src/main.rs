use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use number_tiles::config::GameConfig;
use number_tiles::engine::{Direction, Game, GameObserver, Tile};
use number_tiles::queue::Scheduler;
use number_tiles::spawn;
use number_tiles::transcript::Transcript;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "number-tiles", version, about = "Play or script the sliding-tile merge puzzle")]
struct Cli {
    /// JSON config file; the flags below override its fields
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Board side length
    #[arg(long, global = true)]
    dimension: Option<usize>,
    /// Tile value that wins the game
    #[arg(long, global = true)]
    threshold: Option<Tile>,
    /// Settle delay between queued moves, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    settle_ms: Option<u64>,
    /// RNG seed for tile spawns (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive game on stdin: w/a/s/d or up/down/left/right, `q` quits
    Play {
        /// Write the event transcript (JSON Lines) here on exit
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,
    },
    /// Apply a fixed move sequence and print the final position
    Script {
        /// Moves such as "wasd", "left,up" or "a w d s"
        #[arg(long, value_name = "MOVES")]
        moves: String,
        /// Write the event transcript (JSON Lines) here
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,
        /// Print a JSON summary instead of the board
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(dimension = config.dimension, threshold = config.threshold, seed, "starting game");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::with_observer(&config, Transcript::new())?;
    spawn::start_new_game(&mut game, &mut rng);

    match cli.cmd {
        Command::Play { transcript } => {
            play(&mut game, &config, &mut rng)?;
            if let Some(path) = transcript {
                write_transcript(&game, &path)?;
            }
        }
        Command::Script { moves, transcript, json } => {
            let moves = parse_moves(&moves)?;
            for dir in moves {
                drive(&mut game, &[dir], &config, &mut rng, false);
                if game.check_game_over() {
                    break;
                }
            }
            if let Some(path) = &transcript {
                write_transcript(&game, path)?;
            }
            if json {
                let summary = serde_json::json!({
                    "score": game.score(),
                    "highest_tile": game.board().highest_tile(),
                    "won": game.has_won().is_some(),
                    "game_over": game.check_game_over(),
                    "events": game.observer().len(),
                });
                println!("{summary}");
            } else {
                print_position(&game);
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(d) = cli.dimension {
        config.dimension = d;
    }
    if let Some(t) = cli.threshold {
        config.threshold = t;
    }
    if let Some(ms) = cli.settle_ms {
        config.settle_delay_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

/// Accepts separated names ("left, up"), separated keys ("a w"), or a run of
/// keys ("awsd").
fn parse_moves(input: &str) -> anyhow::Result<Vec<Direction>> {
    let mut moves = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        if let Ok(dir) = token.parse() {
            moves.push(dir);
        } else if token.chars().all(|c| "wasdWASD".contains(c)) {
            for c in token.chars() {
                moves.push(c.to_string().parse()?);
            }
        } else {
            bail!("unrecognised move {token:?}");
        }
    }
    Ok(moves)
}

/// Queue `moves`, spawning a tile after each one that changes the board and
/// waiting out the settle delay between them when `pace` is set.
fn drive<O: GameObserver>(game: &mut Game<O>, moves: &[Direction], config: &GameConfig, rng: &mut StdRng, pace: bool) {
    let changed = Rc::new(Cell::new(false));
    for &dir in moves {
        let flag = Rc::clone(&changed);
        if !game.queue_move(dir, move |c| flag.set(flag.get() || c)) {
            warn!(%dir, "move queue full, input dropped");
        }
    }
    loop {
        if changed.replace(false) {
            spawn::insert_random_tile(game, rng);
        }
        if !game.scheduler().is_pending() {
            break;
        }
        if pace {
            thread::sleep(config.settle_delay());
        }
        game.resume();
    }
}

fn play(game: &mut Game<Transcript>, config: &GameConfig, rng: &mut StdRng) -> anyhow::Result<()> {
    print_position(game);
    let stdin = io::stdin();
    let mut announced_win = false;
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let moves = match parse_moves(trimmed) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        drive(game, &moves, config, rng, true);
        print_position(game);

        if let (false, Some(at)) = (announced_win, game.has_won()) {
            println!("You reached {} at {:?}!", game.threshold(), at);
            announced_win = true;
        }
        if game.check_game_over() {
            println!("Game over. Final score: {}", game.score());
            break;
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn print_position<O: GameObserver>(game: &Game<O>) {
    println!("{}", game.board());
    println!("score: {}", game.score());
}

fn write_transcript(game: &Game<Transcript>, path: &Path) -> anyhow::Result<()> {
    game.observer()
        .write_to_path(path)
        .with_context(|| format!("writing transcript {}", path.display()))?;
    info!(events = game.observer().len(), path = %path.display(), "transcript written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_spellings() {
        use Direction::*;
        assert_eq!(parse_moves("wasd").unwrap(), vec![Up, Left, Down, Right]);
        assert_eq!(parse_moves("left, up  right").unwrap(), vec![Left, Up, Right]);
        assert_eq!(parse_moves("a d").unwrap(), vec![Left, Right]);
        assert!(parse_moves("").unwrap().is_empty());
        assert!(parse_moves("sideways").is_err());
    }

    #[test]
    fn drive_spawns_once_per_changing_move() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = Game::new(&config).unwrap();
        game.insert_tile((0, 0), 2);
        drive(&mut game, &[Direction::Left, Direction::Right], &config, &mut rng, false);
        assert_eq!(game.board().count_empty(), 14);
        assert!(!game.scheduler().is_pending());
        assert_eq!(game.pending_moves(), 0);
    }
}
