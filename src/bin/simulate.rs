use std::io;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use number_tiles::config::GameConfig;
use number_tiles::engine::{Direction, Game, Score, Tile};
use number_tiles::spawn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Play many random-move games in parallel and summarise the results")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,
    /// Base seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Stop a game after this many changing moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// JSON config file (dimension, threshold)
    #[arg(long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,
    /// Print one JSON line per game instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct GameResult {
    seed: u64,
    score: Score,
    highest_tile: Tile,
    moves: u64,
    won: bool,
}

fn run_single_game(config: &GameConfig, seed: u64, max_moves: Option<u64>) -> anyhow::Result<GameResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(config)?;
    spawn::start_new_game(&mut game, &mut rng);
    let mut moves: u64 = 0;
    while !game.check_game_over() {
        if let Some(limit) = max_moves {
            if moves >= limit { break; }
        }
        let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        if spawn::make_move(&mut game, dir, &mut rng) {
            moves += 1;
        }
    }
    Ok(GameResult {
        seed,
        score: game.score(),
        highest_tile: game.board().highest_tile(),
        moves,
        won: game.has_won().is_some(),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    info!(games = args.games, dimension = config.dimension, threshold = config.threshold, "simulating");

    let start = Instant::now();
    let results = (0..args.games)
        .into_par_iter()
        .map(|i| run_single_game(&config, args.seed.wrapping_add(i), args.max_moves))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);

    if args.json {
        for r in &results {
            println!("{}", serde_json::to_string(r)?);
        }
        return Ok(());
    }

    let count = results.len().max(1) as f64;
    let total_moves: u64 = results.iter().map(|r| r.moves).sum();
    let mean_score = results.iter().map(|r| r.score as f64).sum::<f64>() / count;
    let best = results.iter().max_by_key(|r| r.score);
    let highest = results.iter().map(|r| r.highest_tile).max().unwrap_or(0);
    let wins = results.iter().filter(|r| r.won).count();

    println!("games: {}", results.len());
    println!("mean_score: {:.1}", mean_score);
    if let Some(b) = best {
        println!("best_score: {} (seed {})", b.score, b.seed);
    }
    println!("highest_tile: {}", highest);
    println!("wins: {}", wins);
    println!("moves/sec: {:.1}", total_moves as f64 / elapsed);
    Ok(())
}
