use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use number_tiles::config::GameConfig;
use number_tiles::engine::{merge, Cell, Direction, Game};
use number_tiles::spawn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn line_corpus() -> Vec<Vec<Cell>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..256)
        .map(|_| {
            (0..4)
                .map(|_| if rng.gen_bool(0.3) { Cell::Empty } else { Cell::Tile(1u64 << rng.gen_range(1..=5u32)) })
                .collect()
        })
        .collect()
}

fn bench_merge_line(c: &mut Criterion) {
    let lines = line_corpus();
    c.bench_function("merge/line4", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for line in &lines { acc += merge(black_box(line)).len(); }
            black_box(acc)
        })
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let config = GameConfig::default();
    for dir in Direction::ALL {
        c.bench_function(&format!("game/apply_move_{dir}"), |bch| {
            bch.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(9);
                    let mut game = Game::new(&config).unwrap();
                    spawn::start_new_game(&mut game, &mut rng);
                    for _ in 0..10 { spawn::insert_random_tile(&mut game, &mut rng); }
                    game
                },
                |mut game| black_box(game.apply_move(dir)),
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_random_game(c: &mut Criterion) {
    let config = GameConfig::default();
    c.bench_function("game/random_playout", |bch| {
        bch.iter_batched(
            || StdRng::seed_from_u64(7),
            |mut rng| {
                let mut game = Game::new(&config).unwrap();
                spawn::start_new_game(&mut game, &mut rng);
                while !game.check_game_over() {
                    let dir = Direction::ALL[rng.gen_range(0..4)];
                    spawn::make_move(&mut game, dir, &mut rng);
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(engine_ops, bench_merge_line, bench_apply_move, bench_random_game);
criterion_main!(engine_ops);
