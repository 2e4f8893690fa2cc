use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gomoku_ai::{AiConfig, AiEngine, Difficulty, Evaluator, MoveGenerator};
use protocol::{Diagram, Stone};

const MIDGAME: &str = "\
...............
...............
...............
...............
...............
.....O.........
......XO.......
......XXO......
.....OX........
.......X.......
...............
...............
...............
...............
...............";

fn bench_evaluate(c: &mut Criterion) {
    let board = Diagram::parse(MIDGAME).unwrap();
    c.bench_function("evaluate/midgame", |b| {
        b.iter(|| black_box(Evaluator::evaluate(black_box(&board), Stone::Black)))
    });
}

fn bench_candidates(c: &mut Criterion) {
    let mut board = Diagram::parse(MIDGAME).unwrap();
    c.bench_function("candidates/midgame", |b| {
        b.iter(|| black_box(MoveGenerator::candidates(&mut board, Stone::Black, 20)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = Diagram::parse(MIDGAME).unwrap();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        group.bench_function(difficulty.display_name(), |b| {
            b.iter(|| {
                // 每次重新建引擎，避免置换表跨迭代命中
                let mut engine = AiEngine::new(AiConfig::from_difficulty(difficulty));
                black_box(engine.best_move(&board, Stone::Black))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_candidates, bench_search);
criterion_main!(benches);
