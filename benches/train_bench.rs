//! Benchmarks for the self-play trainer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nim_selfplay::{Nim, QConfig, Trainer};

fn single_episode_benchmark(c: &mut Criterion) {
    let config = QConfig::default().with_seed(42);
    let mut trainer = Trainer::new(config).unwrap();

    c.bench_function("canonical_single_episode", |b| {
        b.iter(|| {
            trainer.run_episode();
            black_box(trainer.episodes())
        })
    });
}

fn train_1000_episodes_benchmark(c: &mut Criterion) {
    c.bench_function("canonical_1000_episodes", |b| {
        b.iter(|| {
            let config = QConfig::default().with_seed(42);
            let mut trainer = Trainer::new(config).unwrap();
            trainer.train(black_box(1000));
            black_box(trainer.table().len())
        })
    });
}

fn legal_moves_benchmark(c: &mut Criterion) {
    c.bench_function("legal_moves_1357", |b| {
        b.iter(|| black_box(Nim::legal_moves(black_box(&[1, 3, 5, 7]))))
    });
}

criterion_group!(
    benches,
    single_episode_benchmark,
    train_1000_episodes_benchmark,
    legal_moves_benchmark
);
criterion_main!(benches);
