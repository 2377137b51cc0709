//! Step throughput benchmarks.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stack_chain::{play_episode, FirstLegal, StackGame, UniformRandom};

/// Mask plus step, the per-decision cost an agent loop pays.
fn benchmark_mask_and_step(c: &mut Criterion) {
    let mut game = StackGame::new(1).unwrap();

    c.bench_function("mask_and_step", |b| {
        b.iter(|| {
            if game.is_terminated() {
                game.reset(None).unwrap();
            }
            let mask = game.action_masks();
            let action = mask.legal_actions().next().unwrap_or(15);
            black_box(game.step(black_box(action)).unwrap())
        });
    });
}

/// Full episodes under each baseline policy.
fn benchmark_episodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Episode");

    for seed in [1u64, 42] {
        group.bench_with_input(BenchmarkId::new("uniform", seed), &seed, |b, &seed| {
            let mut game = StackGame::new(0).unwrap();
            let mut policy = UniformRandom::new(seed);
            b.iter(|| black_box(play_episode(&mut game, &mut policy, seed).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("first_legal", seed), &seed, |b, &seed| {
            let mut game = StackGame::new(0).unwrap();
            b.iter(|| black_box(play_episode(&mut game, &mut FirstLegal, seed).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_mask_and_step, benchmark_episodes);
criterion_main!(benches);
