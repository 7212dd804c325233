use banditsim::{run, Environment, SimulationConfig, Strategy, Ucb1};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    for &arms in &[2usize, 10, 50] {
        let cfg = SimulationConfig::new(arms, 1_000, 0.1).seed(1);
        group.bench_with_input(BenchmarkId::new("rounds_1000", arms), &cfg, |b, &cfg| {
            b.iter(|| black_box(run(black_box(cfg)).unwrap()))
        });
    }
    group.finish();
}

fn bench_ucb_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("ucb1_select_update");
    for &arms in &[10usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(arms), &arms, |b, &arms| {
            let mut env = Environment::with_seed(arms, 3).unwrap();
            let mut ucb = Ucb1::new(arms).unwrap();
            b.iter(|| {
                let a = ucb.select_arm();
                let r = env.pull(a).unwrap();
                ucb.update(black_box(a), r).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run, bench_ucb_select);
criterion_main!(benches);
