use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use debt_ledger::optimization::simplify::{FixedPointSimplifier, Simplifier, SinglePassSimplifier};
use debt_ledger::simulation::random_ledger::{generate_random_ledger_with, GeneratorConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_group(c: &mut Criterion, participants: usize, debts: usize) {
    let config = GeneratorConfig {
        participant_count: participants,
        debt_count: debts,
        ..Default::default()
    };
    let ledger = generate_random_ledger_with(&config, &mut StdRng::seed_from_u64(42))
        .expect("generated names are valid");

    c.bench_function(&format!("single_pass_{participants}_participants"), |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut l| SinglePassSimplifier.simplify(black_box(&mut l)),
            BatchSize::SmallInput,
        )
    });
    c.bench_function(&format!("fixed_point_{participants}_participants"), |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut l| FixedPointSimplifier::default().simplify(black_box(&mut l)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_simplify_10_participants(c: &mut Criterion) {
    bench_group(c, 10, 50);
}

fn bench_simplify_50_participants(c: &mut Criterion) {
    bench_group(c, 50, 400);
}

fn bench_simplify_200_participants(c: &mut Criterion) {
    bench_group(c, 200, 2_000);
}

criterion_group!(
    benches,
    bench_simplify_10_participants,
    bench_simplify_50_participants,
    bench_simplify_200_participants
);
criterion_main!(benches);
