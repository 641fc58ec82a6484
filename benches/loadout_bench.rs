//! Criterion benchmarks for the loadout branch-and-bound engine.
//!
//! Uses seeded random catalogs with a weight cap and two priorities,
//! including items shared between slots (ring/trinket style).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_loadout::bnb::{BnbConfig, BnbRunner};
use u_loadout::model::{Constraint, Item, LoadoutProblem, Priority, Slot};

const ARMOR: u32 = 1;
const WEIGHT: u32 = 2;
const FIRE_RES: u32 = 3;

fn random_problem(slots: usize, items_per_slot: usize, seed: u64) -> LoadoutProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id = 0u32;

    let mut random_item = |rng: &mut StdRng| {
        next_id += 1;
        Item::new(next_id, format!("item{next_id}"))
            .with_stat(ARMOR, rng.random_range(0..50) as f64)
            .with_stat(WEIGHT, rng.random_range(1..20) as f64)
            .with_stat(FIRE_RES, rng.random_range(0..15) as f64)
    };

    let mut list: Vec<Slot> = (0..slots)
        .map(|s| {
            let items: Vec<Item> = (0..items_per_slot).map(|_| random_item(&mut rng)).collect();
            Slot::new(s as u32, format!("slot{s}")).with_items(items)
        })
        .collect();

    // Two ring slots drawing from the same pool.
    let rings: Vec<Item> = (0..items_per_slot).map(|_| random_item(&mut rng)).collect();
    list.push(Slot::new(100, "Ring1").with_items(rings.clone()));
    list.push(Slot::new(101, "Ring2").with_items(rings));

    let cap = (slots as f64 + 2.0) * 8.0;
    LoadoutProblem::new(list)
        .with_constraint(Constraint::at_most(WEIGHT, cap))
        .with_constraint(Constraint::at_least(FIRE_RES, 10.0))
        .with_priority(Priority::new(ARMOR, 1.0))
        .with_priority(Priority::new(FIRE_RES, 0.5))
}

fn bench_slot_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_slots");
    group.sample_size(10);

    for &slots in &[4, 6, 8] {
        let problem = random_problem(slots, 8, 42);
        let config = BnbConfig::default().with_top_n(5);
        group.bench_with_input(
            BenchmarkId::from_parameter(slots),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let output = BnbRunner::run(black_box(p), black_box(c));
                    black_box(output)
                })
            },
        );
    }
    group.finish();
}

fn bench_top_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_top_n");
    group.sample_size(10);

    let problem = random_problem(6, 10, 7);
    for &top_n in &[1, 5, 20] {
        let config = BnbConfig::default().with_top_n(top_n);
        group.bench_with_input(BenchmarkId::from_parameter(top_n), &config, |b, c| {
            b.iter(|| {
                let output = BnbRunner::run(black_box(&problem), black_box(c));
                black_box(output)
            })
        });
    }
    group.finish();
}

fn bench_presort(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_presort");
    group.sample_size(10);

    let problem = random_problem(6, 10, 11);
    for presort in [true, false] {
        let config = BnbConfig::default().with_presort(presort);
        group.bench_with_input(BenchmarkId::from_parameter(presort), &config, |b, c| {
            b.iter(|| {
                let output = BnbRunner::run(black_box(&problem), black_box(c));
                black_box(output)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_slot_count, bench_top_n, bench_presort);
criterion_main!(benches);
