use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use avl_vs_treap::{workload, AvlTreeSet, TreapSet, Xorshift128};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("avl_insert", |b| {
        let mut set = AvlTreeSet::new();
        b.iter(|| {
            for value in &values {
                set.insert(*value);
            }
        })
    });

    let mut avl = AvlTreeSet::new();
    for value in &values {
        avl.insert(*value);
    }

    c.bench_function("avl_count", |b| {
        b.iter(|| {
            for value in &values {
                black_box(avl.count(*value));
            }
        })
    });

    c.bench_function("avl_erase", |b| {
        let mut set = avl.clone();
        b.iter(|| {
            for value in &values {
                set.erase(*value);
            }
        })
    });

    c.bench_function("treap_insert", |b| {
        let mut set = TreapSet::new(Xorshift128::seed_from_u64(1));
        b.iter(|| {
            for value in &values {
                set.insert(*value);
            }
        })
    });

    let mut treap = TreapSet::new(Xorshift128::seed_from_u64(1));
    for value in &values {
        treap.insert(*value);
    }

    c.bench_function("treap_count", |b| {
        b.iter(|| {
            for value in &values {
                black_box(treap.count(*value));
            }
        })
    });

    c.bench_function("treap_erase", |b| {
        let mut set = treap.clone();
        b.iter(|| {
            for value in &values {
                set.erase(*value);
            }
        })
    });

    let ops = workload::insert_then_search(10_000, 5_000, 5_000, 0);

    c.bench_function("avl_replay", |b| {
        b.iter(|| {
            let mut set = AvlTreeSet::new();
            black_box(workload::replay(&mut set, &ops));
        })
    });

    c.bench_function("treap_replay", |b| {
        b.iter(|| {
            let mut set = TreapSet::new(Xorshift128::seed_from_u64(1));
            black_box(workload::replay(&mut set, &ops));
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
