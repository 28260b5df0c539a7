use rand::SeedableRng;

use avl_vs_treap::{workload, AvlTreeSet, TreapSet, Xorshift128};

fn main() {
    let mut avl = AvlTreeSet::new();
    for key in [3, 1, 4, 1, 5, 9, 2, 6] {
        avl.insert(key);
    }
    assert_eq!(avl.count(4), 1);
    avl.erase(4);
    assert_eq!(avl.count(4), 0);
    println!("avl holds {avl:?} at height {}", avl.height());

    let mut treap = TreapSet::new(Xorshift128::from_time());
    for key in [3, 1, 4, 1, 5, 9, 2, 6] {
        treap.insert(key);
    }
    assert!(treap.contains(9));
    treap.erase(9);
    assert!(!treap.contains(9));
    println!("treap holds {treap:?}");

    let ops = workload::insert_then_search(10_000, 10_000, 10_000, 0);
    let (elapsed, hits) = workload::run_timed(AvlTreeSet::new, &ops);
    println!("avl replayed {} operations in {elapsed:?} ({hits} hits)", ops.len());

    let make = || TreapSet::new(Xorshift128::seed_from_u64(42));
    let (elapsed, hits) = workload::run_timed(make, &ops);
    println!("treap replayed {} operations in {elapsed:?} ({hits} hits)", ops.len());
}
