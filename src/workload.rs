//! Workload generation and replay for racing the tree structures.
//!
//! A workload is a flat list of tagged operations. The generators build
//! deterministic workloads from a seed, [`replay`] drives any
//! [`OrderedSet`] through one and [`run_timed`] wraps a replay in a wall
//! clock measurement, construction and destruction included.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::{AvlTreeSet, TreapSet};

/// One step of a workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Insert(i32),
    Erase(i32),
    Count(i32),
}

/// The uniform face the harness drives the sets through.
pub trait OrderedSet {
    fn insert(&mut self, key: i32);
    fn erase(&mut self, key: i32);
    fn count(&self, key: i32) -> usize;
}

impl OrderedSet for AvlTreeSet {
    fn insert(&mut self, key: i32) {
        AvlTreeSet::insert(self, key);
    }

    fn erase(&mut self, key: i32) {
        AvlTreeSet::erase(self, key);
    }

    fn count(&self, key: i32) -> usize {
        AvlTreeSet::count(self, key)
    }
}

impl<R: RngCore> OrderedSet for TreapSet<R> {
    fn insert(&mut self, key: i32) {
        TreapSet::insert(self, key);
    }

    fn erase(&mut self, key: i32) {
        TreapSet::erase(self, key);
    }

    fn count(&self, key: i32) -> usize {
        TreapSet::count(self, key)
    }
}

/// Generates `values` insertions followed by a shuffled mix of `hits`
/// lookups that succeed and `misses` lookups that fail.
///
/// The inserted keys are the even numbers `2..=2 * values` in shuffled
/// order. Successful lookups draw an even key from that range, failing
/// lookups an odd one, so the outcome of every lookup is known up front.
pub fn insert_then_search(values: usize, hits: usize, misses: usize, seed: u64) -> Vec<Operation> {
    assert!(
        values > 0 || hits == 0,
        "successful lookups need at least one inserted key"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut ops: Vec<Operation> = (1..=values as i32).map(|i| Operation::Insert(2 * i)).collect();
    ops.shuffle(&mut rng);

    ops.reserve(hits + misses);
    for hit in random_bits(misses, hits, &mut rng) {
        let key = if hit {
            2 * rng.gen_range(1..=values as i32)
        } else {
            2 * rng.gen_range(0..=values as i32) + 1
        };
        ops.push(Operation::Count(key));
    }
    ops
}

/// Generates a churn workload: insert `values` keys, erase `erases` of
/// them again in an unrelated order, then probe the whole key range with
/// `searches` lookups.
pub fn insert_erase_search(
    values: usize,
    erases: usize,
    searches: usize,
    seed: u64,
) -> Vec<Operation> {
    assert!(
        erases <= values,
        "cannot erase more distinct keys than were inserted"
    );
    assert!(values > 0 || searches == 0, "lookups need a nonempty key range");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<i32> = (1..=values as i32).map(|i| 2 * i).collect();

    let mut ops = Vec::with_capacity(values + erases + searches);
    keys.shuffle(&mut rng);
    ops.extend(keys.iter().map(|&key| Operation::Insert(key)));

    keys.shuffle(&mut rng);
    ops.extend(keys.iter().take(erases).map(|&key| Operation::Erase(key)));

    for _ in 0..searches {
        ops.push(Operation::Count(2 * rng.gen_range(1..=values as i32)));
    }
    ops
}

/// Generates `operations` steps, each one an insert, erase or lookup of
/// a uniform key in `0..key_range`, all three equally likely. Erases of
/// absent keys simply miss.
pub fn steady_state(operations: usize, key_range: i32, seed: u64) -> Vec<Operation> {
    assert!(key_range > 0, "key range must not be empty");

    let mut rng = StdRng::seed_from_u64(seed);
    (0..operations)
        .map(|_| {
            let key = rng.gen_range(0..key_range);
            match rng.gen_range(0..3) {
                0 => Operation::Insert(key),
                1 => Operation::Erase(key),
                _ => Operation::Count(key),
            }
        })
        .collect()
}

/// Returns a shuffled vector with exactly `zeros` false and `ones` true
/// entries.
fn random_bits(zeros: usize, ones: usize, rng: &mut StdRng) -> Vec<bool> {
    let mut bits = vec![false; zeros + ones];
    bits[..ones].fill(true);
    bits.shuffle(rng);
    bits
}

/// Replays a workload against a set.
/// Returns the total number of lookup hits, which doubles as a cheap
/// cross check between the structures.
pub fn replay<S: OrderedSet>(set: &mut S, ops: &[Operation]) -> u64 {
    let mut hits = 0;
    for op in ops {
        match *op {
            Operation::Insert(key) => set.insert(key),
            Operation::Erase(key) => set.erase(key),
            Operation::Count(key) => hits += set.count(key) as u64,
        }
    }
    hits
}

/// Builds a set with `make`, replays the workload against it and drops
/// the set again, measuring the wall clock time of all three together.
pub fn run_timed<S, F>(make: F, ops: &[Operation]) -> (Duration, u64)
where
    S: OrderedSet,
    F: FnOnce() -> S,
{
    let begin = Instant::now();
    let mut set = make();
    let hits = replay(&mut set, ops);
    drop(set);
    (begin.elapsed(), hits)
}
