//! Command line benchmark racing the AVL tree against the treap.
//!
//! Generates a workload from the command line parameters, replays it
//! against the selected structures and prints wall clock times. Set
//! `RUST_LOG=debug` to see what is being generated.

use clap::{Parser, ValueEnum};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use avl_vs_treap::workload::{self, Operation, OrderedSet};
use avl_vs_treap::{AvlTreeSet, TreapSet, Xorshift128};

/// Race an AVL tree and a treap over a generated workload.
#[derive(Parser, Debug)]
#[command(name = "speedtest", version)]
struct Cli {
    /// Which structure to measure
    #[arg(long, value_enum, default_value = "both")]
    structure: Structure,

    /// Which workload to generate
    #[arg(long, value_enum, default_value = "insert-search")]
    workload: Workload,

    /// Number of keys inserted by the insert-search and churn workloads
    #[arg(long, default_value_t = 100_000)]
    values: usize,

    /// Number of successful lookups in the insert-search workload
    #[arg(long, default_value_t = 100_000)]
    hits: usize,

    /// Number of failing lookups in the insert-search workload
    #[arg(long, default_value_t = 100_000)]
    misses: usize,

    /// Number of keys erased again by the churn workload
    #[arg(long, default_value_t = 50_000)]
    erases: usize,

    /// Number of lookups in the churn workload
    #[arg(long, default_value_t = 100_000)]
    searches: usize,

    /// Number of steps in the mixed workload
    #[arg(long, default_value_t = 300_000)]
    operations: usize,

    /// Key range of the mixed workload
    #[arg(long, default_value_t = 100_000)]
    key_range: i32,

    /// Seed of the workload generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Seed of the generator the treap draws its priorities from
    #[arg(long, default_value_t = 42)]
    tree_seed: u64,

    /// Which generator the treap draws its priorities from
    #[arg(long, value_enum, default_value = "xorshift")]
    rng: RngKind,

    /// How often to replay the workload per structure
    #[arg(long, default_value_t = 3)]
    runs: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Structure {
    /// Only the AVL tree
    Avl,
    /// Only the treap
    Treap,
    /// Both structures, one after the other
    Both,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Workload {
    /// Insert every key, then look keys up with a fixed hit rate
    InsertSearch,
    /// Insert every key, erase part of them, then look keys up
    Churn,
    /// Random inserts, erases and lookups in equal parts
    Mixed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RngKind {
    /// The xorshift generator, as fast as the priorities need to be
    Xorshift,
    /// The standard generator of the rand crate
    Std,
}

fn run_structure<S, F>(name: &str, runs: usize, make: F, ops: &[Operation])
where
    S: OrderedSet,
    F: Fn() -> S,
{
    let mut times = Vec::with_capacity(runs);
    for run in 0..runs {
        let (elapsed, hits) = workload::run_timed(&make, ops);
        println!("{name:<5} run {run}: {elapsed:?} ({hits} lookup hits)");
        times.push(elapsed);
    }
    times.sort();
    if let Some(&median) = times.get(times.len() / 2) {
        println!("{name:<5} median: {median:?}");
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let ops = match cli.workload {
        Workload::InsertSearch => {
            workload::insert_then_search(cli.values, cli.hits, cli.misses, cli.seed)
        }
        Workload::Churn => {
            workload::insert_erase_search(cli.values, cli.erases, cli.searches, cli.seed)
        }
        Workload::Mixed => workload::steady_state(cli.operations, cli.key_range, cli.seed),
    };
    debug!("generated {} operations from seed {}", ops.len(), cli.seed);

    if cli.structure != Structure::Treap {
        run_structure("avl", cli.runs, AvlTreeSet::new, &ops);
    }
    if cli.structure != Structure::Avl {
        // Every run draws from a freshly seeded generator and builds the
        // same tree.
        match cli.rng {
            RngKind::Xorshift => {
                let seed = cli.tree_seed;
                run_structure(
                    "treap",
                    cli.runs,
                    move || TreapSet::new(Xorshift128::seed_from_u64(seed)),
                    &ops,
                );
            }
            RngKind::Std => {
                let seed = cli.tree_seed;
                run_structure(
                    "treap",
                    cli.runs,
                    move || TreapSet::new(StdRng::seed_from_u64(seed)),
                    &ops,
                );
            }
        }
    }
}
