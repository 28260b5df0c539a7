//! An AVL tree and a treap, racing each other.
//!
//! Both structures implement the same ordered set of `i32` keys and
//! share nothing but the rotation primitive. The [`workload`] module
//! generates operation sequences and times either structure replaying
//! them; the `speedtest` binary wraps that into a command line.

mod avl;
mod rotate;
mod treap;
pub mod workload;
mod xorshift;

pub use avl::AvlTreeSet;
pub use treap::TreapSet;
pub use xorshift::{Xorshift, Xorshift128};
