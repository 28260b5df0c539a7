//! An ordered set of integers implemented with a treap.
//!
//! Each node carries a priority drawn from a random number generator
//! when its key is inserted. Keys follow binary search order, priorities
//! follow max heap order, and maintaining both through rotations keeps
//! the tree balanced in expectation.

use std::cmp::Ordering;
use std::fmt;

use rand::RngCore;

use crate::rotate::{rotate_left, rotate_right, BinaryNode};

type Link = Option<Box<Node>>;

#[derive(Clone)]
struct Node {
    key: i32,
    priority: u32,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: i32, priority: u32) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }
}

impl BinaryNode for Node {
    fn left_mut(&mut self) -> &mut Link {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link {
        &mut self.right
    }
}

/// Returns the slot holding the given key, or the empty slot where the
/// key would have to be inserted.
fn search(link: &Link, key: i32) -> &Link {
    match link.as_deref() {
        None => link,
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => search(&node.left, key),
            Ordering::Greater => search(&node.right, key),
            Ordering::Equal => link,
        },
    }
}

/// Mutable twin of [`search`], used to delete the found node in place.
fn search_mut(link: &mut Link, key: i32) -> &mut Link {
    let ordering = match link.as_deref() {
        None => return link,
        Some(node) => key.cmp(&node.key),
    };
    match ordering {
        Ordering::Less => search_mut(&mut link.as_deref_mut().unwrap().left, key),
        Ordering::Greater => search_mut(&mut link.as_deref_mut().unwrap().right, key),
        Ordering::Equal => link,
    }
}

/// Inserts a key with the given priority, rotating the new node up as
/// long as its priority exceeds its parent's.
/// Returns false if the key was already present.
fn insert(link: &mut Link, key: i32, priority: u32) -> bool {
    let node = match link {
        None => {
            *link = Some(Box::new(Node::new(key, priority)));
            return true;
        }
        Some(node) => node,
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let inserted = insert(&mut node.left, key, priority);
            if node.left.as_deref().unwrap().priority > node.priority {
                rotate_right(link);
            }
            inserted
        }
        Ordering::Greater => {
            let inserted = insert(&mut node.right, key, priority);
            if node.right.as_deref().unwrap().priority > node.priority {
                rotate_left(link);
            }
            inserted
        }
        Ordering::Equal => false,
    }
}

/// Deletes the node at the root of a nonempty subtree.
/// The node is rotated down below its higher priority child until one of
/// its children is absent, then spliced out. On a priority tie the left
/// child is promoted.
fn root_delete(link: &mut Link) {
    let node = link
        .as_deref_mut()
        .expect("cannot delete the root of an empty tree");
    if node.left.is_none() {
        let root = link.take().unwrap();
        *link = root.right;
    } else if node.right.is_none() {
        let root = link.take().unwrap();
        *link = root.left;
    } else if node.left.as_deref().unwrap().priority < node.right.as_deref().unwrap().priority {
        rotate_left(link);
        root_delete(&mut link.as_deref_mut().unwrap().left);
    } else {
        rotate_right(link);
        root_delete(&mut link.as_deref_mut().unwrap().right);
    }
}

/// Removes a key from the subtree.
/// Returns whether the key was present.
fn remove(link: &mut Link, key: i32) -> bool {
    let slot = search_mut(link, key);
    if slot.is_some() {
        root_delete(slot);
        true
    } else {
        false
    }
}

fn for_each_key<F: FnMut(i32)>(link: &Link, f: &mut F) {
    if let Some(node) = link.as_deref() {
        for_each_key(&node.left, f);
        f(node.key);
        for_each_key(&node.right, f);
    }
}

#[cfg(any(test, feature = "consistency_check"))]
fn check_node(link: &Link, lower: Option<i32>, upper: Option<i32>) -> usize {
    let node = match link.as_deref() {
        None => return 0,
        Some(node) => node,
    };

    // Check search order against the bounds inherited from ancestors
    if let Some(lower) = lower {
        assert!(lower < node.key);
    }
    if let Some(upper) = upper {
        assert!(node.key < upper);
    }

    // Check heap order
    if let Some(left) = node.left.as_deref() {
        assert!(left.priority <= node.priority);
    }
    if let Some(right) = node.right.as_deref() {
        assert!(right.priority <= node.priority);
    }

    let num_left = check_node(&node.left, lower, Some(node.key));
    let num_right = check_node(&node.right, Some(node.key), upper);
    num_left + num_right + 1
}

/// An ordered set of `i32` keys implemented with a treap.
///
/// The set owns a random number generator of the caller's choice and
/// draws one priority from it per `insert` call.
///
/// ```
/// use avl_vs_treap::{TreapSet, Xorshift128};
/// use rand::SeedableRng;
///
/// let mut set = TreapSet::new(Xorshift128::seed_from_u64(42));
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
/// assert_eq!(set.count(2), 1);
/// set.erase(2);
/// assert_eq!(set.count(2), 0);
/// ```
#[derive(Clone)]
pub struct TreapSet<R: RngCore> {
    root: Link,
    num_nodes: usize,
    rng: R,
}

impl<R: RngCore> TreapSet<R> {
    /// Creates an empty set drawing priorities from the given generator.
    pub fn new(rng: R) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            rng,
        }
    }

    /// Returns true if the set contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Clears the set, deallocating all memory.
    /// The random number generator keeps its state.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns true if the set contains the given key.
    pub fn contains(&self, key: i32) -> bool {
        search(&self.root, key).is_some()
    }

    /// Returns how many times the key is in the set, either 0 or 1.
    pub fn count(&self, key: i32) -> usize {
        if self.contains(key) {
            1
        } else {
            0
        }
    }

    /// Inserts a key into the set with a freshly drawn priority.
    /// Returns whether the key was absent before.
    pub fn insert(&mut self, key: i32) -> bool {
        let priority = self.rng.next_u32();
        let inserted = insert(&mut self.root, key, priority);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the set.
    /// Returns whether the key was present.
    pub fn erase(&mut self, key: i32) -> bool {
        let removed = remove(&mut self.root, key);
        if removed {
            debug_assert!(self.num_nodes > 0);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Calls a closure on every key in ascending order.
    pub fn for_each<F: FnMut(i32)>(&self, mut f: F) {
        for_each_key(&self.root, &mut f);
    }

    /// Asserts that the search order and the heap order hold everywhere
    /// in the tree.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = check_node(&self.root, None, None);
        assert_eq!(num_nodes, self.num_nodes);
    }
}

impl<R: RngCore> fmt::Debug for TreapSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut entries = f.debug_set();
        self.for_each(|key| {
            entries.entry(&key);
        });
        entries.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use rand::SeedableRng;

    use super::*;
    use crate::Xorshift128;

    fn leaf(key: i32, priority: u32) -> Link {
        branch(key, priority, None, None)
    }

    fn branch(key: i32, priority: u32, left: Link, right: Link) -> Link {
        Some(Box::new(Node {
            key,
            priority,
            left,
            right,
        }))
    }

    #[test]
    fn test_search_returns_matching_slot() {
        let tree = branch(5, 0, leaf(3, 0), leaf(8, 0));
        let root = tree.as_deref().unwrap();
        let left = root.left.as_deref().unwrap();
        let right = root.right.as_deref().unwrap();

        assert!(ptr::eq(search(&tree, 5), &tree));
        assert!(ptr::eq(search(&tree, 3), &root.left));
        assert!(ptr::eq(search(&tree, 8), &root.right));

        // Absent keys land on the empty slot where they belong
        assert!(ptr::eq(search(&tree, 2), &left.left));
        assert!(ptr::eq(search(&tree, 4), &left.right));
        assert!(ptr::eq(search(&tree, 6), &right.left));
        assert!(ptr::eq(search(&tree, 9), &right.right));
    }

    #[test]
    fn test_insert_keeps_heap_order() {
        let mut tree: Link = None;
        insert(&mut tree, 2, 50);
        insert(&mut tree, 9, 20);
        insert(&mut tree, 5, 80);

        // 5 carries the highest priority and must have become the root
        let root = tree.as_deref().unwrap();
        assert_eq!((root.key, root.priority), (5, 80));
        assert_eq!(root.left.as_deref().unwrap().key, 2);
        assert_eq!(root.right.as_deref().unwrap().key, 9);

        // 4 ranks below both of its ancestors and must stay under 2
        insert(&mut tree, 4, 40);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 5);
        assert_eq!(root.right.as_deref().unwrap().key, 9);
        let left = root.left.as_deref().unwrap();
        assert_eq!(left.key, 2);
        assert_eq!(left.right.as_deref().unwrap().key, 4);

        root_delete(&mut tree);
        let root = tree.as_deref().unwrap();
        assert_eq!((root.key, root.priority), (2, 50));
        assert!(root.left.is_none());
        let right = root.right.as_deref().unwrap();
        assert_eq!((right.key, right.priority), (4, 40));
        assert_eq!(right.right.as_deref().unwrap().key, 9);
    }

    #[test]
    fn test_insert_and_remove_rotations() {
        let mut tree = branch(5, 80, leaf(2, 50), leaf(9, 20));

        insert(&mut tree, 4, 40);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 5);
        assert_eq!(root.left.as_deref().unwrap().key, 2);
        assert_eq!(root.left.as_deref().unwrap().right.as_deref().unwrap().key, 4);

        insert(&mut tree, 3, 70);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 5);
        let left = root.left.as_deref().unwrap();
        assert_eq!(left.key, 3);
        assert_eq!(left.left.as_deref().unwrap().key, 2);
        assert_eq!(left.right.as_deref().unwrap().key, 4);

        insert(&mut tree, 6, 90);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 6);
        assert_eq!(root.left.as_deref().unwrap().key, 5);
        assert_eq!(root.right.as_deref().unwrap().key, 9);

        insert(&mut tree, 7, 10);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 6);
        let right = root.right.as_deref().unwrap();
        assert_eq!(right.key, 9);
        assert_eq!(right.left.as_deref().unwrap().key, 7);

        insert(&mut tree, 8, 60);
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 6);
        let right = root.right.as_deref().unwrap();
        assert_eq!(right.key, 8);
        assert_eq!(right.left.as_deref().unwrap().key, 7);
        assert_eq!(right.right.as_deref().unwrap().key, 9);

        assert!(remove(&mut tree, 8));
        let root = tree.as_deref().unwrap();
        let right = root.right.as_deref().unwrap();
        assert_eq!(right.key, 9);
        assert_eq!(right.left.as_deref().unwrap().key, 7);

        assert!(remove(&mut tree, 7));
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 6);
        assert_eq!(root.left.as_deref().unwrap().key, 5);
        assert_eq!(root.right.as_deref().unwrap().key, 9);

        assert!(remove(&mut tree, 4));
        assert!(remove(&mut tree, 3));
        assert!(remove(&mut tree, 6));
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 5);
        assert_eq!(root.left.as_deref().unwrap().key, 2);
        assert_eq!(root.right.as_deref().unwrap().key, 9);

        assert!(remove(&mut tree, 5));
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 2);
        assert!(root.left.is_none());
        assert_eq!(root.right.as_deref().unwrap().key, 9);

        // Removing an absent key leaves the tree untouched
        assert!(!remove(&mut tree, 5));
        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 2);
        assert_eq!(root.right.as_deref().unwrap().key, 9);
    }

    #[test]
    fn test_root_delete_prefers_left_on_tie() {
        let mut tree = branch(2, 10, leaf(1, 5), leaf(3, 5));
        root_delete(&mut tree);

        let root = tree.as_deref().unwrap();
        assert_eq!(root.key, 1);
        assert!(root.left.is_none());
        assert_eq!(root.right.as_deref().unwrap().key, 3);
    }

    #[test]
    #[should_panic(expected = "empty tree")]
    fn test_root_delete_empty_tree() {
        let mut tree: Link = None;
        root_delete(&mut tree);
    }

    #[test]
    fn test_duplicate_insert_and_absent_erase() {
        let mut set = TreapSet::new(Xorshift128::seed_from_u64(2));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert_eq!(set.len(), 1);
        assert_eq!(set.count(7), 1);

        assert!(!set.erase(8));
        assert_eq!(set.len(), 1);
        assert!(set.erase(7));
        assert!(!set.erase(7));
        assert!(set.is_empty());
        set.check_consistency();
    }

    #[test]
    fn test_for_each_ascending() {
        let mut set = TreapSet::new(Xorshift128::seed_from_u64(4));
        for key in [3, 1, 4, 1, 5, 9, 2, 6] {
            set.insert(key);
        }
        let mut keys = Vec::new();
        set.for_each(|key| keys.push(key));
        assert_eq!(keys, [1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(format!("{:?}", set), "{1, 2, 3, 4, 5, 6, 9}");
    }
}
