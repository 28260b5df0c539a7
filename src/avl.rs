//! An ordered set of integers implemented with an AVL tree.
//!
//! Every node stores the height of its subtree. After each insert and
//! erase the tree walks back up the search path and restores the AVL
//! condition (child heights differ by at most one) with rotations.

use std::cmp::{self, Ordering};
use std::fmt;

use crate::rotate::{self, BinaryNode};

type Link = Option<Box<Node>>;

#[derive(Clone)]
struct Node {
    key: i32,
    height: i32,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: i32) -> Self {
        Node {
            key,
            height: 0,
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

/// Returns the height of the tree in the given slot, -1 if it is empty.
fn height(link: &Link) -> i32 {
    match link.as_deref() {
        None => -1,
        Some(node) => node.height,
    }
}

/// Recomputes the height of a node from its children.
fn update_height(node: &mut Node) {
    node.height = cmp::max(height(&node.left), height(&node.right)) + 1;
}

/// Performs a left rotation and refreshes the heights, demoted node first.
fn rotate_left(link: &mut Link) {
    rotate::rotate_left(link);
    let node = link.as_deref_mut().unwrap();
    update_height(node.left.as_deref_mut().unwrap());
    update_height(node);
}

/// Performs a right rotation and refreshes the heights, demoted node first.
fn rotate_right(link: &mut Link) {
    rotate::rotate_right(link);
    let node = link.as_deref_mut().unwrap();
    update_height(node.right.as_deref_mut().unwrap());
    update_height(node);
}

/// Restores the AVL condition at the root of the given subtree and brings
/// its height up to date. The children must be AVL trees whose heights
/// differ by at most two, which always holds one level above a single
/// insert or remove.
fn fix(link: &mut Link) {
    let node = link.as_deref_mut().expect("cannot rebalance an empty tree");
    let left_height = height(&node.left);
    let right_height = height(&node.right);
    debug_assert!(left_height <= right_height + 2);
    debug_assert!(right_height <= left_height + 2);

    if left_height < right_height - 1 {
        // The right subtree is too tall.
        let right = node.right.as_deref().unwrap();
        if height(&right.left) > height(&right.right) {
            rotate_right(&mut node.right);
        }
        rotate_left(link);
    } else if right_height < left_height - 1 {
        // The left subtree is too tall.
        let left = node.left.as_deref().unwrap();
        if height(&left.right) > height(&left.left) {
            rotate_left(&mut node.left);
        }
        rotate_right(link);
    } else {
        update_height(node);
    }
}

/// Inserts a key into the subtree, keeping it an AVL tree.
/// Returns false if the key was already present.
fn insert(link: &mut Link, key: i32) -> bool {
    let inserted = match link {
        None => {
            *link = Some(Box::new(Node::new(key)));
            true
        }
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => insert(&mut node.left, key),
            Ordering::Greater => insert(&mut node.right, key),
            Ordering::Equal => false,
        },
    };
    fix(link);
    inserted
}

/// Detaches the node holding the largest key of a nonempty subtree.
/// The subtree stays an AVL tree and shrinks by at most one in height.
fn remove_max(link: &mut Link) -> Box<Node> {
    let node = link
        .as_deref_mut()
        .expect("cannot remove the maximum of an empty tree");
    if node.right.is_some() {
        let max = remove_max(&mut node.right);
        fix(link);
        max
    } else {
        let mut max = link.take().unwrap();
        *link = max.left.take();
        max
    }
}

/// Removes a key from the subtree, keeping it an AVL tree.
/// Returns whether the key was present.
fn remove(link: &mut Link, key: i32) -> bool {
    let node = match link.as_deref_mut() {
        None => return false,
        Some(node) => node,
    };
    let removed = match key.cmp(&node.key) {
        Ordering::Less => remove(&mut node.left, key),
        Ordering::Greater => remove(&mut node.right, key),
        Ordering::Equal => {
            if node.left.is_none() {
                // The right child moves up, possibly leaving the slot empty.
                let root = link.take().unwrap();
                *link = root.right;
                return true;
            }
            // Replace the root by the largest key of the left subtree,
            // which keeps the search order intact.
            let mut max = remove_max(&mut node.left);
            max.left = node.left.take();
            max.right = node.right.take();
            *link = Some(max);
            true
        }
    };
    fix(link);
    removed
}

/// Tells whether the subtree contains the given key.
fn contains(link: &Link, key: i32) -> bool {
    match link.as_deref() {
        None => false,
        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => contains(&node.left, key),
            Ordering::Greater => contains(&node.right, key),
            Ordering::Equal => true,
        },
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

    // Check stored height and AVL condition
    let left_height = height(&node.left);
    let right_height = height(&node.right);
    assert_eq!(node.height, cmp::max(left_height, right_height) + 1);
    assert!(left_height <= right_height + 1);
    assert!(right_height <= left_height + 1);

    let num_left = check_node(&node.left, lower, Some(node.key));
    let num_right = check_node(&node.right, Some(node.key), upper);
    num_left + num_right + 1
}

/// An ordered set of `i32` keys implemented with an AVL tree.
///
/// The tree rebalances itself on every mutation, so `insert`, `erase` and
/// `count` run in logarithmic time even for adversarial key orders.
///
/// ```
/// use avl_vs_treap::AvlTreeSet;
///
/// let mut set = AvlTreeSet::new();
/// set.insert(2);
/// set.insert(1);
/// set.insert(3);
/// assert_eq!(set.count(2), 1);
/// set.erase(2);
/// assert_eq!(set.count(2), 0);
/// ```
#[derive(Clone)]
pub struct AvlTreeSet {
    root: Link,
    num_nodes: usize,
}

impl AvlTreeSet {
    /// Creates an empty set.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
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

    /// Returns the height of the tree, -1 if the set is empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns true if the set contains the given key.
    pub fn contains(&self, key: i32) -> bool {
        contains(&self.root, key)
    }

    /// Returns how many times the key is in the set, either 0 or 1.
    pub fn count(&self, key: i32) -> usize {
        if self.contains(key) {
            1
        } else {
            0
        }
    }

    /// Inserts a key into the set.
    /// Returns whether the key was absent before.
    pub fn insert(&mut self, key: i32) -> bool {
        let inserted = insert(&mut self.root, key);
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

    /// Asserts that the search order, the stored heights and the AVL
    /// condition hold everywhere in the tree.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = check_node(&self.root, None, None);
        assert_eq!(num_nodes, self.num_nodes);
    }
}

impl Default for AvlTreeSet {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<i32> for AvlTreeSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl fmt::Debug for AvlTreeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut entries = f.debug_set();
        self.for_each(|key| {
            entries.entry(&key);
        });
        entries.finish()
    }
}
