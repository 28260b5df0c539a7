//! The rotation primitive shared by both tree engines.
//!
//! A rotation exchanges three ownership edges below a tree slot and never
//! allocates. Balance bookkeeping stays with the caller: the AVL engine
//! recomputes heights afterwards, the treap engine leaves its immutable
//! priorities alone.

/// Access to the child slots of a tree node, as needed for rotation.
pub(crate) trait BinaryNode: Sized {
    fn left_mut(&mut self) -> &mut Option<Box<Self>>;
    fn right_mut(&mut self) -> &mut Option<Box<Self>>;
}

/// Performs a left rotation: the right child becomes the subtree root,
/// the old root becomes its left child and the right child's former left
/// subtree is reattached as the old root's right subtree.
///
/// # Panics
///
/// Panics if the slot is empty or the right child is absent.
pub(crate) fn rotate_left<N: BinaryNode>(slot: &mut Option<Box<N>>) {
    let mut node = slot.take().expect("cannot rotate an empty tree");
    let mut right = node
        .right_mut()
        .take()
        .expect("left rotation requires a right child");
    *node.right_mut() = right.left_mut().take();
    *right.left_mut() = Some(node);
    *slot = Some(right);
}

/// Performs a right rotation, the mirror image of [`rotate_left`].
///
/// # Panics
///
/// Panics if the slot is empty or the left child is absent.
pub(crate) fn rotate_right<N: BinaryNode>(slot: &mut Option<Box<N>>) {
    let mut node = slot.take().expect("cannot rotate an empty tree");
    let mut left = node
        .left_mut()
        .take()
        .expect("right rotation requires a left child");
    *node.left_mut() = left.right_mut().take();
    *left.right_mut() = Some(node);
    *slot = Some(left);
}
