// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only view of the live containment structure.
//!
//! Regions never cache their children. Every traversal asks the host for the
//! current parent and sibling links, so membership changes are picked up on
//! the next move.

/// Live parent/child/sibling links of a host structure.
///
/// Implementations must only report nodes that are structurally present: a
/// removed node has no parent, no children, and no siblings.
pub trait Containment<K> {
    /// Returns `true` if `node` currently exists in the structure.
    fn is_present(&self, node: K) -> bool;

    /// Returns the parent of `node`, or `None` for roots and absent nodes.
    fn parent(&self, node: K) -> Option<K>;

    /// Returns the first child of `node`, if any.
    fn first_child(&self, node: K) -> Option<K>;

    /// Returns the last child of `node`, if any.
    fn last_child(&self, node: K) -> Option<K>;

    /// Returns the sibling following `node` in its parent's sequence.
    fn next_sibling(&self, node: K) -> Option<K>;

    /// Returns the sibling preceding `node` in its parent's sequence.
    fn prev_sibling(&self, node: K) -> Option<K>;
}

/// Returns `true` if `child` is present and a direct child of `parent`.
pub fn is_child_of<K, C>(view: &C, child: K, parent: K) -> bool
where
    K: Copy + Eq,
    C: Containment<K> + ?Sized,
{
    view.is_present(child) && view.parent(child) == Some(parent)
}

/// Iterate the live children of `node` in sequence order.
///
/// ```rust
/// use understory_selectable::{Tree, children};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None).unwrap();
/// let a = tree.insert(Some(root)).unwrap();
/// let b = tree.insert(Some(root)).unwrap();
///
/// let all: Vec<_> = children(&tree, root).collect();
/// assert_eq!(all, vec![a, b]);
/// ```
pub fn children<K, C>(view: &C, node: K) -> Children<'_, K, C>
where
    K: Copy,
    C: Containment<K> + ?Sized,
{
    Children {
        view,
        next: view.first_child(node),
    }
}

/// Iterator returned by [`children`].
pub struct Children<'a, K, C: ?Sized> {
    view: &'a C,
    next: Option<K>,
}

impl<K: core::fmt::Debug, C: ?Sized> core::fmt::Debug for Children<'_, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Children")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<K, C> Iterator for Children<'_, K, C>
where
    K: Copy,
    C: Containment<K> + ?Sized,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let current = self.next?;
        self.next = self.view.next_sibling(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn children_follow_live_membership() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        let a = tree.insert(Some(root)).unwrap();
        let b = tree.insert(Some(root)).unwrap();
        let c = tree.insert(Some(root)).unwrap();

        assert_eq!(children(&tree, root).collect::<Vec<_>>(), vec![a, b, c]);

        tree.remove(b);
        assert_eq!(children(&tree, root).collect::<Vec<_>>(), vec![a, c]);

        let d = tree.insert(Some(root)).unwrap();
        assert_eq!(children(&tree, root).collect::<Vec<_>>(), vec![a, c, d]);
    }

    #[test]
    fn child_check_requires_direct_parent() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        let mid = tree.insert(Some(root)).unwrap();
        let leaf = tree.insert(Some(mid)).unwrap();

        assert!(is_child_of(&tree, mid, root));
        assert!(is_child_of(&tree, leaf, mid));
        assert!(!is_child_of(&tree, leaf, root));

        tree.remove(leaf);
        assert!(!is_child_of(&tree, leaf, mid));
    }

    #[test]
    fn children_of_leaf_is_empty() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        assert_eq!(children(&tree, root).count(), 0);
    }
}
