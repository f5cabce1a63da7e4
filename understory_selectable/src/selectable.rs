// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selectable capability and the host contract behind it.
//!
//! [`Selectable`] is the narrow interface every participating region exposes.
//! [`SelectionHost`] is what a host structure provides so that regions can be
//! driven: live containment, per-node [`LinearSelectable`] state, and a sink
//! for the `selection-changed` notification.
//!
//! Whether a node participates is answered by
//! [`SelectionHost::selectable`], which returns an optional [`Region`]
//! handle. Delegation to a parent that may or may not be a region goes
//! through the same check.
//!
//! ## Routing input
//!
//! Input layers usually only know the root of the hierarchy. [`route_move`]
//! finds the region that owns the current focus and runs the command there;
//! [`focused_element`] reports where selection ended up.
//!
//! ```rust
//! use understory_selectable::{
//!     LinearSelectable, Move, RegionConfig, Tree, focused_element, route_move,
//! };
//!
//! let mut tree = Tree::new();
//! let menu = tree
//!     .insert_region(None, LinearSelectable::new(RegionConfig::vertical()))
//!     .unwrap();
//! let row = tree.insert_region(Some(menu), LinearSelectable::default()).unwrap();
//! let a = tree.insert(Some(row)).unwrap();
//! let b = tree.insert(Some(row)).unwrap();
//!
//! // The first command establishes the initial selection.
//! route_move(&mut tree, menu, Move::Right);
//! assert_eq!(focused_element(&tree, menu), Some(a));
//!
//! route_move(&mut tree, menu, Move::Right);
//! assert_eq!(focused_element(&tree, menu), Some(b));
//! ```

use core::fmt::Debug;

use crate::containment::{Containment, is_child_of};
use crate::linear::{self, LinearSelectable};
use crate::types::Move;

/// Selection on a 10-foot UI.
///
/// Movement happens horizontally, vertically, and through an explicit back
/// command, matching the inputs of a gamepad or TV remote. None of these
/// operations fail: a command that cannot be satisfied is handed to the
/// parent region or dropped.
pub trait Selectable<K> {
    /// The currently selected element.
    fn selected_element(&self) -> Option<K>;

    /// Whether moving before the first element wraps to the last.
    fn wrap_start(&self) -> bool;

    /// Whether moving past the last element wraps to the first.
    fn wrap_end(&self) -> bool;

    /// Whether the region responds to the back command itself.
    fn can_move_back(&self) -> bool;

    /// Enter the region, optionally naming the element selection comes from.
    fn select(&mut self, element: Option<K>);

    /// Exit or step back within the region.
    fn back(&mut self);

    /// Move the selection up.
    fn up(&mut self);

    /// Move the selection down.
    fn down(&mut self);

    /// Move the selection to the left.
    fn left(&mut self);

    /// Move the selection to the right.
    fn right(&mut self);

    /// Forget the selection without notifying anyone.
    fn reset_selection(&mut self);

    /// Run a decoded [`Move`] through the matching method.
    fn navigate(&mut self, mv: Move) {
        match mv {
            Move::Up => self.up(),
            Move::Down => self.down(),
            Move::Left => self.left(),
            Move::Right => self.right(),
            Move::Back => self.back(),
        }
    }
}

/// A containment structure that stores region state and receives
/// notifications.
///
/// [`Tree`](crate::Tree) is the ready-made implementation. Other hosts only
/// need to keep a [`LinearSelectable`] next to each participating node and
/// forward `selection_changed` to their event system.
pub trait SelectionHost<K>: Containment<K> {
    /// The region state attached to `node`, if it participates.
    fn region(&self, node: K) -> Option<&LinearSelectable<K>>;

    /// Mutable access to the region state attached to `node`.
    fn region_mut(&mut self, node: K) -> Option<&mut LinearSelectable<K>>;

    /// Called once for every leaf that becomes selected.
    fn selection_changed(&mut self, element: K);

    /// A [`Selectable`] handle for `node`, or `None` if it is not a region.
    fn selectable(&mut self, node: K) -> Option<Region<'_, K, Self>>
    where
        K: Copy,
        Self: Sized,
    {
        if self.region(node).is_none() {
            return None;
        }
        Some(Region { host: self, id: node })
    }
}

/// A region inside a [`SelectionHost`], driven through [`Selectable`].
pub struct Region<'a, K, H> {
    host: &'a mut H,
    id: K,
}

impl<K: Debug, H> Debug for Region<'_, K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Region")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<K: Copy, H: SelectionHost<K>> Region<'_, K, H> {
    /// The node this handle drives.
    pub fn id(&self) -> K {
        self.id
    }

    /// The underlying region state.
    pub fn state(&self) -> Option<&LinearSelectable<K>> {
        self.host.region(self.id)
    }

    fn flag(&self, read: impl FnOnce(&LinearSelectable<K>) -> bool) -> bool {
        self.state().is_some_and(read)
    }
}

impl<K, H> Selectable<K> for Region<'_, K, H>
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    fn selected_element(&self) -> Option<K> {
        self.state().and_then(LinearSelectable::selected_element)
    }

    fn wrap_start(&self) -> bool {
        self.flag(LinearSelectable::wrap_start)
    }

    fn wrap_end(&self) -> bool {
        self.flag(LinearSelectable::wrap_end)
    }

    fn can_move_back(&self) -> bool {
        self.flag(LinearSelectable::can_move_back)
    }

    fn select(&mut self, element: Option<K>) {
        linear::select(&mut *self.host, self.id, element);
    }

    fn back(&mut self) {
        linear::navigate(&mut *self.host, self.id, Move::Back);
    }

    fn up(&mut self) {
        linear::navigate(&mut *self.host, self.id, Move::Up);
    }

    fn down(&mut self) {
        linear::navigate(&mut *self.host, self.id, Move::Down);
    }

    fn left(&mut self) {
        linear::navigate(&mut *self.host, self.id, Move::Left);
    }

    fn right(&mut self) {
        linear::navigate(&mut *self.host, self.id, Move::Right);
    }

    fn reset_selection(&mut self) {
        linear::reset(&mut *self.host, self.id);
    }
}

/// Follow selected elements down from `root` and return the deepest one.
///
/// This is the leaf currently holding selection, or a composite region that
/// has nothing to select. Returns `None` when `root` is not a region or has no
/// live selection.
pub fn focused_element<K, H>(host: &H, root: K) -> Option<K>
where
    K: Copy + Eq,
    H: SelectionHost<K>,
{
    let mut current = root;
    let mut focused = None;
    while let Some(state) = host.region(current) {
        match state.selected_element() {
            Some(child) if is_child_of(host, child, current) => {
                focused = Some(child);
                current = child;
            }
            _ => break,
        }
    }
    focused
}

/// Deliver `mv` to the region that owns the focus below `root`.
///
/// The owner is the focused element itself when it is a region with no
/// selection of its own, otherwise its parent. When nothing below `root` is
/// selected yet, the command selects into `root` instead.
pub fn route_move<K, H>(host: &mut H, root: K, mv: Move)
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    let owner = match focused_element(&*host, root) {
        Some(focused) if host.region(focused).is_some() => focused,
        Some(focused) => match host.parent(focused) {
            Some(parent) => parent,
            None => return,
        },
        None => {
            linear::select(host, root, None);
            return;
        }
    };
    linear::navigate(host, owner, mv);
}
