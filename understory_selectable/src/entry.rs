// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry policies: which child a region selects when it is entered.
//!
//! When a region selects a composite child, it enters that child passing the
//! element it is moving *away from* as a preference. The child's
//! [`EntryPolicy`] decides what to do with that hint:
//!
//! - [`FirstChild`] ignores it. The region re-enters its current selection,
//!   or its first child.
//! - [`PreferChild`] honors it when it names one of the region's own children.
//!   This is what makes `select(Some(child))` work for programmatic focus.
//! - [`NearestEdge`] compares the hint with the region's own position among
//!   its siblings, and enters at the edge facing the hint. Coming from the
//!   right selects the rightmost child.
//!
//! A policy result that is not a live direct child of the region is discarded.

use core::fmt::Debug;

use crate::containment::{Containment, is_child_of};

/// Hook choosing the child to enter when a region is selected.
pub trait EntryPolicy<K>: Debug {
    /// Pick the child of `region` to select, given the element selection is
    /// coming from (if any).
    ///
    /// Returning `None` rejects the preference; the region then falls back to
    /// its current selection, or its first child.
    fn choose(&self, view: &dyn Containment<K>, region: K, from: Option<K>) -> Option<K>;
}

/// Rejects every preference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FirstChild;

impl<K> EntryPolicy<K> for FirstChild {
    fn choose(&self, _view: &dyn Containment<K>, _region: K, _from: Option<K>) -> Option<K> {
        None
    }
}

/// Accepts the preference when it is a direct child of the region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferChild;

impl<K: Copy + Eq> EntryPolicy<K> for PreferChild {
    fn choose(&self, view: &dyn Containment<K>, region: K, from: Option<K>) -> Option<K> {
        from.filter(|&child| is_child_of(view, child, region))
    }
}

/// Enters at the edge facing the sibling selection is coming from.
///
/// If the previous element follows the region in their shared parent, the
/// region's last child is entered; if it precedes the region, the first child.
/// Anything else is rejected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NearestEdge;

impl<K: Copy + Eq> EntryPolicy<K> for NearestEdge {
    fn choose(&self, view: &dyn Containment<K>, region: K, from: Option<K>) -> Option<K> {
        let from = from?;
        let parent = view.parent(region)?;
        if from == region || !is_child_of(view, from, parent) {
            return None;
        }

        let mut cursor = view.next_sibling(region);
        while let Some(sibling) = cursor {
            if sibling == from {
                return view.last_child(region);
            }
            cursor = view.next_sibling(sibling);
        }
        view.first_child(region)
    }
}
