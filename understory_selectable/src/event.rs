// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `selection-changed` notification and its propagation.
//!
//! When a leaf becomes selected, a [`SelectionChanged`] event is emitted on
//! it. The event bubbles: it is delivered to the leaf in the
//! [`Phase::Target`] phase, then to each ancestor up to the root in the
//! [`Phase::Bubble`] phase. It is cancelable: observers may call
//! [`SelectionChanged::prevent_default`], and the flag is reported back to
//! whoever fired the event.
//!
//! Regions never emit this event for themselves; only the leaf they end up
//! entering does.
//!
//! ## Minimal example
//!
//! ```
//! use understory_selectable::event::{self, Dispatch, Outcome, Phase, SelectionChanged};
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)] struct Node(u32);
//!
//! // Leaf 3 inside 2 inside 1.
//! let seq = [
//!     Dispatch::target(Node(3)),
//!     Dispatch::bubble(Node(2)),
//!     Dispatch::bubble(Node(1)),
//! ];
//!
//! let mut ev = SelectionChanged::new(Node(3));
//! let mut seen = Vec::new();
//! let stopped = event::run(&seq, &mut ev, |d, ev| {
//!     seen.push((d.phase, d.node.0));
//!     if d.node == Node(2) {
//!         ev.prevent_default();
//!         return Outcome::Stop;
//!     }
//!     Outcome::Continue
//! });
//!
//! assert_eq!(stopped.map(|d| d.node), Some(Node(2)));
//! assert!(ev.default_prevented());
//! assert_eq!(seen, vec![(Phase::Target, 3), (Phase::Bubble, 2)]);
//! ```

use smallvec::SmallVec;

use crate::containment::Containment;

/// Name of the notification, as seen by hosts that route events by name.
pub const SELECTION_CHANGED: &str = "selection-changed";

/// A leaf became selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChanged<K> {
    /// The element that is now selected.
    pub target: K,
    default_prevented: bool,
}

impl<K> SelectionChanged<K> {
    /// Create the event for `target`.
    pub const fn new(target: K) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// The event name, [`SELECTION_CHANGED`].
    pub const fn name(&self) -> &'static str {
        SELECTION_CHANGED
    }

    /// Always `true`: the event travels from the leaf to the root.
    pub const fn bubbles(&self) -> bool {
        true
    }

    /// Always `true`: observers may prevent the default action.
    pub const fn cancelable(&self) -> bool {
        true
    }

    /// Mark the default action as prevented.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether an observer called [`prevent_default`](Self::prevent_default).
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Propagation phase of a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Delivery to the selected leaf itself.
    Target,
    /// Delivery to an ancestor, innermost first.
    Bubble,
}

/// Handler decision for a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagation immediately.
    Stop,
}

/// One step of a propagation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// The phase this entry belongs to.
    pub phase: Phase,
    /// The node receiving the event.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A target-phase entry for `node`.
    pub const fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble-phase entry for `node`.
    pub const fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// A target→root propagation sequence.
pub type PropagationPath<K> = SmallVec<[Dispatch<K>; 8]>;

/// Build the propagation sequence for an event fired on `target`.
///
/// The first entry is the target; the rest are its ancestors, innermost first.
pub fn propagation_path<K, C>(view: &C, target: K) -> PropagationPath<K>
where
    K: Copy,
    C: Containment<K> + ?Sized,
{
    let mut path = PropagationPath::new();
    path.push(Dispatch::target(target));
    let mut current = view.parent(target);
    while let Some(node) = current {
        path.push(Dispatch::bubble(node));
        current = view.parent(node);
    }
    path
}

/// Run a handler over a propagation sequence and honor stop outcomes.
///
/// Returns `None` if every entry was visited, or the entry whose handler
/// returned [`Outcome::Stop`]. Default prevention lives on the event payload,
/// not in the outcome.
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}

/// What happened to one fired [`SelectionChanged`] event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delivery<K> {
    /// The leaf the event was fired on.
    pub target: K,
    /// Whether an observer prevented the default action.
    pub default_prevented: bool,
    /// Where propagation was stopped, if it was.
    pub stopped_at: Option<Dispatch<K>>,
}
