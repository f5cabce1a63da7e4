// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear selectable regions: the selection delegation state machine.
//!
//! A [`LinearSelectable`] is the per-region state: its [`RegionConfig`], the
//! child it currently selects, and its [`EntryPolicy`]. The host stores one
//! next to every node that participates as a region (see
//! [`SelectionHost`]); the operations below run against the host so they can
//! read live siblings and reach parent and child regions.
//!
//! ## States
//!
//! A region is either *unselected* or *selected(child)*:
//!
//! - `select(pref)` enters the child the entry policy accepts, else the
//!   current selection, else the first child. No children: stays unselected.
//! - A directional move on the region's axis scans siblings of the current
//!   selection (or of the first child when unselected). The first eligible
//!   sibling becomes selected. When the scan runs off the end, the region
//!   wraps if configured to, otherwise the move is delegated to the parent
//!   region, if there is one, or dropped.
//! - Moves on the other axis are delegated without scanning.
//! - `back` scans backwards when `CAN_MOVE_BACK` is set and stops at the first
//!   child; otherwise it is delegated unconditionally.
//! - `reset_selection` forgets the selection without notifying anyone.
//!
//! Entering a child that is itself a region selects into it, passing the
//! child this region is moving away from as the preference. Entering a leaf
//! announces it through [`SelectionHost::selection_changed`].
//!
//! Recursion follows the containment structure in both directions, so the
//! host must be acyclic.

use alloc::boxed::Box;
use core::fmt::Debug;

use crate::containment::{Containment, is_child_of};
use crate::entry::{EntryPolicy, FirstChild};
use crate::selectable::SelectionHost;
use crate::targets;
use crate::types::{Axis, Move, RegionConfig, Step};

/// Selection state of a region whose children form a single sequence.
#[derive(Debug)]
pub struct LinearSelectable<K> {
    config: RegionConfig,
    selected: Option<K>,
    entry: Box<dyn EntryPolicy<K>>,
}

impl<K> Default for LinearSelectable<K> {
    fn default() -> Self {
        Self::new(RegionConfig::default())
    }
}

impl<K> LinearSelectable<K> {
    /// Create an unselected region using the [`FirstChild`] entry policy.
    pub fn new(config: RegionConfig) -> Self {
        Self {
            config,
            selected: None,
            entry: Box::new(FirstChild),
        }
    }

    /// Replace the entry policy, builder style.
    pub fn with_entry(mut self, entry: impl EntryPolicy<K> + 'static) -> Self {
        self.entry = Box::new(entry);
        self
    }

    /// Replace the entry policy.
    pub fn set_entry(&mut self, entry: impl EntryPolicy<K> + 'static) {
        self.entry = Box::new(entry);
    }

    /// The entry policy consulted by `select`.
    pub fn entry(&self) -> &dyn EntryPolicy<K> {
        &*self.entry
    }

    /// Current configuration.
    pub fn config(&self) -> RegionConfig {
        self.config
    }

    /// Mutable access to the configuration; takes effect on the next command.
    pub fn config_mut(&mut self) -> &mut RegionConfig {
        &mut self.config
    }

    /// The axis next/previous traversal maps to.
    pub fn axis(&self) -> Axis {
        self.config.axis
    }

    /// Whether moving before the first child wraps to the last.
    pub fn wrap_start(&self) -> bool {
        self.config.wrap_start()
    }

    /// Whether moving past the last child wraps to the first.
    pub fn wrap_end(&self) -> bool {
        self.config.wrap_end()
    }

    /// Whether `back` is handled by this region.
    pub fn can_move_back(&self) -> bool {
        self.config.can_move_back()
    }

    /// Forget the selected element. No notification is emitted.
    pub fn reset_selection(&mut self) {
        self.selected = None;
    }
}

impl<K: Copy> LinearSelectable<K> {
    /// The child most recently selected by this region, if any.
    ///
    /// This is the stored value; it is not re-validated against the host, so
    /// it may name a child that has since been removed.
    pub fn selected_element(&self) -> Option<K> {
        self.selected
    }
}

/// Eligibility of a sibling: anything structurally present can be selected.
pub(crate) fn can_select_element<K, C>(view: &C, element: K) -> bool
where
    C: Containment<K> + ?Sized,
{
    view.is_present(element)
}

/// Enter `region`, preferring `preferred` if its entry policy accepts it.
pub(crate) fn select<K, H>(host: &mut H, region: K, preferred: Option<K>)
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    let Some(state) = host.region(region) else {
        return;
    };
    let chosen = state.entry.choose(&*host, region, preferred);
    let accepted = chosen.filter(|&child| is_child_of(&*host, child, region));
    if accepted.is_none()
        && let Some(chosen) = chosen
    {
        tracing::debug!(
            target: targets::NAVIGATION,
            ?region,
            ?chosen,
            "entry policy chose a non-child, ignored"
        );
    }

    let Some(target) = accepted.or_else(|| current_or_first(&*host, region)) else {
        tracing::debug!(target: targets::NAVIGATION, ?region, "nothing to select");
        return;
    };
    enter(host, region, target);
}

/// Run `mv` against `region`, delegating upwards when it cannot be satisfied.
pub(crate) fn navigate<K, H>(host: &mut H, region: K, mv: Move)
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    let Some(state) = host.region(region) else {
        return;
    };
    let config = state.config;

    match mv {
        Move::Back => {
            if config.can_move_back() {
                step(host, region, Step::Previous, false);
            } else {
                delegate(host, region, mv);
            }
        }
        _ => {
            let moved = mv.axis() == Some(config.axis) && step(host, region, mv.step(), true);
            if !moved {
                delegate(host, region, mv);
            }
        }
    }
}

/// Forget the selection of `region`.
pub(crate) fn reset<K, H>(host: &mut H, region: K)
where
    H: SelectionHost<K>,
{
    if let Some(state) = host.region_mut(region) {
        state.reset_selection();
    }
}

fn delegate<K, H>(host: &mut H, region: K, mv: Move)
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    match host.parent(region) {
        Some(parent) if host.region(parent).is_some() => {
            tracing::debug!(
                target: targets::NAVIGATION,
                ?region,
                ?parent,
                ?mv,
                "delegating to parent"
            );
            navigate(host, parent, mv);
        }
        _ => {
            tracing::debug!(
                target: targets::NAVIGATION,
                ?region,
                ?mv,
                "no selectable parent, move dropped"
            );
        }
    }
}

/// The live selection of `region`, or its first eligible child.
fn current_or_first<K, H>(host: &H, region: K) -> Option<K>
where
    K: Copy + Eq,
    H: SelectionHost<K>,
{
    let current = host.region(region).and_then(|state| state.selected);
    match current {
        Some(child) if is_child_of(host, child, region) => Some(child),
        _ => {
            let first = host.first_child(region)?;
            if can_select_element(host, first) {
                Some(first)
            } else {
                scan(host, first, Step::Next)
            }
        }
    }
}

/// Move the selection of `region` one eligible sibling in `dir`.
///
/// Returns `true` if a new element was entered.
fn step<K, H>(host: &mut H, region: K, dir: Step, allow_wrap: bool) -> bool
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    let Some(state) = host.region(region) else {
        return false;
    };
    let config = state.config;
    let Some(origin) = current_or_first(&*host, region) else {
        return false;
    };

    let target = scan(&*host, origin, dir).or_else(|| {
        allow_wrap
            .then(|| wrap(&*host, region, origin, dir, config))
            .flatten()
    });
    match target {
        Some(target) => enter(host, region, target),
        None => false,
    }
}

fn sibling<K, C>(view: &C, node: K, dir: Step) -> Option<K>
where
    C: Containment<K> + ?Sized,
{
    match dir {
        Step::Next => view.next_sibling(node),
        Step::Previous => view.prev_sibling(node),
    }
}

/// First eligible sibling strictly after (or before) `origin`.
fn scan<K, C>(view: &C, origin: K, dir: Step) -> Option<K>
where
    K: Copy,
    C: Containment<K> + ?Sized,
{
    let mut candidate = sibling(view, origin, dir);
    while let Some(element) = candidate {
        if can_select_element(view, element) {
            return Some(element);
        }
        candidate = sibling(view, element, dir);
    }
    None
}

/// The element a failed scan wraps to, if the region allows it.
///
/// Wrapping back onto `origin` is not a move.
fn wrap<K, C>(view: &C, region: K, origin: K, dir: Step, config: RegionConfig) -> Option<K>
where
    K: Copy + Eq,
    C: Containment<K> + ?Sized,
{
    let edge = match dir {
        Step::Next if config.wrap_end() => view.first_child(region)?,
        Step::Previous if config.wrap_start() => view.last_child(region)?,
        _ => return None,
    };
    let target = if can_select_element(view, edge) {
        edge
    } else {
        scan(view, edge, dir)?
    };
    (target != origin).then_some(target)
}

/// Make `element` the selection of `region` and enter it.
fn enter<K, H>(host: &mut H, region: K, element: K) -> bool
where
    K: Copy + Eq + Debug,
    H: SelectionHost<K>,
{
    let Some(state) = host.region_mut(region) else {
        return false;
    };
    let previous = state.selected.replace(element);
    tracing::trace!(
        target: targets::NAVIGATION,
        ?region,
        ?previous,
        ?element,
        "selected"
    );

    if host.region(element).is_some() {
        select(host, element, previous);
    } else {
        host.selection_changed(element);
    }
    true
}
