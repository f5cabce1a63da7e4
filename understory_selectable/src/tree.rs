// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made selection host: an arena of elements with optional region state.

use alloc::{boxed::Box, vec::Vec};

use hashbrown::HashMap;

use crate::containment::Containment;
use crate::error::TreeError;
use crate::event::{self, Delivery, Dispatch, Outcome, SelectionChanged};
use crate::linear::LinearSelectable;
use crate::selectable::{Region, SelectionHost};
use crate::targets;
use crate::types::{ElementId, RegionConfig};

type Listener = Box<dyn FnMut(&Dispatch<ElementId>, &mut SelectionChanged<ElementId>) -> Outcome>;

/// Element tree that stores [`LinearSelectable`] regions and delivers
/// `selection-changed` to registered listeners.
///
/// Children are kept in insertion order; that order is the sequence a region
/// traverses. Identifiers are generational, so a removed element's id never
/// aliases a later insertion.
///
/// ## Example
///
/// ```rust
/// use understory_selectable::{LinearSelectable, Outcome, RegionConfig, Selectable, Tree};
///
/// let mut tree = Tree::new().with_delivery_log();
/// let row = tree
///     .insert_region(None, LinearSelectable::new(RegionConfig::horizontal()))
///     .unwrap();
/// let a = tree.insert(Some(row)).unwrap();
/// let b = tree.insert(Some(row)).unwrap();
/// tree.add_listener(row, |_, ev| {
///     ev.prevent_default();
///     Outcome::Continue
/// })
/// .unwrap();
///
/// let mut handle = tree.selectable(row).unwrap();
/// handle.select(None);
/// handle.right();
///
/// let deliveries = tree.take_deliveries();
/// assert_eq!(deliveries.len(), 2);
/// assert_eq!(deliveries[0].target, a);
/// assert_eq!(deliveries[1].target, b);
/// assert!(deliveries[1].default_prevented);
/// ```
///
/// The delivery log is off by default; listeners run either way.
#[derive(Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    listeners: HashMap<ElementId, Vec<Listener>>,
    record_deliveries: bool,
    deliveries: Vec<Delivery<ElementId>>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let regions = self
            .nodes
            .iter()
            .flatten()
            .filter(|n| n.region.is_some())
            .count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("regions", &regions)
            .field("free_list", &self.free_list.len())
            .field("listeners", &self.listeners.len())
            .field("record_deliveries", &self.record_deliveries)
            .field("pending_deliveries", &self.deliveries.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    region: Option<LinearSelectable<ElementId>>,
}

impl Node {
    fn new(generation: u32, region: Option<LinearSelectable<ElementId>>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            region,
        }
    }
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a leaf as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>) -> Result<ElementId, TreeError> {
        self.insert_node(parent, None)
    }

    /// Insert a region as the last child of `parent` (or as a root if `None`).
    pub fn insert_region(
        &mut self,
        parent: Option<ElementId>,
        region: LinearSelectable<ElementId>,
    ) -> Result<ElementId, TreeError> {
        self.insert_node(parent, Some(region))
    }

    /// Attach region state to an existing element.
    ///
    /// If the element is already a region, its state (including its
    /// selection) is kept and only returned.
    pub fn make_selectable(
        &mut self,
        id: ElementId,
        config: RegionConfig,
    ) -> Result<&mut LinearSelectable<ElementId>, TreeError> {
        let node = self
            .node_opt_mut(id)
            .ok_or(TreeError::StaleElement(id))?;
        Ok(node
            .region
            .get_or_insert_with(|| LinearSelectable::new(config)))
    }

    /// Remove an element and its subtree, along with their listeners.
    ///
    /// Stale identifiers are ignored. Regions that had selected a removed
    /// element keep the stale value until they are reset; navigation treats
    /// it as absent.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
        tracing::debug!(target: targets::TREE, ?id, "removed subtree");
    }

    /// Move `id` to the end of `new_parent`'s children (or make it a root).
    pub fn reparent(
        &mut self,
        id: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleElement(id));
        }
        if let Some(parent) = new_parent {
            if !self.is_alive(parent) {
                return Err(TreeError::StaleElement(parent));
            }
            if self.is_ancestor_or_self(id, parent) {
                return Err(TreeError::WouldCycle { child: id, parent });
            }
        }
        if let Some(old) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, old);
        }
        if let Some(parent) = new_parent {
            self.link_parent(id, parent);
        }
        tracing::debug!(target: targets::TREE, ?id, ?new_parent, "reparented");
        Ok(())
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the parent of an element if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Get the children of an element, or an empty slice if it is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The region state of `id`, if it is a live region.
    pub fn region(&self, id: ElementId) -> Option<&LinearSelectable<ElementId>> {
        self.node(id).and_then(|n| n.region.as_ref())
    }

    /// Mutable region state of `id`, if it is a live region.
    pub fn region_mut(&mut self, id: ElementId) -> Option<&mut LinearSelectable<ElementId>> {
        self.node_opt_mut(id).and_then(|n| n.region.as_mut())
    }

    /// A [`Selectable`](crate::Selectable) handle for `id`, or `None` if it is
    /// not a live region.
    pub fn selectable(&mut self, id: ElementId) -> Option<Region<'_, ElementId, Self>> {
        SelectionHost::selectable(self, id)
    }

    /// Register a `selection-changed` listener on `id`.
    ///
    /// The listener sees events targeted at `id` and events bubbling up from
    /// its descendants. Listeners on one element run in the order they were
    /// added; returning [`Outcome::Stop`] skips the remaining listeners and
    /// every outer element.
    pub fn add_listener(
        &mut self,
        id: ElementId,
        listener: impl FnMut(&Dispatch<ElementId>, &mut SelectionChanged<ElementId>) -> Outcome
        + 'static,
    ) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleElement(id));
        }
        self.listeners
            .entry(id)
            .or_default()
            .push(Box::new(listener));
        Ok(())
    }

    /// Drop every listener registered on `id`.
    pub fn clear_listeners(&mut self, id: ElementId) {
        self.listeners.remove(&id);
    }

    /// Turn on the delivery log, builder style.
    pub fn with_delivery_log(mut self) -> Self {
        self.record_deliveries(true);
        self
    }

    /// Start or stop keeping a [`Delivery`] per fired `selection-changed`.
    ///
    /// Off by default. The log grows until drained with
    /// [`take_deliveries`](Self::take_deliveries); turning it off discards
    /// anything pending.
    pub fn record_deliveries(&mut self, enabled: bool) {
        self.record_deliveries = enabled;
        if !enabled {
            self.deliveries = Vec::new();
        }
    }

    /// Whether the delivery log is on.
    pub fn is_recording_deliveries(&self) -> bool {
        self.record_deliveries
    }

    /// Drain the record of fired `selection-changed` events, oldest first.
    ///
    /// Always empty unless [`record_deliveries`](Self::record_deliveries) is on.
    pub fn take_deliveries(&mut self) -> Vec<Delivery<ElementId>> {
        core::mem::take(&mut self.deliveries)
    }

    // --- internals ---

    fn insert_node(
        &mut self,
        parent: Option<ElementId>,
        region: Option<LinearSelectable<ElementId>>,
    ) -> Result<ElementId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleElement(p));
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, region));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, region)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        tracing::trace!(target: targets::TREE, ?id, ?parent, "inserted");
        Ok(id)
    }

    fn remove_subtree(&mut self, id: ElementId) {
        let children = match self.node_opt_mut(id) {
            Some(n) => core::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
        self.listeners.remove(&id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut node: ElementId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent_of(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }

    fn sibling_at(&self, node: ElementId, offset: isize) -> Option<ElementId> {
        let parent = self.parent_of(node)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos.checked_add_signed(offset)?).copied()
    }
}

impl Containment<ElementId> for Tree {
    fn is_present(&self, node: ElementId) -> bool {
        self.is_alive(node)
    }

    fn parent(&self, node: ElementId) -> Option<ElementId> {
        self.parent_of(node)
    }

    fn first_child(&self, node: ElementId) -> Option<ElementId> {
        self.children_of(node).first().copied()
    }

    fn last_child(&self, node: ElementId) -> Option<ElementId> {
        self.children_of(node).last().copied()
    }

    fn next_sibling(&self, node: ElementId) -> Option<ElementId> {
        self.sibling_at(node, 1)
    }

    fn prev_sibling(&self, node: ElementId) -> Option<ElementId> {
        self.sibling_at(node, -1)
    }
}

impl SelectionHost<ElementId> for Tree {
    fn region(&self, node: ElementId) -> Option<&LinearSelectable<ElementId>> {
        Self::region(self, node)
    }

    fn region_mut(&mut self, node: ElementId) -> Option<&mut LinearSelectable<ElementId>> {
        Self::region_mut(self, node)
    }

    fn selection_changed(&mut self, element: ElementId) {
        let path = event::propagation_path(&*self, element);
        let mut ev = SelectionChanged::new(element);
        let listeners = &mut self.listeners;
        let stopped_at = event::run(&path, &mut ev, |d, ev| {
            let Some(list) = listeners.get_mut(&d.node) else {
                return Outcome::Continue;
            };
            for listener in list.iter_mut() {
                if listener(d, ev) == Outcome::Stop {
                    return Outcome::Stop;
                }
            }
            Outcome::Continue
        })
        .copied();
        tracing::trace!(
            target: targets::EVENTS,
            target_element = ?element,
            default_prevented = ev.default_prevented(),
            ?stopped_at,
            "{}",
            ev.name()
        );
        if self.record_deliveries {
            self.deliveries.push(Delivery {
                target: element,
                default_prevented: ev.default_prevented(),
                stopped_at,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Phase;
    use crate::selectable::Selectable;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn removed_ids_go_stale_and_slots_are_reused() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        let child = tree.insert(Some(root)).unwrap();
        let grandchild = tree.insert(Some(child)).unwrap();

        tree.remove(child);
        assert!(tree.is_alive(root));
        assert!(!tree.is_alive(child));
        assert!(!tree.is_alive(grandchild));
        assert!(tree.children_of(root).is_empty());

        let reused = tree.insert(Some(root)).unwrap();
        assert!(reused.idx() == child.idx() || reused.idx() == grandchild.idx());
        assert_ne!(reused, child);
        assert_ne!(reused, grandchild);
        assert_eq!(tree.parent_of(child), None);
    }

    #[test]
    fn insert_under_stale_parent_fails() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        tree.remove(root);
        assert_eq!(tree.insert(Some(root)), Err(TreeError::StaleElement(root)));
    }

    #[test]
    fn siblings_follow_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        let a = tree.insert(Some(root)).unwrap();
        let b = tree.insert(Some(root)).unwrap();
        let c = tree.insert(Some(root)).unwrap();

        assert_eq!(tree.first_child(root), Some(a));
        assert_eq!(tree.last_child(root), Some(c));
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(a), None);
        assert_eq!(tree.prev_sibling(c), Some(b));
        assert_eq!(tree.next_sibling(c), None);
        assert_eq!(tree.next_sibling(root), None);
    }

    #[test]
    fn reparent_moves_to_the_end_and_rejects_cycles() {
        let mut tree = Tree::new();
        let root = tree.insert(None).unwrap();
        let a = tree.insert(Some(root)).unwrap();
        let b = tree.insert(Some(root)).unwrap();
        let inner = tree.insert(Some(a)).unwrap();

        assert_eq!(
            tree.reparent(a, Some(inner)),
            Err(TreeError::WouldCycle {
                child: a,
                parent: inner
            })
        );
        assert_eq!(
            tree.reparent(a, Some(a)),
            Err(TreeError::WouldCycle { child: a, parent: a })
        );

        tree.reparent(inner, Some(root)).unwrap();
        assert_eq!(tree.children_of(root), &[a, b, inner]);
        assert!(tree.children_of(a).is_empty());

        tree.reparent(b, None).unwrap();
        assert_eq!(tree.parent_of(b), None);
        assert_eq!(tree.children_of(root), &[a, inner]);
    }

    #[test]
    fn make_selectable_is_idempotent() {
        let mut tree = Tree::new();
        let row = tree.insert(None).unwrap();
        let a = tree.insert(Some(row)).unwrap();
        let _b = tree.insert(Some(row)).unwrap();

        tree.make_selectable(row, RegionConfig::horizontal())
            .unwrap();
        tree.selectable(row).unwrap().select(None);

        let state = tree.make_selectable(row, RegionConfig::vertical()).unwrap();
        assert_eq!(state.config(), RegionConfig::horizontal());
        assert_eq!(state.selected_element(), Some(a));

        tree.remove(a);
        assert_eq!(
            tree.make_selectable(a, RegionConfig::default())
                .unwrap_err(),
            TreeError::StaleElement(a)
        );
    }

    #[test]
    fn listeners_see_target_then_ancestors() {
        let mut tree = Tree::new().with_delivery_log();
        let menu = tree
            .insert_region(None, LinearSelectable::new(RegionConfig::vertical()))
            .unwrap();
        let row = tree
            .insert_region(Some(menu), LinearSelectable::default())
            .unwrap();
        let leaf = tree.insert(Some(row)).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        for node in [leaf, row, menu] {
            let seen = Rc::clone(&seen);
            tree.add_listener(node, move |d, ev| {
                seen.borrow_mut().push((node, d.phase, ev.target));
                Outcome::Continue
            })
            .unwrap();
        }

        tree.selectable(menu).unwrap().select(None);

        assert_eq!(
            *seen.borrow(),
            vec![
                (leaf, Phase::Target, leaf),
                (row, Phase::Bubble, leaf),
                (menu, Phase::Bubble, leaf),
            ]
        );
        let deliveries = tree.take_deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].stopped_at, None);
        assert!(!deliveries[0].default_prevented);
    }

    #[test]
    fn stop_skips_later_listeners_and_outer_elements() {
        let mut tree = Tree::new().with_delivery_log();
        let outer = tree
            .insert_region(None, LinearSelectable::default())
            .unwrap();
        let inner = tree
            .insert_region(Some(outer), LinearSelectable::default())
            .unwrap();
        let leaf = tree.insert(Some(inner)).unwrap();

        let calls: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));
        for (node, name, outcome) in [
            (inner, "first", Outcome::Stop),
            (inner, "second", Outcome::Continue),
            (outer, "outer", Outcome::Continue),
        ] {
            let calls = Rc::clone(&calls);
            tree.add_listener(node, move |_, ev| {
                calls.borrow_mut().push(name);
                ev.prevent_default();
                outcome
            })
            .unwrap();
        }

        tree.selectable(outer).unwrap().select(None);

        assert_eq!(*calls.borrow(), vec!["first"]);
        let deliveries = tree.take_deliveries();
        assert_eq!(deliveries[0].target, leaf);
        assert!(deliveries[0].default_prevented);
        assert_eq!(deliveries[0].stopped_at, Some(Dispatch::bubble(inner)));
    }

    #[test]
    fn removing_an_element_drops_its_listeners() {
        let mut tree = Tree::new().with_delivery_log();
        let row = tree
            .insert_region(None, LinearSelectable::default())
            .unwrap();
        let a = tree.insert(Some(row)).unwrap();

        let hits = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&hits);
        tree.add_listener(a, move |_, _| {
            *counter.borrow_mut() += 1;
            Outcome::Continue
        })
        .unwrap();

        tree.remove(a);
        assert!(tree.add_listener(a, |_, _| Outcome::Continue).is_err());

        let b = tree.insert(Some(row)).unwrap();
        tree.selectable(row).unwrap().select(None);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(tree.take_deliveries()[0].target, b);
        assert_eq!(Rc::strong_count(&hits), 1);
    }

    #[test]
    fn delivery_log_is_opt_in() {
        let mut tree = Tree::new();
        assert!(!tree.is_recording_deliveries());
        let row = tree
            .insert_region(None, LinearSelectable::new(RegionConfig::horizontal()))
            .unwrap();
        let a = tree.insert(Some(row)).unwrap();
        let b = tree.insert(Some(row)).unwrap();

        let announced = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&announced);
        tree.add_listener(row, move |_, ev| {
            sink.borrow_mut().push(ev.target);
            Outcome::Continue
        })
        .unwrap();

        let mut handle = tree.selectable(row).unwrap();
        handle.select(None);
        handle.right();
        assert!(tree.take_deliveries().is_empty());
        assert_eq!(*announced.borrow(), vec![a, b]);

        tree.record_deliveries(true);
        tree.selectable(row).unwrap().left();
        tree.selectable(row).unwrap().right();
        assert_eq!(tree.take_deliveries().len(), 2);

        // Switching the log off drops whatever was pending.
        tree.selectable(row).unwrap().left();
        tree.record_deliveries(false);
        tree.selectable(row).unwrap().right();
        assert!(tree.take_deliveries().is_empty());
        assert_eq!(announced.borrow().len(), 6);
    }
}
