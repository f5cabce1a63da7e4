// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Selectable: directional selection for 10-foot interfaces.
//!
//! TV and gamepad UIs move selection with four arrows and a back button
//! rather than a pointer. This crate models that as a tree of *regions*:
//! each region selects exactly one of its direct children, and a command a
//! region cannot satisfy is handed to its parent region.
//!
//! The pieces:
//! - **Commands** ([`Move`]): up, down, left, right, and back.
//! - **The capability** ([`Selectable`]): the narrow interface a region
//!   exposes to input handling and to other regions.
//! - **Region state** ([`LinearSelectable`]): a region whose children form a
//!   single horizontal or vertical sequence, configured by [`RegionConfig`].
//! - **Entry policies** ([`EntryPolicy`]): how a region picks a child when
//!   selection enters it from outside.
//! - **Hosts** ([`SelectionHost`]): the containment structure that stores
//!   region state and receives the `selection-changed` notification.
//!   [`Tree`] is a ready-made host.
//!
//! ## Minimal example
//!
//! Two rows of tiles stacked vertically. Moving right past the end of the
//! first row is not handled by the row, so it reaches the menu, which has
//! no horizontal axis either and drops it.
//!
//! ```rust
//! use understory_selectable::{
//!     LinearSelectable, Move, RegionConfig, Selectable, Tree, focused_element, route_move,
//! };
//!
//! let mut tree = Tree::new().with_delivery_log();
//! let menu = tree
//!     .insert_region(None, LinearSelectable::new(RegionConfig::vertical()))
//!     .unwrap();
//! let top = tree.insert_region(Some(menu), LinearSelectable::default()).unwrap();
//! let bottom = tree.insert_region(Some(menu), LinearSelectable::default()).unwrap();
//! let t0 = tree.insert(Some(top)).unwrap();
//! let t1 = tree.insert(Some(top)).unwrap();
//! let b0 = tree.insert(Some(bottom)).unwrap();
//!
//! tree.selectable(menu).unwrap().select(None);
//! assert_eq!(focused_element(&tree, menu), Some(t0));
//!
//! route_move(&mut tree, menu, Move::Right);
//! route_move(&mut tree, menu, Move::Right);
//! assert_eq!(focused_element(&tree, menu), Some(t1));
//!
//! // Down is not the row's axis: the menu moves to the next row.
//! route_move(&mut tree, menu, Move::Down);
//! assert_eq!(focused_element(&tree, menu), Some(b0));
//!
//! let announced: Vec<_> = tree.take_deliveries().iter().map(|d| d.target).collect();
//! assert_eq!(announced, [t0, t1, b0]);
//! ```
//!
//! ## Custom hosts
//!
//! Regions do not own their children. Any structure that implements
//! [`Containment`] and [`SelectionHost`] can drive them: a widget tree, a
//! retained scene, or a test fixture. The host must not contain cycles.
//!
//! ## Logging
//!
//! The crate emits `tracing` events under the targets in [`targets`]. No
//! subscriber is installed; applications opt in.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod containment;
mod entry;
mod error;
pub mod event;
mod linear;
mod selectable;
pub mod targets;
mod tree;
mod types;

pub use containment::{Children, Containment, children, is_child_of};
pub use entry::{EntryPolicy, FirstChild, NearestEdge, PreferChild};
pub use error::TreeError;
pub use event::{Delivery, Outcome, SELECTION_CHANGED, SelectionChanged};
pub use linear::LinearSelectable;
pub use selectable::{Region, Selectable, SelectionHost, focused_element, route_move};
pub use tree::Tree;
pub use types::{Axis, ElementId, Move, RegionConfig, RegionFlags, Step};
