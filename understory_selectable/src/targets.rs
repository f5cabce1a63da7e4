// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tracing` targets used by this crate.
//!
//! Use these with subscriber directives to filter logs by subsystem, for
//! example `understory_selectable::navigation=trace`.

/// Moves, entries, delegation, and dropped commands.
pub const NAVIGATION: &str = "understory_selectable::navigation";

/// `selection-changed` delivery.
pub const EVENTS: &str = "understory_selectable::events";

/// Structural edits to a [`Tree`](crate::Tree).
pub const TREE: &str = "understory_selectable::tree";
