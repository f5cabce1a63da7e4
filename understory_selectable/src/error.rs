// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural edits to a [`Tree`](crate::Tree).
//!
//! Navigation itself never fails; these only come from building or
//! rearranging the tree.

use crate::types::ElementId;

/// A structural edit that the tree refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The identifier does not refer to a live element.
    #[error("element {0:?} is not live")]
    StaleElement(ElementId),
    /// Moving `child` under `parent` would make `child` its own ancestor.
    #[error("moving {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The element being moved.
        child: ElementId,
        /// The requested new parent.
        parent: ElementId,
    },
}
