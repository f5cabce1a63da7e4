// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: element handles, navigation commands, and region configuration.

/// Identifier for an element in a [`Tree`](crate::Tree) (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The single axis a linear region traverses.
///
/// Moves along the other axis are never handled locally; they are handed to
/// the parent region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Moves horizontally, either left or right.
    #[default]
    Horizontal,
    /// Moves vertically, either up or down.
    Vertical,
}

/// A navigation command, as produced by a gamepad or TV remote.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Move the selection up.
    Up,
    /// Move the selection down.
    Down,
    /// Move the selection to the left.
    Left,
    /// Move the selection to the right.
    Right,
    /// Explicit back command, typically used to leave a region.
    Back,
}

impl Move {
    /// The axis this move travels along, or `None` for [`Move::Back`].
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Left | Self::Right => Some(Axis::Horizontal),
            Self::Up | Self::Down => Some(Axis::Vertical),
            Self::Back => None,
        }
    }

    /// The step through a child sequence this move asks for.
    ///
    /// [`Move::Back`] steps backwards, like up and left.
    pub const fn step(self) -> Step {
        match self {
            Self::Down | Self::Right => Step::Next,
            Self::Up | Self::Left | Self::Back => Step::Previous,
        }
    }
}

/// Direction of travel through a child sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Towards the end of the sequence.
    Next,
    /// Towards the start of the sequence.
    Previous,
}

bitflags::bitflags! {
    /// Behavior switches for a linear region.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RegionFlags: u8 {
        /// Moving before the first child wraps to the last child.
        const WRAP_START    = 0b0000_0001;
        /// Moving past the last child wraps to the first child.
        const WRAP_END      = 0b0000_0010;
        /// `back` selects the previous sibling instead of going to the parent.
        const CAN_MOVE_BACK = 0b0000_0100;
    }
}

impl Default for RegionFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Configuration for a [`LinearSelectable`](crate::LinearSelectable) region.
///
/// The default is a horizontal region that neither wraps nor handles `back`.
///
/// ```rust
/// use understory_selectable::{Axis, RegionConfig, RegionFlags};
///
/// let config = RegionConfig::vertical().with_flags(RegionFlags::CAN_MOVE_BACK);
/// assert_eq!(config.axis, Axis::Vertical);
/// assert!(config.can_move_back());
/// assert!(!config.wrap_end());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionConfig {
    /// The axis next/previous traversal maps to.
    pub axis: Axis,
    /// Wrap and back handling switches.
    pub flags: RegionFlags,
}

impl RegionConfig {
    /// A region whose children run left to right.
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            flags: RegionFlags::empty(),
        }
    }

    /// A region whose children run top to bottom.
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            flags: RegionFlags::empty(),
        }
    }

    /// Add `flags` to this configuration.
    pub fn with_flags(mut self, flags: RegionFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Whether moving before the first child wraps to the last.
    pub fn wrap_start(&self) -> bool {
        self.flags.contains(RegionFlags::WRAP_START)
    }

    /// Whether moving past the last child wraps to the first.
    pub fn wrap_end(&self) -> bool {
        self.flags.contains(RegionFlags::WRAP_END)
    }

    /// Whether `back` is handled by this region.
    pub fn can_move_back(&self) -> bool {
        self.flags.contains(RegionFlags::CAN_MOVE_BACK)
    }
}
