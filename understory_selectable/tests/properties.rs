// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the selection state machine.
//!
//! 1. Every region's live selection is one of its direct children
//! 2. Only leaves are announced, once per entry
//! 3. Running off the end of a non-wrapping region leaves it in place
//! 4. Wrapping regions cycle through every child
//! 5. Moves on the other axis never touch local state
//! 6. `back` without permission never touches local state
//! 7. `reset_selection` is silent

use proptest::prelude::*;
use understory_selectable::{
    Containment, ElementId, LinearSelectable, Move, RegionConfig, RegionFlags, Selectable, Tree,
    focused_element, is_child_of, route_move,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_move() -> impl Strategy<Value = Move> {
    proptest::sample::select(vec![Move::Up, Move::Down, Move::Left, Move::Right, Move::Back])
}

fn arb_flags() -> impl Strategy<Value = RegionFlags> {
    (0_u8..8).prop_map(RegionFlags::from_bits_truncate)
}

/// A horizontal row of `n` leaves.
fn row(n: usize, flags: RegionFlags) -> (Tree, ElementId, Vec<ElementId>) {
    let mut tree = Tree::new().with_delivery_log();
    let row = tree
        .insert_region(
            None,
            LinearSelectable::new(RegionConfig::horizontal().with_flags(flags)),
        )
        .unwrap();
    let leaves = (0..n).map(|_| tree.insert(Some(row)).unwrap()).collect();
    (tree, row, leaves)
}

/// A vertical menu of rows; each row has the given number of leaves.
fn menu(rows: &[(usize, RegionFlags)], menu_flags: RegionFlags) -> (Tree, ElementId) {
    let mut tree = Tree::new().with_delivery_log();
    let menu = tree
        .insert_region(
            None,
            LinearSelectable::new(RegionConfig::vertical().with_flags(menu_flags)),
        )
        .unwrap();
    for &(len, flags) in rows {
        let row = tree
            .insert_region(
                Some(menu),
                LinearSelectable::new(RegionConfig::horizontal().with_flags(flags)),
            )
            .unwrap();
        for _ in 0..len {
            tree.insert(Some(row)).unwrap();
        }
    }
    (tree, menu)
}

fn selected(tree: &Tree, region: ElementId) -> Option<ElementId> {
    tree.region(region).and_then(|r| r.selected_element())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Structural invariants under arbitrary input
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selection_stays_a_direct_child(
        rows in proptest::collection::vec((0_usize..5, arb_flags()), 0..5),
        menu_flags in arb_flags(),
        moves in proptest::collection::vec(arb_move(), 0..40),
    ) {
        let (mut tree, root) = menu(&rows, menu_flags);
        let regions: Vec<ElementId> = core::iter::once(root)
            .chain(tree.children_of(root).iter().copied())
            .collect();

        for mv in moves {
            route_move(&mut tree, root, mv);

            for &region in &regions {
                if let Some(child) = selected(&tree, region) {
                    prop_assert!(is_child_of(&tree, child, region));
                }
            }
            if let Some(focused) = focused_element(&tree, root) {
                prop_assert!(tree.is_present(focused));
            }
        }

        for delivery in tree.take_deliveries() {
            prop_assert!(tree.region(delivery.target).is_none());
            prop_assert!(!delivery.default_prevented);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Running off the end
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn running_off_the_end_stays_on_last(n in 1_usize..8, extra in 0_usize..5) {
        let (mut tree, region, leaves) = row(n, RegionFlags::empty());
        let mut handle = tree.selectable(region).unwrap();
        handle.select(None);
        for _ in 0..(n - 1 + extra) {
            handle.right();
        }
        prop_assert_eq!(handle.selected_element(), leaves.last().copied());

        let announced: Vec<_> = tree.take_deliveries().iter().map(|d| d.target).collect();
        prop_assert_eq!(announced, leaves);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Wrapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrapping_cycles_through_every_child(n in 2_usize..8, steps in 0_usize..20) {
        let (mut tree, region, leaves) = row(n, RegionFlags::WRAP_START | RegionFlags::WRAP_END);
        let mut handle = tree.selectable(region).unwrap();
        handle.select(None);
        for _ in 0..steps {
            handle.right();
        }
        prop_assert_eq!(handle.selected_element(), Some(leaves[steps % n]));
        for _ in 0..steps {
            handle.left();
        }
        prop_assert_eq!(handle.selected_element(), Some(leaves[0]));
        prop_assert_eq!(tree.take_deliveries().len(), 1 + 2 * steps);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-7. Commands that must not touch local state
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn orthogonal_moves_are_ignored_locally(
        n in 0_usize..6,
        flags in arb_flags(),
        moves in proptest::collection::vec(
            proptest::sample::select(vec![Move::Up, Move::Down]),
            0..10,
        ),
    ) {
        let (mut tree, region, _) = row(n, flags);
        let mut handle = tree.selectable(region).unwrap();
        handle.select(None);
        let before = handle.selected_element();
        for mv in moves {
            handle.navigate(mv);
        }
        prop_assert_eq!(handle.selected_element(), before);
        prop_assert_eq!(tree.take_deliveries().len(), usize::from(n > 0));
    }

    #[test]
    fn back_without_permission_is_ignored_locally(
        n in 1_usize..6,
        start in 0_usize..6,
        backs in 1_usize..5,
    ) {
        let (mut tree, region, leaves) = row(n, RegionFlags::WRAP_START | RegionFlags::WRAP_END);
        let start = start % n;
        let mut handle = tree.selectable(region).unwrap();
        handle.select(None);
        for _ in 0..start {
            handle.right();
        }
        for _ in 0..backs {
            handle.back();
        }
        prop_assert_eq!(handle.selected_element(), Some(leaves[start]));
    }

    #[test]
    fn reset_is_silent(n in 0_usize..6, moves in proptest::collection::vec(arb_move(), 0..10)) {
        let (mut tree, region, _) = row(n, RegionFlags::CAN_MOVE_BACK);
        let mut handle = tree.selectable(region).unwrap();
        for mv in moves {
            handle.navigate(mv);
        }
        let _ = tree.take_deliveries();

        let mut handle = tree.selectable(region).unwrap();
        handle.reset_selection();
        prop_assert_eq!(handle.selected_element(), None);
        prop_assert!(tree.take_deliveries().is_empty());
    }
}
