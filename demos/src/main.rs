// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remote-control navigation over a TV home screen.
//!
//! This demo shows how to combine:
//! - a vertical menu region whose rows are horizontal shelves,
//! - shelf configuration loaded from JSON (`serde` feature),
//! - `selection-changed` listeners and [`route_move`] as the input entry point.
//!
//! Run:
//! - `cargo run -p understory_demos`
//! - `RUST_LOG=understory_selectable=trace cargo run -p understory_demos`

use std::collections::HashMap;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use understory_selectable::{
    ElementId, LinearSelectable, Move, Outcome, RegionConfig, Tree, focused_element, route_move,
};

const SHELVES: &str = r#"[
    {
        "label": "Continue watching",
        "config": { "axis": "horizontal", "flags": "WRAP_START | WRAP_END" },
        "tiles": ["Nature Doc", "Cooking Show", "Space Opera"]
    },
    {
        "label": "Settings",
        "config": { "axis": "horizontal", "flags": "CAN_MOVE_BACK" },
        "tiles": ["Audio", "Video", "Network", "About"]
    }
]"#;

/// One row of the home screen as described in JSON.
#[derive(Debug, Deserialize)]
struct Shelf {
    label: String,
    config: RegionConfig,
    tiles: Vec<String>,
}

fn load_shelves(json: &str) -> Result<Vec<Shelf>, serde_json::Error> {
    serde_json::from_str(json)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut tree = Tree::new().with_delivery_log();
    let mut labels: HashMap<ElementId, String> = HashMap::new();

    // Rows keep their selection, so moving back into one resumes where it was left.
    let menu = tree.insert_region(None, LinearSelectable::new(RegionConfig::vertical()))?;
    labels.insert(menu, "Home".into());

    let shelves = load_shelves(SHELVES)?;
    for shelf in shelves {
        let row = tree.insert_region(Some(menu), LinearSelectable::new(shelf.config))?;
        labels.insert(row, shelf.label);
        for tile in shelf.tiles {
            let id = tree.insert(Some(row))?;
            labels.insert(id, tile);
        }
    }

    // One listener at the top sees every selection as it bubbles up.
    let names = labels.clone();
    tree.add_listener(menu, move |_, ev| {
        let name = names.get(&ev.target).map_or("?", String::as_str);
        tracing::info!(target: "understory_demos", tile = name, "{}", ev.name());
        Outcome::Continue
    })?;

    let script = [
        Move::Down,
        Move::Right,
        Move::Right,
        Move::Right,
        Move::Down,
        Move::Right,
        Move::Back,
        Move::Back,
        Move::Up,
        Move::Left,
    ];
    for mv in script {
        route_move(&mut tree, menu, mv);
        let focused = focused_element(&tree, menu)
            .and_then(|id| labels.get(&id))
            .map_or("(nothing)", String::as_str);
        println!("{mv:?} -> {focused}");
    }

    let deliveries = tree.take_deliveries();
    println!("{} selection-changed events delivered", deliveries.len());
    Ok(())
}
