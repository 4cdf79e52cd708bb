// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File drops: a plugin that turns dropped files into framed, named boxes.
//!
//! This example shows how to:
//! - register a drop handler under a stable id with `put_to_map`,
//! - read the routed target and drawing-space point from the drop event,
//! - consume the drop so handlers below the target are skipped,
//! - handle the routing errors a drop can produce.
//!
//! Run:
//! - `cargo run -p trellis_demos --example file_drop`

use std::path::PathBuf;

use kurbo::{Affine, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use trellis_box_graph::{Direction, FRAME, Graph, NAME};
use trellis_dispatch::{AffineDrawing, DRAWING, DROP_POINT, DROP_TARGET, InputRouter, ON_DROP, on_drop};
use trellis_props::Props;

const TILE: Vec2 = Vec2::new(50.0, 25.0);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // The canvas is scrolled 100 units to the right.
    let drawing = AffineDrawing::new(Affine::translate((100.0, 0.0)));
    let mut graph = Graph::with_root(Props::new().with(&DRAWING, drawing.into_capability()));
    let root = graph.root();

    let folder = graph.insert_under(
        root,
        Props::new()
            .with(&NAME, "folder".to_string())
            .with(&FRAME, Rect::new(100.0, 0.0, 300.0, 200.0)),
    );

    let plugin = graph.insert(Props::new());
    graph.connect(plugin, root);
    if let Some(props) = graph.props_mut(plugin) {
        props.put_to_map(
            &ON_DROP,
            "drag_files_to_canvas",
            on_drop(|graph, event| {
                let (Some(&target), Some(&point)) =
                    (event.props.get(&DROP_TARGET), event.props.get(&DROP_POINT))
                else {
                    return Ok(());
                };
                for (i, file) in event.after.files.iter().enumerate() {
                    let origin = point + Vec2::new(0.0, i as f64 * TILE.y);
                    let name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .ok_or("dropped path has no file name")?;
                    graph.insert_under(
                        target,
                        Props::new()
                            .with(&NAME, name)
                            .with(&FRAME, Rect::from_origin_size(origin, TILE.to_size())),
                    );
                }
                event.consume();
                Ok(())
            }),
        );
    }

    let mut router = InputRouter::new(root);
    router.cursor_pos(&mut graph, 20.0, 20.0);
    match router.drop_files(
        &mut graph,
        vec![PathBuf::from("/tmp/notes.txt"), PathBuf::from("/tmp/sketch.png")],
    ) {
        Ok(faults) if faults.is_empty() => {}
        Ok(faults) => println!("{} drop handler(s) failed", faults.len()),
        Err(err) => println!("drop was not routed: {err}"),
    }

    for (id, name) in graph.find_boxes(folder, &NAME, Direction::Downwards) {
        let frame = graph.props(id).and_then(|p| p.get(&FRAME)).copied();
        println!("{name} at {frame:?}");
    }
}
