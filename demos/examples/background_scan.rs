// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background work: scan a directory on a worker thread, apply results on the graph thread.
//!
//! The graph cannot leave the thread that owns it. Workers publish plain data
//! through a hand-off channel and the frame loop drains it once per frame.
//!
//! Run:
//! - `cargo run -p trellis_demos --example background_scan -- [DIR]`

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trellis_box_graph::{Direction, Graph, NAME, handoff};
use trellis_props::{Key, Props};

/// Size in bytes of the file a box stands for.
const FILE_SIZE: Key<u64> = Key::new("demo.fileSize").doc("size in bytes of the scanned file");

#[derive(Debug)]
struct Found {
    name: String,
    size: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = std::env::args_os().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let (publisher, inbox) = handoff::channel::<Found>();

    let worker = thread::spawn(move || {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(dir = %dir.display(), %err, "cannot scan");
                return;
            }
        };
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if meta.is_file() {
                publisher.publish(Found {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    size: meta.len(),
                });
            }
        }
    });

    let mut graph = Graph::new();
    let root = graph.root();

    // A stand-in for the host frame loop.
    let mut frame = 0;
    loop {
        let done = worker.is_finished();
        let applied = inbox.apply_to(&mut graph, |graph, found| {
            graph.insert_under(
                root,
                Props::new().with(&NAME, found.name).with(&FILE_SIZE, found.size),
            );
        });
        tracing::debug!(frame, applied, "frame");
        if done && inbox.is_empty() {
            break;
        }
        frame += 1;
        thread::sleep(Duration::from_millis(16));
    }

    let total: u64 = graph.find(root, &FILE_SIZE, Direction::Downwards).sum();
    println!(
        "{} files, {} bytes, in {} frame(s)",
        graph.children_of(root).len(),
        total,
        frame + 1
    );
}
