// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-thread hand-off into the graph thread.
//!
//! The [`Graph`] never leaves the thread that owns it. Background work (file
//! scans, thumbnailing, compilation) runs elsewhere and publishes plain data
//! through a [`Publisher`]; once per frame the graph thread drains the
//! matching [`Inbox`] and applies each item to the graph itself.
//!
//! ```rust
//! use trellis_box_graph::{Graph, handoff};
//! use trellis_props::{Key, Props};
//!
//! const FOUND: Key<String> = Key::new("docs.handoff.found");
//!
//! let (publisher, inbox) = handoff::channel::<String>();
//! std::thread::spawn(move || publisher.publish("a.txt".to_string()))
//!     .join()
//!     .unwrap();
//!
//! let mut graph = Graph::new();
//! let root = graph.root();
//! let applied = inbox.apply_to(&mut graph, |graph, name| {
//!     graph.insert_under(root, Props::new().with(&FOUND, name));
//! });
//! assert_eq!(applied, 1);
//! assert_eq!(graph.children_of(root).len(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::Graph;

/// Create a connected publisher/inbox pair.
pub fn channel<T: Send>() -> (Publisher<T>, Inbox<T>) {
    let queue = Arc::new(Mutex::new(Vec::new()));
    (
        Publisher {
            queue: Arc::clone(&queue),
        },
        Inbox { queue },
    )
}

/// Sending half, usable from any thread.
#[derive(Debug)]
pub struct Publisher<T> {
    queue: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T: Send> Publisher<T> {
    /// Queue one item for the graph thread.
    pub fn publish(&self, item: T) {
        self.queue.lock().push(item);
    }

    /// Queue several items under one lock.
    pub fn publish_all(&self, items: impl IntoIterator<Item = T>) {
        self.queue.lock().extend(items);
    }
}

/// Receiving half, drained by the graph thread.
#[derive(Debug)]
pub struct Inbox<T> {
    queue: Arc<Mutex<Vec<T>>>,
}

impl<T: Send> Inbox<T> {
    /// Take everything published so far, in publication order.
    pub fn drain(&self) -> Vec<T> {
        core::mem::take(&mut *self.queue.lock())
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Drain and apply each item to `graph`, returning how many were applied.
    ///
    /// The lock is released before `apply` runs, so publishers never wait on
    /// graph work.
    pub fn apply_to(&self, graph: &mut Graph, mut apply: impl FnMut(&mut Graph, T)) -> usize {
        let items = self.drain();
        let count = items.len();
        for item in items {
            apply(graph, item);
        }
        if count > 0 {
            tracing::debug!(count, "applied published items");
        }
        count
    }
}
