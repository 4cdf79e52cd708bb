// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Box Graph: a cyclic, multi-parent graph of property-carrying boxes.
//!
//! Boxes are the nodes that plugins, drawing layers, and editor integrations
//! hang their state on. Each box owns a [`Props`](trellis_props::Props)
//! dictionary and two ordered adjacency sets. Nobody holds direct references
//! to anybody else: collaborators are discovered by walking the graph and
//! looking for typed properties.
//!
//! - Represents boxes in an arena addressed by generational [`BoxId`] handles.
//! - Records every connection symmetrically: [`Graph::connect`]`(a, b)` makes
//!   `b` a child of `a` and `a` a parent of `b`.
//! - Allows any number of parents and children, including cycles.
//! - Provides breadth-first traversal in a chosen [`Direction`] and
//!   capability discovery on top of it ([`Graph::find`], [`Graph::first`]).
//!
//! ## Traversal order
//!
//! [`Graph::breadth_first`] yields the start box first, then boxes in breadth
//! level order. Within a level, neighbours appear in the order their edges were
//! created; with [`Direction::Both`], a box's children come before its parents.
//! Every reachable box is yielded exactly once, no matter how many paths lead
//! to it. Plugins rely on this order for priority ("first handler wins"), so it
//! is part of the contract.
//!
//! ## Capability discovery
//!
//! ```rust
//! use trellis_box_graph::{Direction, Graph};
//! use trellis_props::{Key, Props};
//!
//! const GREETING: Key<&'static str> = Key::new("docs.greeting");
//!
//! let mut graph = Graph::new();
//! let root = graph.root();
//! let service = graph.insert(Props::new().with(&GREETING, "hello"));
//! let document = graph.insert(Props::new());
//!
//! // The service sits above the root; the document below it.
//! graph.connect(service, root);
//! graph.connect(root, document);
//!
//! // From the document, walking up finds the service.
//! assert_eq!(graph.first(document, &GREETING, Direction::Upwards), Some(&"hello"));
//! assert_eq!(graph.first(document, &GREETING, Direction::Downwards), None);
//! ```
//!
//! ## Geometry conventions
//!
//! Boxes that want to be hit-testable store a [`FRAME`] rectangle. The
//! selection conventions ([`IS_SELECTED`], [`IS_STICKY`], [`NAME`]) are shared
//! by the input dispatchers.
//!
//! ## Threads
//!
//! A [`Graph`] is neither `Send` nor `Sync`: it is owned by one thread, the one
//! running the host frame loop. Worker threads publish results through the
//! [`handoff`] channel and the graph thread applies them.

mod graph;
pub mod handoff;
mod keys;
mod traverse;
mod types;
mod util;

pub use graph::Graph;
pub use keys::{FRAME, IS_SELECTED, IS_STICKY, NAME};
pub use traverse::BreadthFirst;
pub use types::{BoxId, Direction};
pub use util::frame_contains;
