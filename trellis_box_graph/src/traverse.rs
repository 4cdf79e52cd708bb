// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breadth-first traversal over the box graph.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::graph::Graph;
use crate::types::{BoxId, Direction};

/// Lazy breadth-first walk returned by [`Graph::breadth_first`].
///
/// Yields the start box first, then every reachable box exactly once in
/// breadth level order. Neighbours are enqueued in edge-insertion order,
/// children before parents when walking [`Direction::Both`].
///
/// The walk cannot be restarted; call [`Graph::breadth_first`] again.
#[derive(Debug)]
pub struct BreadthFirst<'g> {
    graph: &'g Graph,
    direction: Direction,
    queue: VecDeque<BoxId>,
    visited: HashSet<BoxId>,
}

impl<'g> BreadthFirst<'g> {
    pub(crate) fn new(graph: &'g Graph, start: BoxId, direction: Direction) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if graph.is_alive(start) {
            queue.push_back(start);
            visited.insert(start);
        }
        Self {
            graph,
            direction,
            queue,
            visited,
        }
    }

    fn enqueue(&mut self, neighbours: &[BoxId]) {
        for &next in neighbours {
            if self.visited.insert(next) {
                self.queue.push_back(next);
            }
        }
    }
}

impl Iterator for BreadthFirst<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let id = self.queue.pop_front()?;
        let graph = self.graph;
        if self.direction.follows_children() {
            self.enqueue(graph.children_of(id));
        }
        if self.direction.follows_parents() {
            self.enqueue(graph.parents_of(id));
        }
        Some(id)
    }
}

impl core::iter::FusedIterator for BreadthFirst<'_> {}
