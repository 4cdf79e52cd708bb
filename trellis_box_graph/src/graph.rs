// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core graph implementation: arena, edges, discovery queries.

use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;
use trellis_props::{Key, Props};

use crate::keys::{FRAME, IS_SELECTED, IS_STICKY, NAME};
use crate::traverse::BreadthFirst;
use crate::types::{BoxId, Direction};
use crate::util::frame_contains;

/// The box graph.
///
/// Owns every box in an arena of slots addressed by generational [`BoxId`]s.
/// A fresh graph contains a single root box; plugins usually hang their
/// service boxes *above* the root (`connect(service, root)`) and document
/// content below it, so that walking upwards from any content box reaches the
/// services.
///
/// Operations given a stale [`BoxId`] (one whose box has been removed) are
/// no-ops: queries return `None` or an empty result and mutators return
/// `false`.
///
/// ## Example
///
/// ```rust
/// use trellis_box_graph::{Direction, Graph};
/// use trellis_props::Props;
///
/// let mut graph = Graph::new();
/// let root = graph.root();
/// let a = graph.insert_under(root, Props::new());
/// let b = graph.insert_under(a, Props::new());
///
/// let below: Vec<_> = graph.breadth_first(root, Direction::Downwards).collect();
/// assert_eq!(below, [root, a, b]);
///
/// graph.disconnect(a, b);
/// assert_eq!(graph.breadth_first(root, Direction::Downwards).count(), 2);
/// ```
pub struct Graph {
    /// slots
    nodes: Vec<Option<BoxNode>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// slots whose generation is exhausted; never reused
    retired: usize,
    root: BoxId,
}

struct BoxNode {
    generation: u32,
    props: Props,
    children: SmallVec<[BoxId; 4]>,
    parents: SmallVec<[BoxId; 2]>,
}

impl BoxNode {
    fn new(generation: u32, props: Props) -> Self {
        Self {
            generation,
            props,
            children: SmallVec::new(),
            parents: SmallVec::new(),
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Graph")
            .field("root", &self.root)
            .field("boxes_total", &total)
            .field("boxes_alive", &alive)
            .field("free_list", &free)
            .field("retired", &self.retired)
            .finish_non_exhaustive()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a graph containing only an empty root box.
    pub fn new() -> Self {
        Self::with_root(Props::new())
    }

    /// Create a graph whose root box starts with `props`.
    pub fn with_root(props: Props) -> Self {
        Self {
            nodes: vec![Some(BoxNode::new(1, props))],
            generations: vec![1],
            free_list: Vec::new(),
            retired: 0,
            root: BoxId::new(0, 1),
        }
    }

    /// The root box. It lives as long as the graph.
    pub fn root(&self) -> BoxId {
        self.root
    }

    /// Insert an unconnected box carrying `props`.
    ///
    /// Properties present at insertion act as capabilities the box registers
    /// for itself.
    pub fn insert(&mut self, props: Props) -> BoxId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            // Only slots below the last generation are ever freed.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.nodes[idx] = Some(BoxNode::new(generation, props));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "BoxId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(BoxNode::new(generation, props)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "BoxId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        BoxId::new(idx, generation)
    }

    /// Insert a box and connect it as a child of `parent`.
    ///
    /// If `parent` is stale the box is still inserted, unconnected.
    pub fn insert_under(&mut self, parent: BoxId, props: Props) -> BoxId {
        let id = self.insert(props);
        self.connect(parent, id);
        id
    }

    /// Remove a box, dropping all of its edges, and return its properties.
    ///
    /// Returns `None` for stale ids and for the root, which cannot be removed.
    /// Boxes that were only reachable through the removed one are not removed;
    /// the graph has no ownership hierarchy.
    pub fn remove(&mut self, id: BoxId) -> Option<Props> {
        if id == self.root || !self.is_alive(id) {
            return None;
        }
        let node = self.nodes[id.idx()].take()?;
        for child in &node.children {
            if let Some(c) = self.slot_mut(*child) {
                c.parents.retain(|p| *p != id);
            }
        }
        for parent in &node.parents {
            if let Some(p) = self.slot_mut(*parent) {
                p.children.retain(|c| *c != id);
            }
        }
        if self.generations[id.idx()] == u32::MAX {
            // Reusing the slot would hand out an id equal to a stale one.
            self.retired += 1;
            tracing::debug!(?id, "retired exhausted slot");
        } else {
            self.free_list.push(id.idx());
        }
        tracing::trace!(?id, "removed box");
        Some(node.props)
    }

    /// Make `to` a child of `from` (and `from` a parent of `to`).
    ///
    /// Idempotent: returns `true` only if a new edge was recorded.
    pub fn connect(&mut self, from: BoxId, to: BoxId) -> bool {
        if !self.is_alive(to) {
            return false;
        }
        let Some(parent) = self.slot_mut(from) else {
            return false;
        };
        if parent.children.contains(&to) {
            return false;
        }
        parent.children.push(to);
        if let Some(child) = self.slot_mut(to) {
            child.parents.push(from);
        }
        tracing::trace!(?from, ?to, "connected");
        true
    }

    /// Remove the edge `from → to` in both directions.
    ///
    /// Returns `true` if an edge existed.
    pub fn disconnect(&mut self, from: BoxId, to: BoxId) -> bool {
        let Some(parent) = self.slot_mut(from) else {
            return false;
        };
        let before = parent.children.len();
        parent.children.retain(|c| *c != to);
        if parent.children.len() == before {
            return false;
        }
        if let Some(child) = self.slot_mut(to) {
            child.parents.retain(|p| *p != from);
        }
        tracing::trace!(?from, ?to, "disconnected");
        true
    }

    /// Returns true if `id` refers to a live box.
    ///
    /// A `BoxId` is live if its slot exists and its generation matches the
    /// generation stored in that slot.
    pub fn is_alive(&self, id: BoxId) -> bool {
        self.slot(id).is_some()
    }

    /// Number of live boxes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len() - self.retired
    }

    /// Whether the graph holds only its root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Properties of a live box.
    pub fn props(&self, id: BoxId) -> Option<&Props> {
        self.slot(id).map(|n| &n.props)
    }

    /// Properties of a live box, mutably.
    pub fn props_mut(&mut self, id: BoxId) -> Option<&mut Props> {
        self.slot_mut(id).map(|n| &mut n.props)
    }

    /// Children in edge-insertion order; empty for stale ids.
    pub fn children_of(&self, id: BoxId) -> &[BoxId] {
        self.slot(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parents in edge-insertion order; empty for stale ids.
    pub fn parents_of(&self, id: BoxId) -> &[BoxId] {
        self.slot(id).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Walk the boxes reachable from `start`, breadth first.
    ///
    /// See [`BreadthFirst`] for the ordering guarantees.
    pub fn breadth_first(&self, start: BoxId, direction: Direction) -> BreadthFirst<'_> {
        BreadthFirst::new(self, start, direction)
    }

    /// Values stored under `key` on reachable boxes, nearest first.
    ///
    /// # Panics
    ///
    /// Panics if a reachable box stores a value of another type under the
    /// key's name.
    pub fn find<'g, T: 'static>(
        &'g self,
        start: BoxId,
        key: &Key<T>,
        direction: Direction,
    ) -> impl Iterator<Item = &'g T> + use<'g, T> {
        self.find_boxes(start, key, direction).map(|(_, value)| value)
    }

    /// Like [`Graph::find`], also yielding the box each value lives on.
    pub fn find_boxes<'g, T: 'static>(
        &'g self,
        start: BoxId,
        key: &Key<T>,
        direction: Direction,
    ) -> impl Iterator<Item = (BoxId, &'g T)> + use<'g, T> {
        let key = *key;
        self.breadth_first(start, direction).filter_map(move |id| {
            let props = self.props(id)?;
            props.get(&key).map(|value| (id, value))
        })
    }

    /// The nearest value stored under `key`.
    pub fn first<T: 'static>(&self, start: BoxId, key: &Key<T>, direction: Direction) -> Option<&T> {
        self.find(start, key, direction).next()
    }

    /// The first reachable box whose [`FRAME`] contains `point`.
    ///
    /// `point` must already be in drawing space.
    pub fn box_at(&self, start: BoxId, direction: Direction, point: Point) -> Option<BoxId> {
        self.find_boxes(start, &FRAME, direction)
            .find(|(_, frame)| frame_contains(**frame, point))
            .map(|(id, _)| id)
    }

    /// Boxes reachable from `root` that form the current selection.
    ///
    /// A selected box is marked [`IS_SELECTED`], has a [`FRAME`] and a
    /// [`NAME`], and is not [`IS_STICKY`].
    pub fn selection(&self, root: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        self.breadth_first(root, Direction::Both).filter(|id| {
            self.props(*id).is_some_and(|p| {
                p.is_true(&IS_SELECTED, false)
                    && p.has(&FRAME)
                    && p.has(&NAME)
                    && !p.is_true(&IS_STICKY, false)
            })
        })
    }

    fn slot(&self, id: BoxId) -> Option<&BoxNode> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn slot_mut(&mut self, id: BoxId) -> Option<&mut BoxNode> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    const SERVICE: Key<u32> = Key::new("graph.tests.service");

    fn reaches(graph: &Graph, from: BoxId, to: BoxId) -> bool {
        [Direction::Upwards, Direction::Downwards, Direction::Both]
            .into_iter()
            .any(|d| graph.breadth_first(from, d).any(|id| id == to))
    }

    #[test]
    fn connect_is_symmetric_and_idempotent() {
        let mut graph = Graph::new();
        let a = graph.insert(Props::new());
        let b = graph.insert(Props::new());
        assert!(graph.connect(a, b));
        assert!(!graph.connect(a, b), "second connect records nothing");
        assert_eq!(graph.children_of(a), &[b]);
        assert_eq!(graph.parents_of(b), &[a]);
    }

    #[test]
    fn disconnect_severs_both_directions() {
        let mut graph = Graph::new();
        let a = graph.insert(Props::new());
        let b = graph.insert(Props::new());
        graph.connect(a, b);
        assert!(reaches(&graph, a, b));
        assert!(reaches(&graph, b, a));

        assert!(graph.disconnect(a, b));
        assert!(!reaches(&graph, a, b));
        assert!(!reaches(&graph, b, a));
        assert!(!graph.disconnect(a, b));
    }

    #[test]
    fn find_yields_nearest_first() {
        let mut graph = Graph::new();
        let root = graph.root();
        let far = graph.insert(Props::new().with(&SERVICE, 2));
        let near = graph.insert(Props::new().with(&SERVICE, 1));
        graph.connect(far, near);
        graph.connect(near, root);

        let found: Vec<_> = graph.find(root, &SERVICE, Direction::Upwards).copied().collect();
        assert_eq!(found, [1, 2]);
        assert_eq!(graph.first(root, &SERVICE, Direction::Upwards), Some(&1));
        assert_eq!(graph.first(root, &SERVICE, Direction::Downwards), None);
    }

    #[test]
    fn find_without_matches_is_empty() {
        let graph = Graph::new();
        assert_eq!(graph.find(graph.root(), &SERVICE, Direction::Both).count(), 0);
    }

    #[test]
    fn removed_ids_go_stale() {
        let mut graph = Graph::new();
        let root = graph.root();
        let a = graph.insert_under(root, Props::new().with(&SERVICE, 7));
        let props = graph.remove(a).expect("live box is removable");
        assert_eq!(props.get(&SERVICE), Some(&7));

        assert!(!graph.is_alive(a));
        assert!(graph.props(a).is_none());
        assert!(graph.children_of(root).is_empty(), "edges are dropped with the box");
        assert!(!graph.connect(root, a));

        // The slot is reused under a new generation.
        let b = graph.insert(Props::new());
        assert_ne!(a, b);
        assert!(graph.is_alive(b));
        assert!(!graph.is_alive(a));
    }

    #[test]
    fn exhausted_slot_is_retired() {
        let mut graph = Graph::new();
        let a = graph.insert(Props::new());
        graph.remove(a);
        graph.generations[a.idx()] = u32::MAX - 1;

        let last = graph.insert(Props::new());
        assert_eq!(last.idx(), a.idx(), "free slot is reused");
        assert_eq!(last.1, u32::MAX);
        graph.remove(last);
        assert_eq!(graph.len(), 1, "only the root is alive");

        let next = graph.insert(Props::new());
        assert_ne!(next.idx(), last.idx(), "retired slot is not handed out again");
        assert!(!graph.is_alive(last));
        assert!(graph.is_alive(next));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut graph = Graph::new();
        assert!(graph.remove(graph.root()).is_none());
        assert!(graph.is_alive(graph.root()));
        assert!(graph.is_empty());
    }

    #[test]
    fn self_loop_is_harmless() {
        let mut graph = Graph::new();
        let a = graph.insert(Props::new());
        graph.connect(a, a);
        assert_eq!(graph.breadth_first(a, Direction::Both).count(), 1);
        assert!(graph.remove(a).is_some());
    }

    #[test]
    fn box_at_uses_inclusive_frames() {
        let mut graph = Graph::new();
        let root = graph.root();
        let a = graph.insert_under(
            root,
            Props::new().with(&FRAME, Rect::from_origin_size((0.0, 0.0), (10.0, 10.0))),
        );
        let _b = graph.insert_under(
            root,
            Props::new().with(&FRAME, Rect::from_origin_size((20.0, 20.0), (10.0, 10.0))),
        );
        assert_eq!(graph.box_at(root, Direction::Both, Point::new(10.0, 10.0)), Some(a));
        assert_eq!(graph.box_at(root, Direction::Both, Point::new(15.0, 15.0)), None);
    }

    #[test]
    fn selection_skips_sticky_and_unnamed_boxes() {
        let mut graph = Graph::new();
        let root = graph.root();
        let frame = Rect::new(0.0, 0.0, 1.0, 1.0);
        let selected = |name: Option<&str>| {
            let mut props = Props::new().with(&IS_SELECTED, true).with(&FRAME, frame);
            if let Some(name) = name {
                props.put(&NAME, name.to_string());
            }
            props
        };
        let good = graph.insert_under(root, selected(Some("good")));
        let _unnamed = graph.insert_under(root, selected(None));
        let _sticky = graph.insert_under(root, selected(Some("sticky")).with(&IS_STICKY, true));
        let _unselected = graph.insert_under(root, Props::new().with(&FRAME, frame));

        let found: Vec<_> = graph.selection(root).collect();
        assert_eq!(found, [good]);
    }
}
