// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-drop dispatch.

use kurbo::Point;
use trellis_box_graph::{BoxId, Direction, Graph};
use trellis_event_state::{DropState, Event};

use crate::drawing::DRAWING;
use crate::fault::{Faults, Site};
use crate::handlers::{DROP_POINT, DROP_TARGET, ON_DROP, OnDrop};
use crate::types::DispatchError;

/// Policy for the drop dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropConfig {
    /// Direction searched from the root for a box under the drop point.
    pub hit_direction: Direction,
    /// Route to the current selection when no frame contains the drop point.
    pub selection_fallback: bool,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            hit_direction: Direction::Both,
            selection_fallback: true,
        }
    }
}

impl DropConfig {
    /// Set the hit-test search direction.
    pub fn with_hit_direction(mut self, hit_direction: Direction) -> Self {
        self.hit_direction = hit_direction;
        self
    }

    /// Enable or disable routing to the selection.
    pub fn with_selection_fallback(mut self, selection_fallback: bool) -> Self {
        self.selection_fallback = selection_fallback;
        self
    }
}

/// Routes file drops to the box under the pointer.
///
/// ## Semantics
///
/// 1. The [`DRAWING`] capability is looked up from the root and maps the drop
///    position into drawing space.
/// 2. The target is the first box (breadth first from the root) whose frame
///    contains that point; failing that, the first selected box; failing
///    that, the root.
/// 3. Every [`ON_DROP`] handler found walking upwards from the target runs,
///    the target's own included.
/// 4. Unless a handler [consumed](trellis_event_state::Event::consume) the
///    event, every [`ON_DROP`] handler found walking downwards from the
///    target runs, the target's own included again.
///
/// The target and the drawing-space point are recorded on the event under
/// [`DROP_TARGET`] and [`DROP_POINT`] before any handler runs.
#[derive(Clone, Debug, Default)]
pub struct Drops {
    config: DropConfig,
}

impl Drops {
    /// A dispatcher with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with the given policy.
    pub fn with_config(config: DropConfig) -> Self {
        Self { config }
    }

    /// The dispatcher's policy.
    pub fn config(&self) -> DropConfig {
        self.config
    }

    /// Pick the box a drop at the event's position is routed to.
    pub fn target(&self, graph: &Graph, root: BoxId, event: &Event<DropState>) -> Result<BoxId, DispatchError> {
        self.locate(graph, root, event).map(|(target, _)| target)
    }

    /// Route one drop.
    pub fn dispatch(
        &self,
        graph: &mut Graph,
        root: BoxId,
        event: &mut Event<DropState>,
    ) -> Result<Faults, DispatchError> {
        let (target, point) = self.locate(graph, root, event)?;
        tracing::debug!(?target, x = point.x, y = point.y, files = event.after.files.len(), "routing drop");

        event.props.put(&DROP_TARGET, target);
        event.props.put(&DROP_POINT, point);

        let mut faults = Faults::new();

        let upwards: Vec<OnDrop> = graph
            .find(target, &ON_DROP, Direction::Upwards)
            .flat_map(|handlers| handlers.values().cloned())
            .collect();
        run(graph, event, upwards, &mut faults);

        if event.is_consumed() {
            tracing::debug!(?target, "drop consumed on the way up");
        } else {
            let downwards: Vec<OnDrop> = graph
                .find(target, &ON_DROP, Direction::Downwards)
                .flat_map(|handlers| handlers.values().cloned())
                .collect();
            run(graph, event, downwards, &mut faults);
        }

        faults.log();
        Ok(faults)
    }

    fn locate(
        &self,
        graph: &Graph,
        root: BoxId,
        event: &Event<DropState>,
    ) -> Result<(BoxId, Point), DispatchError> {
        let drawing = graph
            .first(root, &DRAWING, Direction::Both)
            .ok_or(DispatchError::MissingDrawing)?;
        let position = event.after.position().ok_or(DispatchError::MissingPosition)?;
        let point = drawing.window_system_to_drawing_system(position);
        Ok((self.target_at(graph, root, point), point))
    }

    fn target_at(&self, graph: &Graph, root: BoxId, point: Point) -> BoxId {
        graph
            .box_at(root, self.config.hit_direction, point)
            .or_else(|| {
                if self.config.selection_fallback {
                    graph.selection(root).next()
                } else {
                    None
                }
            })
            .unwrap_or(root)
    }
}

fn run(graph: &mut Graph, event: &mut Event<DropState>, handlers: Vec<OnDrop>, faults: &mut Faults) {
    for handler in handlers {
        if let Err(error) = handler(graph, event) {
            faults.record(Site::Drop, None, error);
        }
    }
}
