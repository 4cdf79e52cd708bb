// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler registration keys and the drag capability.
//!
//! Plugins register handlers by adding them to a box's properties; the
//! dispatchers find them by walking the graph. Handlers are reference-counted
//! so a dispatcher can take a snapshot of the handlers it found and release
//! the graph before calling them: a handler receives `&mut Graph` and may add,
//! remove, or rewire boxes, including its own.

use std::rc::Rc;

use kurbo::Point;
use trellis_box_graph::{BoxId, Graph};
use trellis_event_state::{Button, DropState, Event, MouseState};
use trellis_props::{IdMap, Key};

use crate::types::{HandlerResult, Outcome};

/// A gesture in progress, owned by the mouse dispatcher until it completes.
///
/// Closures of the matching shape are draggers; see [`drag`].
pub trait Dragger {
    /// Observe one pointer transition.
    ///
    /// Called with `terminal == false` on every transition while the button
    /// that started the gesture is held; returning [`Outcome::Stop`] or an
    /// error ends the gesture early. Called exactly once with
    /// `terminal == true` on the transition that releases the button, after
    /// which the dragger is dropped and its result ignored.
    fn update(
        &mut self,
        graph: &mut Graph,
        event: &mut Event<MouseState>,
        terminal: bool,
    ) -> HandlerResult<Outcome>;
}

impl<F> Dragger for F
where
    F: FnMut(&mut Graph, &mut Event<MouseState>, bool) -> HandlerResult<Outcome>,
{
    fn update(
        &mut self,
        graph: &mut Graph,
        event: &mut Event<MouseState>,
        terminal: bool,
    ) -> HandlerResult<Outcome> {
        self(graph, event, terminal)
    }
}

/// Box a closure as a [`Dragger`].
pub fn drag(
    f: impl FnMut(&mut Graph, &mut Event<MouseState>, bool) -> HandlerResult<Outcome> + 'static,
) -> Box<dyn Dragger> {
    Box::new(f)
}

/// Handler for a newly pressed button; may start a drag.
pub type MouseDown =
    Rc<dyn Fn(&mut Graph, &mut Event<MouseState>, Button) -> HandlerResult<Option<Box<dyn Dragger>>>>;

/// Handler for wheel movement.
pub type MouseScroll = Rc<dyn Fn(&mut Graph, &mut Event<MouseState>) -> HandlerResult>;

/// Handler for dropped files.
///
/// The drop target and the drawing-space drop point are on the event's
/// properties under [`DROP_TARGET`] and [`DROP_POINT`].
pub type OnDrop = Rc<dyn Fn(&mut Graph, &mut Event<DropState>) -> HandlerResult>;

/// Mouse-down handlers registered on a box.
pub const ON_MOUSE_DOWN: Key<Vec<MouseDown>> =
    Key::new("onMouseDown").doc("handlers called when a button goes down");

/// Scroll handlers registered on a box.
pub const ON_MOUSE_SCROLL: Key<Vec<MouseScroll>> =
    Key::new("onMouseScroll").doc("handlers called when the wheel moves");

/// Drop handlers registered on a box, one per id.
pub const ON_DROP: Key<IdMap<OnDrop>> =
    Key::new("onDrop").doc("handlers called when files are dropped, keyed by plugin id");

/// Box a drop was routed to, on the drop event's properties.
pub const DROP_TARGET: Key<BoxId> = Key::new("dropTarget").doc("box a drop was routed to");

/// Drop position in drawing space, on the drop event's properties.
pub const DROP_POINT: Key<Point> = Key::new("dropPoint").doc("drop position in drawing space");

/// Wrap a closure as a [`MouseDown`] handler.
pub fn on_mouse_down(
    f: impl Fn(&mut Graph, &mut Event<MouseState>, Button) -> HandlerResult<Option<Box<dyn Dragger>>>
    + 'static,
) -> MouseDown {
    Rc::new(f)
}

/// Wrap a closure as a [`MouseScroll`] handler.
pub fn on_mouse_scroll(
    f: impl Fn(&mut Graph, &mut Event<MouseState>) -> HandlerResult + 'static,
) -> MouseScroll {
    Rc::new(f)
}

/// Wrap a closure as an [`OnDrop`] handler.
pub fn on_drop(f: impl Fn(&mut Graph, &mut Event<DropState>) -> HandlerResult + 'static) -> OnDrop {
    Rc::new(f)
}
