// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Dispatch: routes pointer, keyboard, and file-drop transitions
//! through a box graph.
//!
//! Handlers live on boxes. A plugin adds a closure to a box's properties under
//! one of the registration keys ([`ON_MOUSE_DOWN`], [`ON_MOUSE_SCROLL`],
//! [`ON_DROP`]); the dispatchers find every such closure by walking the graph
//! and call them in discovery order. Nothing is registered with the
//! dispatchers directly, except keyboard handlers, which belong to the window.
//!
//! - [`Mouse`]: presses, motion, and wheel. A mouse-down handler may return a
//!   [`Dragger`] that then receives every transition until its button is
//!   released or it returns [`Outcome::Stop`].
//! - [`Keyboard`]: an ordered handler chain.
//! - [`Drops`]: hit-tests the drop point against box frames (through the
//!   [`Drawing`] capability) and routes upwards, then downwards, from the box
//!   that was hit.
//! - [`InputRouter`]: one window's devices and dispatchers behind one method
//!   per native notification.
//!
//! Handler failures are values, not panics: each dispatch returns the
//! [`Faults`] it collected after logging them, and one failing handler never
//! prevents the others from running.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use trellis_box_graph::Graph;
//! use trellis_dispatch::{InputRouter, ON_MOUSE_DOWN, Outcome, drag, on_mouse_down};
//! use trellis_event_state::Modifiers;
//!
//! let travelled = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&travelled);
//!
//! let mut graph = Graph::new();
//! let root = graph.root();
//! graph.props_mut(root).unwrap().put_to_list(
//!     &ON_MOUSE_DOWN,
//!     on_mouse_down(move |_, _, _| {
//!         let sink = Rc::clone(&sink);
//!         Ok(Some(drag(move |_, event, terminal| {
//!             if !terminal {
//!                 sink.set(sink.get() + event.after.delta.x);
//!             }
//!             Ok(Outcome::Continue)
//!         })))
//!     }),
//! );
//!
//! let mut router = InputRouter::new(root);
//! router.mouse_button(&mut graph, 0, true, Modifiers::empty());
//! router.cursor_pos(&mut graph, 5.0, 0.0);
//! router.cursor_pos(&mut graph, 8.0, 0.0);
//! router.mouse_button(&mut graph, 0, false, Modifiers::empty());
//!
//! assert_eq!(travelled.get(), 8.0);
//! assert!(!router.mouse().is_dragging());
//! ```

mod drawing;
mod drops;
mod fault;
mod handlers;
mod keyboard;
mod mouse;
mod router;
mod types;

pub use drawing::{AffineDrawing, DRAWING, Drawing};
pub use drops::{DropConfig, Drops};
pub use fault::{Fault, Faults, Site};
pub use handlers::{
    DROP_POINT, DROP_TARGET, Dragger, MouseDown, MouseScroll, ON_DROP, ON_MOUSE_DOWN,
    ON_MOUSE_SCROLL, OnDrop, drag, on_drop, on_mouse_down, on_mouse_scroll,
};
pub use keyboard::Keyboard;
pub use mouse::{Mouse, MouseConfig};
pub use router::InputRouter;
pub use types::{DispatchError, HandlerError, HandlerResult, Outcome};
