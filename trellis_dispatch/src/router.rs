// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiring native window notifications to the dispatchers.

use std::path::PathBuf;

use trellis_box_graph::{BoxId, Graph};
use trellis_event_state::{Button, Devices, KeyCode, Modifiers};

use crate::drops::{DropConfig, Drops};
use crate::fault::Faults;
use crate::keyboard::Keyboard;
use crate::mouse::{Mouse, MouseConfig};
use crate::types::DispatchError;

/// One window's input pipeline.
///
/// Owns the device snapshots and the three dispatchers, and routes every
/// native notification against the graph `root` given at construction. The
/// window layer calls one method per notification it receives.
///
/// ```rust
/// use trellis_box_graph::Graph;
/// use trellis_dispatch::{InputRouter, ON_MOUSE_DOWN, on_mouse_down};
/// use trellis_event_state::Modifiers;
///
/// let mut graph = Graph::new();
/// let root = graph.root();
/// graph.props_mut(root).unwrap().put_to_list(
///     &ON_MOUSE_DOWN,
///     on_mouse_down(|_, event, button| {
///         assert_eq!(button, 0);
///         assert!(event.after.keyboard.is_shift_down());
///         Ok(None)
///     }),
/// );
///
/// let mut router = InputRouter::new(root);
/// router.cursor_pos(&mut graph, 10.0, 10.0);
/// let faults = router.mouse_button(&mut graph, 0, true, Modifiers::SHIFT);
/// assert!(faults.is_empty());
/// ```
#[derive(Debug)]
pub struct InputRouter {
    root: BoxId,
    devices: Devices,
    mouse: Mouse,
    keyboard: Keyboard,
    drops: Drops,
}

impl InputRouter {
    /// A pipeline with default policies routing against `root`.
    pub fn new(root: BoxId) -> Self {
        Self::with_config(root, MouseConfig::default(), DropConfig::default())
    }

    /// A pipeline with the given policies.
    pub fn with_config(root: BoxId, mouse: MouseConfig, drops: DropConfig) -> Self {
        Self {
            root,
            devices: Devices::new(),
            mouse: Mouse::with_config(mouse),
            keyboard: Keyboard::new(),
            drops: Drops::with_config(drops),
        }
    }

    /// The box every dispatch starts from.
    pub fn root(&self) -> BoxId {
        self.root
    }

    /// Current device snapshots.
    pub fn devices(&self) -> &Devices {
        &self.devices
    }

    /// The mouse dispatcher, for inspecting drags in progress.
    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    /// The keyboard handler chain.
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    /// Set the timestamp, in milliseconds, stamped on subsequent snapshots.
    pub fn set_time(&mut self, now: u64) {
        self.devices.set_time(now);
    }

    /// A button went down or up.
    pub fn mouse_button(&mut self, graph: &mut Graph, button: Button, pressed: bool, mods: Modifiers) -> Faults {
        let mut event = self.devices.mouse_button(button, pressed, mods);
        self.mouse.dispatch(graph, self.root, &mut event)
    }

    /// The pointer moved.
    pub fn cursor_pos(&mut self, graph: &mut Graph, x: f64, y: f64) -> Faults {
        let mut event = self.devices.cursor_pos(x, y);
        self.mouse.dispatch(graph, self.root, &mut event)
    }

    /// The wheel moved.
    pub fn scroll(&mut self, graph: &mut Graph, dx: f64, dy: f64) -> Faults {
        let mut event = self.devices.scroll(dx, dy);
        self.mouse.dispatch(graph, self.root, &mut event)
    }

    /// A key went down or up.
    pub fn key(&mut self, graph: &mut Graph, key: KeyCode, pressed: bool) -> Faults {
        let mut event = self.devices.key(key, pressed);
        self.keyboard.dispatch(graph, &mut event)
    }

    /// A character was typed; handlers see a press and then a release.
    pub fn character(&mut self, graph: &mut Graph, c: char) -> Faults {
        let mut faults = Faults::new();
        for mut event in self.devices.character(c) {
            faults.extend(self.keyboard.dispatch(graph, &mut event));
        }
        faults
    }

    /// The window lost focus.
    pub fn focus_lost(&mut self) {
        self.devices.focus_lost();
    }

    /// Files were dropped onto the window.
    pub fn drop_files(&mut self, graph: &mut Graph, files: Vec<PathBuf>) -> Result<Faults, DispatchError> {
        let mut event = self.devices.drop_files(files);
        self.drops.dispatch(graph, self.root, &mut event)
    }
}
