// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer dispatch and the per-button drag sets.

use core::fmt;
use std::collections::BTreeMap;

use trellis_box_graph::{BoxId, Direction, Graph};
use trellis_event_state::{Button, Event, MouseState};

use crate::fault::{Faults, Site};
use crate::handlers::{Dragger, MouseDown, MouseScroll, ON_MOUSE_DOWN, ON_MOUSE_SCROLL};
use crate::types::Outcome;

/// Policy for the mouse dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MouseConfig {
    /// Direction in which handlers are discovered from the root.
    pub discovery: Direction,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            discovery: Direction::Both,
        }
    }
}

impl MouseConfig {
    /// Set the handler discovery direction.
    pub fn with_discovery(mut self, discovery: Direction) -> Self {
        self.discovery = discovery;
        self
    }
}

/// Routes pointer transitions to handlers found in the graph and drives the
/// drags they start.
///
/// ## Semantics
///
/// For each transition, [`Mouse::dispatch`]:
///
/// 1. Finishes the drags of every released button: each dragger gets exactly
///    one terminal update and is dropped.
/// 2. Updates every remaining dragger; [`Outcome::Stop`] or an error removes it.
/// 3. If the transition carries wheel movement, calls every
///    [`ON_MOUSE_SCROLL`] handler.
/// 4. For each newly pressed button, calls every [`ON_MOUSE_DOWN`] handler and
///    keeps the draggers they return under that button.
///
/// Drags under different buttons are independent. Handler failures are
/// collected and returned; they never stop the other handlers.
#[derive(Default)]
pub struct Mouse {
    drags: BTreeMap<Button, Vec<Box<dyn Dragger>>>,
    config: MouseConfig,
}

impl fmt::Debug for Mouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<(Button, usize)> = self.drags.iter().map(|(b, d)| (*b, d.len())).collect();
        f.debug_struct("Mouse")
            .field("drags", &active)
            .field("config", &self.config)
            .finish()
    }
}

impl Mouse {
    /// A dispatcher with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with the given policy.
    pub fn with_config(config: MouseConfig) -> Self {
        Self {
            drags: BTreeMap::new(),
            config,
        }
    }

    /// The dispatcher's policy.
    pub fn config(&self) -> MouseConfig {
        self.config
    }

    /// Number of live draggers under `button`.
    pub fn active_drags(&self, button: Button) -> usize {
        self.drags.get(&button).map_or(0, Vec::len)
    }

    /// Whether any drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drags.values().any(|d| !d.is_empty())
    }

    /// Route one pointer transition.
    pub fn dispatch(&mut self, graph: &mut Graph, root: BoxId, event: &mut Event<MouseState>) -> Faults {
        let pressed = event.buttons_pressed();
        let released = event.buttons_released();

        for button in released {
            let Some(drags) = self.drags.remove(&button) else {
                continue;
            };
            tracing::debug!(button, count = drags.len(), "finishing drags");
            for mut dragger in drags {
                if let Err(error) = dragger.update(graph, event, true) {
                    tracing::warn!(button, %error, "dragger failed on release");
                }
            }
        }

        for (&button, drags) in &mut self.drags {
            drags.retain_mut(|dragger| match dragger.update(graph, event, false) {
                Ok(Outcome::Continue) => true,
                Ok(Outcome::Stop) => {
                    tracing::debug!(button, "drag stopped");
                    false
                }
                Err(error) => {
                    tracing::warn!(button, %error, "dragger failed and will not be called again");
                    false
                }
            });
        }
        self.drags.retain(|_, drags| !drags.is_empty());

        let mut faults = Faults::new();

        if event.after.has_scroll() {
            let handlers: Vec<MouseScroll> = graph
                .find(root, &ON_MOUSE_SCROLL, self.config.discovery)
                .flatten()
                .cloned()
                .collect();
            for handler in handlers {
                if let Err(error) = handler(graph, event) {
                    faults.record(Site::MouseScroll, None, error);
                }
            }
        }

        for button in pressed {
            let handlers: Vec<MouseDown> = graph
                .find(root, &ON_MOUSE_DOWN, self.config.discovery)
                .flatten()
                .cloned()
                .collect();
            for handler in handlers {
                match handler(graph, event, button) {
                    Ok(Some(dragger)) => {
                        tracing::debug!(button, "drag started");
                        self.drags.entry(button).or_default().push(dragger);
                    }
                    Ok(None) => {}
                    Err(error) => faults.record(Site::MouseDown, Some(button), error),
                }
            }
        }

        faults.log();
        faults
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use trellis_event_state::{Devices, Modifiers};
    use trellis_props::Props;

    use super::*;
    use crate::handlers::{drag, on_mouse_down, on_mouse_scroll};

    type Log = Rc<RefCell<Vec<(Button, bool)>>>;

    /// A mouse-down handler starting a drag that records each update.
    fn recording_handler(log: &Log) -> MouseDown {
        let log = Rc::clone(log);
        on_mouse_down(move |_, _, button| {
            let log = Rc::clone(&log);
            Ok(Some(drag(move |_, _, terminal| {
                log.borrow_mut().push((button, terminal));
                Ok(Outcome::Continue)
            })))
        })
    }

    fn graph_with(handlers: Vec<MouseDown>) -> Graph {
        let mut props = Props::new();
        for handler in handlers {
            props.put_to_list(&ON_MOUSE_DOWN, handler);
        }
        Graph::with_root(props)
    }

    #[test]
    fn release_sends_exactly_one_terminal_update() {
        let log = Log::default();
        let mut graph = graph_with(vec![recording_handler(&log)]);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        assert_eq!(mouse.active_drags(0), 1);
        mouse.dispatch(&mut graph, root, &mut devices.cursor_pos(4.0, 4.0));
        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, false, Modifiers::empty()));
        mouse.dispatch(&mut graph, root, &mut devices.cursor_pos(8.0, 8.0));

        assert_eq!(*log.borrow(), [(0, false), (0, true)]);
        assert!(!mouse.is_dragging());
    }

    #[test]
    fn failing_handler_does_not_block_siblings() {
        let log = Log::default();
        let failing = on_mouse_down(|_, _, _| Err("handler exploded".into()));
        let mut graph = graph_with(vec![failing, recording_handler(&log)]);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        let faults = mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));

        assert_eq!(faults.len(), 1);
        let fault = faults.iter().next().unwrap();
        assert_eq!(fault.site, Site::MouseDown);
        assert_eq!(fault.button, Some(0));
        assert_eq!(fault.error.to_string(), "handler exploded");
        assert_eq!(mouse.active_drags(0), 1, "second handler still started its drag");
    }

    #[test]
    fn buttons_drag_independently() {
        let log = Log::default();
        let mut graph = graph_with(vec![recording_handler(&log)]);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(1, true, Modifiers::empty()));
        assert_eq!(mouse.active_drags(0), 1);
        assert_eq!(mouse.active_drags(1), 1);
        log.borrow_mut().clear();

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, false, Modifiers::empty()));
        assert_eq!(*log.borrow(), [(0, true), (1, false)]);
        assert_eq!(mouse.active_drags(0), 0);
        assert_eq!(mouse.active_drags(1), 1, "button 1 is still dragging");
    }

    #[test]
    fn stop_and_errors_end_drags_early() {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let stopping = on_mouse_down(move |_, _, _| {
            let counted = Rc::clone(&counted);
            Ok(Some(drag(move |_, _, _| {
                counted.set(counted.get() + 1);
                Ok(Outcome::Stop)
            })))
        });
        let failing = on_mouse_down(|_, _, _| Ok(Some(drag(|_, _, _| Err("drag broke".into())))));
        let mut graph = graph_with(vec![stopping, failing]);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        assert_eq!(mouse.active_drags(0), 2);
        let faults = mouse.dispatch(&mut graph, root, &mut devices.cursor_pos(1.0, 1.0));
        assert!(faults.is_empty(), "drag failures are not handler faults");
        assert_eq!(mouse.active_drags(0), 0);

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, false, Modifiers::empty()));
        assert_eq!(calls.get(), 1, "stopped draggers get no terminal update");
    }

    #[test]
    fn scroll_handlers_run_only_with_wheel_movement() {
        let scrolls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&scrolls);
        let mut graph = Graph::new();
        let root = graph.root();
        let service = graph.insert(Props::new());
        graph.connect(service, root);
        graph.props_mut(service).unwrap().put_to_list(
            &ON_MOUSE_SCROLL,
            on_mouse_scroll(move |_, _| {
                counted.set(counted.get() + 1);
                Ok(())
            }),
        );
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        mouse.dispatch(&mut graph, root, &mut devices.cursor_pos(1.0, 1.0));
        mouse.dispatch(&mut graph, root, &mut devices.scroll(0.0, -1.0));
        mouse.dispatch(&mut graph, root, &mut devices.cursor_pos(2.0, 2.0));
        assert_eq!(scrolls.get(), 1);
    }

    #[test]
    fn failing_scroll_handler_does_not_block_siblings() {
        let scrolls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&scrolls);
        let mut props = Props::new();
        props.put_to_list(&ON_MOUSE_SCROLL, on_mouse_scroll(|_, _| Err("wheel jammed".into())));
        props.put_to_list(
            &ON_MOUSE_SCROLL,
            on_mouse_scroll(move |_, _| {
                counted.set(counted.get() + 1);
                Ok(())
            }),
        );
        let mut graph = Graph::with_root(props);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        let faults = mouse.dispatch(&mut graph, root, &mut devices.scroll(0.0, 1.0));

        assert_eq!(scrolls.get(), 1, "second scroll handler still ran");
        assert_eq!(faults.len(), 1);
        let fault = faults.iter().next().unwrap();
        assert_eq!(fault.site, Site::MouseScroll);
        assert_eq!(fault.button, None);
        assert_eq!(fault.error.to_string(), "wheel jammed");
    }

    #[test]
    fn failing_terminal_update_still_finishes_the_button() {
        let log = Log::default();
        let failing_on_release = on_mouse_down(|_, _, _| {
            Ok(Some(drag(|_, _, terminal| {
                if terminal {
                    Err("cannot finish".into())
                } else {
                    Ok(Outcome::Continue)
                }
            })))
        });
        let mut graph = graph_with(vec![failing_on_release, recording_handler(&log)]);
        let root = graph.root();
        let mut devices = Devices::new();
        let mut mouse = Mouse::new();

        mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        assert_eq!(mouse.active_drags(0), 2);

        let faults = mouse.dispatch(&mut graph, root, &mut devices.mouse_button(0, false, Modifiers::empty()));

        assert!(faults.is_empty(), "terminal results are ignored");
        assert_eq!(*log.borrow(), [(0, true)], "sibling dragger got its terminal update");
        assert_eq!(mouse.active_drags(0), 0);
        assert!(!mouse.is_dragging());
    }

    #[test]
    fn discovery_direction_is_configurable() {
        let log = Log::default();
        let mut graph = Graph::new();
        let root = graph.root();
        let above = graph.insert(Props::new());
        graph.connect(above, root);
        graph
            .props_mut(above)
            .unwrap()
            .put_to_list(&ON_MOUSE_DOWN, recording_handler(&log));
        let mut devices = Devices::new();

        let mut downwards = Mouse::with_config(MouseConfig::default().with_discovery(Direction::Downwards));
        downwards.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        assert_eq!(downwards.active_drags(0), 0, "handler above the root is not found");

        let mut both = Mouse::new();
        devices.mouse_button(0, false, Modifiers::empty());
        both.dispatch(&mut graph, root, &mut devices.mouse_button(0, true, Modifiers::empty()));
        assert_eq!(both.active_drags(0), 1);
    }
}
