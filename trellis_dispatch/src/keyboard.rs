// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard dispatch: a device-local handler chain.

use core::fmt;

use trellis_box_graph::Graph;
use trellis_event_state::{Event, KeyboardState};

use crate::fault::{Faults, Site};
use crate::types::{HandlerResult, Outcome};

type KeyHandler = Box<dyn FnMut(&mut Graph, &mut Event<KeyboardState>) -> HandlerResult<Outcome>>;

/// Ordered chain of keyboard handlers.
///
/// Unlike pointer handlers, keyboard handlers are not discovered in the graph:
/// the window that owns the keyboard keeps them. Each transition visits the
/// handlers in registration order. A handler returning [`Outcome::Stop`] is
/// removed; one returning an error is kept and its error collected.
#[derive(Default)]
pub struct Keyboard {
    handlers: Vec<KeyHandler>,
}

impl fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyboard")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Keyboard {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the chain.
    pub fn add_handler(
        &mut self,
        handler: impl FnMut(&mut Graph, &mut Event<KeyboardState>) -> HandlerResult<Outcome> + 'static,
    ) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Number of installed handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is installed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the chain for one transition.
    pub fn dispatch(&mut self, graph: &mut Graph, event: &mut Event<KeyboardState>) -> Faults {
        let mut faults = Faults::new();
        self.handlers.retain_mut(|handler| match handler(graph, event) {
            Ok(Outcome::Continue) => true,
            Ok(Outcome::Stop) => false,
            Err(error) => {
                faults.record(Site::Keyboard, None, error);
                true
            }
        });
        faults.log();
        faults
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use trellis_event_state::Devices;

    use super::*;

    #[test]
    fn stop_removes_and_errors_keep() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut keyboard = Keyboard::new();
        let once = Rc::clone(&seen);
        keyboard.add_handler(move |_, _| {
            once.borrow_mut().push("once");
            Ok(Outcome::Stop)
        });
        let flaky = Rc::clone(&seen);
        keyboard.add_handler(move |_, _| {
            flaky.borrow_mut().push("flaky");
            Err("not today".into())
        });

        let mut graph = Graph::new();
        let mut devices = Devices::new();
        let faults = keyboard.dispatch(&mut graph, &mut devices.key(65, true));
        assert_eq!(faults.len(), 1);
        assert_eq!(keyboard.len(), 1, "the stopping handler is removed");

        keyboard.dispatch(&mut graph, &mut devices.key(65, false));
        assert_eq!(*seen.borrow(), ["once", "flaky", "flaky"]);
    }

    #[test]
    fn handlers_see_typed_characters() {
        let typed = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&typed);
        let mut keyboard = Keyboard::new();
        keyboard.add_handler(move |_, event| {
            sink.borrow_mut().extend(event.chars_pressed());
            Ok(Outcome::Continue)
        });

        let mut graph = Graph::new();
        let mut devices = Devices::new();
        for c in "hi".chars() {
            for mut event in devices.character(c) {
                keyboard.dispatch(&mut graph, &mut event);
            }
        }
        assert_eq!(*typed.borrow(), "hi");
    }
}
