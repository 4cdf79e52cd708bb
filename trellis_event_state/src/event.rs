// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Before/after transitions between snapshots.

use smallvec::SmallVec;
use trellis_props::{Key, Props};

use crate::keyboard::{KeyCode, KeyboardState};
use crate::mouse::{Button, MouseState};

/// Advisory flag set by a handler that has fully dealt with a transition.
///
/// Dispatchers consult it between routing phases; handlers that ignore it are
/// still called.
pub const CONSUMED: Key<bool> =
    Key::new("consumed").doc("transition has been handled; later routing phases are skipped");

/// A transition from one snapshot to the next.
///
/// `before` is `None` for instantaneous events such as drops. The `props`
/// side channel lets handlers annotate the transition for the handlers that
/// run after them; it lives exactly as long as the event.
#[derive(Debug)]
pub struct Event<T> {
    /// Snapshot before the notification, if there was one.
    pub before: Option<T>,
    /// Snapshot after the notification.
    pub after: T,
    /// Per-transition annotations.
    pub props: Props,
}

impl<T> Event<T> {
    /// A transition from `before` to `after`.
    pub fn transition(before: T, after: T) -> Self {
        Self {
            before: Some(before),
            after,
            props: Props::new(),
        }
    }

    /// An instantaneous event with no prior snapshot.
    pub fn instant(after: T) -> Self {
        Self {
            before: None,
            after,
            props: Props::new(),
        }
    }

    /// Whether a handler has marked this transition [`CONSUMED`].
    pub fn is_consumed(&self) -> bool {
        self.props.is_true(&CONSUMED, false)
    }

    /// Mark this transition [`CONSUMED`].
    pub fn consume(&mut self) {
        self.props.put(&CONSUMED, true);
    }
}

impl Event<MouseState> {
    /// Buttons that went down in this transition.
    pub fn buttons_pressed(&self) -> SmallVec<[Button; 2]> {
        match &self.before {
            Some(before) => MouseState::buttons_pressed(before, &self.after),
            None => self.after.buttons_down().collect(),
        }
    }

    /// Buttons that came up in this transition.
    pub fn buttons_released(&self) -> SmallVec<[Button; 2]> {
        match &self.before {
            Some(before) => MouseState::buttons_released(before, &self.after),
            None => SmallVec::new(),
        }
    }
}

impl Event<KeyboardState> {
    /// Keys that went down in this transition.
    pub fn keys_pressed(&self) -> SmallVec<[KeyCode; 4]> {
        match &self.before {
            Some(before) => KeyboardState::keys_pressed(before, &self.after),
            None => self.after.keys_down().collect(),
        }
    }

    /// Keys that came up in this transition.
    pub fn keys_released(&self) -> SmallVec<[KeyCode; 4]> {
        match &self.before {
            Some(before) => KeyboardState::keys_released(before, &self.after),
            None => SmallVec::new(),
        }
    }

    /// Characters that went down in this transition.
    pub fn chars_pressed(&self) -> SmallVec<[char; 4]> {
        match &self.before {
            Some(before) => KeyboardState::chars_pressed(before, &self.after),
            None => self.after.chars_down().collect(),
        }
    }

    /// Characters that came up in this transition.
    pub fn chars_released(&self) -> SmallVec<[char; 4]> {
        match &self.before {
            Some(before) => KeyboardState::chars_released(before, &self.after),
            None => SmallVec::new(),
        }
    }
}
