// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer snapshots.

use indexmap::IndexSet;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::keyboard::{KeyboardState, Modifiers};

/// Mouse button identifier.
///
/// `0` is the primary button, `1` the secondary, `2` the middle.
pub type Button = u8;

/// Immutable pointer snapshot.
///
/// Positions are in window coordinates; dispatchers convert them into drawing
/// space through the drawing capability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseState {
    buttons_down: IndexSet<Button>,
    /// Pointer position in window coordinates.
    pub position: Point,
    /// Movement since the previous snapshot.
    pub delta: Vec2,
    /// Wheel movement carried by this snapshot; zero outside scroll transitions.
    pub wheel: Vec2,
    /// Modifier flags reported with the last button notification.
    pub mods: Modifiers,
    /// Keyboard state as seen by the pointer.
    pub keyboard: KeyboardState,
    /// Timestamp in milliseconds.
    pub time: u64,
}

impl MouseState {
    /// A snapshot at the origin with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with `button` held (`down`) or released, and `mods` as the
    /// current modifier flags. Clears the movement delta.
    #[must_use]
    pub fn with_button(&self, button: Button, down: bool, mods: Modifiers) -> Self {
        let mut next = self.clone();
        if down {
            next.buttons_down.insert(button);
        } else {
            next.buttons_down.shift_remove(&button);
        }
        next.mods = mods;
        next.delta = Vec2::ZERO;
        next
    }

    /// A snapshot moved to `position`, with the delta from this one.
    #[must_use]
    pub fn with_position(&self, position: Point) -> Self {
        Self {
            position,
            delta: position - self.position,
            ..self.clone()
        }
    }

    /// A snapshot carrying `wheel` as its scroll delta.
    #[must_use]
    pub fn with_scroll(&self, wheel: Vec2) -> Self {
        Self {
            wheel,
            ..self.clone()
        }
    }

    /// A snapshot embedding `keyboard`.
    #[must_use]
    pub fn with_keyboard(&self, keyboard: KeyboardState) -> Self {
        Self {
            keyboard,
            ..self.clone()
        }
    }

    /// Held buttons, in press order.
    pub fn buttons_down(&self) -> impl Iterator<Item = Button> + '_ {
        self.buttons_down.iter().copied()
    }

    /// Whether `button` is held.
    pub fn is_down(&self, button: Button) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether this snapshot carries wheel movement.
    pub fn has_scroll(&self) -> bool {
        self.wheel != Vec2::ZERO
    }

    /// Buttons held in `after` but not in `before`.
    pub fn buttons_pressed(before: &Self, after: &Self) -> SmallVec<[Button; 2]> {
        after.buttons_down.difference(&before.buttons_down).copied().collect()
    }

    /// Buttons held in `before` but not in `after`.
    pub fn buttons_released(before: &Self, after: &Self) -> SmallVec<[Button; 2]> {
        before.buttons_down.difference(&after.buttons_down).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_updates_delta() {
        let a = MouseState::new().with_position(Point::new(10.0, 10.0));
        let b = a.with_position(Point::new(13.0, 6.0));
        assert_eq!(b.delta, Vec2::new(3.0, -4.0));
        assert_eq!(b.with_button(0, true, Modifiers::empty()).delta, Vec2::ZERO);
    }

    #[test]
    fn button_sets_diff_in_press_order() {
        let none = MouseState::new();
        let both = none
            .with_button(1, true, Modifiers::empty())
            .with_button(0, true, Modifiers::empty());
        assert_eq!(MouseState::buttons_pressed(&none, &both).as_slice(), &[1, 0]);
        let one = both.with_button(1, false, Modifiers::empty());
        assert_eq!(MouseState::buttons_released(&both, &one).as_slice(), &[1]);
        assert!(MouseState::buttons_pressed(&both, &one).is_empty());
    }

    #[test]
    fn scroll_is_separate_from_movement() {
        let m = MouseState::new().with_scroll(Vec2::new(0.0, 1.0));
        assert!(m.has_scroll());
        assert!(!m.with_scroll(Vec2::ZERO).has_scroll());
    }
}
