// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning native input notifications into transitions.

use std::path::PathBuf;

use kurbo::{Point, Vec2};

use crate::drop::DropState;
use crate::event::Event;
use crate::keyboard::{KeyCode, KeyboardState, Modifiers};
use crate::mouse::{Button, MouseState};

/// Current pointer and keyboard snapshots for one window.
///
/// Each notification method derives the next snapshot from the current one,
/// replaces the current one, and returns the transition between them. Nothing
/// is dispatched here; callers route the returned events.
///
/// ```rust
/// use trellis_event_state::{Devices, Modifiers};
///
/// let mut devices = Devices::new();
/// let press = devices.mouse_button(0, true, Modifiers::SHIFT);
/// assert_eq!(press.buttons_pressed().as_slice(), &[0]);
/// assert!(press.after.keyboard.is_shift_down());
///
/// let release = devices.mouse_button(0, false, Modifiers::empty());
/// assert_eq!(release.buttons_released().as_slice(), &[0]);
/// assert!(!release.after.keyboard.is_shift_down());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Devices {
    mouse: MouseState,
    keyboard: KeyboardState,
    seen_pointer: bool,
    time: u64,
}

impl Devices {
    /// Devices with nothing held and the pointer not yet seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current pointer snapshot.
    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// The current keyboard snapshot.
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Set the timestamp, in milliseconds, stamped on subsequent snapshots.
    pub fn set_time(&mut self, now: u64) {
        self.time = now;
    }

    /// A button went down or up.
    pub fn mouse_button(&mut self, button: Button, pressed: bool, mods: Modifiers) -> Event<MouseState> {
        let next = self.mouse.with_button(button, pressed, mods);
        self.pointer_transition(next)
    }

    /// The pointer moved to `(x, y)` in window coordinates.
    pub fn cursor_pos(&mut self, x: f64, y: f64) -> Event<MouseState> {
        self.seen_pointer = true;
        let next = self.mouse.with_position(Point::new(x, y));
        self.pointer_transition(next)
    }

    /// The wheel moved.
    ///
    /// The returned transition carries the wheel delta and the keyboard
    /// snapshot as is, without modifier synthesis. The stored pointer snapshot
    /// is then reset to zero wheel movement without a further transition, so
    /// the next pointer event does not repeat the scroll.
    pub fn scroll(&mut self, dx: f64, dy: f64) -> Event<MouseState> {
        let mut next = self
            .mouse
            .with_scroll(Vec2::new(dx, dy))
            .with_keyboard(self.keyboard.clone());
        next.time = self.time;
        let before = core::mem::replace(&mut self.mouse, next.with_scroll(Vec2::ZERO));
        Event::transition(before, next)
    }

    /// A key went down (or repeated) or up.
    pub fn key(&mut self, key: KeyCode, pressed: bool) -> Event<KeyboardState> {
        let next = self.keyboard.with_key(key, pressed);
        self.keyboard_transition(next)
    }

    /// A character was typed.
    ///
    /// Text input has no separate release notification, so this yields a
    /// press transition followed immediately by a release transition.
    pub fn character(&mut self, c: char) -> [Event<KeyboardState>; 2] {
        let down = self.keyboard.with_char(c, true);
        let press = self.keyboard_transition(down);
        let up = self.keyboard.with_char(c, false);
        let release = self.keyboard_transition(up);
        [press, release]
    }

    /// The window lost focus; releases never arrive for keys held now.
    pub fn focus_lost(&mut self) {
        tracing::debug!("focus lost, clearing held keys");
        self.keyboard = self.keyboard.cleared();
    }

    /// Files were dropped onto the window.
    pub fn drop_files(&mut self, files: Vec<PathBuf>) -> Event<DropState> {
        let mouse = self.seen_pointer.then(|| self.mouse.clone());
        Event::instant(DropState::new(files, mouse, self.keyboard.clone()))
    }

    fn pointer_transition(&mut self, mut next: MouseState) -> Event<MouseState> {
        next.keyboard = self.keyboard.with_modifiers(next.mods);
        next.time = self.time;
        let before = core::mem::replace(&mut self.mouse, next.clone());
        Event::transition(before, next)
    }

    fn keyboard_transition(&mut self, mut next: KeyboardState) -> Event<KeyboardState> {
        next.pointer = self.seen_pointer.then_some(self.mouse.position);
        next.time = self.time;
        let before = core::mem::replace(&mut self.keyboard, next.clone());
        Event::transition(before, next)
    }
}

#[cfg(test)]
mod tests {
    use crate::keyboard::keys;

    use super::*;

    #[test]
    fn scroll_resets_wheel_without_transition() {
        let mut devices = Devices::new();
        let event = devices.scroll(0.0, 2.0);
        assert!(event.after.has_scroll());
        assert!(!devices.mouse().has_scroll(), "stored snapshot is reset to zero wheel");

        let moved = devices.cursor_pos(1.0, 1.0);
        assert!(!moved.after.has_scroll());
        assert!(!moved.before.as_ref().is_some_and(MouseState::has_scroll));
    }

    #[test]
    fn scroll_keeps_keyboard_unmodified() {
        let mut devices = Devices::new();
        devices.key(keys::RIGHT_CONTROL, true);
        let event = devices.scroll(1.0, 0.0);
        assert!(event.after.keyboard.is_key_down(keys::RIGHT_CONTROL));
    }

    #[test]
    fn pointer_events_synthesize_modifiers() {
        let mut devices = Devices::new();
        devices.key(keys::RIGHT_ALT, true);
        let event = devices.mouse_button(0, true, Modifiers::empty());
        assert!(!event.after.keyboard.is_alt_down(), "clear flag releases held alt");
        let event = devices.mouse_button(1, true, Modifiers::ALT);
        assert!(event.after.keyboard.is_key_down(keys::LEFT_ALT));
    }

    #[test]
    fn character_yields_press_then_release() {
        let mut devices = Devices::new();
        let [press, release] = devices.character('z');
        assert_eq!(press.chars_pressed().as_slice(), &['z']);
        assert_eq!(release.chars_released().as_slice(), &['z']);
        assert!(!devices.keyboard().is_char_down('z'));
    }

    #[test]
    fn focus_loss_clears_keys() {
        let mut devices = Devices::new();
        devices.key(65, true);
        devices.focus_lost();
        assert_eq!(devices.keyboard().keys_down().count(), 0);
    }

    #[test]
    fn drops_are_instant_and_carry_position_once_seen() {
        let mut devices = Devices::new();
        let blind = devices.drop_files(vec![PathBuf::from("a.txt")]);
        assert!(blind.before.is_none());
        assert_eq!(blind.after.position(), None);

        devices.cursor_pos(5.0, 6.0);
        let seen = devices.drop_files(vec![PathBuf::from("a.txt")]);
        assert_eq!(seen.after.position(), Some(Point::new(5.0, 6.0)));
    }
}
