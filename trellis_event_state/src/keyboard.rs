// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard snapshots and modifier state.

use indexmap::IndexSet;
use kurbo::Point;
use smallvec::SmallVec;

/// Platform key code.
///
/// Codes follow the GLFW numbering, which is also what the window layer
/// reports; the modifier keys are listed in [`keys`].
pub type KeyCode = u32;

/// Key codes for the modifier keys.
pub mod keys {
    use super::KeyCode;

    /// Left shift.
    pub const LEFT_SHIFT: KeyCode = 340;
    /// Left control.
    pub const LEFT_CONTROL: KeyCode = 341;
    /// Left alt / option.
    pub const LEFT_ALT: KeyCode = 342;
    /// Left super / command.
    pub const LEFT_SUPER: KeyCode = 343;
    /// Right shift.
    pub const RIGHT_SHIFT: KeyCode = 344;
    /// Right control.
    pub const RIGHT_CONTROL: KeyCode = 345;
    /// Right alt / option.
    pub const RIGHT_ALT: KeyCode = 346;
    /// Right super / command.
    pub const RIGHT_SUPER: KeyCode = 347;
}

bitflags::bitflags! {
    /// Modifier flags reported alongside pointer notifications.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT   = 0b0000_0001;
        /// Either control key.
        const CONTROL = 0b0000_0010;
        /// Either alt / option key.
        const ALT     = 0b0000_0100;
        /// Either super / command key.
        const SUPER   = 0b0000_1000;
    }
}

impl Modifiers {
    /// Each flag with the left and right key codes it stands for.
    pub const KEYS: [(Self, KeyCode, KeyCode); 4] = [
        (Self::SHIFT, keys::LEFT_SHIFT, keys::RIGHT_SHIFT),
        (Self::CONTROL, keys::LEFT_CONTROL, keys::RIGHT_CONTROL),
        (Self::ALT, keys::LEFT_ALT, keys::RIGHT_ALT),
        (Self::SUPER, keys::LEFT_SUPER, keys::RIGHT_SUPER),
    ];
}

/// Immutable keyboard snapshot.
///
/// Held keys and held characters are tracked separately: key codes come from
/// physical key notifications, characters from text input. Both sets keep
/// insertion order, so pressed/released sets are reported in the order the
/// user pressed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyboardState {
    keys_down: IndexSet<KeyCode>,
    chars_down: IndexSet<char>,
    /// Pointer position when the snapshot was taken, in window coordinates.
    pub pointer: Option<Point>,
    /// Timestamp in milliseconds.
    pub time: u64,
}

impl KeyboardState {
    /// An empty snapshot with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with `key` held (`down`) or released.
    #[must_use]
    pub fn with_key(&self, key: KeyCode, down: bool) -> Self {
        let mut next = self.clone();
        if down {
            next.keys_down.insert(key);
        } else {
            next.keys_down.shift_remove(&key);
        }
        next
    }

    /// A snapshot with `c` held (`down`) or released.
    #[must_use]
    pub fn with_char(&self, c: char, down: bool) -> Self {
        let mut next = self.clone();
        if down {
            next.chars_down.insert(c);
        } else {
            next.chars_down.shift_remove(&c);
        }
        next
    }

    /// A snapshot whose modifier keys agree with `mods`.
    ///
    /// A set flag marks the left-hand key as held. A clear flag releases both
    /// the left-hand and right-hand keys.
    #[must_use]
    pub fn with_modifiers(&self, mods: Modifiers) -> Self {
        let mut next = self.clone();
        for (flag, left, right) in Modifiers::KEYS {
            if mods.contains(flag) {
                next.keys_down.insert(left);
            } else {
                next.keys_down.shift_remove(&left);
                next.keys_down.shift_remove(&right);
            }
        }
        next
    }

    /// A snapshot with nothing held, keeping pointer and time.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            keys_down: IndexSet::new(),
            chars_down: IndexSet::new(),
            ..self.clone()
        }
    }

    /// Held key codes, in press order.
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }

    /// Held characters, in press order.
    pub fn chars_down(&self) -> impl Iterator<Item = char> + '_ {
        self.chars_down.iter().copied()
    }

    /// Whether `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether `c` is held.
    pub fn is_char_down(&self, c: char) -> bool {
        self.chars_down.contains(&c)
    }

    /// Keys held in `after` but not in `before`.
    pub fn keys_pressed(before: &Self, after: &Self) -> SmallVec<[KeyCode; 4]> {
        after.keys_down.difference(&before.keys_down).copied().collect()
    }

    /// Keys held in `before` but not in `after`.
    pub fn keys_released(before: &Self, after: &Self) -> SmallVec<[KeyCode; 4]> {
        before.keys_down.difference(&after.keys_down).copied().collect()
    }

    /// Characters held in `after` but not in `before`.
    pub fn chars_pressed(before: &Self, after: &Self) -> SmallVec<[char; 4]> {
        after.chars_down.difference(&before.chars_down).copied().collect()
    }

    /// Characters held in `before` but not in `after`.
    pub fn chars_released(before: &Self, after: &Self) -> SmallVec<[char; 4]> {
        before.chars_down.difference(&after.chars_down).copied().collect()
    }

    /// Whether either shift key is held.
    pub fn is_shift_down(&self) -> bool {
        self.either(keys::LEFT_SHIFT, keys::RIGHT_SHIFT)
    }

    /// Whether either control key is held.
    pub fn is_control_down(&self) -> bool {
        self.either(keys::LEFT_CONTROL, keys::RIGHT_CONTROL)
    }

    /// Whether either alt key is held.
    pub fn is_alt_down(&self) -> bool {
        self.either(keys::LEFT_ALT, keys::RIGHT_ALT)
    }

    /// Whether either super key is held.
    pub fn is_super_down(&self) -> bool {
        self.either(keys::LEFT_SUPER, keys::RIGHT_SUPER)
    }

    /// The held modifiers as flags.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::KEYS
            .into_iter()
            .filter(|(_, left, right)| self.either(*left, *right))
            .fold(Modifiers::empty(), |mods, (flag, ..)| mods | flag)
    }

    fn either(&self, left: KeyCode, right: KeyCode) -> bool {
        self.keys_down.contains(&left) || self.keys_down.contains(&right)
    }
}
