// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event State: immutable input snapshots and the transitions between them.
//!
//! Every input device is modelled as a sequence of immutable snapshots. A
//! native notification (button, motion, wheel, key, character, file drop)
//! derives the next snapshot from the current one, and the pair becomes an
//! [`Event`] that handlers inspect. Handlers never see device callbacks
//! directly; they see "what changed".
//!
//! - [`MouseState`]: held buttons, position, movement and wheel deltas,
//!   modifier flags, and the keyboard state as seen by the pointer.
//! - [`KeyboardState`]: held key codes and held characters.
//! - [`DropState`]: dropped files with the pointer and keyboard at the drop.
//! - [`Event`]: `before`/`after` plus a [`Props`](trellis_props::Props) side
//!   channel carrying the advisory [`CONSUMED`] flag.
//! - [`Devices`]: applies native notifications and produces events.
//!
//! Pressed and released sets are set differences between the two snapshots,
//! reported in press order.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_event_state::{Devices, Event, MouseState};
//!
//! let mut devices = Devices::new();
//! devices.cursor_pos(10.0, 20.0);
//! let moved: Event<MouseState> = devices.cursor_pos(12.0, 20.0);
//!
//! assert_eq!(moved.after.delta.x, 2.0);
//! assert!(moved.buttons_pressed().is_empty());
//! ```
//!
//! This crate does not dispatch anything; see `trellis_dispatch`.

mod devices;
mod drop;
mod event;
mod keyboard;
mod mouse;

pub use devices::Devices;
pub use drop::DropState;
pub use event::{CONSUMED, Event};
pub use keyboard::{KeyCode, KeyboardState, Modifiers, keys};
pub use mouse::{Button, MouseState};
