// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-drop snapshots.

use std::path::PathBuf;

use kurbo::Point;

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Files dropped onto the window, with the input state at the moment of the drop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropState {
    /// Dropped paths, in the order the platform reported them.
    pub files: Vec<PathBuf>,
    /// Pointer state at the drop, if the window had seen the pointer.
    pub mouse: Option<MouseState>,
    /// Keyboard state at the drop.
    pub keyboard: KeyboardState,
}

impl DropState {
    /// A drop of `files` with the given input state.
    pub fn new(files: Vec<PathBuf>, mouse: Option<MouseState>, keyboard: KeyboardState) -> Self {
        Self {
            files,
            mouse,
            keyboard,
        }
    }

    /// Where the files were dropped, in window coordinates.
    pub fn position(&self) -> Option<Point> {
        self.mouse.as_ref().map(|m| m.position)
    }
}
