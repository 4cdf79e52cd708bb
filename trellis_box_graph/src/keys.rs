// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Well-known property keys shared by the graph and the input dispatchers.

use kurbo::Rect;
use trellis_props::Key;

/// Drawing-space rectangle of a hit-testable box.
pub const FRAME: Key<Rect> = Key::new("frame").doc("drawing-space rectangle of a hit-testable box");

/// Human-readable name of a box.
pub const NAME: Key<String> = Key::new("name").doc("human-readable name of a box");

/// Whether a box is part of the current selection.
pub const IS_SELECTED: Key<bool> =
    Key::new("isSelected").doc("box is part of the current selection");

/// Whether a box stays put and is excluded from selection-based routing.
pub const IS_STICKY: Key<bool> =
    Key::new("isSticky").doc("box is pinned and ignored by selection-based routing");
