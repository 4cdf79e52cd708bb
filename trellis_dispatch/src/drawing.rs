// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing coordinate capability.

use std::rc::Rc;

use kurbo::{Affine, Point};
use trellis_props::Key;

/// Maps window coordinates into the drawing space that box frames live in.
///
/// A canvas publishes one under [`DRAWING`]; dispatchers discover it from the
/// root before hit-testing.
pub trait Drawing {
    /// Convert a window-space point into drawing space.
    fn window_system_to_drawing_system(&self, window: Point) -> Point;
}

/// The drawing capability of a canvas.
pub const DRAWING: Key<Rc<dyn Drawing>> =
    Key::new("drawing").doc("maps window coordinates into drawing space");

/// A [`Drawing`] backed by a fixed affine transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineDrawing {
    /// Window space to drawing space.
    pub window_to_drawing: Affine,
}

impl AffineDrawing {
    /// A drawing whose coordinates equal window coordinates.
    pub const IDENTITY: Self = Self::new(Affine::IDENTITY);

    /// A drawing mapping window points through `window_to_drawing`.
    pub const fn new(window_to_drawing: Affine) -> Self {
        Self { window_to_drawing }
    }

    /// A drawing scrolled by `offset` and zoomed by `scale` around the window origin.
    ///
    /// A window point `p` maps to `p / scale + offset`.
    pub fn pan_zoom(offset: kurbo::Vec2, scale: f64) -> Self {
        Self::new(Affine::translate(offset) * Affine::scale(scale.recip()))
    }

    /// This drawing as a capability value for [`DRAWING`].
    pub fn into_capability(self) -> Rc<dyn Drawing> {
        Rc::new(self)
    }
}

impl Default for AffineDrawing {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Drawing for AffineDrawing {
    fn window_system_to_drawing_system(&self, window: Point) -> Point {
        self.window_to_drawing * window
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;

    #[test]
    fn pan_zoom_maps_window_points() {
        let drawing = AffineDrawing::pan_zoom(Vec2::new(100.0, 0.0), 2.0);
        let p = drawing.window_system_to_drawing_system(Point::new(10.0, 20.0));
        assert!((p - Point::new(105.0, 10.0)).hypot() < 1e-9, "got {p:?}");
    }

    #[test]
    fn identity_is_default() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(AffineDrawing::default().window_system_to_drawing_system(p), p);
    }
}
