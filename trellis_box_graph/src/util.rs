// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Whether `point` lies within `frame`, edges included.
///
/// Frames with negative width or height are normalized first, so a frame drawn
/// "backwards" still hit-tests like its positive counterpart.
pub fn frame_contains(frame: Rect, point: Point) -> bool {
    let frame = frame.abs();
    point.x >= frame.x0 && point.x <= frame.x1 && point.y >= frame.y0 && point.y <= frame.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inside() {
        let frame = Rect::from_origin_size((0.0, 0.0), (10.0, 10.0));
        assert!(frame_contains(frame, Point::new(0.0, 0.0)));
        assert!(frame_contains(frame, Point::new(10.0, 10.0)));
        assert!(frame_contains(frame, Point::new(5.0, 5.0)));
        assert!(!frame_contains(frame, Point::new(10.5, 5.0)));
    }

    #[test]
    fn negative_frames_are_normalized() {
        let frame = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(frame_contains(frame, Point::new(5.0, 5.0)));
    }
}
