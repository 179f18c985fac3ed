//! Window geometry types.

use serde::Serialize;

/// Window bounding rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: (self.left + self.right) / 2,
            y: (self.top + self.bottom) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_height_from_edges() {
        let r = Rect::new(100, 50, 740, 530);
        assert_eq!(r.width(), 640);
        assert_eq!(r.height(), 480);
    }

    #[test]
    fn test_center_is_midpoint() {
        let r = Rect::new(0, 0, 640, 480);
        assert_eq!(r.center(), Point { x: 320, y: 240 });
    }

    #[test]
    fn test_center_with_negative_origin() {
        // A window partially off-screen to the left still has a sane center.
        let r = Rect::new(-100, -50, 100, 50);
        assert_eq!(r.center(), Point { x: 0, y: 0 });
    }

    #[test]
    fn test_rect_serializes_edges() {
        let r = Rect::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"left\":1"));
        assert!(json.contains("\"bottom\":4"));
    }
}
