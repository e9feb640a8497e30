use std::ops::{Add, Sub};

/// Integer point in screen space. `y` grows downward.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    pub fn new(x: i32, y: i32) -> Self {
        Point2D { x, y }
    }

    /// Panics unless `v` holds exactly two coordinates.
    pub fn from_slice(v: &[i32]) -> Self {
        assert_eq!(v.len(), 2, "Point2D needs exactly 2 coordinates, got {}", v.len());
        Point2D { x: v[0], y: v[1] }
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, other: Point2D) -> Point2D {
        Point2D { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, other: Point2D) -> Point2D {
        Point2D { x: self.x - other.x, y: self.y - other.y }
    }
}
