use crate::point2d::Point2D;

/// Displacement between two screen points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Vector {
    pub from: Point2D,
    pub to: Point2D,
    pub dx: i64,
    pub dy: i64,
}

impl Vector {
    pub fn new(from: Point2D, to: Point2D) -> Self {
        Vector {
            from,
            to,
            dx: to.x as i64 - from.x as i64,
            dy: to.y as i64 - from.y as i64,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.dx as f64).hypot(self.dy as f64)
    }

    /// Products are taken in i128: displacements span up to 2^32, so their
    /// products do not fit in i64.
    #[inline(always)]
    pub fn dot(&self, other: &Vector) -> i128 {
        self.dx as i128 * other.dx as i128 + self.dy as i128 * other.dy as i128
    }

    /// Scalar 2-D cross product. Positive for a counter-clockwise turn from
    /// `self` to `other` with y pointing up.
    #[inline(always)]
    pub fn cross(&self, other: &Vector) -> i128 {
        self.dx as i128 * other.dy as i128 - self.dy as i128 * other.dx as i128
    }
}
