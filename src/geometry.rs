use crate::point3d::Point3D;

/// Rotation axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The two axes spanning the plane a rotation about `self` moves points in,
    /// ordered so that `rotate_in_plane` matches the model rotation formulas.
    pub fn plane(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// 2-D rotation matrix applied to `(u, v)`.
#[inline(always)]
pub fn rotate_in_plane(u: f64, v: f64, cos: f64, sin: f64) -> (f64, f64) {
    (cos * u - sin * v, sin * u + cos * v)
}

/// Axis-aligned bounding box in model space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Point3D,
    pub max: Point3D,
}

impl BoundingBox {
    pub fn new(min: Point3D, max: Point3D) -> Self {
        BoundingBox { min, max }
    }

    /// `None` for an empty point set.
    pub fn from_points<I: IntoIterator<Item = Point3D>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for p in points {
            bbox.extend(p);
        }
        Some(bbox)
    }

    pub fn extend(&mut self, p: Point3D) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point3D {
        (self.min + self.max) / 2.0
    }

    pub fn depth_range(&self) -> (f64, f64) {
        (self.min.z, self.max.z)
    }
}
