use crate::geometry::Axis;
use crate::point2d::Point2D;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

use std::ops::{Add, Sub, Mul, Div};

impl Add for Point3D {
    type Output = Point3D;
    fn add(self, other: Point3D) -> Point3D {
        Point3D { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

impl Sub for Point3D {
    type Output = Point3D;
    fn sub(self, other: Point3D) -> Point3D {
        Point3D { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;
    fn mul(self, scalar: f64) -> Point3D {
        Point3D { x: self.x * scalar, y: self.y * scalar, z: self.z * scalar }
    }
}

impl Div<f64> for Point3D {
    type Output = Point3D;
    fn div(self, scalar: f64) -> Point3D {
        Point3D { x: self.x / scalar, y: self.y / scalar, z: self.z / scalar }
    }
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    /// Panics unless `v` holds exactly three coordinates.
    pub fn from_slice(v: &[f64]) -> Self {
        assert_eq!(v.len(), 3, "Point3D needs exactly 3 coordinates, got {}", v.len());
        Point3D { x: v[0], y: v[1], z: v[2] }
    }

    #[inline(always)]
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline(always)]
    pub fn axis_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    pub fn min(self, other: Point3D) -> Point3D {
        Point3D { x: self.x.min(other.x), y: self.y.min(other.y), z: self.z.min(other.z) }
    }

    pub fn max(self, other: Point3D) -> Point3D {
        Point3D { x: self.x.max(other.x), y: self.y.max(other.y), z: self.z.max(other.z) }
    }

    /// Orthographic projection: drop z and truncate toward zero.
    #[inline(always)]
    pub fn to_screen(self) -> Point2D {
        Point2D { x: self.x as i32, y: self.y as i32 }
    }
}
