use crate::geometry::rotate_in_plane;
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::vector::Vector;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Triangle2D {
    pub a: Point2D,
    pub b: Point2D,
    pub c: Point2D,
}

impl Triangle2D {
    pub fn new(a: Point2D, b: Point2D, c: Point2D) -> Self {
        Triangle2D { a, b, c }
    }

    /// Twice the signed area: cross of `a->b` and `a->c`.
    /// Negative for clockwise winding on a y-down screen.
    pub fn signed_area(&self) -> i128 {
        Vector::new(self.a, self.b).cross(&Vector::new(self.a, self.c))
    }

    /// Edge-function test. Only valid for clockwise (screen space) winding,
    /// see `projection::correct_winding`. Points on an edge count as inside.
    #[inline(always)]
    pub fn is_point_inside(&self, p: Point2D) -> bool {
        // Fail fast on any edge
        let ab = Vector::new(self.a, self.b);
        if ab.cross(&Vector::new(self.a, p)) > 0 {
            return false;
        }
        let bc = Vector::new(self.b, self.c);
        if bc.cross(&Vector::new(self.b, p)) > 0 {
            return false;
        }
        let ca = Vector::new(self.c, self.a);
        ca.cross(&Vector::new(self.c, p)) <= 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle3D {
    pub a: Point3D,
    pub b: Point3D,
    pub c: Point3D,
}

impl Triangle3D {
    pub fn new(a: Point3D, b: Point3D, c: Point3D) -> Self {
        Triangle3D { a, b, c }
    }

    pub fn points(&self) -> [Point3D; 3] {
        [self.a, self.b, self.c]
    }

    pub fn points_mut(&mut self) -> [&mut Point3D; 3] {
        [&mut self.a, &mut self.b, &mut self.c]
    }

    pub fn to_screen(&self) -> Triangle2D {
        Triangle2D::new(self.a.to_screen(), self.b.to_screen(), self.c.to_screen())
    }

    pub fn centroid(&self) -> Point3D {
        (self.a + self.b + self.c) / 3.0
    }

    pub fn average_depth(&self) -> f64 {
        (self.a.z + self.b.z + self.c.z) / 3.0
    }

    /// Rotate about the world Y axis through the origin, in place.
    pub fn rotate_y(&mut self, theta: f64) {
        let (sin, cos) = theta.sin_cos();
        for p in self.points_mut() {
            let (x, z) = rotate_in_plane(p.x, p.z, cos, sin);
            p.x = x;
            p.z = z;
        }
    }

    /// Depth at `p`, weighting each vertex z by the unsigned area of the
    /// sub-triangle opposite it. Exact at the vertices and for points inside
    /// the triangle; `None` when the screen triangle has no area.
    pub fn depth_at(&self, p: Point2D) -> Option<f64> {
        let pa = Vector::new(p, self.a.to_screen());
        let pb = Vector::new(p, self.b.to_screen());
        let pc = Vector::new(p, self.c.to_screen());
        let area_a = 0.5 * pb.cross(&pc).abs() as f64;
        let area_b = 0.5 * pa.cross(&pc).abs() as f64;
        let area_c = 0.5 * pa.cross(&pb).abs() as f64;
        let total = area_a + area_b + area_c;
        if total == 0.0 {
            return None;
        }
        Some((area_a * self.a.z + area_b * self.b.z + area_c * self.c.z) / total)
    }
}
