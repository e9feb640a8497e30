use log::trace;

use crate::geometry::{rotate_in_plane, Axis, BoundingBox};
use crate::obj::Face;
use crate::point3d::Point3D;
use crate::triangle::Triangle3D;

/// How a `Model` keeps its bounding box current across rotations.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Rebuild the whole box from live triangle vertices after every rotation.
    #[default]
    Recompute,
    /// Legacy behavior: the loader stores the box of the scaled, un-offset
    /// vertices, and each rotation only refreshes the two axes it moves.
    /// Those two axes are folded starting from zero rather than from the
    /// first vertex, so a box that does not straddle zero gets stretched
    /// to include it.
    PerAxis,
}

/// Mesh geometry plus its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    /// Centered and scaled vertices. Emptied by `obj::triangulate`.
    pub vertices: Vec<Point3D>,
    pub faces: Vec<Face>,
    /// Working geometry once triangulated.
    pub triangles: Vec<Triangle3D>,
    pub bbox: BoundingBox,
    /// Center of the scaled mesh before it was moved into place.
    pub center: Point3D,
    pub scale: f64,
    /// Translation applied at load time; rotations pivot around it.
    pub offset: Point3D,
    pub bounds_policy: BoundsPolicy,
}

impl Model {
    pub fn rotate_x(&mut self, theta: f64) {
        self.rotate(Axis::X, theta);
    }

    pub fn rotate_y(&mut self, theta: f64) {
        self.rotate(Axis::Y, theta);
    }

    pub fn rotate_z(&mut self, theta: f64) {
        self.rotate(Axis::Z, theta);
    }

    /// Rotate every triangle vertex by `theta` radians about `axis`, pivoting
    /// on `offset`, then update the bounding box per `bounds_policy`.
    pub fn rotate(&mut self, axis: Axis, theta: f64) {
        let (u, v) = axis.plane();
        let (sin, cos) = theta.sin_cos();
        let (pivot_u, pivot_v) = (self.offset.axis(u), self.offset.axis(v));

        for tri in &mut self.triangles {
            for p in tri.points_mut() {
                let (nu, nv) = rotate_in_plane(p.axis(u) - pivot_u, p.axis(v) - pivot_v, cos, sin);
                *p.axis_mut(u) = nu + pivot_u;
                *p.axis_mut(v) = nv + pivot_v;
            }
        }

        match self.bounds_policy {
            BoundsPolicy::Recompute => self.refresh_bbox(),
            BoundsPolicy::PerAxis => self.fold_bbox(axis),
        }
        trace!("rotated {:?} by {theta:.4} rad, bbox {:?}", axis, self.bbox);
    }

    /// Recompute the bounding box from the triangle list. Keeps the old box
    /// when there are no triangles.
    pub fn refresh_bbox(&mut self) {
        let points = self.triangles.iter().flat_map(|t| t.points());
        if let Some(bbox) = BoundingBox::from_points(points) {
            self.bbox = bbox;
        }
    }

    fn fold_bbox(&mut self, axis: Axis) {
        let (u, v) = axis.plane();
        let mut min = Point3D::default();
        let mut max = Point3D::default();
        *min.axis_mut(axis) = self.bbox.min.axis(axis);
        *max.axis_mut(axis) = self.bbox.max.axis(axis);

        for p in self.triangles.iter().flat_map(|t| t.points()) {
            for a in [u, v] {
                *min.axis_mut(a) = min.axis(a).min(p.axis(a));
                *max.axis_mut(a) = max.axis(a).max(p.axis(a));
            }
        }
        self.bbox = BoundingBox::new(min, max);
    }
}
