use rayon::prelude::*;

use crate::model::Model;
use crate::point3d::Point3D;
use crate::triangle::Triangle3D;

/// Reorder the vertices of `tri` clockwise on screen (y down): descending
/// angle around the x/y centroid. Each z stays with its vertex.
pub fn correct_winding(tri: &mut Triangle3D) {
    let cx = (tri.a.x + tri.b.x + tri.c.x) / 3.0;
    let cy = (tri.a.y + tri.b.y + tri.c.y) / 3.0;
    let angle = |p: &Point3D| (p.y - cy).atan2(p.x - cx);

    let mut points = tri.points();
    points.sort_by(|p, q| angle(q).total_cmp(&angle(p)));
    *tri = Triangle3D::new(points[0], points[1], points[2]);
}

/// Painter's order: farthest average depth first. Stable, so equal depths
/// keep their relative order.
pub fn sort_back_to_front(triangles: &mut [Triangle3D]) {
    triangles.par_sort_by(|t1, t2| t2.average_depth().total_cmp(&t1.average_depth()));
}

/// Run both per-frame passes over the model's triangles.
pub fn project(model: &mut Model) {
    model.triangles.par_iter_mut().for_each(correct_winding);
    sort_back_to_front(&mut model.triangles);
}
