use log::debug;

use crate::color::rgb_to_hex;
use crate::model::Model;
use crate::point2d::Point2D;
use crate::rectangle::Rect;
use crate::screen::{DisplaySurface, pixel_count};
use crate::triangle::Triangle3D;

/// Per-frame rasterization counters.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    /// Zero-area on screen; never shaded.
    pub degenerate: usize,
    /// Entirely outside the frame.
    pub culled: usize,
    pub pixels_shaded: usize,
    pub pixels_occluded: usize,
}

/// Scan converter with a frame-sized depth buffer.
pub struct Rasterizer {
    width: u32,
    height: u32,
    max_brightness: u8,
    depth: Vec<f64>,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, max_brightness: u8) -> Self {
        Rasterizer {
            width,
            height,
            max_brightness,
            depth: vec![f64::INFINITY; pixel_count(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Forget last frame's depths.
    pub fn begin_frame(&mut self) {
        self.depth.fill(f64::INFINITY);
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depth[self.index(x, y)])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Draw the model's triangles in list order, shading by the model's z range.
    pub fn draw_model<S: DisplaySurface>(&mut self, model: &Model, surface: &mut S) -> RasterStats {
        let mut stats = RasterStats::default();
        let z_range = model.bbox.depth_range();
        for tri in &model.triangles {
            self.draw_triangle(tri, z_range, surface, &mut stats);
        }
        if stats.degenerate > 0 {
            debug!("skipped {} zero-area triangles", stats.degenerate);
        }
        stats
    }

    /// `tri` must already be wound clockwise on screen.
    pub fn draw_triangle<S: DisplaySurface>(
        &mut self,
        tri: &Triangle3D,
        z_range: (f64, f64),
        surface: &mut S,
        stats: &mut RasterStats,
    ) {
        stats.triangles += 1;
        let screen_tri = tri.to_screen();
        if screen_tri.signed_area() == 0 {
            stats.degenerate += 1;
            return;
        }
        let Some(rect) = Rect::covering(tri, self.width, self.height) else {
            stats.culled += 1;
            return;
        };

        for w in rect.min_x..rect.max_x {
            for h in rect.min_y..rect.max_y {
                let p = Point2D::new(w as i32, h as i32);
                if !screen_tri.is_point_inside(p) {
                    continue;
                }
                let Some(d) = tri.depth_at(p) else { continue };
                let i = self.index(w, h);
                if !(d < self.depth[i]) {
                    stats.pixels_occluded += 1;
                    continue;
                }
                self.depth[i] = d;
                let red = shade(d, z_range, self.max_brightness);
                surface.set_pixel(w, h, rgb_to_hex(red, 0, 0));
                stats.pixels_shaded += 1;
            }
        }
    }
}

/// Nearer is brighter: `zmin` maps to `max_brightness`, `zmax` to 0.
/// A flat z range shades everything at full brightness.
pub fn shade(depth: f64, (z_min, z_max): (f64, f64), max_brightness: u8) -> u8 {
    let range = z_max - z_min;
    if !(range > 0.0) {
        return max_brightness;
    }
    let max = max_brightness as f64;
    let dimmed = (((depth - z_min) / range) * max).trunc();
    (max - dimmed).clamp(0.0, max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::model::BoundsPolicy;
    use crate::point3d::Point3D;
    use crate::screen::ScreenSpace;

    fn tri(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> Triangle3D {
        Triangle3D::new(Point3D::new(a.0, a.1, a.2), Point3D::new(b.0, b.1, b.2), Point3D::new(c.0, c.1, c.2))
    }

    #[test]
    fn shade_maps_range_inverted() {
        assert_eq!(shade(0.0, (0.0, 10.0), 240), 240);
        assert_eq!(shade(10.0, (0.0, 10.0), 240), 0);
        assert_eq!(shade(5.0, (0.0, 10.0), 240), 120);
        assert_eq!(shade(2.5, (0.0, 10.0), 240), 180);
    }

    #[test]
    fn shade_clamps_and_handles_flat_range() {
        assert_eq!(shade(-5.0, (0.0, 10.0), 240), 240);
        assert_eq!(shade(50.0, (0.0, 10.0), 240), 0);
        assert_eq!(shade(3.0, (3.0, 3.0), 200), 200);
    }

    #[test]
    fn depth_test_is_strict() {
        let mut raster = Rasterizer::new(20, 20, 240);
        let mut screen = ScreenSpace::new(20, 20);
        let mut stats = RasterStats::default();
        let near = tri((0.0, 10.0, 1.0), (10.0, 0.0, 1.0), (0.0, 0.0, 1.0));
        raster.draw_triangle(&near, (0.0, 10.0), &mut screen, &mut stats);
        let shaded = stats.pixels_shaded;
        assert!(shaded > 0);

        // Same depth again: every pixel ties and is discarded.
        raster.draw_triangle(&near, (0.0, 10.0), &mut screen, &mut stats);
        assert_eq!(stats.pixels_shaded, shaded);
        assert_eq!(stats.pixels_occluded, shaded);
        assert_eq!(raster.depth_at(1, 1), Some(1.0));
    }

    #[test]
    fn degenerate_triangle_shades_nothing() {
        let mut raster = Rasterizer::new(20, 20, 240);
        let mut screen = ScreenSpace::new(20, 20);
        let mut stats = RasterStats::default();
        let flat = tri((0.0, 0.0, 1.0), (5.0, 5.0, 2.0), (10.0, 10.0, 3.0));
        raster.draw_triangle(&flat, (0.0, 10.0), &mut screen, &mut stats);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.pixels_shaded, 0);
        assert!(screen.rgba.iter().all(|&b| b == 0));
    }

    #[test]
    fn degenerate_triangles_are_counted_every_frame() {
        let triangles = vec![tri((0.0, 0.0, 1.0), (5.0, 5.0, 2.0), (10.0, 10.0, 3.0)); 3];
        let model = Model {
            name: "sliver".to_string(),
            vertices: Vec::new(),
            faces: Vec::new(),
            bbox: BoundingBox::from_points(triangles.iter().flat_map(|t| t.points())).unwrap(),
            triangles,
            center: Point3D::default(),
            scale: 1.0,
            offset: Point3D::default(),
            bounds_policy: BoundsPolicy::Recompute,
        };
        let mut raster = Rasterizer::new(20, 20, 240);
        let mut screen = ScreenSpace::new(20, 20);
        for _ in 0..2 {
            raster.begin_frame();
            let stats = raster.draw_model(&model, &mut screen);
            assert_eq!((stats.triangles, stats.degenerate, stats.pixels_shaded), (3, 3, 0));
        }
    }

    #[test]
    fn triangles_past_the_frame_edge_are_clipped() {
        let mut raster = Rasterizer::new(16, 12, 240);
        let mut screen = ScreenSpace::new(16, 12);
        let mut stats = RasterStats::default();
        let big = tri((-30.0, 40.0, 1.0), (50.0, -30.0, 1.0), (-30.0, -30.0, 1.0));
        raster.draw_triangle(&big, (0.0, 10.0), &mut screen, &mut stats);
        assert!(stats.pixels_shaded > 0);
        assert!(stats.pixels_shaded <= 16 * 12);
        assert_eq!(raster.depth_at(0, 0), Some(1.0));

        let gone = tri((-30.0, 10.0, 1.0), (-5.0, 0.0, 1.0), (-30.0, 0.0, 1.0));
        raster.draw_triangle(&gone, (0.0, 10.0), &mut screen, &mut stats);
        assert_eq!(stats.culled, 1);
    }

    #[test]
    fn saturated_screen_coordinates_cover_the_whole_frame() {
        let mut raster = Rasterizer::new(16, 12, 240);
        let mut screen = ScreenSpace::new(16, 12);
        let mut stats = RasterStats::default();
        // Projects to the i32 extremes; the hypotenuse runs along x + y = -1.
        let huge = tri((-5e9, 5e9, 1.0), (5e9, 5e9, 1.0), (5e9, -5e9, 1.0));
        raster.draw_triangle(&huge, (0.0, 10.0), &mut screen, &mut stats);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.pixels_shaded, 16 * 12);
        assert_eq!(raster.depth_at(0, 0), Some(1.0));
        assert_eq!(raster.depth_at(15, 11), Some(1.0));
    }

    #[test]
    fn begin_frame_resets_depths() {
        let mut raster = Rasterizer::new(8, 8, 240);
        let mut screen = ScreenSpace::new(8, 8);
        let mut stats = RasterStats::default();
        raster.draw_triangle(&tri((0.0, 6.0, 2.0), (6.0, 0.0, 2.0), (0.0, 0.0, 2.0)), (0.0, 4.0), &mut screen, &mut stats);
        assert_eq!(raster.depth_at(0, 0), Some(2.0));
        raster.begin_frame();
        assert_eq!(raster.depth_at(0, 0), Some(f64::INFINITY));
        assert_eq!(raster.depth_at(8, 0), None);
    }
}
