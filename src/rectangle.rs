use crate::triangle::Triangle3D;

/// Pixel rectangle, `max_*` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

// helper methods
impl Rect {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Pixels swept by the screen projection of `tri`, clamped to a
    /// `width` x `height` frame. Spans `trunc(min)..=floor(max)` on each axis.
    /// `None` when nothing of the triangle lands on the frame.
    pub fn covering(tri: &Triangle3D, width: u32, height: u32) -> Option<Rect> {
        let min_x = tri.a.x.min(tri.b.x).min(tri.c.x);
        let min_y = tri.a.y.min(tri.b.y).min(tri.c.y);
        let max_x = tri.a.x.max(tri.b.x).max(tri.c.x);
        let max_y = tri.a.y.max(tri.b.y).max(tri.c.y);

        let (min_x, max_x) = clamp_span(min_x, max_x, width)?;
        let (min_y, max_y) = clamp_span(min_y, max_y, height)?;
        Some(Rect { min_x, min_y, max_x, max_y })
    }
}

fn clamp_span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
    // Float -> int casts saturate, so far off-screen values stay ordered.
    let start = (lo as i64).max(0);
    let end = (hi.floor() as i64).saturating_add(1).min(limit as i64);
    if start >= end {
        return None;
    }
    Some((start as u32, end as u32))
}
