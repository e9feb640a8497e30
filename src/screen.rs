use std::path::Path;

use anyhow::{Context, Result, anyhow};
use bytemuck::try_cast_slice_mut;
use image::RgbaImage;

use crate::color::{BLACK, hex_to_rgb, rgb_to_hex};

/// Where the pipeline puts its pixels. Colors are packed `0xRRGGBB`.
pub trait DisplaySurface {
    /// Color used by the next `fill_rect`.
    fn set_color(&mut self, color: u32);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32);
    /// Writes outside the surface are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: u32);
    /// Flush the finished frame to the visible output.
    fn present(&mut self) -> Result<()>;
    /// Whoever owns the output asked to stop.
    fn should_close(&self) -> bool {
        false
    }
}

/// Pixels in a `width` x `height` frame, computed in `usize`.
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// In-memory RGBA8 frame buffer.
pub struct ScreenSpace {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    color: u32,
    frames_presented: u64,
}

impl ScreenSpace {
    pub fn new(width: u32, height: u32) -> Self {
        let size_calc = pixel_count(width, height);
        Self {
            width,
            height,
            rgba: vec![0; size_calc * 4],
            color: BLACK,
            frames_presented: 0,
        }
    }
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let color: u32 = u32::from_le_bytes([r, g, b, a]);
        match try_cast_slice_mut::<u8, u32>(&mut self.rgba) {
            Ok(buf_as_u32) => buf_as_u32.fill(color),
            // unaligned allocation
            Err(_) => self.rgba.chunks_exact_mut(4).for_each(|px| px.copy_from_slice(&[r, g, b, a])),
        }
    }
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height { return None }
        let i = self.offset(x, y);
        Some(rgb_to_hex(self.rgba[i], self.rgba[i + 1], self.rgba[i + 2]))
    }
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let img = RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| anyhow!("frame buffer does not match {}x{}", self.width, self.height))?;
        img.save(path).with_context(|| format!("failed to save {}", path.display()))?;
        Ok(())
    }
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
    fn put(&mut self, x: u32, y: u32, color: u32) {
        let (r, g, b) = hex_to_rgb(color);
        let i = self.offset(x, y);
        self.rgba[i] = r;
        self.rgba[i + 1] = g;
        self.rgba[i + 2] = b;
        self.rgba[i + 3] = 255;
    }
}

impl DisplaySurface for ScreenSpace {
    fn set_color(&mut self, color: u32) {
        self.color = color;
    }
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let (r, g, b) = hex_to_rgb(self.color);
        if x == 0 && y == 0 && width >= self.width && height >= self.height {
            self.clear(r, g, b, 255);
            return;
        }
        let max_x = x.saturating_add(width).min(self.width);
        let max_y = y.saturating_add(height).min(self.height);
        for py in y..max_y {
            for px in x..max_x {
                self.put(px, py, self.color);
            }
        }
    }
    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        if x >= self.width || y >= self.height { return; }
        self.put(x, y, color);
    }
    fn present(&mut self) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}
