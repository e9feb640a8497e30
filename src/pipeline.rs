use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, trace};

use crate::color::WHITE;
use crate::model::Model;
use crate::projection::project;
use crate::raster::{RasterStats, Rasterizer};
use crate::screen::DisplaySurface;

/// Fixed per-run frame parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    pub max_brightness: u8,
    /// Y rotation applied at the start of every frame, in radians.
    pub rotation_step: f64,
    /// Packed clear color.
    pub background: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            width: 640,
            height: 480,
            max_brightness: 240,
            rotation_step: std::f64::consts::PI / 100.0,
            background: WHITE,
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct FrameStats {
    pub rotate_time: Duration,
    pub project_time: Duration,
    pub raster_time: Duration,
    pub frame_time: Duration,
    pub raster: RasterStats,
}

/// Owns the model and the depth buffer for the life of the render loop.
pub struct Renderer {
    model: Model,
    rasterizer: Rasterizer,
    config: FrameConfig,
    frames: u64,
}

impl Renderer {
    pub fn new(model: Model, config: FrameConfig) -> Self {
        let rasterizer = Rasterizer::new(config.width, config.height, config.max_brightness);
        Renderer { model, rasterizer, config, frames: 0 }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Starting pose: yaw about Y, then roll about Z.
    pub fn orient(&mut self, yaw: f64, roll: f64) {
        self.model.rotate_y(yaw);
        self.model.rotate_z(roll);
        project(&mut self.model);
    }

    /// Clear, spin, project, rasterize and present one frame.
    pub fn render_frame<S: DisplaySurface>(&mut self, surface: &mut S) -> Result<FrameStats> {
        let frame_start = Instant::now();
        let FrameConfig { width, height, background, rotation_step, .. } = self.config;

        surface.set_color(background);
        surface.fill_rect(0, 0, width, height);

        self.model.rotate_y(rotation_step);
        let rotate_time = frame_start.elapsed();

        let project_start = Instant::now();
        project(&mut self.model);
        let project_time = project_start.elapsed();

        let raster_start = Instant::now();
        self.rasterizer.begin_frame();
        let raster = self.rasterizer.draw_model(&self.model, surface);
        let raster_time = raster_start.elapsed();

        surface.present()?;
        self.frames += 1;

        let stats = FrameStats { rotate_time, project_time, raster_time, frame_time: frame_start.elapsed(), raster };
        trace!("frame {}: {:?}", self.frames, stats);
        Ok(stats)
    }

    /// Render until `stop` is raised, `max_frames` have been drawn or the
    /// surface asks to close. Returns the number of frames rendered.
    pub fn run<S: DisplaySurface>(&mut self, surface: &mut S, stop: &AtomicBool, max_frames: Option<u64>) -> Result<u64> {
        let mut rendered = 0;
        while !stop.load(Ordering::Relaxed) && !surface.should_close() {
            if max_frames.is_some_and(|max| rendered >= max) {
                break;
            }
            self.render_frame(surface)?;
            rendered += 1;
        }
        debug!("render loop finished after {rendered} frames");
        Ok(rendered)
    }
}
