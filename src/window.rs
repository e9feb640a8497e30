use anyhow::{Result, anyhow};
use raylib::prelude::*;

use crate::screen::{DisplaySurface, ScreenSpace};

/// On-screen surface: pixels land in a `ScreenSpace` and `present` pushes it
/// to a raylib window as a texture.
pub struct RaylibSurface {
    rl: RaylibHandle,
    thread: RaylibThread,
    texture: Texture2D,
    screen: ScreenSpace,
    overlay: Option<String>,
}

impl RaylibSurface {
    pub fn open(width: u32, height: u32, title: &str) -> Result<Self> {
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title(title)
            .resizable()
            .build();
        rl.set_target_fps(60);
        let image = Image::gen_image_color(width as i32, height as i32, Color::WHITE);
        let texture = rl
            .load_texture_from_image(&thread, &image)
            .map_err(|e| anyhow!("raylib texture loading failed: {e:?}"))?;
        Ok(RaylibSurface { rl, thread, texture, screen: ScreenSpace::new(width, height), overlay: None })
    }

    /// Text drawn in the corner of the next presented frames.
    pub fn set_overlay(&mut self, text: impl Into<String>) {
        self.overlay = Some(text.into());
    }
}

/// The frame buffer must hold exactly one RGBA8 texel per texture pixel.
fn check_upload(screen: &ScreenSpace, texture_width: i32, texture_height: i32) -> Result<()> {
    let expected = texture_width.max(0) as usize * texture_height.max(0) as usize * 4;
    if screen.rgba.len() != expected {
        return Err(anyhow!(
            "texture upload failed: frame buffer has {} bytes, {texture_width}x{texture_height} texture needs {expected}",
            screen.rgba.len()
        ));
    }
    Ok(())
}

impl DisplaySurface for RaylibSurface {
    fn set_color(&mut self, color: u32) {
        self.screen.set_color(color);
    }
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.screen.fill_rect(x, y, width, height);
    }
    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        self.screen.set_pixel(x, y, color);
    }
    fn present(&mut self) -> Result<()> {
        // Put it in a window!
        check_upload(&self.screen, self.texture.width, self.texture.height)?;
        self.texture
            .update_texture(&self.screen.rgba)
            .map_err(|e| anyhow!("texture upload failed: {e:?}"))?;
        let window_width = self.rl.get_screen_width();
        let window_height = self.rl.get_screen_height();
        let (width, height) = (self.screen.width as f32, self.screen.height as f32);

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::WHITE);
        d.draw_texture_pro(
            &self.texture,
            Rectangle { x: 0.0, y: 0.0, width, height },
            Rectangle { x: 0.0, y: 0.0, width: window_width as f32, height: window_height as f32 },
            Vector2 { x: 0.0, y: 0.0 },
            0.0,
            Color::WHITE,
        );
        if let Some(text) = &self.overlay {
            d.draw_text(text, 10, 10, 20, Color::DARKGRAY);
        }
        drop(d);
        self.screen.present()
    }
    fn should_close(&self) -> bool {
        self.rl.window_should_close() || self.rl.is_key_down(KeyboardKey::KEY_ESCAPE)
    }
}
