//! Software device surface.
//!
//! The compositor draws into this buffer at device resolution; front-ends
//! then present it (raylib window) or export it (PNG). Keeping the surface in
//! plain memory means composition runs and can be tested without a GPU.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;

use crate::hardware::{screen_height, screen_width};
use crate::palette::{Palette, Rgb};
use crate::resources::imagestore::RasterImage;

/// Device-resolution RGB surface.
#[derive(Resource, Clone, Debug)]
pub struct FrameBuffer {
    pub w: u32,
    pub h: u32,
    pixels: Vec<Rgb>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(screen_width(), screen_height())
    }
}

impl FrameBuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            pixels: vec![Palette::Black.rgb(); (w * h) as usize],
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x as u32 >= self.w || y as u32 >= self.h {
            return None;
        }
        Some(self.pixels[(y as u32 * self.w + x as u32) as usize])
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as u32 >= self.w || y as u32 >= self.h {
            return;
        }
        self.pixels[(y as u32 * self.w + x as u32) as usize] = color;
    }

    pub fn clear(&mut self, color: Palette) {
        self.pixels.fill(color.rgb());
    }

    /// Nearest-neighbour blit of `image` with its top-left corner at device
    /// `(dx, dy)`, stretched by `sx` horizontally and `sy` vertically.
    ///
    /// Transparent pixels are skipped and the result is clipped to the
    /// surface. Returns the number of device pixels written.
    pub fn blit_scaled(&mut self, image: &RasterImage, dx: i32, dy: i32, sx: f32, sy: f32) -> usize {
        let out_w = (image.w as f32 * sx).round() as i32;
        let out_h = (image.h as f32 * sy).round() as i32;

        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = dx.saturating_add(out_w).min(self.w as i32);
        let y1 = dy.saturating_add(out_h).min(self.h as i32);

        let mut written = 0;
        for y in y0..y1 {
            let src_y = (((y - dy) as f32 / sy) as u32).min(image.h.saturating_sub(1));
            for x in x0..x1 {
                let src_x = (((x - dx) as f32 / sx) as u32).min(image.w.saturating_sub(1));
                if let Some(color) = image.pixel(src_x, src_y) {
                    self.pixels[(y as u32 * self.w + x as u32) as usize] = color;
                    written += 1;
                }
            }
        }
        written
    }

    /// Paint every `spacing`-th row (starting at row 0) with `color`.
    pub fn overlay_scanlines(&mut self, spacing: u32, color: Palette) {
        if spacing == 0 {
            return;
        }
        let rgb = color.rgb();
        for y in (0..self.h).step_by(spacing as usize) {
            let start = (y * self.w) as usize;
            self.pixels[start..start + self.w as usize].fill(rgb);
        }
    }

    /// Packed RGBA8 bytes, ready for a texture upload.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in self.pixels.iter() {
            out.extend_from_slice(&[p.r, p.g, p.b, 255]);
        }
        out
    }

    /// Packed RGB8 bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for p in self.pixels.iter() {
            out.extend_from_slice(&[p.r, p.g, p.b]);
        }
        out
    }

    /// Write the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let img = image::RgbImage::from_raw(self.w, self.h, self.to_rgb())
            .ok_or_else(|| "Frame buffer size does not match its dimensions".to_string())?;
        img.save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        info!("Saved frame to {}", path.display());
        Ok(())
    }
}
