//! Raster images referenced by sprite records.
//!
//! Images are tiny palette-indexed bitmaps in native pixels. A `None` pixel is
//! transparent and leaves the device surface untouched when blitted.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::palette::{Palette, Rgb};
use crate::resources::spritemanager::ImageKey;

/// A raster image sized `(w, h)` native pixels, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pub w: u32,
    pub h: u32,
    pub pixels: Vec<Option<Rgb>>,
}

impl RasterImage {
    /// A fully opaque image of a single colour.
    pub fn solid(w: u32, h: u32, color: Palette) -> Self {
        Self {
            w,
            h,
            pixels: vec![Some(color.rgb()); (w * h) as usize],
        }
    }

    /// Build an image from ASCII art, one string per row.
    ///
    /// Each character is looked up in `legend`; characters without an entry
    /// are transparent. Short rows are padded with transparency.
    pub fn from_rows(rows: &[&str], legend: &[(char, Palette)]) -> Self {
        let h = rows.len() as u32;
        let w = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut pixels = Vec::with_capacity((w * h) as usize);
        for row in rows {
            let mut n = 0;
            for ch in row.chars() {
                let px = legend
                    .iter()
                    .find(|(c, _)| *c == ch)
                    .map(|(_, p)| p.rgb());
                pixels.push(px);
                n += 1;
            }
            pixels.extend(std::iter::repeat_n(None, w as usize - n));
        }
        Self { w, h, pixels }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.w || y >= self.h {
            return None;
        }
        self.pixels[(y * self.w + x) as usize]
    }
}

/// Loaded images keyed by [`ImageKey`].
#[derive(Resource, Default, Debug)]
pub struct ImageStore {
    map: FxHashMap<ImageKey, RasterImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<ImageKey>, image: RasterImage) {
        self.map.insert(key.into(), image);
    }

    pub fn get(&self, key: &ImageKey) -> Option<&RasterImage> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
