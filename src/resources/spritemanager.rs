//! Sprite display manager.
//!
//! Owns the sprite set and, once per frame, publishes the active list: the
//! sprites that may be drawn this frame, in draw order. Two budgets apply:
//!
//! - a global budget of [`MAX_SPRITES`] enforced at admission time;
//! - a per-scanline budget of [`SPRITES_PER_SCANLINE`], approximated by
//!   bucketing sprites into bands of `TILE_SIZE * SCALE` device pixels and
//!   hiding the 9th and later arrivals in each band.
//!
//! The active list is ordered by ascending world `rect.y`, ties broken by
//! insertion order. Neither budget is an error: a refused admission is
//! reported by [`SpriteDisplayManager::add`] returning `None`, and a band
//! overflow only clears the loser's `visible` flag.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::hardware::{BAND_HEIGHT, MAX_SPRITES, SPRITES_PER_SCANLINE};
use crate::resources::camera::CameraState;

/// World-space axis-aligned rectangle in native pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Key of a raster image in the [`ImageStore`](super::imagestore::ImageStore).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey(pub String);

impl From<&str> for ImageKey {
    fn from(s: &str) -> Self {
        ImageKey(s.to_owned())
    }
}

/// Per-object state tracked by the manager.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteRecord {
    /// World-space bounds. `w` and `h` are fixed for the record's lifetime.
    pub rect: Rect,
    /// Image sized `(rect.w, rect.h)` in native pixels.
    pub image: ImageKey,
    /// Recomputed by every [`SpriteDisplayManager::update`].
    pub visible: bool,
}

impl SpriteRecord {
    pub fn new(rect: Rect, image: impl Into<ImageKey>) -> Self {
        Self {
            rect,
            image: image.into(),
            visible: true,
        }
    }
}

/// Handle to a record admitted into the sprite set.
///
/// Ids are insertion indices and stay valid until [`SpriteDisplayManager::clear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub usize);

/// Which vertical reference the band computation subtracts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BandMode {
    /// `rect.y - camera.x`. Subtracts the horizontal camera offset from a
    /// vertical coordinate; kept as the default to match established output.
    #[default]
    CameraX,
    /// `rect.y - camera.y`.
    CameraY,
}

impl BandMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera_x" => Some(BandMode::CameraX),
            "camera_y" => Some(BandMode::CameraY),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BandMode::CameraX => "camera_x",
            BandMode::CameraY => "camera_y",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            BandMode::CameraX => BandMode::CameraY,
            BandMode::CameraY => BandMode::CameraX,
        }
    }
}

/// Summary of the last visibility pass, for logging and debug overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityReport {
    /// Records evaluated.
    pub candidates: usize,
    /// Records hidden by the band budget.
    pub dropped: usize,
    /// Distinct bands occupied.
    pub bands: usize,
    /// Highest per-band arrival count, including dropped arrivals.
    pub busiest_band: usize,
}

/// Band index of a sprite whose top edge is `y`, relative to `offset`.
///
/// Uses floor division so offsets above the origin land in negative bands.
pub fn band_of(y: f32, offset: f32) -> i64 {
    ((y - offset) / BAND_HEIGHT).floor() as i64
}

/// Owns the sprite set and publishes the active list.
#[derive(Resource, Debug, Default)]
pub struct SpriteDisplayManager {
    sprites: ArrayVec<SpriteRecord, MAX_SPRITES>,
    active: ArrayVec<SpriteId, MAX_SPRITES>,
    band_mode: BandMode,
    report: VisibilityReport,
}

impl SpriteDisplayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band_mode(band_mode: BandMode) -> Self {
        Self {
            band_mode,
            ..Self::default()
        }
    }

    pub fn band_mode(&self) -> BandMode {
        self.band_mode
    }

    pub fn set_band_mode(&mut self, band_mode: BandMode) {
        self.band_mode = band_mode;
    }

    /// Admit a record into the sprite set.
    ///
    /// Returns `None` once [`MAX_SPRITES`] records are held; the record is
    /// dropped untouched in that case.
    pub fn add(&mut self, sprite: SpriteRecord) -> Option<SpriteId> {
        let id = SpriteId(self.sprites.len());
        match self.sprites.try_push(sprite) {
            Ok(()) => Some(id),
            Err(_) => {
                debug!("sprite admission denied: {} sprites held", MAX_SPRITES);
                None
            }
        }
    }

    /// [`add`](Self::add), reporting only whether the record was admitted.
    pub fn admit(&mut self, sprite: SpriteRecord) -> bool {
        self.add(sprite).is_some()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.sprites.is_full()
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteRecord> {
        self.sprites.get(id.0)
    }

    /// Move a record's top-left corner. Returns false for an unknown id.
    pub fn set_position(&mut self, id: SpriteId, x: f32, y: f32) -> bool {
        match self.sprites.get_mut(id.0) {
            Some(sprite) => {
                sprite.rect.x = x;
                sprite.rect.y = y;
                true
            }
            None => false,
        }
    }

    /// The sprite set in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &SpriteRecord)> {
        self.sprites
            .iter()
            .enumerate()
            .map(|(i, s)| (SpriteId(i), s))
    }

    /// Forget every record (level unload). Invalidates all ids.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.active.clear();
        self.report = VisibilityReport::default();
    }

    /// Recompute the active list for the given horizontal camera offset.
    ///
    /// Band offsets use `camera_x` regardless of [`BandMode`].
    pub fn update(&mut self, camera_x: f32) {
        self.resolve(camera_x);
    }

    /// Recompute the active list, taking the band offset selected by
    /// [`BandMode`] from `camera`.
    pub fn update_with(&mut self, camera: &CameraState) {
        let offset = match self.band_mode {
            BandMode::CameraX => camera.x,
            BandMode::CameraY => camera.y,
        };
        self.resolve(offset);
    }

    fn resolve(&mut self, band_offset: f32) {
        for sprite in self.sprites.iter_mut() {
            sprite.visible = true;
        }

        let mut candidates: ArrayVec<SpriteId, MAX_SPRITES> = self
            .sprites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .map(|(i, _)| SpriteId(i))
            .collect();
        // sort_by is stable: equal y keeps insertion order. Adding 0.0 folds
        // -0.0 into 0.0 so the two compare equal.
        let sprites = &self.sprites;
        candidates.sort_by(|a, b| {
            (sprites[a.0].rect.y + 0.0).total_cmp(&(sprites[b.0].rect.y + 0.0))
        });

        let mut band_counts: FxHashMap<i64, usize> = FxHashMap::default();
        let mut dropped = 0;
        for id in candidates.iter() {
            let sprite = &mut self.sprites[id.0];
            let count = band_counts
                .entry(band_of(sprite.rect.y, band_offset))
                .or_insert(0);
            *count += 1;
            if *count > SPRITES_PER_SCANLINE {
                sprite.visible = false;
                dropped += 1;
            }
        }

        self.report = VisibilityReport {
            candidates: candidates.len(),
            dropped,
            bands: band_counts.len(),
            busiest_band: band_counts.values().copied().max().unwrap_or(0),
        };

        self.active.clear();
        self.active
            .extend(candidates.into_iter().filter(|id| self.sprites[id.0].visible));
    }

    /// The most recently published active list, in draw order.
    pub fn active(&self) -> impl Iterator<Item = &SpriteRecord> {
        self.active.iter().map(|id| &self.sprites[id.0])
    }

    /// Ids of the most recently published active list, in draw order.
    pub fn active_ids(&self) -> &[SpriteId] {
        &self.active
    }

    pub fn last_report(&self) -> VisibilityReport {
        self.report
    }
}
