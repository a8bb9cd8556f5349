//! Camera state and the World → Camera → Device transforms.
//!
//! | Space  | Units                         | Origin               |
//! |--------|-------------------------------|----------------------|
//! | World  | native pixels, unbounded x    | level start          |
//! | Camera | native pixels, viewport-local | top-left of viewport |
//! | Device | output pixels                 | top-left of window   |
//!
//! World → Camera subtracts the camera offset. Camera → Device multiplies by
//! [`SCALE`] horizontally and by `SCALE * ASPECT_RATIO` vertically, so sprites
//! are stretched to the console's non-square pixel shape only at the end.

use bevy_ecs::prelude::Resource;

use crate::hardware::{ASPECT_RATIO, SCALE};

/// A 2D point in any of the three coordinate spaces.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// ECS resource holding the shared camera offset.
///
/// Only the horizontal offset moves in this design; `y` stays at zero unless
/// the vertical band formulation is enabled by gameplay code.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraState {
    /// Horizontal offset in world pixels.
    pub x: f32,
    /// Vertical offset in world pixels.
    pub y: f32,
}

impl CameraState {
    pub fn new(x: f32) -> Self {
        Self { x, y: 0.0 }
    }

    pub fn world_to_camera(&self, world: Point) -> Point {
        Point::new(world.x - self.x, world.y)
    }

    pub fn camera_to_world(&self, camera: Point) -> Point {
        Point::new(camera.x + self.x, camera.y)
    }

    pub fn world_to_device(&self, world: Point) -> Point {
        camera_to_device(self.world_to_camera(world))
    }

    pub fn device_to_world(&self, device: Point) -> Point {
        self.camera_to_world(device_to_camera(device))
    }
}

/// Vertical scale from native pixels to device pixels.
pub fn vertical_scale() -> f32 {
    SCALE as f32 * ASPECT_RATIO
}

pub fn camera_to_device(camera: Point) -> Point {
    Point::new(camera.x * SCALE as f32, camera.y * vertical_scale())
}

pub fn device_to_camera(device: Point) -> Point {
    Point::new(device.x / SCALE as f32, device.y / vertical_scale())
}

/// Snap a device-space point to the pixel grid used by the blitter.
pub fn to_device_pixel(device: Point) -> (i32, i32) {
    (device.x.round() as i32, device.y.round() as i32)
}
