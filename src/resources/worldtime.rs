use bevy_ecs::prelude::Resource;

use crate::hardware::FPS;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Delta expressed in console frames, so per-frame tuning constants can be
    /// multiplied by it directly.
    pub fn frames(&self) -> f32 {
        self.delta * FPS as f32
    }
}
