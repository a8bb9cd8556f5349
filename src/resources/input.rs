//! Per-frame input resource.
//!
//! Captures the handful of buttons the platformer cares about. Front-ends
//! feed raw "is down" samples through [`BoolState::update`], which derives
//! the press/release edges, so the keyboard and the headless autopilot
//! produce identical state.
use bevy_ecs::prelude::*;

/// Boolean button state with derived edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the button is held this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this frame's raw sample.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame button state relevant to gameplay.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
    pub back: BoolState,
}

impl InputState {
    /// Horizontal intent: -1, 0 or 1.
    pub fn horizontal(&self) -> f32 {
        match (self.left.active, self.right.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Scripted input for headless runs: walk right and jump periodically.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Autopilot {
    /// Frames between jump presses.
    pub jump_every: u64,
    /// Frames the jump button is held.
    pub jump_hold: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            jump_every: 90,
            jump_hold: 10,
        }
    }
}

impl Autopilot {
    /// Raw (left, right, jump) samples for `frame`.
    pub fn sample(&self, frame: u64) -> (bool, bool, bool) {
        let jump = self.jump_every > 0 && frame % self.jump_every < self.jump_hold;
        (false, true, jump)
    }
}
