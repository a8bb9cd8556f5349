//! Input systems.
//!
//! - [`autopilot_input`] drives [`InputState`] from the [`Autopilot`] script
//!   in headless runs.
//! - [`update_input_state`] (feature `raylib`) polls the keyboard each frame:
//!   arrows or A/D to walk, Space/Up/W to jump, Escape to quit.
use bevy_ecs::prelude::*;

use crate::resources::input::{Autopilot, InputState};
use crate::resources::worldtime::WorldTime;

/// Feed the scripted autopilot into the input state.
pub fn autopilot_input(
    mut input: ResMut<InputState>,
    pilot: Res<Autopilot>,
    time: Res<WorldTime>,
) {
    let (left, right, jump) = pilot.sample(time.frame_count);
    input.left.update(left);
    input.right.update(right);
    input.jump.update(jump);
    input.back.update(false);
}

/// Poll raylib for keyboard input and update the `InputState` resource.
#[cfg(feature = "raylib")]
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    use raylib::consts::KeyboardKey;

    let any_down = |keys: &[KeyboardKey]| keys.iter().any(|k| rl.is_key_down(*k));

    input
        .left
        .update(any_down(&[KeyboardKey::KEY_LEFT, KeyboardKey::KEY_A]));
    input
        .right
        .update(any_down(&[KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_D]));
    input.jump.update(any_down(&[
        KeyboardKey::KEY_SPACE,
        KeyboardKey::KEY_UP,
        KeyboardKey::KEY_W,
    ]));
    input.back.update(any_down(&[KeyboardKey::KEY_ESCAPE]));
}
