use std::collections::HashSet;

use bevy::{input::mouse::MouseMotion, prelude::*};

use super::{InputMapper, InputSource, MovementIntent, OrientationDelta};
use crate::player::{ForwardBasis, MovementConfig};

/// Keyboard movement plus mouse look while the pointer is captured.
#[derive(Debug, Default)]
pub struct KeyboardMouse {
    /// Movement keys currently held down, tracked from press/release edges.
    held: HashSet<KeyCode>,
    captured: bool,
    pending_look: OrientationDelta,
    jump_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Forward,
    Strafe,
}

fn movement_axis(key: KeyCode) -> Option<(Axis, f32)> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some((Axis::Forward, 1.0)),
        KeyCode::KeyS | KeyCode::ArrowDown => Some((Axis::Forward, -1.0)),
        KeyCode::KeyD | KeyCode::ArrowRight => Some((Axis::Strafe, 1.0)),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some((Axis::Strafe, -1.0)),
        _ => None,
    }
}

impl KeyboardMouse {
    pub fn key_down(&mut self, key: KeyCode) {
        if movement_axis(key).is_some() {
            self.held.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Starts or ends pointer capture. Ending it drops all device state.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.held.clear();
            self.pending_look = OrientationDelta::default();
            self.jump_requested = false;
        }
    }

    /// Accumulates raw mouse motion in pixels. Ignored outside capture.
    pub fn mouse_moved(&mut self, delta: Vec2, sensitivity: f32) {
        if !self.captured {
            return;
        }
        // Screen y grows downward; moving the mouse up looks up
        self.pending_look
            .accumulate(delta.x * sensitivity, -delta.y * sensitivity);
    }

    pub fn request_jump(&mut self) {
        if self.captured {
            self.jump_requested = true;
        }
    }

    fn axis_value(&self, wanted: Axis) -> f32 {
        let held = |sign: f32| {
            self.held
                .iter()
                .any(|key| movement_axis(*key) == Some((wanted, sign)))
        };
        // Opposite keys held together cancel out
        match (held(1.0), held(-1.0)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

impl InputSource for KeyboardMouse {
    fn current_intent(&self) -> MovementIntent {
        MovementIntent::new(self.axis_value(Axis::Strafe), self.axis_value(Axis::Forward))
    }

    fn take_orientation_delta(&mut self) -> OrientationDelta {
        std::mem::take(&mut self.pending_look)
    }

    fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    fn movement_enabled(&self) -> bool {
        self.captured
    }

    fn forward_basis(&self) -> ForwardBasis {
        ForwardBasis::LookDirection
    }

    fn move_speed(&self, config: &MovementConfig) -> f32 {
        config.desktop_speed
    }
}

pub fn read_movement_keys(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut mapper: ResMut<InputMapper>,
) {
    let Some(controls) = mapper.desktop_mut() else {
        return;
    };

    for key in keyboard_input.get_just_pressed() {
        controls.key_down(*key);
    }
    for key in keyboard_input.get_just_released() {
        controls.key_up(*key);
    }

    if keyboard_input.just_pressed(KeyCode::Space) {
        controls.request_jump();
    }
}

pub fn read_mouse_motion(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<MovementConfig>,
    mut mapper: ResMut<InputMapper>,
) {
    let Some(controls) = mapper.desktop_mut() else {
        mouse_motion.clear();
        return;
    };

    // Only process mouse look when the pointer is captured
    if !controls.is_captured() {
        mouse_motion.clear();
        return;
    }

    for event in mouse_motion.read() {
        controls.mouse_moved(event.delta, config.mouse_sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured() -> KeyboardMouse {
        let mut controls = KeyboardMouse::default();
        controls.set_captured(true);
        controls
    }

    #[test]
    fn test_forward_and_strafe_axes() {
        let mut controls = captured();
        controls.key_down(KeyCode::KeyW);
        controls.key_down(KeyCode::KeyD);
        assert_eq!(controls.current_intent(), MovementIntent::new(1.0, 1.0));

        controls.key_up(KeyCode::KeyD);
        controls.key_down(KeyCode::ArrowLeft);
        assert_eq!(controls.current_intent(), MovementIntent::new(-1.0, 1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controls = captured();
        controls.key_down(KeyCode::KeyW);
        controls.key_down(KeyCode::KeyS);
        assert_eq!(controls.current_intent().forward, 0.0);

        controls.key_up(KeyCode::KeyW);
        assert_eq!(controls.current_intent().forward, -1.0);
    }

    #[test]
    fn test_aliased_keys_hold_axis_until_both_released() {
        let mut controls = captured();
        controls.key_down(KeyCode::KeyW);
        controls.key_down(KeyCode::ArrowUp);
        controls.key_up(KeyCode::KeyW);
        assert_eq!(controls.current_intent().forward, 1.0);
        controls.key_up(KeyCode::ArrowUp);
        assert!(controls.current_intent().is_zero());
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let mut controls = captured();
        controls.key_down(KeyCode::KeyQ);
        controls.key_up(KeyCode::KeyW);
        assert!(controls.current_intent().is_zero());
    }

    #[test]
    fn test_mouse_look_only_while_captured() {
        let mut controls = KeyboardMouse::default();
        controls.mouse_moved(Vec2::new(100.0, 0.0), 0.002);
        assert_eq!(controls.take_orientation_delta(), OrientationDelta::default());

        controls.set_captured(true);
        controls.mouse_moved(Vec2::new(100.0, -50.0), 0.002);
        controls.mouse_moved(Vec2::new(50.0, 0.0), 0.002);
        let delta = controls.take_orientation_delta();
        assert!((delta.yaw - 0.3).abs() < 1e-6);
        assert!((delta.pitch - 0.1).abs() < 1e-6);

        // Consumed once
        assert_eq!(controls.take_orientation_delta(), OrientationDelta::default());
    }

    #[test]
    fn test_release_clears_device_state() {
        let mut controls = captured();
        controls.key_down(KeyCode::KeyW);
        controls.request_jump();
        controls.set_captured(false);

        assert!(!controls.movement_enabled());
        assert!(controls.current_intent().is_zero());
        assert!(!controls.take_jump());
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut controls = captured();
        controls.request_jump();
        assert!(controls.take_jump());
        assert!(!controls.take_jump());
    }
}
