//! Horizontal and vertical integration of the player.

use bevy::prelude::*;

use super::components::PlayerState;
use super::config::MovementConfig;
use crate::input::{MovementIntent, OrientationDelta};

/// How a control scheme derives "forward" on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardBasis {
    /// Straight from the yaw angle.
    Yaw,
    /// From the camera look direction with its vertical component dropped.
    LookDirection,
}

/// Clamps raw frame time. Returns `None` when the step must be skipped.
pub fn clamp_step(raw_secs: f32, max_step: f32) -> Option<f32> {
    if raw_secs.is_finite() && raw_secs > 0.0 {
        Some(raw_secs.min(max_step))
    } else {
        None
    }
}

/// Applies a look delta, keeping pitch within `±pitch_limit`.
pub fn apply_orientation(state: &mut PlayerState, delta: OrientationDelta, pitch_limit: f32) {
    if delta.yaw.is_finite() {
        state.yaw = (state.yaw + delta.yaw).rem_euclid(std::f32::consts::TAU);
    }
    if delta.pitch.is_finite() {
        state.pitch = (state.pitch + delta.pitch).clamp(-pitch_limit, pitch_limit);
    }
}

/// Unit forward vector on the ground plane for a heading.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

/// Projects a look direction onto the ground plane. `None` when looking
/// straight up or down.
pub fn forward_from_look(look: Vec3) -> Option<Vec3> {
    Vec3::new(look.x, 0.0, look.z).try_normalize()
}

/// Horizontal forward vector for `state` under the given basis.
pub fn ground_forward(state: &PlayerState, basis: ForwardBasis) -> Vec3 {
    match basis {
        ForwardBasis::Yaw => forward_from_yaw(state.yaw),
        ForwardBasis::LookDirection => forward_from_look(state.look_direction())
            .unwrap_or_else(|| forward_from_yaw(state.yaw)),
    }
}

/// Horizontal displacement `(dx, dz)` for one step.
///
/// Any nonzero intent moves at full `speed`; the direction is normalised
/// before scaling.
pub fn horizontal_displacement(
    intent: MovementIntent,
    forward: Vec3,
    speed: f32,
    dt: f32,
) -> Vec2 {
    if dt <= 0.0 {
        return Vec2::ZERO;
    }

    // forward x up
    let right = Vec3::new(-forward.z, 0.0, forward.x);
    let velocity = forward * intent.forward + right * intent.strafe;
    let flat = Vec2::new(velocity.x, velocity.z);

    match flat.try_normalize() {
        Some(direction) => direction * speed * dt,
        None => Vec2::ZERO,
    }
}

/// Starts a jump if standing on the floor. Returns whether it started.
pub fn request_jump(state: &mut PlayerState, config: &MovementConfig) -> bool {
    if !state.grounded {
        return false;
    }
    state.vertical_velocity = config.jump_velocity;
    state.grounded = false;
    true
}

/// Integrates gravity and vertical position for one step.
///
/// Runs whenever the player is airborne, above the floor, or moving upward,
/// so a jump requested this step lifts off immediately.
pub fn integrate_vertical(state: &mut PlayerState, dt: f32, config: &MovementConfig) {
    if dt <= 0.0 {
        return;
    }

    let floor = config.eye_height;
    let active = !state.grounded || state.vertical_velocity > 0.0 || state.position.y > floor;
    if !active {
        return;
    }

    state.vertical_velocity -= config.gravity * dt;
    state.position.y += state.vertical_velocity * dt;

    if state.position.y <= floor {
        state.position.y = floor;
        state.vertical_velocity = 0.0;
        state.grounded = true;
    } else {
        state.grounded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn config() -> MovementConfig {
        MovementConfig::default()
    }

    fn grounded() -> PlayerState {
        PlayerState::spawn_at(0.0, 0.0, config().eye_height, 0.0)
    }

    #[test]
    fn test_clamp_step() {
        assert_eq!(clamp_step(0.016, 0.05), Some(0.016));
        assert_eq!(clamp_step(0.5, 0.05), Some(0.05));
        assert_eq!(clamp_step(0.0, 0.05), None);
        assert_eq!(clamp_step(-0.1, 0.05), None);
        assert_eq!(clamp_step(f32::NAN, 0.05), None);
    }

    #[test]
    fn test_forward_from_yaw() {
        let north = forward_from_yaw(0.0);
        assert!((north - Vec3::NEG_Z).length() < 1e-6);

        let east = forward_from_yaw(FRAC_PI_2);
        assert!((east - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_look_basis_ignores_pitch() {
        let mut state = grounded();
        state.yaw = 0.7;
        state.pitch = 1.2;
        let from_look = ground_forward(&state, ForwardBasis::LookDirection);
        let from_yaw = ground_forward(&state, ForwardBasis::Yaw);
        assert!((from_look - from_yaw).length() < 1e-5);
        assert_eq!(from_look.y, 0.0);
    }

    #[test]
    fn test_look_basis_falls_back_when_vertical() {
        assert_eq!(forward_from_look(Vec3::Y), None);
        let mut state = grounded();
        state.pitch = FRAC_PI_2;
        let forward = ground_forward(&state, ForwardBasis::LookDirection);
        assert!((forward.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_strafe_right_is_perpendicular() {
        let intent = MovementIntent::new(1.0, 0.0);
        let step = horizontal_displacement(intent, Vec3::NEG_Z, 6.0, 1.0);
        assert!((step - Vec2::new(6.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let intent = MovementIntent::new(1.0, 1.0);
        let step = horizontal_displacement(intent, Vec3::NEG_Z, 6.0, 0.05);
        assert!((step.length() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_zero_intent_or_step_does_not_move() {
        assert_eq!(
            horizontal_displacement(MovementIntent::ZERO, Vec3::NEG_Z, 6.0, 0.05),
            Vec2::ZERO
        );
        let intent = MovementIntent::new(0.0, 1.0);
        assert_eq!(horizontal_displacement(intent, Vec3::NEG_Z, 6.0, 0.0), Vec2::ZERO);
        assert_eq!(horizontal_displacement(intent, Vec3::NEG_Z, 6.0, -1.0), Vec2::ZERO);
    }

    #[test]
    fn test_displacement_bounded_for_all_headings() {
        let config = config();
        let speed = config.desktop_speed.max(config.touch_speed);
        let bound = speed * config.max_step + 1e-5;

        for step in 0..32 {
            let yaw = step as f32 / 32.0 * 2.0 * PI;
            for (strafe, forward) in [(0.0, 1.0), (1.0, 1.0), (-0.3, 0.2), (0.7, -0.7)] {
                let intent = MovementIntent::new(strafe, forward);
                let d = horizontal_displacement(
                    intent,
                    forward_from_yaw(yaw),
                    speed,
                    config.max_step,
                );
                assert!(d.length() <= bound);
            }
        }
    }

    #[test]
    fn test_jump_sets_exact_impulse() {
        let config = config();
        let mut state = grounded();

        assert!(request_jump(&mut state, &config));
        assert_eq!(state.vertical_velocity, config.jump_velocity);
        assert!(!state.grounded);

        // Lifts off on the same step
        integrate_vertical(&mut state, 0.016, &config);
        assert!(state.position.y > config.eye_height);
        assert!(!state.grounded);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let config = config();
        let mut state = grounded();
        request_jump(&mut state, &config);
        integrate_vertical(&mut state, 0.016, &config);

        let velocity = state.vertical_velocity;
        assert!(!request_jump(&mut state, &config));
        assert_eq!(state.vertical_velocity, velocity);
    }

    #[test]
    fn test_fall_converges_without_undershoot() {
        let config = config();
        let mut state = grounded();
        state.position.y = 10.0;
        state.grounded = false;

        let mut landed = false;
        for _ in 0..200 {
            integrate_vertical(&mut state, config.max_step, &config);
            assert!(state.position.y >= config.eye_height);
            if state.grounded {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(state.position.y, config.eye_height);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_grounded_step_is_noop() {
        let config = config();
        let mut state = grounded();
        let before = state;
        integrate_vertical(&mut state, 0.016, &config);
        assert_eq!(state, before);
    }

    #[test]
    fn test_full_jump_returns_to_floor() {
        let config = config();
        let mut state = grounded();
        request_jump(&mut state, &config);

        let mut peak = state.position.y;
        for _ in 0..100 {
            integrate_vertical(&mut state, 0.016, &config);
            peak = peak.max(state.position.y);
            if state.grounded {
                break;
            }
        }

        assert!(state.grounded);
        assert!(peak > config.eye_height + 1.0);
        assert!(state.vertical_velocity <= 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut state = grounded();
        let limit = 0.48 * PI;
        apply_orientation(&mut state, OrientationDelta::new(0.0, 10.0), limit);
        assert_eq!(state.pitch, limit);
        apply_orientation(&mut state, OrientationDelta::new(0.0, -20.0), limit);
        assert_eq!(state.pitch, -limit);
    }

    #[test]
    fn test_orientation_ignores_nan() {
        let mut state = grounded();
        apply_orientation(&mut state, OrientationDelta::new(f32::NAN, f32::NAN), 1.0);
        assert_eq!(state.yaw, 0.0);
        assert_eq!(state.pitch, 0.0);
    }
}
