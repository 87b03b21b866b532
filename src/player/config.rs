//! Movement tuning.
//!
//! Defaults come from the constants in [`super::components`]; any field can be
//! overridden from the settings file.

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{
    COLLISION_MARGIN, DESKTOP_SPEED, DOORWAY_DEPTH, EYE_HEIGHT, GRAVITY, JUMP_VELOCITY,
    MAX_STEP_SECS, MOUSE_SENSITIVITY, PITCH_LIMIT, TOUCH_LOOK_SENSITIVITY, TOUCH_SPEED,
};

/// Configuration for player movement physics and look input.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed with keyboard controls (units/second).
    pub desktop_speed: f32,
    /// Walking speed with the virtual joystick (units/second).
    pub touch_speed: f32,
    /// Downward acceleration while airborne (units/second²).
    pub gravity: f32,
    /// Vertical velocity set by a jump (units/second).
    pub jump_velocity: f32,
    /// Height of the eye above the ground; the floor for the tracked point.
    pub eye_height: f32,
    /// Upper bound on a single step's elapsed time (seconds).
    pub max_step: f32,
    /// Approximate player radius added around each house footprint.
    pub collision_margin: f32,
    /// How far behind the front edge the doorway still lets the player through.
    pub doorway_depth: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Radians per pixel of look-pad drag.
    pub touch_look_sensitivity: f32,
    /// Maximum absolute pitch (radians).
    pub pitch_limit: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            desktop_speed: DESKTOP_SPEED,
            touch_speed: TOUCH_SPEED,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            eye_height: EYE_HEIGHT,
            max_step: MAX_STEP_SECS,
            collision_margin: COLLISION_MARGIN,
            doorway_depth: DOORWAY_DEPTH,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            touch_look_sensitivity: TOUCH_LOOK_SENSITIVITY,
            pitch_limit: PITCH_LIMIT,
        }
    }
}

impl MovementConfig {
    /// Replaces non-finite or non-positive values with their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                warn!("Ignoring invalid movement setting {value}, using {fallback}");
                fallback
            }
        };

        Self {
            desktop_speed: pick(self.desktop_speed, defaults.desktop_speed),
            touch_speed: pick(self.touch_speed, defaults.touch_speed),
            gravity: pick(self.gravity, defaults.gravity),
            jump_velocity: pick(self.jump_velocity, defaults.jump_velocity),
            eye_height: pick(self.eye_height, defaults.eye_height),
            max_step: pick(self.max_step, defaults.max_step),
            collision_margin: pick(self.collision_margin, defaults.collision_margin),
            doorway_depth: pick(self.doorway_depth, defaults.doorway_depth),
            mouse_sensitivity: pick(self.mouse_sensitivity, defaults.mouse_sensitivity),
            touch_look_sensitivity: pick(
                self.touch_look_sensitivity,
                defaults.touch_look_sensitivity,
            ),
            pitch_limit: pick(self.pitch_limit, defaults.pitch_limit)
                .min(std::f32::consts::FRAC_PI_2 - 0.01),
        }
    }
}
