use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Authoritative movement state of the player.
///
/// The tracked point is the eye, not the feet, so `position.y` rests at
/// [`EYE_HEIGHT`] when standing on the ground.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Heading in radians, increasing when turning right. Zero faces -Z.
    pub yaw: f32,
    /// Positive looks up.
    pub pitch: f32,
}

impl PlayerState {
    /// A player standing on the floor at `(x, z)` with zero velocity.
    pub fn spawn_at(x: f32, z: f32, floor_height: f32, yaw: f32) -> Self {
        Self {
            position: Vec3::new(x, floor_height, z),
            vertical_velocity: 0.0,
            grounded: true,
            yaw,
            pitch: 0.0,
        }
    }

    /// Horizontal position as `(x, z)`.
    pub fn horizontal(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Camera rotation for the current yaw and pitch.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, -self.yaw, self.pitch, 0.0)
    }

    /// Direction the camera is looking, including vertical tilt.
    pub fn look_direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::spawn_at(SPAWN_X, SPAWN_Z, EYE_HEIGHT, 0.0)
    }
}

// Player physics constants
pub const DESKTOP_SPEED: f32 = 6.0;
pub const TOUCH_SPEED: f32 = 6.5;
pub const JUMP_VELOCITY: f32 = 6.0;
pub const GRAVITY: f32 = 15.0;
pub const EYE_HEIGHT: f32 = 1.6;
pub const MAX_STEP_SECS: f32 = 0.05;

// Collision constants
pub const COLLISION_MARGIN: f32 = 0.3;
pub const DOORWAY_DEPTH: f32 = 0.5;

// Look constants
pub const MOUSE_SENSITIVITY: f32 = 0.002;
pub const TOUCH_LOOK_SENSITIVITY: f32 = 0.005;
pub const PITCH_LIMIT: f32 = 0.48 * std::f32::consts::PI;

// Spawn point, south of the village looking north (-Z)
pub const SPAWN_X: f32 = 0.0;
pub const SPAWN_Z: f32 = 22.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_grounded_at_eye_height() {
        let state = PlayerState::default();
        assert!(state.grounded);
        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(state.position.y, EYE_HEIGHT);
    }

    #[test]
    fn test_positive_yaw_looks_right() {
        let state = PlayerState {
            yaw: std::f32::consts::FRAC_PI_2,
            ..PlayerState::default()
        };
        let look = state.look_direction();
        assert!((look.x - 1.0).abs() < 1e-5);
        assert!(look.z.abs() < 1e-5);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let state = PlayerState {
            pitch: 0.3,
            ..PlayerState::default()
        };
        assert!(state.look_direction().y > 0.0);
    }
}
