use bevy::prelude::*;

use super::collision::{is_blocked, CollisionRules};
use super::components::{Player, PlayerState};
use super::config::MovementConfig;
use super::kinematics::{
    apply_orientation, clamp_step, ground_forward, horizontal_displacement, integrate_vertical,
    request_jump,
};
use crate::input::{InputMapper, InputSource};
use crate::world::ObstacleRegistry;

/// Advances the player by one step.
///
/// Order: look first so movement uses the new facing, then the horizontal
/// candidate gated by collision, then gravity and jumping.
pub fn advance_player(
    state: &mut PlayerState,
    input: &mut dyn InputSource,
    dt: f32,
    config: &MovementConfig,
    registry: &ObstacleRegistry,
) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    let look = input.take_orientation_delta();
    apply_orientation(state, look, config.pitch_limit);

    if input.movement_enabled() {
        let forward = ground_forward(state, input.forward_basis());
        let step = horizontal_displacement(
            input.current_intent(),
            forward,
            input.move_speed(config),
            dt,
        );

        if step != Vec2::ZERO {
            let candidate = state.horizontal() + step;
            if !is_blocked(candidate, registry, CollisionRules::from(config)) {
                state.position.x = candidate.x;
                state.position.z = candidate.y;
            }
        }
    }

    if input.take_jump() && request_jump(state, config) {
        debug!("Jump from y={:.2}", state.position.y);
    }
    integrate_vertical(state, dt, config);
}

pub fn player_movement(
    time: Res<Time>,
    config: Res<MovementConfig>,
    registry: Res<ObstacleRegistry>,
    mut mapper: ResMut<InputMapper>,
    mut query: Query<&mut PlayerState, With<Player>>,
) {
    let Ok(mut state) = query.get_single_mut() else {
        return;
    };

    // Long frames are clamped so a hitch can't tunnel through walls
    let Some(dt) = clamp_step(time.delta_secs(), config.max_step) else {
        return;
    };

    advance_player(&mut state, &mut *mapper, dt, &config, &registry);
}

/// Places the camera at the player's eye.
pub fn sync_camera_transform(
    mut query: Query<(&PlayerState, &mut Transform), (With<Player>, Changed<PlayerState>)>,
) {
    for (state, mut transform) in query.iter_mut() {
        transform.translation = state.position;
        transform.rotation = state.rotation();
    }
}
