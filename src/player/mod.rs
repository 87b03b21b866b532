pub mod collision;
pub mod components;
pub mod config;
pub mod kinematics;
pub mod systems;

use bevy::prelude::*;

pub use components::{Player, PlayerState};
pub use config::MovementConfig;
pub use kinematics::ForwardBasis;

use crate::schedule::SimulationSet;
use systems::{player_movement, sync_camera_transform};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementConfig>().add_systems(
            Update,
            (
                player_movement.in_set(SimulationSet::Step),
                sync_camera_transform.in_set(SimulationSet::Present),
            ),
        );
    }
}
