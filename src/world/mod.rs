pub mod components;
pub mod obstacles;
pub mod setup;

use bevy::prelude::*;

pub use obstacles::{Obstacle, ObstacleRegistry};

use components::{GroundPatch, HousePlacement};

use setup::setup_world;

// Terrain dimensions
pub const TERRAIN_SIZE: f32 = 120.0;
pub const WALL_THICKNESS: f32 = 0.2;
pub const DOOR_HEIGHT: f32 = 2.2;
pub const ROOF_OVERHANG: f32 = 0.3;

/// Houses of the village. Every front door faces +Z, toward the spawn point.
pub const VILLAGE: &[HousePlacement] = &[
    HousePlacement {
        id: 1,
        x: 10.0,
        z: 12.0,
        width: 4.0,
        depth: 4.0,
        height: 3.0,
        door_width: 1.6,
        wall_color: Color::srgb(0.85, 0.78, 0.65),
    },
    HousePlacement {
        id: 2,
        x: -10.0,
        z: 6.0,
        width: 6.0,
        depth: 5.0,
        height: 3.5,
        door_width: 1.6,
        wall_color: Color::srgb(0.75, 0.55, 0.45),
    },
    HousePlacement {
        id: 3,
        x: -12.0,
        z: -12.0,
        width: 5.0,
        depth: 5.0,
        height: 3.0,
        door_width: 1.4,
        wall_color: Color::srgb(0.8, 0.8, 0.75),
    },
    HousePlacement {
        id: 4,
        x: 12.0,
        z: -8.0,
        width: 5.0,
        depth: 4.0,
        height: 3.2,
        door_width: 1.6,
        wall_color: Color::srgb(0.65, 0.7, 0.8),
    },
];

/// Tree positions (x, z). Trees are scenery and don't block movement.
pub const TREES: &[Vec2] = &[
    Vec2::new(-4.0, 14.0),
    Vec2::new(5.0, 4.0),
    Vec2::new(-20.0, 0.0),
    Vec2::new(20.0, 6.0),
    Vec2::new(0.0, -18.0),
    Vec2::new(-6.0, -22.0),
    Vec2::new(22.0, -20.0),
    Vec2::new(-24.0, 18.0),
];

/// Gravel paths from the spawn point into the village.
pub const PATHS: &[GroundPatch] = &[
    GroundPatch {
        center: Vec2::new(0.0, 6.0),
        size: Vec2::new(2.0, 36.0),
    },
    GroundPatch {
        center: Vec2::new(0.0, 2.0),
        size: Vec2::new(30.0, 2.0),
    },
];

pub const POND: GroundPatch = GroundPatch {
    center: Vec2::new(-24.0, -24.0),
    size: Vec2::new(14.0, 10.0),
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObstacleRegistry>()
            .add_systems(Startup, setup_world);
    }
}
