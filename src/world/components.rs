use bevy::prelude::*;

use super::obstacles::ObstacleId;

/// Root entity of a house; its walls and roof are children.
#[derive(Component)]
pub struct House(pub ObstacleId);

/// Marker for the pond surface.
#[derive(Component)]
pub struct Water;

/// Placement of a house in the village layout.
#[derive(Debug, Clone, Copy)]
pub struct HousePlacement {
    pub id: ObstacleId,
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub door_width: f32,
    pub wall_color: Color,
}

/// A ground-level rectangle (path or water), centre and size in (x, z).
#[derive(Debug, Clone, Copy)]
pub struct GroundPatch {
    pub center: Vec2,
    pub size: Vec2,
}
