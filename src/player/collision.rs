//! Wall collision against house footprints.
//!
//! The candidate is the full next position (current + whole displacement);
//! axes are not resolved separately, so pushing diagonally into a corner can
//! stop the player even when one axis alone would be free.

use bevy::prelude::*;

use super::config::MovementConfig;
use crate::world::ObstacleRegistry;

/// Tolerances used by [`is_blocked`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRules {
    /// Added around each footprint on all sides.
    pub margin: f32,
    /// Depth behind the front edge that still counts as the doorway.
    pub doorway_depth: f32,
}

impl From<&MovementConfig> for CollisionRules {
    fn from(config: &MovementConfig) -> Self {
        Self {
            margin: config.collision_margin,
            doorway_depth: config.doorway_depth,
        }
    }
}

/// Whether the horizontal position `candidate` (x, z) is inside a wall.
///
/// The first obstacle whose expanded footprint contains the candidate decides
/// the answer; houses never overlap so no other obstacle can disagree.
pub fn is_blocked(candidate: Vec2, registry: &ObstacleRegistry, rules: CollisionRules) -> bool {
    registry
        .iter()
        .find(|obstacle| obstacle.contains_expanded(candidate, rules.margin))
        .is_some_and(|obstacle| !obstacle.in_doorway(candidate, rules.doorway_depth))
}
