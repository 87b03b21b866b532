//! Static obstacle footprints used by collision.
//!
//! Every house is a solid rectangle on the ground plane with one doorway cut
//! into its front (max-z) edge. Geometry is validated here, when the world is
//! built, so collision queries can assume well-formed input.

use bevy::prelude::*;
use thiserror::Error;

/// Identifier of an obstacle in the registry.
pub type ObstacleId = u32;

/// Reasons an obstacle is rejected at world-build time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldBuildError {
    #[error("obstacle {id}: geometry contains a non-finite value")]
    NonFinite { id: ObstacleId },

    #[error("obstacle {id}: width, depth and height must be positive (got {width} x {depth} x {height})")]
    NonPositiveSize {
        id: ObstacleId,
        width: f32,
        depth: f32,
        height: f32,
    },

    #[error("obstacle {id}: door width {door_width} must be positive and narrower than the footprint width {width}")]
    DoorwayTooWide {
        id: ObstacleId,
        door_width: f32,
        width: f32,
    },

    #[error("obstacle {id}: footprint overlaps obstacle {other}")]
    Overlap { id: ObstacleId, other: ObstacleId },

    #[error("obstacle {id} is already registered")]
    DuplicateId { id: ObstacleId },
}

/// A house footprint with a doorway on its front edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    id: ObstacleId,
    /// Footprint corner with the smallest (x, z).
    min: Vec2,
    /// Footprint corner with the largest (x, z). `max.y` is the front edge.
    max: Vec2,
    door_width: f32,
    height: f32,
}

impl Obstacle {
    /// Builds a house centred on `(center_x, center_z)`.
    pub fn house(
        id: ObstacleId,
        center_x: f32,
        center_z: f32,
        width: f32,
        depth: f32,
        height: f32,
        door_width: f32,
    ) -> Result<Self, WorldBuildError> {
        let values = [center_x, center_z, width, depth, height, door_width];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(WorldBuildError::NonFinite { id });
        }
        if width <= 0.0 || depth <= 0.0 || height <= 0.0 {
            return Err(WorldBuildError::NonPositiveSize {
                id,
                width,
                depth,
                height,
            });
        }
        if door_width <= 0.0 || door_width >= width {
            return Err(WorldBuildError::DoorwayTooWide {
                id,
                door_width,
                width,
            });
        }

        let half = Vec2::new(width / 2.0, depth / 2.0);
        let center = Vec2::new(center_x, center_z);
        Ok(Self {
            id,
            min: center - half,
            max: center + half,
            door_width,
            height,
        })
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn door_width(&self) -> f32 {
        self.door_width
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// z coordinate of the front edge, where the doorway sits.
    pub fn front_z(&self) -> f32 {
        self.max.y
    }

    /// The x-interval `(start, end)` of the doorway.
    pub fn door_span(&self) -> (f32, f32) {
        let center_x = self.center().x;
        let half = self.door_width / 2.0;
        (center_x - half, center_x + half)
    }

    /// Whether `point` lies inside the footprint grown by `margin` on every side.
    pub fn contains_expanded(&self, point: Vec2, margin: f32) -> bool {
        point.x >= self.min.x - margin
            && point.x <= self.max.x + margin
            && point.y >= self.min.y - margin
            && point.y <= self.max.y + margin
    }

    /// Whether `point` stands in the doorway: inside the door span and no
    /// further than `depth` behind the front edge.
    pub fn in_doorway(&self, point: Vec2, depth: f32) -> bool {
        let (start, end) = self.door_span();
        point.x >= start && point.x <= end && point.y >= self.front_z() - depth
    }

    fn overlaps(&self, other: &Obstacle) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Resource holding every obstacle in the world. Filled once at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    /// Adds an obstacle, rejecting duplicates and overlapping footprints.
    pub fn insert(&mut self, obstacle: Obstacle) -> Result<(), WorldBuildError> {
        for existing in &self.obstacles {
            if existing.id == obstacle.id {
                return Err(WorldBuildError::DuplicateId { id: obstacle.id });
            }
            if existing.overlaps(&obstacle) {
                return Err(WorldBuildError::Overlap {
                    id: obstacle.id,
                    other: existing.id,
                });
            }
        }
        self.obstacles.push(obstacle);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house_at(id: ObstacleId, x: f32, z: f32) -> Obstacle {
        Obstacle::house(id, x, z, 4.0, 4.0, 3.0, 1.6).unwrap()
    }

    #[test]
    fn test_house_footprint() {
        let house = house_at(1, 10.0, 12.0);
        assert_eq!(house.min(), Vec2::new(8.0, 10.0));
        assert_eq!(house.max(), Vec2::new(12.0, 14.0));
        assert_eq!(house.front_z(), 14.0);

        let (start, end) = house.door_span();
        assert!((start - 9.2).abs() < 1e-5);
        assert!((end - 10.8).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_door_as_wide_as_house() {
        let err = Obstacle::house(1, 0.0, 0.0, 4.0, 4.0, 3.0, 4.0).unwrap_err();
        assert!(matches!(err, WorldBuildError::DoorwayTooWide { .. }));

        let err = Obstacle::house(1, 0.0, 0.0, 4.0, 4.0, 3.0, 0.0).unwrap_err();
        assert!(matches!(err, WorldBuildError::DoorwayTooWide { .. }));
    }

    #[test]
    fn test_rejects_degenerate_size() {
        let err = Obstacle::house(1, 0.0, 0.0, 4.0, -1.0, 3.0, 1.0).unwrap_err();
        assert!(matches!(err, WorldBuildError::NonPositiveSize { .. }));

        let err = Obstacle::house(1, 0.0, 0.0, 4.0, 4.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, WorldBuildError::NonPositiveSize { .. }));
    }

    #[test]
    fn test_rejects_nan() {
        let err = Obstacle::house(1, f32::NAN, 0.0, 4.0, 4.0, 3.0, 1.0).unwrap_err();
        assert_eq!(err, WorldBuildError::NonFinite { id: 1 });
    }

    #[test]
    fn test_registry_rejects_overlap_and_duplicates() {
        let mut registry = ObstacleRegistry::default();
        registry.insert(house_at(1, 0.0, 0.0)).unwrap();

        assert_eq!(
            registry.insert(house_at(2, 1.0, 1.0)),
            Err(WorldBuildError::Overlap { id: 2, other: 1 })
        );
        assert_eq!(
            registry.insert(house_at(1, 50.0, 50.0)),
            Err(WorldBuildError::DuplicateId { id: 1 })
        );

        // Touching edges do not overlap
        registry.insert(house_at(3, 4.0, 0.0)).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get(3).is_some());
    }

    #[test]
    fn test_doorway_only_on_front_edge() {
        let house = house_at(1, 10.0, 12.0);
        assert!(house.in_doorway(Vec2::new(10.0, 14.1), 0.5));
        assert!(house.in_doorway(Vec2::new(10.0, 13.6), 0.5));
        // Same x on the back edge is not a door
        assert!(!house.in_doorway(Vec2::new(10.0, 10.0), 0.5));
        // Outside the span
        assert!(!house.in_doorway(Vec2::new(11.5, 14.1), 0.5));
    }
}
