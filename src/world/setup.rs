use bevy::prelude::*;

use crate::player::{MovementConfig, Player, PlayerState};
use crate::player::components::{SPAWN_X, SPAWN_Z};

use super::components::{GroundPatch, House, HousePlacement, Water};
use super::obstacles::{Obstacle, ObstacleRegistry, WorldBuildError};
use super::{DOOR_HEIGHT, PATHS, POND, ROOF_OVERHANG, TERRAIN_SIZE, TREES, VILLAGE, WALL_THICKNESS};

/// Validates every placement and collects the ones that fit.
///
/// Rejected houses are reported and left out of the world entirely.
pub fn build_registry(
    placements: &[HousePlacement],
) -> (ObstacleRegistry, Vec<WorldBuildError>) {
    let mut registry = ObstacleRegistry::default();
    let mut rejected = Vec::new();

    for placement in placements {
        let result = Obstacle::house(
            placement.id,
            placement.x,
            placement.z,
            placement.width,
            placement.depth,
            placement.height,
            placement.door_width,
        )
        .and_then(|obstacle| registry.insert(obstacle));

        if let Err(e) = result {
            rejected.push(e);
        }
    }

    (registry, rejected)
}

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<MovementConfig>,
) {
    // Materials
    let grass_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.5, 0.25),
        perceptual_roughness: 1.0,
        ..default()
    });
    let path_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.55, 0.45),
        perceptual_roughness: 1.0,
        ..default()
    });
    let water_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.15, 0.35, 0.6, 0.8),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.1,
        ..default()
    });
    let roof_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.2, 0.15),
        ..default()
    });
    let trunk_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.28, 0.15),
        ..default()
    });
    let leaf_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.15, 0.4, 0.15),
        ..default()
    });

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(TERRAIN_SIZE, TERRAIN_SIZE))),
        MeshMaterial3d(grass_material),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Paths sit just above the grass to avoid z-fighting
    for path in PATHS {
        spawn_ground_patch(&mut commands, &mut meshes, path, path_material.clone(), 0.01);
    }

    let pond = spawn_ground_patch(&mut commands, &mut meshes, &POND, water_material, 0.02);
    commands.entity(pond).insert(Water);

    // Houses
    let (registry, rejected) = build_registry(VILLAGE);
    for e in &rejected {
        warn!("Skipping house: {e}");
    }

    for (obstacle, placement) in registry
        .iter()
        .filter_map(|o| VILLAGE.iter().find(|p| p.id == o.id()).map(|p| (o, p)))
    {
        let wall_material = materials.add(StandardMaterial {
            base_color: placement.wall_color,
            ..default()
        });
        spawn_house(
            &mut commands,
            &mut meshes,
            obstacle,
            wall_material,
            roof_material.clone(),
        );
    }
    info!("Village built with {} houses", registry.len());
    commands.insert_resource(registry);

    // Trees
    let trunk_mesh = meshes.add(Cylinder::new(0.2, 2.0));
    let canopy_mesh = meshes.add(Cone {
        radius: 1.2,
        height: 3.0,
    });
    for tree in TREES {
        commands
            .spawn((
                Transform::from_xyz(tree.x, 0.0, tree.y),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 1.0, 0.0),
                ));
                parent.spawn((
                    Mesh3d(canopy_mesh.clone()),
                    MeshMaterial3d(leaf_material.clone()),
                    Transform::from_xyz(0.0, 3.5, 0.0),
                ));
            });
    }

    // Player (Camera)
    let state = PlayerState::spawn_at(SPAWN_X, SPAWN_Z, config.eye_height, 0.0);
    commands.spawn((
        Player,
        state,
        Camera3d::default(),
        Transform::from_translation(state.position).with_rotation(state.rotation()),
    ));
}

fn spawn_ground_patch(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    patch: &GroundPatch,
    material: Handle<StandardMaterial>,
    lift: f32,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(patch.size.x, patch.size.y))),
            MeshMaterial3d(material),
            Transform::from_xyz(patch.center.x, lift, patch.center.y),
        ))
        .id()
}

/// Spawns four walls and a roof for `obstacle`, leaving the doorway open.
fn spawn_house(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    obstacle: &Obstacle,
    wall_material: Handle<StandardMaterial>,
    roof_material: Handle<StandardMaterial>,
) {
    let center = obstacle.center();
    let size = obstacle.size();
    let height = obstacle.height();
    let half = size / 2.0;
    let (door_start, door_end) = obstacle.door_span();

    // Wall pieces as (centre relative to house, dimensions)
    let mut pieces = vec![
        // Back
        (
            Vec3::new(0.0, height / 2.0, -half.y + WALL_THICKNESS / 2.0),
            Vec3::new(size.x, height, WALL_THICKNESS),
        ),
        // Left
        (
            Vec3::new(-half.x + WALL_THICKNESS / 2.0, height / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, height, size.y),
        ),
        // Right
        (
            Vec3::new(half.x - WALL_THICKNESS / 2.0, height / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, height, size.y),
        ),
    ];

    // Front wall is split around the doorway
    let front_z = half.y - WALL_THICKNESS / 2.0;
    let left_width = door_start - obstacle.min().x;
    let right_width = obstacle.max().x - door_end;
    pieces.push((
        Vec3::new(-half.x + left_width / 2.0, height / 2.0, front_z),
        Vec3::new(left_width, height, WALL_THICKNESS),
    ));
    pieces.push((
        Vec3::new(half.x - right_width / 2.0, height / 2.0, front_z),
        Vec3::new(right_width, height, WALL_THICKNESS),
    ));
    let lintel_height = height - DOOR_HEIGHT;
    if lintel_height > 0.0 {
        pieces.push((
            Vec3::new(
                (door_start + door_end) / 2.0 - center.x,
                DOOR_HEIGHT + lintel_height / 2.0,
                front_z,
            ),
            Vec3::new(door_end - door_start, lintel_height, WALL_THICKNESS),
        ));
    }

    commands
        .spawn((
            House(obstacle.id()),
            Transform::from_xyz(center.x, 0.0, center.y),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (offset, dimensions) in pieces {
                parent.spawn((
                    Mesh3d(meshes.add(Cuboid::new(dimensions.x, dimensions.y, dimensions.z))),
                    MeshMaterial3d(wall_material.clone()),
                    Transform::from_translation(offset),
                ));
            }

            // Roof
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(
                    size.x + ROOF_OVERHANG * 2.0,
                    0.25,
                    size.y + ROOF_OVERHANG * 2.0,
                ))),
                MeshMaterial3d(roof_material),
                Transform::from_xyz(0.0, height + 0.125, 0.0),
            ));
        });
}
