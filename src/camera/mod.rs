pub mod systems;

use bevy::prelude::*;

use crate::input::desktop_controls;
use crate::schedule::SimulationSet;
use systems::{capture_pointer_on_click, center_cursor, release_pointer};

/// Pointer capture for mouse look. Only active with desktop controls.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (release_pointer, capture_pointer_on_click)
                    .chain()
                    .in_set(SimulationSet::Input),
                center_cursor.in_set(SimulationSet::Present),
            )
                .run_if(desktop_controls),
        );
    }
}
