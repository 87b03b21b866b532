pub mod components;
pub mod styles;
pub mod systems;

use bevy::prelude::*;

use crate::input::{desktop_controls, touch_controls};
use crate::schedule::SimulationSet;
use systems::*;

/// On-screen controls: lighting buttons, joystick or crosshair.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(
                Update,
                (
                    button_interaction,
                    handle_day_night_click,
                    handle_flashlight_click,
                    handle_jump_click.run_if(touch_controls),
                )
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (
                    update_joystick_knob.run_if(touch_controls),
                    update_capture_indicators.run_if(desktop_controls),
                )
                    .in_set(SimulationSet::Present),
            );
    }
}
