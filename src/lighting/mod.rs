pub mod systems;

use bevy::prelude::*;

use crate::schedule::SimulationSet;
use systems::{
    apply_lighting, apply_lighting_toggles, attach_flashlight, read_lighting_keys, setup_lighting,
};

/// Marker for the directional sun light.
#[derive(Component)]
pub struct Sun;

/// Marker for the spot light carried by the player.
#[derive(Component)]
pub struct Flashlight;

/// Request to flip one of the lighting switches.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingToggle {
    DayNight,
    Flashlight,
}

/// Current lighting switches. Independent of movement.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightingState {
    pub night: bool,
    pub flashlight: bool,
}

impl LightingState {
    pub fn toggle(&mut self, toggle: LightingToggle) {
        match toggle {
            LightingToggle::DayNight => self.night = !self.night,
            LightingToggle::Flashlight => self.flashlight = !self.flashlight,
        }
    }

    pub fn preset(&self) -> LightingPreset {
        if self.night {
            LightingPreset::NIGHT
        } else {
            LightingPreset::DAY
        }
    }
}

/// Scene-wide light levels for day or night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPreset {
    pub sun_illuminance: f32,
    pub sun_color: Color,
    pub ambient_brightness: f32,
    pub sky: Color,
}

impl LightingPreset {
    pub const DAY: Self = Self {
        sun_illuminance: 10_000.0,
        sun_color: Color::srgb(1.0, 0.97, 0.9),
        ambient_brightness: 400.0,
        sky: Color::srgb(0.53, 0.75, 0.92),
    };

    pub const NIGHT: Self = Self {
        sun_illuminance: 50.0,
        sun_color: Color::srgb(0.6, 0.65, 0.9),
        ambient_brightness: 20.0,
        sky: Color::srgb(0.02, 0.03, 0.08),
    };
}

// Flashlight constants
pub const FLASHLIGHT_INTENSITY: f32 = 2_000_000.0;
pub const FLASHLIGHT_RANGE: f32 = 30.0;
pub const FLASHLIGHT_ANGLE: f32 = 0.45;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightingState>()
            .add_event::<LightingToggle>()
            .add_systems(Startup, setup_lighting)
            .add_systems(
                Update,
                (
                    read_lighting_keys.in_set(SimulationSet::Input),
                    (attach_flashlight, apply_lighting_toggles, apply_lighting)
                        .chain()
                        .in_set(SimulationSet::Present),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_are_independent() {
        let mut state = LightingState::default();
        state.toggle(LightingToggle::DayNight);
        assert!(state.night);
        assert!(!state.flashlight);

        state.toggle(LightingToggle::Flashlight);
        state.toggle(LightingToggle::DayNight);
        assert_eq!(
            state,
            LightingState {
                night: false,
                flashlight: true
            }
        );
    }

    #[test]
    fn test_night_is_darker() {
        let night = LightingState {
            night: true,
            flashlight: false,
        };
        assert_eq!(night.preset(), LightingPreset::NIGHT);
        assert!(LightingPreset::NIGHT.sun_illuminance < LightingPreset::DAY.sun_illuminance);
    }
}
