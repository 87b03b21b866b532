use bevy::prelude::*;

use super::{
    Flashlight, LightingState, LightingToggle, Sun, FLASHLIGHT_ANGLE, FLASHLIGHT_INTENSITY,
    FLASHLIGHT_RANGE,
};
use crate::player::Player;

pub fn setup_lighting(mut commands: Commands, state: Res<LightingState>) {
    let preset = state.preset();

    commands.spawn((
        Sun,
        DirectionalLight {
            illuminance: preset.sun_illuminance,
            color: preset.sun_color,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30.0, 50.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: preset.ambient_brightness,
    });
    commands.insert_resource(ClearColor(preset.sky));
}

/// Gives a newly spawned player a flashlight, switched off.
pub fn attach_flashlight(
    mut commands: Commands,
    players: Query<Entity, Added<Player>>,
    state: Res<LightingState>,
) {
    for player in players.iter() {
        let visibility = if state.flashlight {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        commands.entity(player).insert(Visibility::default()).with_children(|parent| {
            parent.spawn((
                Flashlight,
                SpotLight {
                    intensity: FLASHLIGHT_INTENSITY,
                    range: FLASHLIGHT_RANGE,
                    color: Color::srgb(1.0, 0.95, 0.8),
                    inner_angle: FLASHLIGHT_ANGLE * 0.6,
                    outer_angle: FLASHLIGHT_ANGLE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::default(),
                visibility,
            ));
        });
        debug!("Flashlight attached to {:?}", player);
    }
}

pub fn read_lighting_keys(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut toggles: EventWriter<LightingToggle>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyN) {
        toggles.send(LightingToggle::DayNight);
    }
    if keyboard_input.just_pressed(KeyCode::KeyF) {
        toggles.send(LightingToggle::Flashlight);
    }
}

pub fn apply_lighting_toggles(
    mut toggles: EventReader<LightingToggle>,
    mut state: ResMut<LightingState>,
) {
    for toggle in toggles.read() {
        state.toggle(*toggle);
        info!(
            "Lighting: {} {}",
            if state.night { "night" } else { "day" },
            if state.flashlight {
                "with flashlight"
            } else {
                "without flashlight"
            }
        );
    }
}

pub fn apply_lighting(
    state: Res<LightingState>,
    mut suns: Query<&mut DirectionalLight, With<Sun>>,
    mut flashlights: Query<&mut Visibility, With<Flashlight>>,
    mut ambient: ResMut<AmbientLight>,
    mut clear_color: ResMut<ClearColor>,
) {
    if !state.is_changed() {
        return;
    }

    let preset = state.preset();
    for mut sun in suns.iter_mut() {
        sun.illuminance = preset.sun_illuminance;
        sun.color = preset.sun_color;
    }
    ambient.brightness = preset.ambient_brightness;
    clear_color.0 = preset.sky;

    for mut visibility in flashlights.iter_mut() {
        *visibility = if state.flashlight {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
