use bevy::prelude::*;

use super::components::*;
use super::styles::*;
use crate::input::{ControlScheme, InputMapper};
use crate::lighting::LightingToggle;

pub fn setup_hud(mut commands: Commands, mapper: Res<InputMapper>) {
    let scheme = mapper.scheme();

    // Button bar along the top edge
    commands
        .spawn((HudBar, bar_style()))
        .with_children(|parent| {
            spawn_button(parent, DayNightButton, "Day / Night");
            spawn_button(parent, FlashlightButton, "Flashlight");
            if scheme == ControlScheme::Touch {
                spawn_button(parent, JumpButton, "Jump");
            }
        });

    match scheme {
        ControlScheme::Touch => spawn_joystick(&mut commands, &mapper),
        ControlScheme::Desktop => spawn_crosshair(&mut commands),
    }
}

fn spawn_button(parent: &mut ChildBuilder, marker: impl Component, label: &str) {
    parent
        .spawn((marker, Button, button_style(), BackgroundColor(NORMAL_BUTTON)))
        .with_children(|parent| {
            parent.spawn((
                Text::new(label),
                button_text_style(),
                TextColor(BUTTON_TEXT_COLOR),
            ));
        });
}

fn spawn_joystick(commands: &mut Commands, mapper: &InputMapper) {
    let Some(controls) = mapper.touch() else {
        return;
    };
    let layout = controls.layout;
    let diameter = layout.joystick_radius * 2.0;

    commands
        .spawn((
            JoystickBase,
            Node {
                width: Val::Px(diameter),
                height: Val::Px(diameter),
                position_type: PositionType::Absolute,
                left: Val::Px(layout.joystick_margin),
                bottom: Val::Px(layout.joystick_margin),
                ..default()
            },
            BackgroundColor(JOYSTICK_BASE_COLOR),
            BorderRadius::MAX,
        ))
        .with_children(|parent| {
            let (left, top) = knob_position(layout.joystick_radius, Vec2::ZERO);
            parent.spawn((
                JoystickKnob,
                Node {
                    width: Val::Px(JOYSTICK_KNOB_SIZE),
                    height: Val::Px(JOYSTICK_KNOB_SIZE),
                    position_type: PositionType::Absolute,
                    left: Val::Px(left),
                    top: Val::Px(top),
                    ..default()
                },
                BackgroundColor(JOYSTICK_KNOB_COLOR),
                BorderRadius::MAX,
            ));
        });
}

/// Knob `(left, top)` inside the base for a drag offset from its centre.
fn knob_position(radius: f32, offset: Vec2) -> (f32, f32) {
    let corner = radius - JOYSTICK_KNOB_SIZE / 2.0;
    (corner + offset.x, corner + offset.y)
}

fn spawn_crosshair(commands: &mut Commands) {
    // Crosshair container (centered on screen)
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            // Crosshair dot
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
            ));
        });

    commands.spawn((
        CapturePrompt,
        Text::new("Click to look around. WASD to move, Space to jump, Esc to release."),
        button_text_style(),
        TextColor(BUTTON_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Px(24.0),
            ..default()
        },
    ));
}

pub fn button_interaction(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *color = PRESSED_BUTTON.into();
            }
            Interaction::Hovered => {
                *color = HOVERED_BUTTON.into();
            }
            Interaction::None => {
                *color = NORMAL_BUTTON.into();
            }
        }
    }
}

pub fn handle_day_night_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<DayNightButton>)>,
    mut toggles: EventWriter<LightingToggle>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            toggles.send(LightingToggle::DayNight);
        }
    }
}

pub fn handle_flashlight_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<FlashlightButton>)>,
    mut toggles: EventWriter<LightingToggle>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            toggles.send(LightingToggle::Flashlight);
        }
    }
}

pub fn handle_jump_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<JumpButton>)>,
    mut mapper: ResMut<InputMapper>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            if let Some(controls) = mapper.touch_mut() {
                controls.request_jump();
            }
        }
    }
}

pub fn update_joystick_knob(
    mapper: Res<InputMapper>,
    mut knobs: Query<&mut Node, With<JoystickKnob>>,
) {
    if !mapper.is_changed() {
        return;
    }
    let Some(controls) = mapper.touch() else {
        return;
    };

    let (left, top) = knob_position(controls.layout.joystick_radius, controls.knob_offset());
    for mut node in knobs.iter_mut() {
        node.left = Val::Px(left);
        node.top = Val::Px(top);
    }
}

pub fn update_capture_indicators(
    mapper: Res<InputMapper>,
    mut crosshairs: Query<&mut Visibility, (With<Crosshair>, Without<CapturePrompt>)>,
    mut prompts: Query<&mut Visibility, (With<CapturePrompt>, Without<Crosshair>)>,
) {
    let Some(controls) = mapper.desktop() else {
        return;
    };
    let (crosshair, prompt) = if controls.is_captured() {
        (Visibility::Inherited, Visibility::Hidden)
    } else {
        (Visibility::Hidden, Visibility::Inherited)
    };

    for mut visibility in crosshairs.iter_mut() {
        visibility.set_if_neq(crosshair);
    }
    for mut visibility in prompts.iter_mut() {
        visibility.set_if_neq(prompt);
    }
}
