use bevy::prelude::*;

use crate::input::touch::HUD_BAR_HEIGHT;

pub const NORMAL_BUTTON: Color = Color::srgba(0.15, 0.15, 0.15, 0.7);
pub const HOVERED_BUTTON: Color = Color::srgba(0.25, 0.25, 0.25, 0.8);
pub const PRESSED_BUTTON: Color = Color::srgba(0.35, 0.65, 0.35, 0.9);

pub const BUTTON_TEXT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

pub const JOYSTICK_BASE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
pub const JOYSTICK_KNOB_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
pub const JOYSTICK_KNOB_SIZE: f32 = 44.0;

pub fn bar_style() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Px(HUD_BAR_HEIGHT),
        position_type: PositionType::Absolute,
        top: Val::Px(0.0),
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::FlexEnd,
        align_items: AlignItems::Center,
        padding: UiRect::horizontal(Val::Px(8.0)),
        ..default()
    }
}

pub fn button_style() -> Node {
    Node {
        width: Val::Px(120.0),
        height: Val::Px(44.0),
        margin: UiRect::all(Val::Px(6.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 18.0,
        ..default()
    }
}
