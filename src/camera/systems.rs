use bevy::{
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

use crate::input::InputMapper;

fn set_cursor_grab(window: &mut Window, grabbed: bool) {
    if grabbed {
        window.cursor_options.grab_mode = CursorGrabMode::Confined;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Starts pointer capture on a left click that didn't land on a HUD button.
pub fn capture_pointer_on_click(
    mouse_input: Res<ButtonInput<MouseButton>>,
    buttons: Query<&Interaction, With<Button>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut mapper: ResMut<InputMapper>,
) {
    if !mouse_input.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(controls) = mapper.desktop_mut() else {
        return;
    };
    if controls.is_captured() {
        return;
    }
    if buttons.iter().any(|interaction| *interaction != Interaction::None) {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    set_cursor_grab(&mut window, true);
    controls.set_captured(true);
    info!("Pointer captured");
}

/// Ends pointer capture on Escape or when the window loses focus.
pub fn release_pointer(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut mapper: ResMut<InputMapper>,
) {
    let Some(controls) = mapper.desktop_mut() else {
        return;
    };
    if !controls.is_captured() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    if keyboard_input.just_pressed(KeyCode::Escape) || !window.focused {
        set_cursor_grab(&mut window, false);
        controls.set_captured(false);
        info!("Pointer released");
    }
}

pub fn center_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    // Only center cursor when it's grabbed and window is focused
    if window.cursor_options.grab_mode != CursorGrabMode::None && window.focused {
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    }
}
