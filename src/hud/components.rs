use bevy::prelude::*;

/// Root node of the HUD button bar.
#[derive(Component)]
pub struct HudBar;

/// Toggles day and night.
#[derive(Component)]
pub struct DayNightButton;

/// Toggles the flashlight.
#[derive(Component)]
pub struct FlashlightButton;

/// Jump button, touch controls only.
#[derive(Component)]
pub struct JumpButton;

/// Base ring of the virtual joystick.
#[derive(Component)]
pub struct JoystickBase;

/// Knob that follows the joystick drag.
#[derive(Component)]
pub struct JoystickKnob;

/// Centre dot shown while the pointer is captured.
#[derive(Component)]
pub struct Crosshair;

/// "Click to look around" prompt shown while the pointer is free.
#[derive(Component)]
pub struct CapturePrompt;
