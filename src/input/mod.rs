pub mod keyboard;
pub mod touch;

use bevy::prelude::*;
use serde::Deserialize;

pub use keyboard::KeyboardMouse;
pub use touch::TouchControls;

use crate::player::{ForwardBasis, MovementConfig};
use crate::schedule::SimulationSet;
use keyboard::{read_mouse_motion, read_movement_keys};
use touch::read_touches;

/// Desired movement for one step. `strafe` is positive to the right,
/// `forward` positive ahead; each component lies in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    pub strafe: f32,
    pub forward: f32,
}

impl MovementIntent {
    pub const ZERO: Self = Self {
        strafe: 0.0,
        forward: 0.0,
    };

    /// Builds an intent, clamping each axis and zeroing non-finite input.
    pub fn new(strafe: f32, forward: f32) -> Self {
        let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            strafe: axis(strafe),
            forward: axis(forward),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.strafe == 0.0 && self.forward == 0.0
    }
}

/// Look change since the last step, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationDelta {
    /// Positive turns right.
    pub yaw: f32,
    /// Positive looks up.
    pub pitch: f32,
}

impl OrientationDelta {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Adds another delta, dropping non-finite samples.
    pub fn accumulate(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() && pitch.is_finite() {
            self.yaw += yaw;
            self.pitch += pitch;
        }
    }
}

/// What the simulation step needs from whichever controls are active.
pub trait InputSource {
    /// Movement intent from the current device state.
    fn current_intent(&self) -> MovementIntent;

    /// Look delta gathered since the last call. Resets the accumulator.
    fn take_orientation_delta(&mut self) -> OrientationDelta;

    /// Whether a jump was requested since the last call.
    fn take_jump(&mut self) -> bool;

    /// Whether horizontal movement should integrate this step.
    fn movement_enabled(&self) -> bool;

    /// How forward is derived for this scheme.
    fn forward_basis(&self) -> ForwardBasis;

    /// Walking speed for this scheme.
    fn move_speed(&self, config: &MovementConfig) -> f32;
}

/// The two supported control schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    /// Keyboard movement with pointer-captured mouse look.
    Desktop,
    /// Virtual joystick and look pad.
    Touch,
}

impl ControlScheme {
    /// Scheme for the platform we're running on: touch on phones and
    /// tablets, keyboard and mouse everywhere else.
    pub fn detect() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            ControlScheme::Touch
        } else {
            ControlScheme::Desktop
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "desktop" | "keyboard" => Some(ControlScheme::Desktop),
            "touch" | "mobile" => Some(ControlScheme::Touch),
            _ => None,
        }
    }
}

/// Input state of the active control scheme, chosen once at startup.
#[derive(Resource, Debug)]
pub enum InputMapper {
    Desktop(KeyboardMouse),
    Touch(TouchControls),
}

impl InputMapper {
    pub fn new(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Desktop => InputMapper::Desktop(KeyboardMouse::default()),
            ControlScheme::Touch => InputMapper::Touch(TouchControls::default()),
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        match self {
            InputMapper::Desktop(_) => ControlScheme::Desktop,
            InputMapper::Touch(_) => ControlScheme::Touch,
        }
    }

    pub fn desktop(&self) -> Option<&KeyboardMouse> {
        match self {
            InputMapper::Desktop(controls) => Some(controls),
            InputMapper::Touch(_) => None,
        }
    }

    pub fn desktop_mut(&mut self) -> Option<&mut KeyboardMouse> {
        match self {
            InputMapper::Desktop(controls) => Some(controls),
            InputMapper::Touch(_) => None,
        }
    }

    pub fn touch(&self) -> Option<&TouchControls> {
        match self {
            InputMapper::Touch(controls) => Some(controls),
            InputMapper::Desktop(_) => None,
        }
    }

    pub fn touch_mut(&mut self) -> Option<&mut TouchControls> {
        match self {
            InputMapper::Touch(controls) => Some(controls),
            InputMapper::Desktop(_) => None,
        }
    }

    fn source(&self) -> &dyn InputSource {
        match self {
            InputMapper::Desktop(controls) => controls,
            InputMapper::Touch(controls) => controls,
        }
    }

    fn source_mut(&mut self) -> &mut dyn InputSource {
        match self {
            InputMapper::Desktop(controls) => controls,
            InputMapper::Touch(controls) => controls,
        }
    }
}

impl InputSource for InputMapper {
    fn current_intent(&self) -> MovementIntent {
        self.source().current_intent()
    }

    fn take_orientation_delta(&mut self) -> OrientationDelta {
        self.source_mut().take_orientation_delta()
    }

    fn take_jump(&mut self) -> bool {
        self.source_mut().take_jump()
    }

    fn movement_enabled(&self) -> bool {
        self.source().movement_enabled()
    }

    fn forward_basis(&self) -> ForwardBasis {
        self.source().forward_basis()
    }

    fn move_speed(&self, config: &MovementConfig) -> f32 {
        self.source().move_speed(config)
    }
}

/// Run condition: keyboard and mouse controls are active.
pub fn desktop_controls(mapper: Res<InputMapper>) -> bool {
    mapper.scheme() == ControlScheme::Desktop
}

/// Run condition: touch controls are active.
pub fn touch_controls(mapper: Res<InputMapper>) -> bool {
    mapper.scheme() == ControlScheme::Touch
}

pub struct InputPlugin {
    pub scheme: ControlScheme,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        info!("Using {:?} controls", self.scheme);

        app.insert_resource(InputMapper::new(self.scheme)).add_systems(
            Update,
            (
                (read_movement_keys, read_mouse_motion).run_if(desktop_controls),
                read_touches.run_if(touch_controls),
            )
                .in_set(SimulationSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_clamps_and_rejects_nan() {
        let intent = MovementIntent::new(2.0, f32::NAN);
        assert_eq!(intent, MovementIntent::new(1.0, 0.0));
        assert!(MovementIntent::new(0.0, f32::INFINITY).is_zero());
    }

    #[test]
    fn test_orientation_accumulate_drops_nan() {
        let mut delta = OrientationDelta::default();
        delta.accumulate(0.1, 0.2);
        delta.accumulate(f32::NAN, 1.0);
        assert_eq!(delta, OrientationDelta::new(0.1, 0.2));
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!(ControlScheme::parse("Touch"), Some(ControlScheme::Touch));
        assert_eq!(ControlScheme::parse(" desktop "), Some(ControlScheme::Desktop));
        assert_eq!(ControlScheme::parse("gamepad"), None);
    }

    #[test]
    fn test_mapper_dispatches_to_active_scheme() {
        let config = MovementConfig::default();

        let desktop = InputMapper::new(ControlScheme::Desktop);
        assert_eq!(desktop.forward_basis(), ForwardBasis::LookDirection);
        assert_eq!(desktop.move_speed(&config), config.desktop_speed);
        // Nothing moves until the pointer is captured
        assert!(!desktop.movement_enabled());

        let touch = InputMapper::new(ControlScheme::Touch);
        assert_eq!(touch.forward_basis(), ForwardBasis::Yaw);
        assert_eq!(touch.move_speed(&config), config.touch_speed);
        assert!(touch.movement_enabled());
    }
}
