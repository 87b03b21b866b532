//! On-screen joystick and look pad.
//!
//! Below the HUD bar the screen is split in two: the left half drives the
//! joystick, the right half turns the camera. Each half follows a single
//! finger at a time.

use bevy::{prelude::*, window::PrimaryWindow};

use super::{InputMapper, InputSource, MovementIntent, OrientationDelta};
use crate::player::{ForwardBasis, MovementConfig};

/// Height of the HUD button bar at the top of the screen (px).
pub const HUD_BAR_HEIGHT: f32 = 64.0;
/// Maximum joystick drag distance (px).
pub const JOYSTICK_RADIUS: f32 = 50.0;
/// Distance from the bottom-left corner to the joystick base edge (px).
pub const JOYSTICK_MARGIN: f32 = 40.0;

/// Identifier of a finger on the screen.
pub type ContactId = u64;

/// Which control a new touch lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Joystick,
    LookPad,
}

/// Screen layout of the touch controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    pub hud_bar_height: f32,
    pub joystick_radius: f32,
    pub joystick_margin: f32,
}

impl Default for TouchLayout {
    fn default() -> Self {
        Self {
            hud_bar_height: HUD_BAR_HEIGHT,
            joystick_radius: JOYSTICK_RADIUS,
            joystick_margin: JOYSTICK_MARGIN,
        }
    }
}

impl TouchLayout {
    /// Centre of the joystick base in window coordinates (y down).
    pub fn joystick_origin(&self, window_size: Vec2) -> Vec2 {
        let inset = self.joystick_margin + self.joystick_radius;
        Vec2::new(inset, window_size.y - inset)
    }

    pub fn zone(&self, point: Vec2, window_size: Vec2) -> Option<TouchZone> {
        if !point.is_finite() || point.y < self.hud_bar_height {
            return None;
        }
        if point.x < window_size.x / 2.0 {
            Some(TouchZone::Joystick)
        } else {
            Some(TouchZone::LookPad)
        }
    }
}

/// Maps a drag position to an intent, clamping the drag to `radius`.
pub fn joystick_intent(point: Vec2, origin: Vec2, radius: f32) -> MovementIntent {
    let drag = point - origin;
    if !drag.is_finite() || radius <= 0.0 {
        return MovementIntent::ZERO;
    }
    let drag = drag.clamp_length_max(radius);
    // Screen y grows downward; dragging up walks forward
    MovementIntent::new(drag.x / radius, -drag.y / radius)
}

/// Virtual joystick anchored at a fixed origin.
#[derive(Debug, Default)]
pub struct VirtualJoystick {
    contact: Option<ContactId>,
    intent: MovementIntent,
}

impl VirtualJoystick {
    /// Starts tracking `id`. Returns false if another finger already owns it.
    pub fn begin(&mut self, id: ContactId, point: Vec2, origin: Vec2, radius: f32) -> bool {
        if self.contact.is_some() {
            return false;
        }
        self.contact = Some(id);
        self.intent = joystick_intent(point, origin, radius);
        true
    }

    pub fn drag(&mut self, id: ContactId, point: Vec2, origin: Vec2, radius: f32) {
        if self.contact == Some(id) {
            self.intent = joystick_intent(point, origin, radius);
        }
    }

    pub fn end(&mut self, id: ContactId) {
        if self.contact == Some(id) {
            self.contact = None;
            self.intent = MovementIntent::ZERO;
        }
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn is_active(&self) -> bool {
        self.contact.is_some()
    }
}

/// Drag surface that turns finger movement into look deltas.
#[derive(Debug, Default)]
pub struct LookPad {
    /// Tracked finger and the last point it was seen at.
    contact: Option<(ContactId, Vec2)>,
    pending: OrientationDelta,
}

impl LookPad {
    pub fn begin(&mut self, id: ContactId, point: Vec2) -> bool {
        if self.contact.is_some() || !point.is_finite() {
            return false;
        }
        self.contact = Some((id, point));
        true
    }

    pub fn drag(&mut self, id: ContactId, point: Vec2, sensitivity: f32) {
        let Some((contact, last)) = self.contact else {
            return;
        };
        if contact != id || !point.is_finite() {
            return;
        }
        let delta = point - last;
        self.pending
            .accumulate(delta.x * sensitivity, -delta.y * sensitivity);
        self.contact = Some((id, point));
    }

    pub fn end(&mut self, id: ContactId) {
        if matches!(self.contact, Some((contact, _)) if contact == id) {
            self.contact = None;
        }
    }

    pub fn take_delta(&mut self) -> OrientationDelta {
        std::mem::take(&mut self.pending)
    }
}

/// Touch scheme state: joystick, look pad and the jump button.
#[derive(Debug, Default)]
pub struct TouchControls {
    pub layout: TouchLayout,
    pub joystick: VirtualJoystick,
    pub look_pad: LookPad,
    jump_requested: bool,
}

impl TouchControls {
    pub fn touch_started(&mut self, id: ContactId, point: Vec2, window_size: Vec2) {
        match self.layout.zone(point, window_size) {
            Some(TouchZone::Joystick) => {
                let origin = self.layout.joystick_origin(window_size);
                self.joystick
                    .begin(id, point, origin, self.layout.joystick_radius);
            }
            Some(TouchZone::LookPad) => {
                self.look_pad.begin(id, point);
            }
            None => {}
        }
    }

    pub fn touch_moved(&mut self, id: ContactId, point: Vec2, window_size: Vec2, sensitivity: f32) {
        let origin = self.layout.joystick_origin(window_size);
        self.joystick
            .drag(id, point, origin, self.layout.joystick_radius);
        self.look_pad.drag(id, point, sensitivity);
    }

    pub fn touch_ended(&mut self, id: ContactId) {
        self.joystick.end(id);
        self.look_pad.end(id);
    }

    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Knob offset from the joystick origin in screen pixels (y down).
    pub fn knob_offset(&self) -> Vec2 {
        let intent = self.joystick.intent();
        Vec2::new(intent.strafe, -intent.forward) * self.layout.joystick_radius
    }
}

impl InputSource for TouchControls {
    fn current_intent(&self) -> MovementIntent {
        self.joystick.intent()
    }

    fn take_orientation_delta(&mut self) -> OrientationDelta {
        self.look_pad.take_delta()
    }

    fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    fn movement_enabled(&self) -> bool {
        true
    }

    fn forward_basis(&self) -> ForwardBasis {
        ForwardBasis::Yaw
    }

    fn move_speed(&self, config: &MovementConfig) -> f32 {
        config.touch_speed
    }
}

pub fn read_touches(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<MovementConfig>,
    mut mapper: ResMut<InputMapper>,
) {
    let Some(controls) = mapper.touch_mut() else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());

    for touch in touches.iter_just_pressed() {
        controls.touch_started(touch.id(), touch.position(), window_size);
    }

    for touch in touches.iter() {
        controls.touch_moved(
            touch.id(),
            touch.position(),
            window_size,
            config.touch_look_sensitivity,
        );
    }

    for touch in touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
    {
        controls.touch_ended(touch.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    fn origin() -> Vec2 {
        TouchLayout::default().joystick_origin(WINDOW)
    }

    #[test]
    fn test_joystick_origin_bottom_left() {
        assert_eq!(origin(), Vec2::new(90.0, 510.0));
    }

    #[test]
    fn test_zones() {
        let layout = TouchLayout::default();
        assert_eq!(layout.zone(Vec2::new(100.0, 400.0), WINDOW), Some(TouchZone::Joystick));
        assert_eq!(layout.zone(Vec2::new(600.0, 400.0), WINDOW), Some(TouchZone::LookPad));
        assert_eq!(layout.zone(Vec2::new(600.0, 20.0), WINDOW), None);
        assert_eq!(layout.zone(Vec2::new(f32::NAN, 400.0), WINDOW), None);
    }

    #[test]
    fn test_joystick_drag_up_walks_forward() {
        let intent = joystick_intent(origin() + Vec2::new(0.0, -25.0), origin(), 50.0);
        assert_eq!(intent, MovementIntent::new(0.0, 0.5));
    }

    #[test]
    fn test_joystick_clamped_to_radius() {
        let intent = joystick_intent(origin() + Vec2::new(300.0, 400.0), origin(), 50.0);
        assert!((intent.strafe - 0.6).abs() < 1e-5);
        assert!((intent.forward + 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_joystick_release_resets_intent() {
        let mut controls = TouchControls::default();
        controls.touch_started(1, origin(), WINDOW);
        controls.touch_moved(1, origin() + Vec2::new(50.0, 0.0), WINDOW, 0.005);
        assert_eq!(controls.current_intent(), MovementIntent::new(1.0, 0.0));
        assert_eq!(controls.knob_offset(), Vec2::new(50.0, 0.0));

        controls.touch_ended(1);
        assert!(controls.current_intent().is_zero());
        assert!(!controls.joystick.is_active());
    }

    #[test]
    fn test_second_finger_on_joystick_ignored() {
        let mut controls = TouchControls::default();
        controls.touch_started(1, origin() + Vec2::new(0.0, -50.0), WINDOW);
        controls.touch_started(2, origin() + Vec2::new(50.0, 0.0), WINDOW);
        controls.touch_moved(2, origin() + Vec2::new(-50.0, 0.0), WINDOW, 0.005);
        assert_eq!(controls.current_intent(), MovementIntent::new(0.0, 1.0));

        // Lifting the ignored finger changes nothing
        controls.touch_ended(2);
        assert_eq!(controls.current_intent(), MovementIntent::new(0.0, 1.0));
    }

    #[test]
    fn test_look_pad_drag_right_turns_right() {
        let mut controls = TouchControls::default();
        let start = Vec2::new(600.0, 300.0);
        controls.touch_started(7, start, WINDOW);
        controls.touch_moved(7, start + Vec2::new(20.0, -10.0), WINDOW, 0.005);

        let delta = controls.take_orientation_delta();
        assert!((delta.yaw - 0.1).abs() < 1e-6);
        assert!((delta.pitch - 0.05).abs() < 1e-6);
        assert_eq!(controls.take_orientation_delta(), OrientationDelta::default());
    }

    #[test]
    fn test_look_pad_ignores_unknown_contact() {
        let mut pad = LookPad::default();
        pad.drag(3, Vec2::new(10.0, 10.0), 0.005);
        assert_eq!(pad.take_delta(), OrientationDelta::default());

        pad.begin(1, Vec2::new(0.0, 0.0));
        pad.drag(3, Vec2::new(100.0, 0.0), 0.005);
        pad.drag(1, Vec2::new(f32::NAN, 0.0), 0.005);
        assert_eq!(pad.take_delta(), OrientationDelta::default());
    }

    #[test]
    fn test_both_surfaces_track_separate_fingers() {
        let mut controls = TouchControls::default();
        controls.touch_started(1, origin(), WINDOW);
        controls.touch_started(2, Vec2::new(600.0, 300.0), WINDOW);
        controls.touch_moved(1, origin() + Vec2::new(0.0, -50.0), WINDOW, 0.005);
        controls.touch_moved(2, Vec2::new(610.0, 300.0), WINDOW, 0.005);

        assert_eq!(controls.current_intent(), MovementIntent::new(0.0, 1.0));
        assert!((controls.take_orientation_delta().yaw - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_touch_on_hud_bar_is_ignored() {
        let mut controls = TouchControls::default();
        controls.touch_started(1, Vec2::new(100.0, 10.0), WINDOW);
        assert!(!controls.joystick.is_active());
    }
}
