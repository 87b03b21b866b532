use bevy::prelude::*;

/// Ordering of the per-frame work inside `Update`.
///
/// Input handlers write device state, the step consumes it once, then the
/// camera and HUD present the result.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Step,
    Present,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Step,
                SimulationSet::Present,
            )
                .chain(),
        );
    }
}
