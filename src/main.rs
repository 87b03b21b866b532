mod camera;
mod config;
mod hud;
mod input;
mod lighting;
mod player;
mod schedule;
mod world;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use camera::CameraPlugin;
use config::Settings;
use hud::HudPlugin;
use input::InputPlugin;
use lighting::LightingPlugin;
use player::PlayerPlugin;
use schedule::SchedulePlugin;
use world::WorldPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Walkabout".to_string(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }),
    )
    .add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        LogDiagnosticsPlugin::default(),
    ));

    // Loaded after the log plugin so warnings are visible
    let settings = Settings::load();
    let scheme = settings.control_scheme();

    app.insert_resource(settings.movement)
        .add_plugins((
            SchedulePlugin,
            InputPlugin { scheme },
            WorldPlugin,
            PlayerPlugin,
            CameraPlugin,
            LightingPlugin,
            HudPlugin,
        ))
        .run();
}
