//! Mars Triangulation - heliocentric vs. geocentric longitude simulator
//!
//! Animates Earth and Mars around the Sun and lets the user cast sight lines
//! to Mars one Martian year apart, the way Kepler triangulated its orbit.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use mars_triangulation::camera::CameraPlugin;
use mars_triangulation::config::SimulationConfig;
use mars_triangulation::input::InputPlugin;
use mars_triangulation::render::RenderPlugin;
use mars_triangulation::tick::{TickPlugin, autostart};
use mars_triangulation::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mars Triangulation".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::srgb(0.04, 0.04, 0.07)))
        // Insert resources before plugins that depend on them
        .insert_resource(SimulationConfig::default())
        .add_plugins((CameraPlugin, TickPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .add_systems(Startup, autostart)
        .run();
}
