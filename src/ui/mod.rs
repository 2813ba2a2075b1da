//! UI module providing the egui control panel, text overlay and final-ray
//! banner.

pub mod banner;
mod control_panel;
pub mod overlay;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::tick::ExperimentSystemSet;

pub use banner::RayBannerState;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RayBannerState>()
            // Banner state doesn't need egui context, so it follows the tick in Update
            .add_systems(
                Update,
                banner::update_ray_banner.after(ExperimentSystemSet::Tick),
            )
            // Button presses become ControlCommand messages, applied next frame
            .add_systems(
                EguiPrimaryContextPass,
                (
                    control_panel::control_panel_system,
                    overlay::overlay_text_system,
                    banner::ray_banner_system,
                ),
            );
    }
}
