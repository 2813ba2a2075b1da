//! Final-ray banner: a short notification at the top of the screen each time
//! a ray interval completes.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::experiment::ObservationRay;
use crate::tick::{Experiment, FinalRayRecorded};

/// Seconds a banner stays on screen.
pub const BANNER_SECS: f32 = 4.0;

/// Resource for banner state.
#[derive(Resource, Default, Debug)]
pub struct RayBannerState {
    /// Final ray being announced, if any.
    pub ray: Option<ObservationRay>,
    /// Intervals completed since the last reset.
    pub intervals_completed: u32,
    pub remaining_secs: f32,
}

mod colors {
    use bevy_egui::egui::Color32;

    pub const BANNER_BG: Color32 = Color32::from_rgba_premultiplied(30, 50, 80, 240);
    pub const BANNER_BORDER: Color32 = Color32::from_rgb(85, 153, 221);
}

/// Pick up final rays from the tick and age the current banner.
pub fn update_ray_banner(
    time: Res<Time>,
    experiment: Res<Experiment>,
    mut final_rays: MessageReader<FinalRayRecorded>,
    mut banner: ResMut<RayBannerState>,
) {
    // Reset clears the ray log, and with it any pending notification
    if experiment.rays().is_empty() {
        final_rays.clear();
        *banner = RayBannerState::default();
        return;
    }

    for FinalRayRecorded(ray) in final_rays.read() {
        banner.intervals_completed += 1;
        info!(
            "Interval {} complete, Mars seen at {} from Earth",
            banner.intervals_completed, ray.geocentric
        );
        banner.ray = Some(*ray);
        banner.remaining_secs = BANNER_SECS;
    }

    if banner.ray.is_some() {
        banner.remaining_secs = (banner.remaining_secs - time.delta_secs()).max(0.0);
        if banner.remaining_secs == 0.0 {
            banner.ray = None;
        }
    }
}

/// System to render the final-ray banner.
pub fn ray_banner_system(mut contexts: EguiContexts, banner: Res<RayBannerState>) {
    let Some(ray) = banner.ray else {
        return;
    };
    let Some(ctx) = contexts.ctx_mut().ok() else {
        return;
    };

    egui::TopBottomPanel::top("final_ray_banner")
        .frame(
            egui::Frame::NONE
                .fill(colors::BANNER_BG)
                .inner_margin(egui::Margin::symmetric(16, 8))
                .stroke(egui::Stroke::new(1.0, colors::BANNER_BORDER)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    egui::RichText::new("FINAL RAY RECORDED")
                        .strong()
                        .size(16.0)
                        .color(egui::Color32::WHITE),
                );
                ui.separator();
                ui.label(egui::RichText::new(format!("Day {}", ray.experiment_day)).size(14.0));
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Geocentric longitude {}", ray.geocentric))
                        .size(14.0),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new("Mars is back where the first ray saw it")
                        .weak()
                        .size(14.0),
                );
            });
        });
}
