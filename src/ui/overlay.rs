//! Text overlay: paints the lines queued by the renderer.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::render::OverlayText;

const FONT_SIZE: f32 = 16.0;

/// Paint queued overlay text in the top-left corner.
pub fn overlay_text_system(mut contexts: EguiContexts, overlay: Res<OverlayText>) {
    let Some(ctx) = contexts.ctx_mut().ok() else {
        return;
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("experiment_overlay"),
    ));

    for (position, text, color) in &overlay.lines {
        painter.text(
            egui::pos2(position.x, position.y),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(FONT_SIZE),
            to_color32(*color),
        );
    }
}

/// Bevy color to egui's unmultiplied sRGB.
pub fn to_color32(color: Color) -> egui::Color32 {
    let c = color.to_srgba();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(c.red),
        channel(c.green),
        channel(c.blue),
        channel(c.alpha),
    )
}
