//! Control panel at the bottom of the screen.
//!
//! Buttons map 1:1 to controller commands: cast ray, pause/resume,
//! ellipse mode and reset. The ellipse adjustments appear only in ellipse mode.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::command::Command;
use crate::experiment::Phase;
use crate::input::KeyBindings;
use crate::tick::{ControlCommand, Experiment};

/// Colors for the control panel.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// System that renders the control panel.
pub fn control_panel_system(
    mut contexts: EguiContexts,
    experiment: Res<Experiment>,
    bindings: Res<KeyBindings>,
    mut commands: MessageWriter<ControlCommand>,
) {
    let Some(ctx) = contexts.ctx_mut().ok() else {
        return;
    };

    let phase = experiment.phase();
    let mut pressed = Vec::new();

    egui::TopBottomPanel::bottom("control_panel")
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                if command_button(ui, &bindings, "Cast Ray", Command::CastRay, can_cast(&experiment)) {
                    pressed.push(Command::CastRay);
                }

                let (label, color) = if phase == Phase::Paused {
                    ("\u{25B6} Resume", colors::PLAY_ICON)
                } else {
                    ("\u{23F8} Pause", colors::PAUSE_ICON)
                };
                let enabled = matches!(phase, Phase::Running | Phase::Paused);
                let button = egui::Button::new(egui::RichText::new(label).color(color));
                if ui
                    .add_enabled(enabled, button)
                    .on_hover_text(hint(&bindings, Command::TogglePause))
                    .clicked()
                {
                    pressed.push(Command::TogglePause);
                }

                if command_button(
                    ui,
                    &bindings,
                    "Ellipse Mode",
                    Command::EnterEllipseMode,
                    phase == Phase::Paused,
                ) {
                    pressed.push(Command::EnterEllipseMode);
                }

                if command_button(ui, &bindings, "\u{21BA} Reset", Command::ResetExperiment, true) {
                    pressed.push(Command::ResetExperiment);
                }

                if phase == Phase::EllipseExploring {
                    ui.separator();
                    for (label, command) in [
                        ("Grow", Command::GrowSize),
                        ("Shrink", Command::ShrinkSize),
                        ("e +", Command::IncreaseEccentricity),
                        ("e \u{2212}", Command::DecreaseEccentricity),
                    ] {
                        if command_button(ui, &bindings, label, command, true) {
                            pressed.push(command);
                        }
                    }
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Day {}", experiment.state().experiment_days))
                        .monospace()
                        .color(colors::TEXT),
                );
            });
        });

    for command in pressed {
        commands.write(ControlCommand(command));
    }
}

/// A first ray can be cast unless one is pending or we are exploring the ellipse.
fn can_cast(experiment: &Experiment) -> bool {
    experiment.phase() != Phase::EllipseExploring && !experiment.state().has_drawn_ray
}

fn command_button(
    ui: &mut egui::Ui,
    bindings: &KeyBindings,
    label: &str,
    command: Command,
    enabled: bool,
) -> bool {
    ui.add_enabled(enabled, egui::Button::new(label))
        .on_hover_text(hint(bindings, command))
        .clicked()
}

fn hint(bindings: &KeyBindings, command: Command) -> String {
    match bindings.key_for(command) {
        Some(key) => format!("{command} ({key:?})"),
        None => command.to_string(),
    }
}
