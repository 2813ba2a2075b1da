//! Frame planning: turns experiment state into draw commands.
//!
//! Nothing here touches Bevy's renderer. A [`FramePlan`] is a plain list of
//! [`DrawCommand`]s per [`Layer`], replayed against any [`Renderer`].
//! Shapes are in the model frame (y-down); text is in screen pixels.

use bevy::color::Color;
use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::experiment::{ExperimentController, Mode, ObservationRay, Phase, RayKind};
use crate::simulator::{OrbitGeometry, OrbitalSnapshot};
use crate::types::BodyId;

/// Where a command is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Persists across frames: Sun, orbits, recorded rays, the ellipse.
    Background,
    /// Redrawn every frame: bodies, connecting lines, arcs, text.
    Dynamic,
}

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Layer),
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
        filled: bool,
    },
    Ellipse {
        center: DVec2,
        radii: DVec2,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Color,
    },
    Arrow {
        from: DVec2,
        to: DVec2,
        color: Color,
    },
    /// Screen-space text, `position` in pixels from the top-left corner.
    Text {
        position: DVec2,
        text: String,
        color: Color,
    },
    /// Arc swept from `start_angle` to `end_angle` (radians, model frame).
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        fill: Option<Color>,
    },
}

/// Sink for draw commands.
pub trait Renderer {
    fn clear(&mut self, layer: Layer);
    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Color, filled: bool);
    fn draw_ellipse(&mut self, center: DVec2, radii: DVec2, color: Color);
    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color);
    fn draw_arrow(&mut self, from: DVec2, to: DVec2, color: Color);
    fn draw_text(&mut self, position: DVec2, text: &str, color: Color);
    fn draw_arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        fill: Option<Color>,
    );
}

impl DrawCommand {
    /// Send this command to `renderer`.
    pub fn apply(&self, renderer: &mut impl Renderer) {
        match self {
            DrawCommand::Clear(layer) => renderer.clear(*layer),
            DrawCommand::Circle {
                center,
                radius,
                color,
                filled,
            } => renderer.draw_circle(*center, *radius, *color, *filled),
            DrawCommand::Ellipse {
                center,
                radii,
                color,
            } => renderer.draw_ellipse(*center, *radii, *color),
            DrawCommand::Line { from, to, color } => renderer.draw_line(*from, *to, *color),
            DrawCommand::Arrow { from, to, color } => renderer.draw_arrow(*from, *to, *color),
            DrawCommand::Text {
                position,
                text,
                color,
            } => renderer.draw_text(*position, text, *color),
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
                fill,
            } => renderer.draw_arc(*center, *radius, *start_angle, *end_angle, *color, *fill),
        }
    }
}

/// Colors and sizes used when planning a frame.
#[derive(Resource, Clone, Debug)]
pub struct RenderSettings {
    pub sun_color: Color,
    pub earth_color: Color,
    pub mars_color: Color,
    pub ray_color: Color,
    pub final_ray_color: Color,
    pub ellipse_color: Color,
    pub text_color: Color,
    pub arc_fill: Color,
    pub sun_radius: f64,
    pub body_radius: f64,
    /// Radius of the heliocentric angle arc around the Sun.
    pub heliocentric_arc_radius: f64,
    /// Radius of the geocentric angle arc around Earth.
    pub geocentric_arc_radius: f64,
    /// Length of the reference-direction tick drawn from Earth.
    pub reference_length: f64,
    /// Rays overshoot Mars by this fraction of the Earth-Mars distance.
    pub ray_overshoot: f64,
    pub line_height: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sun_color: Color::srgb(1.0, 0.9, 0.2),
            earth_color: Color::srgb(0.2, 0.5, 0.9),
            mars_color: Color::srgb(0.85, 0.3, 0.2),
            ray_color: Color::srgb(0.95, 0.25, 0.25),
            final_ray_color: Color::srgb(1.0, 0.6, 0.2),
            ellipse_color: Color::srgb(0.3, 0.85, 0.45),
            text_color: Color::srgb(0.9, 0.9, 0.95),
            arc_fill: Color::srgba(1.0, 0.9, 0.3, 0.35),
            sun_radius: 10.0,
            body_radius: 5.0,
            heliocentric_arc_radius: 40.0,
            geocentric_arc_radius: 25.0,
            reference_length: 45.0,
            ray_overshoot: 0.05,
            line_height: 20.0,
        }
    }
}

/// Commands for one frame, split by layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePlan {
    pub background: Vec<DrawCommand>,
    /// Matches [`ExperimentController::background_revision`] at build time.
    pub background_revision: u64,
    pub dynamic: Vec<DrawCommand>,
}

impl FramePlan {
    pub fn build(controller: &ExperimentController, settings: &RenderSettings) -> Self {
        Self {
            background: plan_background(controller, settings),
            background_revision: controller.background_revision(),
            dynamic: plan_dynamic(controller, settings),
        }
    }

    pub fn layer(&self, layer: Layer) -> &[DrawCommand] {
        match layer {
            Layer::Background => &self.background,
            Layer::Dynamic => &self.dynamic,
        }
    }

    /// Background first, then the dynamic layer on top.
    pub fn replay(&self, renderer: &mut impl Renderer) {
        replay(&self.background, renderer);
        replay(&self.dynamic, renderer);
    }
}

pub fn replay(commands: &[DrawCommand], renderer: &mut impl Renderer) {
    for command in commands {
        command.apply(renderer);
    }
}

/// Persistent layer: Sun, both orbits, recorded rays and the ellipse.
pub fn plan_background(
    controller: &ExperimentController,
    settings: &RenderSettings,
) -> Vec<DrawCommand> {
    let simulator = controller.simulator();
    let mut commands = vec![DrawCommand::Clear(Layer::Background)];

    commands.push(DrawCommand::Circle {
        center: DVec2::ZERO,
        radius: settings.sun_radius,
        color: settings.sun_color,
        filled: true,
    });

    for (id, color) in [
        (BodyId::Earth, settings.earth_color),
        (BodyId::Mars, settings.mars_color),
    ] {
        commands.push(orbit_command(&simulator.body(id).geometry, color));
    }

    commands.extend(controller.rays().iter().map(|ray| ray_command(ray, settings)));

    if let Some(ellipse) = controller.ellipse() {
        commands.push(DrawCommand::Ellipse {
            center: ellipse.center,
            radii: DVec2::new(ellipse.rx, ellipse.ry),
            color: settings.ellipse_color,
        });
        commands.push(DrawCommand::Circle {
            center: ellipse.center,
            radius: 2.0,
            color: settings.ellipse_color,
            filled: true,
        });
    }

    commands
}

fn orbit_command(geometry: &OrbitGeometry, color: Color) -> DrawCommand {
    match *geometry {
        OrbitGeometry::Circular { radius } => DrawCommand::Circle {
            center: DVec2::ZERO,
            radius,
            color,
            filled: false,
        },
        OrbitGeometry::Elliptical { .. } => DrawCommand::Ellipse {
            center: geometry.center(),
            radii: geometry.radii(),
            color,
        },
    }
}

fn ray_command(ray: &ObservationRay, settings: &RenderSettings) -> DrawCommand {
    let color = match ray.kind {
        RayKind::First => settings.ray_color,
        RayKind::Final => settings.final_ray_color,
    };
    DrawCommand::Arrow {
        from: ray.earth,
        to: ray.mars + (ray.mars - ray.earth) * settings.ray_overshoot,
        color,
    }
}

/// Per-frame layer: bodies, sight lines, angle arcs and the text overlay.
pub fn plan_dynamic(
    controller: &ExperimentController,
    settings: &RenderSettings,
) -> Vec<DrawCommand> {
    let snapshot = controller.snapshot();
    let mut commands = vec![DrawCommand::Clear(Layer::Dynamic)];

    for (center, color) in [
        (snapshot.earth, settings.earth_color),
        (snapshot.mars, settings.mars_color),
    ] {
        commands.push(DrawCommand::Circle {
            center,
            radius: settings.body_radius,
            color,
            filled: true,
        });
    }

    commands.push(DrawCommand::Line {
        from: snapshot.earth,
        to: DVec2::ZERO,
        color: settings.earth_color,
    });
    commands.push(DrawCommand::Line {
        from: snapshot.earth,
        to: snapshot.mars,
        color: settings.mars_color,
    });
    commands.push(DrawCommand::Line {
        from: snapshot.earth,
        to: snapshot.earth + DVec2::X * settings.reference_length,
        color: settings.text_color,
    });

    commands.extend(angle_arcs(&snapshot, settings));
    commands.extend(overlay_text(controller, &snapshot, settings));
    commands
}

/// Arcs from the reference direction (+x) to each measured direction.
///
/// Swept in the direction of motion, which is negative in the y-down frame.
fn angle_arcs(snapshot: &OrbitalSnapshot, settings: &RenderSettings) -> [DrawCommand; 2] {
    let sweep = |ecliptic_degrees: f64| -ecliptic_degrees.to_radians();
    [
        DrawCommand::Arc {
            center: DVec2::ZERO,
            radius: settings.heliocentric_arc_radius,
            start_angle: 0.0,
            end_angle: sweep(snapshot.heliocentric.ecliptic()),
            color: settings.earth_color,
            fill: Some(settings.arc_fill),
        },
        DrawCommand::Arc {
            center: snapshot.earth,
            radius: settings.geocentric_arc_radius,
            start_angle: 0.0,
            end_angle: sweep(snapshot.geocentric.ecliptic()),
            color: settings.mars_color,
            fill: Some(settings.arc_fill),
        },
    ]
}

fn overlay_text(
    controller: &ExperimentController,
    snapshot: &OrbitalSnapshot,
    settings: &RenderSettings,
) -> Vec<DrawCommand> {
    let state = controller.state();
    let mut lines = Vec::new();

    let phase = controller.phase();
    match phase {
        // Space casts the first ray, which also starts the animation
        Phase::Idle => lines.push("Press Space to begin".to_string()),
        Phase::Paused => lines.push("Paused".to_string()),
        _ => {}
    }
    if phase != Phase::Idle && !state.experiment_begun && state.mode == Mode::Observing {
        lines.push("Press Space to cast the first ray".to_string());
    }

    lines.push(format!("Days Counter: {}", state.days_counter));
    lines.push(format!("Experiment Days: {}", state.experiment_days));
    lines.push(format!("Simulated Days: {:.0}", snapshot.elapsed_days));
    if let Some(remaining) = controller.days_remaining() {
        lines.push(format!("Final ray in {remaining} days"));
    }
    lines.push(format!(
        "Heliocentric Longitude (Earth): {}",
        snapshot.heliocentric
    ));
    lines.push(format!(
        "Heliocentric Longitude (Mars): {}",
        snapshot.mars_heliocentric
    ));
    lines.push(format!("Geocentric Longitude (Mars): {}", snapshot.geocentric));

    if let Some(ellipse) = controller.ellipse() {
        let config = controller.config();
        lines.push(format!("Eccentricity: {:.4}", ellipse.eccentricity()));
        lines.push(format!("Perigee: {:.3} AU", config.to_au(ellipse.perigee())));
        lines.push(format!("Apogee: {:.3} AU", config.to_au(ellipse.apogee())));
        lines.push("Arrows: \u{2191}\u{2193} size, \u{2190}\u{2192} eccentricity".to_string());
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| DrawCommand::Text {
            position: DVec2::new(10.0, 10.0 + i as f64 * settings.line_height),
            text,
            color: settings.text_color,
        })
        .collect()
}

/// Renderer that only records what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, layer: Layer) {
        self.commands.push(DrawCommand::Clear(layer));
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Color, filled: bool) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            filled,
        });
    }

    fn draw_ellipse(&mut self, center: DVec2, radii: DVec2, color: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            color,
        });
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_arrow(&mut self, from: DVec2, to: DVec2, color: Color) {
        self.commands.push(DrawCommand::Arrow { from, to, color });
    }

    fn draw_text(&mut self, position: DVec2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            color,
        });
    }

    fn draw_arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        fill: Option<Color>,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color,
            fill,
        });
    }
}
