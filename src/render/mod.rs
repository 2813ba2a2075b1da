//! Rendering for the longitude experiment.
//!
//! [`plan`] builds draw commands from the experiment; this module replays
//! them with Bevy gizmos every frame. The background plan is cached and only
//! rebuilt when the experiment's background revision changes.

pub mod plan;

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::tick::{Experiment, ExperimentSystemSet};

use self::plan::{DrawCommand, Layer, RenderSettings, Renderer, plan_background, plan_dynamic, replay};

/// Line segments per full turn when sampling arcs.
const ARC_SEGMENTS_PER_TURN: f64 = 96.0;

/// Fill rings drawn inside a wedge, fading toward the center.
const ARC_FILL_RINGS: usize = 6;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderSettings>()
            .init_resource::<BackgroundCache>()
            .init_resource::<OverlayText>()
            .add_systems(
                Update,
                (refresh_background, draw_frame)
                    .chain()
                    .in_set(ExperimentSystemSet::Render),
            );
    }
}

/// Cached commands of the persistent layer.
#[derive(Resource, Default)]
pub struct BackgroundCache {
    /// `None` until the first build.
    pub revision: Option<u64>,
    pub commands: Vec<DrawCommand>,
}

/// Screen-space text queued for the egui overlay this frame.
#[derive(Resource, Default)]
pub struct OverlayText {
    pub lines: Vec<(Vec2, String, Color)>,
}

/// Model frame is y-down; Bevy world space is y-up.
pub fn to_world(p: DVec2) -> Vec2 {
    Vec2::new(p.x as f32, -p.y as f32)
}

/// Rebuild the background plan when the experiment says it changed.
fn refresh_background(
    experiment: Res<Experiment>,
    settings: Res<RenderSettings>,
    mut cache: ResMut<BackgroundCache>,
) {
    let revision = experiment.background_revision();
    if cache.revision == Some(revision) && !settings.is_changed() {
        return;
    }
    cache.commands = plan_background(&experiment, &settings);
    cache.revision = Some(revision);
    debug!("Background rebuilt ({} commands)", cache.commands.len());
}

fn draw_frame(
    mut gizmos: Gizmos,
    experiment: Res<Experiment>,
    settings: Res<RenderSettings>,
    cache: Res<BackgroundCache>,
    mut overlay: ResMut<OverlayText>,
) {
    let mut renderer = GizmoRenderer {
        gizmos: &mut gizmos,
        overlay: &mut overlay,
    };
    replay(&cache.commands, &mut renderer);
    replay(&plan_dynamic(&experiment, &settings), &mut renderer);
}

/// [`Renderer`] backed by immediate-mode gizmos and the text overlay.
pub struct GizmoRenderer<'a, 'w, 's> {
    pub gizmos: &'a mut Gizmos<'w, 's>,
    pub overlay: &'a mut OverlayText,
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    fn clear(&mut self, layer: Layer) {
        // Gizmos are redrawn every frame; only queued text needs clearing
        if layer == Layer::Dynamic {
            self.overlay.lines.clear();
        }
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Color, filled: bool) {
        let center = to_world(center);
        let radius = radius as f32;
        if filled {
            let mut r = radius;
            while r > 0.0 {
                self.gizmos.circle_2d(center, r, color);
                r -= 1.0;
            }
        } else {
            self.gizmos.circle_2d(center, radius, color);
        }
    }

    fn draw_ellipse(&mut self, center: DVec2, radii: DVec2, color: Color) {
        self.gizmos
            .ellipse_2d(to_world(center), radii.as_vec2(), color);
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color) {
        self.gizmos.line_2d(to_world(from), to_world(to), color);
    }

    fn draw_arrow(&mut self, from: DVec2, to: DVec2, color: Color) {
        self.gizmos.arrow_2d(to_world(from), to_world(to), color);
    }

    fn draw_text(&mut self, position: DVec2, text: &str, color: Color) {
        self.overlay
            .lines
            .push((position.as_vec2(), text.to_string(), color));
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
        let outline = arc_points(center, radius, start_angle, end_angle);
        if let (Some(&first), Some(&last)) = (outline.first(), outline.last()) {
            self.gizmos.line_2d(to_world(center), first, color);
            self.gizmos.line_2d(to_world(center), last, color);
        }
        self.gizmos.linestrip_2d(outline, color);

        let Some(fill) = fill else {
            return;
        };
        let base_alpha = fill.alpha();
        for ring in 1..ARC_FILL_RINGS {
            let t = ring as f64 / ARC_FILL_RINGS as f64;
            let shade = fill.with_alpha(base_alpha * t as f32);
            self.gizmos
                .linestrip_2d(arc_points(center, radius * t, start_angle, end_angle), shade);
        }
    }
}

/// Sampled arc in world space.
fn arc_points(center: DVec2, radius: f64, start_angle: f64, end_angle: f64) -> Vec<Vec2> {
    let sweep = end_angle - start_angle;
    let segments = ((sweep.abs() / std::f64::consts::TAU) * ARC_SEGMENTS_PER_TURN)
        .ceil()
        .max(1.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = start_angle + sweep * (i as f64 / segments as f64);
            to_world(center + DVec2::new(angle.cos(), angle.sin()) * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_to_world_flips_y() {
        assert_eq!(to_world(DVec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_arc_points_endpoints() {
        let points = arc_points(DVec2::ZERO, 10.0, 0.0, -std::f64::consts::FRAC_PI_2);
        let first = points[0];
        let last = points[points.len() - 1];
        assert_abs_diff_eq!(first.x, 10.0, epsilon = 1e-5);
        // -π/2 in the y-down frame is straight up on screen
        assert_abs_diff_eq!(last.y, 10.0, epsilon = 1e-5);
        assert!(points.len() >= 2);
    }

    #[test]
    fn test_zero_sweep_arc_is_a_point_pair() {
        let points = arc_points(DVec2::new(1.0, 1.0), 5.0, 0.0, 0.0);
        assert_eq!(points.len(), 2);
    }
}
