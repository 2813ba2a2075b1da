//! Frame plan tests using the recording renderer.
//!
//! Verifies which artifacts persist on the background layer and which are
//! redrawn on the dynamic layer.

use mars_triangulation::experiment::ExperimentController;
use mars_triangulation::render::plan::{
    DrawCommand, FramePlan, Layer, RecordingRenderer, RenderSettings,
};

fn running_with_ray() -> ExperimentController {
    let mut controller = ExperimentController::default();
    controller.start();
    controller.cast_ray();
    controller
}

fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
    commands.iter().filter(|c| pred(c)).count()
}

#[test]
fn test_replay_order_background_then_dynamic() {
    let controller = running_with_ray();
    let plan = FramePlan::build(&controller, &RenderSettings::default());
    let mut recorder = RecordingRenderer::default();
    plan.replay(&mut recorder);

    assert_eq!(recorder.commands[0], DrawCommand::Clear(Layer::Background));
    let dynamic_start = recorder
        .commands
        .iter()
        .position(|c| *c == DrawCommand::Clear(Layer::Dynamic))
        .unwrap();
    assert_eq!(dynamic_start, plan.background.len());
    assert_eq!(
        recorder.commands.len(),
        plan.background.len() + plan.dynamic.len()
    );
}

#[test]
fn test_text_only_on_dynamic_layer() {
    let controller = running_with_ray();
    let plan = FramePlan::build(&controller, &RenderSettings::default());
    let is_text = |c: &DrawCommand| matches!(c, DrawCommand::Text { .. });
    assert_eq!(count(plan.layer(Layer::Background), is_text), 0);
    assert!(count(plan.layer(Layer::Dynamic), is_text) > 0);
}

#[test]
fn test_background_revision_tracks_rays() {
    let mut controller = running_with_ray();
    let settings = RenderSettings::default();
    let before = FramePlan::build(&controller, &settings);

    for _ in 0..10 {
        controller.tick();
    }
    let mid = FramePlan::build(&controller, &settings);
    assert_eq!(before.background_revision, mid.background_revision);
    assert_eq!(before.background, mid.background);
    assert_ne!(before.dynamic, mid.dynamic);

    for _ in 0..700 {
        controller.tick();
    }
    let after = FramePlan::build(&controller, &settings);
    assert!(after.background_revision > mid.background_revision);
    let is_arrow = |c: &DrawCommand| matches!(c, DrawCommand::Arrow { .. });
    assert_eq!(count(after.layer(Layer::Background), is_arrow), 2);
}

#[test]
fn test_overlay_reports_counters() {
    let mut controller = running_with_ray();
    for _ in 0..12 {
        controller.tick();
    }
    let mut recorder = RecordingRenderer::default();
    FramePlan::build(&controller, &RenderSettings::default()).replay(&mut recorder);
    let texts: Vec<&str> = recorder.texts().collect();
    assert!(texts.contains(&"Days Counter: 12"));
    assert!(texts.contains(&"Experiment Days: 12"));
    assert!(texts.contains(&"Simulated Days: 12"));
    assert!(texts.contains(&"Final ray in 675 days"));
    assert!(texts.iter().any(|t| t.starts_with("Geocentric Longitude (Mars): ")));
}

#[test]
fn test_simulated_days_count_before_first_ray() {
    let mut controller = ExperimentController::default();
    controller.start();
    for _ in 0..20 {
        controller.tick();
    }
    controller.cast_ray();
    for _ in 0..5 {
        controller.tick();
    }
    let mut recorder = RecordingRenderer::default();
    FramePlan::build(&controller, &RenderSettings::default()).replay(&mut recorder);
    let texts: Vec<&str> = recorder.texts().collect();
    assert!(texts.contains(&"Experiment Days: 5"));
    assert!(texts.contains(&"Simulated Days: 25"));
}

#[test]
fn test_each_frame_draws_two_arcs() {
    let controller = running_with_ray();
    let plan = FramePlan::build(&controller, &RenderSettings::default());
    let is_arc = |c: &DrawCommand| matches!(c, DrawCommand::Arc { .. });
    assert_eq!(count(plan.layer(Layer::Dynamic), is_arc), 2);
}
