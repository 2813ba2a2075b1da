//! Per-frame driver for the experiment.
//!
//! Input systems write [`ControlCommand`] messages; this plugin applies them
//! to the [`Experiment`] resource and then ticks it exactly once per frame.
//! These are the only systems that mutate the experiment.

use bevy::prelude::*;

use crate::command::Command;
use crate::config::SimulationConfig;
use crate::experiment::{ExperimentController, ObservationRay, Tick};

/// System set for ordering experiment-related systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExperimentSystemSet {
    /// Keyboard and panel input producing [`ControlCommand`]s.
    Input,
    /// Commands applied to the controller.
    Apply,
    /// One simulated day.
    Tick,
    /// Drawing from the post-tick state.
    Render,
}

/// The experiment controller as a Bevy resource.
#[derive(Resource, Deref, DerefMut, Debug, Default)]
pub struct Experiment(pub ExperimentController);

/// A user action heading for the controller.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlCommand(pub Command);

/// Emitted when a ray interval completes.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FinalRayRecorded(pub ObservationRay);

/// Plugin owning the experiment resource and its tick.
pub struct TickPlugin;

impl Plugin for TickPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default()
            .validated_or_default();

        app.insert_resource(Experiment(ExperimentController::new(config.clone())))
            .insert_resource(config)
            .add_message::<ControlCommand>()
            .add_message::<FinalRayRecorded>()
            .configure_sets(
                Update,
                (
                    ExperimentSystemSet::Input,
                    ExperimentSystemSet::Apply,
                    ExperimentSystemSet::Tick,
                    ExperimentSystemSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    apply_commands.in_set(ExperimentSystemSet::Apply),
                    advance_experiment.in_set(ExperimentSystemSet::Tick),
                ),
            );
    }
}

/// Start the animation on launch, as the experiment expects bodies in motion.
pub fn autostart(mut commands: MessageWriter<ControlCommand>) {
    commands.write(ControlCommand(Command::Start));
}

fn apply_commands(
    mut commands: MessageReader<ControlCommand>,
    mut experiment: ResMut<Experiment>,
) {
    for ControlCommand(command) in commands.read() {
        experiment.dispatch(*command);
    }
}

/// One simulated day per frame. Skipped entirely while paused.
fn advance_experiment(
    mut experiment: ResMut<Experiment>,
    mut final_rays: MessageWriter<FinalRayRecorded>,
) {
    if let Tick::FinalRay(ray) = experiment.tick() {
        final_rays.write(FinalRayRecorded(ray));
    }
}
