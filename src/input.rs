//! Keyboard input for the experiment.
//!
//! Keys are looked up in [`KeyBindings`] and turned into [`ControlCommand`]
//! messages; the controller never sees raw key codes.

use bevy::prelude::*;

use crate::command::Command;
use crate::tick::{ControlCommand, ExperimentSystemSet};

/// Key-to-command table.
#[derive(Resource, Clone, Debug)]
pub struct KeyBindings {
    pub bindings: Vec<(KeyCode, Command)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::Space, Command::CastRay),
                (KeyCode::KeyP, Command::TogglePause),
                (KeyCode::KeyE, Command::EnterEllipseMode),
                (KeyCode::KeyR, Command::ResetExperiment),
                (KeyCode::ArrowUp, Command::GrowSize),
                (KeyCode::ArrowDown, Command::ShrinkSize),
                (KeyCode::ArrowRight, Command::IncreaseEccentricity),
                (KeyCode::ArrowLeft, Command::DecreaseEccentricity),
            ],
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any.
    pub fn command_for(&self, key: KeyCode) -> Option<Command> {
        self.bindings
            .iter()
            .find_map(|&(bound, command)| (bound == key).then_some(command))
    }

    /// Key bound to `command`, for hints in the UI.
    pub fn key_for(&self, command: Command) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find_map(|&(key, bound)| (bound == command).then_some(key))
    }
}

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>().add_systems(
            Update,
            keyboard_commands.in_set(ExperimentSystemSet::Input),
        );
    }
}

/// Emit a command for every bound key pressed this frame.
fn keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut commands: MessageWriter<ControlCommand>,
) {
    for key in keys.get_just_pressed() {
        if let Some(command) = bindings.command_for(*key) {
            debug!("{key:?} -> {command}");
            commands.write(ControlCommand(command));
        }
    }
}
