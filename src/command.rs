//! Named commands accepted by the experiment controller.
//!
//! Keyboard keys, panel buttons and scripted input all funnel into
//! [`Command`], which [`crate::experiment::ExperimentController::dispatch`]
//! routes to the matching controller method.

use std::fmt;
use std::str::FromStr;

/// Unknown command name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command `{0}`")]
pub struct ParseCommandError(pub String);

/// Discrete user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    CastRay,
    Pause,
    Resume,
    TogglePause,
    EnterEllipseMode,
    GrowSize,
    ShrinkSize,
    IncreaseEccentricity,
    DecreaseEccentricity,
    ResetExperiment,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Start,
        Command::CastRay,
        Command::Pause,
        Command::Resume,
        Command::TogglePause,
        Command::EnterEllipseMode,
        Command::GrowSize,
        Command::ShrinkSize,
        Command::IncreaseEccentricity,
        Command::DecreaseEccentricity,
        Command::ResetExperiment,
    ];

    /// Stable name used by scripted input.
    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::CastRay => "castRay",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::EnterEllipseMode => "enterEllipseMode",
            Command::GrowSize => "growSize",
            Command::ShrinkSize => "shrinkSize",
            Command::IncreaseEccentricity => "increaseEccentricity",
            Command::DecreaseEccentricity => "decreaseEccentricity",
            Command::ResetExperiment => "resetExperiment",
        }
    }

    /// Whether this command adjusts the exploratory ellipse.
    pub fn is_ellipse_adjustment(self) -> bool {
        matches!(
            self,
            Command::GrowSize
                | Command::ShrinkSize
                | Command::IncreaseEccentricity
                | Command::DecreaseEccentricity
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCommandError(trimmed.to_string()))
    }
}

/// Parse a whitespace- or comma-separated list of command names.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ParseCommandError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
