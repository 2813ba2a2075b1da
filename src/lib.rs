//! Mars Triangulation - heliocentric vs. geocentric longitude simulator
//!
//! A library crate providing the orbital model, the observation experiment
//! state machine and the Bevy plugins that drive and draw them.

pub mod camera;
pub mod command;
pub mod config;
pub mod ellipse;
pub mod experiment;
pub mod input;
pub mod render;
pub mod simulator;
pub mod tick;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod proptest_experiment;
