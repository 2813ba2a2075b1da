//! Test utilities for the experiment controller.
//!
//! Provides fixtures that put a controller into a known phase and
//! assertions for angle comparisons that wrap around 2π.

use crate::experiment::ExperimentController;

/// Fixtures for building controllers in a given phase.
pub mod fixtures {
    use super::*;

    /// Controller that has been started and is running.
    pub fn running() -> ExperimentController {
        let mut controller = ExperimentController::default();
        controller.start();
        controller
    }

    /// Controller that was paused and then switched to ellipse mode.
    pub fn ellipse_mode() -> ExperimentController {
        let mut controller = running();
        controller.pause();
        controller.enter_ellipse_mode();
        controller
    }

    /// Run `n` animation frames.
    pub fn tick_n(controller: &mut ExperimentController, n: usize) {
        for _ in 0..n {
            controller.tick();
        }
    }
}

/// Assertions shared by unit and property tests.
pub mod assertions {
    use std::f64::consts::TAU;

    /// Smallest distance between two angles in radians, in [0, π].
    pub fn angle_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }
}
