//! Property-based tests for the orbital model and experiment using proptest.
//!
//! These tests verify the experiment's invariants across arbitrary tick
//! counts and arbitrary command sequences.

use proptest::prelude::*;

use crate::command::Command;
use crate::ellipse::{EllipseParams, eccentricity};
use crate::experiment::{ExperimentController, Phase};
use crate::simulator::OrbitalSimulator;
use crate::test_utils::{assertions, fixtures};
use crate::types::BodyId;

fn any_command() -> impl Strategy<Value = Command> {
    prop::sample::select(Command::ALL.to_vec())
}

/// A command or a tick.
#[derive(Clone, Debug)]
enum Step {
    Command(Command),
    Ticks(usize),
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any_command().prop_map(Step::Command),
        (1usize..300).prop_map(Step::Ticks),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After n days each angle is `-n * angular_speed`, modulo 2π.
    #[test]
    fn prop_angle_after_n_ticks(n in 0usize..3000) {
        let mut controller = fixtures::running();
        fixtures::tick_n(&mut controller, n);
        let simulator = controller.simulator();
        for id in BodyId::ALL {
            let body = simulator.body(id);
            let expected = -(n as f64) * body.angular_speed;
            prop_assert!(
                assertions::angle_distance(body.normalized_angle(), expected) < 1e-9,
                "{id} angle {} vs expected {}", body.normalized_angle(), expected
            );
        }
    }

    /// Both longitudes always land in [0, 360).
    #[test]
    fn prop_longitudes_in_range(days in 0.0f64..10_000.0) {
        let mut simulator = OrbitalSimulator::default();
        simulator.advance(days);
        let snapshot = simulator.snapshot();
        for longitude in [snapshot.heliocentric, snapshot.geocentric, snapshot.mars_heliocentric] {
            prop_assert!((0.0..360.0).contains(&longitude.degrees()));
            prop_assert!((0.0..360.0).contains(&longitude.ecliptic()));
        }
    }

    /// Eccentricity stays in [0, 1) for any positive radii.
    #[test]
    fn prop_eccentricity_in_unit_interval(rx in 1.0f64..1000.0, ry in 1.0f64..1000.0) {
        let e = eccentricity(rx, ry);
        prop_assert!((0.0..1.0).contains(&e));
    }

    /// Any sequence of adjustments keeps radii floored and rx >= ry.
    #[test]
    fn prop_ellipse_adjustments_stay_valid(
        steps in prop::collection::vec(0u8..4, 0..400),
    ) {
        let mut ellipse = EllipseParams::circle(bevy::math::DVec2::ZERO, 200.0);
        for step in steps {
            match step {
                0 => ellipse.grow(5.0),
                1 => ellipse.shrink(5.0),
                2 => ellipse.increase_eccentricity(2.0),
                _ => ellipse.decrease_eccentricity(2.0),
            }
            prop_assert!(ellipse.rx >= 1.0 && ellipse.ry >= 1.0);
            prop_assert!(ellipse.rx >= ellipse.ry);
            prop_assert!((0.0..1.0).contains(&ellipse.eccentricity()));
        }
    }

    /// Flag and counter invariants hold under arbitrary input.
    #[test]
    fn prop_state_invariants(steps in prop::collection::vec(any_step(), 0..40)) {
        let mut controller = ExperimentController::default();
        let interval = controller.config().ray_interval_days;
        for step in steps {
            let before = controller.state().clone();
            match step {
                Step::Command(command) => {
                    let phase = controller.phase();
                    controller.dispatch(command);
                    if command == Command::EnterEllipseMode && phase != Phase::Paused {
                        prop_assert_eq!(controller.state(), &before);
                    }
                }
                Step::Ticks(n) => {
                    let mut final_rays = 0;
                    for _ in 0..n {
                        let prev = controller.state().clone();
                        if let crate::experiment::Tick::FinalRay(_) = controller.tick() {
                            final_rays += 1;
                        }
                        let now = controller.state();
                        if prev.has_drawn_ray && controller.phase() == Phase::Running {
                            prop_assert_eq!(now.days_counter, prev.days_counter + 1);
                        }
                        prop_assert!(now.experiment_days >= prev.experiment_days);
                    }
                    // No cast happens during ticks, so at most one final ray
                    prop_assert!(final_rays <= 1);
                }
            }
            let state = controller.state();
            prop_assert!(!(state.has_drawn_ray && state.has_drawn_final_ray));
            prop_assert!(state.days_counter <= interval);
        }
    }
}
