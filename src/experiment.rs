//! Observation experiment state machine.
//!
//! The controller owns the orbital simulator, the day counters, the ray log
//! and the exploratory ellipse. Every user action is a method here; actions
//! that do not apply in the current state are ignored rather than rejected.
//!
//! ```text
//! Idle --start/castRay--> Running <--pause/resume--> Paused --enterEllipseMode--> EllipseExploring
//!   ^                                                                                   |
//!   +------------------------------- resetExperiment (from anywhere, restarts) ---------+
//! ```

use bevy::log::{debug, info};
use bevy::math::DVec2;

use crate::command::Command;
use crate::config::SimulationConfig;
use crate::ellipse::EllipseParams;
use crate::simulator::{OrbitalSimulator, OrbitalSnapshot};
use crate::types::Longitude;

/// Simulated time per animation frame. Fixed, so the day counters always
/// match the simulator's elapsed days.
pub const DAYS_PER_TICK: f64 = 1.0;

/// What the user is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Observing,
    EllipseExploring,
}

/// Coarse controller state, derived from [`ExperimentState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    EllipseExploring,
}

/// Counters and flags of the experiment.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExperimentState {
    /// Days since the last ray, capped at the ray interval.
    pub days_counter: u32,
    /// Days since the very first ray. Never capped.
    pub experiment_days: u64,
    pub is_paused: bool,
    /// A ray is waiting for its final ray.
    pub has_drawn_ray: bool,
    /// The final ray of the current interval has been recorded.
    pub has_drawn_final_ray: bool,
    pub experiment_begun: bool,
    /// The animation has been started at least once since the last reset.
    pub started: bool,
    pub mode: Mode,
}

/// Whether a command changed anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Outcome {
    pub fn applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Result of one animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Not running; simulated time did not move.
    Skipped,
    Advanced,
    /// Advanced, and the interval just completed.
    FinalRay(ObservationRay),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayKind {
    /// Cast by the user.
    First,
    /// Recorded automatically one interval after a first ray.
    Final,
}

/// A sight line from Earth through Mars, kept on the background layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationRay {
    pub kind: RayKind,
    pub earth: DVec2,
    pub mars: DVec2,
    pub experiment_day: u64,
    pub geocentric: Longitude,
}

impl ObservationRay {
    fn new(kind: RayKind, snapshot: &OrbitalSnapshot, experiment_day: u64) -> Self {
        Self {
            kind,
            earth: snapshot.earth,
            mars: snapshot.mars,
            experiment_day,
            geocentric: snapshot.geocentric,
        }
    }
}

/// Drives the simulator and owns all experiment state.
#[derive(Clone, Debug)]
pub struct ExperimentController {
    config: SimulationConfig,
    simulator: OrbitalSimulator,
    state: ExperimentState,
    ellipse: Option<EllipseParams>,
    rays: Vec<ObservationRay>,
    background_revision: u64,
}

impl Default for ExperimentController {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl ExperimentController {
    /// Controller in the Idle phase.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            simulator: OrbitalSimulator::new(&config),
            config,
            state: ExperimentState::default(),
            ellipse: None,
            rays: Vec::new(),
            background_revision: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn simulator(&self) -> &OrbitalSimulator {
        &self.simulator
    }

    pub fn state(&self) -> &ExperimentState {
        &self.state
    }

    /// The exploratory ellipse, present only in ellipse mode.
    pub fn ellipse(&self) -> Option<&EllipseParams> {
        self.ellipse.as_ref()
    }

    /// Every ray recorded since the last reset, oldest first.
    pub fn rays(&self) -> &[ObservationRay] {
        &self.rays
    }

    /// Changes whenever something on the persistent layer changes.
    pub fn background_revision(&self) -> u64 {
        self.background_revision
    }

    pub fn snapshot(&self) -> OrbitalSnapshot {
        self.simulator.snapshot()
    }

    pub fn phase(&self) -> Phase {
        if self.state.mode == Mode::EllipseExploring {
            Phase::EllipseExploring
        } else if !self.state.started {
            Phase::Idle
        } else if self.state.is_paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Days left before the pending ray's final ray, if one is pending.
    pub fn days_remaining(&self) -> Option<u32> {
        self.state
            .has_drawn_ray
            .then(|| self.config.ray_interval_days.saturating_sub(self.state.days_counter))
    }

    /// Route a named command to its method.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let outcome = match command {
            Command::Start => self.start(),
            Command::CastRay => self.cast_ray(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::EnterEllipseMode => self.enter_ellipse_mode(),
            Command::GrowSize => self.grow_size(),
            Command::ShrinkSize => self.shrink_size(),
            Command::IncreaseEccentricity => self.increase_eccentricity(),
            Command::DecreaseEccentricity => self.decrease_eccentricity(),
            Command::ResetExperiment => self.reset_experiment(),
        };
        if outcome == Outcome::Ignored {
            debug!("Ignored {command} in phase {:?}", self.phase());
        }
        outcome
    }

    /// Idle/Paused -> Running.
    pub fn start(&mut self) -> Outcome {
        match self.phase() {
            Phase::Idle | Phase::Paused => {
                self.state.started = true;
                self.state.is_paused = false;
                info!("Experiment running");
                Outcome::Applied
            }
            Phase::Running | Phase::EllipseExploring => Outcome::Ignored,
        }
    }

    /// Record a first ray at the current positions and start a new interval.
    ///
    /// Ignored while a ray is still waiting for its final ray, and in ellipse
    /// mode. Also starts or resumes the animation.
    pub fn cast_ray(&mut self) -> Outcome {
        if self.state.mode == Mode::EllipseExploring || self.state.has_drawn_ray {
            return Outcome::Ignored;
        }

        if self.state.has_drawn_final_ray {
            self.state.days_counter = 0;
        }
        self.state.has_drawn_ray = true;
        self.state.has_drawn_final_ray = false;
        if !self.state.experiment_begun {
            self.state.experiment_begun = true;
            info!("Experiment begun");
        }

        let ray = ObservationRay::new(
            RayKind::First,
            &self.simulator.snapshot(),
            self.state.experiment_days,
        );
        info!(
            "Ray cast on experiment day {}: Mars at {} (geocentric)",
            ray.experiment_day, ray.geocentric
        );
        self.push_ray(ray);

        self.state.started = true;
        self.state.is_paused = false;
        Outcome::Applied
    }

    /// Advance one frame. Does nothing unless Running.
    pub fn tick(&mut self) -> Tick {
        if self.phase() != Phase::Running {
            return Tick::Skipped;
        }

        self.simulator.advance(DAYS_PER_TICK);

        let interval = self.config.ray_interval_days;
        if self.state.has_drawn_ray && self.state.days_counter < interval {
            self.state.days_counter += 1;
        }
        if self.state.experiment_begun {
            self.state.experiment_days += 1;
        }

        if self.state.has_drawn_ray
            && self.state.days_counter >= interval
            && !self.state.has_drawn_final_ray
        {
            let ray = ObservationRay::new(
                RayKind::Final,
                &self.simulator.snapshot(),
                self.state.experiment_days,
            );
            self.state.has_drawn_final_ray = true;
            self.state.has_drawn_ray = false;
            info!(
                "Final ray after {interval} days: Mars at {} (geocentric)",
                ray.geocentric
            );
            self.push_ray(ray);
            return Tick::FinalRay(ray);
        }

        Tick::Advanced
    }

    pub fn pause(&mut self) -> Outcome {
        if self.phase() != Phase::Running {
            return Outcome::Ignored;
        }
        self.state.is_paused = true;
        info!("Experiment paused on day {}", self.state.experiment_days);
        Outcome::Applied
    }

    pub fn resume(&mut self) -> Outcome {
        if self.phase() != Phase::Paused {
            return Outcome::Ignored;
        }
        self.state.is_paused = false;
        info!("Experiment resumed");
        Outcome::Applied
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) -> Outcome {
        match self.phase() {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::EllipseExploring => Outcome::Ignored,
        }
    }

    /// Switch to ellipse exploration, seeded as a circle matching Earth's orbit.
    /// Only allowed while paused.
    pub fn enter_ellipse_mode(&mut self) -> Outcome {
        if self.phase() != Phase::Paused {
            return Outcome::Ignored;
        }
        self.state.mode = Mode::EllipseExploring;
        self.ellipse = Some(EllipseParams::circle(
            DVec2::ZERO,
            self.config.earth_orbit_radius,
        ));
        self.background_revision += 1;
        info!("Entered ellipse mode");
        Outcome::Applied
    }

    pub fn grow_size(&mut self) -> Outcome {
        let step = self.config.ellipse_size_step;
        self.adjust_ellipse(|e| e.grow(step))
    }

    pub fn shrink_size(&mut self) -> Outcome {
        let step = self.config.ellipse_size_step;
        self.adjust_ellipse(|e| e.shrink(step))
    }

    pub fn increase_eccentricity(&mut self) -> Outcome {
        let step = self.config.ellipse_eccentricity_step;
        self.adjust_ellipse(|e| e.increase_eccentricity(step))
    }

    pub fn decrease_eccentricity(&mut self) -> Outcome {
        let step = self.config.ellipse_eccentricity_step;
        self.adjust_ellipse(|e| e.decrease_eccentricity(step))
    }

    /// Back to angle 0 and zeroed counters, then running again.
    pub fn reset_experiment(&mut self) -> Outcome {
        self.simulator.reset();
        self.state = ExperimentState {
            started: true,
            ..ExperimentState::default()
        };
        self.ellipse = None;
        self.rays.clear();
        self.background_revision += 1;
        info!("Experiment reset");
        Outcome::Applied
    }

    fn adjust_ellipse(&mut self, adjust: impl FnOnce(&mut EllipseParams)) -> Outcome {
        let Some(ellipse) = self.ellipse.as_mut() else {
            return Outcome::Ignored;
        };
        let before = *ellipse;
        adjust(ellipse);
        if *ellipse == before {
            return Outcome::Ignored;
        }
        debug!(
            "Ellipse rx={:.1} ry={:.1} e={:.4}",
            ellipse.rx,
            ellipse.ry,
            ellipse.eccentricity()
        );
        Outcome::Applied
    }

    fn push_ray(&mut self, ray: ObservationRay) {
        self.rays.push(ray);
        self.background_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_starts_idle() {
        let controller = ExperimentController::default();
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.state(), &ExperimentState::default());
    }

    #[test]
    fn test_tick_skipped_while_idle() {
        let mut controller = ExperimentController::default();
        assert_eq!(controller.tick(), Tick::Skipped);
        assert_eq!(controller.simulator().elapsed_days(), 0.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut controller = ExperimentController::default();
        assert_eq!(controller.start(), Outcome::Applied);
        assert_eq!(controller.start(), Outcome::Ignored);
        assert_eq!(controller.phase(), Phase::Running);
    }

    #[test]
    fn test_cast_ray_starts_interval() {
        let mut controller = fixtures::running();
        assert_eq!(controller.cast_ray(), Outcome::Applied);
        let state = controller.state();
        assert!(state.has_drawn_ray);
        assert!(!state.has_drawn_final_ray);
        assert!(state.experiment_begun);
        assert_eq!(controller.rays().len(), 1);
        assert_eq!(controller.rays()[0].kind, RayKind::First);
        assert_eq!(controller.days_remaining(), Some(687));
    }

    #[test]
    fn test_cast_ray_ignored_while_pending() {
        let mut controller = fixtures::running();
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 10);
        assert_eq!(controller.cast_ray(), Outcome::Ignored);
        assert_eq!(controller.state().days_counter, 10);
        assert_eq!(controller.rays().len(), 1);
    }

    #[test]
    fn test_cast_ray_from_idle_starts_running() {
        let mut controller = ExperimentController::default();
        controller.cast_ray();
        assert_eq!(controller.phase(), Phase::Running);
    }

    #[test]
    fn test_final_ray_after_interval() {
        let mut controller = fixtures::running();
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 686);
        assert!(!controller.state().has_drawn_final_ray);
        assert_eq!(controller.days_remaining(), Some(1));

        let tick = controller.tick();
        assert!(matches!(tick, Tick::FinalRay(ray) if ray.kind == RayKind::Final));
        let state = controller.state();
        assert_eq!(state.days_counter, 687);
        assert!(state.has_drawn_final_ray);
        assert!(!state.has_drawn_ray);
        assert_eq!(controller.days_remaining(), None);
    }

    #[test]
    fn test_final_ray_sees_mars_at_same_heliocentric_position() {
        let mut controller = fixtures::running();
        fixtures::tick_n(&mut controller, 40);
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 687);
        let [first, last] = controller.rays() else {
            panic!("expected two rays");
        };
        assert_abs_diff_eq!(first.mars.distance(last.mars), 0.0, epsilon = 1e-6);
        // Earth is 687 days further along, so the sight lines differ
        assert!(first.earth.distance(last.earth) > 1.0);
    }

    #[test]
    fn test_counter_holds_after_final_ray() {
        let mut controller = fixtures::running();
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 800);
        assert_eq!(controller.state().days_counter, 687);
        assert_eq!(controller.state().experiment_days, 800);
        assert_eq!(controller.rays().len(), 2);
    }

    #[test]
    fn test_recast_resets_counter() {
        let mut controller = fixtures::running();
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 687);
        assert_eq!(controller.cast_ray(), Outcome::Applied);
        assert_eq!(controller.state().days_counter, 0);
        assert!(controller.state().has_drawn_ray);
        assert!(!controller.state().has_drawn_final_ray);
    }

    #[test]
    fn test_pause_stops_time() {
        let mut controller = fixtures::running();
        controller.cast_ray();
        fixtures::tick_n(&mut controller, 5);
        controller.pause();
        fixtures::tick_n(&mut controller, 50);
        assert_eq!(controller.state().days_counter, 5);
        assert_eq!(controller.simulator().elapsed_days(), 5.0);
        controller.resume();
        controller.tick();
        assert_eq!(controller.state().days_counter, 6);
    }

    #[test]
    fn test_toggle_pause() {
        let mut controller = fixtures::running();
        controller.toggle_pause();
        assert_eq!(controller.phase(), Phase::Paused);
        controller.toggle_pause();
        assert_eq!(controller.phase(), Phase::Running);
        assert_eq!(ExperimentController::default().toggle_pause(), Outcome::Ignored);
    }

    #[test]
    fn test_ellipse_mode_requires_pause() {
        let mut controller = fixtures::running();
        let before = controller.state().clone();
        assert_eq!(controller.enter_ellipse_mode(), Outcome::Ignored);
        assert_eq!(controller.state(), &before);
        assert!(controller.ellipse().is_none());
    }

    #[test]
    fn test_ellipse_mode_seeds_circle() {
        let mut controller = fixtures::ellipse_mode();
        let ellipse = controller.ellipse().copied().unwrap();
        assert_eq!(ellipse.rx, 200.0);
        assert_eq!(ellipse.ry, 200.0);
        assert_eq!(controller.phase(), Phase::EllipseExploring);

        // Terminal until reset
        assert_eq!(controller.resume(), Outcome::Ignored);
        assert_eq!(controller.cast_ray(), Outcome::Ignored);
        assert_eq!(controller.tick(), Tick::Skipped);
    }

    #[test]
    fn test_ellipse_adjustments() {
        let mut controller = fixtures::ellipse_mode();
        controller.grow_size();
        controller.increase_eccentricity();
        let ellipse = controller.ellipse().copied().unwrap();
        assert_eq!(ellipse.rx, 205.0);
        assert_eq!(ellipse.ry, 203.0);
        assert!(ellipse.eccentricity() > 0.0);
    }

    #[test]
    fn test_ellipse_adjustments_ignored_outside_mode() {
        let mut controller = fixtures::running();
        assert_eq!(controller.grow_size(), Outcome::Ignored);
        assert_eq!(controller.decrease_eccentricity(), Outcome::Ignored);
    }

    #[test]
    fn test_decrease_on_circle_is_ignored() {
        let mut controller = fixtures::ellipse_mode();
        assert_eq!(controller.decrease_eccentricity(), Outcome::Ignored);
    }

    #[test]
    fn test_reset_from_ellipse_mode() {
        let mut controller = fixtures::ellipse_mode();
        let revision = controller.background_revision();
        controller.reset_experiment();
        assert!(controller.ellipse().is_none());
        assert!(controller.rays().is_empty());
        assert_eq!(controller.phase(), Phase::Running);
        assert!(controller.background_revision() > revision);
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut controller = ExperimentController::default();
        assert!(controller.dispatch(Command::Start).applied());
        assert!(controller.dispatch(Command::Pause).applied());
        assert!(controller.dispatch(Command::EnterEllipseMode).applied());
        assert!(controller.dispatch(Command::ShrinkSize).applied());
        assert_eq!(controller.ellipse().map(|e| e.rx), Some(195.0));
        assert!(controller.dispatch(Command::ResetExperiment).applied());
        assert_eq!(controller.phase(), Phase::Running);
    }
}
