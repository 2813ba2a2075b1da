//! Fixed simulation constants, gathered in one resource.

use bevy::prelude::*;

use crate::types::{
    EARTH_ORBIT_RADIUS, EARTH_SIDEREAL_PERIOD, MARS_ECCENTRICITY, MARS_SEMI_MAJOR_AXIS,
    MARS_SIDEREAL_PERIOD, RAY_INTERVAL_DAYS,
};

/// Invalid simulation constants.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("eccentricity {0} outside [0, 1)")]
    Eccentricity(f64),

    #[error("ray interval must be at least one day")]
    ZeroRayInterval,
}

/// Constants driving the simulation.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Earth orbit radius in model units (one AU on screen).
    pub earth_orbit_radius: f64,
    /// Mars semi-major axis in model units.
    pub mars_semi_major_axis: f64,
    pub mars_eccentricity: f64,
    /// Sidereal periods in days.
    pub earth_period_days: f64,
    pub mars_period_days: f64,
    /// Days a ray waits before its final ray is recorded.
    pub ray_interval_days: u32,
    /// Radius change per grow/shrink command.
    pub ellipse_size_step: f64,
    /// Semi-minor radius change per eccentricity command.
    pub ellipse_eccentricity_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            earth_orbit_radius: EARTH_ORBIT_RADIUS,
            mars_semi_major_axis: MARS_SEMI_MAJOR_AXIS,
            mars_eccentricity: MARS_ECCENTRICITY,
            earth_period_days: EARTH_SIDEREAL_PERIOD,
            mars_period_days: MARS_SIDEREAL_PERIOD,
            ray_interval_days: RAY_INTERVAL_DAYS,
            ellipse_size_step: 5.0,
            ellipse_eccentricity_step: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Check that every constant describes valid geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("earth_orbit_radius", self.earth_orbit_radius),
            ("mars_semi_major_axis", self.mars_semi_major_axis),
            ("earth_period_days", self.earth_period_days),
            ("mars_period_days", self.mars_period_days),
            ("ellipse_size_step", self.ellipse_size_step),
            ("ellipse_eccentricity_step", self.ellipse_eccentricity_step),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if !(0.0..1.0).contains(&self.mars_eccentricity) {
            return Err(ConfigError::Eccentricity(self.mars_eccentricity));
        }

        if self.ray_interval_days == 0 {
            return Err(ConfigError::ZeroRayInterval);
        }

        Ok(())
    }

    /// Earth angular speed in radians per day.
    pub fn earth_angular_speed(&self) -> f64 {
        std::f64::consts::TAU / self.earth_period_days
    }

    /// Mars angular speed in radians per day.
    pub fn mars_angular_speed(&self) -> f64 {
        std::f64::consts::TAU / self.mars_period_days
    }

    /// Convert model units into AU.
    pub fn to_au(&self, units: f64) -> f64 {
        units / self.earth_orbit_radius
    }

    /// The configuration if valid, otherwise the defaults (logged).
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                error!("Invalid simulation config ({err}), falling back to defaults");
                Self::default()
            }
        }
    }
}
