//! Core types and constants for the Earth/Mars longitude simulation.
//!
//! All positions live in the model frame: Sun at the origin, +x to the right,
//! +y pointing *down* (screen-like). Angles decrease over time, which in this
//! frame reads as counter-clockwise (prograde) motion on screen.

use std::fmt;

use bevy::math::DVec2;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Earth's orbit radius in model units. Also the length of one AU on screen.
pub const EARTH_ORBIT_RADIUS: f64 = 200.0;

/// Mars semi-major axis in model units (~1.5 AU).
pub const MARS_SEMI_MAJOR_AXIS: f64 = 300.0;

/// Mars orbital eccentricity.
pub const MARS_ECCENTRICITY: f64 = 0.0934;

/// Earth sidereal period in days.
pub const EARTH_SIDEREAL_PERIOD: f64 = 365.25;

/// Mars sidereal period in days.
pub const MARS_SIDEREAL_PERIOD: f64 = 687.0;

/// Days between a ray and its final ray: one Mars sidereal period.
pub const RAY_INTERVAL_DAYS: u32 = 687;

/// The two bodies that move in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Earth,
    Mars,
}

impl BodyId {
    pub const ALL: [BodyId; 2] = [BodyId::Earth, BodyId::Mars];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            BodyId::Earth => "Earth",
            BodyId::Mars => "Mars",
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A longitude in degrees, measured in the model frame and kept in [0, 360).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Longitude(f64);

impl Longitude {
    /// Build from an angle in radians (any range).
    pub fn from_radians(angle: f64) -> Self {
        Self::from_degrees(angle * RAD_TO_DEG)
    }

    /// Build from an angle in degrees (any range).
    pub fn from_degrees(degrees: f64) -> Self {
        Self(normalize_degrees(degrees))
    }

    /// Model-frame value in [0, 360).
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Astronomical convention: counter-clockwise positive as seen from the
    /// north ecliptic pole. The model frame is y-down, so this is `360 - frame`.
    pub fn ecliptic(self) -> f64 {
        normalize_degrees(360.0 - self.0)
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.ecliptic())
    }
}

/// Normalize degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Normalize radians into [0, 2π).
pub fn normalize_radians(angle: f64) -> f64 {
    let a = angle.rem_euclid(std::f64::consts::TAU);
    if a >= std::f64::consts::TAU { 0.0 } else { a }
}

/// Direction of `to` as seen from `from`, via atan2, in the model frame.
pub fn direction_longitude(from: DVec2, to: DVec2) -> Longitude {
    let d = to - from;
    Longitude::from_radians(d.y.atan2(d.x))
}
