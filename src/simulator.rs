//! Orbital model for Earth and Mars around a fixed Sun.
//!
//! Bodies move at constant angular speed (no Kepler equation): the angle is
//! the parametric angle of the orbit, decremented once per simulated day.
//! Longitudes are derived from the current angles on demand and never stored.

use bevy::math::DVec2;

use crate::config::SimulationConfig;
use crate::types::{BodyId, Longitude, direction_longitude, normalize_radians};

/// Shape of a body's path around the Sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitGeometry {
    /// Circle centred on the Sun.
    Circular { radius: f64 },
    /// Ellipse with the Sun at one focus. The focus lies on the +x side of the
    /// centre, so the centre sits at `(-a·e, 0)`.
    Elliptical {
        semi_major_axis: f64,
        eccentricity: f64,
        semi_minor_axis: f64,
    },
}

impl OrbitGeometry {
    /// Ellipse geometry from semi-major axis and eccentricity.
    pub fn ellipse(semi_major_axis: f64, eccentricity: f64) -> Self {
        Self::Elliptical {
            semi_major_axis,
            eccentricity,
            semi_minor_axis: semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt(),
        }
    }

    /// Point on the orbit at parametric angle `angle` (radians).
    pub fn point_at(&self, angle: f64) -> DVec2 {
        match *self {
            OrbitGeometry::Circular { radius } => {
                DVec2::new(radius * angle.cos(), radius * angle.sin())
            }
            OrbitGeometry::Elliptical {
                semi_major_axis,
                semi_minor_axis,
                ..
            } => {
                self.center()
                    + DVec2::new(
                        semi_major_axis * angle.cos(),
                        semi_minor_axis * angle.sin(),
                    )
            }
        }
    }

    /// Geometric centre of the orbit (the Sun sits at the origin).
    pub fn center(&self) -> DVec2 {
        match *self {
            OrbitGeometry::Circular { .. } => DVec2::ZERO,
            OrbitGeometry::Elliptical {
                semi_major_axis,
                eccentricity,
                ..
            } => DVec2::new(-semi_major_axis * eccentricity, 0.0),
        }
    }

    /// Half-extents `(rx, ry)` of the orbit.
    pub fn radii(&self) -> DVec2 {
        match *self {
            OrbitGeometry::Circular { radius } => DVec2::splat(radius),
            OrbitGeometry::Elliptical {
                semi_major_axis,
                semi_minor_axis,
                ..
            } => DVec2::new(semi_major_axis, semi_minor_axis),
        }
    }

    pub fn eccentricity(&self) -> f64 {
        match *self {
            OrbitGeometry::Circular { .. } => 0.0,
            OrbitGeometry::Elliptical { eccentricity, .. } => eccentricity,
        }
    }
}

/// One moving body: its parametric angle, speed and path.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalBody {
    /// Parametric angle in radians. Decreases every day; not normalized.
    pub angle: f64,
    /// Radians per day.
    pub angular_speed: f64,
    pub geometry: OrbitGeometry,
}

impl OrbitalBody {
    pub fn new(angular_speed: f64, geometry: OrbitGeometry) -> Self {
        Self {
            angle: 0.0,
            angular_speed,
            geometry,
        }
    }

    /// Current angle folded into [0, 2π).
    pub fn normalized_angle(&self) -> f64 {
        normalize_radians(self.angle)
    }

    /// Cartesian position relative to the Sun.
    pub fn position(&self) -> DVec2 {
        self.geometry.point_at(self.angle)
    }

    fn advance(&mut self, dt_days: f64) {
        self.angle -= self.angular_speed * dt_days;
    }
}

/// Immutable view of the orbital state after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalSnapshot {
    pub earth: DVec2,
    pub mars: DVec2,
    /// Earth's angle as seen from the Sun.
    pub heliocentric: Longitude,
    /// Mars's angle as seen from the Sun.
    pub mars_heliocentric: Longitude,
    /// Direction from Earth to Mars.
    pub geocentric: Longitude,
    pub elapsed_days: f64,
}

/// Owns Earth and Mars and moves them through time.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalSimulator {
    earth: OrbitalBody,
    mars: OrbitalBody,
    elapsed_days: f64,
}

impl Default for OrbitalSimulator {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl OrbitalSimulator {
    /// Build both bodies at angle 0 from the configured constants.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            earth: OrbitalBody::new(
                config.earth_angular_speed(),
                OrbitGeometry::Circular {
                    radius: config.earth_orbit_radius,
                },
            ),
            mars: OrbitalBody::new(
                config.mars_angular_speed(),
                OrbitGeometry::ellipse(config.mars_semi_major_axis, config.mars_eccentricity),
            ),
            elapsed_days: 0.0,
        }
    }

    /// Move every body by `angular_speed * dt_days`, in the decreasing direction.
    pub fn advance(&mut self, dt_days: f64) {
        self.earth.advance(dt_days);
        self.mars.advance(dt_days);
        self.elapsed_days += dt_days;
    }

    pub fn body(&self, id: BodyId) -> &OrbitalBody {
        match id {
            BodyId::Earth => &self.earth,
            BodyId::Mars => &self.mars,
        }
    }

    pub fn position_of(&self, id: BodyId) -> DVec2 {
        self.body(id).position()
    }

    /// Earth's angle in degrees, in [0, 360).
    pub fn heliocentric_longitude(&self) -> Longitude {
        Longitude::from_radians(self.earth.angle)
    }

    /// Mars's angle in degrees, in [0, 360).
    pub fn mars_heliocentric_longitude(&self) -> Longitude {
        Longitude::from_radians(self.mars.angle)
    }

    /// Apparent direction of Mars from Earth, in [0, 360).
    pub fn geocentric_longitude(earth_pos: DVec2, mars_pos: DVec2) -> Longitude {
        direction_longitude(earth_pos, mars_pos)
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Put both bodies back at angle 0.
    pub fn reset(&mut self) {
        self.earth.angle = 0.0;
        self.mars.angle = 0.0;
        self.elapsed_days = 0.0;
    }

    pub fn snapshot(&self) -> OrbitalSnapshot {
        let earth = self.earth.position();
        let mars = self.mars.position();
        OrbitalSnapshot {
            earth,
            mars,
            heliocentric: self.heliocentric_longitude(),
            mars_heliocentric: self.mars_heliocentric_longitude(),
            geocentric: Self::geocentric_longitude(earth, mars),
            elapsed_days: self.elapsed_days,
        }
    }
}
