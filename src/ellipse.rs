//! Exploratory ellipse used to play with eccentricity, perigee and apogee.

use bevy::math::DVec2;

/// Radii never go below this.
pub const MIN_RADIUS: f64 = 1.0;

/// Ellipse with the Sun kept at one focus.
///
/// `center` is the geometric centre; it is re-derived from the focus after
/// every adjustment so that the focus never moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseParams {
    pub center: DVec2,
    pub rx: f64,
    pub ry: f64,
    focus: DVec2,
}

impl EllipseParams {
    /// A circle of `radius` around `focus`.
    pub fn circle(focus: DVec2, radius: f64) -> Self {
        let radius = radius.max(MIN_RADIUS);
        Self {
            center: focus,
            rx: radius,
            ry: radius,
            focus,
        }
    }

    /// Point the ellipse is anchored to (the Sun).
    pub fn focus(&self) -> DVec2 {
        self.focus
    }

    /// `sqrt(1 - (minor/major)²)`, in [0, 1). Zero if either radius is zero.
    pub fn eccentricity(&self) -> f64 {
        eccentricity(self.rx, self.ry)
    }

    /// Distance from the centre to either focus.
    pub fn focal_distance(&self) -> f64 {
        let major = self.rx.max(self.ry);
        let minor = self.rx.min(self.ry);
        (major * major - minor * minor).max(0.0).sqrt()
    }

    /// Closest distance from the focus, in model units.
    pub fn perigee(&self) -> f64 {
        self.rx.max(self.ry) - self.focal_distance()
    }

    /// Farthest distance from the focus, in model units.
    pub fn apogee(&self) -> f64 {
        self.rx.max(self.ry) + self.focal_distance()
    }

    pub fn grow(&mut self, step: f64) {
        self.rx += step;
        self.ry += step;
        self.recenter();
    }

    pub fn shrink(&mut self, step: f64) {
        self.rx = (self.rx - step).max(MIN_RADIUS);
        self.ry = (self.ry - step).max(MIN_RADIUS);
        self.recenter();
    }

    /// Flatten the ellipse. `rx` is clamped so it never drops below `ry`.
    pub fn increase_eccentricity(&mut self, step: f64) {
        self.ry = (self.ry - step).max(MIN_RADIUS);
        self.rx = self.rx.max(self.ry);
        self.recenter();
    }

    /// Round the ellipse out. `rx` has no upper bound; `ry` stops at `rx`.
    pub fn decrease_eccentricity(&mut self, step: f64) {
        self.ry = (self.ry + step).min(self.rx);
        self.recenter();
    }

    fn recenter(&mut self) {
        // Major axis along x: the focus sits on the +x side of the centre
        let c = if self.rx >= self.ry { self.focal_distance() } else { 0.0 };
        self.center = self.focus - DVec2::new(c, 0.0);
    }
}

/// Eccentricity of an ellipse with half-axes `rx` and `ry`.
///
/// Symmetric in its arguments; returns 0 when either radius is zero.
pub fn eccentricity(rx: f64, ry: f64) -> f64 {
    if rx == 0.0 || ry == 0.0 {
        return 0.0;
    }
    let (major, minor) = if rx >= ry { (rx, ry) } else { (ry, rx) };
    let ratio = minor / major;
    (1.0 - ratio * ratio).max(0.0).sqrt()
}
