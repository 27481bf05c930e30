//! Helix parameters and the approximation entry point.

use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

use millpost_core::GeomError;

use crate::adaptor::HelixCurveAdaptor;
use crate::curve::{BSplineCurve, Continuity, CurveFitter};

/// Geometric confusion tolerance of the machine precision model.
pub const PRECISION_CONFUSION: f64 = 1e-7;

/// A local right- or left-handed coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame origin.
    pub origin: Point3<f64>,
    /// X direction of the cross-section plane.
    pub x_dir: Vector3<f64>,
    /// Y direction of the cross-section plane.
    pub y_dir: Vector3<f64>,
    /// Axis direction the helix advances along.
    pub z_dir: Vector3<f64>,
}

impl Frame {
    /// Frame from origin and three direction vectors.
    ///
    /// Directions must be unit length and mutually orthogonal; handedness
    /// is free (a left-handed frame yields a left-handed helix).
    pub fn new(
        origin: Point3<f64>,
        x_dir: Vector3<f64>,
        y_dir: Vector3<f64>,
        z_dir: Vector3<f64>,
    ) -> Self {
        debug_assert!(
            (x_dir.norm() - 1.0).abs() < 1e-9
                && (y_dir.norm() - 1.0).abs() < 1e-9
                && (z_dir.norm() - 1.0).abs() < 1e-9,
            "frame directions must be unit vectors"
        );
        debug_assert!(
            x_dir.dot(&y_dir).abs() < 1e-9
                && x_dir.dot(&z_dir).abs() < 1e-9
                && y_dir.dot(&z_dir).abs() < 1e-9,
            "frame directions must be orthogonal"
        );
        Self {
            origin,
            x_dir,
            y_dir,
            z_dir,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            x_dir: Vector3::x(),
            y_dir: Vector3::y(),
            z_dir: Vector3::z(),
        }
    }
}

/// Defining data of a parametric helix.
///
/// The cross-section may be elliptical (`x_radius != y_radius`); a pitch of
/// zero describes a planar spiral, a taper of zero a cylinder.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixData {
    position: Frame,
    x_radius: f64,
    y_radius: f64,
    pitch: f64,
    taper: f64,
    range_min: f64,
    range_max: f64,
    scale_factor: f64,
}

impl Default for HelixData {
    fn default() -> Self {
        Self {
            position: Frame::default(),
            x_radius: 0.0,
            y_radius: 0.0,
            pitch: 0.0,
            taper: 0.0,
            range_min: 0.0,
            range_max: 2.0 * PI,
            scale_factor: 1.0,
        }
    }
}

impl HelixData {
    pub fn set_position(&mut self, position: Frame) {
        self.position = position;
    }

    /// Set a circular cross-section.
    pub fn set_radius(&mut self, r: f64) {
        debug_assert!(r > 0.0, "radius must be positive, got {r}");
        self.x_radius = r;
        self.y_radius = r;
    }

    /// Set an elliptical cross-section.
    pub fn set_radii(&mut self, x_radius: f64, y_radius: f64) {
        debug_assert!(
            x_radius > 0.0 && y_radius > 0.0,
            "radii must be positive, got {x_radius}/{y_radius}"
        );
        self.x_radius = x_radius;
        self.y_radius = y_radius;
    }

    /// Height gained per full turn; must be >= 0, 0 means planar.
    pub fn set_pitch(&mut self, pitch: f64) {
        debug_assert!(pitch >= 0.0, "pitch must be non-negative, got {pitch}");
        self.pitch = pitch;
    }

    /// Taper of the sweep; 0 lies on a cylinder, > 0 widens along the axis.
    pub fn set_taper(&mut self, taper: f64) {
        self.taper = taper;
    }

    pub fn set_range_max(&mut self, range_max: f64) {
        self.range_max = range_max;
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    pub fn position(&self) -> &Frame {
        &self.position
    }

    pub fn x_radius(&self) -> f64 {
        self.x_radius
    }

    pub fn y_radius(&self) -> f64 {
        self.y_radius
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn taper(&self) -> f64 {
        self.taper
    }

    pub fn range_min(&self) -> f64 {
        self.range_min
    }

    pub fn range_max(&self) -> f64 {
        self.range_max
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Approximate this helix with a piecewise-polynomial curve.
    ///
    /// Wraps the analytic law behind a curve adaptor and invokes the
    /// external fitting routine with the fixed policy: confusion tolerance,
    /// C2 target continuity (the highest the evaluator supplies), at most
    /// 10000 spans, at most degree 9. Fails when the fitter reports no
    /// result; no partial curve is returned.
    pub fn make_helix(&self, fitter: &dyn CurveFitter) -> Result<BSplineCurve, GeomError> {
        let adaptor = HelixCurveAdaptor::new(self)?;
        let tolerance = PRECISION_CONFUSION;
        let continuity = Continuity::C2; /* highest supported continuity */
        let max_segments = 10_000; /* max number of spans */
        let max_degree = 9; /* max degree, consistent with machining defaults */

        fitter
            .fit(&adaptor, tolerance, continuity, max_segments, max_degree)
            .ok_or(GeomError::ApproximationFailed)
    }
}
