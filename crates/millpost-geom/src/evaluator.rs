//! Analytic helix evaluators.
//!
//! One evaluator per supported helix law, selected by taper. Only the
//! cylindrical law is implemented; tapered (conical) helices are a known
//! capability gap and are rejected at selection time rather than guessed.

use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use tracing::warn;

use millpost_core::GeomError;

use crate::helix::{HelixData, PRECISION_CONFUSION};

/// Evaluator for a helix on a cylinder (taper = 0).
///
/// The law is `P(u) = Rx·cos(u)·X + Ry·sin(u)·Y + v(u)·Z + origin` with a
/// linear axial advance `v(u) = u·pitch·scale/(2π)`.
#[derive(Debug, Clone)]
pub struct CylinderEvaluator {
    data: HelixData,
    /// Coefficient turning the rotation parameter into axial advance.
    v_coef: f64,
}

impl CylinderEvaluator {
    pub fn new(data: HelixData) -> Self {
        let v_coef = data.pitch() * data.scale_factor() / (2.0 * PI);
        Self { data, v_coef }
    }

    pub fn data(&self) -> &HelixData {
        &self.data
    }

    fn v_parameter(&self, u: f64) -> f64 {
        u * self.v_coef
    }

    /// Point at parameter `u`.
    pub fn d0(&self, u: f64) -> Point3<f64> {
        let frame = self.data.position();
        let v = self.v_parameter(u);

        frame.origin
            + self.data.x_radius() * u.cos() * frame.x_dir
            + self.data.y_radius() * u.sin() * frame.y_dir
            + v * frame.z_dir
    }

    /// Point and first derivative at `u`.
    ///
    /// The axial rate is the constant `k = pitch·scale/(2π)`: the helix
    /// advances at a fixed rate per radian.
    pub fn d1(&self, u: f64) -> (Point3<f64>, Vector3<f64>) {
        let frame = self.data.position();
        let k = self.v_coef;

        let v1 = -self.data.x_radius() * u.sin() * frame.x_dir
            + self.data.y_radius() * u.cos() * frame.y_dir
            + k * frame.z_dir;

        (self.d0(u), v1)
    }

    /// Point, first, and second derivative at `u`.
    ///
    /// The second derivative has no axial component.
    pub fn d2(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>) {
        let frame = self.data.position();
        let (p, v1) = self.d1(u);

        let v2 = -self.data.x_radius() * u.cos() * frame.x_dir
            - self.data.y_radius() * u.sin() * frame.y_dir;

        (p, v1, v2)
    }

    /// Third derivative is not part of the evaluator contract.
    ///
    /// The curve is only ever consumed up to C2 continuity; asking for more
    /// is a caller defect, not a recoverable condition.
    pub fn d3(&self, _u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        panic!("invalid call: D3 unsupported on helix");
    }

    /// Nth derivative is not part of the evaluator contract.
    pub fn dn(&self, _u: f64, _n: u32) -> Vector3<f64> {
        panic!("invalid call: DN unsupported on helix");
    }
}

/// Evaluator selection over the supported helix laws.
#[derive(Debug, Clone)]
pub enum HelixEvaluator {
    /// Helix on a cylinder (taper = 0).
    Cylinder(CylinderEvaluator),
    // A tapered helix would widen along the axis (taper > 0); no evaluator
    // exists for that law yet and selection rejects it.
}

impl HelixEvaluator {
    /// Select the evaluator matching the helix data.
    pub fn for_data(data: &HelixData) -> Result<Self, GeomError> {
        if data.taper().abs() < PRECISION_CONFUSION {
            Ok(HelixEvaluator::Cylinder(CylinderEvaluator::new(data.clone())))
        } else {
            warn!(taper = data.taper(), "tapered helix requested; no conical evaluator available");
            Err(GeomError::UnsupportedTaper {
                taper: data.taper(),
            })
        }
    }

    pub fn data(&self) -> &HelixData {
        match self {
            HelixEvaluator::Cylinder(e) => e.data(),
        }
    }

    pub fn d0(&self, u: f64) -> Point3<f64> {
        match self {
            HelixEvaluator::Cylinder(e) => e.d0(u),
        }
    }

    pub fn d1(&self, u: f64) -> (Point3<f64>, Vector3<f64>) {
        match self {
            HelixEvaluator::Cylinder(e) => e.d1(u),
        }
    }

    pub fn d2(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>) {
        match self {
            HelixEvaluator::Cylinder(e) => e.d2(u),
        }
    }

    pub fn d3(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        match self {
            HelixEvaluator::Cylinder(e) => e.d3(u),
        }
    }
}
