//! Curve adaptor presenting a helix as a generic parametric curve.

use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use std::sync::Arc;

use millpost_core::GeomError;

use crate::curve::{Continuity, ParametricCurve};
use crate::evaluator::HelixEvaluator;
use crate::helix::HelixData;

/// Adaptor feeding a helix evaluator to curve-consuming algorithms.
///
/// Trimmed adaptors share the underlying evaluator; evaluation is pure, so
/// sharing is safe across threads.
#[derive(Debug, Clone)]
pub struct HelixCurveAdaptor {
    evaluator: Arc<HelixEvaluator>,
    min: f64,
    max: f64,
}

impl HelixCurveAdaptor {
    /// Adapt the full parameter range of the given helix.
    ///
    /// Fails for tapered helix data, which has no evaluator.
    pub fn new(data: &HelixData) -> Result<Self, GeomError> {
        let evaluator = HelixEvaluator::for_data(data)?;
        Ok(Self {
            evaluator: Arc::new(evaluator),
            min: data.range_min(),
            max: data.range_max(),
        })
    }

    /// Used when trimming: share the evaluator over a sub-range.
    ///
    /// The sub-range must lie within the evaluator's own range; violating
    /// that is a precondition failure.
    fn from_evaluator(evaluator: Arc<HelixEvaluator>, min: f64, max: f64) -> Self {
        assert!(
            evaluator.data().range_min() <= min,
            "invalid value for min: {min}"
        );
        assert!(
            evaluator.data().range_max() >= max,
            "invalid value for max: {max}"
        );
        Self { evaluator, min, max }
    }
}

impl ParametricCurve for HelixCurveAdaptor {
    fn first_parameter(&self) -> f64 {
        self.min
    }

    fn last_parameter(&self) -> f64 {
        self.max
    }

    /// The analytic law itself is infinitely continuous, independent of how
    /// it will later be approximated.
    fn continuity(&self) -> Continuity {
        Continuity::CN
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn is_periodic(&self) -> bool {
        false
    }

    fn d0(&self, u: f64) -> Point3<f64> {
        self.evaluator.d0(u)
    }

    fn d1(&self, u: f64) -> (Point3<f64>, Vector3<f64>) {
        self.evaluator.d1(u)
    }

    fn d2(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>) {
        self.evaluator.d2(u)
    }

    fn d3(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        self.evaluator.d3(u)
    }

    fn trim(&self, first: f64, last: f64) -> Box<dyn ParametricCurve> {
        Box::new(Self::from_evaluator(self.evaluator.clone(), first, last))
    }

    /// See the resolution of an adapted circle: a chord of length `tol` on
    /// the largest cross-section radius subtends `2·asin(tol/(2R))`; beyond
    /// `2R` no chord spacing can reach the tolerance and the full turn is
    /// returned.
    fn resolution(&self, chord_tolerance: f64) -> f64 {
        let data = self.evaluator.data();
        let r = data.x_radius().max(data.y_radius());

        if chord_tolerance < 2.0 * r {
            2.0 * (chord_tolerance / (2.0 * r)).asin()
        } else {
            2.0 * PI
        }
    }
}
