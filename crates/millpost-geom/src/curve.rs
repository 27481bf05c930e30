//! Generic parametric-curve and curve-fitting contracts.
//!
//! These traits are the narrow seam to the external geometry kernel: the
//! adaptor in this crate implements [`ParametricCurve`], and the kernel's
//! approximation routine is consumed through [`CurveFitter`].

use nalgebra::{Point3, Vector3};

/// Continuity class of a curve or a fitting target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Continuity {
    /// Positional continuity only.
    C0,
    /// First-derivative continuity.
    C1,
    /// Second-derivative continuity.
    C2,
    /// Infinitely differentiable (analytic law).
    CN,
}

/// A curve evaluated over a single parameter.
///
/// Derivative orders beyond what an implementation supports are
/// programming-contract violations and assert fatally; they are never
/// recoverable errors.
pub trait ParametricCurve {
    /// Lower bound of the parameter range.
    fn first_parameter(&self) -> f64;

    /// Upper bound of the parameter range.
    fn last_parameter(&self) -> f64;

    /// Continuity of the curve law itself.
    fn continuity(&self) -> Continuity;

    fn is_closed(&self) -> bool;

    fn is_periodic(&self) -> bool;

    /// Point at parameter `u`.
    fn d0(&self, u: f64) -> Point3<f64>;

    /// Point and first derivative at `u`.
    fn d1(&self, u: f64) -> (Point3<f64>, Vector3<f64>);

    /// Point, first, and second derivative at `u`.
    fn d2(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>);

    /// Point and first three derivatives at `u`.
    fn d3(&self, u: f64) -> (Point3<f64>, Vector3<f64>, Vector3<f64>, Vector3<f64>);

    /// Restrict the curve to `[first, last]`, which must lie within the
    /// current range (precondition).
    fn trim(&self, first: f64, last: f64) -> Box<dyn ParametricCurve>;

    /// Parameter increment guaranteeing a chordal deviation below the given
    /// 3-D tolerance.
    fn resolution(&self, chord_tolerance: f64) -> f64;
}

/// A fitted piecewise-polynomial (B-spline) curve returned by the external
/// approximation routine.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve {
    /// Polynomial degree of the spans.
    pub degree: u32,
    /// Knot vector, non-decreasing.
    pub knots: Vec<f64>,
    /// Control points.
    pub poles: Vec<Point3<f64>>,
}

impl BSplineCurve {
    /// Number of polynomial spans.
    pub fn num_spans(&self) -> usize {
        self.knots.len().saturating_sub(1)
    }
}

/// External piecewise-polynomial curve-fitting routine.
///
/// Returns `None` when no usable result exists within the requested
/// tolerance, span, and degree limits; a partial curve is never returned.
pub trait CurveFitter {
    fn fit(
        &self,
        curve: &dyn ParametricCurve,
        tolerance: f64,
        continuity: Continuity,
        max_segments: u32,
        max_degree: u32,
    ) -> Option<BSplineCurve>;
}
