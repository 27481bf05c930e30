//! # millpost Geometry
//!
//! Parametric helix evaluation for smooth helical toolpaths.
//!
//! A helix is described by [`HelixData`] (frame, radii, pitch, range) and
//! evaluated analytically by [`CylinderEvaluator`]. [`HelixCurveAdaptor`]
//! exposes the evaluator behind the generic [`ParametricCurve`] contract so
//! it can be handed to an external piecewise-polynomial fitting routine
//! ([`CurveFitter`]); [`HelixData::make_helix`] performs that delegation
//! with the fixed approximation policy (C2, 1e-7 tolerance, 10000 spans,
//! degree 9).
//!
//! Everything here is a pure function of its inputs and safe to run
//! concurrently across independent curves.

pub mod adaptor;
pub mod curve;
pub mod evaluator;
pub mod helix;

pub use adaptor::HelixCurveAdaptor;
pub use curve::{BSplineCurve, Continuity, CurveFitter, ParametricCurve};
pub use evaluator::{CylinderEvaluator, HelixEvaluator};
pub use helix::{Frame, HelixData, PRECISION_CONFUSION};
