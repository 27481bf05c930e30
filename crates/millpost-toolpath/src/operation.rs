//! Operations: ordered workstep sequences plus machining parameters.
//!
//! An operation owns the workstep sequence its planner produced and the
//! parameters the postprocessor needs to bracket it (fixture, cooling,
//! spindle speed, feed, tool number, drill-cycle settings). The workstep
//! order is the emission order of the generated G-code.

use serde::{Deserialize, Serialize};
use tracing::debug;

use millpost_core::{Position, Rotation, ToolpathError};

use crate::cycle::{peck_stops, DrillCycle};
use crate::workstep::Workstep;

/// The kind of machining an operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Contour milling along a path.
    Contour,
    /// Hole drilling via canned cycles.
    Drill,
    /// Surface sweeping.
    Sweep,
    /// Clamping-plug preparation.
    ClampingPlug,
}

impl OperationKind {
    /// Stable name used as the persisted discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Contour => "contour",
            OperationKind::Drill => "drill",
            OperationKind::Sweep => "sweep",
            OperationKind::ClampingPlug => "clamping_plug",
        }
    }

    /// Resolve a persisted discriminant back to the operation kind.
    pub fn parse(name: &str) -> Result<Self, ToolpathError> {
        match name {
            "contour" => Ok(OperationKind::Contour),
            "drill" => Ok(OperationKind::Drill),
            "sweep" => Ok(OperationKind::Sweep),
            "clamping_plug" => Ok(OperationKind::ClampingPlug),
            other => Err(ToolpathError::UnknownOperationKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Cutter-radius-compensation side requested for a path operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusSide {
    /// No compensation.
    #[default]
    None,
    /// Compensation left of the direction of travel (G41).
    Left,
    /// Compensation right of the direction of travel (G42).
    Right,
}

/// Drill-cycle parameters of a drilling operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrillParams {
    /// The canned cycle to use for every target.
    pub cycle: DrillCycle,
    /// Smallest peck step (mm).
    pub q_min: f64,
    /// Largest peck step, taken by the first peck (mm).
    pub q_max: f64,
    /// Retract amount between pecks (mm).
    pub retract: f64,
    /// Dwell time at final depth (seconds).
    pub dwell: f64,
    /// Final depth; absolute Z if `is_absolute`, else relative to upper Z.
    pub final_depth: f64,
    /// Whether `final_depth` is an absolute coordinate.
    pub is_absolute: bool,
}

impl Default for DrillParams {
    fn default() -> Self {
        Self {
            cycle: DrillCycle::SpotDrill,
            q_min: 1.0,
            q_max: 3.0,
            retract: 1.0,
            dwell: 0.0,
            final_depth: 0.0,
            is_absolute: true,
        }
    }
}

/// One machining operation with its ordered workstep sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Sequence number within the job (drives block numbering).
    pub id: u32,
    /// Display name, emitted as a prominent comment.
    pub name: String,
    /// What this operation does.
    pub kind: OperationKind,
    /// Fixture-offset index.
    pub fixture: u32,
    /// Coolant mode.
    pub cooling: millpost_core::Cooling,
    /// Spindle speed (rpm).
    pub speed: f64,
    /// Cutting feed (mm/min).
    pub feed: f64,
    /// Tool number addressed by this operation.
    pub tool_number: u32,
    /// Rotary-axis orientation this operation machines under.
    pub rotation: Rotation,
    /// Cutter-radius compensation requested for path operations.
    pub radius_side: RadiusSide,
    /// First safety distance above upper Z (mm, relative).
    pub safe_z0: f64,
    /// Second safety distance above upper Z (mm, relative).
    pub safe_z1: f64,
    /// Top of the machined region (absolute Z).
    pub upper_z: f64,
    /// Bottom of the machined region (absolute Z).
    pub lower_z: f64,
    /// Drill-cycle parameters (meaningful for drill operations).
    pub drill: DrillParams,
    /// The ordered motion sequence. Order is emission order.
    pub worksteps: Vec<Workstep>,
}

impl Operation {
    /// Create an empty operation of the given kind.
    pub fn new(id: u32, name: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            fixture: 1,
            cooling: millpost_core::Cooling::Off,
            speed: 0.0,
            feed: 0.0,
            tool_number: 1,
            rotation: Rotation::default(),
            radius_side: RadiusSide::None,
            safe_z0: 2.0,
            safe_z1: 10.0,
            upper_z: 0.0,
            lower_z: 0.0,
            drill: DrillParams::default(),
            worksteps: Vec::new(),
        }
    }

    /// Append a workstep to the sequence.
    pub fn push_step(&mut self, step: Workstep) {
        self.worksteps.push(step);
    }

    /// Absolute Z of the first retract plane.
    pub fn safe_z0_abs(&self) -> f64 {
        self.upper_z + self.safe_z0
    }

    /// Absolute Z of the second retract plane.
    pub fn safe_z1_abs(&self) -> f64 {
        self.upper_z + self.safe_z1
    }

    /// Absolute Z of the hole bottom for drilling operations.
    pub fn drill_depth(&self) -> f64 {
        if self.drill.is_absolute {
            self.drill.final_depth
        } else {
            self.upper_z + self.drill.final_depth
        }
    }

    /// Z stops of the active drill cycle, recomputed on demand.
    ///
    /// Only peck drilling is decomposed; every other cycle kind drills to
    /// final depth in a single stop.
    pub fn peck_plan(&self) -> Vec<f64> {
        let start = self.safe_z0_abs();
        let depth = self.drill_depth();
        if self.drill.cycle != DrillCycle::PeckDrill {
            return vec![depth];
        }
        peck_stops(start, depth, self.drill.q_min, self.drill.q_max)
    }
}

/// Plan drill worksteps from a set of hole locations.
///
/// Targets are sorted into a deterministic machining order (by Y, then X)
/// and each becomes one canned-cycle workstep from the operation's upper Z
/// down to its drill depth.
pub fn plan_drill_targets(op: &mut Operation, targets: &[Position]) {
    let mut sorted: Vec<Position> = targets.to_vec();
    sorted.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let depth = op.drill_depth();
    for target in &sorted {
        let from = Position::new(target.x, target.y, op.upper_z);
        let to = Position::new(target.x, target.y, depth);
        op.push_step(Workstep::cycle(
            op.drill.cycle,
            from,
            to,
            op.safe_z0,
            op.safe_z1,
            depth,
        ));
    }
    debug!(
        operation = %op.name,
        steps = op.worksteps.len(),
        "planned drill targets"
    );
}
