//! Workstep motion records.
//!
//! A workstep is one abstract machine motion: a rapid traverse, a straight
//! cutting move, a circular arc, or one invocation of a canned drill cycle.
//! Worksteps carry start and end positions so both the postprocessor and a
//! toolpath preview can walk the sequence without replaying machine state.

use millpost_core::{Position, ToolpathError};

use crate::cycle::DrillCycle;

/// Variant data of a workstep.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkstepKind {
    /// Rapid positioning move.
    Traverse,
    /// Linear cutting move.
    StraightMove,
    /// Circular interpolation around a center point.
    Arc {
        /// Arc center.
        center: Position,
        /// Direction of travel; clockwise is the G2 sense.
        clockwise: bool,
    },
    /// One target of a canned drill cycle.
    Cycle {
        /// The canned cycle to execute at this location.
        cycle: DrillCycle,
        /// First retract plane, relative to the operation's upper Z.
        safe_z0: f64,
        /// Second retract plane, relative to the operation's upper Z.
        safe_z1: f64,
        /// Absolute final drilling depth.
        final_depth: f64,
    },
}

/// A single motion record in an operation's workstep sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Workstep {
    kind: WorkstepKind,
    start: Position,
    end: Position,
}

impl Workstep {
    /// Create a rapid traverse.
    ///
    /// A traverse with coincident start and end points is a defined domain
    /// error; callers must not construct such a step.
    pub fn traverse(start: Position, end: Position) -> Result<Self, ToolpathError> {
        if start.is_coincident(&end) {
            return Err(ToolpathError::DegenerateTraverse { position: start });
        }
        Ok(Self {
            kind: WorkstepKind::Traverse,
            start,
            end,
        })
    }

    /// Create a straight cutting move.
    pub fn straight_move(start: Position, end: Position) -> Self {
        Self {
            kind: WorkstepKind::StraightMove,
            start,
            end,
        }
    }

    /// Create an arc move around `center`.
    pub fn arc(start: Position, end: Position, center: Position, clockwise: bool) -> Self {
        Self {
            kind: WorkstepKind::Arc { center, clockwise },
            start,
            end,
        }
    }

    /// Create one canned-cycle invocation.
    ///
    /// `start` is the hole location at the operation's upper Z; `end` is the
    /// same location at the final depth.
    pub fn cycle(
        cycle: DrillCycle,
        start: Position,
        end: Position,
        safe_z0: f64,
        safe_z1: f64,
        final_depth: f64,
    ) -> Self {
        Self {
            kind: WorkstepKind::Cycle {
                cycle,
                safe_z0,
                safe_z1,
                final_depth,
            },
            start,
            end,
        }
    }

    pub fn kind(&self) -> &WorkstepKind {
        &self.kind
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_traverse_rejected() {
        let p = Position::new(5.0, 5.0, 20.0);
        let err = Workstep::traverse(p, p).unwrap_err();
        assert!(matches!(err, ToolpathError::DegenerateTraverse { .. }));

        // Below MIN_DELTA on every axis still counts as coincident.
        let q = Position::new(5.0 + 0.5e-5, 5.0, 20.0);
        assert!(Workstep::traverse(p, q).is_err());
    }

    #[test]
    fn test_traverse_accepts_real_movement() {
        let from = Position::new(0.0, 0.0, 50.0);
        let to = Position::new(10.0, 0.0, 50.0);
        let ws = Workstep::traverse(from, to).unwrap();
        assert_eq!(*ws.kind(), WorkstepKind::Traverse);
        assert_eq!(ws.start(), from);
        assert_eq!(ws.end(), to);
    }

    #[test]
    fn test_arc_carries_center_and_direction() {
        let ws = Workstep::arc(
            Position::new(10.0, 0.0, -2.0),
            Position::new(-10.0, 0.0, -2.0),
            Position::new(0.0, 0.0, -2.0),
            true,
        );
        match ws.kind() {
            WorkstepKind::Arc { center, clockwise } => {
                assert_eq!(*center, Position::new(0.0, 0.0, -2.0));
                assert!(clockwise);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
