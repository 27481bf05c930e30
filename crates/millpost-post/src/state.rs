//! Machine-state cursor tracked during G-code generation.

use millpost_core::{Position, Rotation};

/// Active cutter-radius-compensation side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusCompensation {
    /// No compensation active.
    #[default]
    Off,
    /// Compensation left of the direction of travel (G41).
    Left,
    /// Compensation right of the direction of travel (G42).
    Right,
}

/// Mutable cursor owned by one generation pass.
///
/// `last_position` always reflects the position implied by the most
/// recently emitted motion command; every generation method that changes
/// position updates it before returning. Compensation must be switched off
/// before a tool change or job end on dialects that track it explicitly;
/// enforcing that ordering is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct MachineState {
    /// Tool location after the most recently emitted motion.
    pub last_position: Position,
    /// Last commanded rotary-axis orientation.
    pub rotation: Rotation,
    /// Whether compensation is active, and on which side.
    pub radius_compensation: RadiusCompensation,
    /// Tool selected by the last operation intro.
    pub current_tool: u32,
    /// Feed commanded by the last move carrying a feed word.
    pub feed: f64,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }
}
