//! The postprocessor dialect contract.
//!
//! The trait's default method bodies implement the DIN/ISO baseline;
//! dialects override what their controller does differently. All
//! generation methods take the machine state by mutable reference and
//! return the emitted text block; no method fails under valid input, and a
//! cycle kind a dialect cannot map yields an empty string (logged, never an
//! error).
//!
//! Formatting rules shared by all dialects: coordinates are fixed-point
//! with 3 decimals, feed words carry no decimals, and axis words are
//! suppressed when the axis moved less than [`MIN_DELTA`] since the last
//! emitted motion.

use tracing::warn;

use millpost_core::{Bounds, Cooling, Position, Rotation, MIN_DELTA};
use millpost_toolpath::DrillCycle;

use crate::state::{MachineState, RadiusCompensation};

/// Parameters of an operation intro block.
#[derive(Debug, Clone)]
pub struct OperationIntro {
    /// Operation sequence number (drives N-word numbering).
    pub sequence: u32,
    /// Fixture-offset index.
    pub fixture: u32,
    /// Approach position at the safe plane.
    pub position: Position,
    /// Spindle speed (rpm).
    pub speed: f64,
    /// Cutting feed (mm/min).
    pub feed: f64,
    /// Tool this operation cuts with.
    pub tool_number: u32,
    /// Coolant mode.
    pub cooling: Cooling,
    /// Tool to stage for the following operation.
    pub next_tool_number: u32,
}

/// Parameters of a canned-cycle definition.
///
/// `depth` is the positive drilling depth below `top_z`; dialects derive
/// their absolute or relative depth words from it.
#[derive(Debug, Clone)]
pub struct CycleDefinition {
    pub cycle: DrillCycle,
    /// Top surface of the drilled region (absolute Z).
    pub top_z: f64,
    /// First safety distance above `top_z`.
    pub safe_z0: f64,
    /// Second retract plane above `top_z`.
    pub safe_z1: f64,
    /// Drilling depth below `top_z` (positive).
    pub depth: f64,
    /// Smallest peck step.
    pub q_min: f64,
    /// Largest peck step.
    pub q_max: f64,
    /// Retract amount between pecks.
    pub retract: f64,
    /// Dwell at final depth (seconds).
    pub dwell: f64,
    /// Drilling feed.
    pub feed: f64,
}

/// Append axis words for every axis that moved more than [`MIN_DELTA`].
pub(crate) fn axis_words(words: &mut Vec<String>, target: Position, last: Position) {
    if (target.x - last.x).abs() > MIN_DELTA {
        words.push(format!("X{:.3}", target.x));
    }
    if (target.y - last.y).abs() > MIN_DELTA {
        words.push(format!("Y{:.3}", target.y));
    }
    if (target.z - last.z).abs() > MIN_DELTA {
        words.push(format!("Z{:.3}", target.z));
    }
}

/// Append incremental center-offset words (I/J/K relative to the last
/// position) under the same suppression rule.
pub(crate) fn center_words(words: &mut Vec<String>, center: Position, last: Position) {
    let c = center - last;
    if c.x.abs() > MIN_DELTA {
        words.push(format!("I{:.3}", c.x));
    }
    if c.y.abs() > MIN_DELTA {
        words.push(format!("J{:.3}", c.y));
    }
    if c.z.abs() > MIN_DELTA {
        words.push(format!("K{:.3}", c.z));
    }
}

/// Coolant M-word for the intro block.
pub(crate) fn cooling_word(cooling: Cooling) -> Option<&'static str> {
    match cooling {
        Cooling::Off => None,
        Cooling::Mist => Some("M7"),
        Cooling::Flood => Some("M8"),
    }
}

/// One G-code dialect.
///
/// Default bodies are the DIN/ISO baseline.
pub trait PostProcessor: std::fmt::Debug {
    /// Registry name of this dialect.
    fn name(&self) -> &'static str;

    /// File extension of programs for this controller.
    fn file_extension(&self) -> &'static str;

    /// Line terminator appended after every emitted block line.
    fn end_of_line(&self) -> &'static str {
        "\n"
    }

    /// Fixture-offset word for a fixture index.
    fn fixture_id(&self, fixture: u32) -> String {
        if fixture < 7 {
            format!("G{}", 53 + fixture)
        } else {
            format!("G59.{}", fixture - 6)
        }
    }

    fn line_comment(&self, msg: &str) -> String {
        format!("( {msg} )")
    }

    fn prominent_comment(&self, msg: &str) -> String {
        format!("( {msg} )")
    }

    /// Program header. The baseline cancels radius compensation and any
    /// active canned cycle so the job starts from a known modal state.
    fn job_intro(&self, state: &mut MachineState, _job_name: &str) -> String {
        let corr = self.radius_correction_end(state);
        let cycle = self.end_cycle();
        format!("{corr} {cycle}").trim().to_string()
    }

    /// Program footer: home the machine and end the program.
    fn job_exit(&self, _state: &mut MachineState, _job_name: &str) -> String {
        format!("G91 G28 Y0 Z0{}M30", self.end_of_line())
    }

    /// Tool change, positioning, and spindle-start block opening an
    /// operation. Sets the tracked position and current tool.
    fn operation_intro(&self, state: &mut MachineState, op: &OperationIntro) -> String {
        let eol = self.end_of_line();
        let mut cmd = format!(
            "N{} G0 G90 {} X{:.3} Y{:.3} S{:.0} M3",
            op.sequence * 10,
            self.fixture_id(op.fixture),
            op.position.x,
            op.position.y,
            op.speed
        );
        cmd.push_str(eol);
        cmd.push_str(&self.prepare_tool(op.next_tool_number));
        cmd.push_str(eol);
        let length_corr = self.length_correction_start(op.tool_number);
        if !length_corr.is_empty() {
            cmd.push_str(&length_corr);
            cmd.push(' ');
        }
        cmd.push_str(&format!("Z{:.3}", op.position.z));
        if let Some(mc) = cooling_word(op.cooling) {
            cmd.push(' ');
            cmd.push_str(mc);
        }

        state.last_position = op.position;
        state.current_tool = op.tool_number;
        state.feed = op.feed;

        cmd
    }

    /// Retract to the fixed safe height and stop spindle and coolant.
    /// The retract is a textual constant, not a tracked position update.
    fn operation_exit(&self, _state: &mut MachineState) -> String {
        format!("G0 G90 Z150 M5{}M9", self.end_of_line())
    }

    /// Rapid positioning move. `rapid` selects whether the G0 word must be
    /// (re-)emitted or the previous block already established rapid mode.
    fn traverse(&self, state: &mut MachineState, target: Position, rapid: bool) -> String {
        let mut words: Vec<String> = Vec::new();
        if rapid {
            words.push("G0".to_string());
        }
        axis_words(&mut words, target, state.last_position);

        state.last_position = target;

        words.join(" ")
    }

    /// Linear cutting move; the feed word is appended only when nonzero.
    fn straight_move(&self, state: &mut MachineState, target: Position, feed: f64) -> String {
        let mut words = vec!["G1".to_string()];
        axis_words(&mut words, target, state.last_position);
        if feed != 0.0 {
            words.push(format!("F{feed:.0}"));
            state.feed = feed;
        }

        state.last_position = target;

        words.join(" ")
    }

    /// Circular interpolation with incremental center offsets.
    fn arc(
        &self,
        state: &mut MachineState,
        target: Position,
        center: Position,
        ccw: bool,
        feed: f64,
    ) -> String {
        let mut words = vec![if ccw { "G3" } else { "G2" }.to_string()];
        axis_words(&mut words, target, state.last_position);
        center_words(&mut words, center, state.last_position);
        if feed != 0.0 {
            words.push(format!("F{feed:.0}"));
            state.feed = feed;
        }

        state.last_position = target;

        words.join(" ")
    }

    /// Engage cutter-radius compensation while moving to `target`.
    fn radius_correction_start(
        &self,
        state: &mut MachineState,
        target: Position,
        tool_set: u32,
        right: bool,
    ) -> String {
        let mut cmd = format!(
            "G1 G4{} D{} X{:.3} Y{:.3}",
            if right { 2 } else { 1 },
            tool_set,
            target.x,
            target.y
        );
        if (target.z - state.last_position.z).abs() > MIN_DELTA {
            cmd.push_str(&format!(" Z{:.3}", target.z));
        }

        state.radius_compensation = if right {
            RadiusCompensation::Right
        } else {
            RadiusCompensation::Left
        };
        state.last_position = target;

        cmd
    }

    /// Cancel cutter-radius compensation.
    fn radius_correction_end(&self, state: &mut MachineState) -> String {
        state.radius_compensation = RadiusCompensation::Off;

        "G40".to_string()
    }

    /// Command the rotary axes.
    fn rotation(&self, state: &mut MachineState, a: f64, b: f64, c: f64) -> String {
        state.rotation = Rotation::new(a, b, c);

        format!("G90 A{a:.3} B{b:.3} C{c:.3}")
    }

    /// Define a canned cycle. The baseline maps no cycles; dialects
    /// override with their controller's macro syntax.
    fn define_cycle(&self, _state: &mut MachineState, def: &CycleDefinition) -> String {
        warn!(
            dialect = self.name(),
            cycle = %def.cycle,
            "cycle kind not mapped for dialect"
        );
        String::new()
    }

    /// Invoke the active canned cycle at one hole location.
    fn exec_cycle(&self, state: &mut MachineState, _cycle: DrillCycle, x: f64, y: f64) -> String {
        state.last_position.x = x;
        state.last_position.y = y;

        format!("X{x:.3} Y{y:.3}")
    }

    /// Cancel the active canned cycle.
    fn end_cycle(&self) -> String {
        String::new()
    }

    /// Call the tool-change macro.
    fn tool_change(&self) -> String {
        "M98 P100".to_string()
    }

    /// Stage a tool in the changer.
    fn prepare_tool(&self, tool_number: u32) -> String {
        format!("T{tool_number}")
    }

    /// Activate tool-length compensation.
    fn length_correction_start(&self, tool_number: u32) -> String {
        format!("G43 H{tool_number}")
    }

    /// Cancel tool-length compensation.
    fn length_correction_end(&self) -> String {
        String::new()
    }

    /// Declare the workpiece blank. Only conversational controllers emit
    /// anything here.
    fn define_workpiece(&self, _bounds: &Bounds) -> String {
        String::new()
    }
}
