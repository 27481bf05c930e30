//! Heidenhain conversational postprocessor.
//!
//! Klartext output: L/CC/C blocks with signed coordinates, TOOL CALL
//! headers, and CYCLE DEF canned cycles. Radius compensation is not a
//! modal G-word here; the tracked side is expressed on every motion block
//! as RL/RR/R0 instead.

use millpost_core::{Bounds, Position};
use millpost_toolpath::DrillCycle;
use tracing::warn;

use crate::dialect::{cooling_word, CycleDefinition, OperationIntro, PostProcessor};
use crate::state::{MachineState, RadiusCompensation};

/// Signed coordinate word, Klartext style.
fn pos(num: f64) -> String {
    format!("{}{num:.3}", if num > 0.0 { "+" } else { "" })
}

/// Heidenhain TNC dialect.
#[derive(Debug, Default)]
pub struct HeidenhainPost;

impl HeidenhainPost {
    /// RL/RR/R0 word for the tracked compensation side.
    fn side_word(state: &MachineState) -> &'static str {
        match state.radius_compensation {
            RadiusCompensation::Right => "RR",
            RadiusCompensation::Left => "RL",
            RadiusCompensation::Off => "R0",
        }
    }

    fn program_name(job_name: &str) -> String {
        job_name.replace('.', "_")
    }
}

impl PostProcessor for HeidenhainPost {
    fn name(&self) -> &'static str {
        "heidenhain"
    }

    fn file_extension(&self) -> &'static str {
        "h"
    }

    fn fixture_id(&self, _fixture: u32) -> String {
        String::new()
    }

    fn job_intro(&self, _state: &mut MachineState, job_name: &str) -> String {
        format!("BEGIN PGM {} MM", Self::program_name(job_name))
    }

    fn job_exit(&self, _state: &mut MachineState, job_name: &str) -> String {
        format!("TOOL CALL 0\n\nEND PGM {} MM", Self::program_name(job_name))
    }

    fn operation_intro(&self, state: &mut MachineState, op: &OperationIntro) -> String {
        let mut cmd = format!("TOOL CALL {} Z S{:.0} F{:.0} M3", op.tool_number, op.speed, op.feed);
        if let Some(mc) = cooling_word(op.cooling) {
            cmd.push(' ');
            cmd.push_str(mc);
        }
        cmd.push('\n');
        cmd.push_str(&format!("TOOL DEF {}\n", op.next_tool_number));
        cmd.push_str(&format!(
            "L X{} Y{} R0 FMAX\n",
            pos(op.position.x),
            pos(op.position.y)
        ));
        cmd.push_str(&format!("L Z{} R0 FMAX", pos(op.position.z)));

        state.last_position = op.position;
        state.current_tool = op.tool_number;
        state.feed = op.feed;

        cmd
    }

    fn operation_exit(&self, _state: &mut MachineState) -> String {
        "L Z+150 R0 FMAX M5 M9".to_string()
    }

    fn traverse(&self, state: &mut MachineState, target: Position, _rapid: bool) -> String {
        let mut cmd = "L".to_string();
        push_signed_axis_words(&mut cmd, target, state.last_position);
        cmd.push(' ');
        cmd.push_str(Self::side_word(state));
        cmd.push_str(" FMAX");

        state.last_position = target;

        cmd
    }

    fn straight_move(&self, state: &mut MachineState, target: Position, _feed: f64) -> String {
        let mut cmd = "L".to_string();
        push_signed_axis_words(&mut cmd, target, state.last_position);
        cmd.push(' ');
        cmd.push_str(Self::side_word(state));

        state.last_position = target;

        cmd
    }

    fn arc(
        &self,
        state: &mut MachineState,
        target: Position,
        center: Position,
        ccw: bool,
        _feed: f64,
    ) -> String {
        let mut cmd = format!("CC X{} Y{}\n", pos(center.x), pos(center.y));
        cmd.push_str(&format!(
            "C X{} Y{} Z{} {}",
            pos(target.x),
            pos(target.y),
            pos(target.z),
            if ccw { "DR+" } else { "DR-" }
        ));

        state.last_position = target;

        cmd
    }

    fn radius_correction_start(
        &self,
        state: &mut MachineState,
        _target: Position,
        _tool_set: u32,
        right: bool,
    ) -> String {
        // Compensation is expressed per move; only track the side.
        state.radius_compensation = if right {
            RadiusCompensation::Right
        } else {
            RadiusCompensation::Left
        };

        String::new()
    }

    fn radius_correction_end(&self, state: &mut MachineState) -> String {
        state.radius_compensation = RadiusCompensation::Off;

        String::new()
    }

    fn rotation(&self, state: &mut MachineState, a: f64, b: f64, c: f64) -> String {
        state.rotation = millpost_core::Rotation::new(a, b, c);

        format!("PLANE SPATIAL SPA{} SPB{} SPC{}", pos(a), pos(b), pos(c))
    }

    fn define_cycle(&self, _state: &mut MachineState, def: &CycleDefinition) -> String {
        let depth_q = -def.depth;
        match def.cycle {
            DrillCycle::FineBore => [
                "CYCLE DEF 202".to_string(),
                format!(" Q200={:.3}", def.safe_z0),
                format!(" Q201={depth_q:.3}"),
                format!(" Q203={:.3}", def.top_z),
                format!(" Q204={:.3}", def.safe_z1),
                format!(" Q206={:.0}", def.feed),
                format!(" Q208={:.0}", 2.0 * def.feed),
                " Q211=0.1".to_string(),
                // retract direction: 0 none, 1 x-, 2 x+, 3 y-, 4 y+
                " Q214=1".to_string(),
                " Q336=0".to_string(),
            ]
            .join("\n"),
            DrillCycle::SpotDrill => [
                "CYCLE DEF 240".to_string(),
                format!(" Q200={:.3}", def.safe_z0),
                format!(" Q201={depth_q:.3}"),
                format!(" Q203={:.3}", def.top_z),
                format!(" Q204={:.3}", def.safe_z1),
                format!(" Q206={:.0}", def.feed),
                " Q211=0.1".to_string(),
                " Q343=0".to_string(),
            ]
            .join("\n"),
            DrillCycle::PeckDrill => [
                "CYCLE DEF 200".to_string(),
                format!(" Q200={:.3}", def.safe_z0),
                format!(" Q201={depth_q:.3}"),
                format!(" Q202={:.3}", def.q_max),
                format!(" Q203={:.3}", def.top_z),
                format!(" Q204={:.3}", def.safe_z1),
                format!(" Q206={:.0}", def.feed),
                " Q211=0.1".to_string(),
                " Q395=0".to_string(),
            ]
            .join("\n"),
            DrillCycle::Tap => [
                "CYCLE DEF 206".to_string(),
                format!(" Q200={:.3}", def.safe_z0),
                format!(" Q201={depth_q:.3}"),
                format!(" Q203={:.3}", def.top_z),
                format!(" Q204={:.3}", def.safe_z1),
                format!(" Q206={:.0}", def.feed),
                " Q211=0.1".to_string(),
            ]
            .join("\n"),
            DrillCycle::DrillWithDwell | DrillCycle::Bore => {
                warn!(
                    dialect = self.name(),
                    cycle = %def.cycle,
                    "cycle kind not mapped for dialect"
                );
                String::new()
            }
        }
    }

    fn exec_cycle(&self, state: &mut MachineState, _cycle: DrillCycle, x: f64, y: f64) -> String {
        state.last_position.x = x;
        state.last_position.y = y;

        format!("L X{} Y{} R0 FMAX M99", pos(x), pos(y))
    }

    fn end_cycle(&self) -> String {
        String::new()
    }

    fn tool_change(&self) -> String {
        String::new()
    }

    fn prepare_tool(&self, tool_number: u32) -> String {
        format!("TOOL DEF {tool_number}")
    }

    fn length_correction_start(&self, _tool_number: u32) -> String {
        String::new()
    }

    fn define_workpiece(&self, bounds: &Bounds) -> String {
        format!(
            "BLK FORM 0.1 Z X{:.3} Y{:.3} Z{:.3}\nBLK FORM 0.2 X{:.3} Y{:.3} Z{:.3}",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        )
    }
}

/// Append signed axis words for axes that moved more than the minimum
/// delta.
fn push_signed_axis_words(cmd: &mut String, target: Position, last: Position) {
    use millpost_core::MIN_DELTA;

    if (target.x - last.x).abs() > MIN_DELTA {
        cmd.push_str(&format!(" X{}", pos(target.x)));
    }
    if (target.y - last.y).abs() > MIN_DELTA {
        cmd.push_str(&format!(" Y{}", pos(target.y)));
    }
    if (target.z - last.z).abs() > MIN_DELTA {
        cmd.push_str(&format!(" Z{}", pos(target.z)));
    }
}
