//! Siemens Sinumerik 840D postprocessor.
//!
//! DIN/ISO baseline with the modal MCALL cycle family. Cycle parameters
//! are positional; empty positions keep their controller defaults.

use millpost_toolpath::DrillCycle;
use tracing::warn;

use crate::dialect::{CycleDefinition, PostProcessor};
use crate::state::MachineState;

/// Sinumerik 840D dialect.
#[derive(Debug, Default)]
pub struct Sinumerik840D;

impl PostProcessor for Sinumerik840D {
    fn name(&self) -> &'static str {
        "sinumerik840d"
    }

    fn file_extension(&self) -> &'static str {
        "arc"
    }

    fn fixture_id(&self, fixture: u32) -> String {
        if fixture < 5 {
            format!("G{}", 53 + fixture)
        } else {
            format!("G{}", 500 + fixture)
        }
    }

    fn define_cycle(&self, _state: &mut MachineState, def: &CycleDefinition) -> String {
        // rtp: retract plane, rfp: reference plane, sdis: safety distance,
        // dp: absolute drill depth.
        let rtp = def.top_z + def.safe_z1;
        let rfp = def.top_z;
        let sdis = def.safe_z0;
        let dp = def.top_z - def.depth;

        let suffix = match def.cycle {
            DrillCycle::SpotDrill => {
                format!("81({rtp:.3}, {rfp:.3}, {sdis:.3}, , {dp:.3})")
            }
            DrillCycle::DrillWithDwell => format!(
                "82({rtp:.3}, {rfp:.3}, {sdis:.3}, , {dp:.3}, {:.3})",
                def.dwell
            ),
            DrillCycle::PeckDrill => format!(
                "83({rtp:.3}, {rfp:.3}, {sdis:.3},, {dp:.3},, {:.3}, {:.3}, 1, 1, 1, 1,, {:.3},, 0, 0)",
                def.q_max,
                def.q_max - def.q_min,
                def.q_min
            ),
            DrillCycle::Tap => format!(
                "84({rtp:.3}, {rfp:.3}, {sdis:.3},, {dp:.3},, 3,, {:.3}, 90, 100)",
                def.feed / 100.0
            ),
            DrillCycle::Bore => format!(
                "85({rtp:.3}, {rfp:.3}, {sdis:.3},, {dp:.3},, {:.3})",
                def.feed / 100.0
            ),
            DrillCycle::FineBore => {
                warn!(
                    dialect = self.name(),
                    cycle = %def.cycle,
                    "cycle kind not mapped for dialect"
                );
                return String::new();
            }
        };

        format!("MCALL CYCLE{suffix}")
    }

    fn end_cycle(&self) -> String {
        "MCALL".to_string()
    }

    fn length_correction_start(&self, _tool_number: u32) -> String {
        String::new()
    }

    fn tool_change(&self) -> String {
        "M6 D1".to_string()
    }
}
