//! Fanuc-style postprocessor.
//!
//! DIN/ISO baseline with Fanuc block terminators and the classic G76/G81..
//! G85 canned-cycle family.

use millpost_toolpath::DrillCycle;

use crate::dialect::{CycleDefinition, PostProcessor};
use crate::state::MachineState;

/// Fanuc dialect (0i/30i lineage).
#[derive(Debug, Default)]
pub struct FanucPost;

impl PostProcessor for FanucPost {
    fn name(&self) -> &'static str {
        "fanuc"
    }

    fn file_extension(&self) -> &'static str {
        "dnc"
    }

    fn end_of_line(&self) -> &'static str {
        ";\n"
    }

    fn define_cycle(&self, _state: &mut MachineState, def: &CycleDefinition) -> String {
        // A cycle that would not cut below the surface is meaningless.
        if def.depth <= 0.0 {
            return String::new();
        }
        let z = def.top_z - def.depth;
        let r = def.top_z + def.safe_z0;

        match def.cycle {
            DrillCycle::FineBore => format!(
                "G76 Z{z:.3} R{r:.3} Q{:.3} P{:.0} F{:.0}",
                def.retract, def.dwell, def.feed
            ),
            DrillCycle::SpotDrill => format!("G81 Z{z:.3} R{r:.3} F{:.0}", def.feed),
            DrillCycle::DrillWithDwell => {
                format!("G82 Z{z:.3} R{r:.3} P{:.0} F{:.0}", def.dwell, def.feed)
            }
            DrillCycle::PeckDrill => {
                format!("G83 Z{z:.3} R{r:.3} Q{:.0} F{:.0}", def.q_max, def.feed)
            }
            DrillCycle::Tap => format!("G84 Z{z:.3} R{r:.3} F{:.0}", def.feed),
            DrillCycle::Bore => format!("G85 Z{z:.3} R{r:.3} F{:.0}", def.feed),
        }
    }

    fn end_cycle(&self) -> String {
        "G80".to_string()
    }
}
