//! Generic DIN/ISO postprocessor.
//!
//! The baseline dialect: every behavior is the trait's default body. Other
//! ISO-style dialects start from here and override their differences.

use crate::dialect::PostProcessor;

/// DIN 66025 style G-code.
#[derive(Debug, Default)]
pub struct DinPost;

impl PostProcessor for DinPost {
    fn name(&self) -> &'static str {
        "din"
    }

    fn file_extension(&self) -> &'static str {
        "din"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MachineState;
    use millpost_core::Position;

    #[test]
    fn test_job_intro_cancels_compensation() {
        let post = DinPost;
        let mut state = MachineState::new();
        assert_eq!(post.job_intro(&mut state, "job"), "G40");
    }

    #[test]
    fn test_traverse_emits_only_changed_axes() {
        let post = DinPost;
        let mut state = MachineState::new();
        state.last_position = Position::new(5.0, 5.0, 20.0);

        let cmd = post.traverse(&mut state, Position::new(5.0, 9.0, 20.0), true);
        assert_eq!(cmd, "G0 Y9.000");
        assert_eq!(state.last_position, Position::new(5.0, 9.0, 20.0));
    }
}
