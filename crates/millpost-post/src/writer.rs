//! Drives workstep sequences through a dialect into G-code text.
//!
//! The writer owns the machine state for one generation pass and walks the
//! operations in order; the order of emitted lines is exactly the order of
//! the input worksteps. Generation is deterministic and idempotent given
//! identical input and initial state.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use millpost_core::{find_tool, Bounds, PostError, ToolEntry};
use millpost_toolpath::{Operation, OperationKind, RadiusSide, WorkstepKind};

use crate::dialect::{CycleDefinition, OperationIntro, PostProcessor};
use crate::state::MachineState;

/// G-code generator for one dialect.
pub struct GcodeWriter {
    post: Box<dyn PostProcessor>,
    state: MachineState,
}

impl GcodeWriter {
    pub fn new(post: Box<dyn PostProcessor>) -> Self {
        Self {
            post,
            state: MachineState::new(),
        }
    }

    /// The dialect this writer emits.
    pub fn post(&self) -> &dyn PostProcessor {
        self.post.as_ref()
    }

    /// The tracked machine state of the current pass.
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Generate one program containing every operation.
    ///
    /// Returns the number of emitted lines.
    pub fn process_all_in_one<W: Write>(
        &mut self,
        out: &mut W,
        job_name: &str,
        bounds: &Bounds,
        tools: &[ToolEntry],
        operations: &[Operation],
    ) -> Result<usize, PostError> {
        self.state = MachineState::new();
        let mut lines = 0;

        let intro = self.post.job_intro(&mut self.state, job_name);
        write_block(out, self.post.end_of_line(), &mut lines, &intro)?;
        let blank = self.post.define_workpiece(bounds);
        write_block(out, self.post.end_of_line(), &mut lines, &blank)?;

        for (i, op) in operations.iter().enumerate() {
            self.process_operation(out, &mut lines, op, operations.get(i + 1), tools, false)?;
        }

        let exit = self.post.job_exit(&mut self.state, job_name);
        write_block(out, self.post.end_of_line(), &mut lines, &exit)?;

        info!(job = job_name, lines, "generated job program");
        Ok(lines)
    }

    /// Generate one program file per operation in `dir`.
    ///
    /// Each file is a complete program bracketed by job intro and exit;
    /// `gen_tool_change` appends the tool-change block after each
    /// operation. Returns the number of emitted lines across all files.
    pub fn process_single_ops(
        &mut self,
        dir: &Path,
        job_name: &str,
        bounds: &Bounds,
        tools: &[ToolEntry],
        operations: &[Operation],
        gen_tool_change: bool,
    ) -> Result<usize, PostError> {
        let mut total = 0;

        for (i, op) in operations.iter().enumerate() {
            let file_name = format!(
                "{}_{:02}_{}.{}",
                sanitize(job_name),
                op.id,
                sanitize(&op.name),
                self.post.file_extension()
            );
            let path = dir.join(file_name);
            let mut out = BufWriter::new(File::create(&path)?);

            self.state = MachineState::new();
            let mut lines = 0;
            let intro = self.post.job_intro(&mut self.state, job_name);
            write_block(&mut out, self.post.end_of_line(), &mut lines, &intro)?;
            let blank = self.post.define_workpiece(bounds);
            write_block(&mut out, self.post.end_of_line(), &mut lines, &blank)?;

            self.process_operation(
                &mut out,
                &mut lines,
                op,
                operations.get(i + 1),
                tools,
                gen_tool_change,
            )?;

            let exit = self.post.job_exit(&mut self.state, job_name);
            write_block(&mut out, self.post.end_of_line(), &mut lines, &exit)?;
            out.flush()?;

            debug!(file = %path.display(), lines, "wrote operation program");
            total += lines;
        }

        Ok(total)
    }

    fn process_operation<W: Write>(
        &mut self,
        out: &mut W,
        lines: &mut usize,
        op: &Operation,
        next_op: Option<&Operation>,
        tools: &[ToolEntry],
        gen_tool_change: bool,
    ) -> Result<(), PostError> {
        if op.worksteps.is_empty() {
            warn!(operation = %op.name, "skipping operation without worksteps");
            return Ok(());
        }
        let eol = self.post.end_of_line();

        let tool_text = match find_tool(tools, op.tool_number) {
            Some(tool) => tool.to_string(),
            None => format!("T{}", op.tool_number),
        };
        let comment = self
            .post
            .prominent_comment(&format!("{} - {}", op.name, tool_text));
        write_block(out, eol, lines, &comment)?;

        if op.rotation != self.state.rotation {
            let rot = self
                .post
                .rotation(&mut self.state, op.rotation.a, op.rotation.b, op.rotation.c);
            write_block(out, eol, lines, &rot)?;
        }

        // Approach the first target at the outer safe plane.
        let intro_pos = op.worksteps[0].start().with_z(op.safe_z1_abs());
        let intro = self.post.operation_intro(
            &mut self.state,
            &OperationIntro {
                sequence: op.id,
                fixture: op.fixture,
                position: intro_pos,
                speed: op.speed,
                feed: op.feed,
                tool_number: op.tool_number,
                cooling: op.cooling,
                next_tool_number: next_op.map(|o| o.tool_number).unwrap_or(op.tool_number),
            },
        );
        write_block(out, eol, lines, &intro)?;

        if op.kind == OperationKind::Drill {
            self.process_drill_targets(out, lines, op)?;
        } else {
            self.process_path_targets(out, lines, op)?;
        }

        let exit = self.post.operation_exit(&mut self.state);
        write_block(out, eol, lines, &exit)?;

        if gen_tool_change {
            let tc = self.post.tool_change();
            write_block(out, eol, lines, &tc)?;
        }

        Ok(())
    }

    /// Canned-cycle emission: one definition, one invocation per hole, one
    /// cancellation.
    fn process_drill_targets<W: Write>(
        &mut self,
        out: &mut W,
        lines: &mut usize,
        op: &Operation,
    ) -> Result<(), PostError> {
        let eol = self.post.end_of_line();

        let def = CycleDefinition {
            cycle: op.drill.cycle,
            top_z: op.upper_z,
            safe_z0: op.safe_z0,
            safe_z1: op.safe_z1,
            depth: op.upper_z - op.drill_depth(),
            q_min: op.drill.q_min,
            q_max: op.drill.q_max,
            retract: op.drill.retract,
            dwell: op.drill.dwell,
            feed: op.feed,
        };
        let definition = self.post.define_cycle(&mut self.state, &def);
        write_block(out, eol, lines, &definition)?;

        for ws in &op.worksteps {
            if let WorkstepKind::Cycle { cycle, .. } = ws.kind() {
                let target = ws.start();
                let exec = self
                    .post
                    .exec_cycle(&mut self.state, *cycle, target.x, target.y);
                write_block(out, eol, lines, &exec)?;
            } else {
                warn!(operation = %op.name, "non-cycle workstep in drill operation ignored");
            }
        }

        let end = self.post.end_cycle();
        write_block(out, eol, lines, &end)?;

        Ok(())
    }

    /// Path emission: traverse/straight/arc blocks, with radius
    /// compensation engaged on the first cutting move and cancelled after
    /// the last one.
    fn process_path_targets<W: Write>(
        &mut self,
        out: &mut W,
        lines: &mut usize,
        op: &Operation,
    ) -> Result<(), PostError> {
        let eol = self.post.end_of_line();
        let compensate = op.radius_side != RadiusSide::None;
        let mut comp_active = false;
        let mut prev_rapid = false;

        for ws in &op.worksteps {
            match ws.kind() {
                WorkstepKind::Traverse => {
                    let cmd = self.post.traverse(&mut self.state, ws.end(), !prev_rapid);
                    write_block(out, eol, lines, &cmd)?;
                    prev_rapid = true;
                }
                WorkstepKind::StraightMove => {
                    let cmd = if compensate && !comp_active {
                        comp_active = true;
                        self.post.radius_correction_start(
                            &mut self.state,
                            ws.end(),
                            op.tool_number,
                            op.radius_side == RadiusSide::Right,
                        )
                    } else {
                        self.post.straight_move(&mut self.state, ws.end(), op.feed)
                    };
                    write_block(out, eol, lines, &cmd)?;
                    prev_rapid = false;
                }
                WorkstepKind::Arc { center, clockwise } => {
                    let cmd =
                        self.post
                            .arc(&mut self.state, ws.end(), *center, !clockwise, op.feed);
                    write_block(out, eol, lines, &cmd)?;
                    prev_rapid = false;
                }
                WorkstepKind::Cycle { .. } => {
                    warn!(operation = %op.name, "cycle workstep in path operation ignored");
                }
            }
        }

        if comp_active {
            let cmd = self.post.radius_correction_end(&mut self.state);
            write_block(out, eol, lines, &cmd)?;
        }

        Ok(())
    }
}

/// Write one emitted block followed by the dialect's line terminator.
///
/// Empty blocks (unmapped capabilities) produce no output at all.
fn write_block<W: Write>(
    out: &mut W,
    eol: &str,
    lines: &mut usize,
    text: &str,
) -> Result<(), PostError> {
    if text.is_empty() {
        return Ok(());
    }
    out.write_all(text.as_bytes())?;
    out.write_all(eol.as_bytes())?;
    *lines += text.matches('\n').count() + 1;
    Ok(())
}

/// File-name-safe rendition of a job or operation name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
