//! Job-file persistence.
//!
//! Implements save/load for .mpj (millpost job) files using JSON with an
//! explicit format version. Worksteps are stored as an ordered list of
//! tagged records; restoring reconstructs the same variants in the same
//! order, which the generation pipeline depends on.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use millpost_core::{Bounds, Cooling, Position, Rotation, ToolEntry, ToolpathError};

use crate::cycle::DrillCycle;
use crate::operation::{DrillParams, Operation, OperationKind, RadiusSide};
use crate::workstep::{Workstep, WorkstepKind};

/// Job file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete job file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    pub version: String,
    pub metadata: JobMetadata,
    /// Workpiece bounding box, consumed by workpiece-definition output.
    #[serde(default)]
    pub workpiece: Bounds,
    /// Tool table referenced by the operations' tool numbers.
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
    pub operations: Vec<OperationData>,
}

/// Job metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Serialized operation data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationData {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub fixture: u32,
    #[serde(default)]
    pub cooling: String,
    pub speed: f64,
    pub feed: f64,
    pub tool_number: u32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub radius_side: RadiusSide,
    pub safe_z0: f64,
    pub safe_z1: f64,
    pub upper_z: f64,
    pub lower_z: f64,
    #[serde(default)]
    pub drill: DrillData,
    pub worksteps: Vec<WorkstepData>,
}

/// Serialized drill-cycle parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillData {
    #[serde(default)]
    pub cycle: String,
    pub q_min: f64,
    pub q_max: f64,
    #[serde(default)]
    pub retract: f64,
    #[serde(default)]
    pub dwell: f64,
    pub final_depth: f64,
    #[serde(default)]
    pub is_absolute: bool,
}

impl Default for DrillData {
    fn default() -> Self {
        let d = DrillParams::default();
        Self {
            cycle: d.cycle.as_str().to_string(),
            q_min: d.q_min,
            q_max: d.q_max,
            retract: d.retract,
            dwell: d.dwell,
            final_depth: d.final_depth,
            is_absolute: d.is_absolute,
        }
    }
}

/// Serialized workstep record.
///
/// `step_type` is the variant discriminant; cycle- and arc-specific fields
/// default to zero for the variants that do not carry them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkstepData {
    pub step_type: String,
    pub start: [f64; 3],
    pub end: [f64; 3],
    #[serde(default)]
    pub center: [f64; 3],
    #[serde(default)]
    pub clockwise: bool,
    #[serde(default)]
    pub cycle: String,
    #[serde(default)]
    pub safe_z0: f64,
    #[serde(default)]
    pub safe_z1: f64,
    #[serde(default)]
    pub depth: f64,
}

fn pos_to_array(p: Position) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn array_to_pos(a: [f64; 3]) -> Position {
    Position::new(a[0], a[1], a[2])
}

impl WorkstepData {
    /// Convert a workstep into its persisted record.
    pub fn from_workstep(ws: &Workstep) -> Self {
        let mut data = WorkstepData {
            step_type: String::new(),
            start: pos_to_array(ws.start()),
            end: pos_to_array(ws.end()),
            center: [0.0; 3],
            clockwise: false,
            cycle: String::new(),
            safe_z0: 0.0,
            safe_z1: 0.0,
            depth: 0.0,
        };
        match ws.kind() {
            WorkstepKind::Traverse => data.step_type = "traverse".to_string(),
            WorkstepKind::StraightMove => data.step_type = "straight_move".to_string(),
            WorkstepKind::Arc { center, clockwise } => {
                data.step_type = "arc".to_string();
                data.center = pos_to_array(*center);
                data.clockwise = *clockwise;
            }
            WorkstepKind::Cycle {
                cycle,
                safe_z0,
                safe_z1,
                final_depth,
            } => {
                data.step_type = "cycle".to_string();
                data.cycle = cycle.as_str().to_string();
                data.safe_z0 = *safe_z0;
                data.safe_z1 = *safe_z1;
                data.depth = *final_depth;
            }
        }
        data
    }

    /// Reconstruct the workstep variant named by `step_type`.
    pub fn into_workstep(self) -> std::result::Result<Workstep, ToolpathError> {
        let start = array_to_pos(self.start);
        let end = array_to_pos(self.end);
        match self.step_type.as_str() {
            "traverse" => Workstep::traverse(start, end),
            "straight_move" => Ok(Workstep::straight_move(start, end)),
            "arc" => Ok(Workstep::arc(
                start,
                end,
                array_to_pos(self.center),
                self.clockwise,
            )),
            "cycle" => Ok(Workstep::cycle(
                DrillCycle::parse(&self.cycle)?,
                start,
                end,
                self.safe_z0,
                self.safe_z1,
                self.depth,
            )),
            other => Err(ToolpathError::UnknownWorkstepType {
                discriminant: other.to_string(),
            }),
        }
    }
}

impl OperationData {
    /// Convert an operation into its persisted record.
    pub fn from_operation(op: &Operation) -> Self {
        Self {
            id: op.id,
            name: op.name.clone(),
            kind: op.kind.as_str().to_string(),
            fixture: op.fixture,
            cooling: op.cooling.as_str().to_string(),
            speed: op.speed,
            feed: op.feed,
            tool_number: op.tool_number,
            rotation: op.rotation,
            radius_side: op.radius_side,
            safe_z0: op.safe_z0,
            safe_z1: op.safe_z1,
            upper_z: op.upper_z,
            lower_z: op.lower_z,
            drill: DrillData {
                cycle: op.drill.cycle.as_str().to_string(),
                q_min: op.drill.q_min,
                q_max: op.drill.q_max,
                retract: op.drill.retract,
                dwell: op.drill.dwell,
                final_depth: op.drill.final_depth,
                is_absolute: op.drill.is_absolute,
            },
            worksteps: op.worksteps.iter().map(WorkstepData::from_workstep).collect(),
        }
    }

    /// Reconstruct the operation, restoring worksteps in stored order.
    pub fn into_operation(self) -> std::result::Result<Operation, ToolpathError> {
        let mut op = Operation::new(self.id, self.name, OperationKind::parse(&self.kind)?);
        op.fixture = self.fixture;
        op.cooling = Cooling::from_str_lossy(&self.cooling);
        op.speed = self.speed;
        op.feed = self.feed;
        op.tool_number = self.tool_number;
        op.rotation = self.rotation;
        op.radius_side = self.radius_side;
        op.safe_z0 = self.safe_z0;
        op.safe_z1 = self.safe_z1;
        op.upper_z = self.upper_z;
        op.lower_z = self.lower_z;
        op.drill = DrillParams {
            cycle: DrillCycle::parse(&self.drill.cycle)?,
            q_min: self.drill.q_min,
            q_max: self.drill.q_max,
            retract: self.drill.retract,
            dwell: self.drill.dwell,
            final_depth: self.drill.final_depth,
            is_absolute: self.drill.is_absolute,
        };
        for record in self.worksteps {
            op.worksteps.push(record.into_workstep()?);
        }
        Ok(op)
    }
}

impl JobFile {
    /// Build a job file from live operations.
    pub fn from_operations(
        name: impl Into<String>,
        workpiece: Bounds,
        tools: &[ToolEntry],
        operations: &[Operation],
    ) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: JobMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            workpiece,
            tools: tools.to_vec(),
            operations: operations.iter().map(OperationData::from_operation).collect(),
        }
    }

    /// Reconstruct the live operations in stored order.
    pub fn into_operations(self) -> std::result::Result<Vec<Operation>, ToolpathError> {
        if self.version != FILE_FORMAT_VERSION {
            return Err(ToolpathError::UnsupportedVersion {
                version: self.version,
            });
        }
        self.operations
            .into_iter()
            .map(OperationData::into_operation)
            .collect()
    }
}

/// Save a job file to disk as pretty-printed JSON.
pub fn save_job(path: &Path, job: &JobFile) -> Result<()> {
    let json = serde_json::to_string_pretty(job)
        .with_context(|| format!("Failed to serialize job '{}'", job.metadata.name))?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write job file: {}", path.display()))?;
    Ok(())
}

/// Load a job file from disk.
pub fn load_job(path: &Path) -> Result<JobFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file: {}", path.display()))?;
    let job: JobFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse job file: {}", path.display()))?;
    Ok(job)
}
