//! # millpost
//!
//! Postprocessor core for milling CAM: workstep toolpath model,
//! peck-drilling decomposition, and dialect-specific G-code generation.
//!
//! ## Architecture
//!
//! millpost is organized as a workspace with multiple crates:
//!
//! 1. **millpost-core** - Shared value types and error enums
//! 2. **millpost-toolpath** - Workstep model, drill cycles, job persistence
//! 3. **millpost-post** - Machine state, dialect postprocessors, G-code writer
//! 4. **millpost-geom** - Helix evaluation and curve-approximation contracts
//! 5. **millpost** - CLI binary that integrates all crates

pub mod config;

// Re-export modules for main.rs
pub use millpost_geom as geom;
pub use millpost_post as post;
pub use millpost_toolpath as toolpath;

pub use millpost_core::{
    Bounds, Cooling, Error, GeomError, Position, PostError, Result, Rotation, ToolEntry,
    ToolpathError,
};
pub use millpost_post::{GcodeWriter, MachineState, PostProcessor};
pub use millpost_toolpath::{load_job, save_job, JobFile, Operation, Workstep};

/// Initialize the tracing subscriber for the CLI.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}

/// Build timestamp stamped by build.rs.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}
