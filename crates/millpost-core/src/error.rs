//! Error handling for millpost
//!
//! Provides error types for all layers of the pipeline:
//! - Toolpath errors (workstep construction, job-file restore)
//! - Postprocessor errors (dialect selection, output I/O)
//! - Geometry errors (unsupported helix laws, approximation failures)
//!
//! All error types use `thiserror`. Precondition violations (trimming a
//! curve outside its range, evaluating an unsupported derivative order) are
//! NOT represented here: those are caller defects and assert fatally.

use thiserror::Error;

use crate::geometry::Position;

/// Errors from the workstep/operation model and job persistence.
#[derive(Error, Debug, Clone)]
pub enum ToolpathError {
    /// A traverse was constructed with coincident start and end points.
    #[error("degenerate traverse: start and end coincide at {position}")]
    DegenerateTraverse {
        /// The coincident point.
        position: Position,
    },

    /// A stored workstep record carries an unknown type discriminant.
    #[error("unknown workstep type: {discriminant}")]
    UnknownWorkstepType {
        /// The discriminant found in the record.
        discriminant: String,
    },

    /// A stored cycle record carries an unknown drill-cycle name.
    #[error("unknown drill cycle: {name}")]
    UnknownCycleKind {
        /// The cycle name found in the record.
        name: String,
    },

    /// A stored operation record carries an unknown kind.
    #[error("unknown operation kind: {kind}")]
    UnknownOperationKind {
        /// The kind found in the record.
        kind: String,
    },

    /// The job file declares a format version this build cannot read.
    #[error("unsupported job file version: {version}")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
    },
}

/// Errors from the postprocessor layer.
#[derive(Error, Debug)]
pub enum PostError {
    /// The requested dialect is not in the registry.
    #[error("unknown postprocessor dialect: {name}")]
    UnknownDialect {
        /// The requested dialect name.
        name: String,
    },

    /// An operation has no worksteps to emit.
    #[error("operation '{name}' has an empty workstep sequence")]
    EmptyOperation {
        /// The operation name.
        name: String,
    },

    /// I/O error while writing generated G-code.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the helix evaluator and curve approximation.
#[derive(Error, Debug, Clone)]
pub enum GeomError {
    /// Tapered (conical) helix laws have no evaluator.
    #[error("tapered helix is not supported (taper = {taper})")]
    UnsupportedTaper {
        /// The rejected taper value.
        taper: f64,
    },

    /// The external fitting routine found no result within its limits.
    #[error("curve approximation produced no result within tolerance/span/degree limits")]
    ApproximationFailed,
}

/// Main error type for millpost
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Toolpath model error
    #[error(transparent)]
    Toolpath(#[from] ToolpathError),

    /// Postprocessor error
    #[error(transparent)]
    Post(#[from] PostError),

    /// Geometry error
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolpath_error_display() {
        let err = ToolpathError::DegenerateTraverse {
            position: Position::new(1.0, 2.0, 3.0),
        };
        assert_eq!(
            err.to_string(),
            "degenerate traverse: start and end coincide at X1.000 Y2.000 Z3.000"
        );

        let err = ToolpathError::UnknownWorkstepType {
            discriminant: "spiral".to_string(),
        };
        assert_eq!(err.to_string(), "unknown workstep type: spiral");
    }

    #[test]
    fn test_post_error_display() {
        let err = PostError::UnknownDialect {
            name: "okuma".to_string(),
        };
        assert_eq!(err.to_string(), "unknown postprocessor dialect: okuma");
    }

    #[test]
    fn test_error_conversion() {
        let geom: Error = GeomError::ApproximationFailed.into();
        assert!(matches!(geom, Error::Geom(_)));

        let tp: Error = ToolpathError::UnsupportedVersion {
            version: "9.9".to_string(),
        }
        .into();
        assert!(matches!(tp, Error::Toolpath(_)));
    }
}
