//! # millpost Core
//!
//! Core types, errors, and utilities shared by the millpost crates.
//! Provides the fundamental value types for positions and bounds, the
//! trimmed tool model consumed by G-code generation, and the central
//! error enums for the toolpath, postprocessor, and geometry layers.

pub mod error;
pub mod geometry;
pub mod tool;

pub use error::{Error, GeomError, PostError, Result, ToolpathError};
pub use geometry::{Bounds, Position, Rotation, MIN_DELTA};
pub use tool::{find_tool, Cooling, ToolEntry};
