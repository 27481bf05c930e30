//! # millpost Post
//!
//! The G-code generation layer: a [`MachineState`] cursor tracking the
//! position implied by emitted motion commands, the [`PostProcessor`]
//! dialect contract with a DIN/ISO baseline, one implementation per
//! supported controller dialect, a closed dialect registry, and the
//! [`GcodeWriter`] that drives workstep sequences through a dialect.
//!
//! Each generation pass owns its state exclusively; parallel jobs must use
//! independent writer instances.

pub mod dialect;
pub mod din;
pub mod fanuc;
pub mod heidenhain;
pub mod registry;
pub mod sinumerik;
pub mod state;
pub mod writer;

pub use dialect::{CycleDefinition, OperationIntro, PostProcessor};
pub use din::DinPost;
pub use fanuc::FanucPost;
pub use heidenhain::HeidenhainPost;
pub use registry::{available, create};
pub use sinumerik::Sinumerik840D;
pub use state::{MachineState, RadiusCompensation};
pub use writer::GcodeWriter;
