//! Signal-conditioning and fixed-point encoding core for the testbench
//! stimulus toolkit.
//!
//! The modules mirror the legacy stimulus-generation flow while providing
//! safe abstractions, scoped buffers, and well-defined processing stages.

pub mod encoding;
pub mod math;
pub mod payload;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{ProcessingStage, StageInput, StageOutput};
