//! Pipeline execution

pub mod controller;
pub mod executor;

pub use controller::{PipelineController, Registration, RunReport};
pub use executor::{StepExecutor, StepOutcome, StepReport};
