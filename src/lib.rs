//! bootstrap - a sequential, asynchronous application-bootstrap pipeline

pub mod cli;
pub mod core;
pub mod execution;
pub mod host;
pub mod steps;

// Re-export commonly used types
pub use core::{BootstrapError, Step, StepDescriptor, StepError, StepFactory, StepKind};
pub use core::{PipelineCompleted, PipelineStatus, StepCompleted};
pub use execution::{PipelineController, RunReport, StepOutcome, StepReport};
pub use host::Bootstrapper;
