//! Error types for the bootstrap pipeline

use crate::core::{descriptor::StepDescriptor, state::PipelineStatus};
use thiserror::Error;

/// Errors raised by the pipeline machinery itself (never by a step's own work)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The descriptor does not name any step known to the factory
    #[error("configuration error: '{descriptor}' is not a known step")]
    Configuration { descriptor: StepDescriptor },

    /// Registration attempted outside the Idle state
    #[error("registration is closed while the pipeline is {status:?}")]
    RegistrationClosed { status: PipelineStatus },
}

/// Errors raised by a step's internal work
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{0}")]
    Failed(String),

    #[error("step panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StepError {
    /// Shorthand for a plain failure message
    pub fn failed(message: impl Into<String>) -> Self {
        StepError::Failed(message.into())
    }
}
