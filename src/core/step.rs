//! Step capability contract

use crate::core::error::StepError;
use async_trait::async_trait;

/// One unit of initialization work.
///
/// A fresh instance is constructed for every execution and dropped as soon as
/// its run finishes, so implementations only need the state their own run uses.
#[async_trait]
pub trait Step: Send + 'static {
    /// Stable identifier used in logs and completion events
    fn name(&self) -> &'static str;

    /// Perform the step's work
    async fn run_internal(&mut self) -> Result<(), StepError>;
}

/// A step type that can be registered by type rather than by constructor
pub trait StepKind: Step + Default {
    const ID: &'static str;
}
