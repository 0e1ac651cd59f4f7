//! Built-in steps

use crate::core::{Step, StepError, StepFactory, StepKind};
use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Completes immediately
#[derive(Debug, Default)]
pub struct NoopStep;

#[async_trait]
impl Step for NoopStep {
    fn name(&self) -> &'static str {
        Self::ID
    }

    async fn run_internal(&mut self) -> Result<(), StepError> {
        Ok(())
    }
}

impl StepKind for NoopStep {
    const ID: &'static str = "noop";
}

/// Yields to the runtime for a short while before completing
#[derive(Debug)]
pub struct WarmupStep {
    pub delay: Duration,
}

impl Default for WarmupStep {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
        }
    }
}

#[async_trait]
impl Step for WarmupStep {
    fn name(&self) -> &'static str {
        Self::ID
    }

    async fn run_internal(&mut self) -> Result<(), StepError> {
        debug!("Warming up for {:?}", self.delay);
        sleep(self.delay).await;
        Ok(())
    }
}

impl StepKind for WarmupStep {
    const ID: &'static str = "warmup";
}

/// Always fails
#[derive(Debug, Default)]
pub struct FailStep;

#[async_trait]
impl Step for FailStep {
    fn name(&self) -> &'static str {
        Self::ID
    }

    async fn run_internal(&mut self) -> Result<(), StepError> {
        Err(StepError::failed("intentional failure"))
    }
}

impl StepKind for FailStep {
    const ID: &'static str = "fail";
}

/// Factory with every built-in step registered
pub fn builtin_factory() -> StepFactory {
    let mut factory = StepFactory::new();
    factory
        .register_kind::<NoopStep>()
        .register_kind::<WarmupStep>()
        .register_kind::<FailStep>();
    factory
}
