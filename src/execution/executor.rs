//! Step executor - runs a single step with failure containment

use crate::core::{Observers, Step, StepCompleted, StepError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

/// How a single step execution ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The step's work finished without error
    Succeeded,
    /// The step's work failed; the error was logged and contained
    Failed { error: String },
}

/// Record of one step execution
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub name: String,
    pub outcome: StepOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StepReport {
    pub fn succeeded(&self) -> bool {
        self.outcome == StepOutcome::Succeeded
    }
}

/// Executes a single step instance
#[derive(Debug, Default, Clone, Copy)]
pub struct StepExecutor;

impl StepExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run the step to completion.
    ///
    /// Never propagates the step's failure: errors and panics are logged and
    /// reported in the returned [`StepReport`]. A [`StepCompleted`] event is
    /// emitted only on success. The instance is dropped before this returns,
    /// and dropping the returned future aborts the step's task.
    pub async fn execute(
        &self,
        mut step: Box<dyn Step>,
        index: usize,
        listeners: &Observers<StepCompleted>,
    ) -> StepReport {
        let name = step.name();
        debug!("Executing step {} ({})", index, name);

        let started_at = Utc::now();
        let mut task = AbortOnDrop(tokio::spawn(async move { step.run_internal().await }));
        let result = match (&mut task.0).await {
            Ok(result) => result,
            Err(join_error) => Err(StepError::Panicked(panic_message(join_error))),
        };
        let finished_at = Utc::now();

        let outcome = match result {
            Ok(()) => {
                info!("Step {} ({}) completed", index, name);
                listeners.emit(&StepCompleted {
                    index,
                    name: name.to_string(),
                });
                StepOutcome::Succeeded
            }
            Err(e) => {
                error!("Step {} ({}) failed: {}", index, name, e);
                StepOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        StepReport {
            index,
            name: name.to_string(),
            outcome,
            started_at,
            finished_at,
        }
    }
}

/// Aborts the step's task if the executing future is dropped first
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn panic_message(join_error: JoinError) -> String {
    if join_error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = join_error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
