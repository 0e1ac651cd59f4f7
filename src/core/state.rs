//! Pipeline state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of the pipeline controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStatus {
    /// Accepting registrations, not yet run (or reset)
    Idle,
    /// Steps are being executed
    Running,
    /// Every registered step has been attempted
    Completed,
    /// The loop itself hit an error; `run()` may be invoked again
    Faulted,
}

/// Process-wide initialization state owned by the controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Completion flag
    pub initialized: bool,

    /// Current lifecycle status
    pub status: PipelineStatus,

    /// Id of the most recent run, if any
    pub run_id: Option<Uuid>,

    /// When the most recent run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the most recent run completed or faulted
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            initialized: false,
            status: PipelineStatus::Idle,
            run_id: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Mark a run as started
    pub fn start(&mut self, run_id: Uuid) {
        self.status = PipelineStatus::Running;
        self.run_id = Some(run_id);
        self.started_at = Some(Utc::now());
        self.finished_at = None;
    }

    /// Mark the pipeline as initialized
    pub fn complete(&mut self) {
        self.initialized = true;
        self.status = PipelineStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the run as faulted; the completion flag is left untouched
    pub fn fault(&mut self) {
        self.status = PipelineStatus::Faulted;
        self.finished_at = Some(Utc::now());
    }

    /// Back to initial values
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
