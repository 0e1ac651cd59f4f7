//! Pipeline controller - owns the step registry and drives the sequential run

use crate::{
    core::{
        BootstrapError, ListenerId, Observers, PipelineCompleted, PipelineState, PipelineStatus,
        StepCompleted, StepDescriptor, StepFactory, StepKind,
    },
    execution::{StepExecutor, StepReport},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Result of a `register` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Descriptors appended to the registry, in order
    pub accepted: Vec<StepDescriptor>,
    /// Descriptors the factory could not resolve
    pub rejected: Vec<StepDescriptor>,
}

/// Summary of a `run` call
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Option<Uuid>,
    pub status: PipelineStatus,
    /// True when the pipeline was already initialized and nothing ran
    pub skipped: bool,
    pub outcomes: Vec<StepReport>,
    /// Loop-level error that stopped the run, if any
    pub fault: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.status == PipelineStatus::Completed
    }

    /// Steps whose work failed during this run
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.outcomes.iter().filter(|report| !report.succeeded())
    }

    /// Completed with every step succeeding
    pub fn is_clean(&self) -> bool {
        self.is_completed() && self.failed_steps().next().is_none()
    }
}

/// Sequential bootstrap pipeline
#[derive(Debug, Default)]
pub struct PipelineController {
    factory: StepFactory,
    registry: Vec<StepDescriptor>,
    state: PipelineState,
    executor: StepExecutor,
    step_listeners: Observers<StepCompleted>,
    pipeline_listeners: Observers<PipelineCompleted>,
}

impl PipelineController {
    pub fn new(factory: StepFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    pub fn factory(&self) -> &StepFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut StepFactory {
        &mut self.factory
    }

    /// Registered descriptors in execution order
    pub fn steps(&self) -> &[StepDescriptor] {
        &self.registry
    }

    pub fn status(&self) -> PipelineStatus {
        self.state.status
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Append descriptors to the registry, preserving their order.
    ///
    /// Only valid while Idle. Descriptors the factory cannot resolve are
    /// logged and left out; the rest are still accepted.
    pub fn register<I, D>(&mut self, descriptors: I) -> Result<Registration, BootstrapError>
    where
        I: IntoIterator<Item = D>,
        D: Into<StepDescriptor>,
    {
        self.ensure_idle()?;

        let mut registration = Registration::default();
        for descriptor in descriptors.into_iter().map(Into::into) {
            if self.factory.contains(&descriptor) {
                debug!("Registered step '{}' at index {}", descriptor, self.registry.len());
                self.registry.push(descriptor.clone());
                registration.accepted.push(descriptor);
            } else {
                let error = BootstrapError::Configuration {
                    descriptor: descriptor.clone(),
                };
                warn!("Rejected step '{}': {}", descriptor, error);
                registration.rejected.push(descriptor);
            }
        }

        Ok(registration)
    }

    /// Register a step type with the factory and append it to the registry
    pub fn register_kind<S: StepKind>(&mut self) -> Result<(), BootstrapError> {
        self.ensure_idle()?;
        self.factory.register_kind::<S>();
        self.registry.push(StepDescriptor::of::<S>());
        Ok(())
    }

    /// Listen for per-step completion events
    pub fn on_step_completed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&StepCompleted) + Send + Sync + 'static,
    {
        self.step_listeners.attach(listener)
    }

    /// Listen for the whole-pipeline completion event
    pub fn on_pipeline_completed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&PipelineCompleted) + Send + Sync + 'static,
    {
        self.pipeline_listeners.attach(listener)
    }

    pub fn detach_step_listener(&mut self, id: ListenerId) -> bool {
        self.step_listeners.detach(id)
    }

    pub fn detach_pipeline_listener(&mut self, id: ListenerId) -> bool {
        self.pipeline_listeners.detach(id)
    }

    /// Clear the completion flag and detach every listener. The registry is kept.
    pub fn reset(&mut self) {
        debug!("Resetting pipeline state");
        self.state.reset();
        self.step_listeners.clear();
        self.pipeline_listeners.clear();
    }

    /// Run every registered step in order.
    ///
    /// A no-op once the pipeline is initialized. Step failures are contained
    /// and do not stop the run; a loop-level error leaves the pipeline Faulted
    /// without emitting the completion event. Dropping the returned future
    /// aborts the step in flight and also leaves the pipeline Faulted.
    pub async fn run(&mut self) -> RunReport {
        if self.state.initialized {
            debug!("Pipeline already initialized, ignoring run");
            return RunReport {
                run_id: self.state.run_id,
                status: self.state.status,
                skipped: true,
                outcomes: Vec::new(),
                fault: None,
                started_at: None,
                finished_at: None,
            };
        }

        let Self {
            factory,
            registry,
            state,
            executor,
            step_listeners,
            pipeline_listeners,
        } = self;

        let run_id = Uuid::new_v4();
        let total = registry.len();
        let mut guard = RunGuard::start(state, run_id);
        info!("Starting bootstrap pipeline: {} steps ({})", total, run_id);

        let mut outcomes = Vec::with_capacity(total);
        let mut fault = None;
        for (index, descriptor) in registry.iter().enumerate() {
            let step = match factory.create(descriptor) {
                Ok(step) => step,
                Err(e) => {
                    fault = Some(e);
                    break;
                }
            };
            outcomes.push(executor.execute(step, index, step_listeners).await);
        }

        guard.armed = false;
        let state = &mut *guard.state;
        let fault = match fault {
            None => {
                state.complete();
                info!("Bootstrap pipeline completed ({})", run_id);
                pipeline_listeners.emit(&PipelineCompleted {
                    run_id,
                    steps: total,
                });
                None
            }
            Some(e) => {
                error!("Fatal initialization error: {}", e);
                state.fault();
                Some(e.to_string())
            }
        };

        RunReport {
            run_id: Some(run_id),
            status: state.status,
            skipped: false,
            outcomes,
            fault,
            started_at: state.started_at,
            finished_at: state.finished_at,
        }
    }

    fn ensure_idle(&self) -> Result<(), BootstrapError> {
        match self.state.status {
            PipelineStatus::Idle => Ok(()),
            status => Err(BootstrapError::RegistrationClosed { status }),
        }
    }
}

/// Marks the state Running for the lifetime of a run and faults it if the
/// run is dropped before being disarmed
struct RunGuard<'a> {
    state: &'a mut PipelineState,
    armed: bool,
}

impl<'a> RunGuard<'a> {
    fn start(state: &'a mut PipelineState, run_id: Uuid) -> Self {
        state.start(run_id);
        Self { state, armed: true }
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Bootstrap run dropped before finishing");
            self.state.fault();
        }
    }
}
