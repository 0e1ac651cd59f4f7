//! Host integration - activates the pipeline in manual or automatic mode

use crate::{
    core::{config::BootstrapConfig, StepFactory},
    execution::{PipelineController, Registration, RunReport},
};
use tracing::{info, warn};

/// Activates a [`PipelineController`] from a [`BootstrapConfig`].
///
/// Activation resets the controller, registers the configured steps, hands
/// the controller to a setup hook (to attach listeners), and triggers the run
/// only when `auto_start` is set.
#[derive(Debug)]
pub struct Bootstrapper {
    config: BootstrapConfig,
    controller: PipelineController,
    registration: Option<Registration>,
}

impl Bootstrapper {
    pub fn new(config: BootstrapConfig, factory: StepFactory) -> Self {
        Self {
            config,
            controller: PipelineController::new(factory),
            registration: None,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn controller(&self) -> &PipelineController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PipelineController {
        &mut self.controller
    }

    /// Outcome of the registration performed by the last activation
    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }

    /// Activate the pipeline. Returns `None` in manual mode.
    ///
    /// Only the first activation registers the configured steps; later
    /// activations reset state and reuse the existing registry.
    pub async fn activate<F>(&mut self, setup: F) -> Option<RunReport>
    where
        F: FnOnce(&mut PipelineController),
    {
        self.controller.reset();

        if self.registration.is_none() {
            match self.controller.register(self.config.steps.iter().cloned()) {
                Ok(registration) => {
                    if !registration.rejected.is_empty() {
                        warn!(
                            "{} of {} configured steps were rejected",
                            registration.rejected.len(),
                            self.config.steps.len()
                        );
                    }
                    self.registration = Some(registration);
                }
                Err(e) => warn!("Could not register configured steps: {}", e),
            }
        }

        setup(&mut self.controller);

        if self.config.auto_start {
            info!("Auto-starting bootstrap pipeline '{}'", self.config.name);
            Some(self.controller.run().await)
        } else {
            info!("Bootstrap pipeline '{}' waiting for manual start", self.config.name);
            None
        }
    }

    /// Trigger the run explicitly (manual mode)
    pub async fn run(&mut self) -> RunReport {
        self.controller.run().await
    }
}
