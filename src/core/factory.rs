//! Step factory - turns descriptors into live step instances

use crate::core::{
    descriptor::StepDescriptor,
    error::BootstrapError,
    step::{Step, StepKind},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor for a step instance
pub type StepConstructor = Arc<dyn Fn() -> Box<dyn Step> + Send + Sync>;

/// Maps stable step identifiers to constructors
#[derive(Clone, Default)]
pub struct StepFactory {
    constructors: HashMap<String, StepConstructor>,
}

impl StepFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step type under its `ID`
    pub fn register_kind<S: StepKind>(&mut self) -> &mut Self {
        self.register_with(S::ID, || Box::new(S::default()))
    }

    /// Register an arbitrary constructor, replacing any previous one with the same id
    pub fn register_with<F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Step> + Send + Sync + 'static,
    {
        self.constructors.insert(id.into(), Arc::new(constructor));
        self
    }

    /// Remove a constructor. Returns true if one was registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.constructors.remove(id).is_some()
    }

    /// Whether the descriptor resolves to a known step
    pub fn contains(&self, descriptor: &StepDescriptor) -> bool {
        self.constructors.contains_key(descriptor.as_str())
    }

    /// Known step identifiers, sorted
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.constructors.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Construct a fresh instance for the descriptor
    pub fn create(&self, descriptor: &StepDescriptor) -> Result<Box<dyn Step>, BootstrapError> {
        let constructor = self
            .constructors
            .get(descriptor.as_str())
            .ok_or_else(|| BootstrapError::Configuration {
                descriptor: descriptor.clone(),
            })?;
        Ok(constructor())
    }
}

impl std::fmt::Debug for StepFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}
