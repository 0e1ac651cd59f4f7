//! Step descriptors - identifiers that name a step implementation

use crate::core::step::StepKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque identifier naming a concrete step implementation.
///
/// Descriptors are resolved through a [`StepFactory`](crate::core::factory::StepFactory);
/// whether they resolve at all is only checked when they are registered or created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDescriptor(String);

impl StepDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Descriptor for a statically known step kind
    pub fn of<S: StepKind>() -> Self {
        Self(S::ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepDescriptor {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StepDescriptor {
    fn from(id: String) -> Self {
        Self(id)
    }
}
