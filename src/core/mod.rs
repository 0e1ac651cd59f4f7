//! Core domain models for the bootstrap pipeline
//!
//! This module defines the step contract, descriptors, the step factory,
//! completion events, and the pipeline state.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod factory;
pub mod state;
pub mod step;

pub use descriptor::*;
pub use error::*;
pub use events::*;
pub use factory::*;
pub use state::*;
pub use step::*;
