//! cliptrans orchestration layer
//!
//! Owns the active provider, the active history store and the published
//! config snapshot, and runs translation jobs against them.

pub mod deps;
pub mod dispatcher;
pub mod resources;
pub mod runtime;
pub mod unconfigured;
pub mod usecases;

pub use deps::AppDeps;
pub use dispatcher::{TriggerDispatcher, TriggerSource};
pub use resources::{ActiveResources, Swap};
pub use runtime::{AppRuntime, UseCases};
pub use unconfigured::UnconfiguredProvider;
