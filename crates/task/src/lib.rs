//! Task orchestration for stepwise
//!
//! This crate registers composite tasks, resolves them depth-first into
//! flat leaf plans and runs each leaf through an explicitly registered
//! plugin, one at a time.

pub mod definition;
pub mod orchestrator;
pub mod plugin;
pub mod registry;
pub mod testing;

pub use definition::*;
pub use orchestrator::*;
pub use plugin::*;
pub use registry::*;
