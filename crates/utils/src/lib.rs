//! Shared utilities for stepwise
//!
//! Path and glob helpers used by the built-in plugins, and the tracing
//! setup used by the command line.

pub mod paths;
pub mod tracing;

pub use paths::*;
