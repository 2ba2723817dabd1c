//! Build file parsing and configuration management for stepwise
//!
//! This crate owns the JSON build file format: target-kind sections with
//! typed per-plugin records, and composite task lists.

pub mod config;
pub mod loader;
pub mod parser;

pub use config::Config;
pub use loader::ConfigLoader;
pub use parser::*;
