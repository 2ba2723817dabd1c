//! Core domain types, errors, and constants for `stepwise`.
//!
//! This crate holds the building blocks shared by every other crate in the
//! workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias covering every failure
//!   a build run can surface (registration, resolution, execution).
//! - **`types`**: Step references, the browser list parsed from the command
//!   line, and the run state machine.
//! - **`constants`**: File names, environment variable names and defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
