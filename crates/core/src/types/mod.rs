//! Domain types shared across the stepwise crates

pub mod browsers;
pub mod state;
pub mod step;

pub use browsers::BrowserList;
pub use state::RunState;
pub use step::StepRef;
