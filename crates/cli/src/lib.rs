pub mod cli;
pub mod commands;
mod display;

pub use cli::Cli;
pub use commands::Commands;
