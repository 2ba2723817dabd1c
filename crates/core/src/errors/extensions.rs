//! Extension traits for error handling

use super::types::{Error, Result};

/// Attach a configuration message to a fallible build file operation
pub trait ResultExt<T> {
    /// Wrap the error in a configuration error described by `f`.
    ///
    /// The original error stays reachable through `source()`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::configuration_caused_by(f(), e.into()))
    }
}
