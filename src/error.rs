//! Errors are `anyhow::Error` throughout. The inference and normalization functions never fail;
//! errors come from reading sheets and config files and from grid boundary checks.

/// The error type returned by fallible operations in this crate.
pub type Error = anyhow::Error;

/// A `Result` whose error defaults to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
