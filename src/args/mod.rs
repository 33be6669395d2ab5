//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod test_support;

pub use cli::ProbeArgs;
pub use defaults::{DEFAULT_GRACE_PERIOD_SECS, DEFAULT_USER_AGENT};
