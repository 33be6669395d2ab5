use std::time::Duration;

use url::Url;

use crate::args::{DEFAULT_GRACE_PERIOD_SECS, ProbeArgs};
use crate::error::ValidationError;

/// Status-simulation service every probe is sent to.
pub const DEFAULT_BASE_URL: &str = "https://httpstat.us/";
/// Read deadline applied to each request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Sequential,
    Concurrent { fast_fail: bool },
}

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub mode: RunMode,
    pub verbose: bool,
    pub grace_period: Duration,
}

impl ProbeSettings {
    /// Builds settings for `base_url` with the default timeouts, concurrent
    /// mode without fast-fail, and the default grace period.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` does not parse or cannot carry a path.
    pub fn new(base_url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            mode: RunMode::Concurrent { fast_fail: false },
            verbose: false,
            grace_period: Duration::from_secs(DEFAULT_GRACE_PERIOD_SECS),
        })
    }

    /// Settings for the CLI: the fixed endpoint plus the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in base URL is rejected.
    pub fn from_args(args: &ProbeArgs) -> Result<Self, ValidationError> {
        let mut settings = Self::new(DEFAULT_BASE_URL)?;
        settings.mode = if args.sync {
            RunMode::Sequential
        } else {
            RunMode::Concurrent {
                fast_fail: args.fast_fail,
            }
        };
        settings.verbose = args.verbose;
        settings.grace_period = args.wait;
        Ok(settings)
    }
}

/// Parses `value` as a base URL, appending a trailing `/` so codes join as a
/// child path segment.
fn parse_base_url(value: &str) -> Result<Url, ValidationError> {
    let mut url = Url::parse(value).map_err(|err| ValidationError::InvalidBaseUrl {
        url: value.to_owned(),
        source: err,
    })?;
    if url.cannot_be_a_base() {
        return Err(ValidationError::BaseUrlCannotBeABase {
            url: value.to_owned(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
