use std::time::Duration;

use crate::error::ValidationError;

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}

/// Parses the grace period in whole seconds; `0` disables the wait.
pub(crate) fn parse_wait_secs(s: &str) -> Result<Duration, ValidationError> {
    s.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|err| ValidationError::InvalidWait {
            value: s.to_owned(),
            source: err,
        })
}
