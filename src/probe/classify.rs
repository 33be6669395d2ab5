use std::io::Write;

use tracing::{debug, error, info};
use url::Url;

use super::client::{FetchError, FetchResult};
use super::outcome::{Outcome, RequestSpec};

/// An outcome together with the single line printed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub outcome: Outcome,
    pub line: String,
}

impl Classified {
    /// Writes the line and emits the diagnostic log entry for the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub(crate) fn emit<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: Write + ?Sized,
    {
        writeln!(out, "{}", self.line)?;
        match &self.outcome {
            Outcome::Success { .. } => {}
            Outcome::ClientError { code, message, .. } => {
                debug!("http code {} surfaced as client error: {}", code, message);
            }
            Outcome::TimeoutError { code } => {
                error!(
                    "completely wrong exception: http code {} ended in a read timeout",
                    code
                );
            }
            Outcome::InvalidInputError { code, message } => {
                info!("invalid input for http code {}: {}", code, message);
            }
            Outcome::UnexpectedError { code, message } => {
                info!("unexpected exception for http code {}: {}", code, message);
            }
        }
        Ok(())
    }
}

/// Maps a raw fetch result onto an [`Outcome`] and renders its line.
#[must_use]
pub fn classify(base_url: &Url, spec: RequestSpec, raw: FetchResult) -> Classified {
    let code = spec.code();
    let outcome = match raw {
        Ok(reply) => Outcome::Success {
            code,
            status_line: reply.status.to_string(),
        },
        Err(FetchError::Status { status, message }) => Outcome::ClientError {
            code,
            status: status.to_string(),
            message,
        },
        Err(FetchError::Timeout { .. }) => Outcome::TimeoutError { code },
        Err(FetchError::InvalidInput(err)) => Outcome::InvalidInputError {
            code,
            message: err.to_string(),
        },
        Err(FetchError::Transport { message }) => Outcome::UnexpectedError { code, message },
    };
    let line = render_line(base_url, &outcome);
    Classified { outcome, line }
}

#[must_use]
pub fn render_line(base_url: &Url, outcome: &Outcome) -> String {
    let base = base_url.as_str();
    match outcome {
        Outcome::Success { code, status_line } => {
            format!("OK: response to {}{}: {}", base, code, status_line)
        }
        Outcome::ClientError {
            code,
            status,
            message,
        } => format!("OK: response to {}{}: {} / {}", base, code, status, message),
        Outcome::TimeoutError { code } => {
            format!("BUG! request to {}{} failed with timeout!", base, code)
        }
        Outcome::InvalidInputError { code, message }
        | Outcome::UnexpectedError { code, message } => format!(
            "OK-ish: request to {}{} failed with exception {}",
            base, code, message
        ),
    }
}

/// Summary line printed once a fast-fail trigger stops the batch.
#[must_use]
pub fn render_pipeline_failed(base_url: &Url, trigger: &Outcome) -> String {
    format!(
        "pipeline failed: request to {}{} tripped fast-fail, remaining requests cancelled",
        base_url.as_str(),
        trigger.code()
    )
}
