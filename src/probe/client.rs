use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use http::StatusCode;
use reqwest::{Client, redirect};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, ProbeError};

use super::outcome::RequestSpec;
use super::settings::ProbeSettings;

/// Range a status code must fall in to form a valid status line.
const VALID_STATUS_CODES: std::ops::RangeInclusive<i64> =
    crate::error::MIN_STATUS_CODE..=crate::error::MAX_STATUS_CODE;

/// A response the transport handed back as a normal reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReply {
    pub status: StatusCode,
}

/// The ways a single fetch can fail, as reported by the transport.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport surfaced a non-2xx response as an error.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("read timeout after {timeout:?}")]
    Timeout { timeout: Duration },
    #[error(transparent)]
    InvalidInput(ProbeError),
    #[error("{message}")]
    Transport { message: String },
}

pub type FetchResult = Result<StatusReply, FetchError>;

/// Issues one GET per status code against a status-simulation endpoint.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    fn base_url(&self) -> &Url;

    async fn fetch(&self, spec: RequestSpec) -> FetchResult;
}

/// [`StatusFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpStatusClient {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpStatusClient {
    /// Builds the shared HTTP client for `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be constructed.
    pub fn new(settings: &ProbeSettings) -> AppResult<Self> {
        let client = Client::builder()
            .read_timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .redirect(redirect::Policy::none())
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::probe(ProbeError::BuildClientFailed { source: err }))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            request_timeout: settings.request_timeout,
        })
    }

    fn endpoint(&self, code: i64) -> Result<Url, ProbeError> {
        self.base_url
            .join(&code.to_string())
            .map_err(|err| ProbeError::JoinUrlFailed {
                base: self.base_url.to_string(),
                code,
                source: err,
            })
    }

    /// Only a read deadline counts as a timeout; a connect that never
    /// completes is a transport failure.
    fn transport_error(&self, err: &reqwest::Error) -> FetchError {
        if err.is_connect() {
            return FetchError::Transport {
                message: describe_error(err),
            };
        }
        if err.is_timeout() {
            return FetchError::Timeout {
                timeout: self.request_timeout,
            };
        }
        FetchError::Transport {
            message: describe_error(err),
        }
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch(&self, spec: RequestSpec) -> FetchResult {
        let code = spec.code();
        validate_status_code(code).map_err(FetchError::InvalidInput)?;
        let url = self.endpoint(code).map_err(FetchError::InvalidInput)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.transport_error(&err))?;
        let status = response.status();
        debug!("Received {} for http code {}", status, code);
        if !VALID_STATUS_CODES.contains(&i64::from(status.as_u16())) {
            return Err(FetchError::InvalidInput(
                ProbeError::UnrepresentableStatus {
                    status: status.as_u16(),
                },
            ));
        }

        let response = response.error_for_status().map_err(|err| match err.status() {
            Some(status) => FetchError::Status {
                status,
                message: err.to_string(),
            },
            None => self.transport_error(&err),
        })?;

        drain_response_body(response)
            .await
            .map_err(|err| self.transport_error(&err))?;
        Ok(StatusReply { status })
    }
}

/// Rejects codes that cannot appear on an HTTP status line.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidStatusCode`] outside 100..=599.
pub(crate) fn validate_status_code(code: i64) -> Result<StatusCode, ProbeError> {
    if !VALID_STATUS_CODES.contains(&code) {
        return Err(ProbeError::InvalidStatusCode { code });
    }
    u16::try_from(code)
        .ok()
        .and_then(|value| StatusCode::from_u16(value).ok())
        .ok_or(ProbeError::InvalidStatusCode { code })
}

/// Flattens an error and its source chain into one line.
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
