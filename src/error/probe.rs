use thiserror::Error;

/// Lowest status code a response line may carry.
pub const MIN_STATUS_CODE: i64 = 100;
/// Highest status code a response line may carry.
pub const MAX_STATUS_CODE: i64 = 599;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(
        "invalid HTTP status code {code}: expected a value within {min}..={max}",
        min = MIN_STATUS_CODE,
        max = MAX_STATUS_CODE
    )]
    InvalidStatusCode { code: i64 },
    #[error("server answered with unrepresentable status {status}")]
    UnrepresentableStatus { status: u16 },
    #[error("failed to join '{code}' onto base URL '{base}': {source}")]
    JoinUrlFailed {
        base: String,
        code: i64,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
