use std::fmt;

/// A single status code to request. Parsed once from input, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestSpec {
    code: i64,
}

impl RequestSpec {
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self { code }
    }

    #[must_use]
    pub const fn code(self) -> i64 {
        self.code
    }
}

impl From<i64> for RequestSpec {
    fn from(code: i64) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Terminal result of one probe.
///
/// `Success` and `ClientError` both describe a real server response; they
/// differ only in whether the transport reported the status as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        code: i64,
        status_line: String,
    },
    ClientError {
        code: i64,
        status: String,
        message: String,
    },
    TimeoutError {
        code: i64,
    },
    InvalidInputError {
        code: i64,
        message: String,
    },
    UnexpectedError {
        code: i64,
        message: String,
    },
}

impl Outcome {
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Outcome::Success { code, .. }
            | Outcome::ClientError { code, .. }
            | Outcome::TimeoutError { code }
            | Outcome::InvalidInputError { code, .. }
            | Outcome::UnexpectedError { code, .. } => *code,
        }
    }

    /// Whether this outcome trips fast-fail cancellation.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        match self {
            Outcome::Success { .. } | Outcome::ClientError { .. } => false,
            Outcome::TimeoutError { .. }
            | Outcome::InvalidInputError { .. }
            | Outcome::UnexpectedError { .. } => true,
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Outcome::TimeoutError { .. })
    }
}

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub printed: usize,
    pub failures: usize,
    pub timeouts: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    pub(crate) const fn record(&mut self, outcome: &Outcome) {
        self.printed = self.printed.saturating_add(1);
        if outcome.is_failure() {
            self.failures = self.failures.saturating_add(1);
        }
        if outcome.is_timeout() {
            self.timeouts = self.timeouts.saturating_add(1);
        }
    }
}
