//! Status-code probing: the endpoint client, outcome classification, and the
//! sequential and concurrent batch runners driven by [`ProbeController`].
mod classify;
mod client;
mod concurrent;
mod controller;
mod outcome;
mod sequential;
mod settings;

#[cfg(test)]
mod test_support;

pub use classify::{Classified, classify, render_line, render_pipeline_failed};
pub use client::{FetchError, FetchResult, HttpStatusClient, StatusFetcher, StatusReply};
pub use concurrent::run_concurrent;
pub use controller::ProbeController;
pub use outcome::{BatchSummary, Outcome, RequestSpec};
pub use sequential::run_sequential;
pub use settings::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, ProbeSettings, RunMode,
};
