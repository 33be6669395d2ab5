use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_wait_secs};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "httpstat-probe",
    version,
    about = "Requests each given status code from https://httpstat.us/ and reports how the HTTP client surfaced the result."
)]
pub struct ProbeArgs {
    /// HTTP status codes to request (e.g. 200 404 503)
    #[arg(value_name = "STATUS_CODE", allow_negative_numbers = true)]
    pub codes: Vec<i64>,

    /// Print a message before each attempted code (sync mode only); also raises log level to debug
    #[arg(
        long,
        short = 'v',
        env = "HTTPSTAT_PROBE_VERBOSE",
        value_parser = parse_bool_env
    )]
    pub verbose: bool,

    /// Probe codes one at a time instead of concurrently
    #[arg(long, short = 'S', env = "HTTPSTAT_PROBE_SYNC", value_parser = parse_bool_env)]
    pub sync: bool,

    /// Cancel the remaining requests on the first failure (ignored with --sync)
    #[arg(
        long = "fast-fail",
        short = 'F',
        env = "HTTPSTAT_PROBE_FAST_FAIL",
        value_parser = parse_bool_env
    )]
    pub fast_fail: bool,

    /// Seconds to keep the process alive after the batch to catch late timeouts (0 disables)
    #[arg(
        long,
        short = 'w',
        value_name = "SECONDS",
        env = "HTTPSTAT_PROBE_WAIT",
        default_value = "10",
        value_parser = parse_wait_secs
    )]
    pub wait: Duration,
}
