use std::io::Write;

use tracing::debug;

use crate::error::AppResult;

use super::classify::classify;
use super::client::StatusFetcher;
use super::outcome::{BatchSummary, RequestSpec};

/// Probes `specs` one at a time, printing each line before the next request.
///
/// `out` is flushed on every exit path.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub async fn run_sequential<F, W>(
    fetcher: &F,
    specs: &[RequestSpec],
    verbose: bool,
    out: &mut W,
) -> AppResult<BatchSummary>
where
    F: StatusFetcher + ?Sized,
    W: Write + ?Sized,
{
    let result = probe_in_order(fetcher, specs, verbose, out).await;
    let flushed = out.flush();
    let summary = result?;
    flushed?;
    Ok(summary)
}

async fn probe_in_order<F, W>(
    fetcher: &F,
    specs: &[RequestSpec],
    verbose: bool,
    out: &mut W,
) -> AppResult<BatchSummary>
where
    F: StatusFetcher + ?Sized,
    W: Write + ?Sized,
{
    let mut summary = BatchSummary::default();
    for &spec in specs {
        if verbose {
            writeln!(out, "Trying http code {}", spec)?;
        }
        debug!("Requesting http code {}", spec);
        let raw = fetcher.fetch(spec).await;
        let classified = classify(fetcher.base_url(), spec, raw);
        classified.emit(out)?;
        summary.record(&classified.outcome);
    }
    Ok(summary)
}
