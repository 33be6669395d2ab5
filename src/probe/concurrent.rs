use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::shutdown::FastFailSignal;

use super::classify::{Classified, classify, render_pipeline_failed};
use super::client::StatusFetcher;
use super::outcome::{BatchSummary, RequestSpec};

/// Probes every code at once and prints lines in completion order.
///
/// With `fast_fail`, the first failing outcome trips a shared signal: in-flight
/// requests are dropped, results already queued are still printed once, and a
/// `pipeline failed` line closes the output.
///
/// # Errors
///
/// Returns an error when writing to `out` fails or a probe task panics.
pub async fn run_concurrent<F, W>(
    fetcher: Arc<F>,
    specs: &[RequestSpec],
    fast_fail: bool,
    out: &mut W,
) -> AppResult<BatchSummary>
where
    F: StatusFetcher + ?Sized + 'static,
    W: Write + ?Sized,
{
    let signal = FastFailSignal::new();
    let (result_tx, mut result_rx) = mpsc::channel::<Classified>(specs.len().max(1));
    let mut handles = Vec::with_capacity(specs.len());

    for &spec in specs {
        let fetcher = Arc::clone(&fetcher);
        let result_tx = result_tx.clone();
        let signal = signal.clone();
        handles.push(tokio::spawn(async move {
            let mut cancel_rx = signal.subscribe();
            if signal.is_tripped() {
                return;
            }
            let raw = tokio::select! {
                raw = fetcher.fetch(spec) => raw,
                _ = cancel_rx.recv() => {
                    debug!("Cancelled in-flight request for http code {}", spec);
                    return;
                }
            };
            let classified = classify(fetcher.base_url(), spec, raw);
            if signal.is_tripped() {
                return;
            }
            if result_tx.send(classified).await.is_err() {
                debug!("Dropped result for http code {} after fast-fail", spec);
            }
        }));
    }
    drop(result_tx);

    let result = collect_results(&mut result_rx, &signal, fast_fail, fetcher.as_ref(), out).await;
    let flushed = out.flush();

    for handle in handles {
        if let Err(err) = handle.await {
            warn!("Probe task failed: {}", err);
            if err.is_panic() {
                return Err(err.into());
            }
        }
    }

    let summary = result?;
    flushed?;
    Ok(summary)
}

async fn collect_results<F, W>(
    result_rx: &mut mpsc::Receiver<Classified>,
    signal: &FastFailSignal,
    fast_fail: bool,
    fetcher: &F,
    out: &mut W,
) -> AppResult<BatchSummary>
where
    F: StatusFetcher + ?Sized,
    W: Write + ?Sized,
{
    let mut summary = BatchSummary::default();
    while let Some(classified) = result_rx.recv().await {
        classified.emit(out)?;
        summary.record(&classified.outcome);

        if fast_fail && classified.outcome.is_failure() {
            signal.trip();
            result_rx.close();
            while let Some(queued) = result_rx.recv().await {
                queued.emit(out)?;
                summary.record(&queued.outcome);
            }
            writeln!(
                out,
                "{}",
                render_pipeline_failed(fetcher.base_url(), &classified.outcome)
            )?;
            summary.cancelled = true;
            break;
        }
    }
    Ok(summary)
}
