use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::shutdown::ShutdownSender;
use crate::shutdown_handlers::setup_signal_shutdown_handler;

use super::client::StatusFetcher;
use super::concurrent::run_concurrent;
use super::outcome::{BatchSummary, RequestSpec};
use super::sequential::run_sequential;
use super::settings::{ProbeSettings, RunMode};

/// Picks the runner for the configured mode, runs the batch, then holds the
/// process for the grace period.
#[derive(Debug, Clone)]
pub struct ProbeController {
    settings: ProbeSettings,
}

impl ProbeController {
    #[must_use]
    pub const fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    /// Runs `specs` and waits out the grace period.
    ///
    /// An empty batch returns immediately without waiting. Anything sent on
    /// `shutdown_tx` (including Ctrl+C) ends the grace period early.
    ///
    /// # Errors
    ///
    /// Returns an error when writing results fails or a probe task panics.
    pub async fn run<F, W>(
        &self,
        fetcher: Arc<F>,
        specs: &[RequestSpec],
        out: &mut W,
        shutdown_tx: &ShutdownSender,
    ) -> AppResult<BatchSummary>
    where
        F: StatusFetcher + ?Sized + 'static,
        W: Write + ?Sized,
    {
        if specs.is_empty() {
            debug!("No status codes given; nothing to probe.");
            return Ok(BatchSummary::default());
        }

        let summary = match self.settings.mode {
            RunMode::Sequential => {
                run_sequential(fetcher.as_ref(), specs, self.settings.verbose, out).await?
            }
            RunMode::Concurrent { fast_fail } => {
                run_concurrent(fetcher, specs, fast_fail, out).await?
            }
        };
        info!(
            "Probed {} code(s): {} printed, {} failure(s), {} timeout(s){}",
            specs.len(),
            summary.printed,
            summary.failures,
            summary.timeouts,
            if summary.cancelled {
                ", batch stopped early"
            } else {
                ""
            }
        );

        hold_grace_period(self.settings.grace_period, shutdown_tx).await;
        Ok(summary)
    }
}

/// Keeps the runtime alive so late transport failures still get reported.
async fn hold_grace_period(period: Duration, shutdown_tx: &ShutdownSender) {
    if period.is_zero() {
        return;
    }
    let mut shutdown_rx = shutdown_tx.subscribe();
    let signal_handle = setup_signal_shutdown_handler(shutdown_tx);
    debug!("Holding for {:?} to catch late failures", period);

    tokio::select! {
        () = tokio::time::sleep(period) => {}
        _ = shutdown_rx.recv() => {
            info!("Grace period interrupted.");
        }
    }

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Shutdown handler join error: {}", err);
    }
}
