mod plan;

use std::ffi::OsString;
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};

use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::{BatchSummary, HttpStatusClient, ProbeController};
use crate::shutdown_handlers::shutdown_channel;
use plan::{ProbePlan, build_plan};
use tracing::error;

pub(crate) fn run() -> AppResult<()> {
    let args = parse_args()?;

    crate::logger::init_logging(args.verbose);

    let plan = build_plan(&args)?;
    if plan.specs.is_empty() {
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(plan))
}

fn parse_args() -> AppResult<ProbeArgs> {
    let cmd = ProbeArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = cmd.get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;
    Ok(args)
}

async fn run_async(plan: ProbePlan) -> AppResult<()> {
    let ProbePlan { settings, specs } = plan;
    let (shutdown_tx, _) = shutdown_channel();
    let fetcher = Arc::new(HttpStatusClient::new(&settings)?);
    let controller = ProbeController::new(settings);

    let mut stdout = std::io::stdout().lock();
    let result = controller
        .run(fetcher, &specs, &mut stdout, &shutdown_tx)
        .await;
    finish_run(result)
}

/// A closed or broken stdout ends the run but is not a failed run.
fn finish_run(result: AppResult<BatchSummary>) -> AppResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(AppError::Io { source }) => {
            error!("Writing results failed: {}", source);
            Ok(())
        }
        Err(err) => Err(err),
    }
}
