use tracing::{debug, warn};

use crate::args::ProbeArgs;
use crate::error::AppResult;
use crate::probe::{ProbeSettings, RequestSpec, RunMode};

pub(super) struct ProbePlan {
    pub(super) settings: ProbeSettings,
    pub(super) specs: Vec<RequestSpec>,
}

pub(super) fn build_plan(args: &ProbeArgs) -> AppResult<ProbePlan> {
    let settings = ProbeSettings::from_args(args)?;

    match settings.mode {
        RunMode::Sequential => {
            if args.fast_fail {
                warn!("--fast-fail is ignored with --sync.");
            }
        }
        RunMode::Concurrent { .. } => {
            if args.verbose {
                debug!("Per-code notices are only printed with --sync.");
            }
        }
    }

    let specs = args.codes.iter().copied().map(RequestSpec::from).collect();
    Ok(ProbePlan { settings, specs })
}
