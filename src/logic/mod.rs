//! Logic modules — turn module parameters into SUMA requests.
//!
//! # Modules
//!
//! - `resolver` — request name resolution, metadata lookups
//! - `transfer` — preview / download / install orchestration
//! - `tasks` — list, edit, unschedule, delete, config, default

pub mod resolver;
pub mod tasks;
pub mod transfer;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::command_runner::CommandRunner;
use crate::config_file::SumaParams;
use crate::report::RunReport;

/// Everything an action needs, passed by reference down the call chain.
pub struct ModuleContext<'a, R: CommandRunner + ?Sized> {
    pub runner: &'a R,
    pub params: &'a SumaParams,
    /// Debug log the install failure message points at.
    pub log_file: PathBuf,
}

impl<'a, R: CommandRunner + ?Sized> ModuleContext<'a, R> {
    pub fn new(runner: &'a R, params: &'a SumaParams, log_file: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            params,
            log_file: log_file.into(),
        }
    }
}

/// Run the selected action and close the report.
///
/// Never returns an error: failures end up in the report with `failed` set.
pub fn run_action<R>(ctx: &ModuleContext<'_, R>) -> RunReport
where
    R: CommandRunner + ?Sized,
{
    let action = ctx.params.action;
    debug!("*** START *** action={}", action);

    let mut report = RunReport::new();
    let outcome = ctx.params.validate().and_then(|()| {
        if action.is_transfer() {
            transfer::run_transfer(ctx, &mut report).map(|_| ())
        } else {
            tasks::run_task(ctx, &mut report)
        }
    });

    match outcome {
        Ok(()) => {
            let msg = format!("Suma {} completed successfully", action);
            info!("{}", msg);
            report.succeed(msg)
        }
        Err(err) => report.fail(&err),
    }
}
