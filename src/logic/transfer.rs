//! Preview / download / install orchestration.
//!
//! # Flow
//!
//! 1. Validate and normalize the requested OS level
//! 2. Classify it and resolve the SUMA request name
//! 3. Prepare the download directory
//! 4. Preview: stop here for `action=preview` or when nothing is available
//! 5. Download: only when the preview found something to download
//! 6. Install with `install_all_updates` unless `download_only`
//!
//! Every step appends what it did to the report. Any error aborts the run.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, info, warn};

use super::ModuleContext;
use super::resolver::RequestResolver;
use crate::command_runner::{run_tool, CommandOutput, CommandRunner};
use crate::command_traits::ToolArgs;
use crate::commands::suma::SumaTransferArgs;
use crate::commands::system::InstallAllUpdatesArgs;
use crate::error::{Result, SumaError};
use crate::oslevel;
use crate::report::RunReport;
use crate::types::{Action, TransferMode};
use crate::update_state::{UpdateContext, UpdateStage};

static DOWNLOADED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([0-9]+)\s+downloaded$").expect("valid regex"));
static FAILED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([0-9]+)\s+failed$").expect("valid regex"));
static SKIPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([0-9]+)\s+skipped$").expect("valid regex"));

// ============================================================================
// Transfer summary
// ============================================================================

/// Counters SUMA prints at the end of a preview or download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    pub downloaded: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl TransferSummary {
    /// Parse the summary lines of SUMA output.
    ///
    /// Lines look like `      3    downloaded`. Counters without a line stay
    /// at zero; when a counter appears more than once the last line wins.
    pub fn parse(output: &str) -> Self {
        let mut summary = Self::default();
        for line in output.trim_end().lines() {
            let line = line.trim_end();
            if let Some(n) = capture_count(&DOWNLOADED, line) {
                summary.downloaded = n;
            } else if let Some(n) = capture_count(&FAILED, line) {
                summary.failed = n;
            } else if let Some(n) = capture_count(&SKIPPED, line) {
                summary.skipped = n;
            }
        }
        summary
    }

    /// Nothing to download and nothing already there.
    pub fn is_empty(&self) -> bool {
        self.downloaded == 0 && self.skipped == 0
    }
}

fn capture_count(re: &Regex, line: &str) -> Option<u64> {
    re.captures(line).and_then(|caps| caps[1].parse().ok())
}

// ============================================================================
// Orchestration
// ============================================================================

/// Run a download or preview action.
///
/// Returns the state tracker so callers can see where the run stopped.
pub fn run_transfer<R>(ctx: &ModuleContext<'_, R>, report: &mut RunReport) -> Result<UpdateContext>
where
    R: CommandRunner + ?Sized,
{
    let mut state = UpdateContext::new();
    match transfer_steps(ctx, report, &mut state) {
        Ok(()) => {
            state.transition_to(UpdateStage::Completed)?;
            Ok(state)
        }
        Err(err) => {
            if state.fail().is_ok() {
                warn!(
                    "Suma {} aborted while {}",
                    ctx.params.action,
                    state.failed_at().unwrap_or(UpdateStage::NotStarted)
                );
            }
            Err(err)
        }
    }
}

fn transfer_steps<R>(
    ctx: &ModuleContext<'_, R>,
    report: &mut RunReport,
    state: &mut UpdateContext,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let params = ctx.params;

    state.transition_to(UpdateStage::Validating)?;
    let level = oslevel::normalize_oslevel(params.oslevel())?;

    state.transition_to(UpdateStage::Resolving)?;
    let rq_type = oslevel::classify(&level, params.last_sp, report)?;
    debug!("SUMA req Type: {}", rq_type);
    let display_name = params.display_name();
    let rq_name = RequestResolver::new(ctx.runner, &params.metadata_dir, &display_name)
        .resolve(rq_type, &level, report)?;

    let download_target = prepare_download_target(ctx)?;
    let transfer = |mode| SumaTransferArgs {
        mode,
        rq_type,
        rq_name: rq_name.clone(),
        download_target: download_target.clone(),
        display_name: display_name.clone(),
        extend_fs: params.extend_fs,
    };

    // Preview
    state.transition_to(UpdateStage::Previewing)?;
    let output = run_suma(ctx, &transfer(TransferMode::Preview), report)?;
    let preview = TransferSummary::parse(&output.stdout);
    let msg = format!(
        "Preview summary : {} to download, {} failed, {} skipped",
        preview.downloaded, preview.failed, preview.skipped
    );
    info!("{}", msg);

    // Preview never goes further, whatever the counts.
    if params.action == Action::Preview || preview.is_empty() {
        report.push_message(msg);
        return Ok(());
    }
    report.push_output_lines(&output.stdout);
    report.push_message(msg);

    if preview.downloaded == 0 {
        info!("Nothing left to download, {} fixes already present", preview.skipped);
        return Ok(());
    }

    // Download
    state.transition_to(UpdateStage::Downloading)?;
    let output = run_suma(ctx, &transfer(TransferMode::Download), report)?;
    let download = TransferSummary::parse(&output.stdout);
    let msg = format!(
        "Download summary : {} downloaded, {} failed, {} skipped",
        download.downloaded, download.failed, download.skipped
    );
    if download.is_empty() {
        // Every expected download failed; reported, not fatal.
        error!("{}", msg);
        report.push_message(msg);
        return Ok(());
    }
    info!("{}", msg);
    report.push_output_lines(&output.stdout);
    report.push_message(msg);
    if download.downloaded > 0 {
        report.changed = true;
    }

    if params.download_only {
        return Ok(());
    }

    // Install
    state.transition_to(UpdateStage::Installing)?;
    install_updates(ctx, download_target, report)
}

/// Download directory without trailing separators, created if missing.
fn prepare_download_target<R>(ctx: &ModuleContext<'_, R>) -> Result<PathBuf>
where
    R: CommandRunner + ?Sized,
{
    let raw = ctx.params.download_dir.to_string_lossy();
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(SumaError::config(format!(
            "action is {} but download_dir is '{}'",
            ctx.params.action, raw
        )));
    }

    let target = PathBuf::from(trimmed);
    info!("The download location will be: {}.", target.display());
    if !target.exists() {
        fs::create_dir_all(&target)?;
    }
    Ok(target)
}

fn run_suma<R>(
    ctx: &ModuleContext<'_, R>,
    args: &SumaTransferArgs,
    report: &mut RunReport,
) -> Result<CommandOutput>
where
    R: CommandRunner + ?Sized,
{
    let command_line = args.command_line();
    debug!("SUMA - Command:{}", command_line);
    report.push_message(format!("SUMA - Command: {}", command_line));

    let output = run_tool(ctx.runner, args)?;
    report.capture(&output.stdout, &output.stderr);
    let context = format!("Suma {} command '{}'", args.mode, command_line);
    output.ensure_success(&context)
}

fn install_updates<R>(
    ctx: &ModuleContext<'_, R>,
    target: PathBuf,
    report: &mut RunReport,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let args = InstallAllUpdatesArgs { target };
    let command_line = args.command_line();
    debug!("SUMA command:{}", command_line);
    report.push_message(format!("SUMA - Command: {}", command_line));

    let output = run_tool(ctx.runner, &args)?;
    report.capture(&output.stdout, &output.stderr);
    report.changed = true;

    let context = format!("Suma install command '{}'", command_line);
    let output = output.ensure_success(&context).map_err(|err| match err {
        SumaError::Command {
            message,
            stdout,
            stderr,
        } => SumaError::command(
            format!(
                "{}. Review {} for status.",
                message,
                ctx.log_file.display()
            ),
            stdout,
            stderr,
        ),
        other => other,
    })?;

    info!("Suma install command output: {}", output.stdout.trim_end());
    Ok(())
}
