//! Request name resolution.
//!
//! Turns a classified OS level into the exact `RqName` SUMA needs.
//!
//! | Request                 | Resolved To                               |
//! |-------------------------|-------------------------------------------|
//! | TL                      | `YYYY-TT`, suffix stripped                |
//! | SP `YYYY-TT-SS-BBBB`    | the level itself                          |
//! | SP `YYYY-TT-SS`         | build number from metadata                |
//! | SP `YYYY-TT` (last SP)  | highest SP of the TL from metadata        |
//! | Latest                  | highest SP of the running TL from metadata|
//!
//! Only the metadata rows run external commands. The metadata directory is
//! created for the request and removed once the version is known.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::command_runner::{run_tool, CommandRunner};
use crate::command_traits::ToolArgs;
use crate::commands::suma::SumaMetadataArgs;
use crate::commands::system::OslevelArgs;
use crate::error::{Result, SumaError};
use crate::metadata;
use crate::oslevel::{self, LATEST};
use crate::report::RunReport;
use crate::types::RequestType;

/// Resolves request names, fetching metadata through `runner` when needed.
pub struct RequestResolver<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    metadata_dir: &'a Path,
    display_name: &'a str,
}

impl<'a, R: CommandRunner + ?Sized> RequestResolver<'a, R> {
    pub fn new(runner: &'a R, metadata_dir: &'a Path, display_name: &'a str) -> Self {
        Self {
            runner,
            metadata_dir,
            display_name,
        }
    }

    /// Compute `RqName` for a request.
    pub fn resolve(
        &self,
        rq_type: RequestType,
        oslevel: &str,
        report: &mut RunReport,
    ) -> Result<String> {
        let rq_name = match rq_type {
            RequestType::Tl => oslevel::technology_level(oslevel)
                .unwrap_or_default()
                .to_string(),
            RequestType::Sp if oslevel::is_full_sp(oslevel) => oslevel.to_string(),
            _ => self.latest_sp_from_metadata(oslevel, report)?,
        };

        if rq_name.trim().is_empty() {
            return Err(SumaError::metadata(format!(
                "OS level {} does not match any fixes",
                oslevel
            )));
        }
        debug!("Suma req Name: {}", rq_name);
        Ok(rq_name)
    }

    /// Current `YYYY-TT-SS(-BB|-BBBB)` level of the running system.
    pub fn system_level(&self) -> Result<String> {
        let args = OslevelArgs;
        let context = format!("Suma oslevel command '{}'", args.command_line());
        let output = run_tool(self.runner, &args)?.ensure_success(&context)?;

        let level = output.stdout.trim();
        if !oslevel::is_system_level(level) {
            let msg = format!("{} returned an unexpected OS level '{}'", context, level);
            tracing::error!("{}, stderr: {}", msg, output.stderr.trim());
            return Err(SumaError::command(msg, output.stdout, output.stderr));
        }
        Ok(level.to_string())
    }

    fn latest_sp_from_metadata(&self, oslevel: &str, report: &mut RunReport) -> Result<String> {
        // Working level is either a TL (YYYY-TT) or a short SP (YYYY-TT-SS).
        let (target, rq_oslevel) = if oslevel == LATEST {
            let system = self.system_level()?;
            let tl = oslevel::prefix(&system, 7).to_string();
            (system, tl)
        } else {
            (oslevel.to_string(), oslevel.to_string())
        };

        let filter_ml = oslevel::prefix(&rq_oslevel, 7);
        if filter_ml.is_empty() {
            return Err(SumaError::metadata(format!(
                "Cannot build minimum level filter based on the target OS level {}",
                target
            )));
        }

        if !self.metadata_dir.exists() {
            fs::create_dir_all(self.metadata_dir)?;
        }

        let args = SumaMetadataArgs {
            metadata_dir: self.metadata_dir.to_path_buf(),
            filter_ml: filter_ml.to_string(),
            display_name: self.display_name.to_string(),
        };
        let context = format!("Suma metadata command '{}'", args.command_line());
        run_tool(self.runner, &args)?.ensure_success(&context)?;

        let files = metadata::candidate_files(self.metadata_dir, &rq_oslevel)?;
        let sp_version = metadata::latest_sp_version(&files)?
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                SumaError::metadata(format!(
                    "Cannot determine SP version for OS level {}: 'SP name' not found in metadata files {:?}",
                    target, files
                ))
            })?;

        fs::remove_dir_all(self.metadata_dir)?;

        let msg = format!("Suma metadata: {} is the latest SP of {}", sp_version, target);
        info!("{}", msg);
        report.push_message(msg);
        Ok(sp_version)
    }
}
