use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config_file::{SumaParams, DEFAULT_DOWNLOAD_DIR, DEFAULT_METADATA_DIR};
use crate::logging::DEFAULT_LOG_DIR;
use crate::types::Action;

/// aixsuma - download and install AIX TLs and SPs with SUMA
#[derive(Parser)]
#[command(name = "aixsuma")]
#[command(about = "Download and install AIX technology levels and service packs with SUMA")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
pub struct Cli {
    /// JSON file with the module arguments (binary module mode)
    pub args_file: Option<PathBuf>,

    /// Directory holding suma_debug.log
    #[arg(long, global = true, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and install all fixes for an OS level
    Download(TransferArgs),
    /// Run every check without downloading
    Preview(TransferArgs),
    /// List all SUMA tasks, or one task
    List {
        /// SUMA task identification number
        task_id: Option<String>,
    },
    /// Save, schedule or unschedule a SUMA task
    Edit {
        /// SUMA task identification number
        task_id: String,
        /// Schedule "minute hour day month weekday"; blank unschedules,
        /// absent saves without scheduling
        #[arg(long)]
        sched_time: Option<String>,
    },
    /// Remove any scheduling information of a SUMA task
    Unschedule {
        /// SUMA task identification number
        task_id: String,
    },
    /// Delete a SUMA task and its schedule
    Delete {
        /// SUMA task identification number
        task_id: String,
    },
    /// List global SUMA configuration settings
    Config,
    /// List default SUMA tasks
    Default,
}

/// Options shared by download and preview
#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Target level: Latest, xxxx-xx(-00-0000), xxxx-xx-xx or xxxx-xx-xx-xxxx
    #[arg(short, long, default_value = "Latest")]
    pub oslevel: String,
    /// Download the last SP of the TL given in --oslevel
    #[arg(long)]
    pub last_sp: bool,
    /// Do not extend the filesystem when more space is needed
    #[arg(long)]
    pub no_extend_fs: bool,
    /// Directory where updates are downloaded
    #[arg(short, long, default_value = DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,
    /// Download without installing
    #[arg(long)]
    pub download_only: bool,
    /// Directory where metadata files are downloaded
    #[arg(long, default_value = DEFAULT_METADATA_DIR)]
    pub metadata_dir: PathBuf,
    /// Display name of the SUMA task
    #[arg(long)]
    pub description: Option<String>,
}

impl TransferArgs {
    fn to_params(&self, action: Action) -> SumaParams {
        SumaParams {
            action,
            oslevel: Some(self.oslevel.clone()),
            last_sp: self.last_sp,
            extend_fs: !self.no_extend_fs,
            download_dir: self.download_dir.clone(),
            download_only: self.download_only,
            metadata_dir: self.metadata_dir.clone(),
            description: self.description.clone(),
            ..SumaParams::default()
        }
    }
}

impl Commands {
    /// Module parameters equivalent to this subcommand.
    pub fn to_params(&self) -> SumaParams {
        let task = |action: Action, task_id: Option<&String>| SumaParams {
            action,
            task_id: task_id.cloned(),
            ..SumaParams::default()
        };

        match self {
            Self::Download(args) => args.to_params(Action::Download),
            Self::Preview(args) => args.to_params(Action::Preview),
            Self::List { task_id } => task(Action::List, task_id.as_ref()),
            Self::Edit {
                task_id,
                sched_time,
            } => SumaParams {
                sched_time: sched_time.clone(),
                ..task(Action::Edit, Some(task_id))
            },
            Self::Unschedule { task_id } => task(Action::Unschedule, Some(task_id)),
            Self::Delete { task_id } => task(Action::Delete, Some(task_id)),
            Self::Config => task(Action::Config, None),
            Self::Default => task(Action::Default, None),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
