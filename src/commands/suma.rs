//! Type-safe arguments for `/usr/sbin/suma`.
//!
//! - `SumaMetadataArgs` for metadata-only requests
//! - `SumaTransferArgs` for preview and download requests
//! - `SumaTaskArgs` for task management (`-l`, `-w`, `-s`, `-u`, `-d`, `-c`, `-D`)

use std::path::PathBuf;

use crate::command_traits::ToolArgs;
use crate::types::{RequestType, TransferMode};

/// Path of the SUMA command.
pub const SUMA_PATH: &str = "/usr/sbin/suma";

// ============================================================================
// Metadata
// ============================================================================

/// Fetch the descriptor XML files for a minimum level without any fileset.
#[derive(Debug, Clone)]
pub struct SumaMetadataArgs {
    /// Where the metadata files land; also used as the filter directory.
    pub metadata_dir: PathBuf,
    /// Minimum level filter (`YYYY-TT`).
    pub filter_ml: String,
    /// Task display name.
    pub display_name: String,
}

impl ToolArgs for SumaMetadataArgs {
    fn program(&self) -> &'static str {
        SUMA_PATH
    }

    fn to_cli_args(&self) -> Vec<String> {
        let dir = self.metadata_dir.display().to_string();
        vec![
            "-x".to_string(),
            "-a".to_string(),
            "Action=Metadata".to_string(),
            "-a".to_string(),
            "RqType=Latest".to_string(),
            "-a".to_string(),
            format!("DLTarget={}", dir),
            "-a".to_string(),
            format!("FilterML={}", self.filter_ml),
            "-a".to_string(),
            format!("DisplayName={}", self.display_name),
            "-a".to_string(),
            format!("FilterDir={}", dir),
        ]
    }
}

// ============================================================================
// Preview / Download
// ============================================================================

/// Preview or download the fixes of a request.
#[derive(Debug, Clone)]
pub struct SumaTransferArgs {
    pub mode: TransferMode,
    pub rq_type: RequestType,
    /// Ignored by SUMA (and not passed) for `RqType=Latest`.
    pub rq_name: String,
    pub download_target: PathBuf,
    pub display_name: String,
    /// Let SUMA extend the filesystem when space runs out.
    pub extend_fs: bool,
}

impl ToolArgs for SumaTransferArgs {
    fn program(&self) -> &'static str {
        SUMA_PATH
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            "-a".to_string(),
            format!("RqType={}", self.rq_type),
            "-a".to_string(),
            format!("Action={}", self.mode),
            "-a".to_string(),
            format!("DLTarget={}", self.download_target.display()),
            "-a".to_string(),
            format!("DisplayName={}", self.display_name),
        ];
        if self.rq_type != RequestType::Latest {
            args.push("-a".to_string());
            args.push(format!("RqName={}", self.rq_name));
        }
        args.push("-a".to_string());
        args.push(format!("Extend={}", if self.extend_fs { "y" } else { "n" }));
        args
    }
}

// ============================================================================
// Task management
// ============================================================================

/// Single-flag task management requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumaTaskArgs {
    /// `-l [task]`: list all tasks or one task
    List(Option<String>),
    /// `-w task`: save a task without scheduling it
    Save(String),
    /// `-s "spec" task`: schedule a task
    Schedule { spec: String, task_id: String },
    /// `-u task`: remove the schedule of a task
    Unschedule(String),
    /// `-d task`: delete a task
    Delete(String),
    /// `-c`: global configuration settings
    Config,
    /// `-D`: default tasks
    Default,
}

impl ToolArgs for SumaTaskArgs {
    fn program(&self) -> &'static str {
        SUMA_PATH
    }

    fn to_cli_args(&self) -> Vec<String> {
        match self {
            Self::List(None) => vec!["-l".to_string()],
            Self::List(Some(task)) => vec!["-l".to_string(), task.clone()],
            Self::Save(task) => vec!["-w".to_string(), task.clone()],
            Self::Schedule { spec, task_id } => {
                vec!["-s".to_string(), spec.clone(), task_id.clone()]
            }
            Self::Unschedule(task) => vec!["-u".to_string(), task.clone()],
            Self::Delete(task) => vec!["-d".to_string(), task.clone()],
            Self::Config => vec!["-c".to_string()],
            Self::Default => vec!["-D".to_string()],
        }
    }
}
