//! aixsuma Library
//!
//! Drives the AIX Service Update Management Assistant (`suma`): resolves the
//! requested OS level into a SUMA request, previews, downloads and installs
//! fixes, and manages SUMA tasks.

pub mod cli;
pub mod command_runner;
pub mod command_traits;
pub mod commands;
pub mod config_file;
pub mod error;
pub mod logging;
pub mod logic;
pub mod metadata;
pub mod oslevel;
pub mod report;
pub mod schedule;
pub mod types;
pub mod update_state;

// Re-export main types for convenience
pub use command_runner::{CommandOutput, CommandRunner, ScriptedRunner, SystemRunner};
pub use command_traits::ToolArgs;
pub use config_file::SumaParams;
pub use error::{Result, SumaError};
pub use logic::resolver::RequestResolver;
pub use logic::transfer::{run_transfer, TransferSummary};
pub use logic::{run_action, ModuleContext};
pub use oslevel::{classify, normalize_oslevel};
pub use report::RunReport;
pub use types::{Action, RequestType};
pub use update_state::{UpdateContext, UpdateStage};
