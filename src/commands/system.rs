//! Type-safe arguments for the AIX system commands.

use std::path::PathBuf;

use crate::command_traits::ToolArgs;

/// `oslevel -s`: current service pack of the running system.
#[derive(Debug, Clone, Default)]
pub struct OslevelArgs;

impl ToolArgs for OslevelArgs {
    fn program(&self) -> &'static str {
        "/bin/oslevel"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-s".to_string()]
    }
}

/// `install_all_updates -Yd <dir>`: install everything found in a directory,
/// accepting licenses.
#[derive(Debug, Clone)]
pub struct InstallAllUpdatesArgs {
    pub target: PathBuf,
}

impl ToolArgs for InstallAllUpdatesArgs {
    fn program(&self) -> &'static str {
        "/usr/sbin/install_all_updates"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["-Yd".to_string(), self.target.display().to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oslevel_command_line() {
        assert_eq!(OslevelArgs.command_line(), "/bin/oslevel -s");
    }

    #[test]
    fn test_install_all_updates_command_line() {
        let args = InstallAllUpdatesArgs {
            target: PathBuf::from("/tmp/dl_updt_7200-03-02"),
        };
        assert_eq!(
            args.command_line(),
            "/usr/sbin/install_all_updates -Yd /tmp/dl_updt_7200-03-02"
        );
    }
}
