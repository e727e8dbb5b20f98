//! Module parameters and the JSON args file they are loaded from.
//!
//! When run as a binary module, aixsuma receives the path of a JSON file
//! holding the task's arguments. Framework-internal keys (`_ansible_*`) are
//! ignored; every other key maps onto `SumaParams`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SumaError;
use crate::oslevel::LATEST;
use crate::types::Action;

/// Default directory where updates are downloaded.
pub const DEFAULT_DOWNLOAD_DIR: &str = "/usr/sys/inst.images";
/// Default directory where metadata files are downloaded.
pub const DEFAULT_METADATA_DIR: &str = "/var/adm/ansible/metadata";

/// Parameters of one module run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumaParams {
    #[serde(default)]
    pub action: Action,
    #[serde(default = "default_oslevel")]
    pub oslevel: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub last_sp: bool,
    #[serde(default = "default_true", deserialize_with = "flexible_bool")]
    pub extend_fs: bool,
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub download_only: bool,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub sched_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,
}

fn default_oslevel() -> Option<String> {
    Some(LATEST.to_string())
}

fn default_true() -> bool {
    true
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOAD_DIR)
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from(DEFAULT_METADATA_DIR)
}

/// Accept JSON booleans as well as the `yes`/`no`/`true`/`false`/`1`/`0`
/// strings playbooks commonly pass through.
fn flexible_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "on" | "1" => Ok(true),
            "no" | "n" | "false" | "off" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value '{}'",
                other
            ))),
        },
    }
}

impl Default for SumaParams {
    fn default() -> Self {
        Self {
            action: Action::default(),
            oslevel: default_oslevel(),
            last_sp: false,
            extend_fs: true,
            download_dir: default_download_dir(),
            download_only: false,
            task_id: None,
            sched_time: None,
            description: None,
            metadata_dir: default_metadata_dir(),
        }
    }
}

impl SumaParams {
    /// Load parameters from a JSON args file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read module arguments from {:?}", path.as_ref()))?;

        let params: Self =
            serde_json::from_str(&content).context("Failed to parse module arguments JSON")?;

        Ok(params)
    }

    /// Check the parameters the selected action requires.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.action.requires_task_id() && self.task_id().is_none() {
            return Err(SumaError::config(format!(
                "action is {} but task_id is missing",
                self.action
            )));
        }
        if self.action.is_transfer() && self.oslevel.is_none() {
            return Err(SumaError::config(format!(
                "action is {} but oslevel is missing",
                self.action
            )));
        }
        Ok(())
    }

    /// Requested level, `Latest` when unset.
    pub fn oslevel(&self) -> &str {
        self.oslevel.as_deref().unwrap_or(LATEST)
    }

    /// Task id, `None` when unset or blank.
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Display name of the SUMA task.
    pub fn display_name(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.is_empty() => desc.to_string(),
            _ => format!("{} request for oslevel {}", self.action, self.oslevel()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let params: SumaParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, SumaParams::default());
        assert_eq!(params.action, Action::Download);
        assert_eq!(params.oslevel(), "Latest");
        assert!(params.extend_fs);
        assert!(!params.last_sp);
        assert_eq!(params.download_dir, PathBuf::from("/usr/sys/inst.images"));
        assert_eq!(params.metadata_dir, PathBuf::from("/var/adm/ansible/metadata"));
    }

    #[test]
    fn test_framework_keys_are_ignored() {
        let json = r#"{"action": "preview", "oslevel": "7200-03", "_ansible_check_mode": false}"#;
        let params: SumaParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.action, Action::Preview);
        assert_eq!(params.oslevel(), "7200-03");
    }

    #[test]
    fn test_string_booleans() {
        let json = r#"{"last_sp": "yes", "extend_fs": "no", "download_only": "True"}"#;
        let params: SumaParams = serde_json::from_str(json).unwrap();
        assert!(params.last_sp);
        assert!(!params.extend_fs);
        assert!(params.download_only);

        assert!(serde_json::from_str::<SumaParams>(r#"{"last_sp": "maybe"}"#).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(serde_json::from_str::<SumaParams>(r#"{"action": "install"}"#).is_err());
    }

    #[test]
    fn test_display_name() {
        let mut params = SumaParams {
            action: Action::Preview,
            oslevel: Some("7200-03-02".to_string()),
            ..SumaParams::default()
        };
        assert_eq!(params.display_name(), "preview request for oslevel 7200-03-02");
        params.description = Some("monthly".to_string());
        assert_eq!(params.display_name(), "monthly");
    }

    #[test]
    fn test_validate_task_id() {
        let params = SumaParams {
            action: Action::Delete,
            task_id: Some("  ".to_string()),
            ..SumaParams::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "Bad parameter: action is delete but task_id is missing");

        let params = SumaParams {
            action: Action::List,
            ..SumaParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_oslevel_null() {
        let params: SumaParams =
            serde_json::from_str(r#"{"action": "download", "oslevel": null}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"action": "list", "task_id": "7"}}"#).unwrap();
        let params = SumaParams::load_from_file(file.path()).unwrap();
        assert_eq!(params.action, Action::List);
        assert_eq!(params.task_id(), Some("7"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = SumaParams::load_from_file("/nonexistent/args.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read module arguments"));
    }
}
