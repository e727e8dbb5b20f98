//! Type-safe parameter types for aixsuma
//!
//! Actions and request types are proper Rust enums rather than strings, so
//! every dispatch site gets exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Action requested from the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Download and install all fixes
    #[default]
    Download,
    /// Run every check without downloading
    Preview,
    /// List SUMA tasks
    List,
    /// Edit (save, schedule or unschedule) a SUMA task
    Edit,
    /// Remove the schedule of a SUMA task
    Unschedule,
    /// Delete a SUMA task
    Delete,
    /// List global SUMA configuration settings
    Config,
    /// List default SUMA tasks
    Default,
}

impl Action {
    /// Download and preview go through the update orchestrator
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Download | Self::Preview)
    }

    /// Actions that address one SUMA task by id
    pub fn requires_task_id(&self) -> bool {
        matches!(self, Self::Edit | Self::Unschedule | Self::Delete)
    }
}

/// SUMA request type (`RqType=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum RequestType {
    /// Latest fixes for the running TL
    #[strum(serialize = "Latest")]
    Latest,
    /// A technology level
    #[strum(serialize = "TL")]
    #[serde(rename = "TL")]
    Tl,
    /// A service pack
    #[strum(serialize = "SP")]
    #[serde(rename = "SP")]
    Sp,
}

/// SUMA transfer mode for the orchestrator commands (`Action=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransferMode {
    Preview,
    Download,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_action_parse_lowercase() {
        assert_eq!("download".parse::<Action>().ok(), Some(Action::Download));
        assert_eq!("default".parse::<Action>().ok(), Some(Action::Default));
        assert!("install".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_display_matches_serde() {
        for action in Action::iter() {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action));
        }
    }

    #[test]
    fn test_task_id_actions() {
        let needing: Vec<Action> = Action::iter().filter(|a| a.requires_task_id()).collect();
        assert_eq!(needing, vec![Action::Edit, Action::Unschedule, Action::Delete]);
    }

    #[test]
    fn test_request_type_display() {
        assert_eq!(RequestType::Latest.to_string(), "Latest");
        assert_eq!(RequestType::Tl.to_string(), "TL");
        assert_eq!(RequestType::Sp.to_string(), "SP");
        assert_eq!(serde_json::to_string(&RequestType::Sp).unwrap(), "\"SP\"");
    }
}
