//! Update flow state machine
//!
//! Tracks where a download/preview run is. The orchestrator owns an
//! `UpdateContext` and moves it forward as each step finishes, so the report
//! and the debug log can always say how far a run got.
//!
//! # Stage Flow
//!
//! ```text
//! NotStarted
//!     ↓
//! Validating
//!     ↓
//! Resolving
//!     ↓
//! Previewing ──────────┐
//!     ↓                │
//! Downloading ─────────┤
//!     ↓                │
//! Installing           │
//!     ↓                ↓
//! Completed  ←─────────┘
//!
//! (Any non-terminal stage can transition to Failed)
//! ```
//!
//! Forward jumps are allowed because preview-only runs and runs with nothing
//! to download finish early. Backward moves never are.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Stages of a download/preview run in sequential order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UpdateStage {
    NotStarted = 0,
    /// Normalizing and checking the requested OS level
    Validating = 1,
    /// Computing request type and name
    Resolving = 2,
    /// Running the SUMA preview
    Previewing = 3,
    /// Running the SUMA download
    Downloading = 4,
    /// Running install_all_updates
    Installing = 5,
    /// Run finished (terminal state)
    Completed = 6,
    /// Run aborted (terminal state)
    Failed = 255,
}

impl UpdateStage {
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true if this is a terminal state (Completed or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Validating => "Validating oslevel",
            Self::Resolving => "Resolving request",
            Self::Previewing => "Previewing fixes",
            Self::Downloading => "Downloading fixes",
            Self::Installing => "Installing updates",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during stage transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageTransitionError {
    #[error("Cannot go backwards from {from} to {to}")]
    BackwardTransition { from: UpdateStage, to: UpdateStage },

    #[error("Cannot transition from terminal state {from}")]
    FromTerminalState { from: UpdateStage },

    #[error("Already at stage {stage}")]
    AlreadyAtStage { stage: UpdateStage },
}

/// Owns the current stage of a run.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    current: UpdateStage,
    failed_at: Option<UpdateStage>,
    history: Vec<UpdateStage>,
}

impl Default for UpdateContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateContext {
    pub fn new() -> Self {
        Self {
            current: UpdateStage::NotStarted,
            failed_at: None,
            history: vec![UpdateStage::NotStarted],
        }
    }

    #[inline]
    pub fn current_stage(&self) -> UpdateStage {
        self.current
    }

    /// Stage at which failure occurred, if any
    #[inline]
    pub fn failed_at(&self) -> Option<UpdateStage> {
        self.failed_at
    }

    /// Every stage entered so far, in order
    pub fn history(&self) -> &[UpdateStage] {
        &self.history
    }

    /// Move forward to `target`, possibly skipping stages.
    ///
    /// # Errors
    ///
    /// - `FromTerminalState` if current is Completed or Failed
    /// - `AlreadyAtStage` if target is the current stage
    /// - `BackwardTransition` if target comes before current (or is Failed;
    ///   use `fail()` for that)
    pub fn transition_to(
        &mut self,
        target: UpdateStage,
    ) -> Result<UpdateStage, StageTransitionError> {
        if self.current.is_terminal() {
            return Err(StageTransitionError::FromTerminalState { from: self.current });
        }
        if target == self.current {
            return Err(StageTransitionError::AlreadyAtStage { stage: target });
        }
        if target == UpdateStage::Failed || target.order() < self.current.order() {
            return Err(StageTransitionError::BackwardTransition {
                from: self.current,
                to: target,
            });
        }

        debug!("update stage: {} -> {}", self.current, target);
        self.history.push(target);
        self.current = target;
        Ok(target)
    }

    /// Mark the run as failed, remembering where.
    pub fn fail(&mut self) -> Result<(), StageTransitionError> {
        if self.current.is_terminal() {
            return Err(StageTransitionError::FromTerminalState { from: self.current });
        }
        debug!("update stage: {} -> {}", self.current, UpdateStage::Failed);
        self.failed_at = Some(self.current);
        self.history.push(UpdateStage::Failed);
        self.current = UpdateStage::Failed;
        Ok(())
    }
}

impl From<StageTransitionError> for crate::error::SumaError {
    fn from(err: StageTransitionError) -> Self {
        crate::error::SumaError::State(err.to_string())
    }
}
