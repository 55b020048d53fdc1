use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one port selection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// A compatible port was selected and resolved
    Selected,
    /// No compatible version (or no host version) was found
    SelectionFailed,
    /// A compatible version was found but could not be constructed
    ResolutionFailed,
}

impl SelectionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::SelectionFailed => "selection_failed",
            Self::ResolutionFailed => "resolution_failed",
        }
    }
}

/// Emitted by the port selector after every selection attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSelectionEvent {
    /// Capability the port implements (e.g. "Game", "Settings")
    pub capability: String,
    /// Running host version, when detection succeeded
    pub host_version: Option<u32>,
    /// Version of the selected port, when one was chosen
    pub selected_version: Option<u32>,
    /// What happened
    pub outcome: SelectionOutcome,
    /// Time spent selecting and resolving
    pub duration: Duration,
}

impl PortSelectionEvent {
    /// Whether a port instance was produced
    pub fn is_success(&self) -> bool {
        self.outcome == SelectionOutcome::Selected
    }
}
