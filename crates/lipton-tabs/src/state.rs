//! Page load state
//!
//! ```text
//! Idle --LoadStarted--> Loading --LoadFinished(true)--> Loaded
//!                               --LoadFinished(false)-> Failed
//! ```
//!
//! Only engine events move a session between states.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested from the engine yet
    #[default]
    Idle,
    /// A navigation is in flight
    Loading,
    /// The last navigation finished successfully
    Loaded,
    /// The last navigation failed
    Failed,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LoadState::Idle),
            "loading" => Ok(LoadState::Loading),
            "loaded" => Ok(LoadState::Loaded),
            "failed" => Ok(LoadState::Failed),
            _ => Err(format!("Unknown load state: {}", s)),
        }
    }
}
