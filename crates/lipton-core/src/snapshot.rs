//! View model of the window, ready to be drawn or serialized

use serde::Serialize;

use lipton_devtools::{PanelOutput, Tool};
use lipton_engine::SessionId;
use lipton_tabs::LoadState;

use crate::config::{SplitSizes, WindowSize};

#[derive(Debug, Clone, Serialize)]
pub struct TabView {
    pub id: SessionId,
    pub label: String,
    pub url: String,
    pub load_state: LoadState,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectorView {
    pub visible: bool,
    pub tool: Tool,
    pub output: PanelOutput,
    /// Inspection requests still waiting for the engine
    pub pending: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellSnapshot {
    pub window_title: String,
    pub window_size: WindowSize,
    pub tabs: Vec<TabView>,
    pub address: String,
    pub status: Option<String>,
    pub split: SplitSizes,
    pub inspector: InspectorView,
}

impl ShellSnapshot {
    pub fn active_tab(&self) -> Option<&TabView> {
        self.tabs.iter().find(|t| t.active)
    }
}
