//! UI intents
//!
//! Everything the window chrome can ask for, independent of how the chrome
//! is drawn.

use lipton_devtools::Tool;
use lipton_engine::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Address bar submitted
    SubmitAddress(String),
    Back,
    Forward,
    Reload,
    /// Open a tab at the given address, or the homepage
    NewTab(Option<String>),
    /// Close a tab; `None` closes the active one
    CloseTab(Option<SessionId>),
    SwitchTab(SessionId),
    ToggleInspector,
    SelectTool(Tool),
    /// Console input submitted
    Evaluate(String),
    ClearInspector,
    /// Window closed
    Quit,
}

/// Whether the event loop keeps going after an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
