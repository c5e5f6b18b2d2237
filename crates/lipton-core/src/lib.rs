//! LiptonWeb Core
//!
//! Coordination layer of the browser shell. [`ShellWindow`] owns the tab
//! registry and the single inspection panel, turns UI intents into session
//! operations and folds engine events back into what the window shows.

mod config;
mod error;
mod intent;
mod shell;
mod snapshot;

pub use config::{Config, SplitSizes, WindowSize};
pub use error::CoreError;
pub use intent::{Flow, Intent};
pub use shell::{ShellWindow, LOAD_FAILED, PAGE_LOADED};
pub use snapshot::{InspectorView, ShellSnapshot, TabView};

// Re-export the layers underneath
pub use lipton_devtools::{probe, DevtoolsError, InspectionPanel, PanelOutput, Tool};
pub use lipton_engine::{
    EngineEvent, EngineFactory, EngineView, EventSink, RequestId, ScriptError, ScriptOutcome,
    ScriptValue, SessionEvent, SessionId,
};
pub use lipton_tabs::{normalize_address, LoadState, PageSession, SessionRegistry, TabError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the window surface
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
