//! LiptonWeb Developer Tools
//!
//! One [`InspectionPanel`] serves the whole window. It is bound to a single
//! page session at a time, issues read-only probes against it and keeps a
//! textual output buffer.

mod error;
mod panel;
pub mod probe;
mod render;
mod tool;

pub use error::DevtoolsError;
pub use panel::{InspectionPanel, PanelOutput};
pub use render::{cookie_lines, element_lines, render_value, storage_lines};
pub use tool::Tool;
