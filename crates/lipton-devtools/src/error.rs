//! Developer tools error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DevtoolsError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
