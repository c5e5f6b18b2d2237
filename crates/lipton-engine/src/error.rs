//! Script evaluation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Uncaught exception: {0}")]
    Exception(String),

    #[error("Script evaluation unsupported: {0}")]
    Unsupported(String),

    #[error("Engine view closed")]
    ViewClosed,
}
