//! Tab error types

use lipton_engine::SessionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(SessionId),

    #[error("Cannot close the last tab")]
    LastSession,
}
