//! LiptonWeb Tab Management
//!
//! A tab is a [`PageSession`]: one navigable browsing context owning one
//! engine view. The [`SessionRegistry`] keeps tabs in display order, tracks
//! the active one and never lets the window run out of tabs.

mod address;
mod error;
mod registry;
mod session;
mod state;

pub use address::normalize_address;
pub use error::TabError;
pub use registry::SessionRegistry;
pub use session::{PageSession, SessionChange, NEW_TAB_LABEL};
pub use state::LoadState;

pub type Result<T> = std::result::Result<T, TabError>;
