//! Page engines available to the shell

mod document;

pub use document::{DocumentEngine, DocumentView};
