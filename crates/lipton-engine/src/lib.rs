//! LiptonWeb Engine Boundary
//!
//! The rendering engine is an external collaborator: it parses, lays out,
//! runs scripts and fetches. This crate fixes what the shell may ask of an
//! engine view and how the view reports back.
//!
//! Every request is fire-and-forget. Outcomes come back later as
//! [`SessionEvent`]s on the shell's single event loop channel.

mod error;
mod event;
mod id;
mod view;

#[cfg(any(test, feature = "testing"))]
pub mod scripted;

pub use error::ScriptError;
pub use event::{
    event_channel, EngineEvent, EventReceiver, EventSender, EventSink, ScriptOutcome, ScriptValue, SessionEvent,
};
pub use id::{RequestId, SessionId};
pub use view::{EngineFactory, EngineView};
