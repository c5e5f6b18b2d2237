//! Engine events and the per-session sink that carries them

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::ScriptError;
use crate::id::{RequestId, SessionId};

/// Engine-native script result. `None` is the absent/undefined value,
/// `Some(Value::Null)` an explicit null.
pub type ScriptValue = Option<serde_json::Value>;

pub type ScriptOutcome = Result<ScriptValue, ScriptError>;

/// What an engine view reports about its page
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UrlChanged(String),
    TitleChanged(String),
    LoadStarted,
    LoadFinished(bool),
    ScriptResult {
        request: RequestId,
        outcome: ScriptOutcome,
    },
}

/// An engine event tagged with the session whose view raised it
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub event: EngineEvent,
}

pub type EventSender = UnboundedSender<SessionEvent>;

pub type EventReceiver = UnboundedReceiver<SessionEvent>;

/// Create the event loop queue every engine view reports into
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Handed to an engine view at creation; bound to that view's session.
#[derive(Debug, Clone)]
pub struct EventSink {
    session: SessionId,
    tx: EventSender,
}

impl EventSink {
    pub fn new(session: SessionId, tx: EventSender) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Queue an event on the shell's loop. Returns false once the loop is gone.
    pub fn emit(&self, event: EngineEvent) -> bool {
        let delivered = self
            .tx
            .send(SessionEvent {
                session: self.session,
                event,
            })
            .is_ok();

        if !delivered {
            tracing::trace!(session = %self.session, "Event loop closed, engine event dropped");
        }

        delivered
    }

    pub fn script_result(&self, request: RequestId, outcome: ScriptOutcome) -> bool {
        self.emit(EngineEvent::ScriptResult { request, outcome })
    }
}
