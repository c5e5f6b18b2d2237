//! Engine view contract

use crate::event::EventSink;
use crate::id::RequestId;

/// One engine-backed browsing context.
///
/// All calls return immediately. Navigation outcomes arrive as
/// `UrlChanged`/`TitleChanged`/`LoadStarted`/`LoadFinished` events and
/// evaluation outcomes as `ScriptResult` tagged with the caller's
/// [`RequestId`], each at most once. Dropping the view releases it.
pub trait EngineView: Send {
    fn load(&mut self, url: &str);

    fn back(&mut self);

    fn forward(&mut self);

    fn reload(&mut self);

    /// Evaluate `script` as an expression in the page
    fn evaluate(&self, script: &str, request: RequestId);
}

/// Creates engine views. Creation cannot fail at this layer; engine-level
/// problems surface later through the view's events.
pub trait EngineFactory: Send {
    fn create_view(&self, sink: EventSink) -> Box<dyn EngineView>;
}
