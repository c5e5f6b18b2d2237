//! Scripted engine
//!
//! An in-memory engine that never does anything on its own. Every call a
//! view receives is recorded, and the test decides when (and whether) the
//! matching events arrive by emitting through the recorded sinks.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::event::{EngineEvent, EventSink, ScriptOutcome};
use crate::id::{RequestId, SessionId};
use crate::view::{EngineFactory, EngineView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Load(String),
    Back,
    Forward,
    Reload,
    Evaluate { script: String, request: RequestId },
}

struct ViewRecord {
    sink: EventSink,
    calls: Vec<ViewCall>,
    released: bool,
}

/// Factory and inspection handle in one; clones share the same record.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    views: Arc<Mutex<Vec<ViewRecord>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions that got a view, in creation order
    pub fn sessions(&self) -> Vec<SessionId> {
        self.views.lock().iter().map(|v| v.sink.session()).collect()
    }

    pub fn calls(&self, session: SessionId) -> Vec<ViewCall> {
        self.with_record(session, |r| r.calls.clone())
            .unwrap_or_default()
    }

    pub fn last_load(&self, session: SessionId) -> Option<String> {
        self.calls(session).into_iter().rev().find_map(|c| match c {
            ViewCall::Load(url) => Some(url),
            _ => None,
        })
    }

    pub fn evaluations(&self, session: SessionId) -> Vec<(String, RequestId)> {
        self.calls(session)
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Evaluate { script, request } => Some((script, request)),
                _ => None,
            })
            .collect()
    }

    pub fn last_evaluation(&self, session: SessionId) -> Option<(String, RequestId)> {
        self.evaluations(session).pop()
    }

    /// Whether the view for `session` has been dropped
    pub fn is_released(&self, session: SessionId) -> bool {
        self.with_record(session, |r| r.released).unwrap_or(false)
    }

    /// Raise an event from the view of `session`
    pub fn emit(&self, session: SessionId, event: EngineEvent) -> bool {
        match self.with_record(session, |r| r.sink.clone()) {
            Some(sink) => sink.emit(event),
            None => false,
        }
    }

    pub fn resolve(&self, session: SessionId, request: RequestId, outcome: ScriptOutcome) -> bool {
        self.emit(session, EngineEvent::ScriptResult { request, outcome })
    }

    /// Emit the usual sequence of a successful page load
    pub fn finish_load(&self, session: SessionId, url: &str, title: &str) {
        self.emit(session, EngineEvent::LoadStarted);
        self.emit(session, EngineEvent::UrlChanged(url.to_string()));
        self.emit(session, EngineEvent::TitleChanged(title.to_string()));
        self.emit(session, EngineEvent::LoadFinished(true));
    }

    fn with_record<T>(&self, session: SessionId, f: impl FnOnce(&ViewRecord) -> T) -> Option<T> {
        let views = self.views.lock();
        views.iter().find(|v| v.sink.session() == session).map(f)
    }

    fn record(&self, session: SessionId, call: ViewCall) {
        let mut views = self.views.lock();
        if let Some(view) = views.iter_mut().find(|v| v.sink.session() == session) {
            view.calls.push(call);
        }
    }
}

impl EngineFactory for ScriptedEngine {
    fn create_view(&self, sink: EventSink) -> Box<dyn EngineView> {
        let session = sink.session();
        self.views.lock().push(ViewRecord {
            sink,
            calls: Vec::new(),
            released: false,
        });

        Box::new(ScriptedView {
            session,
            engine: self.clone(),
        })
    }
}

struct ScriptedView {
    session: SessionId,
    engine: ScriptedEngine,
}

impl EngineView for ScriptedView {
    fn load(&mut self, url: &str) {
        self.engine
            .record(self.session, ViewCall::Load(url.to_string()));
    }

    fn back(&mut self) {
        self.engine.record(self.session, ViewCall::Back);
    }

    fn forward(&mut self) {
        self.engine.record(self.session, ViewCall::Forward);
    }

    fn reload(&mut self) {
        self.engine.record(self.session, ViewCall::Reload);
    }

    fn evaluate(&self, script: &str, request: RequestId) {
        self.engine.record(
            self.session,
            ViewCall::Evaluate {
                script: script.to_string(),
                request,
            },
        );
    }
}

impl Drop for ScriptedView {
    fn drop(&mut self) {
        let mut views = self.engine.views.lock();
        if let Some(view) = views.iter_mut().find(|v| v.sink.session() == self.session) {
            view.released = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event_channel;

    #[test]
    fn test_records_calls_and_release() {
        let (tx, mut rx) = event_channel();
        let engine = ScriptedEngine::new();
        let session = SessionId::new();

        let mut view = engine.create_view(EventSink::new(session, tx));
        view.load("https://example.com");
        view.reload();
        view.evaluate("1 + 1", RequestId(1));

        assert_eq!(
            engine.calls(session),
            vec![
                ViewCall::Load("https://example.com".to_string()),
                ViewCall::Reload,
                ViewCall::Evaluate {
                    script: "1 + 1".to_string(),
                    request: RequestId(1),
                },
            ]
        );
        assert!(!engine.is_released(session));

        assert!(engine.resolve(session, RequestId(1), Ok(Some(serde_json::json!(2)))));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.session, session);

        drop(view);
        assert!(engine.is_released(session));
    }

    #[test]
    fn test_unknown_session_is_ignored() {
        let engine = ScriptedEngine::new();
        let stranger = SessionId::new();

        assert!(engine.calls(stranger).is_empty());
        assert!(!engine.emit(stranger, EngineEvent::LoadStarted));
    }
}
