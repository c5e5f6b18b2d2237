//! Page session
//!
//! Wraps one engine view and caches what the engine last reported about it.

use std::fmt;

use lipton_engine::{EngineEvent, EngineView, RequestId, SessionId};

use crate::address::normalize_address;
use crate::state::LoadState;

/// Tab label shown until the page reports a title
pub const NEW_TAB_LABEL: &str = "New Tab";

/// Session-scoped change produced by folding in an engine event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Url(String),
    Title(String),
    LoadStarted,
    LoadFinished(bool),
}

pub struct PageSession {
    id: SessionId,
    /// Last location reported by the engine
    url: String,
    /// Last title reported by the engine, empty until the page provides one
    title: String,
    load_state: LoadState,
    view: Box<dyn EngineView>,
}

impl PageSession {
    pub fn new(id: SessionId, view: Box<dyn EngineView>) -> Self {
        Self {
            id,
            url: String::new(),
            title: String::new(),
            load_state: LoadState::Idle,
            view,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Tab strip label: the title cut to `limit` characters
    pub fn label(&self, limit: usize) -> String {
        if self.title.is_empty() {
            return NEW_TAB_LABEL.to_string();
        }

        if self.title.chars().count() > limit {
            let head: String = self.title.chars().take(limit).collect();
            format!("{}...", head)
        } else {
            self.title.clone()
        }
    }

    /// Normalize `input` and ask the engine to load it. Returns the address
    /// actually requested.
    pub fn navigate(&mut self, input: &str) -> String {
        let address = normalize_address(input);

        tracing::debug!(session = %self.id, address = %address, "Navigating");

        self.view.load(&address);
        address
    }

    pub fn back(&mut self) {
        self.view.back();
    }

    pub fn forward(&mut self) {
        self.view.forward();
    }

    pub fn reload(&mut self) {
        self.view.reload();
    }

    pub fn evaluate(&self, script: &str, request: RequestId) {
        self.view.evaluate(script, request);
    }

    /// Fold an engine event into the cached page state.
    ///
    /// Script results are not page state and yield `None`.
    pub fn apply(&mut self, event: &EngineEvent) -> Option<SessionChange> {
        match event {
            EngineEvent::UrlChanged(url) => {
                self.url = url.clone();
                Some(SessionChange::Url(url.clone()))
            }
            EngineEvent::TitleChanged(title) => {
                self.title = title.clone();
                Some(SessionChange::Title(title.clone()))
            }
            EngineEvent::LoadStarted => {
                self.load_state = LoadState::Loading;
                Some(SessionChange::LoadStarted)
            }
            EngineEvent::LoadFinished(success) => {
                self.load_state = if *success {
                    LoadState::Loaded
                } else {
                    LoadState::Failed
                };

                tracing::debug!(
                    session = %self.id,
                    url = %self.url,
                    state = %self.load_state,
                    "Load finished"
                );

                Some(SessionChange::LoadFinished(*success))
            }
            EngineEvent::ScriptResult { .. } => None,
        }
    }
}

impl fmt::Debug for PageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSession")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("title", &self.title)
            .field("load_state", &self.load_state)
            .finish_non_exhaustive()
    }
}
