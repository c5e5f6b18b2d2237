//! Session Registry
//!
//! Owns the open tabs in display order and tracks which one is active.
//! Once started the registry always holds at least one session.

use lipton_engine::{EngineFactory, EventSender, EventSink, SessionId};

use crate::error::TabError;
use crate::session::PageSession;
use crate::Result;

pub struct SessionRegistry {
    /// Insertion order is display order
    sessions: Vec<PageSession>,
    /// Index of the active session, always in bounds
    active: usize,
    factory: Box<dyn EngineFactory>,
    events: EventSender,
    /// Address opened when a tab is created without one
    default_url: String,
}

impl SessionRegistry {
    /// Create the registry together with its first tab, navigated to
    /// `initial` or the default address.
    pub fn start(
        factory: Box<dyn EngineFactory>,
        events: EventSender,
        default_url: impl Into<String>,
        initial: Option<&str>,
    ) -> Self {
        let mut registry = Self {
            sessions: Vec::new(),
            active: 0,
            factory,
            events,
            default_url: default_url.into(),
        };
        registry.open(initial);
        registry
    }

    /// Open a new tab at the end of the strip, make it active and start
    /// loading `url` (or the default address).
    pub fn open(&mut self, url: Option<&str>) -> SessionId {
        let id = SessionId::new();
        let view = self
            .factory
            .create_view(EventSink::new(id, self.events.clone()));

        let address = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_url.clone());

        self.sessions.push(PageSession::new(id, view));
        self.active = self.sessions.len() - 1;

        let requested = self.sessions[self.active].navigate(&address);

        tracing::info!(session = %id, url = %requested, tabs = self.sessions.len(), "Opened tab");

        id
    }

    /// Remove and return the session. The returned session owns the engine
    /// view; dropping it releases the view.
    ///
    /// Closing the only tab fails with [`TabError::LastSession`] and leaves
    /// the registry untouched. When the active tab closes, the tab before it
    /// becomes active (or the first tab if it was first).
    pub fn close(&mut self, id: SessionId) -> Result<PageSession> {
        let index = self.position(id).ok_or(TabError::NotFound(id))?;

        if self.sessions.len() == 1 {
            return Err(TabError::LastSession);
        }

        let removed = self.sessions.remove(index);

        if index < self.active || (index == self.active && index > 0) {
            self.active -= 1;
        }

        tracing::info!(
            session = %id,
            active = %self.active_id(),
            tabs = self.sessions.len(),
            "Closed tab"
        );

        Ok(removed)
    }

    pub fn close_active(&mut self) -> Result<PageSession> {
        self.close(self.active_id())
    }

    /// Make `id` the active session. `Ok(true)` means the active session
    /// changed and whoever displays it has to rebind.
    pub fn set_active(&mut self, id: SessionId) -> Result<bool> {
        let index = self.position(id).ok_or(TabError::NotFound(id))?;

        if index == self.active {
            return Ok(false);
        }

        tracing::debug!(from = %self.active_id(), to = %id, "Switching tab");

        self.active = index;
        Ok(true)
    }

    pub fn active(&self) -> &PageSession {
        &self.sessions[self.active]
    }

    pub fn active_mut(&mut self) -> &mut PageSession {
        &mut self.sessions[self.active]
    }

    pub fn active_id(&self) -> SessionId {
        self.active().id()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn get(&self, id: SessionId) -> Option<&PageSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut PageSession> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    /// Display position of a session
    pub fn position(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id() == id)
    }

    /// Session at a display position
    pub fn at(&self, index: usize) -> Option<&PageSession> {
        self.sessions.get(index)
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(PageSession::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageSession> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipton_engine::event_channel;
    use lipton_engine::scripted::{ScriptedEngine, ViewCall};

    const HOME: &str = "https://duckduckgo.com";

    fn registry(engine: &ScriptedEngine) -> SessionRegistry {
        let (tx, _rx) = event_channel();
        SessionRegistry::start(Box::new(engine.clone()), tx, HOME, None)
    }

    /// Registry with `n` tabs in total, the last one active
    fn registry_with(engine: &ScriptedEngine, n: usize) -> SessionRegistry {
        let mut registry = registry(engine);
        for i in 1..n {
            registry.open(Some(&format!("tab{}.example", i)));
        }
        registry
    }

    #[test]
    fn test_start_opens_default_tab() {
        let engine = ScriptedEngine::new();
        let registry = registry(&engine);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_index(), 0);
        assert_eq!(
            engine.calls(registry.active_id()),
            vec![ViewCall::Load(HOME.to_string())]
        );
    }

    #[test]
    fn test_open_appends_and_activates() {
        let engine = ScriptedEngine::new();
        let mut registry = registry(&engine);
        let first = registry.active_id();

        let second = registry.open(Some("example.com"));

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), second);
        assert_eq!(registry.ids(), vec![first, second]);
        assert_eq!(
            engine.last_load(second),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_open_blank_uses_default() {
        let engine = ScriptedEngine::new();
        let mut registry = registry(&engine);

        let id = registry.open(Some("   "));
        assert_eq!(engine.last_load(id), Some(HOME.to_string()));
    }

    #[test]
    fn test_close_last_tab_is_noop() {
        let engine = ScriptedEngine::new();
        let mut registry = registry(&engine);
        let only = registry.active_id();

        assert_eq!(registry.close(only).unwrap_err(), TabError::LastSession);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_id(), only);
        assert!(!engine.is_released(only));
    }

    #[test]
    fn test_open_then_close_both() {
        let engine = ScriptedEngine::new();
        let mut registry = registry(&engine);
        let first = registry.active_id();
        let second = registry.open(None);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), second);

        drop(registry.close(second).unwrap());
        assert_eq!(registry.len(), 1);
        assert!(registry.close(first).is_err());
        assert_eq!(registry.ids(), vec![first]);
    }

    #[test]
    fn test_close_non_active_keeps_active_session() {
        let engine = ScriptedEngine::new();

        for active_pos in 0..4 {
            for closed_pos in 0..4 {
                if active_pos == closed_pos {
                    continue;
                }

                let mut registry = registry_with(&engine, 4);
                let ids = registry.ids();
                registry.set_active(ids[active_pos]).unwrap();

                registry.close(ids[closed_pos]).unwrap();

                assert_eq!(registry.active_id(), ids[active_pos]);
                assert_eq!(registry.len(), 3);
            }
        }
    }

    #[test]
    fn test_close_active_moves_to_preceding_tab() {
        let engine = ScriptedEngine::new();

        for pos in 0..4 {
            let mut registry = registry_with(&engine, 4);
            let ids = registry.ids();
            registry.set_active(ids[pos]).unwrap();

            registry.close(ids[pos]).unwrap();

            let expected = if pos == 0 { ids[1] } else { ids[pos - 1] };
            assert_eq!(registry.active_id(), expected, "closing position {}", pos);
        }
    }

    #[test]
    fn test_close_releases_view() {
        let engine = ScriptedEngine::new();
        let mut registry = registry_with(&engine, 2);
        let id = registry.active_id();

        let closed = registry.close(id).unwrap();
        assert!(!engine.is_released(id));
        drop(closed);
        assert!(engine.is_released(id));
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn test_set_active() {
        let engine = ScriptedEngine::new();
        let mut registry = registry_with(&engine, 3);
        let ids = registry.ids();

        assert_eq!(registry.set_active(ids[0]), Ok(true));
        assert_eq!(registry.active_index(), 0);
        assert_eq!(registry.set_active(ids[0]), Ok(false));

        let stranger = SessionId::new();
        assert_eq!(
            registry.set_active(stranger),
            Err(TabError::NotFound(stranger))
        );
        assert_eq!(registry.active_id(), ids[0]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Open,
            /// Close the tab at this position, taken modulo the tab count
            Close(usize),
            CloseActive,
            /// Activate the tab at this position, taken modulo the tab count
            Activate(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Open),
                any::<usize>().prop_map(Op::Close),
                Just(Op::CloseActive),
                any::<usize>().prop_map(Op::Activate),
            ]
        }

        proptest! {
            #[test]
            fn test_never_empty_under_any_sequence(ops in proptest::collection::vec(op(), 0..200)) {
                let engine = ScriptedEngine::new();
                let mut registry = registry(&engine);

                for op in ops {
                    let ids = registry.ids();
                    match op {
                        Op::Open => {
                            registry.open(None);
                        }
                        Op::Close(i) => {
                            let _ = registry.close(ids[i % ids.len()]);
                        }
                        Op::CloseActive => {
                            let _ = registry.close_active();
                        }
                        Op::Activate(i) => {
                            let _ = registry.set_active(ids[i % ids.len()]);
                        }
                    }

                    prop_assert!(!registry.is_empty());
                    prop_assert!(registry.active_index() < registry.len());
                }
            }

            #[test]
            fn test_closing_inactive_tab_keeps_active_id(
                size in 2usize..12,
                active in any::<usize>(),
                closed in any::<usize>(),
            ) {
                let engine = ScriptedEngine::new();
                let mut registry = registry_with(&engine, size);
                let ids = registry.ids();
                let active = ids[active % size];
                let closed = ids[closed % size];
                prop_assume!(active != closed);

                registry.set_active(active).unwrap();
                registry.close(closed).unwrap();

                prop_assert_eq!(registry.active_id(), active);
                prop_assert_eq!(registry.len(), size - 1);
                prop_assert!(registry.get(closed).is_none());
            }
        }
    }
}
