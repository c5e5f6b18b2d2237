//! Shell window
//!
//! Top-level coordinator. Owns the tab registry and the single inspection
//! panel, keeps the panel bound to the active tab and relays chrome input
//! to the active session. Engine events come in through one queue and are
//! applied in arrival order on the caller's loop.

use lipton_devtools::InspectionPanel;
use lipton_engine::{event_channel, EngineEvent, EngineFactory, EventReceiver, SessionEvent};
use lipton_tabs::{SessionChange, SessionRegistry};

use crate::config::{Config, SplitSizes};
use crate::intent::{Flow, Intent};
use crate::snapshot::{InspectorView, ShellSnapshot, TabView};
use crate::Result;

pub const PAGE_LOADED: &str = "Page loaded";
pub const LOAD_FAILED: &str = "Failed to load page";

pub struct ShellWindow {
    config: Config,
    registry: SessionRegistry,
    panel: InspectionPanel,
    events: EventReceiver,
    /// Address bar text
    address: String,
    /// Transient status line message
    status: Option<String>,
}

impl ShellWindow {
    /// Build the window with its first tab on the homepage
    pub fn new(config: Config, factory: Box<dyn EngineFactory>) -> Result<Self> {
        config.validate()?;

        let (tx, events) = event_channel();
        let registry = SessionRegistry::start(factory, tx, config.homepage.clone(), None);

        tracing::info!(
            homepage = %config.homepage,
            session = %registry.active_id(),
            "Shell window started"
        );

        // The panel follows the active tab from the start, shown or not
        let mut panel = InspectionPanel::new();
        panel.rebind(registry.active());

        Ok(Self {
            config,
            registry,
            panel,
            events,
            address: String::new(),
            status: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn panel(&self) -> &InspectionPanel {
        &self.panel
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn split_sizes(&self) -> SplitSizes {
        if self.panel.is_visible() {
            self.config.split_expanded
        } else {
            self.config.split_collapsed
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::SubmitAddress(input) => {
                if input.trim().is_empty() {
                    return Flow::Continue;
                }
                self.status = None;
                self.address = self.registry.active_mut().navigate(&input);
            }
            Intent::Back => self.registry.active_mut().back(),
            Intent::Forward => self.registry.active_mut().forward(),
            Intent::Reload => self.registry.active_mut().reload(),
            Intent::NewTab(url) => {
                self.registry.open(url.as_deref());
                self.on_active_changed();
            }
            Intent::CloseTab(target) => {
                let id = target.unwrap_or_else(|| self.registry.active_id());
                let was_active = id == self.registry.active_id();

                match self.registry.close(id) {
                    // Dropping the session releases its engine view
                    Ok(closed) => {
                        drop(closed);
                        if was_active {
                            self.on_active_changed();
                        }
                    }
                    Err(e) => tracing::debug!(session = %id.short(), "Tab close ignored: {}", e),
                }
            }
            Intent::SwitchTab(id) => match self.registry.set_active(id) {
                Ok(true) => self.on_active_changed(),
                Ok(false) => {}
                Err(e) => tracing::debug!("Tab switch ignored: {}", e),
            },
            Intent::ToggleInspector => {
                if self.panel.is_visible() {
                    self.panel.hide();
                } else {
                    self.panel.show(self.registry.active());
                }
                tracing::debug!(visible = self.panel.is_visible(), "Inspector toggled");
            }
            Intent::SelectTool(tool) => {
                let registry = &self.registry;
                let bound = self.panel.bound().and_then(|id| registry.get(id));
                self.panel.select_tool(tool, bound);
            }
            Intent::Evaluate(code) => {
                let registry = &self.registry;
                let bound = self.panel.bound().and_then(|id| registry.get(id));
                self.panel.evaluate(&code, bound);
            }
            Intent::ClearInspector => self.panel.clear(),
            Intent::Quit => {
                tracing::info!("Shell window closing");
                return Flow::Quit;
            }
        }

        Flow::Continue
    }

    /// Apply one engine event. Events for closed tabs are dropped; page
    /// changes only touch the chrome when they concern the active tab.
    pub fn handle_event(&mut self, event: SessionEvent) {
        let SessionEvent { session, event } = event;

        if let EngineEvent::ScriptResult { request, outcome } = event {
            self.panel.on_script_result(session, request, outcome);
            return;
        }

        let is_active = self.registry.active_id() == session;

        let Some(page) = self.registry.get_mut(session) else {
            tracing::debug!(session = %session.short(), "Dropping event for closed tab");
            return;
        };

        let Some(change) = page.apply(&event) else {
            return;
        };

        if !is_active {
            return;
        }

        match change {
            SessionChange::Url(url) => self.address = url,
            SessionChange::Title(_) => {}
            SessionChange::LoadStarted => self.status = None,
            SessionChange::LoadFinished(true) => {
                self.status = Some(PAGE_LOADED.to_string());
            }
            SessionChange::LoadFinished(false) => {
                tracing::warn!(url = %self.address, "Page failed to load");
                self.status = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Apply every event already queued without waiting. Returns how many
    /// were handled.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next engine event
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let active = self.registry.active_id();
        let tabs = self
            .registry
            .iter()
            .map(|page| TabView {
                id: page.id(),
                label: page.label(self.config.tab_title_limit),
                url: page.url().to_string(),
                load_state: page.load_state(),
                active: page.id() == active,
            })
            .collect();

        ShellSnapshot {
            window_title: self.config.window_title.clone(),
            window_size: self.config.window_size,
            tabs,
            address: self.address.clone(),
            status: self.status.clone(),
            split: self.split_sizes(),
            inspector: InspectorView {
                visible: self.panel.is_visible(),
                tool: self.panel.tool(),
                output: self.panel.output().clone(),
                pending: self.panel.pending_count(),
            },
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Point everything that follows the active tab at the new one
    fn on_active_changed(&mut self) {
        let active = self.registry.active();
        self.address = active.url().to_string();
        self.status = None;
        self.panel.rebind(active);
    }
}
