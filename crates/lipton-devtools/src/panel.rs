//! Inspection Panel
//!
//! State machine over (selected tool, bound session). Every refresh, rebind
//! or clear starts a new epoch; a result is rendered only if the epoch and
//! session it was requested under are still current. Stale results are
//! dropped instead of leaking into the output of another tool or page.

use serde::Serialize;
use std::collections::HashMap;

use lipton_engine::{RequestId, ScriptOutcome, SessionId};
use lipton_tabs::PageSession;

use crate::render::{cookie_lines, element_lines, render_error, render_value, storage_lines};
use crate::tool::Tool;

const CONSOLE_HINT: &str = "Type an expression below and press Enter to evaluate it";
const NO_TARGET: &str = "Error: no page is being inspected";

/// What the panel currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelOutput {
    pub heading: Option<String>,
    pub lines: Vec<String>,
}

impl PanelOutput {
    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.lines.is_empty()
    }

    fn clear(&mut self) {
        self.heading = None;
        self.lines.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Fetch(Tool),
    Console,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    session: SessionId,
    epoch: u64,
    purpose: Purpose,
}

#[derive(Debug, Default)]
pub struct InspectionPanel {
    /// Session being inspected; a lookup key, never an owner
    bound: Option<SessionId>,
    tool: Tool,
    visible: bool,
    output: PanelOutput,
    epoch: u64,
    next_request: u64,
    pending: HashMap<RequestId, Pending>,
}

impl InspectionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self) -> Option<SessionId> {
        self.bound
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn output(&self) -> &PanelOutput {
        &self.output
    }

    /// Requests still waiting for a result
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Show the panel bound to `session` and fetch for the current tool
    pub fn show(&mut self, session: &PageSession) {
        self.visible = true;
        self.bound = Some(session.id());
        self.refresh(Some(session));
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Point the panel at another session. While visible the output is
    /// invalidated and re-fetched for the new session.
    pub fn rebind(&mut self, session: &PageSession) {
        if self.bound == Some(session.id()) {
            return;
        }

        tracing::debug!(
            from = ?self.bound.map(|id| id.short()),
            to = %session.id().short(),
            "Rebinding inspection panel"
        );

        self.bound = Some(session.id());

        if self.visible {
            self.refresh(Some(session));
        } else {
            self.invalidate();
        }
    }

    /// Switch tools, clearing the output before anything new arrives
    pub fn select_tool(&mut self, tool: Tool, session: Option<&PageSession>) {
        self.tool = tool;
        self.refresh(session);
    }

    /// Drop the output and start over for the current tool and binding.
    ///
    /// `session` must be the bound session as looked up by the caller; a
    /// missing or different session counts as no target.
    pub fn refresh(&mut self, session: Option<&PageSession>) {
        self.invalidate();
        self.output.clear();
        self.output.heading = Some(self.tool.heading().to_string());

        let Some(session) = self.target(session) else {
            self.output.lines.push(NO_TARGET.to_string());
            return;
        };

        match self.tool {
            Tool::Console => self.output.lines.push(CONSOLE_HINT.to_string()),
            Tool::Network => {
                self.output.lines.push(format!("URL: {}", session.url()));
                self.output.lines.push(format!("Title: {}", session.title()));
                self.output
                    .lines
                    .push(format!("Load state: {}", session.load_state()));
            }
            Tool::Elements | Tool::LocalStorage | Tool::Cookies => {
                if let Some(script) = self.tool.probe() {
                    self.dispatch(session, script, Purpose::Fetch(self.tool));
                }
            }
        }
    }

    /// Clear the output (the panel's Clear button)
    pub fn clear(&mut self) {
        self.invalidate();
        self.output.clear();
    }

    /// Echo `code` and ask the bound session's engine to evaluate it.
    /// Blank input is ignored.
    pub fn evaluate(&mut self, code: &str, session: Option<&PageSession>) -> Option<RequestId> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        self.output.lines.push(format!(">>> {}", code));

        match self.target(session) {
            Some(session) => Some(self.dispatch(session, code, Purpose::Console)),
            None => {
                self.output.lines.push(NO_TARGET.to_string());
                None
            }
        }
    }

    /// Deliver an engine result. Returns whether it was rendered.
    pub fn on_script_result(
        &mut self,
        session: SessionId,
        request: RequestId,
        outcome: ScriptOutcome,
    ) -> bool {
        let Some(pending) = self.pending.remove(&request) else {
            tracing::debug!(request = %request, "Result for unknown inspection request");
            return false;
        };

        if pending.session != session || pending.epoch != self.epoch {
            tracing::debug!(
                request = %request,
                session = %session.short(),
                epoch = pending.epoch,
                current = self.epoch,
                "Dropping stale inspection result"
            );
            return false;
        }

        let lines = match (&outcome, pending.purpose) {
            (Err(e), _) => vec![render_error(e)],
            (Ok(value), Purpose::Console) => render_value(value),
            (Ok(value), Purpose::Fetch(Tool::Elements)) => element_lines(value),
            (Ok(value), Purpose::Fetch(Tool::LocalStorage)) => storage_lines(value),
            (Ok(value), Purpose::Fetch(Tool::Cookies)) => cookie_lines(value),
            (Ok(value), Purpose::Fetch(_)) => render_value(value),
        };

        self.output.lines.extend(lines);
        true
    }

    fn target<'a>(&self, session: Option<&'a PageSession>) -> Option<&'a PageSession> {
        session.filter(|s| Some(s.id()) == self.bound)
    }

    fn dispatch(&mut self, session: &PageSession, script: &str, purpose: Purpose) -> RequestId {
        self.next_request += 1;
        let request = RequestId(self.next_request);

        self.pending.insert(
            request,
            Pending {
                session: session.id(),
                epoch: self.epoch,
                purpose,
            },
        );

        tracing::debug!(
            request = %request,
            session = %session.id().short(),
            tool = %self.tool,
            "Dispatching inspection request"
        );

        session.evaluate(script, request);
        request
    }

    /// Start a new epoch; everything still in flight becomes stale
    fn invalidate(&mut self) {
        self.epoch += 1;
        let epoch = self.epoch;
        self.pending.retain(|_, p| p.epoch == epoch);
    }
}
