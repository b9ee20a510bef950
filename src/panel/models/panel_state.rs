//! # Panel State
//!
//! Explicit state of a query panel and the reducer that moves it between
//! `{clean, dirty} x {no result, result}`. The reducer has no I/O: side
//! effects come back as events for the caller to carry out.

use crate::panel::events::{PanelAction, PanelEvent, Tab};
use crate::panel::models::ExecutionResult;

/// Inputs the reducer needs from the outside world for one transition
#[derive(Debug, Clone, Copy)]
pub struct PanelEnv<'a> {
    /// Example code for the current site selection
    pub generated_code: &'a str,
    /// True when the user may only view
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    code: String,
    dirty: bool,
    result: Option<ExecutionResult>,
    active_tab: Tab,
    last_sequence: u64,
    pending_sequence: Option<u64>,
}

impl PanelState {
    /// Clean state showing `generated_code`
    pub fn new(generated_code: impl Into<String>) -> Self {
        Self {
            code: generated_code.into(),
            dirty: false,
            result: None,
            active_tab: Tab::Query,
            last_sequence: 0,
            pending_sequence: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Sequence number of the run whose completion is awaited
    pub fn pending_sequence(&self) -> Option<u64> {
        self.pending_sequence
    }

    pub fn is_running(&self) -> bool {
        self.pending_sequence.is_some()
    }

    /// Tabs currently on offer; Response only while a result is held
    pub fn available_tabs(&self) -> Vec<Tab> {
        let mut tabs = vec![Tab::Query, Tab::ExampleResponse];
        if self.result.is_some() {
            tabs.push(Tab::Response);
        }
        tabs
    }

    /// Apply one action and report what changed
    pub fn apply(&mut self, action: PanelAction, env: &PanelEnv<'_>) -> Vec<PanelEvent> {
        let name = action.name();
        match action {
            PanelAction::Edit(code) => {
                if env.read_only {
                    return rejected(name, "read-only");
                }
                self.edit(code)
            }
            PanelAction::Reset => {
                if env.read_only {
                    return rejected(name, "read-only");
                }
                self.regenerate(env.generated_code)
            }
            PanelAction::Copy => vec![PanelEvent::CopyRequested {
                text: self.code.clone(),
            }],
            PanelAction::Run => {
                if env.read_only {
                    return rejected(name, "read-only");
                }
                self.submit()
            }
            PanelAction::SiteChanged => {
                if self.dirty && !env.read_only {
                    tracing::debug!("Keeping edited query across site change");
                    Vec::new()
                } else {
                    self.regenerate(env.generated_code)
                }
            }
            PanelAction::ShowTab(tab) => {
                if !self.available_tabs().contains(&tab) {
                    return rejected(name, format!("no {} to show", tab.label()));
                }
                self.switch_tab(tab).into_iter().collect()
            }
            PanelAction::RunCompleted { sequence, result } => self.complete(sequence, result),
            // Resolved against the session by the panel before reaching here
            PanelAction::SelectSite(_) => rejected(name, "no session attached"),
        }
    }

    fn edit(&mut self, code: String) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        self.code = code.clone();
        events.push(PanelEvent::CodeEdited { code });
        if !self.dirty {
            self.dirty = true;
            events.push(PanelEvent::DirtyChanged { dirty: true });
        }
        events.extend(self.clear_result());
        events
    }

    /// Re-derive code from the example, going clean and dropping any result
    fn regenerate(&mut self, generated_code: &str) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        if self.code != generated_code {
            self.code = generated_code.to_string();
            events.push(PanelEvent::CodeRegenerated {
                code: self.code.clone(),
            });
        }
        if self.dirty {
            self.dirty = false;
            events.push(PanelEvent::DirtyChanged { dirty: false });
        }
        events.extend(self.clear_result());
        events
    }

    fn submit(&mut self) -> Vec<PanelEvent> {
        let mut events = self.clear_result();
        self.last_sequence += 1;
        self.pending_sequence = Some(self.last_sequence);
        events.push(PanelEvent::QuerySubmitted {
            sequence: self.last_sequence,
            body: self.code.clone(),
        });
        events
    }

    fn complete(&mut self, sequence: u64, result: ExecutionResult) -> Vec<PanelEvent> {
        if self.pending_sequence != Some(sequence) {
            tracing::debug!(
                "Dropping completion {} (awaiting {:?})",
                sequence,
                self.pending_sequence
            );
            return vec![PanelEvent::StaleResultDropped { sequence }];
        }

        self.pending_sequence = None;
        self.result = Some(result);
        let mut events = vec![PanelEvent::ResultReceived { sequence }];
        events.extend(self.switch_tab(Tab::Response));
        events
    }

    /// Drop the held result and forget any run in flight
    fn clear_result(&mut self) -> Vec<PanelEvent> {
        self.pending_sequence = None;
        let mut events = Vec::new();
        if self.result.take().is_some() {
            events.push(PanelEvent::ResultCleared);
            if self.active_tab == Tab::Response {
                events.extend(self.switch_tab(Tab::Query));
            }
        }
        events
    }

    fn switch_tab(&mut self, to: Tab) -> Option<PanelEvent> {
        if self.active_tab == to {
            return None;
        }
        let from = self.active_tab;
        self.active_tab = to;
        Some(PanelEvent::TabSwitched { from, to })
    }
}

fn rejected(action: &'static str, reason: impl Into<String>) -> Vec<PanelEvent> {
    let reason = reason.into();
    tracing::debug!("Rejected {}: {}", action, reason);
    vec![PanelEvent::ActionRejected { action, reason }]
}
