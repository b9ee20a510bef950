//! # Panel Events
//!
//! Actions flowing into a panel and the events it emits in response.
//! The controller turns console input into [`PanelAction`]s and reacts to
//! the side-effect events ([`PanelEvent::CopyRequested`],
//! [`PanelEvent::QuerySubmitted`]).

use crate::panel::models::ExecutionResult;
use std::fmt;

/// Tabs of a query panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Query,
    ExampleResponse,
    Response,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Query => "Query",
            Tab::ExampleResponse => "Example Response",
            Tab::Response => "Response",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something the user (or the network) did to a panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Replace the query text with user-edited content
    Edit(String),
    /// Regenerate the query from the example for the current site
    Reset,
    /// Copy the query text to the clipboard
    Copy,
    /// Submit the query text
    Run,
    /// Ask the session to select another site
    SelectSite(String),
    /// The session's selected site (or login state) may have changed
    SiteChanged,
    /// Bring a tab to the front
    ShowTab(Tab),
    /// A submitted query finished
    RunCompleted {
        sequence: u64,
        result: ExecutionResult,
    },
}

impl PanelAction {
    pub fn name(&self) -> &'static str {
        match self {
            PanelAction::Edit(_) => "edit",
            PanelAction::Reset => "reset",
            PanelAction::Copy => "copy",
            PanelAction::Run => "run",
            PanelAction::SelectSite(_) => "select site",
            PanelAction::SiteChanged => "site changed",
            PanelAction::ShowTab(_) => "show tab",
            PanelAction::RunCompleted { .. } => "run completed",
        }
    }
}

/// Events emitted when panel state changes
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Query text was replaced by the generated example
    CodeRegenerated { code: String },

    /// Query text was edited by the user
    CodeEdited { code: String },

    /// Dirty flag flipped
    DirtyChanged { dirty: bool },

    /// The held result was discarded
    ResultCleared,

    /// A query must be sent; its completion carries `sequence`
    QuerySubmitted { sequence: u64, body: String },

    /// A result for the latest run was stored
    ResultReceived { sequence: u64 },

    /// A completion for an outdated run was ignored
    StaleResultDropped { sequence: u64 },

    /// The active tab changed
    TabSwitched { from: Tab, to: Tab },

    /// Text must be written to the clipboard
    CopyRequested { text: String },

    /// The session selected a new site
    SiteSelected { domain: String },

    /// The action is not allowed in the current state
    ActionRejected {
        action: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_should_display_their_labels() {
        assert_eq!(Tab::Query.to_string(), "Query");
        assert_eq!(Tab::ExampleResponse.to_string(), "Example Response");
        assert_eq!(Tab::Response.to_string(), "Response");
    }

    #[test]
    fn actions_should_have_names_for_rejections() {
        assert_eq!(PanelAction::Edit(String::new()).name(), "edit");
        assert_eq!(PanelAction::SelectSite("a.com".into()).name(), "select site");
    }
}
