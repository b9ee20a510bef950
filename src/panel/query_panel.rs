//! # Query Panel
//!
//! Orchestrates one panel: the reducer state, the session it was built with
//! and its three editors (query, example response, live response).

use crate::panel::context::SiteContext;
use crate::panel::editor::{EditorAdapter, EditorOptions};
use crate::panel::events::{PanelAction, PanelEvent, Tab};
use crate::panel::examples::{get_code, PanelExamples};
use crate::panel::models::{ExecutionResult, PanelEnv, PanelState};
use crate::panel::services::SchemaDocument;

pub struct QueryPanel<C: SiteContext> {
    context: C,
    examples: PanelExamples,
    state: PanelState,
    query_editor: EditorAdapter,
    example_editor: EditorAdapter,
    response_editor: Option<EditorAdapter>,
    /// Session values the state was last derived from
    observed_site: String,
    observed_login: bool,
}

impl<C: SiteContext> QueryPanel<C> {
    /// Panel for `examples`; the query editor validates against `schema` once mounted
    pub fn new(context: C, examples: PanelExamples, schema: Option<String>) -> Self {
        let site = context.selected_site();
        let logged_in = context.is_logged_in();
        let code = get_code(&examples.request, &site);

        let mut query_options = if logged_in {
            EditorOptions::editable()
        } else {
            EditorOptions::read_only()
        };
        if let Some(schema) = schema {
            query_options = query_options.with_schema(schema);
        }

        let query_editor = EditorAdapter::line_buffer(&code, query_options);
        let example_editor = EditorAdapter::line_buffer(
            &get_code(&examples.response, &site),
            EditorOptions::read_only(),
        );

        tracing::debug!(
            "Created panel for '{}' (site '{}', logged in: {})",
            examples.request,
            site,
            logged_in
        );

        Self {
            context,
            examples,
            state: PanelState::new(code),
            query_editor,
            example_editor,
            response_editor: None,
            observed_site: site,
            observed_login: logged_in,
        }
    }

    /// Mount the editors, enabling validation if `schema` could be fetched
    pub fn mount(&mut self, schema: Option<&SchemaDocument>) {
        self.query_editor.mount(schema);
        self.example_editor.mount(None);
    }

    /// Apply `action` and return the resulting events
    pub fn dispatch(&mut self, action: PanelAction) -> Vec<PanelEvent> {
        let mut events = Vec::new();

        let action = match action {
            PanelAction::SelectSite(domain) => match self.resolve_site_selection(&domain) {
                Ok(Some(selected)) => {
                    events.push(selected);
                    PanelAction::SiteChanged
                }
                Ok(None) => return events,
                Err(rejection) => return vec![rejection],
            },
            PanelAction::Edit(text) if !self.is_read_only() => {
                match self.query_editor.user_edit(text) {
                    Some(change) => PanelAction::Edit(change),
                    None => return events,
                }
            }
            other => other,
        };

        let generated = self.generated_code();
        let env = PanelEnv {
            generated_code: &generated,
            read_only: self.is_read_only(),
        };
        events.extend(self.state.apply(action, &env));

        self.sync_editors(&events);
        events
    }

    /// Re-derive state if the session changed behind the panel's back
    pub fn refresh(&mut self) -> Vec<PanelEvent> {
        let site = self.context.selected_site();
        let logged_in = self.context.is_logged_in();
        if site == self.observed_site && logged_in == self.observed_login {
            return Vec::new();
        }
        if logged_in != self.observed_login {
            tracing::info!("Session login state changed to {}", logged_in);
            self.query_editor.set_read_only(!logged_in);
        }
        self.dispatch(PanelAction::SiteChanged)
    }

    pub fn edit(&mut self, text: impl Into<String>) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::Edit(text.into()))
    }

    pub fn reset(&mut self) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::Reset)
    }

    pub fn copy(&mut self) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::Copy)
    }

    pub fn run(&mut self) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::Run)
    }

    pub fn show_tab(&mut self, tab: Tab) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::ShowTab(tab))
    }

    pub fn complete_run(&mut self, sequence: u64, result: ExecutionResult) -> Vec<PanelEvent> {
        self.dispatch(PanelAction::RunCompleted { sequence, result })
    }

    /// `Ok(None)` when `domain` is already selected
    fn resolve_site_selection(&self, domain: &str) -> Result<Option<PanelEvent>, PanelEvent> {
        let action = PanelAction::SelectSite(String::new()).name();
        if self.is_read_only() {
            return Err(PanelEvent::ActionRejected {
                action,
                reason: "read-only".into(),
            });
        }
        if !self.context.sites().iter().any(|site| site == domain) {
            return Err(PanelEvent::ActionRejected {
                action,
                reason: format!("unknown site '{domain}'"),
            });
        }
        if self.context.selected_site() == domain {
            return Ok(None);
        }
        self.context.select_site(domain);
        Ok(Some(PanelEvent::SiteSelected {
            domain: domain.to_string(),
        }))
    }

    fn generated_code(&self) -> String {
        get_code(&self.examples.request, &self.context.selected_site())
    }

    fn sync_editors(&mut self, events: &[PanelEvent]) {
        let site = self.context.selected_site();
        self.query_editor.set_value(self.state.code());
        self.example_editor
            .set_value(&get_code(&self.examples.response, &site));

        for event in events {
            match event {
                PanelEvent::ResultReceived { .. } => {
                    let data = self
                        .state
                        .result()
                        .map(|result| result.data.clone())
                        .unwrap_or_default();
                    let mut editor = EditorAdapter::line_buffer(&data, EditorOptions::read_only());
                    editor.mount(None);
                    self.response_editor = Some(editor);
                }
                PanelEvent::ResultCleared => self.response_editor = None,
                _ => {}
            }
        }

        self.observed_site = site;
        self.observed_login = self.context.is_logged_in();
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn examples(&self) -> &PanelExamples {
        &self.examples
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn code(&self) -> &str {
        self.state.code()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        self.state.result()
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab()
    }

    pub fn available_tabs(&self) -> Vec<Tab> {
        self.state.available_tabs()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_read_only(&self) -> bool {
        !self.context.is_logged_in()
    }

    /// Reset is only offered once the query diverged from the example
    pub fn can_reset(&self) -> bool {
        self.state.is_dirty() && !self.is_read_only()
    }

    pub fn selected_site(&self) -> String {
        self.context.selected_site()
    }

    pub fn sites(&self) -> Vec<String> {
        self.context.sites()
    }

    /// Example response for the current site
    pub fn example_response(&self) -> &str {
        self.example_editor.value()
    }

    pub fn query_editor(&self) -> &EditorAdapter {
        &self.query_editor
    }

    pub fn example_editor(&self) -> &EditorAdapter {
        &self.example_editor
    }

    pub fn response_editor(&self) -> Option<&EditorAdapter> {
        self.response_editor.as_ref()
    }
}
