//! # Console Controller
//!
//! The controller connects console input and finished query runs to the
//! panel, executes the side effects the panel asks for and redraws the view.

use crate::panel::commands::{parse_command, ConsoleCommand, HELP_TEXT};
use crate::panel::context::SiteContext;
use crate::panel::events::{PanelAction, PanelEvent};
use crate::panel::query_panel::QueryPanel;
use crate::panel::services::{Clipboard, QueryCompletion, Services};
use crate::panel::views::{MessageLevel, PanelView, TextRenderer};
use anyhow::{anyhow, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Drives one panel from line-based input
pub struct ConsoleController<C: SiteContext, W: Write> {
    panel: QueryPanel<C>,
    services: Services,
    renderer: TextRenderer<W>,
    should_quit: bool,
}

impl<C: SiteContext, W: Write> ConsoleController<C, W> {
    pub fn new(panel: QueryPanel<C>, services: Services, renderer: TextRenderer<W>) -> Self {
        Self {
            panel,
            services,
            renderer,
            should_quit: false,
        }
    }

    /// Fetch the query schema from `schema_uri` and mount the panel's editors
    pub async fn mount(&mut self, schema_uri: Option<&str>) {
        let schema = self.services.schema.fetch_optional(schema_uri).await;
        if schema.is_some() {
            tracing::info!("Query validation enabled");
        }
        self.panel.mount(schema.as_ref());
    }

    /// Run until `:q` or end of input.
    ///
    /// At end of input the pending run, if any, is awaited before returning.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, mut input: R) -> Result<()> {
        self.renderer.render_panel(&self.panel)?;

        // Partial lines stay in `buffer` if a completion wins the select
        let mut buffer = Vec::new();
        while !self.should_quit {
            tokio::select! {
                read = input.read_until(b'\n', &mut buffer) => {
                    if read? == 0 && buffer.is_empty() {
                        break;
                    }
                    let line = std::mem::take(&mut buffer);
                    self.handle_input(&line).await?;
                }
                Some(completion) = self.services.query.next_completion(), if self.panel.is_running() => {
                    self.handle_completion(completion)?;
                }
            }
        }

        while !self.should_quit && self.panel.is_running() {
            tracing::debug!("Input closed, waiting for pending query");
            match self.services.query.next_completion().await {
                Some(completion) => self.handle_completion(completion)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Handle raw input bytes, reporting lines that are not UTF-8
    async fn handle_input(&mut self, raw: &[u8]) -> Result<()> {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line.trim_end_matches(['\n', '\r'])).await,
            Err(e) => {
                tracing::warn!("Ignoring input line: {}", e);
                self.renderer.render_message(
                    MessageLevel::Error,
                    "Input line is not valid UTF-8, ignored",
                )
            }
        }
    }

    /// Handle one line of console input
    pub async fn handle_line(&mut self, line: &str) -> Result<()> {
        let refreshed = self.panel.refresh();
        self.apply_events(refreshed)?;

        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                return self
                    .renderer
                    .render_message(MessageLevel::Error, &e.to_string())
            }
        };

        tracing::debug!("Console command: {:?}", command);
        match command {
            ConsoleCommand::Run => {
                let events = self.panel.run();
                self.apply_events(events)
            }
            ConsoleCommand::Reset => {
                let events = self.panel.reset();
                self.apply_events(events)
            }
            ConsoleCommand::Copy => {
                let events = self.panel.copy();
                self.apply_events(events)
            }
            ConsoleCommand::SelectSite(domain) => {
                let events = self.panel.dispatch(PanelAction::SelectSite(domain));
                self.apply_events(events)
            }
            ConsoleCommand::ShowTab(tab) => {
                let events = self.panel.show_tab(tab);
                self.apply_events(events)
            }
            ConsoleCommand::Set(text) => {
                let events = self.panel.edit(text);
                self.apply_events(events)
            }
            ConsoleCommand::Edit => self.edit_externally().await,
            ConsoleCommand::ListSites => self.list_sites(),
            ConsoleCommand::Show => self.renderer.render_panel(&self.panel),
            ConsoleCommand::Result => self.print_result(),
            ConsoleCommand::Help => self.renderer.render_message(MessageLevel::Info, HELP_TEXT),
            ConsoleCommand::Quit => {
                self.should_quit = true;
                Ok(())
            }
        }
    }

    fn handle_completion(&mut self, completion: QueryCompletion) -> Result<()> {
        let events = self
            .panel
            .complete_run(completion.sequence, completion.result);
        self.apply_events(events)
    }

    /// Perform side effects for `events` and redraw if the panel changed
    fn apply_events(&mut self, events: Vec<PanelEvent>) -> Result<()> {
        let mut redraw = false;

        for event in events {
            match event {
                PanelEvent::CopyRequested { text } => {
                    match self.services.clipboard.write_text(&text) {
                        Ok(()) => self.renderer.render_message(
                            MessageLevel::Success,
                            &format!("Copied query to {} clipboard", self.services.clipboard.name()),
                        )?,
                        Err(e) => {
                            tracing::warn!("Copy failed: {}", e);
                            self.renderer
                                .render_message(MessageLevel::Error, &format!("Copy failed: {e}"))?
                        }
                    }
                }
                PanelEvent::QuerySubmitted { sequence, body } => {
                    self.services.query.submit(sequence, body);
                    redraw = true;
                }
                PanelEvent::ActionRejected { action, reason } => {
                    tracing::debug!("Rejected {}: {}", action, reason);
                    self.renderer.render_message(
                        MessageLevel::Warning,
                        &format!("Cannot {action}: {reason}"),
                    )?;
                }
                PanelEvent::StaleResultDropped { sequence } => {
                    tracing::debug!("Dropped stale result for query #{}", sequence);
                }
                _ => redraw = true,
            }
        }

        if redraw {
            self.renderer.render_panel(&self.panel)?;
        }
        Ok(())
    }

    /// Edit the query in `$VISUAL` or `$EDITOR` through a temporary file
    async fn edit_externally(&mut self) -> Result<()> {
        if self.panel.is_read_only() {
            return self
                .renderer
                .render_message(MessageLevel::Warning, "Cannot edit: read-only");
        }

        match self.run_external_editor().await {
            Ok(text) => {
                let events = self.panel.edit(text);
                self.apply_events(events)
            }
            Err(e) => {
                tracing::warn!("External edit failed: {}", e);
                self.renderer
                    .render_message(MessageLevel::Error, &e.to_string())
            }
        }
    }

    async fn run_external_editor(&self) -> Result<String> {
        let editor = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".to_string());

        let mut file = tempfile::Builder::new()
            .prefix("apiline-")
            .suffix(".json")
            .tempfile()?;
        let original = self.panel.code().to_string();
        file.write_all(original.as_bytes())?;
        file.flush()?;

        tracing::debug!("Launching '{}' on {}", editor, file.path().display());
        let status = tokio::process::Command::new(&editor)
            .arg(file.path())
            .status()
            .await
            .map_err(|e| anyhow!("Failed to launch editor '{editor}': {e}"))?;
        if !status.success() {
            return Err(anyhow!("Editor '{editor}' exited with {status}"));
        }

        let mut text = std::fs::read_to_string(file.path())?;
        // Editors append a final newline the query never had
        if !original.ends_with('\n') && text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }

    fn list_sites(&mut self) -> Result<()> {
        if self.panel.is_read_only() {
            return self
                .renderer
                .render_message(MessageLevel::Warning, "Not logged in: no sites available");
        }

        let selected = self.panel.selected_site();
        let listing: Vec<String> = self
            .panel
            .sites()
            .into_iter()
            .map(|site| {
                let marker = if site == selected { "*" } else { " " };
                format!(" {marker} {site}")
            })
            .collect();
        self.renderer
            .render_message(MessageLevel::Info, &listing.join("\n"))
    }

    fn print_result(&mut self) -> Result<()> {
        match self.panel.result() {
            Some(result) => {
                let json = serde_json::to_string_pretty(result)?;
                self.renderer.render_message(MessageLevel::Info, &json)
            }
            None => self
                .renderer
                .render_message(MessageLevel::Warning, "No result yet (try :run)"),
        }
    }

    pub fn panel(&self) -> &QueryPanel<C> {
        &self.panel
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Tear down into the panel, services and the renderer's output
    pub fn into_parts(self) -> (QueryPanel<C>, Services, W) {
        (self.panel, self.services, self.renderer.into_inner())
    }
}
