//! # Text Renderer
//!
//! Renders a panel as plain text lines, with ANSI styling when writing to a
//! terminal.
//!
//! ```text
//!  [Query]  Example Response  Response
//!  site: foo.com  sites: foo.com, bar.org
//!  actions: :reset :copy :site :run
//!    1 | {
//!    2 |   "site_id": "foo.com",
//!  ...
//!  ~
//! ```

use super::ansi_escape_codes::{BOLD, DIM, FG_CYAN, FG_GREEN, FG_RED, FG_YELLOW, RESET, REVERSE};
use super::PanelView;
use crate::panel::context::SiteContext;
use crate::panel::editor::EditorAdapter;
use crate::panel::events::Tab;
use crate::panel::query_panel::QueryPanel;
use anyhow::Result;
use std::io::{self, Write};

/// Severity of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub struct TextRenderer<W: Write> {
    out: W,
    color: bool,
}

impl TextRenderer<io::Stdout> {
    /// Renderer on stdout, styled only when stdout is a terminal
    pub fn stdout() -> Self {
        let color = atty::is(atty::Stream::Stdout);
        tracing::debug!("Rendering to stdout (color: {})", color);
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn render_tab_bar<C: SiteContext>(&mut self, panel: &QueryPanel<C>) -> Result<()> {
        let tabs: Vec<String> = panel
            .available_tabs()
            .into_iter()
            .map(|tab| {
                if tab == panel.active_tab() {
                    self.styled(REVERSE, &format!("[{}]", tab.label()))
                } else {
                    tab.label().to_string()
                }
            })
            .collect();
        writeln!(self.out, " {}", tabs.join("  "))?;
        Ok(())
    }

    fn render_toolbar<C: SiteContext>(&mut self, panel: &QueryPanel<C>) -> Result<()> {
        if panel.is_read_only() {
            let note = self.styled(DIM, "read-only (log in to edit and run queries)");
            writeln!(self.out, " {note}")?;
            writeln!(self.out, " actions: :copy")?;
            return Ok(());
        }

        let site = panel.selected_site();
        let site = if site.is_empty() { "(none)".to_string() } else { site };
        writeln!(
            self.out,
            " site: {}  sites: {}",
            self.styled(BOLD, &site),
            panel.sites().join(", ")
        )?;

        let mut actions = Vec::new();
        if panel.can_reset() {
            actions.push(":reset");
        }
        actions.extend([":copy", ":site", ":run"]);
        let mut line = format!(" actions: {}", actions.join(" "));
        if panel.is_running() {
            line.push_str(&format!("  {}", self.styled(FG_YELLOW, "running...")));
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Numbered lines clipped to the editor's display height, padded with `~`
    fn render_editor(&mut self, editor: &EditorAdapter) -> Result<()> {
        let height = editor.display_height();
        let value = editor.value();
        let lines: Vec<&str> = value.split('\n').collect();

        for (index, line) in lines.iter().take(height).enumerate() {
            let number = self.styled(DIM, &format!("{:>4} |", index + 1));
            writeln!(self.out, "{number} {line}")?;
        }
        if lines.len() > height {
            let hidden = lines.len() - height;
            let note = format!("     ... {hidden} more line{}", if hidden == 1 { "" } else { "s" });
            writeln!(self.out, "{}", self.styled(DIM, &note))?;
        }
        for _ in lines.len()..height {
            writeln!(self.out, "{}", self.styled(DIM, "   ~"))?;
        }

        for diagnostic in editor.diagnostics() {
            let text = format!(" ! {diagnostic}");
            writeln!(self.out, "{}", self.styled(FG_RED, &text))?;
        }
        Ok(())
    }

    fn render_admonition(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, " {} {}", self.styled(FG_CYAN, "i"), text)?;
        Ok(())
    }
}

impl<W: Write> PanelView for TextRenderer<W> {
    fn render_panel<C: SiteContext>(&mut self, panel: &QueryPanel<C>) -> Result<()> {
        self.render_tab_bar(panel)?;

        match panel.active_tab() {
            Tab::Query => {
                self.render_toolbar(panel)?;
                self.render_editor(panel.query_editor())?;
            }
            Tab::ExampleResponse => {
                self.render_admonition("Example response for this query")?;
                self.render_editor(panel.example_editor())?;
            }
            Tab::Response => {
                if let Some(result) = panel.result() {
                    self.render_admonition(&result.status_line())?;
                }
                if let Some(editor) = panel.response_editor() {
                    if !editor.value().is_empty() {
                        self.render_editor(editor)?;
                    }
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_message(&mut self, level: MessageLevel, message: &str) -> Result<()> {
        let line = match level {
            MessageLevel::Info => message.to_string(),
            MessageLevel::Success => self.styled(FG_GREEN, message),
            MessageLevel::Warning => self.styled(FG_YELLOW, message),
            MessageLevel::Error => self.styled(FG_RED, message),
        };
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render `panel` without styling into a string
pub fn render_to_string<C: SiteContext>(panel: &QueryPanel<C>) -> Result<String> {
    let mut renderer = TextRenderer::new(Vec::new(), false);
    renderer.render_panel(panel)?;
    Ok(String::from_utf8_lossy(&renderer.into_inner()).into_owned())
}
