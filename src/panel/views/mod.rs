//! # View Layer
//!
//! Views turn a panel into terminal output. They read panel state and never
//! change it.

pub mod ansi_escape_codes;
pub mod text_renderer;

pub use text_renderer::{render_to_string, MessageLevel, TextRenderer};

use crate::panel::context::SiteContext;
use crate::panel::query_panel::QueryPanel;
use anyhow::Result;

/// Trait for rendering panels
pub trait PanelView {
    /// Render the whole panel: tab bar, toolbar and the active tab's content
    fn render_panel<C: SiteContext>(&mut self, panel: &QueryPanel<C>) -> Result<()>;

    /// Show a one-line message below the panel
    fn render_message(&mut self, level: MessageLevel, message: &str) -> Result<()>;
}
