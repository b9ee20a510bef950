//! # Editor Adapter
//!
//! A panel never talks to an editing widget directly. It goes through
//! [`EditorAdapter`], which owns an [`EditorSurface`] and adds the behavior
//! every panel editor shares: read-only enforcement, one-time schema setup on
//! mount, and a display height that follows the content upwards.

pub mod line_buffer;

pub use line_buffer::LineBufferSurface;

use crate::panel::models::{DisplayHeight, MAX_HEIGHT, MIN_HEIGHT};
use crate::panel::services::SchemaDocument;
use anyhow::Result;
use std::fmt;

/// Problem found in the editor text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Text is not valid JSON
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// Text violates the configured schema
    Schema { path: String, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Syntax { message, .. } => write!(f, "syntax error: {message}"),
            Diagnostic::Schema { path, message } if path.is_empty() => write!(f, "{message}"),
            Diagnostic::Schema { path, message } => write!(f, "{path}: {message}"),
        }
    }
}

/// The capabilities a panel needs from an editing widget
pub trait EditorSurface {
    fn render_text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    /// Start validating content against `schema`
    fn configure_schema(&mut self, schema: &SchemaDocument) -> Result<()>;

    fn set_read_only(&mut self, read_only: bool);

    fn is_read_only(&self) -> bool;

    /// Intrinsic content height, in lines
    fn content_height(&self) -> usize;

    fn diagnostics(&self) -> Vec<Diagnostic>;
}

/// How an editor is set up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub read_only: bool,
    /// Reference of the schema to validate against
    pub schema: Option<String>,
    pub min_height: usize,
    pub max_height: usize,
}

impl EditorOptions {
    pub fn editable() -> Self {
        Self {
            read_only: false,
            schema: None,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
        }
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::editable()
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_heights(mut self, min_height: usize, max_height: usize) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }
}

pub struct EditorAdapter {
    surface: Box<dyn EditorSurface>,
    height: DisplayHeight,
    schema: Option<String>,
    mounted: bool,
}

impl EditorAdapter {
    pub fn new(mut surface: Box<dyn EditorSurface>, value: &str, options: EditorOptions) -> Self {
        surface.set_read_only(options.read_only);
        surface.set_text(value);
        Self {
            surface,
            height: DisplayHeight::new(options.min_height, options.max_height),
            schema: options.schema,
            mounted: false,
        }
    }

    /// Adapter over a [`LineBufferSurface`]
    pub fn line_buffer(value: &str, options: EditorOptions) -> Self {
        Self::new(Box::new(LineBufferSurface::new()), value, options)
    }

    /// First-time setup. If the editor has a schema reference and `schema`
    /// was fetched for it, validation is switched on. Later calls do nothing.
    pub fn mount(&mut self, schema: Option<&SchemaDocument>) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if let (Some(reference), Some(document)) = (&self.schema, schema) {
            match self.surface.configure_schema(document) {
                Ok(()) => tracing::debug!("Editor validating against {}", reference),
                Err(e) => tracing::warn!("Could not enable validation for {}: {}", reference, e),
            }
        }
        self.content_changed();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the content programmatically
    pub fn set_value(&mut self, value: &str) {
        if self.surface.render_text() != value {
            self.surface.set_text(value);
            self.content_changed();
        }
    }

    /// Apply a user edit. Returns the change to forward to the owner, or
    /// `None` when the editor is read-only or nothing changed.
    pub fn user_edit(&mut self, text: String) -> Option<String> {
        if self.surface.is_read_only() {
            tracing::debug!("Ignoring edit of read-only editor");
            return None;
        }
        if self.surface.render_text() == text {
            return None;
        }
        self.surface.set_text(&text);
        self.content_changed();
        Some(text)
    }

    fn content_changed(&mut self) {
        self.height.observe(self.surface.content_height());
    }

    pub fn value(&self) -> &str {
        self.surface.render_text()
    }

    pub fn is_read_only(&self) -> bool {
        self.surface.is_read_only()
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.surface.set_read_only(read_only);
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn display_height(&self) -> usize {
        self.height.current()
    }

    pub fn content_height(&self) -> usize {
        self.surface.content_height()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.surface.diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(count: usize) -> String {
        vec!["1"; count].join("\n")
    }

    #[test]
    fn height_should_follow_content_up_to_maximum() {
        let mut editor =
            EditorAdapter::line_buffer("{}", EditorOptions::editable().with_heights(3, 10));
        editor.mount(None);
        assert_eq!(editor.display_height(), 3);

        editor.user_edit(lines(6));
        assert_eq!(editor.display_height(), 6);

        editor.user_edit(lines(2));
        assert_eq!(editor.display_height(), 6);

        editor.set_value(&lines(40));
        assert_eq!(editor.display_height(), 10);
    }

    #[test]
    fn mount_should_size_for_initial_content() {
        let mut editor =
            EditorAdapter::line_buffer(&lines(5), EditorOptions::read_only().with_heights(3, 10));
        editor.mount(None);
        assert_eq!(editor.display_height(), 5);
    }

    #[test]
    fn read_only_editor_should_ignore_edits() {
        let mut editor = EditorAdapter::line_buffer("{}", EditorOptions::read_only());

        assert_eq!(editor.user_edit("[]".into()), None);
        assert_eq!(editor.value(), "{}");
    }

    #[test]
    fn user_edit_should_forward_changes_verbatim() {
        let mut editor = EditorAdapter::line_buffer("{}", EditorOptions::editable());

        assert_eq!(editor.user_edit("{ \"a\": ".into()), Some("{ \"a\": ".into()));
        assert_eq!(editor.user_edit("{ \"a\": ".into()), None);
    }

    #[test]
    fn mount_should_configure_schema_once() {
        let schema = SchemaDocument::new("mem://schema", json!({"type": "array"}));
        let mut editor = EditorAdapter::line_buffer(
            "{}",
            EditorOptions::editable().with_schema("/schema.json"),
        );

        editor.mount(Some(&schema));
        assert_eq!(editor.diagnostics().len(), 1);
        assert!(editor.is_mounted());

        let other = SchemaDocument::new("mem://other", json!({"type": "object"}));
        editor.mount(Some(&other));
        assert_eq!(editor.diagnostics().len(), 1);
    }

    #[test]
    fn mount_without_schema_reference_should_not_validate() {
        let schema = SchemaDocument::new("mem://schema", json!({"type": "array"}));
        let mut editor = EditorAdapter::line_buffer("{}", EditorOptions::editable());

        editor.mount(Some(&schema));

        assert!(editor.diagnostics().is_empty());
    }

    #[test]
    fn diagnostics_should_display_location() {
        let diagnostic = Diagnostic::Schema {
            path: "/metrics".into(),
            message: "\"x\" is not of type \"array\"".into(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "/metrics: \"x\" is not of type \"array\""
        );
    }
}
