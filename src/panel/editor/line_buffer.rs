//! # Line Buffer Surface
//!
//! Plain in-memory editor surface. Validates its text as JSON, and against a
//! schema once one is configured.

use super::{Diagnostic, EditorSurface};
use crate::panel::services::SchemaDocument;
use anyhow::Result;

#[derive(Default)]
pub struct LineBufferSurface {
    text: String,
    read_only: bool,
    validator: Option<jsonschema::Validator>,
}

impl LineBufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_validating(&self) -> bool {
        self.validator.is_some()
    }
}

impl EditorSurface for LineBufferSurface {
    fn render_text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn configure_schema(&mut self, schema: &SchemaDocument) -> Result<()> {
        self.validator = Some(schema.compile()?);
        tracing::debug!("Validating against schema {}", schema.uri);
        Ok(())
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn content_height(&self) -> usize {
        self.text.split('\n').count()
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        let Some(validator) = &self.validator else {
            return Vec::new();
        };

        let instance: serde_json::Value = match serde_json::from_str(&self.text) {
            Ok(instance) => instance,
            Err(e) => {
                return vec![Diagnostic::Syntax {
                    line: e.line(),
                    column: e.column(),
                    message: e.to_string(),
                }]
            }
        };

        validator
            .iter_errors(&instance)
            .map(|error| Diagnostic::Schema {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect()
    }
}
