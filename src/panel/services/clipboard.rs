//! # Clipboard Service
//!
//! Destination of the copy action: the system clipboard, or an in-memory
//! buffer when no clipboard is available (CI, SSH sessions).

use crate::profile::ClipboardMode;
use anyhow::{anyhow, Result};

pub trait Clipboard {
    /// Replace the clipboard content with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Text most recently written through this handle
    fn last_text(&self) -> Option<&str>;

    fn name(&self) -> &'static str;
}

/// Memory-based clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self { content: None }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        tracing::debug!("Copying {} characters to memory clipboard", text.len());
        self.content = Some(text.to_string());
        Ok(())
    }

    fn last_text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// System clipboard
pub struct SystemClipboard {
    /// Cache of the last written text (needed for the &str return type)
    cached_content: Option<String>,
    clipboard: arboard::Clipboard,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("cached_content", &self.cached_content)
            .field("clipboard", &"<system clipboard>")
            .finish()
    }
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new()
            .map_err(|e| anyhow!("Failed to access system clipboard: {}", e))?;
        Ok(Self {
            cached_content: None,
            clipboard,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        tracing::debug!("Copying {} characters to system clipboard", text.len());
        self.clipboard
            .set_text(text.to_string())
            .map_err(|e| anyhow!("Failed to set clipboard text: {}", e))?;
        self.cached_content = Some(text.to_string());
        Ok(())
    }

    fn last_text(&self) -> Option<&str> {
        self.cached_content.as_deref()
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Clipboard for `mode`, falling back to memory when the system one is unavailable
pub fn clipboard_for(mode: ClipboardMode) -> Box<dyn Clipboard> {
    match mode {
        ClipboardMode::Memory => Box::new(MemoryClipboard::new()),
        ClipboardMode::System => match SystemClipboard::new() {
            Ok(clipboard) => {
                tracing::info!("Using system clipboard");
                Box::new(clipboard)
            }
            Err(e) => {
                tracing::warn!("{}; copying to memory instead", e);
                Box::new(MemoryClipboard::new())
            }
        },
    }
}
