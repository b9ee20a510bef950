//! # Services Layer
//!
//! Services wrap the outside resources a panel talks to: the query endpoint,
//! the schema endpoint and the clipboard.

pub mod clipboard;
pub mod query;
pub mod schema;

pub use clipboard::{clipboard_for, Clipboard, MemoryClipboard, SystemClipboard};
pub use query::{QueryCompletion, QueryRunner};
pub use schema::{SchemaDocument, SchemaService};

use crate::profile::PanelProfile;

/// Aggregates all services for convenient access
pub struct Services {
    pub query: QueryRunner,
    pub schema: SchemaService,
    pub clipboard: Box<dyn Clipboard>,
}

impl Services {
    /// Services configured from `profile`
    pub fn from_profile(profile: &PanelProfile) -> Self {
        Self {
            query: QueryRunner::from_profile(profile),
            schema: SchemaService::new(),
            clipboard: clipboard_for(profile.clipboard),
        }
    }

    /// Services posting to `endpoint` with an in-memory clipboard
    pub fn in_memory(endpoint: impl Into<String>) -> Self {
        Self {
            query: QueryRunner::new(endpoint),
            schema: SchemaService::new(),
            clipboard: Box::new(MemoryClipboard::new()),
        }
    }
}
