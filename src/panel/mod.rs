//! # Query Panel
//!
//! The panel shows an example query for the selected site, lets a logged-in
//! user edit and run it, and keeps the example response and the live
//! response one tab away.
//!
//! ## Architecture
//!
//! - **Models**: reducer state, run results, editor heights
//! - **Editor**: line-based editing surface behind an adapter
//! - **Services**: query endpoint, schema endpoint, clipboard
//! - **Views**: text rendering of a panel
//! - **Controller**: console input loop tying it all together

pub mod commands;
pub mod context;
pub mod controller;
pub mod editor;
pub mod events;
pub mod examples;
pub mod models;
pub mod pretty;
pub mod query_panel;
pub mod services;
pub mod views;

pub use commands::{parse_command, ConsoleCommand};
pub use context::{SessionSites, SiteContext};
pub use controller::ConsoleController;
pub use editor::{Diagnostic, EditorAdapter, EditorOptions, EditorSurface, LineBufferSurface};
pub use events::{PanelAction, PanelEvent, Tab};
pub use examples::{get_code, PanelExamples, PLACEHOLDER_SITE};
pub use models::{DisplayHeight, ExecutionResult, PanelEnv, PanelState};
pub use query_panel::QueryPanel;
pub use services::{QueryRunner, SchemaDocument, SchemaService, Services};
pub use views::{render_to_string, MessageLevel, PanelView, TextRenderer};
