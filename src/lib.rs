//! # apiline - Console Query Panel for an Analytics API
//!
//! Shows an example query for the selected site, lets a logged-in user edit
//! and run it, and displays the pretty-printed response next to the example
//! response.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Events    ┌──────────────┐   Actions   ┌────────────┐
//! │    View     │◄────────────│  QueryPanel  │────────────►│ PanelState │
//! │             │             │              │◄────────────│ (reducer)  │
//! │ - Text      │             │ - Editors    │   Events    │            │
//! │   Renderer  │             │ - Session    │             └────────────┘
//! └─────────────┘             └──────────────┘
//!                                    ▲
//!                                    │ Commands / Completions
//!                                    ▼
//!                             ┌──────────────┐          ┌────────────┐
//!                             │  Controller  │─────────►│  Services  │
//!                             │              │          │ - Query    │
//!                             │ - Input loop │◄─────────│ - Schema   │
//!                             │ - Effects    │          │ - Clipboard│
//!                             └──────────────┘          └────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod panel;
pub mod profile;

pub use panel::*;
pub use profile::{ClipboardMode, Credentials, PanelProfile};
