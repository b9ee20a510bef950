//! # Models Module
//!
//! Plain data owned by a panel: the reducer state, run results and editor
//! display height.

pub mod display_height;
pub mod execution_result;
pub mod panel_state;

pub use display_height::{DisplayHeight, MAX_HEIGHT, MIN_HEIGHT};
pub use execution_result::ExecutionResult;
pub use panel_state::{PanelEnv, PanelState};
