//! cm-ui - TUI library for cm-merge
//!
//! This crate provides the terminal form for merging comment JSON lists.
//!
//! # Overview
//!
//! The TUI provides:
//! - Six editable input slots for pasted JSON arrays
//! - Merge/copy/clear actions with an error banner and stats block
//! - A read-only pane showing the merged, time-sorted JSON
//! - Clipboard copy with a transient status message
//!
//! # Example
//!
//! ```ignore
//! use cm_ui::App;
//!
//! let mut app = App::new(Default::default())?;
//! app.run()?;
//! ```

pub mod app;
pub mod clipboard;
pub mod events;
pub mod theme;

pub use app::{App, AppMode, AppState};
pub use theme::Theme;
