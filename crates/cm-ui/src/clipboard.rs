//! System clipboard access
//!
//! Clipboard writes belong to the presentation layer; the merge engine never
//! touches the clipboard, and a failed write is a transient status message,
//! not a merge error.

use anyhow::{Context, Result};

/// Write `text` to the system clipboard.
pub fn copy_text(text: &str) -> Result<()> {
    arboard::Clipboard::new()
        .and_then(|mut cb| cb.set_text(text.to_string()))
        .context("clipboard write failed")
}
