//! UI command
//!
//! Open the interactive merge form, optionally preloading slots from files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use cm_ui::{App, AppState};

/// Arguments for the ui command
#[derive(Debug, Args)]
pub struct UiArgs {
    /// Files to preload into the input slots, in slot order (up to 6)
    pub files: Vec<PathBuf>,
}

/// Execute the ui command
pub fn execute(args: UiArgs) -> Result<()> {
    let inputs = super::merge::load_slots(&args.files)?;
    tracing::info!(preloaded = args.files.len(), "starting TUI");

    let mut app = App::new(AppState::with_inputs(inputs))?;
    app.run()
}
