//! Application state and main app structure

mod state;

pub use state::{App, AppMode, AppState};
