//! cm-core - Core library for cm-merge
//!
//! This crate provides the merge engine for the Comment Merge Helper tool:
//! decoding pasted JSON comment lists, validating their shape, merging them
//! into a single time-ordered list, and reporting summary statistics.

pub mod entry;
pub mod error;
pub mod merge;

pub use entry::CommentEntry;
pub use error::{MergeError, Result};
pub use merge::{merge, render_pretty, MergeOutcome, MergeStats, SLOT_COUNT};
