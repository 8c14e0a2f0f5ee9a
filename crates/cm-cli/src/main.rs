//! cm-merge - Comment Merge Helper CLI
//!
//! Merges up to six JSON lists of timestamped comments into one
//! time-ordered list, either in a terminal form or straight from files.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive form
//! cm-merge ui
//!
//! # Merge two files and print the result
//! cm-merge merge a.json b.json
//!
//! # Merge into a file, quietly
//! cm-merge merge a.json b.json -o merged.json --quiet
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
