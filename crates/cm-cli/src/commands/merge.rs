//! Merge command
//!
//! Non-interactive merge: each file argument fills one input slot, in
//! order; the merged JSON goes to stdout (or a file) and the stats block
//! to stderr.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use cm_core::merge::{merge, render_pretty, SLOT_COUNT};

/// Arguments for the merge command
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Input files, one per slot, in slot order (up to 6)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Write the merged JSON to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Suppress the stats block
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    use colored::Colorize;

    let raw = load_slots(&args.files)?;
    tracing::info!(files = args.files.len(), "merging input files");

    let outcome = merge(&raw)?;
    let json = render_pretty(&outcome.entries)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !args.quiet {
                eprintln!("{} {}", "Wrote".green(), path.display());
            }
        }
        None => println!("{json}"),
    }

    if !args.quiet {
        let stats = &outcome.stats;
        eprintln!(
            "{}",
            format!(
                "Processed {} comments from {} inputs.",
                stats.total_before, stats.processed_count
            )
            .cyan()
        );
        eprintln!("Comments after merge: {}", stats.total_after.to_string().green());
        let counts: Vec<String> = stats.breakdown.iter().map(|n| n.to_string()).collect();
        eprintln!("{}", format!("Per-input counts: [ {} ]", counts.join(", ")).dimmed());
    }

    Ok(())
}

/// Read each file into its slot; missing trailing slots stay empty.
pub(crate) fn load_slots(files: &[PathBuf]) -> Result<[String; SLOT_COUNT]> {
    if files.len() > SLOT_COUNT {
        bail!(
            "Expected at most {} input files, got {}",
            SLOT_COUNT,
            files.len()
        );
    }

    let mut raw = <[String; SLOT_COUNT]>::default();
    for (slot, path) in files.iter().enumerate() {
        raw[slot] = read_input(path)?;
    }
    Ok(raw)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_slots_rejects_more_than_six() {
        let files: Vec<PathBuf> = (0..7).map(|i| PathBuf::from(format!("{i}.json"))).collect();
        let err = load_slots(&files).unwrap_err();
        assert!(err.to_string().contains("at most 6"));
    }

    #[test]
    fn test_load_slots_missing_file() {
        let files = vec![PathBuf::from("definitely/not/here.json")];
        let err = load_slots(&files).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
