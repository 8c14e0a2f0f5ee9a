//! The merge engine
//!
//! Takes up to [`SLOT_COUNT`] raw text buffers, each expected to hold a JSON
//! array of [`CommentEntry`], and produces one time-ordered list plus summary
//! statistics. Any malformed slot aborts the whole merge; there is no partial
//! output.

use crate::entry::CommentEntry;
use crate::error::{MergeError, Result};
use serde_json::Value;

/// Number of input slots
pub const SLOT_COUNT: usize = 6;

/// Summary statistics for a completed merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of non-empty inputs that were processed
    pub processed_count: usize,
    /// Sum of per-input entry counts before the merge
    pub total_before: usize,
    /// Entry count after the merge (always equals `total_before`)
    pub total_after: usize,
    /// Per-slot entry counts, zero for skipped slots
    pub breakdown: [usize; SLOT_COUNT],
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// All entries, sorted by normalized time key
    pub entries: Vec<CommentEntry>,
    /// Summary statistics
    pub stats: MergeStats,
}

/// Merge up to [`SLOT_COUNT`] raw inputs into one sorted list.
///
/// Slots are processed in order; whitespace-only slots are skipped. The
/// first failing slot aborts the merge with an error naming its 1-based
/// index. Entries with equal keys may appear in any order (the sort is not
/// stable).
pub fn merge(raw_inputs: &[String]) -> Result<MergeOutcome> {
    debug_assert!(raw_inputs.len() <= SLOT_COUNT);

    let mut entries: Vec<CommentEntry> = Vec::new();
    let mut breakdown = [0usize; SLOT_COUNT];
    let mut processed_count = 0;
    let mut total_before = 0;

    for (index, raw) in raw_inputs.iter().enumerate().take(SLOT_COUNT) {
        if raw.trim().is_empty() {
            continue;
        }
        let slot = index + 1;

        let parsed = decode_slot(slot, raw)?;
        tracing::debug!(slot, count = parsed.len(), "processed input slot");

        breakdown[index] = parsed.len();
        total_before += parsed.len();
        processed_count += 1;
        entries.extend(parsed);
    }

    entries.sort_unstable_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let total_after = entries.len();
    Ok(MergeOutcome {
        entries,
        stats: MergeStats {
            processed_count,
            total_before,
            total_after,
            breakdown,
        },
    })
}

/// Decode one slot: JSON syntax, array shape, then required fields per element.
fn decode_slot(slot: usize, raw: &str) -> Result<Vec<CommentEntry>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| MergeError::Parse { slot, source })?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(MergeError::Shape { slot }),
    };

    let mut parsed = Vec::with_capacity(items.len());
    for item in items {
        validate_element(slot, &item)?;
        // Field presence and types were just checked.
        let entry: CommentEntry = serde_json::from_value(item)
            .map_err(|source| MergeError::Validation {
                slot,
                reason: source.to_string(),
            })?;
        parsed.push(entry);
    }
    Ok(parsed)
}

fn validate_element(slot: usize, item: &Value) -> Result<()> {
    let obj = item.as_object().ok_or_else(|| MergeError::Validation {
        slot,
        reason: "element is not an object".to_string(),
    })?;

    for field in ["time", "command", "comment"] {
        match obj.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(MergeError::Validation {
                    slot,
                    reason: format!("field `{field}` is not a string"),
                })
            }
            None => {
                return Err(MergeError::Validation {
                    slot,
                    reason: format!("missing field `{field}`"),
                })
            }
        }
    }
    Ok(())
}

/// Render entries as indented JSON (2-space), for display and clipboard copy.
pub fn render_pretty(entries: &[CommentEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Processed {} comments from {} inputs.",
            self.total_before, self.processed_count
        )?;
        writeln!(f, "Comments after merge: {}", self.total_after)?;
        let counts: Vec<String> = self.breakdown.iter().map(|n| n.to_string()).collect();
        write!(f, "Per-input counts: [ {} ]", counts.join(", "))
    }
}
