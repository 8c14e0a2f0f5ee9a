//! Comment entry data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// A single timestamped comment record
///
/// The three named fields are required and validated; anything else the
/// source JSON carries is kept in `extra` and written back out unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    /// Timestamp token, `MM:SS.mmm` or `MM.SS.mmm` notation
    pub time: String,
    /// Rendering/styling directive (opaque)
    pub command: String,
    /// Comment text (opaque)
    pub comment: String,
    /// Passthrough for fields this tool does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommentEntry {
    /// The key entries are ordered by.
    ///
    /// Dot-notation timestamps use a literal `.` where colon-notation uses
    /// `:`, so the first period is rewritten to a colon; any later period
    /// (fractional seconds) stays as-is. Keys compare as plain strings,
    /// which matches the original tool and is only correct while all inputs
    /// share the same zero-padding.
    pub fn sort_key(&self) -> Cow<'_, str> {
        match self.time.find('.') {
            Some(pos) => {
                let mut key = self.time.clone();
                key.replace_range(pos..pos + 1, ":");
                Cow::Owned(key)
            }
            None => Cow::Borrowed(&self.time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(time: &str) -> CommentEntry {
        CommentEntry {
            time: time.to_string(),
            command: "naka".to_string(),
            comment: "hello".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_sort_key_rewrites_first_period_only() {
        assert_eq!(entry("00.05.50").sort_key(), "00:05.50");
        assert_eq!(entry("00:10.50").sort_key(), "00:10:50");
    }

    #[test]
    fn test_sort_key_orders_dot_notation_against_colon_notation() {
        assert!(entry("00.05.50").sort_key() < entry("00:10.50").sort_key());
    }

    #[test]
    fn test_sort_key_no_period() {
        assert_eq!(entry("01:23").sort_key(), "01:23");
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let json = r#"{"time":"00:01.00","command":"big","comment":"x","user":"abc","vpos":6000}"#;
        let parsed: CommentEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.extra.get("user"), Some(&serde_json::json!("abc")));
        assert_eq!(parsed.extra.get("vpos"), Some(&serde_json::json!(6000)));

        let out = serde_json::to_string(&parsed).unwrap();
        let reparsed: CommentEntry = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_extra_omitted_when_empty() {
        let json = serde_json::to_string(&entry("00:01.00")).unwrap();
        assert_eq!(json, r#"{"time":"00:01.00","command":"naka","comment":"hello"}"#);
    }
}
