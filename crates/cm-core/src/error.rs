//! Error types for cm-merge

use thiserror::Error;

/// Main error type for cm-merge
///
/// The `Parse`/`Shape`/`Validation` variants carry the 1-based index of the
/// input slot that failed; all three abort the merge attempt as a whole.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Input slot is not syntactically valid JSON
    #[error("Input {slot} is not valid JSON: {source}")]
    Parse {
        slot: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Input slot decoded to something other than an array
    #[error("Input {slot} is not an array")]
    Shape { slot: usize },

    /// An element in the slot lacks the required string fields
    #[error("Input {slot} has a malformed entry ({reason}; time, command and comment must be strings)")]
    Validation { slot: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MergeError {
    /// The 1-based slot index this error refers to, if any
    pub fn slot(&self) -> Option<usize> {
        match self {
            MergeError::Parse { slot, .. }
            | MergeError::Shape { slot }
            | MergeError::Validation { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

/// Result type alias for cm-merge
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_display() {
        let err = MergeError::Shape { slot: 3 };
        assert_eq!(err.to_string(), "Input 3 is not an array");
    }

    #[test]
    fn test_validation_error_display() {
        let err = MergeError::Validation {
            slot: 2,
            reason: "missing field `comment`".to_string(),
        };
        assert!(err.to_string().contains("Input 2"));
        assert!(err.to_string().contains("missing field `comment`"));
    }

    #[test]
    fn test_parse_error_names_slot() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = MergeError::Parse { slot: 5, source };
        assert!(err.to_string().starts_with("Input 5 is not valid JSON"));
        assert_eq!(err.slot(), Some(5));
    }

    #[test]
    fn test_io_error_has_no_slot() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MergeError = io_err.into();
        assert_eq!(err.slot(), None);
    }
}
