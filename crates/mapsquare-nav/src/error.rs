//! Initialization errors.
//!
//! Only building a [`Navigator`](crate::Navigator) can fail. Queries never
//! return errors: an unreachable destination is an empty or partial path.

use std::path::PathBuf;

/// Errors raised while loading a snapshot or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or lacks one of its arrays.
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `tiles` row is out of range.
    #[error("invalid tile #{index} {row:?}: {reason}")]
    InvalidTile {
        index: usize,
        row: Vec<i64>,
        reason: &'static str,
    },

    /// A `zones` row is out of range.
    #[error("invalid zone #{index} {row:?}: {reason}")]
    InvalidZone {
        index: usize,
        row: Vec<i64>,
        reason: &'static str,
    },

    /// A `doors` row is out of range or has an unsupported shape.
    #[error("invalid door #{index} {row:?}: {reason}")]
    InvalidDoor {
        index: usize,
        row: Vec<i64>,
        reason: &'static str,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_row() {
        let e = NavError::InvalidTile {
            index: 3,
            row: vec![7, 1, 2, 0],
            reason: "level out of range",
        };
        assert_eq!(e.to_string(), "invalid tile #3 [7, 1, 2, 0]: level out of range");
    }

    #[test]
    fn parse_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: NavError = err.into();
        assert!(matches!(e, NavError::Parse(_)));
        assert!(e.to_string().starts_with("malformed snapshot"));
    }
}
