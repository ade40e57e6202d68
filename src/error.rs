use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("please enter a task description")]
    EmptyDescription,

    #[error("please select a task first")]
    NoSelection,

    #[error("task index {index} is out of range (list has {len} tasks)")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification the presentation layer uses to pick a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    OutOfRange,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDescription => ErrorKind::Validation,
            Error::NoSelection | Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::Storage(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(Error::EmptyDescription.kind(), ErrorKind::Validation);
        assert_eq!(Error::NoSelection.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            Error::OutOfRange { index: 3, len: 1 }.kind(),
            ErrorKind::OutOfRange
        );

        let io = StorageError::Io {
            path: PathBuf::from("tasks.txt"),
            source: std::io::Error::other("disk full"),
        };
        let err = Error::from(io);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("tasks.txt"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let value = serde_json::to_value(ErrorKind::OutOfRange).unwrap();
        assert_eq!(value, serde_json::json!("out_of_range"));
    }
}
