//! Error taxonomy for the grading pipeline.
//!
//! Nothing in the library recovers from these; they bubble up to the caller
//! and abort the run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Broad category of a [`GradeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    Schema,
    Lookup,
    Validation,
    Parse,
}

/// Error type for loading, joining and report writing.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} must contain '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("record missing '{field}': {record}")]
    MissingField { field: String, record: String },

    #[error("field '{field}' has unusable value '{value}' in record {record}")]
    InvalidField {
        field: String,
        value: String,
        record: String,
    },

    #[error("key '{key}' not found in table {table}")]
    MissingKey { table: String, key: String },

    #[error("final grade {value} is not a representable integer for {record}")]
    UnrepresentableGrade { value: String, record: String },

    #[error("{group} has no results to write to {}", path.display())]
    EmptyGroup { group: String, path: PathBuf },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GradeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradeError::NotFound { .. } => ErrorKind::NotFound,
            GradeError::Io { .. } => ErrorKind::Io,
            GradeError::MissingColumn { .. }
            | GradeError::MissingField { .. }
            | GradeError::InvalidField { .. } => ErrorKind::Schema,
            GradeError::MissingKey { .. } => ErrorKind::Lookup,
            GradeError::UnrepresentableGrade { .. } | GradeError::EmptyGroup { .. } => {
                ErrorKind::Validation
            }
            GradeError::Csv { .. } | GradeError::Json { .. } => ErrorKind::Parse,
        }
    }

    /// Wraps an I/O error, promoting `NotFound` to its own variant.
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            GradeError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            GradeError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps a CSV error, unwrapping the I/O errors the csv crate carries.
    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        let io_err = match source.kind() {
            csv::ErrorKind::Io(err) => Some(io::Error::new(err.kind(), err.to_string())),
            _ => None,
        };
        match io_err {
            Some(err) => GradeError::io(path, err),
            None => GradeError::Csv {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_is_promoted() {
        let err = GradeError::io(
            Path::new("data/missing.csv"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("data/missing.csv"));
    }

    #[test]
    fn test_other_io_stays_io() {
        let err = GradeError::io(
            Path::new("output/group_1_scores.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_kind_categories() {
        let schema = GradeError::MissingColumn {
            path: PathBuf::from("q.csv"),
            column: "SID".into(),
        };
        let lookup = GradeError::MissingKey {
            table: "q.csv".into(),
            key: "abc".into(),
        };
        let validation = GradeError::EmptyGroup {
            group: "Group 2".into(),
            path: PathBuf::from("out.csv"),
        };
        assert_eq!(schema.kind(), ErrorKind::Schema);
        assert_eq!(lookup.kind(), ErrorKind::Lookup);
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(schema.to_string(), "q.csv must contain 'SID' column");
    }
}
