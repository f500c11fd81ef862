//! Loader collaborators that turn CSV site feeds and JSON reference bundles
//! into the in-memory values the engine scores.

mod reference;
mod sites;

pub use reference::{read_reference, read_reference_path, ReferenceBundle};
pub use sites::{read_sites, read_sites_path};

use crate::siting::UnknownCategory;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidField {
        line: u64,
        column: &'static str,
        source: UnknownCategory,
    },
    MissingField {
        line: u64,
        column: &'static str,
    },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(err) => write!(f, "failed to read input: {}", err),
            IngestError::Csv(err) => write!(f, "invalid site CSV data: {}", err),
            IngestError::Json(err) => write!(f, "invalid reference bundle: {}", err),
            IngestError::InvalidField {
                line,
                column,
                source,
            } => write!(f, "line {line}, column {column}: {source}"),
            IngestError::MissingField { line, column } => {
                write!(f, "line {line}: missing required column {column}")
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Io(err) => Some(err),
            IngestError::Csv(err) => Some(err),
            IngestError::Json(err) => Some(err),
            IngestError::InvalidField { source, .. } => Some(source),
            IngestError::MissingField { .. } => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
