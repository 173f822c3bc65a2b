// error.rs - Error taxonomy for the group distance summarizer

use std::fmt;
use thiserror::Error;

/// Which of the two summarizer inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    DistanceMatrix,
    GroupingTable,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::DistanceMatrix => write!(f, "distance matrix"),
            InputKind::GroupingTable => write!(f, "grouping table"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// An input does not have the expected structure
    #[error("invalid {kind}: {reason}")]
    InvalidInputKind { kind: InputKind, reason: String },

    /// Grouped identifiers with no row/column in the distance matrix
    #[error(
        "{} sequence identifier(s) from the grouping table not found in the distance matrix: {}",
        .ids.len(),
        .ids.join(", ")
    )]
    MissingIdentifier { ids: Vec<String> },

    #[error("sequence identifier '{0}' appears more than once in the grouping table")]
    DuplicateIdentifier(String),
}

impl SummaryError {
    pub(crate) fn matrix(reason: impl Into<String>) -> Self {
        SummaryError::InvalidInputKind {
            kind: InputKind::DistanceMatrix,
            reason: reason.into(),
        }
    }

    pub(crate) fn grouping(reason: impl Into<String>) -> Self {
        SummaryError::InvalidInputKind {
            kind: InputKind::GroupingTable,
            reason: reason.into(),
        }
    }
}
