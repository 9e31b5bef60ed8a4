//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic failures only (malformed identifiers, unknown labels coming
/// from upstream data). Storage and IO failures belong to the
/// crate that performs the IO.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A label from upstream data is not part of a closed taxonomy.
    #[error("unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_label(kind: &'static str, label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            kind,
            label: label.into(),
        }
    }
}
