//! Stock document model (receipts, issues, transfers) and its status taxonomy.
//!
//! Pure data and deterministic mappings; no IO, no rendering.

pub mod document;
pub mod status;

pub use document::{
    DocumentDetail, DocumentError, DocumentKind, DocumentLine, LineRow, StockDocument,
};
pub use status::{
    DocumentStatus, PresentationCategory, StatusBadge, UnknownStatusError, classify,
};
