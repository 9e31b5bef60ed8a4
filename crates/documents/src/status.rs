//! Document status taxonomy and its presentation mapping.
//!
//! The set of statuses is closed. No transition rules are encoded here: which
//! status may follow which is owned by whoever issues the documents.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdesk_core::{DomainError, ValueObject};

/// Lifecycle label of a stock document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DocumentStatus {
    Open,
    Draft,
    Confirmed,
    Posted,
    Cancelled,
    Transit,
    Received,
}

/// Visual treatment class for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationCategory {
    Neutral,
    Pending,
    Success,
    Error,
    Informational,
}

/// A status label from upstream data that is not part of the taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown document status '{label}'")]
pub struct UnknownStatusError {
    pub label: String,
}

impl From<UnknownStatusError> for DomainError {
    fn from(err: UnknownStatusError) -> Self {
        DomainError::unknown_label("document status", err.label)
    }
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 7] = [
        DocumentStatus::Open,
        DocumentStatus::Draft,
        DocumentStatus::Confirmed,
        DocumentStatus::Posted,
        DocumentStatus::Cancelled,
        DocumentStatus::Transit,
        DocumentStatus::Received,
    ];

    /// Wire label, as carried by document records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Open => "open",
            DocumentStatus::Draft => "draft",
            DocumentStatus::Confirmed => "confirmed",
            DocumentStatus::Posted => "posted",
            DocumentStatus::Cancelled => "cancelled",
            DocumentStatus::Transit => "transit",
            DocumentStatus::Received => "received",
        }
    }

    /// Human-readable label shown on the badge.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Open => "Open",
            DocumentStatus::Draft => "Draft",
            DocumentStatus::Confirmed => "Confirmed",
            DocumentStatus::Posted => "Posted",
            DocumentStatus::Cancelled => "Cancelled",
            DocumentStatus::Transit => "In transit",
            DocumentStatus::Received => "Received",
        }
    }

    pub fn category(&self) -> PresentationCategory {
        match self {
            DocumentStatus::Open | DocumentStatus::Draft => PresentationCategory::Neutral,
            DocumentStatus::Confirmed => PresentationCategory::Pending,
            DocumentStatus::Posted | DocumentStatus::Received => PresentationCategory::Success,
            DocumentStatus::Cancelled => PresentationCategory::Error,
            DocumentStatus::Transit => PresentationCategory::Informational,
        }
    }
}

impl core::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"Posted"` is not `"posted"`.
impl FromStr for DocumentStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatusError {
                label: s.to_string(),
            })
    }
}

impl TryFrom<String> for DocumentStatus {
    type Error = UnknownStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl ValueObject for DocumentStatus {}

impl PresentationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationCategory::Neutral => "neutral",
            PresentationCategory::Pending => "pending",
            PresentationCategory::Success => "success",
            PresentationCategory::Error => "error",
            PresentationCategory::Informational => "informational",
        }
    }

    /// Class name the rendering surface styles badges with.
    pub fn css_class(&self) -> &'static str {
        match self {
            PresentationCategory::Neutral => "badge-neutral",
            PresentationCategory::Pending => "badge-pending",
            PresentationCategory::Success => "badge-success",
            PresentationCategory::Error => "badge-error",
            PresentationCategory::Informational => "badge-info",
        }
    }
}

impl ValueObject for PresentationCategory {}

/// Map a raw status label to its presentation category.
///
/// Unknown labels are an error, never a default category.
pub fn classify(status: &str) -> Result<PresentationCategory, UnknownStatusError> {
    Ok(status.parse::<DocumentStatus>()?.category())
}

/// Payload for the rendering surface: a category and a label, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub category: PresentationCategory,
    pub label: String,
}

impl StatusBadge {
    pub fn for_status(status: DocumentStatus) -> Self {
        Self {
            category: status.category(),
            label: status.label().to_string(),
        }
    }

    pub fn from_label(raw: &str) -> Result<Self, UnknownStatusError> {
        Ok(Self::for_status(raw.parse()?))
    }

    pub fn css_class(&self) -> &'static str {
        self.category.css_class()
    }
}

impl ValueObject for StatusBadge {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classify_maps_every_label() {
        assert_eq!(classify("posted").unwrap(), PresentationCategory::Success);
        assert_eq!(classify("cancelled").unwrap(), PresentationCategory::Error);
        assert_eq!(classify("transit").unwrap(), PresentationCategory::Informational);
        assert_eq!(classify("draft").unwrap(), PresentationCategory::Neutral);
        assert_eq!(classify("open").unwrap(), PresentationCategory::Neutral);
        assert_eq!(classify("confirmed").unwrap(), PresentationCategory::Pending);
        assert_eq!(classify("received").unwrap(), PresentationCategory::Success);
    }

    #[test]
    fn unknown_label_is_an_error_not_a_default() {
        let err = classify("unknown-status").unwrap_err();
        assert_eq!(err.label, "unknown-status");
        assert_eq!(err.to_string(), "unknown document status 'unknown-status'");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(classify("Posted").is_err());
        assert!(classify(" posted").is_err());
        assert!(classify("").is_err());
    }

    #[test]
    fn unknown_status_converts_to_domain_error() {
        let err: DomainError = classify("archived").unwrap_err().into();
        assert_eq!(
            err,
            DomainError::UnknownLabel {
                kind: "document status",
                label: "archived".to_string()
            }
        );
    }

    #[test]
    fn badge_carries_human_label_and_category() {
        let badge = StatusBadge::from_label("transit").unwrap();
        assert_eq!(badge.label, "In transit");
        assert_eq!(badge.category, PresentationCategory::Informational);
        assert_eq!(badge.css_class(), "badge-info");
    }

    #[test]
    fn serde_uses_wire_labels_and_rejects_unknown() {
        let json = serde_json::to_string(&DocumentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let parsed: DocumentStatus = serde_json::from_str("\"received\"").unwrap();
        assert_eq!(parsed, DocumentStatus::Received);

        let err = serde_json::from_str::<DocumentStatus>("\"archived\"").unwrap_err();
        assert!(err.to_string().contains("unknown document status 'archived'"));
    }

    proptest! {
        /// Property: any string outside the taxonomy is rejected with its
        /// label preserved.
        #[test]
        fn classify_rejects_anything_outside_the_taxonomy(raw in ".{0,24}") {
            let known = DocumentStatus::ALL.iter().any(|s| s.as_str() == raw);
            match classify(&raw) {
                Ok(_) => prop_assert!(known),
                Err(err) => {
                    prop_assert!(!known);
                    prop_assert_eq!(err.label, raw);
                }
            }
        }
    }
}
