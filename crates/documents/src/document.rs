//! Stock document records and the detail view model built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdesk_core::{DocumentId, Entity};

use crate::status::{DocumentStatus, StatusBadge};

/// Kind of stock movement a document records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Receipt,
    Issue,
    Transfer,
    Adjustment,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Receipt => "Goods receipt",
            DocumentKind::Issue => "Goods issue",
            DocumentKind::Transfer => "Stock transfer",
            DocumentKind::Adjustment => "Stock adjustment",
        }
    }
}

/// Document line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub line_no: u32,
    pub sku: String,
    pub description: String,
    pub quantity: i64,
    pub unit: String,
}

/// A stock document as delivered by the document service.
///
/// `status` must be one of the known labels; anything else fails
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDocument {
    pub id: DocumentId,
    pub number: String,
    pub kind: DocumentKind,
    pub status: DocumentStatus,
    pub date: NaiveDate,
    #[serde(default)]
    pub warehouse_from: Option<String>,
    #[serde(default)]
    pub warehouse_to: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed stock document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StockDocument {
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

impl Entity for StockDocument {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One row of the detail view's line table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRow {
    pub line_no: u32,
    pub sku: String,
    pub description: String,
    pub quantity: String,
}

/// Everything the detail modal shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDetail {
    pub title: String,
    pub kind: &'static str,
    pub date: String,
    pub badge: StatusBadge,
    pub route: Option<String>,
    pub note: Option<String>,
    pub lines: Vec<LineRow>,
    pub total_quantity: i64,
}

impl DocumentDetail {
    pub fn from_document(doc: &StockDocument) -> Self {
        let route = match (&doc.warehouse_from, &doc.warehouse_to) {
            (Some(from), Some(to)) => Some(format!("{from} → {to}")),
            (Some(from), None) => Some(format!("from {from}")),
            (None, Some(to)) => Some(format!("to {to}")),
            (None, None) => None,
        };

        let lines = doc
            .lines
            .iter()
            .map(|line| LineRow {
                line_no: line.line_no,
                sku: line.sku.clone(),
                description: line.description.clone(),
                quantity: format!("{} {}", line.quantity, line.unit),
            })
            .collect();

        Self {
            title: format!("{} {}", doc.kind.label(), doc.number),
            kind: doc.kind.label(),
            date: doc.date.format("%Y-%m-%d").to_string(),
            badge: StatusBadge::for_status(doc.status),
            route,
            note: doc.note.clone(),
            lines,
            total_quantity: doc.total_quantity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::PresentationCategory;

    fn transfer_json(status: &str) -> String {
        format!(
            r#"{{
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "number": "TR-2024-0042",
                "kind": "transfer",
                "status": "{status}",
                "date": "2024-03-18",
                "warehouse_from": "Main",
                "warehouse_to": "Store 3",
                "lines": [
                    {{"line_no": 1, "sku": "BOLT-M8", "description": "Bolt M8", "quantity": 120, "unit": "pcs"}},
                    {{"line_no": 2, "sku": "NUT-M8", "description": "Nut M8", "quantity": 80, "unit": "pcs"}}
                ]
            }}"#
        )
    }

    #[test]
    fn parses_document_and_builds_detail() {
        let doc = StockDocument::from_json(&transfer_json("transit")).unwrap();
        assert_eq!(doc.status, DocumentStatus::Transit);
        assert_eq!(doc.total_quantity(), 200);

        let detail = DocumentDetail::from_document(&doc);
        assert_eq!(detail.title, "Stock transfer TR-2024-0042");
        assert_eq!(detail.date, "2024-03-18");
        assert_eq!(detail.route.as_deref(), Some("Main → Store 3"));
        assert_eq!(detail.badge.category, PresentationCategory::Informational);
        assert_eq!(detail.badge.label, "In transit");
        assert_eq!(detail.lines[1].quantity, "80 pcs");
    }

    #[test]
    fn unknown_status_fails_loudly() {
        let err = StockDocument::from_json(&transfer_json("archived")).unwrap_err();
        assert!(err.to_string().contains("unknown document status 'archived'"));
    }

    #[test]
    fn optional_fields_default() {
        let raw = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "number": "ADJ-7",
            "kind": "adjustment",
            "status": "draft",
            "date": "2024-01-02"
        }"#;
        let doc = StockDocument::from_json(raw).unwrap();
        assert!(doc.lines.is_empty());

        let detail = DocumentDetail::from_document(&doc);
        assert_eq!(detail.route, None);
        assert_eq!(detail.total_quantity, 0);
        assert_eq!(detail.badge.css_class(), "badge-neutral");
    }
}
