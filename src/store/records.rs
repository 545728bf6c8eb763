use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{
    ComputedLine, DocumentType, Draft, InvoiceTotals, TenantSettings, aggregate, compute_line,
};

/// One garage account. All documents are scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub settings: TenantSettings,
}

/// A persisted, numbered quote or invoice. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub document_type: DocumentType,
    pub number: String,
    pub issue_date: NaiveDate,
    pub client_id: String,
    pub lines: Vec<ComputedLine>,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub totals: InvoiceTotals,
    pub notes: Vec<String>,
    /// Quote this invoice was converted from.
    pub source_quote: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub(crate) fn from_draft(
        tenant_id: Uuid,
        number: String,
        draft: Draft,
        source_quote: Option<Uuid>,
    ) -> Self {
        // Amounts are recomputed so a stored document always agrees with its lines.
        let lines: Vec<ComputedLine> = draft.lines.iter().map(|c| compute_line(&c.line)).collect();
        let totals = aggregate(&lines, draft.hours_worked, draft.hourly_rate);
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            document_type: draft.document_type,
            number,
            issue_date: draft.issue_date,
            client_id: draft.client_id,
            lines,
            hours_worked: draft.hours_worked,
            hourly_rate: draft.hourly_rate,
            totals,
            notes: draft.notes,
            source_quote,
            created_at: Utc::now(),
        }
    }

    /// Draft of an invoice carrying this document's lines and labor.
    pub fn to_invoice_draft(&self, issue_date: NaiveDate) -> Draft {
        Draft {
            document_type: DocumentType::Invoice,
            client_id: self.client_id.clone(),
            issue_date,
            lines: self.lines.clone(),
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            totals: self.totals.clone(),
            notes: self.notes.clone(),
        }
    }
}
