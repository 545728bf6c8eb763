use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::DocumentType;

/// Per-tenant invoicing configuration, including the two sequence counters.
///
/// The counters live on the tenant record and are only ever advanced by the
/// storage layer once a document has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantSettings {
    /// Prefix of invoice numbers ("FA" gives "FA-2025-0001").
    pub invoice_prefix: String,
    /// Prefix of quote numbers.
    pub quote_prefix: String,
    /// Hourly labor rate used when a draft does not specify one.
    pub default_hourly_rate: Decimal,
    /// Sequence the next invoice will be numbered with.
    pub next_invoice_number: u64,
    /// Sequence the next quote will be numbered with.
    pub next_quote_number: u64,
    /// ISO 4217 code used for display.
    pub currency_code: String,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            invoice_prefix: "FA".to_string(),
            quote_prefix: "DE".to_string(),
            default_hourly_rate: Decimal::ZERO,
            next_invoice_number: 1,
            next_quote_number: 1,
            currency_code: "EUR".to_string(),
        }
    }
}

impl TenantSettings {
    /// Prefix configured for the given document type.
    pub fn prefix_for(&self, document_type: DocumentType) -> &str {
        match document_type {
            DocumentType::Invoice => &self.invoice_prefix,
            DocumentType::Quote => &self.quote_prefix,
        }
    }

    /// Current value of the counter for the given document type.
    pub fn next_sequence(&self, document_type: DocumentType) -> u64 {
        match document_type {
            DocumentType::Invoice => self.next_invoice_number,
            DocumentType::Quote => self.next_quote_number,
        }
    }

    /// Mutable access to a counter. Storage implementations use this inside
    /// the same critical section that persists the document.
    pub fn sequence_mut(&mut self, document_type: DocumentType) -> &mut u64 {
        match document_type {
            DocumentType::Invoice => &mut self.next_invoice_number,
            DocumentType::Quote => &mut self.next_quote_number,
        }
    }
}
