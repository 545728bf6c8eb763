//! Tenant-scoped document storage and sequence counters.
//!
//! [`DocumentStore`] is the seam between the pure numbering functions and
//! persistence. Implementations own each tenant's invoice and quote counters
//! and must advance a counter only after the document using it has been
//! stored, in the same atomic step.
//!
//! # Example
//!
//! ```
//! use facturier::core::*;
//! use facturier::store::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let store = InMemoryStore::new();
//! let tenant = store.create_tenant("Garage du Centre", TenantSettings::default()).unwrap();
//!
//! let draft = DraftBuilder::new(DocumentType::Invoice, "client-1")
//!     .issue_date(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap())
//!     .labor(dec!(2), dec!(60))
//!     .build()
//!     .unwrap();
//!
//! let invoice = store.create_document(tenant.id, draft).unwrap();
//! assert_eq!(invoice.number, "FA-2025-0001");
//! assert_eq!(store.tenant(tenant.id).unwrap().settings.next_invoice_number, 2);
//! ```

mod memory;
mod records;

pub use memory::InMemoryStore;
pub use records::{Document, Tenant};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::{DocumentType, Draft, FacturierError, TenantSettings};

/// Persistence of tenants and their numbered documents.
pub trait DocumentStore: Send + Sync {
    /// Register a tenant. Settings are validated.
    fn create_tenant(
        &self,
        name: &str,
        settings: TenantSettings,
    ) -> Result<Tenant, FacturierError>;

    fn tenant(&self, tenant_id: Uuid) -> Result<Tenant, FacturierError>;

    /// Replace a tenant's settings. Counters may be reset, e.g. when a garage
    /// migrates from other software; a reset that would reuse an existing
    /// number makes the next creation fail with `Conflict`.
    fn update_settings(
        &self,
        tenant_id: Uuid,
        settings: TenantSettings,
    ) -> Result<Tenant, FacturierError>;

    /// Number and persist a draft, then advance the matching counter once.
    /// On any error the counter is left untouched.
    fn create_document(&self, tenant_id: Uuid, draft: Draft) -> Result<Document, FacturierError>;

    /// Fetch a document belonging to the tenant.
    fn document(&self, tenant_id: Uuid, document_id: Uuid) -> Result<Document, FacturierError>;

    /// Documents of the tenant in creation order, optionally of one type.
    fn list_documents(
        &self,
        tenant_id: Uuid,
        document_type: Option<DocumentType>,
    ) -> Result<Vec<Document>, FacturierError>;

    /// Create an invoice from an accepted quote. A quote converts at most once.
    fn convert_quote(
        &self,
        tenant_id: Uuid,
        quote_id: Uuid,
        issue_date: NaiveDate,
    ) -> Result<Document, FacturierError>;
}
