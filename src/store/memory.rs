use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::DocumentStore;
use super::records::{Document, Tenant};
use crate::core::{
    DocumentType, Draft, FacturierError, TenantSettings, document_number_for, parse_number,
    validate_invoice_line, validate_labor, validate_settings,
};

#[derive(Debug, Default)]
struct State {
    tenants: HashMap<Uuid, Tenant>,
    documents: Vec<Document>,
}

/// [`DocumentStore`] kept in process memory.
///
/// A single lock covers tenants and documents, so numbering, insertion and
/// the counter increment happen as one serializable step. Share it across
/// threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, FacturierError> {
        self.state
            .lock()
            .map_err(|_| FacturierError::Storage("store lock poisoned".into()))
    }
}

impl State {
    fn tenant(&self, tenant_id: Uuid) -> Result<&Tenant, FacturierError> {
        self.tenants
            .get(&tenant_id)
            .ok_or_else(|| FacturierError::NotFound(format!("tenant {tenant_id}")))
    }

    fn document(&self, tenant_id: Uuid, document_id: Uuid) -> Result<&Document, FacturierError> {
        self.documents
            .iter()
            .find(|d| d.id == document_id && d.tenant_id == tenant_id)
            .ok_or_else(|| FacturierError::NotFound(format!("document {document_id}")))
    }

    fn insert(
        &mut self,
        tenant_id: Uuid,
        draft: Draft,
        source_quote: Option<Uuid>,
    ) -> Result<Document, FacturierError> {
        check_draft(&draft)?;
        let document_type = draft.document_type;
        let number = document_number_for(
            &self.tenant(tenant_id)?.settings,
            document_type,
            Some(draft.issue_date.year()),
        );
        parse_number(&number)?;

        if self
            .documents
            .iter()
            .any(|d| d.tenant_id == tenant_id && d.number == number)
        {
            tracing::warn!(%tenant_id, %number, "document number already in use");
            return Err(FacturierError::Conflict(format!(
                "document number {number} already exists"
            )));
        }

        let tenant = self
            .tenants
            .get_mut(&tenant_id)
            .ok_or_else(|| FacturierError::NotFound(format!("tenant {tenant_id}")))?;
        let next = tenant
            .settings
            .next_sequence(document_type)
            .checked_add(1)
            .ok_or_else(|| {
                FacturierError::Numbering(format!("{document_type} sequence exhausted at {number}"))
            })?;
        let document = Document::from_draft(tenant_id, number, draft, source_quote);
        self.documents.push(document.clone());
        *tenant.settings.sequence_mut(document_type) = next;

        tracing::info!(
            %tenant_id,
            %document_type,
            number = %document.number,
            total_incl_tax = %document.totals.total_incl_tax,
            "created document"
        );
        Ok(document)
    }
}

fn check_draft(draft: &Draft) -> Result<(), FacturierError> {
    let mut errors = validate_labor(draft.hours_worked, draft.hourly_rate);
    for (i, computed) in draft.lines.iter().enumerate() {
        errors.extend(validate_invoice_line(&computed.line, i));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FacturierError::from_validation_errors(&errors))
    }
}

fn check_settings(settings: &TenantSettings) -> Result<(), FacturierError> {
    let errors = validate_settings(settings);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FacturierError::from_validation_errors(&errors))
    }
}

impl DocumentStore for InMemoryStore {
    fn create_tenant(
        &self,
        name: &str,
        settings: TenantSettings,
    ) -> Result<Tenant, FacturierError> {
        if name.trim().is_empty() {
            return Err(FacturierError::Validation("name: must not be empty".into()));
        }
        check_settings(&settings)?;

        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            settings,
        };
        self.lock()?.tenants.insert(tenant.id, tenant.clone());
        tracing::info!(tenant_id = %tenant.id, name = %tenant.name, "created tenant");
        Ok(tenant)
    }

    fn tenant(&self, tenant_id: Uuid) -> Result<Tenant, FacturierError> {
        self.lock()?.tenant(tenant_id).cloned()
    }

    fn update_settings(
        &self,
        tenant_id: Uuid,
        settings: TenantSettings,
    ) -> Result<Tenant, FacturierError> {
        check_settings(&settings)?;

        let mut state = self.lock()?;
        let tenant = state
            .tenants
            .get_mut(&tenant_id)
            .ok_or_else(|| FacturierError::NotFound(format!("tenant {tenant_id}")))?;
        tenant.settings = settings;
        tracing::info!(%tenant_id, "updated tenant settings");
        Ok(tenant.clone())
    }

    fn create_document(&self, tenant_id: Uuid, draft: Draft) -> Result<Document, FacturierError> {
        self.lock()?.insert(tenant_id, draft, None)
    }

    fn document(&self, tenant_id: Uuid, document_id: Uuid) -> Result<Document, FacturierError> {
        self.lock()?.document(tenant_id, document_id).cloned()
    }

    fn list_documents(
        &self,
        tenant_id: Uuid,
        document_type: Option<DocumentType>,
    ) -> Result<Vec<Document>, FacturierError> {
        let state = self.lock()?;
        state.tenant(tenant_id)?;
        Ok(state
            .documents
            .iter()
            .filter(|d| d.tenant_id == tenant_id)
            .filter(|d| document_type.is_none_or(|t| d.document_type == t))
            .cloned()
            .collect())
    }

    fn convert_quote(
        &self,
        tenant_id: Uuid,
        quote_id: Uuid,
        issue_date: NaiveDate,
    ) -> Result<Document, FacturierError> {
        let mut state = self.lock()?;
        let quote = state.document(tenant_id, quote_id)?;

        if quote.document_type != DocumentType::Quote {
            return Err(FacturierError::Validation(format!(
                "document {} is not a quote",
                quote.number
            )));
        }
        if let Some(existing) = state
            .documents
            .iter()
            .find(|d| d.source_quote == Some(quote_id))
        {
            tracing::warn!(%tenant_id, quote = %quote.number, invoice = %existing.number, "quote already converted");
            return Err(FacturierError::Conflict(format!(
                "quote {} was already converted to invoice {}",
                quote.number, existing.number
            )));
        }

        let draft = quote.to_invoice_draft(issue_date);
        state.insert(tenant_id, draft, Some(quote_id))
    }
}
