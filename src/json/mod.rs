//! Decoding of raw JSON request bodies and settings documents.
//!
//! Decoding and validation are separate steps: the body is first read into
//! the loosely typed `Raw*` structs, then validated into strong types.
//!
//! # Example
//!
//! ```
//! use facturier::json::parse_draft_request;
//!
//! let body = r#"{
//!     "documentType": "INVOICE",
//!     "clientId": "client-7",
//!     "hoursWorked": "1.5",
//!     "hourlyRate": 50,
//!     "lines": [
//!         { "type": "PART", "description": "Plaquettes", "quantity": 2,
//!           "unitPriceExclTax": "15.00", "taxRatePercent": 20 }
//!     ]
//! }"#;
//! let draft = parse_draft_request(body).unwrap();
//! assert_eq!(draft.lines.len(), 1);
//! ```

use crate::core::{
    FacturierError, RawDraftRequest, RawInvoiceLine, TenantSettings, ValidatedDraft,
    validate_draft_request, validate_settings,
};

/// Decode and validate a quote/invoice creation request.
pub fn parse_draft_request(body: &str) -> Result<ValidatedDraft, FacturierError> {
    let raw: RawDraftRequest =
        serde_json::from_str(body).map_err(|e| FacturierError::Parse(e.to_string()))?;
    validate_draft_request(&raw)
}

/// Decode a list of raw lines without validating them.
pub fn parse_raw_lines(body: &str) -> Result<Vec<RawInvoiceLine>, FacturierError> {
    serde_json::from_str(body).map_err(|e| FacturierError::Parse(e.to_string()))
}

impl TenantSettings {
    /// Decode and validate a settings document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FacturierError> {
        let settings: TenantSettings =
            serde_json::from_str(json).map_err(|e| FacturierError::Parse(e.to_string()))?;
        let errors = validate_settings(&settings);
        if !errors.is_empty() {
            return Err(FacturierError::from_validation_errors(&errors));
        }
        Ok(settings)
    }

    /// Encode the settings as JSON.
    pub fn to_json(&self) -> Result<String, FacturierError> {
        serde_json::to_string_pretty(self).map_err(|e| FacturierError::Parse(e.to_string()))
    }
}
