use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::builder::DraftBuilder;
use super::error::{FacturierError, ValidationError};
use super::settings::TenantSettings;
use super::types::{DocumentType, InvoiceLine, LineType};

pub const MIN_QUANTITY: Decimal = dec!(0.001);
pub const MAX_QUANTITY: Decimal = dec!(100_000);
pub const MAX_UNIT_PRICE: Decimal = dec!(10_000_000);
pub const MAX_HOURS: Decimal = dec!(10_000);
pub const MAX_HOURLY_RATE: Decimal = dec!(100_000);
pub const MAX_TAX_RATE: Decimal = dec!(100);
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_PREFIX_LEN: usize = 10;

/// An invoice line as received from a client, before validation.
///
/// Every field is optional so that a missing value is reported as a
/// validation error alongside the others instead of failing decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInvoiceLine {
    #[serde(rename = "type")]
    pub line_type: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price_excl_tax: Option<Decimal>,
    pub tax_rate_percent: Option<Decimal>,
}

/// A quote or invoice creation request as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDraftRequest {
    pub document_type: Option<String>,
    pub client_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub lines: Vec<RawInvoiceLine>,
    pub hours_worked: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub notes: Vec<String>,
}

/// A creation request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub document_type: DocumentType,
    pub client_id: String,
    pub issue_date: Option<NaiveDate>,
    pub lines: Vec<InvoiceLine>,
    pub hours_worked: Decimal,
    /// `None` means "use the tenant's default rate".
    pub hourly_rate: Option<Decimal>,
    pub notes: Vec<String>,
}

impl ValidatedDraft {
    /// Turn the request into a builder, filling the hourly rate from the
    /// tenant's settings when the request left it out.
    pub fn into_builder(self, settings: &TenantSettings) -> DraftBuilder {
        let rate = self.hourly_rate.unwrap_or(settings.default_hourly_rate);
        let mut builder = DraftBuilder::new(self.document_type, self.client_id)
            .labor(self.hours_worked, rate);
        if let Some(date) = self.issue_date {
            builder = builder.issue_date(date);
        }
        for line in self.lines {
            builder = builder.add_line(line);
        }
        for note in self.notes {
            builder = builder.note(note);
        }
        builder
    }
}

/// Validate one raw line. `index` is used in the reported field paths.
/// Returns all errors found (not just the first).
pub fn validate_line(
    raw: &RawInvoiceLine,
    index: usize,
) -> Result<InvoiceLine, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let field = |name: &str| format!("lines[{index}].{name}");

    let line_type = match raw.line_type.as_deref() {
        None => {
            errors.push(ValidationError::new(field("type"), "is required"));
            None
        }
        Some(code) => {
            let parsed = LineType::from_code(code);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    field("type"),
                    format!("unknown line type '{code}' (expected PART, LABOR, FLAT_FEE or DISCOUNT)"),
                ));
            }
            parsed
        }
    };

    let description = raw.description.as_deref().unwrap_or("").trim();
    check_description(description, index, &mut errors);

    let quantity = required(raw.quantity, &field("quantity"), &mut errors);
    let unit_price = required(raw.unit_price_excl_tax, &field("unitPriceExclTax"), &mut errors);
    let tax_rate = required(raw.tax_rate_percent, &field("taxRatePercent"), &mut errors);
    check_amounts(quantity, unit_price, tax_rate, index, &mut errors);

    match (line_type, quantity, unit_price, tax_rate) {
        (Some(line_type), Some(quantity), Some(unit_price_excl_tax), Some(tax_rate_percent))
            if errors.is_empty() =>
        {
            Ok(InvoiceLine {
                line_type,
                description: description.to_string(),
                quantity,
                unit_price_excl_tax,
                tax_rate_percent,
            })
        }
        _ => Err(errors),
    }
}

/// Check a line that was built in code rather than decoded from a request.
/// Applies the same bounds as [`validate_line`].
pub fn validate_invoice_line(line: &InvoiceLine, index: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_description(line.description.trim(), index, &mut errors);
    check_amounts(
        Some(line.quantity),
        Some(line.unit_price_excl_tax),
        Some(line.tax_rate_percent),
        index,
        &mut errors,
    );
    errors
}

/// Validate the labor parameters of a draft.
pub fn validate_labor(hours_worked: Decimal, hourly_rate: Decimal) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if hours_worked < Decimal::ZERO {
        errors.push(ValidationError::new("hoursWorked", "must not be negative"));
    } else if hours_worked > MAX_HOURS {
        errors.push(ValidationError::new(
            "hoursWorked",
            format!("must not exceed {MAX_HOURS}"),
        ));
    }
    if hourly_rate < Decimal::ZERO {
        errors.push(ValidationError::new("hourlyRate", "must not be negative"));
    } else if hourly_rate > MAX_HOURLY_RATE {
        errors.push(ValidationError::new(
            "hourlyRate",
            format!("must not exceed {MAX_HOURLY_RATE}"),
        ));
    }
    errors
}

/// Validate a tenant's invoicing settings.
pub fn validate_settings(settings: &TenantSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_prefix(&settings.invoice_prefix, "invoicePrefix", &mut errors);
    validate_prefix(&settings.quote_prefix, "quotePrefix", &mut errors);

    if settings.next_invoice_number == 0 {
        errors.push(ValidationError::new("nextInvoiceNumber", "must be at least 1"));
    }
    if settings.next_quote_number == 0 {
        errors.push(ValidationError::new("nextQuoteNumber", "must be at least 1"));
    }
    if settings.default_hourly_rate < Decimal::ZERO {
        errors.push(ValidationError::new(
            "defaultHourlyRate",
            "must not be negative",
        ));
    } else if settings.default_hourly_rate > MAX_HOURLY_RATE {
        errors.push(ValidationError::new(
            "defaultHourlyRate",
            format!("must not exceed {MAX_HOURLY_RATE}"),
        ));
    }

    let code = &settings.currency_code;
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(ValidationError::new(
            "currencyCode",
            format!("'{code}' is not a 3-letter ISO 4217 code"),
        ));
    }

    errors
}

/// Validate a complete creation request.
pub fn validate_draft_request(raw: &RawDraftRequest) -> Result<ValidatedDraft, FacturierError> {
    let mut errors = Vec::new();

    let document_type = match raw.document_type.as_deref() {
        None => {
            errors.push(ValidationError::new("documentType", "is required"));
            None
        }
        Some(code) => {
            let parsed = DocumentType::from_code(code);
            if parsed.is_none() {
                errors.push(ValidationError::new(
                    "documentType",
                    format!("unknown document type '{code}' (expected INVOICE or QUOTE)"),
                ));
            }
            parsed
        }
    };

    let client_id = raw.client_id.as_deref().unwrap_or("").trim();
    if client_id.is_empty() {
        errors.push(ValidationError::new("clientId", "is required"));
    }

    let mut lines = Vec::with_capacity(raw.lines.len());
    for (i, raw_line) in raw.lines.iter().enumerate() {
        match validate_line(raw_line, i) {
            Ok(line) => lines.push(line),
            Err(line_errors) => errors.extend(line_errors),
        }
    }

    let hours_worked = raw.hours_worked.unwrap_or(Decimal::ZERO);
    errors.extend(validate_labor(
        hours_worked,
        raw.hourly_rate.unwrap_or(Decimal::ZERO),
    ));

    match document_type {
        Some(document_type) if errors.is_empty() => Ok(ValidatedDraft {
            document_type,
            client_id: client_id.to_string(),
            issue_date: raw.issue_date,
            lines,
            hours_worked,
            hourly_rate: raw.hourly_rate,
            notes: raw.notes.clone(),
        }),
        _ => {
            tracing::warn!(errors = errors.len(), "rejected draft request");
            Err(FacturierError::from_validation_errors(&errors))
        }
    }
}

fn required(
    value: Option<Decimal>,
    field: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Decimal> {
    if value.is_none() {
        errors.push(ValidationError::new(field, "is required"));
    }
    value
}

fn check_description(description: &str, index: usize, errors: &mut Vec<ValidationError>) {
    let field = format!("lines[{index}].description");
    if description.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(ValidationError::new(
            field,
            format!("must not exceed {MAX_DESCRIPTION_LEN} characters"),
        ));
    }
}

// Upper bounds keep every product and sum far inside Decimal's range.
fn check_amounts(
    quantity: Option<Decimal>,
    unit_price: Option<Decimal>,
    tax_rate: Option<Decimal>,
    index: usize,
    errors: &mut Vec<ValidationError>,
) {
    let field = |name: &str| format!("lines[{index}].{name}");

    if let Some(q) = quantity {
        if q < MIN_QUANTITY {
            errors.push(ValidationError::new(
                field("quantity"),
                format!("must be at least {MIN_QUANTITY}"),
            ));
        } else if q > MAX_QUANTITY {
            errors.push(ValidationError::new(
                field("quantity"),
                format!("must not exceed {MAX_QUANTITY}"),
            ));
        }
    }

    if let Some(p) = unit_price {
        if p < Decimal::ZERO {
            errors.push(ValidationError::new(
                field("unitPriceExclTax"),
                "must not be negative",
            ));
        } else if p > MAX_UNIT_PRICE {
            errors.push(ValidationError::new(
                field("unitPriceExclTax"),
                format!("must not exceed {MAX_UNIT_PRICE}"),
            ));
        }
    }

    if let Some(r) = tax_rate {
        if r < Decimal::ZERO || r > MAX_TAX_RATE {
            errors.push(ValidationError::new(
                field("taxRatePercent"),
                "must be between 0 and 100",
            ));
        }
    }
}

fn validate_prefix(prefix: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if prefix.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if prefix.len() > MAX_PREFIX_LEN {
        errors.push(ValidationError::new(
            field,
            format!("must not exceed {MAX_PREFIX_LEN} characters"),
        ));
    } else if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::new(
            field,
            "must contain only ASCII letters and digits",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_line() -> RawInvoiceLine {
        RawInvoiceLine {
            line_type: Some("PART".into()),
            description: Some("  Courroie de distribution ".into()),
            quantity: Some(dec!(1)),
            unit_price_excl_tax: Some(dec!(89.90)),
            tax_rate_percent: Some(dec!(20)),
        }
    }

    fn raw_request() -> RawDraftRequest {
        RawDraftRequest {
            document_type: Some("QUOTE".into()),
            client_id: Some("client-1".into()),
            lines: vec![raw_line()],
            hours_worked: Some(dec!(2)),
            hourly_rate: Some(dec!(55)),
            ..RawDraftRequest::default()
        }
    }

    #[test]
    fn valid_line() {
        let line = validate_line(&raw_line(), 0).unwrap();
        assert_eq!(line.line_type, LineType::Part);
        assert_eq!(line.description, "Courroie de distribution");
        assert_eq!(line.unit_price_excl_tax, dec!(89.90));
    }

    #[test]
    fn boundary_values_accepted() {
        let raw = RawInvoiceLine {
            quantity: Some(dec!(0.001)),
            unit_price_excl_tax: Some(dec!(0)),
            tax_rate_percent: Some(dec!(100)),
            ..raw_line()
        };
        assert!(validate_line(&raw, 0).is_ok());
    }

    #[test]
    fn collects_every_line_error() {
        let raw = RawInvoiceLine {
            line_type: Some("GIFT".into()),
            description: Some("   ".into()),
            quantity: Some(dec!(0.0009)),
            unit_price_excl_tax: Some(dec!(-1)),
            tax_rate_percent: Some(dec!(100.5)),
        };
        let errors = validate_line(&raw, 3).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "lines[3].type",
                "lines[3].description",
                "lines[3].quantity",
                "lines[3].unitPriceExclTax",
                "lines[3].taxRatePercent",
            ]
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let errors = validate_line(&RawInvoiceLine::default(), 0).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.message == "is required"));
    }

    #[test]
    fn description_too_long() {
        let raw = RawInvoiceLine {
            description: Some("x".repeat(MAX_DESCRIPTION_LEN + 1)),
            ..raw_line()
        };
        let errors = validate_line(&raw, 0).unwrap_err();
        assert_eq!(errors[0].field, "lines[0].description");
    }

    #[test]
    fn oversized_amounts_rejected() {
        let raw = RawInvoiceLine {
            quantity: Some(dec!(100000000000000000000)),
            unit_price_excl_tax: Some(dec!(100000000000000000000)),
            ..raw_line()
        };
        let errors = validate_line(&raw, 0).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["lines[0].quantity", "lines[0].unitPriceExclTax"]);

        let at_limit = RawInvoiceLine {
            quantity: Some(MAX_QUANTITY),
            unit_price_excl_tax: Some(MAX_UNIT_PRICE),
            ..raw_line()
        };
        assert!(validate_line(&at_limit, 0).is_ok());
    }

    #[test]
    fn built_line_checked_like_raw_line() {
        let line = validate_line(&raw_line(), 0).unwrap();
        assert!(validate_invoice_line(&line, 0).is_empty());

        let oversized = InvoiceLine {
            quantity: MAX_QUANTITY + dec!(1),
            description: String::new(),
            ..line
        };
        let errors = validate_invoice_line(&oversized, 2);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["lines[2].description", "lines[2].quantity"]);
    }

    #[test]
    fn oversized_labor() {
        let errors = validate_labor(MAX_HOURS + dec!(0.5), dec!(1_000_000_000_000));
        assert_eq!(errors.len(), 2);
        assert!(validate_labor(MAX_HOURS, MAX_HOURLY_RATE).is_empty());
    }

    #[test]
    fn negative_labor() {
        let errors = validate_labor(dec!(-0.5), dec!(-1));
        assert_eq!(errors.len(), 2);
        assert!(validate_labor(dec!(0), dec!(0)).is_empty());
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(validate_settings(&TenantSettings::default()).is_empty());
    }

    #[test]
    fn invalid_settings() {
        let settings = TenantSettings {
            invoice_prefix: "".into(),
            quote_prefix: "DE-V".into(),
            default_hourly_rate: dec!(-10),
            next_invoice_number: 0,
            next_quote_number: 1,
            currency_code: "eur".into(),
        };
        let errors = validate_settings(&settings);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "invoicePrefix",
                "quotePrefix",
                "nextInvoiceNumber",
                "defaultHourlyRate",
                "currencyCode",
            ]
        );
    }

    #[test]
    fn long_prefix_rejected() {
        let settings = TenantSettings {
            invoice_prefix: "FACTUREGARAGE".into(),
            ..TenantSettings::default()
        };
        assert_eq!(validate_settings(&settings)[0].field, "invoicePrefix");
    }

    #[test]
    fn valid_request() {
        let draft = validate_draft_request(&raw_request()).unwrap();
        assert_eq!(draft.document_type, DocumentType::Quote);
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.hourly_rate, Some(dec!(55)));
    }

    #[test]
    fn request_errors_include_line_errors() {
        let mut raw = raw_request();
        raw.document_type = Some("RECEIPT".into());
        raw.client_id = None;
        raw.lines.push(RawInvoiceLine {
            quantity: Some(dec!(0)),
            ..raw_line()
        });
        let err = validate_draft_request(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("documentType"));
        assert!(msg.contains("clientId"));
        assert!(msg.contains("lines[1].quantity"));
        assert!(!msg.contains("lines[0]"));
    }

    #[test]
    fn missing_rate_falls_back_to_tenant_default() {
        let mut raw = raw_request();
        raw.hourly_rate = None;
        let settings = TenantSettings {
            default_hourly_rate: dec!(62),
            ..TenantSettings::default()
        };
        let draft = validate_draft_request(&raw)
            .unwrap()
            .into_builder(&settings)
            .build()
            .unwrap();
        assert_eq!(draft.hourly_rate, dec!(62));
        assert_eq!(draft.totals.labor_excl_tax, dec!(124.00));
    }
}
