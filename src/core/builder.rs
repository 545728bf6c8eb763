use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::calculation;
use super::error::FacturierError;
use super::types::*;
use super::validation;

/// Upper bound on the number of lines in one document.
pub const MAX_LINES: usize = 500;

/// Builder for quote and invoice drafts.
///
/// ```
/// use facturier::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let draft = DraftBuilder::new(DocumentType::Invoice, "client-42")
///     .issue_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
///     .labor(dec!(1.5), dec!(50))
///     .add_line(InvoiceLine {
///         line_type: LineType::Part,
///         description: "Plaquettes de frein".into(),
///         quantity: dec!(2),
///         unit_price_excl_tax: dec!(15.00),
///         tax_rate_percent: dec!(20),
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.totals.total_incl_tax, dec!(126.00));
/// ```
pub struct DraftBuilder {
    document_type: DocumentType,
    client_id: String,
    issue_date: Option<NaiveDate>,
    lines: Vec<InvoiceLine>,
    hours_worked: Decimal,
    hourly_rate: Decimal,
    notes: Vec<String>,
}

impl DraftBuilder {
    pub fn new(document_type: DocumentType, client_id: impl Into<String>) -> Self {
        Self {
            document_type,
            client_id: client_id.into(),
            issue_date: None,
            lines: Vec::new(),
            hours_worked: Decimal::ZERO,
            hourly_rate: Decimal::ZERO,
            notes: Vec::new(),
        }
    }

    /// Defaults to today's local date.
    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn labor(mut self, hours_worked: Decimal, hourly_rate: Decimal) -> Self {
        self.hours_worked = hours_worked;
        self.hourly_rate = hourly_rate;
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Compute lines and totals. The draft is not numbered.
    pub fn build(self) -> Result<Draft, FacturierError> {
        if self.client_id.trim().is_empty() {
            return Err(FacturierError::Builder("client id is required".into()));
        }
        if self.lines.len() > MAX_LINES {
            return Err(FacturierError::Builder(format!(
                "a document cannot have more than {MAX_LINES} lines"
            )));
        }

        let mut errors = validation::validate_labor(self.hours_worked, self.hourly_rate);
        for (i, line) in self.lines.iter().enumerate() {
            errors.extend(validation::validate_invoice_line(line, i));
        }
        if !errors.is_empty() {
            return Err(FacturierError::from_validation_errors(&errors));
        }

        if self.lines.is_empty() && self.hours_worked.is_zero() {
            return Err(FacturierError::Builder(
                "a document needs at least one line or some labor".into(),
            ));
        }

        let (lines, totals) =
            calculation::compute_document(&self.lines, self.hours_worked, self.hourly_rate);

        tracing::debug!(
            document_type = %self.document_type,
            lines = lines.len(),
            total_incl_tax = %totals.total_incl_tax,
            "computed draft totals"
        );

        Ok(Draft {
            document_type: self.document_type,
            client_id: self.client_id,
            issue_date: self
                .issue_date
                .unwrap_or_else(|| Local::now().date_naive()),
            lines,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            totals,
            notes: self.notes,
        })
    }
}
