use chrono::{Datelike, Local};

use super::error::FacturierError;
use super::settings::TenantSettings;
use super::types::DocumentType;

/// Minimum width of the sequence part; longer sequences are never truncated.
pub const SEQUENCE_WIDTH: usize = 4;

/// Format a document number as `{prefix}-{year}-{sequence}`, e.g. "FA-2025-0001".
///
/// `year` defaults to the current local calendar year. This only formats;
/// advancing the tenant's counter after the document is persisted is the
/// caller's job (see `DocumentStore::create_document` with the `store` feature).
///
/// ```
/// use facturier::core::*;
///
/// assert_eq!(generate_number(DocumentType::Invoice, "FA", 1, Some(2025)), "FA-2025-0001");
/// assert_eq!(generate_number(DocumentType::Invoice, "FA", 12345, Some(2025)), "FA-2025-12345");
/// ```
pub fn generate_number(
    document_type: DocumentType,
    prefix: &str,
    next_sequence: u64,
    year: Option<i32>,
) -> String {
    let year = year.unwrap_or_else(|| Local::now().year());
    let number = format!(
        "{}-{}-{:0>width$}",
        prefix,
        year,
        next_sequence,
        width = SEQUENCE_WIDTH
    );
    tracing::debug!(%document_type, %number, "generated document number");
    number
}

/// Number the tenant's next document of the given type.
///
/// Always uses the prefix configured for that type: the invoice prefix for
/// invoices, the quote prefix for quotes.
pub fn document_number_for(
    settings: &TenantSettings,
    document_type: DocumentType,
    year: Option<i32>,
) -> String {
    generate_number(
        document_type,
        settings.prefix_for(document_type),
        settings.next_sequence(document_type),
        year,
    )
}

/// Components of a document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    pub prefix: String,
    pub year: i32,
    pub sequence: u64,
}

/// Split a document number produced by [`generate_number`] back into its parts.
///
/// The prefix may itself contain `-`; year and sequence are taken from the
/// last two segments.
pub fn parse_number(number: &str) -> Result<ParsedNumber, FacturierError> {
    let mut parts = number.rsplitn(3, '-');
    let (Some(sequence), Some(year), Some(prefix)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FacturierError::Numbering(format!(
            "'{number}' is not of the form PREFIX-YEAR-SEQUENCE"
        )));
    };

    if prefix.is_empty() {
        return Err(FacturierError::Numbering(format!(
            "'{number}' has an empty prefix"
        )));
    }
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(FacturierError::Numbering(format!(
            "'{number}' has an invalid year '{year}'"
        )));
    }
    if sequence.len() < SEQUENCE_WIDTH || !sequence.chars().all(|c| c.is_ascii_digit()) {
        return Err(FacturierError::Numbering(format!(
            "'{number}' has an invalid sequence '{sequence}'"
        )));
    }

    let year = year
        .parse::<i32>()
        .map_err(|e| FacturierError::Numbering(format!("'{number}': {e}")))?;
    let sequence = sequence
        .parse::<u64>()
        .map_err(|e| FacturierError::Numbering(format!("'{number}': {e}")))?;

    Ok(ParsedNumber {
        prefix: prefix.to_string(),
        year,
        sequence,
    })
}
