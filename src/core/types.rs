use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of charge carried by an invoice or quote line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineType {
    /// Spare part (pièce).
    Part,
    /// Labor billed as a line rather than through the hourly labor fields.
    Labor,
    /// Flat fee (forfait).
    FlatFee,
    /// Discount (remise). Computed like any other line.
    Discount,
}

impl LineType {
    /// Wire code, as sent by the client.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Part => "PART",
            Self::Labor => "LABOR",
            Self::FlatFee => "FLAT_FEE",
            Self::Discount => "DISCOUNT",
        }
    }

    /// Parse from the wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PART" => Some(Self::Part),
            "LABOR" => Some(Self::Labor),
            "FLAT_FEE" => Some(Self::FlatFee),
            "DISCOUNT" => Some(Self::Discount),
            _ => None,
        }
    }
}

/// A validated invoice line, before any amounts are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub description: String,
    /// At least 0.001.
    pub quantity: Decimal,
    /// Unit price excluding tax (HT), never negative.
    pub unit_price_excl_tax: Decimal,
    /// Tax rate in percent, within [0, 100].
    pub tax_rate_percent: Decimal,
}

/// An invoice line together with its derived amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLine {
    #[serde(flatten)]
    pub line: InvoiceLine,
    /// HT amount, rounded to 2 dp.
    pub total_excl_tax: Decimal,
    /// Tax amount, rounded to 2 dp.
    pub total_tax: Decimal,
    /// TTC amount, recomputed from the two rounded components.
    pub total_incl_tax: Decimal,
}

/// Whole-document totals: labor plus every computed line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub total_excl_tax: Decimal,
    pub total_tax: Decimal,
    pub total_incl_tax: Decimal,
    pub labor_excl_tax: Decimal,
    pub parts_excl_tax: Decimal,
    /// Tax on labor at the fixed labor rate.
    pub labor_tax: Decimal,
    /// Sum of the per-line tax amounts.
    pub lines_tax: Decimal,
}

impl InvoiceTotals {
    /// Totals of an empty document.
    pub fn zero() -> Self {
        Self {
            total_excl_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_incl_tax: Decimal::ZERO,
            labor_excl_tax: Decimal::ZERO,
            parts_excl_tax: Decimal::ZERO,
            labor_tax: Decimal::ZERO,
            lines_tax: Decimal::ZERO,
        }
    }
}

/// The two numbered document kinds, each with its own per-tenant counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Facture.
    Invoice,
    /// Devis.
    Quote,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "INVOICE",
            Self::Quote => "QUOTE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INVOICE" => Some(Self::Invoice),
            "QUOTE" => Some(Self::Quote),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated, fully computed quote or invoice that has not been numbered yet.
///
/// Produced by [`DraftBuilder`](super::DraftBuilder); the store assigns the
/// number when it persists the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub document_type: DocumentType,
    pub client_id: String,
    pub issue_date: NaiveDate,
    pub lines: Vec<ComputedLine>,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub totals: InvoiceTotals,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_type_codes_round_trip() {
        for t in [
            LineType::Part,
            LineType::Labor,
            LineType::FlatFee,
            LineType::Discount,
        ] {
            assert_eq!(LineType::from_code(t.code()), Some(t));
        }
        assert_eq!(LineType::from_code("part"), None);
    }

    #[test]
    fn document_type_display() {
        assert_eq!(DocumentType::Quote.to_string(), "QUOTE");
        assert_eq!(DocumentType::from_code("INVOICE"), Some(DocumentType::Invoice));
        assert_eq!(DocumentType::from_code("CREDIT_NOTE"), None);
    }
}
