//! Line and document totals.
//!
//! Every derived amount is rounded to two decimals at the step that produces
//! it, so line totals are rounded before they are summed. The sum of rounded
//! lines can therefore differ by a cent from an unrounded computation.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::{ComputedLine, InvoiceLine, InvoiceTotals};

/// Tax rate applied to hourly labor, whatever the rates on the lines.
pub const LABOR_TAX_RATE: Decimal = dec!(0.20);

/// Round to 2 decimal places using half-up (commercial rounding).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the HT, tax and TTC amounts of a single line.
///
/// ```
/// use facturier::core::*;
/// use rust_decimal_macros::dec;
///
/// let line = InvoiceLine {
///     line_type: LineType::Part,
///     description: "Plaquettes de frein".into(),
///     quantity: dec!(2),
///     unit_price_excl_tax: dec!(15.00),
///     tax_rate_percent: dec!(20),
/// };
/// let computed = compute_line(&line);
/// assert_eq!(computed.total_excl_tax, dec!(30.00));
/// assert_eq!(computed.total_tax, dec!(6.00));
/// assert_eq!(computed.total_incl_tax, dec!(36.00));
/// ```
pub fn compute_line(line: &InvoiceLine) -> ComputedLine {
    let total_excl_tax = round2(line.quantity * line.unit_price_excl_tax);
    let total_tax = round2(total_excl_tax * line.tax_rate_percent / dec!(100));
    let total_incl_tax = round2(total_excl_tax + total_tax);

    ComputedLine {
        line: line.clone(),
        total_excl_tax,
        total_tax,
        total_incl_tax,
    }
}

/// Sum labor and all lines into document totals.
pub fn compute_totals(
    lines: &[InvoiceLine],
    hours_worked: Decimal,
    hourly_rate: Decimal,
) -> InvoiceTotals {
    compute_document(lines, hours_worked, hourly_rate).1
}

/// Like [`compute_totals`], also returning the computed lines so they can be
/// persisted next to the totals.
pub fn compute_document(
    lines: &[InvoiceLine],
    hours_worked: Decimal,
    hourly_rate: Decimal,
) -> (Vec<ComputedLine>, InvoiceTotals) {
    let computed: Vec<ComputedLine> = lines.iter().map(compute_line).collect();
    let totals = aggregate(&computed, hours_worked, hourly_rate);
    (computed, totals)
}

/// Aggregate already computed lines with labor.
pub fn aggregate(
    computed: &[ComputedLine],
    hours_worked: Decimal,
    hourly_rate: Decimal,
) -> InvoiceTotals {
    let labor_excl_tax = round2(hours_worked * hourly_rate);
    let parts_excl_tax = round2(computed.iter().map(|l| l.total_excl_tax).sum());
    let total_excl_tax = round2(labor_excl_tax + parts_excl_tax);

    let labor_tax = round2(labor_excl_tax * LABOR_TAX_RATE);
    let lines_tax = round2(computed.iter().map(|l| l.total_tax).sum());
    let total_tax = round2(labor_tax + lines_tax);

    let total_incl_tax = round2(total_excl_tax + total_tax);

    InvoiceTotals {
        total_excl_tax,
        total_tax,
        total_incl_tax,
        labor_excl_tax,
        parts_excl_tax,
        labor_tax,
        lines_tax,
    }
}
