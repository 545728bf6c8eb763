//! Property-based tests for totals and numbering.

use facturier::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a unit price (0.00 to 9999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a quantity (0.001 to 100.000).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u64..=100_000u64).prop_map(|milli| Decimal::new(milli as i64, 3))
}

/// Generate a French VAT rate, or any rate with up to one decimal.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(20)),
        Just(dec!(10)),
        Just(dec!(5.5)),
        Just(dec!(2.1)),
        Just(dec!(0)),
        (0u32..=1000u32).prop_map(|r| Decimal::new(r as i64, 1)),
    ]
}

/// Generate hours or rates (0.00 to 999.99).
fn arb_labor() -> impl Strategy<Value = Decimal> {
    (0u64..100_000u64).prop_map(|v| Decimal::new(v as i64, 2))
}

fn arb_line_type() -> impl Strategy<Value = LineType> {
    prop_oneof![
        Just(LineType::Part),
        Just(LineType::Labor),
        Just(LineType::FlatFee),
        Just(LineType::Discount),
    ]
}

fn arb_line() -> impl Strategy<Value = InvoiceLine> {
    (arb_line_type(), arb_quantity(), arb_price(), arb_rate()).prop_map(
        |(line_type, quantity, unit_price_excl_tax, tax_rate_percent)| InvoiceLine {
            line_type,
            description: "Article".into(),
            quantity,
            unit_price_excl_tax,
            tax_rate_percent,
        },
    )
}

fn arb_lines() -> impl Strategy<Value = Vec<InvoiceLine>> {
    prop::collection::vec(arb_line(), 0..=8)
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// TTC of a line is the rounded sum of its rounded HT and tax.
    #[test]
    fn line_incl_tax_is_sum_of_parts(line in arb_line()) {
        let c = compute_line(&line);
        prop_assert_eq!(c.total_incl_tax, round2(c.total_excl_tax + c.total_tax));
        prop_assert_eq!(c.total_excl_tax, round2(c.total_excl_tax));
        prop_assert_eq!(c.total_tax, round2(c.total_tax));
    }

    /// Without lines, the HT total is the rounded labor amount.
    #[test]
    fn labor_only_totals(hours in arb_labor(), rate in arb_labor()) {
        let t = compute_totals(&[], hours, rate);
        prop_assert_eq!(t.total_excl_tax, round2(hours * rate));
        prop_assert_eq!(t.parts_excl_tax, Decimal::ZERO);
        prop_assert_eq!(t.lines_tax, Decimal::ZERO);
    }

    /// No hidden state: identical inputs give identical totals.
    #[test]
    fn totals_are_deterministic(lines in arb_lines(), hours in arb_labor(), rate in arb_labor()) {
        let a = compute_totals(&lines, hours, rate);
        let b = compute_totals(&lines, hours, rate);
        prop_assert_eq!(a, b);
    }

    /// Document totals are built from rounded components.
    #[test]
    fn totals_are_consistent(lines in arb_lines(), hours in arb_labor(), rate in arb_labor()) {
        let t = compute_totals(&lines, hours, rate);
        prop_assert_eq!(t.total_excl_tax, t.labor_excl_tax + t.parts_excl_tax);
        prop_assert_eq!(t.total_tax, t.labor_tax + t.lines_tax);
        prop_assert_eq!(t.total_incl_tax, t.total_excl_tax + t.total_tax);
        prop_assert_eq!(t.labor_tax, round2(t.labor_excl_tax * dec!(0.20)));
    }

    /// Summing unrounded lines differs from the line-rounded total by at most
    /// half a cent per line.
    #[test]
    fn line_rounding_drift_is_bounded(lines in arb_lines()) {
        let t = compute_totals(&lines, Decimal::ZERO, Decimal::ZERO);
        let exact: Decimal = lines.iter().map(|l| l.quantity * l.unit_price_excl_tax).sum();
        let bound = dec!(0.005) * Decimal::from(lines.len() + 1);
        prop_assert!((t.parts_excl_tax - exact).abs() <= bound);
    }

    /// Consecutive sequences produce increasing numbers within a year,
    /// and every number parses back.
    #[test]
    fn numbering_is_monotonic(seq in 1u64..9_999u64, year in 2000i32..2100i32) {
        let a = generate_number(DocumentType::Invoice, "FA", seq, Some(year));
        let b = generate_number(DocumentType::Invoice, "FA", seq + 1, Some(year));
        prop_assert!(a < b);

        let parsed = parse_number(&b).unwrap();
        prop_assert_eq!(parsed.prefix, "FA");
        prop_assert_eq!(parsed.year, year);
        prop_assert_eq!(parsed.sequence, seq + 1);
    }

    /// Wide sequences are never truncated.
    #[test]
    fn numbering_never_truncates(seq in 0u64..u64::MAX) {
        let n = generate_number(DocumentType::Quote, "DE", seq, Some(2025));
        prop_assert!(n.ends_with(&seq.to_string()));
        prop_assert!(n.len() >= "DE-2025-".len() + 4);
    }
}
