//! French-locale rendering of monetary amounts ("1 234,56 €").

use rust_decimal::Decimal;

use super::calculation::round2;

/// Narrow no-break space, the fr-FR thousands separator.
const GROUP_SEPARATOR: char = '\u{202F}';
/// No-break space between the amount and the currency symbol.
const SYMBOL_SEPARATOR: char = '\u{00A0}';

/// Sorted by ISO code for binary search.
static CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("CHF", "CHF"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("USD", "$"),
    ("XPF", "F"),
];

/// Display symbol for an ISO 4217 code, falling back to the code itself.
pub fn currency_symbol(code: &str) -> &str {
    match CURRENCY_SYMBOLS.binary_search_by(|(c, _)| c.cmp(&code)) {
        Ok(i) => CURRENCY_SYMBOLS[i].1,
        Err(_) => code,
    }
}

/// Render an amount in euros.
///
/// ```
/// use facturier::core::format_eur;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_eur(dec!(1234.5)), "1\u{202F}234,50\u{A0}€");
/// ```
pub fn format_eur(value: Decimal) -> String {
    format_amount(value, "EUR")
}

/// Render an amount with two decimals, grouped thousands and the currency symbol.
pub fn format_amount(value: Decimal, currency_code: &str) -> String {
    let mut rounded = round2(value);
    let negative = rounded < Decimal::ZERO;
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + 8);
    if negative {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(frac_part);
    out.push(SYMBOL_SEPARATOR);
    out.push_str(currency_symbol(currency_code));
    out
}
