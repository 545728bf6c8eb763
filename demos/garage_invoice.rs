//! Quote a brake job, convert it to an invoice once the customer accepts,
//! and print the amounts.
//!
//! Run with: `cargo run --example garage_invoice --features store`

use chrono::NaiveDate;
use facturier::core::*;
use facturier::store::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, FacturierError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| FacturierError::Builder(format!("invalid date {y}-{m}-{d}")))
}

fn main() -> Result<(), FacturierError> {
    let store = InMemoryStore::new();
    let tenant = store.create_tenant(
        "Garage du Centre",
        TenantSettings {
            default_hourly_rate: dec!(58),
            ..TenantSettings::default()
        },
    )?;

    let quote = DraftBuilder::new(DocumentType::Quote, "client-dupont")
        .issue_date(date(2025, 3, 10)?)
        .labor(dec!(1.5), tenant.settings.default_hourly_rate)
        .add_line(InvoiceLine {
            line_type: LineType::Part,
            description: "Plaquettes de frein avant".into(),
            quantity: dec!(1),
            unit_price_excl_tax: dec!(42.90),
            tax_rate_percent: dec!(20),
        })
        .add_line(InvoiceLine {
            line_type: LineType::Part,
            description: "Disques de frein avant".into(),
            quantity: dec!(2),
            unit_price_excl_tax: dec!(38.50),
            tax_rate_percent: dec!(20),
        })
        .note("Devis valable 30 jours")
        .build()?;

    let quote = store.create_document(tenant.id, quote)?;
    println!("Devis {}", quote.number);
    for line in &quote.lines {
        println!(
            "  {:<30} {:>8} x {:>12} = {:>12}",
            line.line.description,
            line.line.quantity,
            format_eur(line.line.unit_price_excl_tax),
            format_eur(line.total_excl_tax)
        );
    }
    println!("  Main d'oeuvre HT : {}", format_eur(quote.totals.labor_excl_tax));
    println!("  Total HT         : {}", format_eur(quote.totals.total_excl_tax));
    println!("  TVA              : {}", format_eur(quote.totals.total_tax));
    println!("  Total TTC        : {}", format_eur(quote.totals.total_incl_tax));

    let invoice = store.convert_quote(
        tenant.id,
        quote.id,
        date(2025, 3, 12)?,
    )?;
    println!(
        "Facture {} (depuis {}) : {}",
        invoice.number,
        quote.number,
        format_eur(invoice.totals.total_incl_tax)
    );

    Ok(())
}
