use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use facturier::core::*;

fn lines(count: usize) -> Vec<InvoiceLine> {
    (1..=count)
        .map(|i| InvoiceLine {
            line_type: if i % 5 == 0 {
                LineType::FlatFee
            } else {
                LineType::Part
            },
            description: format!("Pièce {i}"),
            quantity: dec!(3),
            unit_price_excl_tax: dec!(17.35),
            tax_rate_percent: if i % 3 == 0 { dec!(5.5) } else { dec!(20) },
        })
        .collect()
}

fn bench_totals(c: &mut Criterion) {
    let small = lines(10);
    let large = lines(500);

    c.bench_function("compute_totals_10_lines", |b| {
        b.iter(|| compute_totals(black_box(&small), dec!(2.5), dec!(58)))
    });

    c.bench_function("compute_totals_500_lines", |b| {
        b.iter(|| compute_totals(black_box(&large), dec!(2.5), dec!(58)))
    });
}

fn bench_numbering(c: &mut Criterion) {
    c.bench_function("generate_number", |b| {
        b.iter(|| generate_number(DocumentType::Invoice, "FA", black_box(1234), Some(2025)))
    });

    c.bench_function("format_eur", |b| {
        b.iter(|| format_eur(black_box(dec!(1234567.891))))
    });
}

criterion_group!(benches, bench_totals, bench_numbering);
criterion_main!(benches);
