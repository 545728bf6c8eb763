//! # facturier
//!
//! Invoicing core of a multi-tenant garage management application:
//! quote and invoice totals (HT, TVA, TTC), French legal document
//! numbering, request validation, and tenant-scoped document storage.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use facturier::core::*;
//! use rust_decimal_macros::dec;
//!
//! let line = InvoiceLine {
//!     line_type: LineType::Part,
//!     description: "Plaquettes de frein".into(),
//!     quantity: dec!(2),
//!     unit_price_excl_tax: dec!(15.00),
//!     tax_rate_percent: dec!(20),
//! };
//!
//! let totals = compute_totals(&[line], dec!(1.5), dec!(50));
//! assert_eq!(totals.total_excl_tax, dec!(105.00));
//! assert_eq!(totals.total_tax, dec!(21.00));
//! assert_eq!(totals.total_incl_tax, dec!(126.00));
//!
//! assert_eq!(generate_number(DocumentType::Invoice, "FA", 1, Some(2025)), "FA-2025-0001");
//! assert_eq!(format_eur(totals.total_incl_tax), "126,00\u{A0}€");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals, numbering, validation, display |
//! | `json` | Decoding of JSON request bodies and tenant settings |
//! | `store` | `DocumentStore` trait and in-memory implementation |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "store")]
pub mod store;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
