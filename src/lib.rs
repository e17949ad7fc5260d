//! # vatrules
//!
//! Jurisdiction-aware VAT calculation for a purchased product.
//!
//! Each jurisdiction belongs to a parent region (EU or US) that supplies a
//! base rate and default policy tables. A jurisdiction layers its own
//! tables on top and applies a fixed precedence over five policies:
//! tax-free allowances, flat amounts, custom rates, caps and surcharges.
//!
//! All monetary values and rates use [`rust_decimal::Decimal`], never floating point.
//! Rates are fractions, so `0.125` means 12.5 %.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use vatrules::core::*;
//!
//! assert_eq!(compute_vat("Germany", "wine", dec!(100)).unwrap(), dec!(20));
//! assert_eq!(compute_vat("uk", "jeans", dec!(150)).unwrap(), dec!(24.5));
//!
//! // Unknown jurisdictions are an error, never a silent zero.
//! assert!(matches!(
//!     compute_vat("Scotland", "whisky", dec!(10)),
//!     Err(VatError::UnknownJurisdiction(_))
//! ));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Policy tables, rule book, jurisdiction resolver, VAT engine |
//! | `config` | Load or export a rule book as JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "config")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
