//! Per-jurisdiction VAT computation.
//!
//! Every jurisdiction applies a fixed subset of the policy kinds in a fixed
//! order. The [`Precedence`] constants below are the single place where
//! those orders are defined:
//!
//! 1. Tax-free allowance reduces the amount to a taxable amount.
//!    A taxable amount of zero or less means no VAT and nothing else applies.
//! 2. Flat amount, else custom rate, else the fallback (base rate or slabs).
//! 3. Cap clamps the VAT.
//! 4. Surcharge adds `taxable × rate` after the cap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::assessment::{AppliedPolicy, VatAssessment};
use super::error::VatError;
use super::policy::PolicyKind;
use super::rulebook::{JurisdictionRules, RuleBook};
use super::types::Jurisdiction;

/// One band of a tiered VAT schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab {
    /// Inclusive upper bound of the band; `None` for the open top band.
    pub upper: Option<Decimal>,
    /// Band rate; `None` uses the jurisdiction base rate.
    pub rate: Option<Decimal>,
}

/// UK tiered schedule: first 20 at the base rate, up to 100 at 15 %,
/// everything above at 20 %.
pub const UK_SLABS: &[Slab] = &[
    Slab {
        upper: Some(dec!(20)),
        rate: None,
    },
    Slab {
        upper: Some(dec!(100)),
        rate: Some(dec!(0.15)),
    },
    Slab {
        upper: None,
        rate: Some(dec!(0.20)),
    },
];

#[derive(Debug, Clone, Copy)]
enum Fallback {
    BaseRate,
    Slabs(&'static [Slab]),
}

#[derive(Debug, Clone, Copy)]
struct Precedence {
    policies: &'static [PolicyKind],
    fallback: Fallback,
}

const GERMANY: Precedence = Precedence {
    policies: &[PolicyKind::TaxFree, PolicyKind::Flat, PolicyKind::CustomRate],
    fallback: Fallback::BaseRate,
};

const UK: Precedence = Precedence {
    policies: &[PolicyKind::CustomRate],
    fallback: Fallback::Slabs(UK_SLABS),
};

const FRANCE: Precedence = Precedence {
    policies: &[PolicyKind::TaxFree, PolicyKind::CustomRate, PolicyKind::Cap],
    fallback: Fallback::BaseRate,
};

const TEXAS: Precedence = Precedence {
    policies: &[PolicyKind::TaxFree, PolicyKind::Flat, PolicyKind::Surcharge],
    fallback: Fallback::BaseRate,
};

const ALASKA: Precedence = Precedence {
    policies: &[PolicyKind::Cap],
    fallback: Fallback::BaseRate,
};

fn precedence(jurisdiction: Jurisdiction) -> Result<Precedence, VatError> {
    match jurisdiction {
        Jurisdiction::Eu | Jurisdiction::Us => Err(VatError::RegionOnly(jurisdiction.region())),
        Jurisdiction::Germany => Ok(GERMANY),
        Jurisdiction::Uk => Ok(UK),
        Jurisdiction::France => Ok(FRANCE),
        Jurisdiction::Texas => Ok(TEXAS),
        Jurisdiction::Alaska => Ok(ALASKA),
    }
}

/// Compute VAT for `product` and `amount` under resolved jurisdiction rules.
pub(crate) fn evaluate(
    rules: &JurisdictionRules,
    product: &str,
    amount: Decimal,
) -> Result<VatAssessment, VatError> {
    let order = precedence(rules.jurisdiction())?;
    let policy = |kind: PolicyKind| {
        if order.policies.contains(&kind) {
            rules.lookup(kind, product)
        } else {
            None
        }
    };

    let mut applied = Vec::new();
    let mut taxable = amount;
    if let Some(allowance) = policy(PolicyKind::TaxFree) {
        // Allowances are non-negative, so only a non-taxable amount can saturate
        taxable = amount.saturating_sub(allowance);
        applied.push(AppliedPolicy::TaxFree { allowance });
    }

    let mut vat = Decimal::ZERO;
    if taxable > Decimal::ZERO {
        vat = if let Some(flat) = policy(PolicyKind::Flat) {
            applied.push(AppliedPolicy::Flat { vat: flat });
            flat
        } else if let Some(rate) = policy(PolicyKind::CustomRate) {
            applied.push(AppliedPolicy::CustomRate { rate });
            checked(taxable.checked_mul(rate), "custom rate VAT")?
        } else {
            match order.fallback {
                Fallback::BaseRate => {
                    let rate = rules.base_rate();
                    applied.push(AppliedPolicy::BaseRate { rate });
                    checked(taxable.checked_mul(rate), "base rate VAT")?
                }
                Fallback::Slabs(slabs) => {
                    slab_vat(slabs, taxable, rules.base_rate(), &mut applied)?
                }
            }
        };

        if let Some(cap) = policy(PolicyKind::Cap) {
            if vat > cap {
                applied.push(AppliedPolicy::Cap { cap, uncapped: vat });
                vat = cap;
            }
        }

        if let Some(rate) = policy(PolicyKind::Surcharge) {
            let surcharge = checked(taxable.checked_mul(rate), "surcharge")?;
            applied.push(AppliedPolicy::Surcharge {
                rate,
                vat: surcharge,
            });
            vat = checked(vat.checked_add(surcharge), "VAT with surcharge")?;
        }
    }

    Ok(VatAssessment {
        jurisdiction: rules.jurisdiction(),
        product: product.to_string(),
        amount,
        taxable_amount: taxable,
        vat,
        applied,
    })
}

fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal, VatError> {
    value.ok_or_else(|| VatError::Arithmetic(format!("{what} overflows the decimal range")))
}

/// Sum each band's share of `taxable` at the band rate.
fn slab_vat(
    slabs: &[Slab],
    taxable: Decimal,
    base_rate: Decimal,
    applied: &mut Vec<AppliedPolicy>,
) -> Result<Decimal, VatError> {
    let mut vat = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for slab in slabs {
        if taxable <= lower {
            break;
        }
        let upper = slab.upper.map_or(taxable, |u| u.min(taxable));
        let rate = slab.rate.unwrap_or(base_rate);
        let band = checked((upper - lower).checked_mul(rate), "slab VAT")?;
        applied.push(AppliedPolicy::Slab {
            lower,
            upper: slab.upper,
            rate,
            vat: band,
        });
        vat = checked(vat.checked_add(band), "slab VAT")?;
        match slab.upper {
            Some(u) => lower = u,
            None => break,
        }
    }
    Ok(vat)
}

/// Compute the full VAT assessment with the standard rule book.
///
/// ```
/// use rust_decimal_macros::dec;
/// use vatrules::core::*;
///
/// let a = assess("France", "wine", dec!(100)).unwrap();
/// assert_eq!(a.vat, dec!(5.0));
/// assert!(matches!(a.applied.last(), Some(AppliedPolicy::Cap { .. })));
/// ```
pub fn assess(country: &str, product: &str, amount: Decimal) -> Result<VatAssessment, VatError> {
    RuleBook::standard().assess(country, product, amount)
}

/// Compute the VAT amount with the standard rule book.
///
/// Unknown jurisdictions return [`VatError::UnknownJurisdiction`], never a
/// zero VAT.
pub fn compute_vat(country: &str, product: &str, amount: Decimal) -> Result<Decimal, VatError> {
    RuleBook::standard().compute_vat(country, product, amount)
}
