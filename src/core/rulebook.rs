//! The process-wide VAT rule book.
//!
//! Region defaults and per-jurisdiction overlays are fixed when the rule
//! book is built and never mutated afterwards. The built-in tables below
//! are the stand-in for a configuration source; see the `config` feature
//! for loading them from JSON.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::assessment::VatAssessment;
use super::engine;
use super::error::VatError;
use super::policy::{LayeredPolicies, PolicyKind, PolicySet};
use super::types::{Jurisdiction, Region};

/// EU region base rate (12.5 %).
pub const EU_BASE_RATE: Decimal = dec!(0.125);

/// US region base rate (10 %).
pub const US_BASE_RATE: Decimal = dec!(0.10);

/// Germany's base rate.
///
/// This is a raw multiplier of 15, not 15 %. Kept as-is so existing
/// results stay reproducible; see DESIGN.md.
pub const GERMANY_BASE_RATE: Decimal = dec!(15);

/// Texas base rate (12.5 %), overriding the US default.
pub const TEXAS_BASE_RATE: Decimal = dec!(0.125);

/// Defaults a region hands down to its jurisdictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRules {
    pub base_rate: Decimal,
    #[serde(default)]
    pub policies: PolicySet,
}

/// A jurisdiction's own settings, applied on top of its region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overlay {
    /// Replaces the region base rate when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<Decimal>,
    #[serde(default)]
    pub policies: PolicySet,
}

/// Fully resolved rules for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionRules {
    jurisdiction: Jurisdiction,
    base_rate: Decimal,
    policies: LayeredPolicies,
}

impl JurisdictionRules {
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn base_rate(&self) -> Decimal {
        self.base_rate
    }

    pub fn policies(&self) -> &LayeredPolicies {
        &self.policies
    }

    /// Own entry, else the parent region's entry, else `None`.
    pub fn lookup(&self, kind: PolicyKind, product: &str) -> Option<Decimal> {
        self.policies.lookup(kind, product)
    }
}

/// Immutable VAT configuration for every known jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBook {
    regions: BTreeMap<Region, RegionRules>,
    overlays: BTreeMap<Jurisdiction, Overlay>,
    rules: BTreeMap<Jurisdiction, JurisdictionRules>,
}

static STANDARD: LazyLock<RuleBook> = LazyLock::new(RuleBook::builtin);

impl RuleBook {
    /// The shared built-in rule book, constructed once per process.
    pub fn standard() -> &'static RuleBook {
        &STANDARD
    }

    /// Build a fresh copy of the built-in tables.
    pub fn builtin() -> RuleBook {
        let regions = BTreeMap::from([
            (
                Region::Eu,
                RegionRules {
                    base_rate: EU_BASE_RATE,
                    policies: PolicySet::new().with(PolicyKind::Flat, "bread", dec!(0.05)),
                },
            ),
            (
                Region::Us,
                RegionRules {
                    base_rate: US_BASE_RATE,
                    policies: PolicySet::new()
                        .with(PolicyKind::CustomRate, "dairy", dec!(0.05))
                        .with(PolicyKind::CustomRate, "milk", dec!(0.05))
                        .with(PolicyKind::Surcharge, "alcohol", dec!(0.075))
                        .with(PolicyKind::Surcharge, "beer", dec!(0.075))
                        .with(PolicyKind::Surcharge, "wine", dec!(0.075)),
                },
            ),
        ]);

        let overlays = BTreeMap::from([
            (
                Jurisdiction::Germany,
                Overlay {
                    base_rate: Some(GERMANY_BASE_RATE),
                    policies: PolicySet::new()
                        .with(PolicyKind::TaxFree, "bread", dec!(1))
                        .with(PolicyKind::CustomRate, "wine", dec!(0.20)),
                },
            ),
            (
                Jurisdiction::Uk,
                Overlay {
                    base_rate: None,
                    policies: PolicySet::new().with(PolicyKind::CustomRate, "wine", dec!(0.10)),
                },
            ),
            (
                Jurisdiction::France,
                Overlay {
                    base_rate: None,
                    policies: PolicySet::new()
                        .with(PolicyKind::TaxFree, "eggs", dec!(0.5))
                        .with(PolicyKind::CustomRate, "ale", dec!(0.175))
                        .with(PolicyKind::CustomRate, "beer", dec!(0.175))
                        .with(PolicyKind::Cap, "wine", dec!(5.0)),
                },
            ),
            (
                Jurisdiction::Texas,
                Overlay {
                    base_rate: Some(TEXAS_BASE_RATE),
                    policies: PolicySet::new()
                        .with(PolicyKind::TaxFree, "beer", dec!(1))
                        .with(PolicyKind::Flat, "bread", dec!(0.05)),
                },
            ),
            (
                Jurisdiction::Alaska,
                Overlay {
                    base_rate: None,
                    policies: PolicySet::new().with(PolicyKind::Cap, "milk", dec!(0.5)),
                },
            ),
        ]);

        // The built-in tables always satisfy the consistency checks.
        Self::assemble(regions, overlays)
    }

    /// Build a rule book from region defaults and jurisdiction overlays.
    ///
    /// Both regions must be present. Jurisdictions without an overlay
    /// inherit their region unchanged. Rates, allowances, flat amounts
    /// and caps must be non-negative.
    pub fn from_parts(
        regions: BTreeMap<Region, RegionRules>,
        overlays: BTreeMap<Jurisdiction, Overlay>,
    ) -> Result<RuleBook, VatError> {
        for region in Region::ALL {
            let rules = regions
                .get(&region)
                .ok_or_else(|| VatError::Config(format!("missing rules for region {region}")))?;
            check_non_negative(region.code(), rules.base_rate, &rules.policies)?;
        }

        for (jurisdiction, overlay) in &overlays {
            if jurisdiction.is_region() {
                return Err(VatError::Config(format!(
                    "{} is a region; set its rules under regions",
                    jurisdiction.key()
                )));
            }
            let base_rate = overlay.base_rate.unwrap_or(Decimal::ZERO);
            check_non_negative(jurisdiction.key(), base_rate, &overlay.policies)?;
        }

        Ok(Self::assemble(regions, overlays))
    }

    fn assemble(
        regions: BTreeMap<Region, RegionRules>,
        overlays: BTreeMap<Jurisdiction, Overlay>,
    ) -> RuleBook {
        let mut rules = BTreeMap::new();
        for jurisdiction in Jurisdiction::ALL {
            let Some(region) = regions.get(&jurisdiction.region()) else {
                continue;
            };
            let resolved = if jurisdiction.is_region() {
                JurisdictionRules {
                    jurisdiction,
                    base_rate: region.base_rate,
                    policies: LayeredPolicies::new(region.policies.clone(), PolicySet::new()),
                }
            } else {
                let overlay = overlays.get(&jurisdiction).cloned().unwrap_or_default();
                JurisdictionRules {
                    jurisdiction,
                    base_rate: overlay.base_rate.unwrap_or(region.base_rate),
                    policies: LayeredPolicies::new(overlay.policies, region.policies.clone()),
                }
            };
            rules.insert(jurisdiction, resolved);
        }
        RuleBook {
            regions,
            overlays,
            rules,
        }
    }

    pub fn region(&self, region: Region) -> Option<&RegionRules> {
        self.regions.get(&region)
    }

    pub fn regions(&self) -> &BTreeMap<Region, RegionRules> {
        &self.regions
    }

    pub fn overlays(&self) -> &BTreeMap<Jurisdiction, Overlay> {
        &self.overlays
    }

    pub fn rules(&self, jurisdiction: Jurisdiction) -> Option<&JurisdictionRules> {
        self.rules.get(&jurisdiction)
    }

    /// Resolve `country` and compute the full VAT assessment.
    pub fn assess(
        &self,
        country: &str,
        product: &str,
        amount: Decimal,
    ) -> Result<VatAssessment, VatError> {
        let jurisdiction = Jurisdiction::resolve(country).inspect_err(|_| {
            warn!(country, "no VAT rules for jurisdiction");
        })?;
        self.assess_in(jurisdiction, product, amount)
    }

    /// Compute the full VAT assessment for an already resolved jurisdiction.
    pub fn assess_in(
        &self,
        jurisdiction: Jurisdiction,
        product: &str,
        amount: Decimal,
    ) -> Result<VatAssessment, VatError> {
        let rules = self.rules(jurisdiction).ok_or_else(|| {
            VatError::Config(format!("no rules loaded for {}", jurisdiction.key()))
        })?;
        debug!(%jurisdiction, product, %amount, "computing VAT");
        let assessment = engine::evaluate(rules, product, amount)?;
        debug!(
            %jurisdiction,
            product,
            vat = %assessment.vat,
            taxable = %assessment.taxable_amount,
            "VAT computed"
        );
        Ok(assessment)
    }

    /// Resolve `country` and return only the VAT amount.
    pub fn compute_vat(
        &self,
        country: &str,
        product: &str,
        amount: Decimal,
    ) -> Result<Decimal, VatError> {
        self.assess(country, product, amount).map(|a| a.vat)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_non_negative(
    owner: &str,
    base_rate: Decimal,
    policies: &PolicySet,
) -> Result<(), VatError> {
    if base_rate < Decimal::ZERO {
        return Err(VatError::Config(format!(
            "negative base rate {base_rate} for {owner}"
        )));
    }
    for (kind, product, value) in policies.entries() {
        if value < Decimal::ZERO {
            return Err(VatError::Config(format!(
                "negative {kind} value {value} for '{product}' in {owner}"
            )));
        }
    }
    Ok(())
}
