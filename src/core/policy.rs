//! Per-product policy tables and region/jurisdiction layering.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The tax treatments a policy table can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Amount exempt from tax before the rate applies to the remainder.
    TaxFree,
    /// Fixed VAT amount regardless of quantity.
    Flat,
    /// Product-specific rate replacing the base rate.
    CustomRate,
    /// Upper bound on the computed VAT.
    Cap,
    /// Additional rate charged on top of the computed VAT.
    Surcharge,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::TaxFree,
        PolicyKind::Flat,
        PolicyKind::CustomRate,
        PolicyKind::Cap,
        PolicyKind::Surcharge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::TaxFree => "tax_free",
            PolicyKind::Flat => "flat",
            PolicyKind::CustomRate => "custom_rate",
            PolicyKind::Cap => "cap",
            PolicyKind::Surcharge => "surcharge",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product name (case-sensitive) to policy parameter.
pub type PolicyTable = BTreeMap<String, Decimal>;

/// One table per policy kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySet {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tax_free: PolicyTable,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub flat: PolicyTable,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_rate: PolicyTable,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cap: PolicyTable,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub surcharge: PolicyTable,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, builder style.
    pub fn with(mut self, kind: PolicyKind, product: impl Into<String>, value: Decimal) -> Self {
        self.insert(kind, product, value);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, kind: PolicyKind, product: impl Into<String>, value: Decimal) {
        self.table_mut(kind).insert(product.into(), value);
    }

    pub fn table(&self, kind: PolicyKind) -> &PolicyTable {
        match kind {
            PolicyKind::TaxFree => &self.tax_free,
            PolicyKind::Flat => &self.flat,
            PolicyKind::CustomRate => &self.custom_rate,
            PolicyKind::Cap => &self.cap,
            PolicyKind::Surcharge => &self.surcharge,
        }
    }

    fn table_mut(&mut self, kind: PolicyKind) -> &mut PolicyTable {
        match kind {
            PolicyKind::TaxFree => &mut self.tax_free,
            PolicyKind::Flat => &mut self.flat,
            PolicyKind::CustomRate => &mut self.custom_rate,
            PolicyKind::Cap => &mut self.cap,
            PolicyKind::Surcharge => &mut self.surcharge,
        }
    }

    pub fn get(&self, kind: PolicyKind, product: &str) -> Option<Decimal> {
        self.table(kind).get(product).copied()
    }

    pub fn is_empty(&self) -> bool {
        PolicyKind::ALL.iter().all(|k| self.table(*k).is_empty())
    }

    /// Iterate over every `(kind, product, value)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (PolicyKind, &str, Decimal)> + '_ {
        PolicyKind::ALL.into_iter().flat_map(move |kind| {
            self.table(kind)
                .iter()
                .map(move |(product, value)| (kind, product.as_str(), *value))
        })
    }
}

/// A jurisdiction's own policies layered over its parent region's defaults.
///
/// Lookup returns the jurisdiction's own entry if present, else the
/// parent region's entry, else nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredPolicies {
    own: PolicySet,
    parent: PolicySet,
}

impl LayeredPolicies {
    pub fn new(own: PolicySet, parent: PolicySet) -> Self {
        Self { own, parent }
    }

    pub fn lookup(&self, kind: PolicyKind, product: &str) -> Option<Decimal> {
        self.own
            .get(kind, product)
            .or_else(|| self.parent.get(kind, product))
    }

    pub fn own(&self) -> &PolicySet {
        &self.own
    }

    pub fn parent(&self) -> &PolicySet {
        &self.parent
    }

    /// Flatten both layers into a single set, own entries winning.
    pub fn effective(&self) -> PolicySet {
        let mut merged = self.parent.clone();
        for (kind, product, value) in self.own.entries() {
            merged.insert(kind, product, value);
        }
        merged
    }
}
