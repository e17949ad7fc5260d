use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::VatError;

/// Parent region supplying a base rate and default policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// European Union.
    Eu,
    /// United States.
    Us,
}

impl Region {
    /// All regions, in lookup order.
    pub const ALL: [Region; 2] = [Region::Eu, Region::Us];

    /// Upper-case region code ("EU", "US").
    pub fn code(self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Us => "US",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A jurisdiction the resolver knows about.
///
/// The two region variants resolve like any other name but carry no
/// standalone VAT computation; see [`VatError::RegionOnly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    /// European Union as a whole.
    Eu,
    /// United States as a whole.
    Us,
    /// Germany (EU).
    Germany,
    /// United Kingdom, taxed in bands (EU rule set).
    Uk,
    /// France (EU).
    France,
    /// Texas (US).
    Texas,
    /// Alaska (US).
    Alaska,
}

impl Jurisdiction {
    /// Every resolvable jurisdiction, regions first.
    pub const ALL: [Jurisdiction; 7] = [
        Jurisdiction::Eu,
        Jurisdiction::Us,
        Jurisdiction::Germany,
        Jurisdiction::Uk,
        Jurisdiction::France,
        Jurisdiction::Texas,
        Jurisdiction::Alaska,
    ];

    /// Resolve a jurisdiction by name.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn resolve(name: &str) -> Result<Self, VatError> {
        let key = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|j| j.key() == key)
            .ok_or_else(|| VatError::UnknownJurisdiction(name.trim().to_string()))
    }

    /// Upper-case lookup key ("GERMANY", "UK", ...).
    pub fn key(self) -> &'static str {
        match self {
            Jurisdiction::Eu => "EU",
            Jurisdiction::Us => "US",
            Jurisdiction::Germany => "GERMANY",
            Jurisdiction::Uk => "UK",
            Jurisdiction::France => "FRANCE",
            Jurisdiction::Texas => "TEXAS",
            Jurisdiction::Alaska => "ALASKA",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::Eu => "EU",
            Jurisdiction::Us => "US",
            Jurisdiction::Germany => "Germany",
            Jurisdiction::Uk => "UK",
            Jurisdiction::France => "France",
            Jurisdiction::Texas => "Texas",
            Jurisdiction::Alaska => "Alaska",
        }
    }

    /// The parent region. Region variants are their own region.
    pub fn region(self) -> Region {
        match self {
            Jurisdiction::Eu | Jurisdiction::Germany | Jurisdiction::Uk | Jurisdiction::France => {
                Region::Eu
            }
            Jurisdiction::Us | Jurisdiction::Texas | Jurisdiction::Alaska => Region::Us,
        }
    }

    /// Whether this is a bare region entry rather than a jurisdiction
    /// with its own computation.
    pub fn is_region(self) -> bool {
        matches!(self, Jurisdiction::Eu | Jurisdiction::Us)
    }

    /// ISO 4217 code of the currency amounts are expressed in.
    ///
    /// Informational only: amounts are never converted.
    pub fn currency_code(self) -> &'static str {
        match self {
            Jurisdiction::Uk => "GBP",
            _ => match self.region() {
                Region::Eu => "EUR",
                Region::Us => "USD",
            },
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Jurisdiction {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}
