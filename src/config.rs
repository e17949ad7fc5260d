//! JSON configuration for the rule book.
//!
//! Region defaults and jurisdiction overlays can be loaded from a JSON
//! document instead of the built-in tables. Decimals are written as
//! strings to avoid float rounding.
//!
//! ```json
//! {
//!   "regions": {
//!     "EU": { "base_rate": "0.125", "policies": { "flat": { "bread": "0.05" } } },
//!     "US": { "base_rate": "0.10" }
//!   },
//!   "jurisdictions": {
//!     "FRANCE": { "policies": { "cap": { "wine": "5.0" } } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Jurisdiction, Overlay, Region, RegionRules, RuleBook, VatError};

/// Serialized form of a [`RuleBook`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleBookDocument {
    pub regions: BTreeMap<Region, RegionRules>,
    #[serde(default)]
    pub jurisdictions: BTreeMap<Jurisdiction, Overlay>,
}

impl RuleBookDocument {
    /// Validate and build the rule book.
    pub fn into_rule_book(self) -> Result<RuleBook, VatError> {
        RuleBook::from_parts(self.regions, self.jurisdictions)
    }
}

impl From<&RuleBook> for RuleBookDocument {
    fn from(book: &RuleBook) -> Self {
        Self {
            regions: book.regions().clone(),
            jurisdictions: book.overlays().clone(),
        }
    }
}

/// Load a rule book from a JSON document.
pub fn from_json(json: &str) -> Result<RuleBook, VatError> {
    let doc: RuleBookDocument =
        serde_json::from_str(json).map_err(|e| VatError::Config(e.to_string()))?;
    let book = doc.into_rule_book()?;
    tracing::debug!(
        overlays = book.overlays().len(),
        "loaded rule book from configuration"
    );
    Ok(book)
}

/// Export a rule book as pretty-printed JSON.
pub fn to_json(book: &RuleBook) -> Result<String, VatError> {
    serde_json::to_string_pretty(&RuleBookDocument::from(book))
        .map_err(|e| VatError::Config(e.to_string()))
}
