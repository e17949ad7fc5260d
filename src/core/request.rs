use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assessment::VatAssessment;
use super::error::VatError;
use super::rulebook::RuleBook;

const USAGE: &str = "enter input as 3 comma separated values (eg. bread, 1, Alaska)";

/// A single `(product, amount, country)` VAT request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRequest {
    pub product: String,
    pub amount: Decimal,
    pub country: String,
}

impl VatRequest {
    pub fn new(product: impl Into<String>, amount: Decimal, country: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            amount,
            country: country.into(),
        }
    }

    /// Parse a comma-separated `product, amount, country` line.
    ///
    /// Fields are trimmed. Exactly three non-empty fields are required and
    /// the amount must be a decimal number (negative values are accepted).
    pub fn parse(line: &str) -> Result<Self, VatError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let &[product, amount, country] = &fields[..] else {
            return Err(VatError::MalformedInput(format!(
                "expected 3 fields, got {}; {USAGE}",
                fields.len()
            )));
        };
        if product.is_empty() || amount.is_empty() || country.is_empty() {
            return Err(VatError::MalformedInput(format!("empty field; {USAGE}")));
        }
        let amount = Decimal::from_str(amount).map_err(|e| {
            VatError::MalformedInput(format!("invalid amount '{amount}': {e}"))
        })?;
        Ok(Self::new(product, amount, country))
    }

    /// Evaluate this request against `book`.
    pub fn assess(&self, book: &RuleBook) -> Result<VatAssessment, VatError> {
        book.assess(&self.country, &self.product, self.amount)
    }
}

impl FromStr for VatRequest {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
