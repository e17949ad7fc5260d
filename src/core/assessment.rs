use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::Jurisdiction;

/// A policy step that contributed to a VAT figure, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AppliedPolicy {
    /// Allowance subtracted from the amount before taxing.
    TaxFree { allowance: Decimal },
    /// Fixed VAT amount replaced the rate computation.
    Flat { vat: Decimal },
    /// Product-specific rate on the taxable amount.
    CustomRate { rate: Decimal },
    /// Jurisdiction base rate on the taxable amount.
    BaseRate { rate: Decimal },
    /// One band of a tiered computation; `upper` is `None` for the open top band.
    Slab {
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
        vat: Decimal,
    },
    /// VAT was clamped to the product's cap.
    Cap { cap: Decimal, uncapped: Decimal },
    /// Additional rate charged on the taxable amount.
    Surcharge { rate: Decimal, vat: Decimal },
}

/// Result of a VAT computation with the steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatAssessment {
    pub jurisdiction: Jurisdiction,
    pub product: String,
    /// Amount as supplied by the caller.
    pub amount: Decimal,
    /// Amount after any tax-free allowance.
    pub taxable_amount: Decimal,
    /// Unrounded VAT.
    pub vat: Decimal,
    pub applied: Vec<AppliedPolicy>,
}

impl VatAssessment {
    /// VAT rounded to `dp` decimal places, half away from zero.
    pub fn rounded(&self, dp: u32) -> Decimal {
        self.vat
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn currency_code(&self) -> &'static str {
        self.jurisdiction.currency_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assessment(vat: Decimal) -> VatAssessment {
        VatAssessment {
            jurisdiction: Jurisdiction::France,
            product: "eggs".into(),
            amount: dec!(1),
            taxable_amount: dec!(0.5),
            vat,
            applied: vec![AppliedPolicy::BaseRate { rate: dec!(0.125) }],
        }
    }

    #[test]
    fn rounding_half_away_from_zero() {
        assert_eq!(assessment(dec!(0.0625)).rounded(2), dec!(0.06));
        assert_eq!(assessment(dec!(0.125)).rounded(2), dec!(0.13));
        assert_eq!(assessment(dec!(12.375)).rounded(2), dec!(12.38));
        assert_eq!(assessment(dec!(-0.125)).rounded(2), dec!(-0.13));
    }

    #[test]
    fn rounding_keeps_unrounded_value() {
        let a = assessment(dec!(0.0625));
        let _ = a.rounded(2);
        assert_eq!(a.vat, dec!(0.0625));
    }

    #[test]
    fn applied_policy_serializes_tagged() {
        let json = serde_json::to_value(AppliedPolicy::Cap {
            cap: dec!(5.0),
            uncapped: dec!(12.5),
        })
        .unwrap();
        assert_eq!(json["policy"], "cap");
        assert_eq!(json["cap"], "5.0");
    }
}
