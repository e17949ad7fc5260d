use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vatrules::core::*;

fn vat(country: &str, product: &str, amount: Decimal) -> Decimal {
    compute_vat(country, product, amount).unwrap()
}

// ---------------------------------------------------------------------------
// Germany: allowance, flat, custom rate
// ---------------------------------------------------------------------------

#[test]
fn germany_bread_within_allowance() {
    assert_eq!(vat("Germany", "bread", dec!(1)), dec!(0));
}

#[test]
fn germany_bread_flat_above_allowance() {
    assert_eq!(vat("Germany", "bread", dec!(2)), dec!(0.05));
    // Flat amount ignores the size of the taxable amount
    assert_eq!(vat("Germany", "bread", dec!(500)), dec!(0.05));
}

#[test]
fn germany_wine_custom_rate() {
    assert_eq!(vat("Germany", "wine", dec!(100)), dec!(20));
}

#[test]
fn germany_unlisted_product_uses_raw_multiplier() {
    assert_eq!(vat("Germany", "jeans", dec!(10)), dec!(150));
}

// ---------------------------------------------------------------------------
// UK: custom rate or slabs
// ---------------------------------------------------------------------------

#[test]
fn uk_wine_custom_rate() {
    assert_eq!(vat("UK", "wine", dec!(10)), dec!(1));
    assert_eq!(vat("UK", "wine", dec!(100)), dec!(10));
}

#[test]
fn uk_first_slab() {
    assert_eq!(vat("UK", "jeans", dec!(20)), dec!(2.5));
}

#[test]
fn uk_second_slab() {
    // 2.5 + 12
    assert_eq!(vat("UK", "jeans", dec!(100)), dec!(14.5));
}

#[test]
fn uk_third_slab() {
    // 2.5 + 12 + 10
    assert_eq!(vat("UK", "jeans", dec!(150)), dec!(24.5));
}

#[test]
fn uk_fractional_amount_inside_band() {
    // 2.5 + 0.5 × 15 %
    assert_eq!(vat("UK", "jeans", dec!(20.5)), dec!(2.575));
}

// ---------------------------------------------------------------------------
// France: allowance, custom rate, cap
// ---------------------------------------------------------------------------

#[test]
fn france_bread_base_rate() {
    assert_eq!(vat("France", "bread", dec!(2)), dec!(0.25));
}

#[test]
fn france_wine_below_cap() {
    assert_eq!(vat("France", "wine", dec!(10)), dec!(1.25));
}

#[test]
fn france_wine_capped() {
    assert_eq!(vat("France", "wine", dec!(100)), dec!(5.0));
}

#[test]
fn france_eggs_allowance() {
    assert_eq!(vat("France", "eggs", dec!(0.5)), dec!(0));
    assert_eq!(vat("France", "eggs", dec!(1)), dec!(0.0625));
}

#[test]
fn france_beer_and_ale_custom_rate() {
    assert_eq!(vat("France", "beer", dec!(50)), dec!(8.75));
    assert_eq!(vat("France", "ale", dec!(100)), dec!(17.5));
}

// ---------------------------------------------------------------------------
// Texas: allowance, flat, surcharge
// ---------------------------------------------------------------------------

#[test]
fn texas_bread_flat() {
    assert_eq!(vat("Texas", "bread", dec!(2)), dec!(0.05));
}

#[test]
fn texas_wine_base_plus_surcharge() {
    // 12.5 + 7.5
    assert_eq!(vat("Texas", "wine", dec!(100)), dec!(20));
}

#[test]
fn texas_beer_allowance_base_and_surcharge() {
    // 12.375 + 7.425 on a taxable amount of 99
    assert_eq!(vat("Texas", "beer", dec!(100)), dec!(19.8));
}

#[test]
fn texas_beer_within_allowance_has_no_surcharge() {
    assert_eq!(vat("Texas", "beer", dec!(1)), dec!(0));
}

// ---------------------------------------------------------------------------
// Alaska: base rate and cap only
// ---------------------------------------------------------------------------

#[test]
fn alaska_milk_capped() {
    assert_eq!(vat("Alaska", "milk", dec!(8)), dec!(0.5));
}

#[test]
fn alaska_milk_below_cap() {
    assert_eq!(vat("Alaska", "milk", dec!(0.5)), dec!(0.05));
    assert_eq!(vat("Alaska", "milk", dec!(5)), dec!(0.5));
}

#[test]
fn alaska_ignores_us_custom_rate_and_surcharge() {
    assert_eq!(vat("Alaska", "beer", dec!(100)), dec!(10));
    assert_eq!(vat("Alaska", "whatever", dec!(100)), dec!(10));
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[test]
fn unknown_jurisdictions_are_errors() {
    for country in ["Scotland", "NoWhere", "New York", ""] {
        assert!(
            matches!(
                compute_vat(country, "whatever", dec!(100)),
                Err(VatError::UnknownJurisdiction(_))
            ),
            "{country} should not resolve"
        );
    }
}

#[test]
fn jurisdiction_names_ignore_case() {
    assert_eq!(vat("germany", "wine", dec!(100)), dec!(20));
    assert_eq!(vat("FRANCE", "wine", dec!(100)), dec!(5.0));
    assert_eq!(vat("Uk", "jeans", dec!(20)), dec!(2.5));
}

#[test]
fn product_names_are_case_sensitive() {
    // "Wine" has no custom rate entry, so the raw base multiplier applies
    assert_eq!(vat("Germany", "Wine", dec!(1)), dec!(15));
    assert_eq!(vat("France", "Wine", dec!(100)), dec!(12.5));
}

#[test]
fn region_only_strategies() {
    assert_eq!(
        compute_vat("EU", "bread", dec!(2)),
        Err(VatError::RegionOnly(Region::Eu))
    );
    assert_eq!(
        compute_vat("US", "milk", dec!(2)),
        Err(VatError::RegionOnly(Region::Us))
    );
}

// ---------------------------------------------------------------------------
// Assessment trace
// ---------------------------------------------------------------------------

#[test]
fn assessment_records_cap() {
    let a = assess("France", "wine", dec!(100)).unwrap();
    assert_eq!(a.jurisdiction, Jurisdiction::France);
    assert_eq!(a.taxable_amount, dec!(100));
    assert_eq!(
        a.applied,
        vec![
            AppliedPolicy::BaseRate { rate: dec!(0.125) },
            AppliedPolicy::Cap {
                cap: dec!(5.0),
                uncapped: dec!(12.5)
            },
        ]
    );
}

#[test]
fn assessment_records_allowance_without_tax() {
    let a = assess("Germany", "bread", dec!(1)).unwrap();
    assert_eq!(a.vat, dec!(0));
    assert_eq!(a.taxable_amount, dec!(0));
    assert_eq!(a.applied, vec![AppliedPolicy::TaxFree { allowance: dec!(1) }]);
}

#[test]
fn assessment_rounding() {
    let a = assess("France", "eggs", dec!(1)).unwrap();
    assert_eq!(a.rounded(2), dec!(0.06));
    let a = assess("Texas", "beer", dec!(10)).unwrap();
    // 9 × 0.125 + 9 × 0.075 = 1.8
    assert_eq!(a.rounded(2), dec!(1.80));
    assert_eq!(a.currency_code(), "USD");
}

#[test]
fn assessment_serializes_to_json() {
    let a = assess("Texas", "beer", dec!(100)).unwrap();
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["jurisdiction"], "TEXAS");
    assert_eq!(json["product"], "beer");
    assert_eq!(json["applied"][0]["policy"], "tax_free");
    assert_eq!(json["applied"][2]["policy"], "surcharge");
}

// ---------------------------------------------------------------------------
// Error messages
// ---------------------------------------------------------------------------

#[test]
fn error_messages() {
    insta::assert_snapshot!(
        compute_vat("Scotland", "whisky", dec!(1)).unwrap_err().to_string(),
        @"VAT cannot be calculated for unknown jurisdiction 'Scotland'"
    );
    insta::assert_snapshot!(
        compute_vat("eu", "bread", dec!(1)).unwrap_err().to_string(),
        @"region EU has no standalone VAT computation; name one of its jurisdictions"
    );
    insta::assert_snapshot!(
        VatRequest::parse("bread, 2").unwrap_err().to_string(),
        @"malformed input: expected 3 fields, got 2; enter input as 3 comma separated values (eg. bread, 1, Alaska)"
    );
}
