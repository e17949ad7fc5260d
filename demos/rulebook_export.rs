//! Print the built-in rule book as JSON, or validate a JSON file.
//!
//! ```sh
//! cargo run --example rulebook_export --features config > rules.json
//! cargo run --example rulebook_export --features config -- rules.json
//! ```

use vatrules::config;
use vatrules::core::{Jurisdiction, RuleBook};

/// One line per jurisdiction: effective base rate against the region's, and
/// the merged policy tables.
fn summarize(book: &RuleBook) {
    for jurisdiction in Jurisdiction::ALL {
        let Some(rules) = book.rules(jurisdiction) else {
            continue;
        };
        let region_rate = book
            .region(jurisdiction.region())
            .map(|region| region.base_rate.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<8} base {} (region {}), {} policy entries",
            jurisdiction.name(),
            rules.base_rate(),
            region_rate,
            rules.policies().effective().entries().count()
        );
    }
}

fn main() {
    let result = match std::env::args().nth(1) {
        None => config::to_json(RuleBook::standard()).map(|json| println!("{json}")),
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => config::from_json(&json).map(|book| {
                println!("{path}: valid, {} jurisdiction overlays", book.overlays().len());
                summarize(&book);
            }),
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
