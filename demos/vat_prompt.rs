//! Interactive VAT prompt.
//!
//! Reads `product, amount, country` lines from stdin and prints the VAT.
//! Enter `test` to run the built-in demo requests. Set `RUST_LOG=debug`
//! to see which policies fire.

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;
use vatrules::core::*;

const DEMO_REQUESTS: &[&str] = &[
    "bread, 1, Germany",
    "bread, 2, Germany",
    "wine, 100, Germany",
    "wine, 10, UK",
    "wine, 100, UK",
    "jeans, 20, UK",
    "jeans, 100, UK",
    "jeans, 150, UK",
    "bread, 2, France",
    "wine, 10, France",
    "wine, 100, France",
    "eggs, 0.5, France",
    "eggs, 1, France",
    "beer, 50, France",
    "ale, 100, France",
    "bread, 2, Texas",
    "wine, 100, Texas",
    "beer, 100, Texas",
    "milk, 0.5, Alaska",
    "milk, 8, Alaska",
    "beer, 100, Alaska",
    "whatever, 100, Alaska",
    "whatever, -1, NoWhere",
    "whatever, 100, Scotland",
];

fn report(line: &str) {
    match VatRequest::parse(line).and_then(|req| req.assess(RuleBook::standard())) {
        Ok(a) => println!("{} is the VAT ({})", a.vat.normalize(), a.currency_code()),
        Err(e) => println!("{e}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let stdin = io::stdin();
    loop {
        print!("Please enter item, amount, country (eg. milk, 2, UK): ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line == "test" {
            for request in DEMO_REQUESTS {
                print!("{request:<28} => ");
                report(request);
            }
            continue;
        }
        report(line);
    }
}
