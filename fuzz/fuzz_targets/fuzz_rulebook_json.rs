#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(book) = vatrules::config::from_json(s) {
            let _ = book.compute_vat("France", "wine", Decimal::ONE_HUNDRED);
        }
    }
});
