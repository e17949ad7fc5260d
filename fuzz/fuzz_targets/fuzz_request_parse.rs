#![no_main]

use libfuzzer_sys::fuzz_target;
use vatrules::core::{RuleBook, VatRequest};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic. Errors are fine, panics are bugs.
        if let Ok(request) = VatRequest::parse(s) {
            let _ = request.assess(RuleBook::standard());
        }
    }
});
