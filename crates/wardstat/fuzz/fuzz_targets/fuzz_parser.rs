//! Fuzz target for the delimited-text parser.
//!
//! The parser must never panic on malformed input, whatever the delimiter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wardstat::input::Parser;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    for delimiter in [b';', b',', b'\t'] {
        let _ = parser.parse_bytes("fuzz", data, delimiter);
    }
});
