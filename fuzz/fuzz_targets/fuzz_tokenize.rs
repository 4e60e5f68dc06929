#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Tokenizing arbitrary text should not panic
    let _ = bix::utils::tokenize(data);
});
