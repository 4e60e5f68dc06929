#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes may fail but must never panic
    let _ = bix::index::PostingsCodec::VarintDelta.decode(data);
    let _ = bix::index::PostingsCodec::Uncompressed.decode(data);
});
