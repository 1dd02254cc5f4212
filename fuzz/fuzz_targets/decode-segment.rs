#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Neither the gate nor the decoder may panic or read out of
    // bounds, whatever the input.
    let _ = cattp::classify(data);
    let _ = cattp::decode(data);
});
