#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic either decoder.
    let _ = imglib::bmp::decode_from_slice(data);
    let _ = imglib::pnm::decode_from_slice(data);
});
