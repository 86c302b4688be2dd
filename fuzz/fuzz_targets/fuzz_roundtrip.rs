#![no_main]
use imglib::{ImageFormat, bmp, pnm};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode and decode to identical pixels.
    let (decoded, reencoded) = match ImageFormat::detect(data) {
        Some(ImageFormat::Bmp) => {
            let Ok(decoded) = bmp::decode_from_slice(data) else {
                return;
            };
            // Heights of 2^31 (from i32::MIN) decode but cannot be written back.
            let Ok(reencoded) = bmp::encode_to_vec(&decoded) else {
                return;
            };
            (decoded, bmp::decode_from_slice(&reencoded))
        }
        Some(ImageFormat::Ppm) => {
            let Ok(decoded) = pnm::decode_from_slice(data) else {
                return;
            };
            let reencoded = pnm::encode_to_vec(&decoded).expect("re-encode PPM");
            (decoded, pnm::decode_from_slice(&reencoded))
        }
        _ => return,
    };

    let Ok(decoded2) = reencoded else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
