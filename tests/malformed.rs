//! Rejection of malformed, unsupported and truncated input.

mod support;

use imglib::*;
use support::{TempPath, checkerboard};

fn valid_bmp() -> Vec<u8> {
    bmp::encode_to_vec(&checkerboard(5, 4)).unwrap()
}

// ── BMP ──────────────────────────────────────────────────────────────

#[test]
fn bmp_bad_signature() {
    let mut bytes = valid_bmp();
    bytes[0..2].copy_from_slice(b"XX");
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::UnrecognizedFormat)
    ));

    let tmp = TempPath::new("bad-signature.bmp");
    std::fs::write(tmp.path(), &bytes).unwrap();
    let loaded = bmp::load(tmp.path());
    assert_eq!((loaded.width(), loaded.height()), (0, 0));
}

#[test]
fn bmp_unsupported_bit_depth() {
    let mut bytes = valid_bmp();
    bytes[28..30].copy_from_slice(&32u16.to_le_bytes());
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn bmp_unsupported_info_header_size() {
    let mut bytes = valid_bmp();
    bytes[14..18].copy_from_slice(&124u32.to_le_bytes());
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn bmp_compressed_is_unsupported() {
    let mut bytes = valid_bmp();
    bytes[30..34].copy_from_slice(&1u32.to_le_bytes());
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn bmp_negative_width_is_invalid() {
    let mut bytes = valid_bmp();
    bytes[18..22].copy_from_slice(&(-5i32).to_le_bytes());
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn bmp_truncated_by_one_row() {
    let bytes = valid_bmp();
    let truncated = &bytes[..bytes.len() - bmp::stride(5)];
    assert!(matches!(
        bmp::decode_from_slice(truncated),
        Err(BitmapError::UnexpectedEof)
    ));

    let tmp = TempPath::new("truncated.bmp");
    std::fs::write(tmp.path(), truncated).unwrap();
    assert!(bmp::load(tmp.path()).is_empty());
}

#[test]
fn bmp_truncated_by_one_byte() {
    let bytes = valid_bmp();
    assert!(matches!(
        bmp::decode_from_slice(&bytes[..bytes.len() - 1]),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn bmp_truncated_headers() {
    let bytes = valid_bmp();
    for len in [0, 1, 2, 13, 14, 30, 53] {
        assert!(
            matches!(
                bmp::decode_from_slice(&bytes[..len]),
                Err(BitmapError::UnexpectedEof)
            ),
            "len {len}"
        );
    }
}

#[test]
fn bmp_pixel_offset_past_end() {
    let mut bytes = valid_bmp();
    bytes[10..14].copy_from_slice(&10_000u32.to_le_bytes());
    assert!(matches!(
        bmp::decode_from_slice(&bytes),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn bmp_huge_dimensions_fail_without_allocating() {
    let mut bytes = valid_bmp();
    bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    bytes[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    assert!(bmp::decode_from_slice(&bytes).is_err());
}

#[test]
fn bmp_load_missing_file() {
    let tmp = TempPath::new("does-not-exist.bmp");
    assert!(bmp::load(tmp.path()).is_empty());
}

#[test]
fn bmp_save_to_unwritable_path() {
    let tmp = TempPath::new("missing-dir");
    let path = tmp.path().join("nested").join("out.bmp");
    assert!(!bmp::save(&path, &checkerboard(2, 2)));
}

// ── PPM ──────────────────────────────────────────────────────────────

#[test]
fn ppm_maxval_100_is_rejected() {
    let mut bytes = b"P6\n2 1\n100\n".to_vec();
    bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    assert!(matches!(
        pnm::decode_from_slice(&bytes),
        Err(BitmapError::UnsupportedVariant(_))
    ));

    let tmp = TempPath::new("maxval.ppm");
    std::fs::write(tmp.path(), &bytes).unwrap();
    assert!(pnm::load(tmp.path()).is_empty());
}

#[test]
fn ppm_wrong_signature() {
    for src in [&b"P5\n1 1\n255\n\x00"[..], b"P3\n1 1\n255\n0 0 0\n", b"BM"] {
        assert!(matches!(
            pnm::decode_from_slice(src),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }
}

#[test]
fn ppm_truncated_pixels() {
    let bytes = pnm::encode_to_vec(&checkerboard(4, 3)).unwrap();
    assert!(matches!(
        pnm::decode_from_slice(&bytes[..bytes.len() - 1]),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn ppm_lying_header_fails_without_allocating() {
    assert!(matches!(
        pnm::decode_from_slice(b"P6\n4000000000 4000000000\n255\n\x00\x00\x00"),
        Err(BitmapError::UnexpectedEof) | Err(BitmapError::DimensionsTooLarge { .. })
    ));
    assert!(matches!(
        pnm::decode_from_slice(b"P6\n60000 60000\n255\n\x00\x00\x00"),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn ppm_limits() {
    let bytes = pnm::encode_to_vec(&checkerboard(10, 2)).unwrap();
    let limits = Limits {
        max_width: Some(9),
        ..Default::default()
    };
    assert!(matches!(
        pnm::decode(&mut &bytes[..], Some(&limits), &Unstoppable),
        Err(BitmapError::LimitExceeded(_))
    ));
}

// ── Dispatch ─────────────────────────────────────────────────────────

#[test]
fn load_unknown_content_is_empty() {
    let tmp = TempPath::new("mystery");
    std::fs::write(tmp.path(), b"GIF89a").unwrap();
    assert!(imglib::load(tmp.path()).is_empty());
}

#[test]
fn load_by_extension_does_not_sniff() {
    // A BMP body behind a .ppm name fails rather than silently switching codecs.
    let tmp = TempPath::new("actually-bmp.ppm");
    std::fs::write(tmp.path(), valid_bmp()).unwrap();
    assert!(imglib::load(tmp.path()).is_empty());
}
