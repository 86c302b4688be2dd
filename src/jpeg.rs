//! JPEG adapter over the `image` crate's baseline codec.
//!
//! Scanlines cross the boundary as interleaved 8-bit R,G,B, top to bottom.
//! Alpha is dropped on encode and set to 255 on decode. Every library
//! failure comes back as [`BitmapError::Jpeg`].

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::{DynamicImage, ExtendedColorType, ImageDecoder};

use crate::buffer::{Color, Image};
use crate::error::BitmapError;
use crate::limits::{Limits, check_decode};

/// Quality used by [`save`] and [`encode_to_vec`].
pub const DEFAULT_QUALITY: u8 = 75;

/// Encode `image` as a baseline JPEG into `out`. `quality` is clamped to
/// `1..=100`.
pub fn encode<W: Write>(image: &Image, out: &mut W, quality: u8) -> Result<(), BitmapError> {
    let (w, h) = (image.width(), image.height());
    let (Ok(width), Ok(height)) = (u32::try_from(w), u32::try_from(h)) else {
        return Err(BitmapError::DimensionsTooLarge {
            width: w,
            height: h,
        });
    };

    let mut samples = Vec::with_capacity(w * h * 3);
    for row in image.rows() {
        for px in row {
            samples.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }

    let mut encoder = JpegEncoder::new_with_quality(out, quality.clamp(1, 100));
    encoder.encode(&samples, width, height, ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Decode a JPEG from `reader`. Grayscale and CMYK sources are converted
/// to RGB by the library.
pub fn decode<R: BufRead + Seek>(reader: R, limits: Option<&Limits>) -> Result<Image, BitmapError> {
    let decoder = JpegDecoder::new(reader)?;
    let (width, height) = decoder.dimensions();
    let (w, h) = (width as usize, height as usize);
    check_decode(limits, w, h)?;

    let rgb = DynamicImage::from_decoder(decoder)?.into_rgb8();
    let mut image = Image::new(w, h, Image::BLACK);
    if w == 0 || h == 0 {
        return Ok(image);
    }
    for (y, scanline) in rgb.as_raw().chunks_exact(w * 3).take(h).enumerate() {
        for (px, src) in image.row_mut(y).iter_mut().zip(scanline.chunks_exact(3)) {
            *px = Color {
                r: src[0],
                g: src[1],
                b: src[2],
                a: 255,
            };
        }
    }
    Ok(image)
}

/// Encode `image` to an in-memory JPEG at [`DEFAULT_QUALITY`].
pub fn encode_to_vec(image: &Image) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::new();
    encode(image, &mut out, DEFAULT_QUALITY)?;
    Ok(out)
}

/// Decode an in-memory JPEG.
pub fn decode_from_slice(data: &[u8]) -> Result<Image, BitmapError> {
    decode(Cursor::new(data), None)
}

/// Write `image` to `path` as JPEG at [`DEFAULT_QUALITY`]. Returns `false`
/// on any failure, after logging it.
pub fn save(path: impl AsRef<Path>, image: &Image) -> bool {
    save_with_quality(path, image, DEFAULT_QUALITY)
}

/// Like [`save`] with an explicit quality.
pub fn save_with_quality(path: impl AsRef<Path>, image: &Image, quality: u8) -> bool {
    let path = path.as_ref();
    match try_save(path, image, quality) {
        Ok(()) => {
            log::debug!(
                "wrote {}x{} JPEG (q{quality}) to {}",
                image.width(),
                image.height(),
                path.display()
            );
            true
        }
        Err(e) => {
            log::error!("failed to save JPEG {}: {e}", path.display());
            false
        }
    }
}

/// Read a JPEG from `path`. Returns an empty image on any failure, after
/// logging it.
pub fn load(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    match File::open(path)
        .map_err(BitmapError::from)
        .and_then(|f| decode(BufReader::new(f), None))
    {
        Ok(image) => {
            log::debug!(
                "read {}x{} JPEG from {}",
                image.width(),
                image.height(),
                path.display()
            );
            image
        }
        Err(e) => {
            log::error!("failed to load JPEG {}: {e}", path.display());
            Image::empty()
        }
    }
}

fn try_save(path: &Path, image: &Image, quality: u8) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode(image, &mut out, quality)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_color_survives_lossy_roundtrip() {
        let teal = Color::new(0, 128, 128, 40);
        let image = Image::new(16, 8, teal);
        let bytes = encode_to_vec(&image).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = decode_from_slice(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
        for px in decoded.pixels() {
            assert_eq!(px.a, 255);
            assert!(px.r.abs_diff(teal.r) <= 4, "{px:?}");
            assert!(px.g.abs_diff(teal.g) <= 4, "{px:?}");
            assert!(px.b.abs_diff(teal.b) <= 4, "{px:?}");
        }
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        assert!(matches!(
            decode_from_slice(b"\xFF\xD8\xFF\xE0 not really a jpeg"),
            Err(BitmapError::Jpeg(_))
        ));
        assert!(decode_from_slice(b"").is_err());
    }

    #[test]
    fn limits_are_checked_before_decoding_pixels() {
        let bytes = encode_to_vec(&Image::new(32, 32, Image::BLACK)).unwrap();
        let limits = Limits {
            max_width: Some(16),
            ..Default::default()
        };
        assert!(matches!(
            decode(Cursor::new(&bytes[..]), Some(&limits)),
            Err(BitmapError::LimitExceeded(_))
        ));
    }
}
