//! BMP codec: uncompressed 24-bit BITMAPINFOHEADER files.
//!
//! Files are written bottom-up with a positive height, B,G,R byte order and
//! rows zero-padded to a multiple of 4 bytes (see [`stride`]). The decoder
//! accepts the same variant and ignores the sign of the height field, so a
//! top-down file produced elsewhere decodes vertically flipped.
//!
//! Layout (little-endian):
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | `"BM"` |
//! | 2 | 4 | file size, `54 + stride * height` |
//! | 6 | 4 | reserved, 0 |
//! | 10 | 4 | pixel data offset, 54 |
//! | 14 | 4 | info header size, 40 |
//! | 18 | 4 | width (signed) |
//! | 22 | 4 | height (signed) |
//! | 26 | 2 | planes, 1 |
//! | 28 | 2 | bits per pixel, 24 |
//! | 30 | 4 | compression, 0 |
//! | 34 | 4 | image size, `stride * height` |
//! | 38 | 4 | x resolution, 11811 |
//! | 42 | 4 | y resolution, 11811 |
//! | 46 | 4 | colors used, 0 |
//! | 50 | 4 | colors important, 0x1000000 |
//! | 54 | … | pixel rows |

mod decode;
mod encode;
mod header;

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::buffer::Image;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Bytes per encoded row: `width * 3` rounded up to a multiple of 4.
///
/// # Panics
///
/// Panics if the stride overflows `usize`. See [`checked_stride`].
pub const fn stride(width: usize) -> usize {
    match checked_stride(width) {
        Some(stride) => stride,
        None => panic!("BMP row stride overflows usize"),
    }
}

/// [`stride`], or `None` if it overflows `usize`.
pub const fn checked_stride(width: usize) -> Option<usize> {
    match width.checked_mul(3) {
        Some(bytes) => match bytes.checked_add(3) {
            Some(rounded) => Some(rounded & !3),
            None => None,
        },
        None => None,
    }
}

/// Encode `image` as a 24-bit BMP into `out`.
pub fn encode<W: Write>(image: &Image, out: &mut W, stop: &dyn Stop) -> Result<(), BitmapError> {
    encode::encode_bmp(image, out, stop)
}

/// Decode a 24-bit BMP from `reader`. Seeks to the pixel data offset
/// recorded in the file header.
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    decode::decode_bmp(reader, limits, stop)
}

/// Encode `image` to an in-memory BMP file.
pub fn encode_to_vec(image: &Image) -> Result<Vec<u8>, BitmapError> {
    let capacity = checked_stride(image.width())
        .map_or(0, |s| s.saturating_mul(image.height()).saturating_add(54));
    let mut out = Vec::with_capacity(capacity);
    encode::encode_bmp(image, &mut out, &Unstoppable)?;
    Ok(out)
}

/// Decode an in-memory BMP file.
pub fn decode_from_slice(data: &[u8]) -> Result<Image, BitmapError> {
    decode::decode_bmp(&mut Cursor::new(data), None, &Unstoppable)
}

/// Width and height from the headers alone, without reading pixel data.
pub fn probe<R: Read>(reader: &mut R) -> Result<(usize, usize), BitmapError> {
    let header = decode::read_bmp_header(reader)?;
    Ok((header.width, header.height))
}

/// Write `image` to `path` as BMP. Returns `false` on any failure, after
/// logging it.
pub fn save(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    match try_save(path, image) {
        Ok(()) => {
            log::debug!(
                "wrote {}x{} BMP to {}",
                image.width(),
                image.height(),
                path.display()
            );
            true
        }
        Err(e) => {
            log::error!("failed to save BMP {}: {e}", path.display());
            false
        }
    }
}

/// Read a BMP from `path`. Returns an empty image on any failure, after
/// logging it.
pub fn load(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    match try_load(path) {
        Ok(image) => {
            log::debug!(
                "read {}x{} BMP from {}",
                image.width(),
                image.height(),
                path.display()
            );
            image
        }
        Err(e) => {
            log::error!("failed to load BMP {}: {e}", path.display());
            Image::empty()
        }
    }
}

fn try_save(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode::encode_bmp(image, &mut out, &Unstoppable)?;
    out.flush()?;
    Ok(())
}

fn try_load(path: &Path) -> Result<Image, BitmapError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode::decode_bmp(&mut reader, None, &Unstoppable)
}
