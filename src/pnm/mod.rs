//! PPM codec: binary `P6` with max value 255.
//!
//! Rows are stored top to bottom as raw R,G,B bytes, no padding. ASCII PNM
//! variants (P1-P3), grayscale and 16-bit samples are not supported.

mod decode;
mod encode;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::buffer::Image;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Encode `image` as a P6 PPM into `out`.
pub fn encode<W: Write>(image: &Image, out: &mut W, stop: &dyn Stop) -> Result<(), BitmapError> {
    encode::encode_ppm(image, out, stop)
}

/// Decode a P6 PPM from `reader`.
pub fn decode<R: BufRead>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    decode::decode_ppm(reader, limits, stop)
}

/// Encode `image` to an in-memory PPM file.
pub fn encode_to_vec(image: &Image) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::with_capacity(32 + image.width() * image.height() * 3);
    encode::encode_ppm(image, &mut out, &Unstoppable)?;
    Ok(out)
}

/// Decode an in-memory PPM file.
pub fn decode_from_slice(mut data: &[u8]) -> Result<Image, BitmapError> {
    decode::decode_ppm(&mut data, None, &Unstoppable)
}

/// Width and height from the header alone.
pub fn probe<R: BufRead>(reader: &mut R) -> Result<(usize, usize), BitmapError> {
    let header = decode::parse_header(reader)?;
    Ok((header.width, header.height))
}

/// Write `image` to `path` as PPM. Returns `false` on any failure, after
/// logging it.
pub fn save(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    match try_save(path, image) {
        Ok(()) => {
            log::debug!(
                "wrote {}x{} PPM to {}",
                image.width(),
                image.height(),
                path.display()
            );
            true
        }
        Err(e) => {
            log::error!("failed to save PPM {}: {e}", path.display());
            false
        }
    }
}

/// Read a PPM from `path`. Returns an empty image on any failure, after
/// logging it.
pub fn load(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    match try_load(path) {
        Ok(image) => {
            log::debug!(
                "read {}x{} PPM from {}",
                image.width(),
                image.height(),
                path.display()
            );
            image
        }
        Err(e) => {
            log::error!("failed to load PPM {}: {e}", path.display());
            Image::empty()
        }
    }
}

fn try_save(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode::encode_ppm(image, &mut out, &Unstoppable)?;
    out.flush()?;
    Ok(())
}

fn try_load(path: &Path) -> Result<Image, BitmapError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode::decode_ppm(&mut reader, None, &Unstoppable)
}
