//! P6 decoder with an explicit header tokenizer.

use std::io::BufRead;

use enough::Stop;

use crate::buffer::{Color, Image};
use crate::error::BitmapError;
use crate::limits::{Limits, check_decode};

/// Longest header token accepted (`u32::MAX` has 10 digits).
const MAX_TOKEN_LEN: usize = 16;

/// Pixel bytes read per call; a multiple of 3.
const CHUNK_BYTES: usize = 3 * 4096;

/// Parsed P6 header (internal).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub width: usize,
    pub height: usize,
}

/// Netpbm whitespace, as classified by C `isspace`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn next_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, BitmapError> {
    let byte = reader.fill_buf()?.first().copied();
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

fn skip_comment<R: BufRead>(reader: &mut R) -> Result<(), BitmapError> {
    loop {
        match next_byte(reader)? {
            None | Some(b'\n') | Some(b'\r') => return Ok(()),
            Some(_) => {}
        }
    }
}

/// Read one header token. Leading whitespace and `#` comments are skipped;
/// the single whitespace byte that ends the token is consumed with it.
fn next_token<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, BitmapError> {
    let mut byte = loop {
        match next_byte(reader)? {
            None => return Err(BitmapError::UnexpectedEof),
            Some(b'#') => skip_comment(reader)?,
            Some(b) if is_space(b) => {}
            Some(b) => break b,
        }
    };

    let mut token = Vec::with_capacity(4);
    loop {
        token.push(byte);
        if token.len() > MAX_TOKEN_LEN {
            return Err(BitmapError::InvalidHeader("PPM header token too long".into()));
        }
        match next_byte(reader)? {
            None => return Ok(token),
            Some(b) if is_space(b) => return Ok(token),
            Some(b) => byte = b,
        }
    }
}

fn parse_number(token: &[u8], what: &str) -> Result<u32, BitmapError> {
    core::str::from_utf8(token)
        .ok()
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            BitmapError::InvalidHeader(format!(
                "PPM {what} is not a number: {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

/// Parse `P6 <width> <height> 255` and the delimiter after it, leaving
/// `reader` at the first pixel byte.
pub(crate) fn parse_header<R: BufRead>(reader: &mut R) -> Result<PpmHeader, BitmapError> {
    if next_token(reader)? != b"P6" {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let width = parse_number(&next_token(reader)?, "width")?;
    let height = parse_number(&next_token(reader)?, "height")?;
    let maxval = parse_number(&next_token(reader)?, "max value")?;
    if maxval != 255 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "PPM max value {maxval}, only 255 is supported"
        )));
    }
    Ok(PpmHeader {
        width: width as usize,
        height: height as usize,
    })
}

pub(crate) fn decode_ppm<R: BufRead>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let PpmHeader { width, height } = parse_header(reader)?;
    check_decode(limits, width, height)?;
    stop.check()?;

    // Rows are unpadded, so the pixel data is read in fixed-size chunks.
    // The pixel vector grows as data arrives, so a lying header cannot force
    // a large allocation before the data is actually there.
    let mut remaining = width * height * 3;
    let mut pixels: Vec<Color> = Vec::new();
    let mut chunk = vec![0u8; remaining.min(CHUNK_BYTES)];
    while remaining > 0 {
        stop.check()?;
        let n = remaining.min(CHUNK_BYTES);
        reader.read_exact(&mut chunk[..n])?;
        pixels.extend(chunk[..n].chunks_exact(3).map(|c| Color {
            r: c[0],
            g: c[1],
            b: c[2],
            a: 255,
        }));
        remaining -= n;
    }

    Image::from_pixels(width, height, pixels).ok_or(BitmapError::DimensionsTooLarge {
        width,
        height,
    })
}
