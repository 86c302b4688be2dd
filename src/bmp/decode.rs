//! BMP decoder for uncompressed 24-bit BITMAPINFOHEADER files.

use std::io::{Read, Seek, SeekFrom};

use enough::Stop;

use super::header::{
    BITS_PER_PIXEL, COMPRESSION_NONE, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader,
    SIGNATURE,
};
use super::checked_stride;
use crate::buffer::{Color, Image};
use crate::error::BitmapError;
use crate::limits::{Limits, check_decode};

/// Parsed and validated BMP headers.
#[derive(Debug)]
pub(crate) struct BmpHeader {
    pub width: usize,
    pub height: usize,
    pub pixel_data_offset: u32,
}

/// Read both headers from the current position of `reader` and validate them.
pub(crate) fn read_bmp_header<R: Read>(reader: &mut R) -> Result<BmpHeader, BitmapError> {
    let mut file_bytes = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut file_bytes)?;
    let file = FileHeader::from_bytes(&file_bytes);
    if file.signature != SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let mut info_bytes = [0u8; INFO_HEADER_SIZE];
    reader.read_exact(&mut info_bytes)?;
    let info = InfoHeader::from_bytes(&info_bytes);
    if info.header_size != INFO_HEADER_SIZE as u32 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP info header size {}, only {INFO_HEADER_SIZE} is supported",
            info.header_size
        )));
    }
    if info.bit_count != BITS_PER_PIXEL {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP bit depth {}, only {BITS_PER_PIXEL} is supported",
            info.bit_count
        )));
    }
    if info.compression != COMPRESSION_NONE {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP compression {}, only uncompressed is supported",
            info.compression
        )));
    }
    if info.width < 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP width is negative ({})",
            info.width
        )));
    }

    // A negative height marks top-down storage. Only the magnitude is used;
    // rows are always read bottom-up.
    Ok(BmpHeader {
        width: info.width as usize,
        height: info.height.unsigned_abs() as usize,
        pixel_data_offset: file.pixel_data_offset,
    })
}

/// Decode a complete BMP stream into a new image.
pub(crate) fn decode_bmp<R: Read + Seek>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let header = read_bmp_header(reader)?;
    let (w, h) = (header.width, header.height);
    check_decode(limits, w, h)?;
    let row_stride = checked_stride(w).ok_or(BitmapError::DimensionsTooLarge {
        width: w,
        height: h,
    })?;
    stop.check()?;
    if w == 0 || h == 0 {
        return Ok(Image::new(w, h, Image::BLACK));
    }

    // Reject truncated pixel data before allocating for it.
    let data_start = u64::from(header.pixel_data_offset);
    let data_end = (row_stride as u64)
        .checked_mul(h as u64)
        .and_then(|len| len.checked_add(data_start))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: w,
            height: h,
        })?;
    if reader.seek(SeekFrom::End(0))? < data_end {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut image = Image::new(w, h, Image::BLACK);
    reader.seek(SeekFrom::Start(data_start))?;

    let mut row_buf = vec![0u8; row_stride];
    for y in (0..h).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        reader.read_exact(&mut row_buf)?;
        for (px, src) in image.row_mut(y).iter_mut().zip(row_buf.chunks_exact(3)) {
            *px = Color {
                r: src[2],
                g: src[1],
                b: src[0],
                a: 255,
            };
        }
    }

    Ok(image)
}
