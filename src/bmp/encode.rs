//! BMP encoder: uncompressed 24-bit, bottom-up.

use std::io::Write;

use enough::Stop;

use super::header::{FileHeader, InfoHeader, PIXEL_DATA_OFFSET};
use super::checked_stride;
use crate::buffer::Image;
use crate::error::BitmapError;

/// Encode `image` as a 24-bit BMP into `out`.
pub(crate) fn encode_bmp<W: Write>(
    image: &Image,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let w = image.width();
    let h = image.height();
    let row_stride = checked_stride(w).ok_or(BitmapError::DimensionsTooLarge {
        width: w,
        height: h,
    })?;

    // Every size lands in a 32-bit header field.
    let pixel_data_size = row_stride
        .checked_mul(h)
        .and_then(|s| u32::try_from(s).ok())
        .filter(|s| s.checked_add(PIXEL_DATA_OFFSET).is_some());
    let (Some(pixel_data_size), Ok(width), Ok(height)) =
        (pixel_data_size, i32::try_from(w), i32::try_from(h))
    else {
        return Err(BitmapError::DimensionsTooLarge {
            width: w,
            height: h,
        });
    };

    stop.check()?;

    out.write_all(&FileHeader::new(pixel_data_size).to_bytes())?;
    out.write_all(&InfoHeader::new(width, height, pixel_data_size).to_bytes())?;

    if row_stride == 0 {
        return Ok(());
    }

    // Padding bytes past w*3 are never touched and stay zero.
    let mut row_buf = vec![0u8; row_stride];
    for y in (0..h).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row_buf.chunks_exact_mut(3).zip(image.row(y)) {
            dst[0] = px.b;
            dst[1] = px.g;
            dst[2] = px.r;
        }
        out.write_all(&row_buf)?;
    }

    Ok(())
}
