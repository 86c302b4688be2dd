//! P6 encoder.

use std::io::Write;

use enough::Stop;

use crate::buffer::Image;
use crate::error::BitmapError;

/// Encode `image` as binary PPM: `P6\n<w> <h>\n255\n`, then R,G,B rows top
/// to bottom with no padding.
pub(crate) fn encode_ppm<W: Write>(
    image: &Image,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let (w, h) = (image.width(), image.height());
    let row_bytes = w
        .checked_mul(3)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: w,
            height: h,
        })?;

    stop.check()?;
    write!(out, "P6\n{w} {h}\n255\n")?;
    if row_bytes == 0 {
        return Ok(());
    }

    let mut row_buf = vec![0u8; row_bytes];
    for (y, row) in image.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row_buf.chunks_exact_mut(3).zip(row) {
            dst.copy_from_slice(&[px.r, px.g, px.b]);
        }
        out.write_all(&row_buf)?;
    }

    Ok(())
}
