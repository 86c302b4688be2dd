use crate::buffer::Color;
use crate::error::BitmapError;

/// Caps a decoder applies to the dimensions in a file header, before it
/// allocates the pixel buffer.
///
/// `None` leaves that quantity unchecked; `Limits::default()` checks
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the decoded [`Image`](crate::Image), 4 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    fn check(&self, width: usize, height: usize, buffer_bytes: usize) -> Result<(), BitmapError> {
        let (width, height) = (width as u64, height as u64);
        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width.saturating_mul(height), self.max_pixels),
            ("decoded size", buffer_bytes as u64, self.max_memory_bytes),
        ];
        for (what, value, cap) in caps {
            match cap {
                Some(cap) if value > cap => {
                    return Err(BitmapError::LimitExceeded(format!(
                        "{what} {value} exceeds limit {cap}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Gate for a decoder about to allocate a `width` x `height` image: the
/// buffer size must fit `usize`, then `limits` (if any) must allow it.
pub(crate) fn check_decode(
    limits: Option<&Limits>,
    width: usize,
    height: usize,
) -> Result<(), BitmapError> {
    let buffer_bytes = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(size_of::<Color>()))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    match limits {
        Some(limits) => limits.check(width, height, buffer_bytes),
        None => Ok(()),
    }
}
