use enough::StopReason;

/// Errors from BMP/PPM/JPEG decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[cfg(feature = "jpeg")]
    #[error("JPEG codec error: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        // Short reads from read_exact are truncated files, not I/O faults.
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BitmapError::UnexpectedEof
        } else {
            BitmapError::Io(e)
        }
    }
}
