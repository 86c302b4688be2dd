use std::path::Path;

/// File formats with a codec in this crate.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Windows bitmap, 24-bit uncompressed.
    Bmp,
    /// Binary PPM (P6).
    Ppm,
    /// JPEG/JFIF.
    Jpeg,
}

impl ImageFormat {
    /// Format implied by the file extension of `path` (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Some(Self::Bmp),
            "ppm" => Some(Self::Ppm),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Format identified from the leading magic bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [b'B', b'M', ..] => Some(Self::Bmp),
            [b'P', b'6', ..] => Some(Self::Ppm),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Ppm => "ppm",
            Self::Jpeg => "jpg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_ignores_case() {
        assert_eq!(ImageFormat::from_path("a/b/photo.JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("x.jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("x.Bmp"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_path("x.ppm"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_path("x.png"), None);
        assert_eq!(ImageFormat::from_path("noext"), None);
    }

    #[test]
    fn extension_maps_back_to_format() {
        for format in [ImageFormat::Bmp, ImageFormat::Ppm, ImageFormat::Jpeg] {
            let name = format!("out.{}", format.extension());
            assert_eq!(ImageFormat::from_path(&name), Some(format), "{name}");
        }
    }

    #[test]
    fn magic_detection() {
        assert_eq!(ImageFormat::detect(b"BM\x00\x00"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::detect(b"P6\n1 1\n255\n"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(b"P5"), None);
        assert_eq!(ImageFormat::detect(b"B"), None);
    }
}
