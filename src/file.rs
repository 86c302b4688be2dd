//! Format-dispatching `save` / `load` keyed on the file extension.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::buffer::Image;
use crate::format::ImageFormat;

/// Write `image` to `path` in the format named by its extension.
///
/// Returns `false` (after logging) for an unknown extension or any encode
/// failure.
pub fn save(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    let Some(format) = ImageFormat::from_path(path) else {
        log::error!("unknown image format for {}", path.display());
        return false;
    };
    save_as(path, image, format)
}

/// Write `image` to `path` in `format`, whatever the extension says.
pub fn save_as(path: impl AsRef<Path>, image: &Image, format: ImageFormat) -> bool {
    let path = path.as_ref();
    match format {
        ImageFormat::Bmp => crate::bmp::save(path, image),
        ImageFormat::Ppm => crate::pnm::save(path, image),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::save(path, image),
        #[cfg(not(feature = "jpeg"))]
        ImageFormat::Jpeg => {
            log::error!("JPEG support not compiled in, cannot save {}", path.display());
            false
        }
    }
}

/// Read `path`, choosing the codec by extension, or by the file's magic
/// bytes when the extension is not recognized.
///
/// Returns an empty image (after logging) on any failure.
pub fn load(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    let Some(format) = ImageFormat::from_path(path).or_else(|| sniff(path)) else {
        log::error!("unknown image format for {}", path.display());
        return Image::empty();
    };
    load_as(path, format)
}

/// Read `path` as `format`.
pub fn load_as(path: impl AsRef<Path>, format: ImageFormat) -> Image {
    let path = path.as_ref();
    match format {
        ImageFormat::Bmp => crate::bmp::load(path),
        ImageFormat::Ppm => crate::pnm::load(path),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::load(path),
        #[cfg(not(feature = "jpeg"))]
        ImageFormat::Jpeg => {
            log::error!("JPEG support not compiled in, cannot load {}", path.display());
            Image::empty()
        }
    }
}

fn sniff(path: &Path) -> Option<ImageFormat> {
    let mut magic = Vec::with_capacity(3);
    File::open(path).ok()?.take(3).read_to_end(&mut magic).ok()?;
    ImageFormat::detect(&magic)
}
