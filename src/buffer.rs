use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

/// One pixel: 8-bit red, green, blue and alpha.
///
/// BMP, PPM and JPEG are opaque formats; alpha is never written and decoders
/// always produce `a == 255`.
pub type Color = RGBA8;

/// An owned, row-major grid of [`Color`] pixels.
///
/// A 0x0 image (see [`Image::empty`]) is what the path-level `load`
/// functions return on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
}

impl Image {
    /// Opaque black.
    pub const BLACK: Color = RGBA8 {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Allocate a `width` x `height` image with every pixel set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        let len = width
            .checked_mul(height)
            .expect("image dimensions overflow usize");
        Self {
            pixels: vec![fill; len],
            width,
            height,
        }
    }

    /// Wrap row-major `pixels`. `None` unless `pixels.len() == width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Option<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    /// The 0x0 image.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row `y`, exactly `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Color] {
        assert!(y < self.height, "row {y} out of range for height {}", self.height);
        &self.pixels[y * self.width..][..self.width]
    }

    /// Mutable row `y`, exactly `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        assert!(y < self.height, "row {y} out of range for height {}", self.height);
        &mut self.pixels[y * self.width..][..self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> + DoubleEndedIterator + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Pixel at (`x`, `y`), or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Borrow as an [`imgref::ImgRef`]. `None` for an image with a zero
    /// dimension, which `imgref` cannot represent.
    pub fn as_imgref(&self) -> Option<ImgRef<'_, Color>> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(ImgRef::new(&self.pixels[..], self.width, self.height))
    }
}

impl From<ImgVec<Color>> for Image {
    fn from(img: ImgVec<Color>) -> Self {
        let img = img.as_ref();
        let mut pixels = Vec::with_capacity(img.width() * img.height());
        for row in img.rows() {
            pixels.extend_from_slice(row);
        }
        Self {
            pixels,
            width: img.width(),
            height: img.height(),
        }
    }
}
