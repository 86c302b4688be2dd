//! # imglib
//!
//! An owned RGB pixel buffer ([`Image`]) with BMP, PPM and JPEG file codecs.
//!
//! ## Supported Formats
//!
//! ### BMP ([`bmp`])
//! - Uncompressed 24-bit BITMAPINFOHEADER files, encode and decode
//! - Rows written bottom-up, padded to 4 bytes
//!
//! ### PPM ([`pnm`])
//! - Binary `P6`, max value 255, encode and decode
//!
//! ### JPEG ([`jpeg`], `jpeg` feature, on by default)
//! - Baseline encode and decode through the `image` crate
//!
//! ## Non-Goals
//!
//! - Other BMP bit depths, palettes, RLE or bitfields
//! - ASCII or 16-bit PNM variants
//! - Resizing, filtering, color management
//!
//! ## Two API levels
//!
//! Each codec has `save(path, &Image) -> bool` and `load(path) -> Image`,
//! which log failures through the [`log`] facade and report them as `false`
//! or an empty image. Underneath are `encode` / `decode` over any
//! `Write` / `Read`, returning [`BitmapError`].
//!
//! ## Usage
//!
//! ```no_run
//! use imglib::{Color, Image};
//!
//! let mut image = Image::new(4, 2, Image::BLACK);
//! image.row_mut(0).fill(Color::new(255, 0, 0, 255));
//!
//! assert!(imglib::bmp::save("out.bmp", &image));
//! let back = imglib::bmp::load("out.bmp");
//! assert_eq!(back.row(0)[0], Color::new(255, 0, 0, 255));
//!
//! // Or let the extension pick the codec.
//! assert!(imglib::save("out.ppm", &back));
//!
//! // Result-based, in memory.
//! let bytes = imglib::bmp::encode_to_vec(&image)?;
//! let decoded = imglib::bmp::decode_from_slice(&bytes)?;
//! assert_eq!(decoded.width(), 4);
//! # Ok::<(), imglib::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod error;
mod file;
mod format;
mod limits;

pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
pub mod pnm;

// Re-exports
pub use buffer::{Color, Image};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use file::{load, load_as, save, save_as};
pub use format::ImageFormat;
pub use limits::Limits;
