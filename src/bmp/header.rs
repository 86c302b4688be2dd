//! BITMAPFILEHEADER / BITMAPINFOHEADER wire layout.
//!
//! Both headers are serialized field by field, little-endian, at the fixed
//! offsets of the on-disk format. Nothing here depends on struct memory
//! layout.

pub(crate) const FILE_HEADER_SIZE: usize = 14;
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// Offset of the pixel data when both headers are written back to back.
pub(crate) const PIXEL_DATA_OFFSET: u32 = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32;

pub(crate) const SIGNATURE: [u8; 2] = *b"BM";
pub(crate) const BITS_PER_PIXEL: u16 = 24;
pub(crate) const COMPRESSION_NONE: u32 = 0;
/// 300 DPI in pixels per meter.
const RESOLUTION: i32 = 11811;
const COLORS_IMPORTANT: u32 = 0x100_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub pixel_data_offset: u32,
}

impl FileHeader {
    pub fn new(image_size: u32) -> Self {
        Self {
            signature: SIGNATURE,
            file_size: PIXEL_DATA_OFFSET + image_size,
            reserved: 0,
            pixel_data_offset: PIXEL_DATA_OFFSET,
        }
    }

    pub fn to_bytes(self) -> [u8; FILE_HEADER_SIZE] {
        let mut b = [0u8; FILE_HEADER_SIZE];
        b[0..2].copy_from_slice(&self.signature);
        b[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        b[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        b[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        b
    }

    pub fn from_bytes(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved: u32_at(b, 6),
            pixel_data_offset: u32_at(b, 10),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up rows, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Header for a bottom-up 24-bit uncompressed image.
    pub fn new(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: 1,
            bit_count: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            image_size,
            x_pixels_per_meter: RESOLUTION,
            y_pixels_per_meter: RESOLUTION,
            colors_used: 0,
            colors_important: COLORS_IMPORTANT,
        }
    }

    pub fn to_bytes(self) -> [u8; INFO_HEADER_SIZE] {
        let mut b = [0u8; INFO_HEADER_SIZE];
        b[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        b[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        b[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        b[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        b
    }

    pub fn from_bytes(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: u32_at(b, 4) as i32,
            height: u32_at(b, 8) as i32,
            planes: u16_at(b, 12),
            bit_count: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: u32_at(b, 24) as i32,
            y_pixels_per_meter: u32_at(b, 28) as i32,
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}
