use thiserror::Error;

use crate::constants::BYTES_PER_PIXEL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PixelError {
    #[error("Invalid sample length: expected a multiple of 3 RGB samples, got {0}")]
    InvalidSampleLength(usize),
    #[error("Invalid pixel data length: expected multiple of 3 bytes, got {0}")]
    InvalidPixelDataLength(usize),
}

/// One pixel as it is laid out in a container body: blue, green, red.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Keeps the high byte of each 16-bit sample.
    ///
    /// This is a plain truncation, not a rounding: `0x12FF` becomes `0x12`.
    pub const fn from_rgb16(r: u16, g: u16, b: u16) -> Self {
        Self {
            b: (b >> 8) as u8,
            g: (g >> 8) as u8,
            r: (r >> 8) as u8,
        }
    }

    pub const fn from_bytes(bytes: [u8; BYTES_PER_PIXEL]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    pub const fn to_bytes(self) -> [u8; BYTES_PER_PIXEL] {
        [self.b, self.g, self.r]
    }

    /// RGBA with an opaque alpha channel.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

/// Reads a BGR byte buffer as pixels. Any incomplete trailing triplet is dropped.
pub fn pixels(bgr_data: &[u8]) -> impl Iterator<Item = Bgr> + '_ {
    bgr_data
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|chunk| Bgr::from_bytes([chunk[0], chunk[1], chunk[2]]))
}

/// Converts interleaved 16-bit RGB samples into a BGR body.
///
/// # Errors
/// - Returns `PixelError::InvalidSampleLength` if `samples` is not a whole number of pixels
pub fn bgr_from_rgb16(samples: &[u16]) -> Result<Vec<u8>, PixelError> {
    if samples.len() % 3 != 0 {
        return Err(PixelError::InvalidSampleLength(samples.len()));
    }

    let mut bgr_data = Vec::with_capacity(samples.len());
    for rgb in samples.chunks_exact(3) {
        bgr_data.extend_from_slice(&Bgr::from_rgb16(rgb[0], rgb[1], rgb[2]).to_bytes());
    }
    Ok(bgr_data)
}

/// Converts interleaved 8-bit RGB samples into a BGR body.
///
/// # Errors
/// - Returns `PixelError::InvalidSampleLength` if `samples` is not a whole number of pixels
pub fn bgr_from_rgb8(samples: &[u8]) -> Result<Vec<u8>, PixelError> {
    if samples.len() % 3 != 0 {
        return Err(PixelError::InvalidSampleLength(samples.len()));
    }

    let mut bgr_data = Vec::with_capacity(samples.len());
    for rgb in samples.chunks_exact(3) {
        bgr_data.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
    }
    Ok(bgr_data)
}

/// Expands a BGR body into RGBA bytes, alpha always 255.
pub fn bgr_to_rgba(bgr_data: &[u8]) -> Result<Vec<u8>, PixelError> {
    if bgr_data.len() % BYTES_PER_PIXEL != 0 {
        return Err(PixelError::InvalidPixelDataLength(bgr_data.len()));
    }

    let mut rgba_data = Vec::with_capacity(bgr_data.len() / BYTES_PER_PIXEL * 4);
    for pixel in pixels(bgr_data) {
        rgba_data.extend_from_slice(&pixel.to_rgba());
    }
    Ok(rgba_data)
}
