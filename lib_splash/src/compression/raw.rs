use log::{debug, error};
use thiserror::Error;

use crate::constants::BYTES_PER_PIXEL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RawCompressionError {
    #[error("Invalid pixel data length: expected {expected} bytes for the image, got {actual}")]
    InvalidPixelDataLength { expected: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RawDecompressionError {
    #[error("Size mismatch: expected {expected} bytes of raw pixels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Raw bodies are the BGR buffer itself; this only checks its size.
pub fn raw_compression(
    bgr_data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, RawCompressionError> {
    let expected = width * height * BYTES_PER_PIXEL;
    if bgr_data.len() != expected {
        return Err(RawCompressionError::InvalidPixelDataLength {
            expected,
            actual: bgr_data.len(),
        });
    }
    Ok(bgr_data.to_vec())
}

/// Takes the first `width * height` pixels of a raw body. Anything after
/// them is block padding and is dropped.
pub fn raw_decompression(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, RawDecompressionError> {
    let expected = width.saturating_mul(height).saturating_mul(BYTES_PER_PIXEL);
    let Some(pixels) = data.get(..expected) else {
        error!(
            "Raw body holds {} bytes, image needs {}",
            data.len(),
            expected
        );
        return Err(RawDecompressionError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    };

    if data.len() > expected {
        debug!("Ignoring {} trailing bytes after raw body", data.len() - expected);
    }
    Ok(pixels.to_vec())
}
