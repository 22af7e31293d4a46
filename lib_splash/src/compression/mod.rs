pub mod raw;
pub mod rle;

use log::{debug, info};
use raw::{RawCompressionError, RawDecompressionError};
use rle::{RleCompressionError, RleDecompressionError};
use thiserror::Error;

use crate::image::format::{validate_dimensions, DimensionError, Kind};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompressionError {
    #[error(transparent)]
    InvalidDimensions(#[from] DimensionError),
    #[error("Raw encoding failed")]
    RawCompressionFailed(#[from] RawCompressionError),
    #[error("RLE compression failed")]
    RleCompressionFailed(#[from] RleCompressionError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecompressionError {
    #[error(transparent)]
    InvalidDimensions(#[from] DimensionError),
    #[error("Raw decoding failed")]
    RawDecompressionFailed(#[from] RawDecompressionError),
    #[error("RLE decompression failed")]
    RleDecompressionFailed(#[from] RleDecompressionError),
}

/// Produces a container body of the given kind from row-major BGR pixels.
pub fn compress(
    kind: Kind,
    width: u32,
    height: u32,
    bgr_data: &[u8],
) -> Result<Vec<u8>, CompressionError> {
    info!("Starting {} compression of {}x{} image", kind, width, height);
    validate_dimensions(width, height)?;
    debug!("Input data length: {}", bgr_data.len());

    let (width, height) = (width as usize, height as usize);
    let body = match kind {
        Kind::Raw => raw::raw_compression(bgr_data, width, height)?,
        Kind::Rle => rle::rle_compression(bgr_data, width, height)?,
    };

    info!(
        "Compression completed successfully: {:.1}%",
        (1.0 - body.len() as f32 / bgr_data.len() as f32) * 100.0
    );
    Ok(body)
}

/// Rebuilds row-major BGR pixels from a container body.
pub fn decompress(
    kind: Kind,
    width: u32,
    height: u32,
    body: &[u8],
) -> Result<Vec<u8>, DecompressionError> {
    info!("Starting {} decompression of {}x{} image", kind, width, height);
    validate_dimensions(width, height)?;
    debug!("Body length: {}", body.len());

    let (width, height) = (width as usize, height as usize);
    let bgr_data = match kind {
        Kind::Raw => raw::raw_decompression(body, width, height)?,
        Kind::Rle => rle::rle_decompression(body, width, height)?,
    };

    info!("Decompression completed successfully");
    Ok(bgr_data)
}
