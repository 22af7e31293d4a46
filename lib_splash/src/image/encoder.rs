use log::{debug, info};
use thiserror::Error;

use super::format::{validate_dimensions, ContainerHeader, DimensionError, Kind};
use crate::compression::{compress, CompressionError};
use crate::constants::HEADER_SIZE;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error(transparent)]
    InvalidDimensions(#[from] DimensionError),
    #[error("Failed to compress image data")]
    CompressionFailed(#[from] CompressionError),
}

/// Settings for a single encode call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub kind: Kind,
}

impl EncodeOptions {
    pub fn raw() -> Self {
        Self { kind: Kind::Raw }
    }

    pub fn rle() -> Self {
        Self { kind: Kind::Rle }
    }
}

/// Builds the 512-byte header for a body of `body_len` bytes.
pub fn encode_header(
    width: u32,
    height: u32,
    kind: Kind,
    body_len: usize,
) -> Result<[u8; HEADER_SIZE], EncodingError> {
    let header = ContainerHeader::new(width, height, kind, body_len)?;
    Ok(header.to_bytes())
}

pub fn encode(
    width: u32,
    height: u32,
    bgr_data: &[u8],
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodingError> {
    info!("Starting encoding");
    validate_dimensions(width, height)?;

    // Step 1: Compress the pixel data
    let body = compress(options.kind, width, height, bgr_data)?;
    debug!("Body encoded as {}: {} bytes", options.kind, body.len());

    // Step 2: Header fields are derived from the finished body
    let header = ContainerHeader::new(width, height, options.kind, body.len())?;
    debug!(
        "Header written:\nWidth: {}\nHeight: {}\nKind: {}\nBlocks: {}",
        header.width, header.height, header.kind, header.block_count
    );

    let mut encoded_data = Vec::with_capacity(HEADER_SIZE + body.len());
    encoded_data.extend_from_slice(&header.to_bytes());
    encoded_data.extend_from_slice(&body);

    info!("Encoding process completed successfully");
    Ok(encoded_data)
}
