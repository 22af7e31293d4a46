use log::{debug, info, warn};
use thiserror::Error;

use super::format::{ContainerHeader, HeaderError, SplashImage};
use crate::compression::{decompress, DecompressionError};
use crate::constants::HEADER_SIZE;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid format or header")]
    InvalidHeader(#[from] HeaderError),

    #[error("Decompression failed")]
    DecompressionFailed(#[from] DecompressionError),
}

/// Parses only the header. Useful for inspecting a container without decoding the body.
pub fn decode_header(encoded_data: &[u8]) -> Result<ContainerHeader, DecodeError> {
    let header = ContainerHeader::from_bytes(encoded_data)?;
    debug!(
        "Header read: width={} height={} kind={} blocks={}",
        header.width, header.height, header.kind, header.block_count
    );
    Ok(header)
}

pub fn decode(encoded_data: &[u8]) -> Result<SplashImage, DecodeError> {
    info!("Starting decoding");

    let header = decode_header(encoded_data)?;
    let body = &encoded_data[HEADER_SIZE..];
    debug!("Body length: {}", body.len());

    // The block count is only a hint, never a read bound
    let expected_blocks = ContainerHeader::blocks_for(body.len());
    if header.block_count != expected_blocks {
        warn!(
            "Header declares {} blocks but body spans {}; ignoring",
            header.block_count, expected_blocks
        );
    }

    let bgr_data = decompress(header.kind, header.width, header.height, body)?;
    info!("Decoding process completed successfully");

    Ok(SplashImage::new(header, bgr_data))
}
