use std::fmt;

use log::error;
use thiserror::Error;

use super::pixel::{self, Bgr, PixelError};
use crate::constants::{BLOCK_SIZE, BYTES_PER_PIXEL, HEADER_SIZE, MAX_DIMENSION};

pub const MAGIC_HEADER: [u8; 8] = *b"SPLASH!!";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "Invalid image dimensions {width}x{height}: both sides must be between 1 and {max}",
    max = MAX_DIMENSION
)]
pub struct DimensionError {
    pub width: u32,
    pub height: u32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Header truncated: got {0} bytes, expected {expected}", expected = HEADER_SIZE)]
    TooShort(usize),
    #[error("Invalid magic number {0:02X?}")]
    BadMagic([u8; 8]),
    #[error("Unsupported body kind {0}")]
    UnsupportedKind(u32),
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<(), DimensionError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(DimensionError { width, height });
    }
    Ok(())
}

/// How the body following the header is stored.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Kind {
    /// Row-major BGR triplets.
    Raw = 0,
    /// Row-local run-length entries.
    #[default]
    Rle = 1,
}

impl TryFrom<u32> for Kind {
    type Error = HeaderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Kind::Raw),
            1 => Ok(Kind::Rle),
            other => Err(HeaderError::UnsupportedKind(other)),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Raw => write!(f, "raw"),
            Kind::Rle => write!(f, "rle"),
        }
    }
}

/// The fixed 512-byte header at the start of every container.
///
/// Fields live at fixed little-endian offsets; everything from
/// [`ContainerHeader::RESERVED_OFFSET`] up to [`HEADER_SIZE`] is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub width: u32,
    pub height: u32,
    pub kind: Kind,
    /// Body length in 512-byte blocks, rounded up. Advisory only.
    pub block_count: u32,
}

impl ContainerHeader {
    pub const SIZE: usize = HEADER_SIZE;
    pub const MAGIC_OFFSET: usize = 0;
    pub const WIDTH_OFFSET: usize = 8;
    pub const HEIGHT_OFFSET: usize = 12;
    pub const KIND_OFFSET: usize = 16;
    pub const BLOCK_COUNT_OFFSET: usize = 20;
    pub const RESERVED_OFFSET: usize = 24;

    pub fn new(
        width: u32,
        height: u32,
        kind: Kind,
        body_len: usize,
    ) -> Result<Self, DimensionError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            kind,
            block_count: Self::blocks_for(body_len),
        })
    }

    /// Number of 512-byte blocks needed to hold `body_len` bytes.
    pub fn blocks_for(body_len: usize) -> u32 {
        u32::try_from(body_len.div_ceil(BLOCK_SIZE)).unwrap_or(u32::MAX)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of a raw body for these dimensions.
    pub fn raw_body_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buffer = [0u8; HEADER_SIZE];
        buffer[Self::MAGIC_OFFSET..Self::WIDTH_OFFSET].copy_from_slice(&MAGIC_HEADER);
        write_u32(&mut buffer, Self::WIDTH_OFFSET, self.width);
        write_u32(&mut buffer, Self::HEIGHT_OFFSET, self.height);
        write_u32(&mut buffer, Self::KIND_OFFSET, self.kind as u32);
        write_u32(&mut buffer, Self::BLOCK_COUNT_OFFSET, self.block_count);
        buffer
    }

    /// Parses the first 512 bytes of `data`. Bytes past the header are not inspected.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < HEADER_SIZE {
            error!("Header truncated: {} bytes available", data.len());
            return Err(HeaderError::TooShort(data.len()));
        }

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&data[Self::MAGIC_OFFSET..Self::WIDTH_OFFSET]);
        if magic != MAGIC_HEADER {
            error!("Invalid magic number in header: {:02X?}", magic);
            return Err(HeaderError::BadMagic(magic));
        }

        let kind = Kind::try_from(read_u32(data, Self::KIND_OFFSET)).inspect_err(|err| {
            error!("{}", err);
        })?;

        let width = read_u32(data, Self::WIDTH_OFFSET);
        let height = read_u32(data, Self::HEIGHT_OFFSET);
        validate_dimensions(width, height).inspect_err(|err| {
            error!("{}", err);
        })?;

        Ok(Self {
            width,
            height,
            kind,
            block_count: read_u32(data, Self::BLOCK_COUNT_OFFSET),
        })
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn write_u32(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// A decoded container: header fields plus the row-major BGR pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashImage {
    pub width: u32,
    pub height: u32,
    pub kind: Kind,
    pub block_count: u32,
    pub bgr_data: Vec<u8>,
}

impl SplashImage {
    pub fn new(header: ContainerHeader, bgr_data: Vec<u8>) -> Self {
        Self {
            width: header.width,
            height: header.height,
            kind: header.kind,
            block_count: header.block_count,
            bgr_data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgr> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let bytes = self.bgr_data.get(index..index + BYTES_PER_PIXEL)?;
        Some(Bgr::from_bytes([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn to_rgba(&self) -> Result<Vec<u8>, PixelError> {
        pixel::bgr_to_rgba(&self.bgr_data)
    }
}
