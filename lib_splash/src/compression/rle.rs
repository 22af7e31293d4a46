//! Row-local run-length coding of BGR scanlines.
//!
//! Every entry starts with a control byte:
//!
//! ```text
//! 0x00..=0x7F  literal run, (byte + 1) BGR triplets follow verbatim
//! 0x80..=0xFF  repeat run, one BGR triplet follows, repeated (byte - 127) times
//! ```
//!
//! Runs never cross a row boundary, so each row decodes on its own.

use log::{debug, error};
use thiserror::Error;

use crate::constants::{BYTES_PER_PIXEL, MAX_RUN_LENGTH};
use crate::image::pixel::{self, Bgr};

const REPEAT_FLAG: u8 = 0x80;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RleCompressionError {
    #[error("Invalid pixel data length: expected {expected} bytes for the image, got {actual}")]
    InvalidPixelDataLength { expected: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RleDecompressionError {
    #[error("Unexpected end of data at offset {offset}: run needs {needed} bytes, {available} left")]
    UnexpectedEndOfData {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Size mismatch: expected {expected} pixels, stream produced {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Run of {count} pixels at offset {offset} overruns row {row} ({remaining} pixels left in row)")]
    RowOverrun {
        row: usize,
        offset: usize,
        count: usize,
        remaining: usize,
    },
}

/// One control byte plus its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEntry<'a> {
    /// Pixels stored verbatim, 1 to 128 of them.
    Literal(&'a [Bgr]),
    /// A single pixel repeated 1 to 128 times.
    Repeat { pixel: Bgr, count: usize },
}

impl RunEntry<'_> {
    pub fn pixel_count(&self) -> usize {
        match self {
            RunEntry::Literal(pixels) => pixels.len(),
            RunEntry::Repeat { count, .. } => *count,
        }
    }

    pub fn control_byte(&self) -> u8 {
        debug_assert!((1..=MAX_RUN_LENGTH).contains(&self.pixel_count()));
        match self {
            RunEntry::Literal(pixels) => (pixels.len() - 1) as u8,
            RunEntry::Repeat { count, .. } => (count - 1) as u8 | REPEAT_FLAG,
        }
    }

    /// Size of the serialized entry in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            RunEntry::Literal(pixels) => 1 + pixels.len() * BYTES_PER_PIXEL,
            RunEntry::Repeat { .. } => 1 + BYTES_PER_PIXEL,
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.control_byte());
        match self {
            RunEntry::Literal(pixels) => {
                for pixel in pixels.iter() {
                    out.extend_from_slice(&pixel.to_bytes());
                }
            }
            RunEntry::Repeat { pixel, .. } => out.extend_from_slice(&pixel.to_bytes()),
        }
    }
}

/// Splits one scanline into run entries.
///
/// A stretch of two or more equal neighbours becomes repeat entries of at most
/// 128 pixels each, the last one possibly holding a single pixel. Everything
/// else is gathered into literal entries of at most 128 pixels. The pixel
/// counts of the returned entries always add up to `row.len()`.
pub fn encode_row(row: &[Bgr]) -> Vec<RunEntry<'_>> {
    let mut entries = Vec::new();
    let mut start = 0;

    while start < row.len() {
        let rest = &row[start..];
        let first = rest[0];
        let same = rest.iter().take_while(|&&p| p == first).count();

        if same >= 2 {
            let mut left = same;
            while left > 0 {
                let count = left.min(MAX_RUN_LENGTH);
                entries.push(RunEntry::Repeat {
                    pixel: first,
                    count,
                });
                left -= count;
            }
            start += same;
            continue;
        }

        // Literal: take pixels until one equals its successor or the cap is hit
        let limit = rest.len().min(MAX_RUN_LENGTH);
        let mut count = 1;
        while count < limit && (count + 1 == rest.len() || rest[count] != rest[count + 1]) {
            count += 1;
        }
        entries.push(RunEntry::Literal(&rest[..count]));
        start += count;
    }

    entries
}

/// RLE-compresses a row-major BGR buffer of `width * height` pixels.
///
/// # Errors
/// - Returns `RleCompressionError::InvalidPixelDataLength` if `bgr_data` does not hold exactly `width * height` pixels
pub fn rle_compression(
    bgr_data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, RleCompressionError> {
    let row_len = width * BYTES_PER_PIXEL;
    let expected = row_len * height;
    if bgr_data.len() != expected || width == 0 {
        return Err(RleCompressionError::InvalidPixelDataLength {
            expected,
            actual: bgr_data.len(),
        });
    }

    let mut encoded = Vec::with_capacity(bgr_data.len() / 2);
    let mut row = Vec::with_capacity(width);

    for row_bytes in bgr_data.chunks_exact(row_len) {
        row.clear();
        row.extend(pixel::pixels(row_bytes));

        let entries = encode_row(&row);
        debug_assert_eq!(
            entries.iter().map(RunEntry::pixel_count).sum::<usize>(),
            width
        );
        for entry in &entries {
            entry.write_to(&mut encoded);
        }
    }

    debug!(
        "RLE encoded {} rows into {} bytes (raw {} bytes)",
        height,
        encoded.len(),
        bgr_data.len()
    );
    Ok(encoded)
}

/// Decodes an RLE stream into exactly `width * height` BGR pixels.
///
/// Decoding stops after the last row; any trailing bytes are padding and are
/// never read.
///
/// # Errors
/// - `UnexpectedEndOfData` if a run's payload is cut off
/// - `SizeMismatch` if the stream ends before every row is complete
/// - `RowOverrun` if a run would spill into the next row
pub fn rle_decompression(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, RleDecompressionError> {
    let expected = width.saturating_mul(height);
    // A stream can never expand past 128 pixels per 4 bytes
    let ceiling = data.len() / (1 + BYTES_PER_PIXEL) * MAX_RUN_LENGTH * BYTES_PER_PIXEL;
    let mut decoded = Vec::with_capacity(expected.saturating_mul(BYTES_PER_PIXEL).min(ceiling));
    let mut cursor = 0;

    for row in 0..height {
        let mut produced = 0;

        while produced < width {
            let Some(&control) = data.get(cursor) else {
                let actual = row * width + produced;
                error!(
                    "RLE stream exhausted after {} of {} pixels",
                    actual, expected
                );
                return Err(RleDecompressionError::SizeMismatch { expected, actual });
            };

            let is_repeat = control & REPEAT_FLAG != 0;
            let count = (control & !REPEAT_FLAG) as usize + 1;
            let remaining = width - produced;
            if count > remaining {
                error!("RLE run of {} overruns row {}", count, row);
                return Err(RleDecompressionError::RowOverrun {
                    row,
                    offset: cursor,
                    count,
                    remaining,
                });
            }
            cursor += 1;

            let needed = if is_repeat {
                BYTES_PER_PIXEL
            } else {
                count * BYTES_PER_PIXEL
            };
            let Some(payload) = data.get(cursor..cursor + needed) else {
                error!("Unexpected end of data during RLE run at offset {}", cursor);
                return Err(RleDecompressionError::UnexpectedEndOfData {
                    offset: cursor,
                    needed,
                    available: data.len() - cursor,
                });
            };

            if is_repeat {
                for _ in 0..count {
                    decoded.extend_from_slice(payload);
                }
            } else {
                decoded.extend_from_slice(payload);
            }

            cursor += needed;
            produced += count;
        }
    }

    if cursor < data.len() {
        debug!("Ignoring {} trailing bytes after RLE body", data.len() - cursor);
    }

    Ok(decoded)
}
