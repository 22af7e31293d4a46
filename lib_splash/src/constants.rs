/// The firmware reads exactly this many bytes before the body.
pub const HEADER_SIZE: usize = 512;
/// Unit of the advisory block count stored in the header.
pub const BLOCK_SIZE: usize = 512;

pub const BYTES_PER_PIXEL: usize = 3;
/// Longest literal or repeat run a single control byte can describe.
pub const MAX_RUN_LENGTH: usize = 128;
/// Upper bound for either side of an image, keeps allocations sane.
pub const MAX_DIMENSION: u32 = 8192;

/// Environment variable that switches the encoder to raw bodies when set to `0`.
pub const RLE_TOGGLE_ENV: &str = "RLE24";
