pub mod decoder;
pub mod encoder;
pub mod format;
pub mod pixel;

pub use decoder::{decode, decode_header};
pub use encoder::{encode, encode_header, EncodeOptions};
