pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::image::format::{ContainerHeader, Kind, SplashImage};
pub use crate::image::pixel::Bgr;
pub use crate::image::{decode, decode_header, encode, EncodeOptions};

/// Installs an `env_logger` backend on stderr.
///
/// `level` applies to this library and the `splashimg` binary; `RUST_LOG`
/// directives are parsed afterwards and take precedence.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_splash"), level)
        .filter(Some("splashimg"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
