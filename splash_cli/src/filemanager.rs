use std::fs::{self, File};
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};
use lib_splash::constants::HEADER_SIZE;
use lib_splash::image::decoder::DecodeError;
use lib_splash::image::encoder::EncodingError;
use lib_splash::image::pixel::{self, PixelError};
use lib_splash::{decode, decode_header, encode, ContainerHeader, EncodeOptions};
use log::{debug, info};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Image processing error")]
    ImageError(#[from] ImageError),

    #[error("Failed to encode splash container")]
    EncodeError(#[from] EncodingError),

    #[error("Failed to decode splash container")]
    DecodeError(#[from] DecodeError),

    #[error("Pixel conversion failed")]
    PixelError(#[from] PixelError),

    #[error("Failed to move output file into place")]
    PersistError(#[from] tempfile::PersistError),

    #[error("Decoded pixels do not fill a {width}x{height} image")]
    BufferMismatch { width: u32, height: u32 },
}

/// Header fields plus the on-disk size of a container.
#[derive(Debug)]
pub struct ContainerInfo {
    pub header: ContainerHeader,
    pub body_len: u64,
}

/// Opens an image by extension, falling back to sniffing its content.
fn load_image(path: &Path) -> Result<DynamicImage, ConvertError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(ImageError::Unsupported(err)) => {
            debug!("{}, guessing format from content", err);
            Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
        }
        Err(err) => Err(err.into()),
    }
}

/// Writes next to `path` first and renames on success, so a failed
/// conversion never leaves a partial file under the final name.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), ConvertError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub fn encode_file(
    input: &Path,
    output: &Path,
    options: &EncodeOptions,
) -> Result<(), ConvertError> {
    info!("Parsing image: {} -> {}", input.display(), output.display());
    let img = load_image(input)?;
    let (width, height) = (img.width(), img.height());
    info!("Width: {} Height: {} Kind: {}", width, height, options.kind);

    // Alpha is dropped here; 16-bit samples are truncated to 8 bits below
    let samples = img.to_rgb16();
    let bgr_data = pixel::bgr_from_rgb16(samples.as_raw())?;

    let encoded = encode(width, height, &bgr_data, options)?;
    write_atomically(output, &encoded)?;

    info!("Done! {} bytes written", encoded.len());
    Ok(())
}

pub fn decode_file(input: &Path, output: &Path) -> Result<(), ConvertError> {
    info!("Parsing: {} -> {}", input.display(), output.display());
    let data = fs::read(input)?;

    let splash = decode(&data)?;
    info!(
        "Width: {} Height: {} Kind: {}",
        splash.width, splash.height, splash.kind
    );

    let rgba = splash.to_rgba()?;
    let img = RgbaImage::from_raw(splash.width, splash.height, rgba).ok_or(
        ConvertError::BufferMismatch {
            width: splash.width,
            height: splash.height,
        },
    )?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    write_atomically(output, &png)?;

    info!("Done!");
    Ok(())
}

/// Reads only the header of a container.
pub fn inspect_file(input: &Path) -> Result<ContainerInfo, ConvertError> {
    let file = File::open(input)?;
    let file_len = file.metadata()?.len();

    let mut header_bytes = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64).read_to_end(&mut header_bytes)?;
    let header = decode_header(&header_bytes)?;

    Ok(ContainerInfo {
        header,
        body_len: file_len.saturating_sub(HEADER_SIZE as u64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba};
    use lib_splash::Kind;
    use tempfile::tempdir;

    fn logo() -> RgbImage {
        RgbImage::from_fn(40, 12, |x, y| {
            if (8..32).contains(&x) && (3..9).contains(&y) {
                Rgb([0xE0, 0x80, 0x20])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_encode_decode_png_round_trip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("logo.png");
        let container = dir.path().join("splash.img");
        let restored = dir.path().join("restored.png");
        logo().save(&source).unwrap();

        for options in [EncodeOptions::rle(), EncodeOptions::raw()] {
            encode_file(&source, &container, &options).unwrap();
            let info = inspect_file(&container).unwrap();
            assert_eq!(info.header.kind, options.kind);
            assert_eq!((info.header.width, info.header.height), (40, 12));

            decode_file(&container, &restored).unwrap();
            let output = image::open(&restored).unwrap().to_rgb8();
            assert_eq!(output, logo());
        }
    }

    #[test]
    fn test_rle_container_is_smaller_than_raw() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("logo.png");
        logo().save(&source).unwrap();

        let rle = dir.path().join("rle.img");
        let raw = dir.path().join("raw.img");
        encode_file(&source, &rle, &EncodeOptions::rle()).unwrap();
        encode_file(&source, &raw, &EncodeOptions::raw()).unwrap();

        let raw_info = inspect_file(&raw).unwrap();
        assert_eq!(raw_info.body_len, 40 * 12 * 3);
        assert_eq!(raw_info.body_len, raw_info.header.raw_body_len() as u64);
        assert!(inspect_file(&rle).unwrap().body_len < raw_info.body_len);
    }

    #[test]
    fn test_content_sniffing_without_extension() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("logo");
        let container = dir.path().join("splash.img");
        logo().save_with_format(&source, ImageFormat::Png).unwrap();

        encode_file(&source, &container, &EncodeOptions::rle()).unwrap();
        assert_eq!(inspect_file(&container).unwrap().header.width, 40);
    }

    #[test]
    fn test_sixteen_bit_samples_are_truncated() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("deep.png");
        let container = dir.path().join("deep.img");
        ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(3, 1, Rgb([0x12FF, 0x00FF, 0xFF00]))
            .save(&source)
            .unwrap();

        encode_file(&source, &container, &EncodeOptions::raw()).unwrap();
        let data = fs::read(&container).unwrap();
        assert_eq!(&data[HEADER_SIZE..HEADER_SIZE + 3], &[0xFF, 0x00, 0x12]);
    }

    #[test]
    fn test_alpha_is_discarded() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("alpha.png");
        let container = dir.path().join("alpha.img");
        let restored = dir.path().join("alpha_out.png");
        RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]))
            .save(&source)
            .unwrap();

        encode_file(&source, &container, &EncodeOptions::rle()).unwrap();
        decode_file(&container, &restored).unwrap();

        let output = image::open(&restored).unwrap().to_rgba8();
        assert!(output.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_failed_decode_leaves_no_output() {
        let dir = tempdir().unwrap();
        let container = dir.path().join("broken.img");
        let restored = dir.path().join("broken.png");

        let mut data = ContainerHeader::new(4, 4, Kind::Rle, 2)
            .unwrap()
            .to_bytes()
            .to_vec();
        data.extend_from_slice(&[0x83, 0x01]);
        fs::write(&container, &data).unwrap();

        assert!(matches!(
            decode_file(&container, &restored),
            Err(ConvertError::DecodeError(_))
        ));
        assert!(!restored.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_encode_keeps_existing_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.png");
        let container = dir.path().join("splash.img");
        fs::write(&container, b"previous").unwrap();

        assert!(encode_file(&source, &container, &EncodeOptions::rle()).is_err());
        assert_eq!(fs::read(&container).unwrap(), b"previous");
    }

    #[test]
    fn test_inspect_rejects_short_file() {
        let dir = tempdir().unwrap();
        let container = dir.path().join("short.img");
        fs::write(&container, b"SPLASH!!").unwrap();

        assert!(matches!(
            inspect_file(&container),
            Err(ConvertError::DecodeError(_))
        ));
    }
}
