mod config;
mod filemanager;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use log::{error, LevelFilter};

use crate::filemanager::ConvertError;

#[derive(FromArgs, Debug)]
/// Convert images to and from firmware splash containers.
///
/// Set RLE24=0 in the environment to write uncompressed bodies.
struct Args {
    /// log level: off, error, warn, info, debug or trace
    #[argh(option, default = "LevelFilter::Info")]
    log_level: LevelFilter,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Encode(EncodeCommand),
    Decode(DecodeCommand),
    Info(InfoCommand),
}

#[derive(FromArgs, Debug)]
/// Encode an image file into a splash container.
#[argh(subcommand, name = "encode")]
struct EncodeCommand {
    /// source image (png, jpeg, bmp, ...)
    #[argh(positional)]
    image: PathBuf,

    /// container file to write
    #[argh(positional)]
    container: PathBuf,

    /// store pixels uncompressed instead of run-length encoded
    #[argh(switch)]
    raw: bool,
}

#[derive(FromArgs, Debug)]
/// Decode a splash container into a PNG image.
#[argh(subcommand, name = "decode")]
struct DecodeCommand {
    /// container file to read
    #[argh(positional)]
    container: PathBuf,

    /// PNG file to write
    #[argh(positional)]
    image: PathBuf,
}

#[derive(FromArgs, Debug)]
/// Print the header of a splash container.
#[argh(subcommand, name = "info")]
struct InfoCommand {
    /// container file to read
    #[argh(positional)]
    container: PathBuf,
}

fn run(command: Command) -> Result<(), ConvertError> {
    match command {
        Command::Encode(cmd) => {
            let options = config::encode_options_from_env(cmd.raw);
            filemanager::encode_file(&cmd.image, &cmd.container, &options)
        }
        Command::Decode(cmd) => filemanager::decode_file(&cmd.container, &cmd.image),
        Command::Info(cmd) => {
            let info = filemanager::inspect_file(&cmd.container)?;
            println!("Width:  {}", info.header.width);
            println!("Height: {}", info.header.height);
            println!("Kind:   {}", info.header.kind);
            println!("Blocks: {}", info.header.block_count);
            println!("Body:   {} bytes", info.body_len);
            println!("Raw:    {} bytes", info.header.raw_body_len());
            Ok(())
        }
    }
}

/// Joins an error with all of its sources, outermost first.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    lib_splash::init_logging(args.log_level);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}
