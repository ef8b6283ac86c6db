//! ByteCanvas - standalone viewer.
//!
//! # Usage
//!
//! ```bash
//! bytecanvas path/to/file.bin
//! RUST_LOG=debug bytecanvas path/to/file.bin
//! ```
//!
//! # Keyboard Shortcuts
//!
//! - ESC: Quit
//! - R: Reload the file from disk

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bytecanvas::app::{self, ViewerConfig};
use bytecanvas::util::format_bytes;
use bytecanvas::{pack, Result, SourceBytes};

#[derive(Parser)]
#[command(name = "bytecanvas")]
#[command(author, version, about = "Visualize the raw bytes of a file as an RGB image")]
struct Args {
    /// File to visualize
    path: PathBuf,
}

fn run(args: Args) -> Result<()> {
    // The file is read before any window exists, so a bad path never opens one.
    let source = SourceBytes::load(&args.path)?;
    let canvas = pack(source.as_bytes());
    drop(source);

    tracing::info!(
        length = canvas.source_len(),
        buffer = %format_bytes(canvas.as_bytes().len() as u64),
        dimension = canvas.dimension(),
        "canvas packed"
    );

    app::run(ViewerConfig::new(args.path), canvas)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
