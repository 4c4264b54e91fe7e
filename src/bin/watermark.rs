//! # Watermark CLI
//!
//! Thin command-line wrapper around the `image_watermarker` library.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin watermark -- embed --text "owner:me" input.png output.png
//! cargo run --bin watermark -- verify --text "owner:me" output.png
//! ```
//!
//! The container format is inferred from the file extension unless
//! `--format` is given. `verify` exits with status 1 on mismatch.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use image_watermarker::{add_watermark, check_watermark, WatermarkFormat};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a watermark into an image file
    Embed {
        /// Input image path
        input: PathBuf,
        /// Output path for the watermarked image
        output: PathBuf,
        /// Watermark text to embed
        #[arg(short, long)]
        text: String,
        /// Container format (png, webp, jpeg, avif, heic, heif);
        /// inferred from the input extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Verify that an image carries an expected watermark
    Verify {
        /// Watermarked image path
        input: PathBuf,
        /// Expected watermark text
        #[arg(short, long)]
        text: String,
        /// Container format; inferred from the input extension when omitted
        #[arg(short, long)]
        format: Option<String>,
        /// Print the verification result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Resolve the watermark format from an explicit flag or the file extension.
fn resolve_format(flag: Option<&str>, path: &Path) -> Result<WatermarkFormat> {
    let ext = match flag {
        Some(f) => f.to_string(),
        None => path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string)
            .with_context(|| format!("No file extension on {} to infer a format from", path.display()))?,
    };
    Ok(WatermarkFormat::from_extension(&ext)?)
}

fn run() -> Result<bool> {
    let args = Args::parse();

    match args.command {
        Command::Embed {
            input,
            output,
            text,
            format,
        } => {
            let format = resolve_format(format.as_deref(), &input)?;
            let bytes = fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let marked = add_watermark(&bytes, &text, format)?;
            fs::write(&output, marked)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            log::info!(
                "Embedded {}-character watermark into {}",
                text.chars().count(),
                output.display()
            );
            Ok(true)
        }
        Command::Verify {
            input,
            text,
            format,
            json,
        } => {
            let format = resolve_format(format.as_deref(), &input)?;
            let bytes = fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let verification = check_watermark(&bytes, &text, format)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verification)?);
            } else if verification.matched {
                println!("Watermark verified: {:?}", verification.recovered);
            } else {
                println!(
                    "Watermark mismatch: expected {:?}, recovered {:?}",
                    text, verification.recovered
                );
            }
            Ok(verification.matched)
        }
    }
}

fn main() -> ExitCode {
    init_logger();
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
