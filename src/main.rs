// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use scanbridge::aggregate::aggregate_batch;
use scanbridge::bridge::{DecoderHandle, FileSource};
use scanbridge::config::load_and_validate_config;
use scanbridge::luma::PixelBuffer;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <config.yaml|config.toml> <image>", args[0]);
        eprintln!("Example: {} configs/scanbridge.yaml label.png", args[0]);
        std::process::exit(1);
    }

    let config = load_and_validate_config(&args[1])
        .with_context(|| format!("loading config {}", args[1]))?;

    let source = FileSource::new(config.module.clone());
    let mut handle = DecoderHandle::initialize(&source, &config.engine).await?;

    let image = image::open(&args[2])
        .with_context(|| format!("opening image {}", args[2]))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let pixels = PixelBuffer::rgba(image.as_raw(), width, height);

    println!("🔎 Scanning {} ({}x{}, {:?} mode)", args[2], width, height, config.scan.mode);

    match handle.scan(
        &pixels,
        config.scan.hint_configuration(),
        config.scan.filter_image,
        config.scan.mode,
    ) {
        Ok(batch) => {
            println!("Found {} barcode(s)", batch.len());
            for (i, row) in aggregate_batch(&batch).iter().enumerate() {
                println!("\n#{}", i + 1);
                println!("{row}");
            }
        }
        Err(error) => {
            println!("Issue decoding: {}", error.diagnostic());
        }
    }

    Ok(())
}
