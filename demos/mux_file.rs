//! File embedding example.
//!
//! Run with:
//!     cargo run --example mux_file -- embed <carrier> <message> <out> [offset]
//!     cargo run --example mux_file -- extract <muxed> [offset]

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use stegrs::{Context, EmbedJob, ExtractJob};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let ctx = Context::new(1)?;

    match args.first().map(String::as_str) {
        Some("embed") if args.len() >= 4 => {
            let offset: u64 = args.get(4).map(|s| s.parse()).transpose()?.unwrap_or(0);
            let carrier = File::open(&args[1])?;
            let message = File::open(&args[2])?;
            let carrier_size = carrier.metadata()?.len();
            let message_size = message.metadata()?.len();

            let summary = EmbedJob::new(ctx)
                .with_offset(offset)
                .with_framing(true)
                .with_carrier_size(carrier_size)
                .with_message_size(message_size)
                .run(
                    BufWriter::new(File::create(&args[3])?),
                    BufReader::new(carrier),
                    BufReader::new(message),
                )?;
            eprintln!(
                "Embedded {} bytes ({} carrier bytes passed through)",
                summary.embedded, summary.passthrough
            );
        }
        Some("extract") if args.len() >= 2 => {
            let offset: u64 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(0);
            let source = BufReader::new(File::open(&args[1])?);
            let n = ExtractJob::new(ctx)
                .with_offset(offset)
                .with_framing(true)
                .run(io::stdout().lock(), source)?;
            eprintln!("Extracted {n} bytes");
        }
        _ => {
            eprintln!("usage: mux_file embed <carrier> <message> <out> [offset]");
            eprintln!("       mux_file extract <muxed> [offset]");
        }
    }

    Ok(())
}
