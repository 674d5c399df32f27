//! Basic embed / extract example.
//!
//! Run with:
//!     RUST_LOG=stegrs=debug cargo run --example mux_basic

use std::io::Read;

use stegrs::{Chunk, Context, codec};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ctx = Context::new(1)?;
    let carrier = b"hello, there, how are you? fine.".repeat(16);
    let message = b"hi there";

    println!(
        "Carrier: {} bytes, {} bytes per chunk, capacity {} bytes\n",
        carrier.len(),
        ctx.chunk_size(),
        ctx.capacity(carrier.len() as u64)
    );

    if let Some(chunk) = Chunk::from_slice(ctx.atom(), &carrier[..ctx.chunk_size()]) {
        println!("First chunk already carries {:?}\n", codec::decode(&chunk));
    }

    let mut muxed = Vec::new();
    let summary = stegrs::embed(ctx, &mut muxed, &carrier[..], &message[..])?;
    println!(
        "Embedded {} bytes, passed through {} bytes",
        summary.embedded, summary.passthrough
    );

    for (i, (before, after)) in carrier
        .chunks(ctx.chunk_size())
        .zip(muxed.chunks(ctx.chunk_size()))
        .take(message.len())
        .enumerate()
    {
        println!(
            "Chunk {:>2}: {:?} -> {:?}",
            i,
            String::from_utf8_lossy(before),
            String::from_utf8_lossy(after)
        );
    }

    let mut extracted = vec![0u8; message.len()];
    stegrs::extract(ctx, &muxed[..]).read_exact(&mut extracted)?;
    println!("\nExtracted: {:?}", String::from_utf8_lossy(&extracted));

    Ok(())
}
