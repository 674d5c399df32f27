//! Async extraction example using tokio.
//!
//! Run with:
//!     cargo run --example async_extract --features async-io -- /path/to/muxed

use std::env;

use futures_util::StreamExt;
use stegrs::{Context, extract_async};
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ctx = Context::default();
    let message = match env::args().nth(1) {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            collect(extract_async(file.compat(), ctx)).await
        }
        None => {
            // No file given: build a small carrier in memory
            let carrier = vec![0x20u8; 32 * 12];
            let mut muxed = Vec::new();
            stegrs::embed(ctx, &mut muxed, &carrier[..], &b"async hello!"[..])?;
            collect(extract_async(&muxed[..], ctx)).await
        }
    };

    println!("Extracted {} bytes: {:?}", message.len(), String::from_utf8_lossy(&message));
    Ok(())
}

async fn collect<S>(mut stream: S) -> Vec<u8>
where
    S: futures_util::Stream<Item = stegrs::Result<bytes::Bytes>> + Unpin,
{
    let mut message = Vec::new();
    while let Some(atom) = stream.next().await {
        match atom {
            Ok(atom) => message.extend_from_slice(&atom),
            // A trailing partial chunk ends an unframed message
            Err(e) if e.is_short_read() => break,
            Err(e) => {
                eprintln!("extraction failed: {e}");
                break;
            }
        }
    }
    message
}
