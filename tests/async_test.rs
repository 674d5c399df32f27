// Integration tests for async extraction (feature = "async-io")
// Tests cover: fragmented reads, offsets, agreement with the sync extractor

use std::io::Read;

use futures_util::StreamExt;
use stegrs::{Context, StegError, extract_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

fn muxed(ctx: Context, message: &[u8], carrier_len: usize) -> Vec<u8> {
    let carrier: Vec<u8> = (0..carrier_len).map(|i| (i * 7 + 13) as u8).collect();
    let mut out = Vec::new();
    stegrs::embed(ctx, &mut out, &carrier[..], message).unwrap();
    out
}

// ============================================================================
// Async Stream Tests
// ============================================================================

#[tokio::test]
async fn test_fragmented_reads() {
    let ctx = Context::default();
    let data = muxed(ctx, b"split", 32 * 5);

    // Deliver the carrier in pieces that straddle chunk boundaries.
    let mock = tokio_test::io::Builder::new()
        .read(&data[..10])
        .read(&data[10..50])
        .read(&data[50..])
        .build();

    let atoms: Vec<u8> = extract_async(mock.compat(), ctx)
        .map(|atom| atom.unwrap()[0])
        .collect()
        .await;
    assert_eq!(atoms, b"split");
}

#[tokio::test]
async fn test_matches_sync_extractor() {
    let ctx = Context::new(2).unwrap();
    let data = muxed(ctx, b"sync=async", 8192 * 6 + 100);

    let mut sync = Vec::new();
    let err = ctx.extractor(&data[..]).read_to_end(&mut sync).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);

    let items: Vec<_> = extract_async(&data[..], ctx).collect().await;
    let (atoms, errors): (Vec<_>, Vec<_>) = items.into_iter().partition(|r| r.is_ok());
    let async_bytes: Vec<u8> = atoms
        .into_iter()
        .flat_map(|a| a.unwrap().to_vec())
        .collect();

    assert_eq!(async_bytes, sync);
    assert_eq!(&async_bytes[..10], b"sync=async");
    assert!(matches!(
        errors[..],
        [Err(StegError::ShortRead { got: 100, need: 8192 })]
    ));
}

#[tokio::test]
async fn test_offset_with_tokio_reader() {
    let ctx = Context::default();
    let mut data = b"RIFF....".to_vec();
    data.extend(muxed(ctx, b"ok", 64));

    let reader = tokio::io::BufReader::new(&data[..]).compat();
    let atoms: Vec<_> = extract_async(reader, ctx).with_offset(8).collect().await;
    assert_eq!(atoms.len(), 2);
    assert_eq!(&atoms[0].as_ref().unwrap()[..], b"o");
    assert_eq!(&atoms[1].as_ref().unwrap()[..], b"k");
}
