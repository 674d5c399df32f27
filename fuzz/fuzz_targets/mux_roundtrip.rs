#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;
use stegrs::{Context, EmbedJob, ExtractJob, StegError};

fuzz_target!(|data: Vec<u8>| {
    if data.is_empty() {
        return;
    }

    // First byte picks the message length, the rest is the carrier
    let ctx = Context::default();
    let carrier = &data[1..];
    let message: Vec<u8> = (0..data[0] % 16).map(|i| i.wrapping_mul(37)).collect();

    let mut muxed = Vec::new();
    match stegrs::embed(ctx, &mut muxed, carrier, &message[..]) {
        Ok(summary) => {
            // Verify: output mirrors the carrier length, message comes back
            assert_eq!(muxed.len(), carrier.len());
            assert_eq!(summary.embedded, message.len() as u64);

            let mut extracted = vec![0u8; message.len()];
            ctx.extractor(&muxed[..]).read_exact(&mut extracted).unwrap();
            assert_eq!(extracted, message);
        }
        Err(StegError::ShortCarrier { embedded, .. }) => {
            assert!(ctx.capacity(carrier.len() as u64) < message.len() as u64);
            assert_eq!(embedded, ctx.capacity(carrier.len() as u64));
        }
        Err(e) => panic!("unexpected error: {e}"),
    }

    // Verify: framed extraction never panics on arbitrary input
    let _ = ExtractJob::new(ctx).with_framing(true).run(Vec::new(), carrier);
    let _ = EmbedJob::new(ctx)
        .with_framing(true)
        .with_carrier_size(carrier.len() as u64)
        .run(Vec::new(), carrier, &message[..]);
});
