#![no_main]

use libfuzzer_sys::fuzz_target;
use stegrs::{Atom, AtomSize, Chunk, codec};

fuzz_target!(|data: Vec<u8>| {
    let size = AtomSize::One;
    let mut bytes = [0u8; 32];
    let n = data.len().min(32);
    bytes[..n].copy_from_slice(&data[..n]);
    let chunk = Chunk::from_slice(size, &bytes).unwrap();

    // Verify: table decode agrees with per-bit mask decode
    let atom = codec::decode(&chunk);
    for bit in 0..8 {
        assert_eq!(
            u32::from(codec::decode_bit(&chunk, bit)),
            (atom.value() >> bit) & 1
        );
    }

    // Verify: any target is reachable with exactly one flipped bit
    let desired = Atom::from_value(size, data.get(32).copied().unwrap_or(0).into());
    let mut encoded = chunk.clone();
    codec::encode(&mut encoded, &desired);
    assert_eq!(codec::decode(&encoded), desired);
    assert_eq!(encoded.bit_distance(&chunk), 1);
});
