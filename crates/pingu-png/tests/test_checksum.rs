/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use pingu_png::{adler32, Adler32};

#[test]
fn test_known_values() {
    assert_eq!(adler32(b""), 0x0000_0001);
    assert_eq!(adler32(b"a"), 0x0062_0062);
    assert_eq!(adler32(b"abc"), 0x024D_0127);
    assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    assert_eq!(
        adler32(b"abcdefghijklmnopqrstuvwxyz"),
        0x9086_0B20
    );
}

#[test]
fn test_long_runs_of_max_bytes() {
    // forces the sums to wrap many times inside one batch
    for len in [5551, 5552, 5553, 65536, 100_000] {
        let data = vec![0xFF_u8; len];
        let mut reference = simd_adler32::Adler32::new();
        reference.write(&data);

        assert_eq!(adler32(&data), reference.finish(), "length {len}");
    }
}

#[test]
fn test_matches_reference_on_random_data() {
    let mut rng = WyRand::new_seed(0x5EED);

    for len in [0, 1, 15, 16, 17, 1000, 5552 * 3 + 7, 70_000] {
        let mut data = vec![0_u8; len];
        rng.fill_bytes(&mut data);

        let mut reference = simd_adler32::Adler32::new();
        reference.write(&data);

        // feed in uneven pieces
        let mut rolling = Adler32::new();
        for piece in data.chunks(977) {
            rolling.update(piece);
        }
        assert_eq!(rolling.finish(), reference.finish(), "length {len}");
        assert_eq!(adler32(&data), reference.finish());
    }
}
