/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Rolling checksum trailing the compressed image data
//!
//! This is the zlib (Adler-32) checksum, two 16 bit sums
//! modulo 65521 packed as `(b << 16) | a`.

use crate::constants::{ADLER_MODULUS, ADLER_NMAX};

/// An incremental Adler-32 accumulator
///
/// # Example
/// ```
/// use pingu_png::Adler32;
/// let mut adler = Adler32::new();
/// adler.update(b"a");
/// adler.update(b"bc");
/// assert_eq!(adler.finish(), 0x024d_0127);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Adler32 {
    a: u32,
    b: u32
}

impl Default for Adler32 {
    fn default() -> Self {
        Adler32::new()
    }
}

impl Adler32 {
    pub const fn new() -> Adler32 {
        Adler32 { a: 1, b: 0 }
    }

    /// Feed `data` into the checksum
    pub fn update(&mut self, data: &[u8]) {
        let mut a = self.a;
        let mut b = self.b;

        // Up to NMAX bytes can be summed before b overflows,
        // so we only reduce once per block
        for block in data.chunks(ADLER_NMAX) {
            let mut chunks = block.chunks_exact(16);

            for chunk in &mut chunks {
                // fixed size, the compiler unrolls this
                for byte in chunk {
                    a += u32::from(*byte);
                    b += a;
                }
            }
            for byte in chunks.remainder() {
                a += u32::from(*byte);
                b += a;
            }
            a %= ADLER_MODULUS;
            b %= ADLER_MODULUS;
        }
        self.a = a;
        self.b = b;
    }

    /// Return the checksum of everything fed so far
    pub const fn finish(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

/// Compute the checksum of `data` in one go
pub fn adler32(data: &[u8]) -> u32 {
    let mut adler = Adler32::new();
    adler.update(data);
    adler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    // modulo after every byte, no batching
    fn adler32_reference(data: &[u8]) -> u32 {
        let mut a = 1_u32;
        let mut b = 0_u32;
        for byte in data {
            a = (a + u32::from(*byte)) % ADLER_MODULUS;
            b = (b + a) % ADLER_MODULUS;
        }
        (b << 16) | a
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(adler32(b""), 1);
        assert_eq!(adler32(b"a"), 0x0062_0062);
        assert_eq!(adler32(b"abc"), 0x024d_0127);
        assert_eq!(adler32(b"message digest"), 0x2975_0586);
        assert_eq!(adler32(b"abcdefghijklmnopqrstuvwxyz"), 0x9086_0b20);
        assert_eq!(adler32(b"Mark Adler"), 0x1307_0394);
        assert_eq!(adler32(&[0, 1, 2, 3, 4, 5, 6, 7]), 0x005c_001d);
    }

    #[test]
    fn test_batching_matches_per_byte_modulo() {
        // all 0xFF is the worst case for the deferred modulo
        let data = vec![0xFF_u8; ADLER_NMAX * 3 + 17];
        assert_eq!(adler32(&data), adler32_reference(&data));

        let data: Vec<u8> = (0..100_000_u32).map(|x| (x * 31 + 7) as u8).collect();
        assert_eq!(adler32(&data), adler32_reference(&data));
    }

    #[test]
    fn test_incremental_split_points() {
        let data: Vec<u8> = (0..20_000_u32).map(|x| (x ^ (x >> 3)) as u8).collect();
        let whole = adler32(&data);

        for split in [0, 1, 15, 16, 5551, 5552, 5553, 19_999] {
            let mut adler = Adler32::new();
            adler.update(&data[..split]);
            adler.update(&data[split..]);
            assert_eq!(adler.finish(), whole, "split at {split}");
        }
    }
}
