/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! CRC-32 used for chunk framing
//!
//! This is CRC-32/ISO-HDLC (reflected polynomial `0xEDB88320`,
//! initial value and final xor `0xFFFFFFFF`), computed by `crc32fast`.

/// Incremental crc over a chunk name followed by its payload
///
/// The two don't need to be contiguous, the payload can be
/// fed in as many pieces as needed
pub struct ChunkCrc {
    hasher: crc32fast::Hasher
}

impl ChunkCrc {
    pub fn new(name: &[u8; 4]) -> ChunkCrc {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(name);
        ChunkCrc { hasher }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub fn finish(self) -> u32 {
        self.hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // standard check value for CRC-32/ISO-HDLC
        let mut crc = ChunkCrc::new(b"1234");
        crc.update(b"56789");
        assert_eq!(crc.finish(), 0xCBF4_3926);
    }

    #[test]
    fn test_iend_crc() {
        // every png ends with these bytes
        assert_eq!(ChunkCrc::new(b"IEND").finish(), 0xAE42_6082);
    }

    #[test]
    fn test_split_matches_whole() {
        let mut crc = ChunkCrc::new(b"IDAT");
        crc.update(&[1, 2, 3]);
        crc.update(&[4, 5]);
        assert_eq!(crc.finish(), crc32fast::hash(b"IDAT\x01\x02\x03\x04\x05"));
    }
}
