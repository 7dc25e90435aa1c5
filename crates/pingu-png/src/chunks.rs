/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Png chunks
//!
//! A chunk on disk is
//!
//! `length (u32 BE) | name (4 ascii bytes) | payload | crc32(name + payload) (u32 BE)`
//!
//! Chunk types only describe their name and payload, framing is done by
//! [`write_chunk`] which refuses to write chunks whose payload doesn't
//! match their declared length.
use alloc::vec::Vec;

pub use idat::IdatChunk;
pub use iend::IendChunk;
pub use ihdr::IhdrChunk;
pub use writers::write_chunk;

use crate::error::PngEncodeErrors;

mod idat;
mod iend;
mod ihdr;
mod writers;

/// A record that can be framed into a png stream
pub trait Chunk {
    /// Four ascii bytes naming the chunk, e.g. `IHDR`
    fn name(&self) -> [u8; 4];
    /// Number of payload bytes this chunk will produce
    fn length(&self) -> Result<usize, PngEncodeErrors>;
    /// Append the payload to `out`
    fn write_payload(&self, out: &mut Vec<u8>) -> Result<(), PngEncodeErrors>;
}
