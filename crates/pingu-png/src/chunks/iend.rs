/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec::Vec;

use crate::chunks::Chunk;
use crate::error::PngEncodeErrors;

/// Marks the end of the png stream, has no payload
#[derive(Copy, Clone, Debug, Default)]
pub struct IendChunk;

// iend is a no-op
impl Chunk for IendChunk {
    fn name(&self) -> [u8; 4] {
        *b"IEND"
    }

    fn length(&self) -> Result<usize, PngEncodeErrors> {
        Ok(0)
    }

    fn write_payload(&self, _: &mut Vec<u8>) -> Result<(), PngEncodeErrors> {
        Ok(())
    }
}
