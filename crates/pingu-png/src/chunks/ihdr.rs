/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec::Vec;

use pingu_core::bytestream::ByteWriter;

use crate::chunks::Chunk;
use crate::constants::{MAX_DIMENSION, VALID_BIT_DEPTHS};
use crate::enums::ColorModel;
use crate::error::PngEncodeErrors;

/// The image header
///
/// Always the first chunk, describes dimensions and pixel layout.
/// Validated on construction so a header that exists can always be written.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IhdrChunk {
    width:     usize,
    height:    usize,
    bit_depth: u8,
    color:     ColorModel
}

impl IhdrChunk {
    /// Create a new header
    ///
    /// # Errors
    /// - Width or height is zero or above `2^31-1`
    /// - Bit depth isn't one of `1,2,4,8,16`
    /// - The color model can't be stored with that bit depth
    /// - A row of `width` pixels doesn't fit in a `usize` worth of bits
    pub fn new(
        width: usize, height: usize, bit_depth: u8, color: ColorModel
    ) -> Result<IhdrChunk, PngEncodeErrors> {
        if width == 0 || width > MAX_DIMENSION {
            return Err(PngEncodeErrors::InvalidWidth(width));
        }
        if height == 0 || height > MAX_DIMENSION {
            return Err(PngEncodeErrors::InvalidHeight(height));
        }
        if !VALID_BIT_DEPTHS.contains(&bit_depth) {
            return Err(PngEncodeErrors::UnsupportedBitDepth(bit_depth));
        }
        if !color.supports_bit_depth(bit_depth) {
            return Err(PngEncodeErrors::IncompatibleBitDepth(color, bit_depth));
        }
        // row sizes are computed in bits, rounded up to whole bytes
        let bits_per_pixel = color.num_components() * usize::from(bit_depth);
        if width
            .checked_mul(bits_per_pixel)
            .and_then(|bits| bits.checked_add(7))
            .is_none()
        {
            return Err(PngEncodeErrors::InvalidWidth(width));
        }
        Ok(IhdrChunk {
            width,
            height,
            bit_depth,
            color
        })
    }

    /// Create a header from a raw color type byte as stored in png files
    pub fn from_raw(
        width: usize, height: usize, bit_depth: u8, color: u8
    ) -> Result<IhdrChunk, PngEncodeErrors> {
        let color = ColorModel::try_from(color)?;

        IhdrChunk::new(width, height, bit_depth, color)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub const fn color(&self) -> ColorModel {
        self.color
    }

    /// Bytes per complete pixel, rounded up to one for sub byte depths
    ///
    /// This is the distance filters use to find the left neighbour
    pub const fn bytes_per_pixel(&self) -> usize {
        let bits = self.color.num_components() * self.bit_depth as usize;
        if bits < 8 {
            1
        } else {
            bits / 8
        }
    }

    /// Bytes in one unfiltered row
    pub const fn scanline_bytes(&self) -> usize {
        let bits = self.width * self.color.num_components() * self.bit_depth as usize;
        (bits + 7) / 8
    }
}

impl Chunk for IhdrChunk {
    fn name(&self) -> [u8; 4] {
        *b"IHDR"
    }

    fn length(&self) -> Result<usize, PngEncodeErrors> {
        Ok(13)
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<(), PngEncodeErrors> {
        let mut writer = ByteWriter::new(out);
        // dimensions were bounded to 2^31-1 on construction
        writer.write_u32_be_err(self.width as u32)?;
        writer.write_u32_be_err(self.height as u32)?;
        writer.write_u8_err(self.bit_depth)?;
        writer.write_u8_err(self.color.to_int())?;
        // compression method, always deflate
        writer.write_u8_err(0)?;
        // filter method, adaptive with five filter types
        writer.write_u8_err(0)?;
        // interlace method, always none
        writer.write_u8_err(0)?;
        Ok(())
    }
}
