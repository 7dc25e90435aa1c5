/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Encoder options
//!
//! All options needed to encode an image are held in one
//! [`EncoderOptions`] which is `Copy` and can be reused across images.
use crate::enums::{ColorModel, FilterType};
use crate::error::PngEncodeErrors;

/// DEFLATE compression level, `0` (store) to `9` (smallest output)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Fastest compression
    pub const FAST: CompressionLevel = CompressionLevel(1);
    /// The zlib default
    pub const DEFAULT: CompressionLevel = CompressionLevel(6);
    /// Smallest output
    pub const BEST: CompressionLevel = CompressionLevel(9);

    pub fn new(level: u8) -> Result<CompressionLevel, PngEncodeErrors> {
        if level > 9 {
            return Err(PngEncodeErrors::InvalidCompressionLevel(level));
        }
        Ok(CompressionLevel(level))
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// The two byte zlib header announcing this level
    ///
    /// The second byte carries the level class in its top two bits
    /// and check bits making the pair a multiple of 31
    pub const fn zlib_header(self) -> [u8; 2] {
        let flags = match self.0 {
            0 | 1 => 0x01,
            2..=5 => 0x5E,
            6 => 0x9C,
            _ => 0xDA
        };
        [crate::constants::ZLIB_CMF, flags]
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::BEST
    }
}

/// Options for encoding an image
///
/// # Example
/// ```
/// use pingu_png::{ColorModel, EncoderOptions, FilterType};
///
/// let options = EncoderOptions::new(100, 50, ColorModel::TruecolorAlpha, 8)
///     .set_filter(FilterType::Paeth);
/// assert_eq!(options.width(), 100);
/// assert_eq!(options.filter(), FilterType::Paeth);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncoderOptions {
    width:       usize,
    height:      usize,
    bit_depth:   u8,
    color:       ColorModel,
    filter:      FilterType,
    compression: CompressionLevel
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            width:       0,
            height:      0,
            bit_depth:   8,
            color:       ColorModel::TruecolorAlpha,
            filter:      FilterType::Dynamic,
            compression: CompressionLevel::default()
        }
    }
}

impl EncoderOptions {
    /// Create options for an image, using dynamic filtering
    /// and the best compression level
    pub fn new(width: usize, height: usize, color: ColorModel, bit_depth: u8) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            bit_depth,
            color,
            ..Default::default()
        }
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

    pub const fn filter(&self) -> FilterType {
        self.filter
    }

    pub const fn compression_level(&self) -> CompressionLevel {
        self.compression
    }

    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn set_bit_depth(mut self, bit_depth: u8) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    pub fn set_color(mut self, color: ColorModel) -> Self {
        self.color = color;
        self
    }

    /// Set the filter used for every scanline
    ///
    /// [`FilterType::Dynamic`] picks one per row
    pub fn set_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn set_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_headers_are_valid() {
        for level in 0..=9 {
            let [cmf, flg] = CompressionLevel::new(level).unwrap().zlib_header();
            assert_eq!((u16::from(cmf) << 8 | u16::from(flg)) % 31, 0);
        }
        assert_eq!(CompressionLevel::default().zlib_header(), [0x78, 0xDA]);
    }

    #[test]
    fn test_level_out_of_range() {
        let err = CompressionLevel::new(10).unwrap_err();
        assert_eq!(err.parameter(), Some("compression_level"));
    }
}
