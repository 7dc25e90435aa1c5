/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Errors possible during encoding
use core::fmt::{Debug, Display, Formatter};

use pingu_core::bytestream::ByteIoError;

use crate::container::WriterState;
use crate::enums::ColorModel;

/// Errors encountered during encoding
pub enum PngEncodeErrors {
    /// Width is zero or larger than `2^31-1`
    InvalidWidth(usize),
    /// Height is zero or larger than `2^31-1`
    InvalidHeight(usize),
    /// Bit depth is not one of `1,2,4,8,16`
    UnsupportedBitDepth(u8),
    /// The color type byte does not name a color model
    UnknownColorModel(u8),
    /// The color model cannot be stored with that bit depth
    ///
    /// # Arguments
    /// - 1st argument is the color model
    /// - 2nd argument is the offending bit depth
    IncompatibleBitDepth(ColorModel, u8),
    /// The filter type byte does not name a filter strategy
    UnknownFilter(u8),
    /// The data record cannot encode rows of this color model
    ///
    /// The first argument is the color model encountered
    /// The second argument is list of supported color models
    UnsupportedColorModel(ColorModel, &'static [ColorModel]),
    /// Compression level outside `0..=9`
    InvalidCompressionLevel(u8),
    /// Bytes per pixel of zero handed to a filter
    InvalidBytesPerPixel(usize),
    /// A scanline buffer does not have the expected length
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    ScanlineLengthMismatch(usize, usize),
    /// Pixel buffer length doesn't match the image dimensions
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually present
    InsufficientData(usize, usize),
    /// A chunk produced a payload whose length differs from the one it declared
    LengthMismatch {
        chunk:    [u8; 4],
        declared: usize,
        actual:   usize
    },
    /// An operation was attempted in a state the container writer doesn't allow
    InvalidWriterState(WriterState, &'static str),
    /// Generic message
    Generic(&'static str),
    /// The compressor failed
    CompressionError(std::io::Error),
    /// The output sink failed
    IoError(ByteIoError)
}

impl PngEncodeErrors {
    /// Name of the parameter a validation error is about
    ///
    /// Returns `None` for errors that aren't caused by a bad parameter
    pub const fn parameter(&self) -> Option<&'static str> {
        match self {
            PngEncodeErrors::InvalidWidth(_) => Some("width"),
            PngEncodeErrors::InvalidHeight(_) => Some("height"),
            PngEncodeErrors::UnsupportedBitDepth(_) | PngEncodeErrors::IncompatibleBitDepth(..) => {
                Some("bit_depth")
            }
            PngEncodeErrors::UnknownColorModel(_) | PngEncodeErrors::UnsupportedColorModel(..) => {
                Some("color_model")
            }
            PngEncodeErrors::UnknownFilter(_) => Some("filter"),
            PngEncodeErrors::InvalidCompressionLevel(_) => Some("compression_level"),
            PngEncodeErrors::InvalidBytesPerPixel(_) => Some("bytes_per_pixel"),
            _ => None
        }
    }
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PngEncodeErrors::InvalidWidth(width) => {
                writeln!(f, "Invalid width {width}, expected a value in 1..={}", (1_u32 << 31) - 1)
            }
            PngEncodeErrors::InvalidHeight(height) => {
                writeln!(f, "Invalid height {height}, expected a value in 1..={}", (1_u32 << 31) - 1)
            }
            PngEncodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, expected one of 1,2,4,8 or 16")
            }
            PngEncodeErrors::UnknownColorModel(color) => {
                writeln!(f, "Unknown color model {color}, expected one of 0,2,3,4 or 6")
            }
            PngEncodeErrors::IncompatibleBitDepth(color, depth) => {
                writeln!(
                    f,
                    "Bit depth {depth} is not allowed for {color:?}, allowed depths are {:?}",
                    color.allowed_bit_depths()
                )
            }
            PngEncodeErrors::UnknownFilter(filter) => {
                writeln!(f, "Unknown filter type {filter}, expected 0..=4 or 255 (dynamic)")
            }
            PngEncodeErrors::UnsupportedColorModel(found, supported) => {
                writeln!(f, "Cannot encode pixel rows with color model {found:?}, supported ones are {supported:?}")
            }
            PngEncodeErrors::InvalidCompressionLevel(level) => {
                writeln!(f, "Invalid compression level {level}, expected 0..=9")
            }
            PngEncodeErrors::InvalidBytesPerPixel(bpp) => {
                writeln!(f, "Invalid bytes per pixel {bpp}, must be greater than zero")
            }
            PngEncodeErrors::ScanlineLengthMismatch(expected, found) => {
                writeln!(f, "Scanline length mismatch, expected {expected} bytes but found {found}")
            }
            PngEncodeErrors::InsufficientData(expected, found) => {
                writeln!(f, "Expected {expected} bytes of pixel data but found {found}")
            }
            PngEncodeErrors::LengthMismatch {
                chunk,
                declared,
                actual
            } => {
                writeln!(
                    f,
                    "Chunk {} claimed length {declared} but produced {actual} bytes",
                    core::str::from_utf8(chunk).unwrap_or("XXXX")
                )
            }
            PngEncodeErrors::InvalidWriterState(state, operation) => {
                writeln!(f, "Cannot {operation} when writer is in state {state:?}")
            }
            PngEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            PngEncodeErrors::CompressionError(err) => {
                writeln!(f, "Compression error {err}")
            }
            PngEncodeErrors::IoError(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PngEncodeErrors {}

impl From<ByteIoError> for PngEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        PngEncodeErrors::IoError(value)
    }
}

impl From<std::io::Error> for PngEncodeErrors {
    fn from(value: std::io::Error) -> Self {
        PngEncodeErrors::CompressionError(value)
    }
}
