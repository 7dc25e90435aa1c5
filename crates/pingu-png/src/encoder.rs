/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::debug;
use pingu_core::bytestream::ByteWriterTrait;

use crate::chunks::{IdatChunk, IendChunk, IhdrChunk};
use crate::container::PngFile;
use crate::error::PngEncodeErrors;
use crate::options::EncoderOptions;

/// A png encoder
///
/// Writes the header, a single data chunk and the end chunk.
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use pingu_png::{ColorModel, EncoderOptions, PngEncoder, PngEncodeErrors};
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// fn main() -> Result<(), PngEncodeErrors> {
///     let pixels: Vec<u8> = (0..W * H * 3).map(|i| (i % 256) as u8).collect();
///     let options = EncoderOptions::new(W, H, ColorModel::Truecolor, 8);
///     let mut encoder = PngEncoder::new(&pixels, options);
///     let mut sink = vec![];
///     let written = encoder.encode(&mut sink)?;
///     assert_eq!(written, sink.len());
///     Ok(())
/// }
/// ```
pub struct PngEncoder<'a> {
    data:    &'a [u8],
    options: EncoderOptions
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder
    ///
    /// # Arguments
    /// - data: Pixel rows back to back, size must be `width*height*channels*bytes per sample`.
    ///   16 bit samples are expected in big endian (in order to avoid a
    ///   potentially expensive clone and conversion step)
    /// - options: Dimensions, layout, filter and compression level
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder { data, options }
    }

    pub const fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode the image into `sink`
    ///
    /// All parameters are validated before anything is written
    ///
    /// # Returns
    /// - Ok(size): Number of bytes written
    /// - Err: The error encountered during encoding
    pub fn encode<T: ByteWriterTrait>(&mut self, sink: T) -> Result<usize, PngEncodeErrors> {
        let options = &self.options;

        let header = IhdrChunk::new(
            options.width(),
            options.height(),
            options.bit_depth(),
            options.color()
        )?;
        let data = IdatChunk::new(&header, self.data, options.filter())?
            .with_compression_level(options.compression_level());

        debug!(
            "Encoding {}x{} {:?} image, depth {}, filter {:?}",
            header.width(),
            header.height(),
            header.color(),
            header.bit_depth(),
            options.filter()
        );

        let mut file = PngFile::new();
        file.add(header);
        file.add(data);
        file.add(IendChunk);

        file.write(sink)
    }
}

#[test]
fn test_simple_write() {
    use crate::enums::ColorModel;

    let width = 40;
    let height = 10;
    let data = vec![100; width * height * 3];

    let options = EncoderOptions::new(width, height, ColorModel::Truecolor, 8);

    let mut encoder = PngEncoder::new(&data, options);
    let mut sink = vec![];

    let written = encoder.encode(&mut sink).unwrap();
    assert_eq!(written, sink.len());
    assert_eq!(&sink[..8], &crate::constants::PNG_SIGNATURE);
    assert_eq!(&sink[sink.len() - 8..], b"IEND\xAE\x42\x60\x82");
}
