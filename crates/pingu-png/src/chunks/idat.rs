/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec::Vec;
use core::cell::OnceCell;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use log::debug;

use crate::chunks::{Chunk, IhdrChunk};
use crate::enums::{ColorModel, FilterType};
use crate::error::PngEncodeErrors;
use crate::options::CompressionLevel;
use crate::scanlines::{PackedScanlines, ScanlineEncoder};

const SUPPORTED_COLOR_MODELS: [ColorModel; 2] = [ColorModel::Truecolor, ColorModel::TruecolorAlpha];

/// The compressed image data
///
/// Payload is a zlib stream: two header bytes, the DEFLATE compressed
/// filtered scanlines and the big endian rolling checksum of the
/// uncompressed scanlines.
///
/// Compression happens the first time the length or payload is requested
/// and is cached afterwards.
pub struct IdatChunk<'a> {
    header:      IhdrChunk,
    data:        &'a [u8],
    filter:      FilterType,
    compression: CompressionLevel,
    compressed:  OnceCell<Vec<u8>>
}

impl<'a> IdatChunk<'a> {
    /// Create the data chunk for `header`
    ///
    /// # Arguments
    /// - header: The image header, gives dimensions and row layout
    /// - data: Pixel rows back to back, size must be `height * scanline bytes`.
    ///   16 bit samples are expected in big endian
    /// - filter: The filter used for every row, or dynamic
    ///
    /// # Errors
    /// - The color model is not truecolor (with or without alpha),
    ///   other models must be reduced to truecolor rows first
    /// - `data` has the wrong size
    pub fn new(
        header: &IhdrChunk, data: &'a [u8], filter: FilterType
    ) -> Result<IdatChunk<'a>, PngEncodeErrors> {
        if !SUPPORTED_COLOR_MODELS.contains(&header.color()) {
            return Err(PngEncodeErrors::UnsupportedColorModel(
                header.color(),
                &SUPPORTED_COLOR_MODELS
            ));
        }
        let expected = header
            .scanline_bytes()
            .checked_mul(header.height())
            .ok_or(PngEncodeErrors::Generic("Image dimensions overflow"))?;

        if data.len() != expected {
            return Err(PngEncodeErrors::InsufficientData(expected, data.len()));
        }

        Ok(IdatChunk {
            header: *header,
            data,
            filter,
            compression: CompressionLevel::default(),
            compressed: OnceCell::new()
        })
    }

    /// Create the data chunk from a raw filter type byte
    ///
    /// # Errors
    /// As [`new`](Self::new), and when `filter` is not a known filter type
    pub fn from_raw_filter(
        header: &IhdrChunk, data: &'a [u8], filter: u8
    ) -> Result<IdatChunk<'a>, PngEncodeErrors> {
        let filter = FilterType::try_from(filter)?;
        IdatChunk::new(header, data, filter)
    }

    /// Set the DEFLATE compression level, the default is the best one
    #[must_use]
    pub fn with_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression = level;
        // level changes the output
        self.compressed = OnceCell::new();
        self
    }

    pub const fn filter(&self) -> FilterType {
        self.filter
    }

    /// Return the compressed payload, compressing if it hasn't been done yet
    pub fn compressed_data(&self) -> Result<&[u8], PngEncodeErrors> {
        if let Some(data) = self.compressed.get() {
            return Ok(data);
        }
        let data = self.compress()?;
        Ok(self.compressed.get_or_init(|| data))
    }

    fn compress(&self) -> Result<Vec<u8>, PngEncodeErrors> {
        let scanline_bytes = self.header.scanline_bytes();

        let mut output = Vec::with_capacity(self.data.len() / 2 + 64);
        output.extend_from_slice(&self.compression.zlib_header());

        let mut deflater = DeflateEncoder::new(
            output,
            Compression::new(u32::from(self.compression.level()))
        );
        let mut source = PackedScanlines::new(self.data, scanline_bytes)?;
        let mut scanlines =
            ScanlineEncoder::new(scanline_bytes, self.header.bytes_per_pixel(), self.filter)?;

        let checksum = scanlines.encode(&mut source, &mut deflater)?;

        let mut output = deflater.finish()?;
        output.extend_from_slice(&checksum.to_be_bytes());

        debug!(
            "Compressed {} rows ({} bytes) into {} bytes",
            scanlines.rows_written(),
            self.data.len() + scanlines.rows_written(),
            output.len()
        );
        Ok(output)
    }
}

impl Chunk for IdatChunk<'_> {
    fn name(&self) -> [u8; 4] {
        *b"IDAT"
    }

    fn length(&self) -> Result<usize, PngEncodeErrors> {
        Ok(self.compressed_data()?.len())
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<(), PngEncodeErrors> {
        out.extend_from_slice(self.compressed_data()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_truecolor() {
        for color in [ColorModel::Grayscale, ColorModel::GrayscaleAlpha, ColorModel::Indexed] {
            let header = IhdrChunk::new(1, 1, 8, color).unwrap();
            let err = IdatChunk::new(&header, &[0; 2], FilterType::Dynamic).err().unwrap();
            assert!(matches!(err, PngEncodeErrors::UnsupportedColorModel(c, _) if c == color));
        }
    }

    #[test]
    fn test_rejects_garbage_filter() {
        let header = IhdrChunk::new(1, 1, 8, ColorModel::Truecolor).unwrap();
        let err = IdatChunk::from_raw_filter(&header, &[0; 3], 10).err().unwrap();
        assert!(matches!(err, PngEncodeErrors::UnknownFilter(10)));
        assert_eq!(err.parameter(), Some("filter"));
    }

    #[test]
    fn test_rejects_short_data() {
        let header = IhdrChunk::new(2, 2, 8, ColorModel::Truecolor).unwrap();
        let err = IdatChunk::new(&header, &[0; 11], FilterType::None).err().unwrap();
        assert!(matches!(err, PngEncodeErrors::InsufficientData(12, 11)));
    }

    #[test]
    fn test_payload_is_zlib_framed() {
        let header = IhdrChunk::new(2, 2, 8, ColorModel::TruecolorAlpha).unwrap();
        let data = [7_u8; 16];
        let idat = IdatChunk::new(&header, &data, FilterType::None).unwrap();

        let payload = idat.compressed_data().unwrap();
        assert_eq!(&payload[..2], &[0x78, 0xDA]);

        let mut stream = vec![0];
        stream.extend_from_slice(&data[..8]);
        stream.push(0);
        stream.extend_from_slice(&data[8..]);
        let checksum = crate::adler::adler32(&stream);
        assert_eq!(&payload[payload.len() - 4..], &checksum.to_be_bytes());
        assert_eq!(idat.length().unwrap(), payload.len());
    }
}
