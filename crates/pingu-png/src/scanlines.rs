/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Turning pixel rows into the filtered byte stream fed to the compressor
//!
//! Each row becomes one filter type byte followed by the filtered row,
//! the rolling checksum is taken over exactly those bytes.
use alloc::vec;
use alloc::vec::Vec;
use std::io::Write;

use log::trace;

use crate::adler::Adler32;
use crate::enums::FilterType;
use crate::error::PngEncodeErrors;
use crate::filters::{filter_scanline, FilterSelector};

/// A source of pixel rows
///
/// Rows must already be in the byte layout of the target color model,
/// e.g. `RGBARGBA..` for truecolor with alpha, 16 bit samples big endian.
pub trait ScanlineSource {
    /// Number of bytes in a single row
    fn scanline_bytes(&self) -> usize;
    /// Number of rows
    fn height(&self) -> usize;
    /// Copy row `row` into `out`, which is exactly [`scanline_bytes`](Self::scanline_bytes) long
    fn read_scanline(&mut self, row: usize, out: &mut [u8]) -> Result<(), PngEncodeErrors>;
}

/// Rows stored back to back in one buffer
pub struct PackedScanlines<'a> {
    data:           &'a [u8],
    scanline_bytes: usize
}

impl<'a> PackedScanlines<'a> {
    /// Create a source over `data` with rows of `scanline_bytes` bytes
    ///
    /// # Errors
    /// If `scanline_bytes` is zero or `data` is not made of whole rows
    pub fn new(data: &'a [u8], scanline_bytes: usize) -> Result<PackedScanlines<'a>, PngEncodeErrors> {
        if scanline_bytes == 0 {
            return Err(PngEncodeErrors::Generic("Scanline length cannot be zero"));
        }
        if data.len() % scanline_bytes != 0 {
            let rounded = (data.len() / scanline_bytes + 1) * scanline_bytes;
            return Err(PngEncodeErrors::InsufficientData(rounded, data.len()));
        }
        Ok(PackedScanlines {
            data,
            scanline_bytes
        })
    }
}

impl ScanlineSource for PackedScanlines<'_> {
    fn scanline_bytes(&self) -> usize {
        self.scanline_bytes
    }

    fn height(&self) -> usize {
        self.data.len() / self.scanline_bytes
    }

    fn read_scanline(&mut self, row: usize, out: &mut [u8]) -> Result<(), PngEncodeErrors> {
        let start = row * self.scanline_bytes;
        let scanline = self
            .data
            .get(start..start + self.scanline_bytes)
            .ok_or(PngEncodeErrors::Generic("Scanline index out of bounds"))?;
        out.copy_from_slice(scanline);
        Ok(())
    }
}

/// Drives per row filtering for one image
///
/// Rows have to be fed top to bottom, the filters of a row read
/// the unfiltered row above and the checksum depends on order.
/// One encoder handles exactly one image.
pub struct ScanlineEncoder {
    filter:          FilterType,
    bytes_per_pixel: usize,
    // row being filtered and the unfiltered row above it,
    // swapped after every row
    current:         Vec<u8>,
    previous:        Vec<u8>,
    has_previous:    bool,
    // filter type byte + filtered row
    filtered:        Vec<u8>,
    selector:        FilterSelector,
    adler:           Adler32,
    rows_written:    usize,
    failed:          bool
}

impl ScanlineEncoder {
    /// Create an encoder for rows of `scanline_bytes` bytes
    ///
    /// # Errors
    /// If `bytes_per_pixel` is zero
    pub fn new(
        scanline_bytes: usize, bytes_per_pixel: usize, filter: FilterType
    ) -> Result<ScanlineEncoder, PngEncodeErrors> {
        if bytes_per_pixel == 0 {
            return Err(PngEncodeErrors::InvalidBytesPerPixel(bytes_per_pixel));
        }
        Ok(ScanlineEncoder {
            filter,
            bytes_per_pixel,
            current: vec![0; scanline_bytes],
            previous: vec![0; scanline_bytes],
            has_previous: false,
            filtered: vec![0; scanline_bytes + 1],
            selector: FilterSelector::new(),
            adler: Adler32::new(),
            rows_written: 0,
            failed: false
        })
    }

    /// Filter one row and write it to `sink`
    ///
    /// # Returns
    /// The filter used for the row
    pub fn encode_row<W: Write>(&mut self, raw: &[u8], sink: &mut W) -> Result<FilterType, PngEncodeErrors> {
        if raw.len() != self.current.len() {
            return Err(PngEncodeErrors::ScanlineLengthMismatch(
                self.current.len(),
                raw.len()
            ));
        }
        self.current.copy_from_slice(raw);
        self.emit_current(sink)
    }

    /// Filter every row of `source` and write them to `sink`
    ///
    /// # Returns
    /// The checksum of everything this encoder has written
    pub fn encode<S: ScanlineSource, W: Write>(
        &mut self, source: &mut S, sink: &mut W
    ) -> Result<u32, PngEncodeErrors> {
        if source.scanline_bytes() != self.current.len() {
            return Err(PngEncodeErrors::ScanlineLengthMismatch(
                self.current.len(),
                source.scanline_bytes()
            ));
        }
        for row in 0..source.height() {
            source.read_scanline(row, &mut self.current)?;
            self.emit_current(sink)?;
        }
        Ok(self.checksum())
    }

    fn emit_current<W: Write>(&mut self, sink: &mut W) -> Result<FilterType, PngEncodeErrors> {
        if self.failed {
            return Err(PngEncodeErrors::Generic(
                "Scanline encoder failed earlier, the stream cannot be continued"
            ));
        }
        let result = self.filter_and_write(sink);

        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn filter_and_write<W: Write>(&mut self, sink: &mut W) -> Result<FilterType, PngEncodeErrors> {
        let previous = if self.has_previous {
            Some(self.previous.as_slice())
        } else {
            None
        };

        let used = match self.filter {
            FilterType::Dynamic => self.selector.filter_into(
                &mut self.filtered,
                &self.current,
                previous,
                self.bytes_per_pixel
            )?,
            filter => {
                self.filtered[0] = filter.to_int();
                filter_scanline(
                    filter,
                    &mut self.filtered[1..],
                    &self.current,
                    previous,
                    self.bytes_per_pixel
                )?;
                filter
            }
        };
        self.adler.update(&self.filtered);
        sink.write_all(&self.filtered)?;

        // current row is the next one's previous
        core::mem::swap(&mut self.current, &mut self.previous);
        self.has_previous = true;

        trace!("Row {} written with {:?} filter", self.rows_written, used);
        self.rows_written += 1;

        Ok(used)
    }

    /// Checksum over all bytes written so far, tag bytes included
    pub const fn checksum(&self) -> u32 {
        self.adler.finish()
    }

    pub const fn rows_written(&self) -> usize {
        self.rows_written
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::adler::adler32;

    struct FailingSink {
        writes_left: usize
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.writes_left -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_layout_and_checksum() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut source = PackedScanlines::new(&data, 3).unwrap();
        let mut encoder = ScanlineEncoder::new(3, 1, FilterType::Up).unwrap();
        let mut sink = vec![];

        let checksum = encoder.encode(&mut source, &mut sink).unwrap();

        // first row has nothing above, up copies it
        assert_eq!(sink, [2, 1, 2, 3, 2, 3, 3, 3, 2, 3, 3, 3]);
        assert_eq!(checksum, adler32(&sink));
        assert_eq!(encoder.rows_written(), 3);
    }

    #[test]
    fn test_previous_row_is_unfiltered() {
        let mut encoder = ScanlineEncoder::new(2, 1, FilterType::Sub).unwrap();
        let mut sink = vec![];
        encoder.encode_row(&[10, 30], &mut sink).unwrap();
        encoder.encode_row(&[10, 30], &mut sink).unwrap();
        // sub never reads the row above, both rows are identical
        assert_eq!(sink, [1, 10, 20, 1, 10, 20]);

        let mut encoder = ScanlineEncoder::new(2, 1, FilterType::Up).unwrap();
        let mut sink = vec![];
        encoder.encode_row(&[10, 30], &mut sink).unwrap();
        encoder.encode_row(&[11, 33], &mut sink).unwrap();
        assert_eq!(sink, [2, 10, 30, 2, 1, 3]);
    }

    #[test]
    fn test_sink_error_stops_encoder() {
        let mut encoder = ScanlineEncoder::new(2, 1, FilterType::Dynamic).unwrap();
        let mut sink = FailingSink { writes_left: 1 };

        assert!(encoder.encode_row(&[1, 2], &mut sink).is_ok());
        let err = encoder.encode_row(&[1, 2], &mut sink).unwrap_err();
        assert!(matches!(err, PngEncodeErrors::CompressionError(_)));
        // no further rows once the sink failed
        assert!(encoder.encode_row(&[1, 2], &mut sink).is_err());
        assert_eq!(encoder.rows_written(), 1);
    }

    #[test]
    fn test_wrong_row_length() {
        let mut encoder = ScanlineEncoder::new(4, 4, FilterType::None).unwrap();
        let mut sink = vec![];
        assert!(encoder.encode_row(&[1, 2], &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_partial_rows_rejected() {
        assert!(PackedScanlines::new(&[0; 7], 3).is_err());
        assert!(PackedScanlines::new(&[0; 6], 0).is_err());
    }
}
