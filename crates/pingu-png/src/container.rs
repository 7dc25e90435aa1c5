/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Writing chunks into a png stream
use alloc::boxed::Box;
use alloc::vec::Vec;

use log::debug;
use pingu_core::bytestream::{ByteWriter, ByteWriterTrait};

use crate::chunks::{write_chunk, Chunk};
use crate::constants::PNG_SIGNATURE;
use crate::error::PngEncodeErrors;

/// Where a [`PngWriter`] is in the stream
///
/// `Unstarted -> SignatureWritten -> RecordWritten* -> Closed`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriterState {
    Unstarted,
    SignatureWritten,
    RecordWritten,
    Closed
}

/// Low level png stream writer
///
/// Writes the signature followed by chunks in the order they are given,
/// refusing chunks before the signature and anything after closing.
pub struct PngWriter<T: ByteWriterTrait> {
    writer:  ByteWriter<T>,
    state:   WriterState,
    records: usize
}

impl<T: ByteWriterTrait> PngWriter<T> {
    pub fn new(sink: T) -> PngWriter<T> {
        PngWriter {
            writer:  ByteWriter::new(sink),
            state:   WriterState::Unstarted,
            records: 0
        }
    }

    pub const fn state(&self) -> WriterState {
        self.state
    }

    /// Number of chunks written so far
    pub const fn records(&self) -> usize {
        self.records
    }

    pub const fn bytes_written(&self) -> usize {
        self.writer.bytes_written()
    }

    /// Write the eight byte png signature, must be the first write
    pub fn write_signature(&mut self) -> Result<(), PngEncodeErrors> {
        if self.state != WriterState::Unstarted {
            return Err(PngEncodeErrors::InvalidWriterState(
                self.state,
                "write the signature"
            ));
        }
        self.writer.write_const_bytes(&PNG_SIGNATURE)?;
        self.state = WriterState::SignatureWritten;
        Ok(())
    }

    /// Frame and write a chunk
    pub fn write_chunk<C: Chunk + ?Sized>(&mut self, chunk: &C) -> Result<(), PngEncodeErrors> {
        match self.state {
            WriterState::SignatureWritten | WriterState::RecordWritten => (),
            state => return Err(PngEncodeErrors::InvalidWriterState(state, "write a chunk"))
        }
        write_chunk(chunk, &mut self.writer)?;

        self.state = WriterState::RecordWritten;
        self.records += 1;
        Ok(())
    }

    /// Flush the sink and close the stream, no writes are allowed afterwards
    ///
    /// # Returns
    /// Total bytes written
    pub fn close(&mut self) -> Result<usize, PngEncodeErrors> {
        match self.state {
            WriterState::SignatureWritten | WriterState::RecordWritten => (),
            state => return Err(PngEncodeErrors::InvalidWriterState(state, "close"))
        }
        self.writer.flush()?;
        self.state = WriterState::Closed;
        Ok(self.writer.bytes_written())
    }
}

/// An ordered list of chunks making up a png file
///
/// Chunks are written in the order they were added, typically
/// [`IhdrChunk`](crate::IhdrChunk), [`IdatChunk`](crate::IdatChunk)
/// then [`IendChunk`](crate::IendChunk).
#[derive(Default)]
pub struct PngFile<'a> {
    chunks: Vec<Box<dyn Chunk + 'a>>
}

impl<'a> PngFile<'a> {
    pub fn new() -> PngFile<'a> {
        PngFile::default()
    }

    /// Append a chunk
    pub fn add<C: Chunk + 'a>(&mut self, chunk: C) {
        self.chunks.push(Box::new(chunk));
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &(dyn Chunk + 'a)> {
        self.chunks.iter().map(|chunk| chunk.as_ref())
    }

    /// Write the signature and every chunk to `sink`
    ///
    /// Payload lengths of all chunks are resolved before the signature is
    /// written, so compression failures don't leave a partial file behind.
    ///
    /// # Returns
    /// Total bytes written
    pub fn write<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, PngEncodeErrors> {
        let mut total = PNG_SIGNATURE.len();
        for chunk in &self.chunks {
            total += chunk.length()? + 12;
        }
        let mut writer = PngWriter::new(sink);
        // hint only, sinks that can't reserve ignore it
        writer.writer.reserve(total)?;

        writer.write_signature()?;
        for chunk in &self.chunks {
            writer.write_chunk(chunk.as_ref())?;
        }
        let written = writer.close()?;

        debug!("Wrote {} chunks, {} bytes", writer.records(), written);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::IendChunk;

    #[test]
    fn test_chunk_before_signature() {
        let mut sink = vec![];
        let mut writer = PngWriter::new(&mut sink);
        let err = writer.write_chunk(&IendChunk).unwrap_err();
        assert!(matches!(
            err,
            PngEncodeErrors::InvalidWriterState(WriterState::Unstarted, _)
        ));
        assert_eq!(writer.bytes_written(), 0);
    }

    #[test]
    fn test_closed_is_terminal() {
        let mut sink = vec![];
        let mut writer = PngWriter::new(&mut sink);
        writer.write_signature().unwrap();
        writer.write_chunk(&IendChunk).unwrap();
        assert_eq!(writer.close().unwrap(), 20);
        assert_eq!(writer.state(), WriterState::Closed);

        assert!(writer.write_chunk(&IendChunk).is_err());
        assert!(writer.write_signature().is_err());
        assert!(writer.close().is_err());
        assert_eq!(writer.records(), 1);
    }

    #[test]
    fn test_signature_once() {
        let mut sink = vec![];
        let mut writer = PngWriter::new(&mut sink);
        writer.write_signature().unwrap();
        assert!(writer.write_signature().is_err());
        assert_eq!(writer.state(), WriterState::SignatureWritten);
    }
}
