/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::ByteIoError;

/// The writer trait implemented for sinks of the pingu encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images.
///
/// Writes may block, e.g. when the sink is a file. A sink signalling
/// an error must be treated as fatal by the encoder, no further
/// writes should be issued.
pub trait ByteWriterTrait {
    /// Write all bytes to the sink or return an error if that isn't possible
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write the bytes
    ///
    /// This is provided to allow for optimized writes where possible. (when the compiler can const fold them)
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError>;
    /// Ensure bytes are written to the sink.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
    /// A hint to tell the implementation how big of a size we expect the output to be
    ///
    /// This is just a hint, akin to calling `Vec::reserve`, sinks that
    /// cannot pre-allocate should return `Ok(())`
    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError>;
}

impl ByteWriterTrait for &mut [u8] {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if buf.len() > self.len() {
            return Err(ByteIoError::NotEnoughBuffer(self.len(), buf.len()));
        }
        let (a, b) = core::mem::take(self).split_at_mut(buf.len());
        a.copy_from_slice(buf);
        *self = b;
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        // can't really pre-allocate anything here
        Ok(())
    }
}

impl ByteWriterTrait for &mut alloc::vec::Vec<u8> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.reserve(size);
        Ok(())
    }
}

#[cfg(feature = "std")]
impl ByteWriterTrait for &mut std::io::BufWriter<std::fs::File> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        use std::io::Write;
        self.write_all(buf)?;
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        use std::io::Write;
        self.flush()?;
        Ok(())
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}
