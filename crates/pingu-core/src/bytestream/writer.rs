/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::{ByteIoError, ByteWriterTrait};

/// Encapsulates a simple byte writer with
/// support for big endian integer writes
///
/// All writes return an error when the sink fails, nothing
/// is buffered inside the writer itself.
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer wrapping `buffer`
    ///
    /// # Example
    /// ```
    /// use pingu_core::bytestream::ByteWriter;
    /// let mut sink = vec![];
    /// let writer = ByteWriter::new(&mut sink);
    /// assert_eq!(writer.bytes_written(), 0);
    /// ```
    pub fn new(buffer: T) -> ByteWriter<T> {
        ByteWriter {
            buffer,
            bytes_written: 0
        }
    }

    /// Write all bytes in `buf` or error out
    ///
    /// # Example
    /// ```
    /// use pingu_core::bytestream::ByteWriter;
    /// let mut storage = [0_u8; 2];
    /// let mut writer = ByteWriter::new(&mut storage[..]);
    /// assert!(writer.write_all(&[1, 2]).is_ok());
    /// assert!(writer.write_all(&[3]).is_err());
    /// ```
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a fixed size array of bytes or error out
    pub fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.buffer.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a single byte into the sink or error out
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const_bytes(&[byte])
    }

    /// Write a `u32` as a big endian integer
    ///
    /// # Example
    /// ```
    /// use pingu_core::bytestream::ByteWriter;
    /// let mut sink = vec![];
    /// let mut writer = ByteWriter::new(&mut sink);
    /// writer.write_u32_be_err(0x0102_0304).unwrap();
    /// assert_eq!(sink, [1, 2, 3, 4]);
    /// ```
    pub fn write_u32_be_err(&mut self, value: u32) -> Result<(), ByteIoError> {
        self.write_const_bytes(&value.to_be_bytes())
    }

    /// Return the number of bytes the writer has successfully written
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Pass a size hint to the sink
    pub fn reserve(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.buffer.reserve_capacity(size)
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::bytestream::{ByteIoError, ByteWriter};

    #[test]
    fn test_big_endian_writes() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        writer.write_u32_be_err(0x0102_0304).unwrap();
        writer.write_u8_err(7).unwrap();
        assert_eq!(writer.bytes_written(), 5);
        assert_eq!(sink, [1, 2, 3, 4, 7]);
    }

    #[test]
    fn test_slice_out_of_space() {
        let mut storage = [0_u8; 3];
        let mut writer = ByteWriter::new(&mut storage[..]);
        let err = writer.write_u32_be_err(10).unwrap_err();
        assert!(matches!(err, ByteIoError::NotEnoughBuffer(3, 4)));
        // failed writes are not counted
        assert_eq!(writer.bytes_written(), 0);
    }
}
