/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte sinks and writers used by the encoders
//!
//! Encoders never talk to an output directly, they go through
//! [`ByteWriter`] which wraps anything implementing [`ByteWriterTrait`]
use core::fmt::{Debug, Display, Formatter};

pub use traits::ByteWriterTrait;
pub use writer::ByteWriter;

mod traits;
mod writer;

/// Errors that can occur when writing to a sink
pub enum ByteIoError {
    /// An error from the underlying std writer
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// The sink cannot hold the bytes requested
    ///
    /// # Arguments
    /// - 1st argument is the space left in the sink
    /// - 2nd argument is the number of bytes we tried to write
    NotEnoughBuffer(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::NotEnoughBuffer(left, requested) => {
                writeln!(
                    f,
                    "Not enough buffer to write {requested} bytes, space left is {left}"
                )
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ByteIoError::StdIoError(err) => Some(err),
            _ => None
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}
