/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A png encoder
//!
//! This features a simple PNG writer which produces streams readable by any
//! ISO/IEC 15948:2003 (E) conforming decoder.
//!
//! # Features
//! - All five scanline filters plus per row dynamic filter selection
//! - Validated headers, invalid images are rejected before any byte is written
//! - Writes to in memory buffers, slices or files
//!
//! # Usage
//!
//! #### Encode raw bytes
//!
//! ```
//! use pingu_png::{ColorModel, EncoderOptions, FilterType, PngEncoder};
//!
//! let pixels = vec![0_u8; 16 * 16 * 4];
//! let options = EncoderOptions::new(16, 16, ColorModel::TruecolorAlpha, 8)
//!     .set_filter(FilterType::Dynamic);
//! let mut sink = vec![];
//! PngEncoder::new(&pixels, options).encode(&mut sink).unwrap();
//! ```
//!
//! #### Assembling chunks by hand
//!
//! [`PngFile`] writes any sequence of [`Chunk`]s after the signature,
//! in the order they were added.
//!
//! ```
//! use pingu_png::{ColorModel, FilterType, IdatChunk, IendChunk, IhdrChunk, PngFile};
//!
//! let pixels = vec![0_u8; 2 * 2 * 3];
//! let header = IhdrChunk::new(2, 2, 8, ColorModel::Truecolor).unwrap();
//! let data = IdatChunk::new(&header, &pixels, FilterType::Paeth).unwrap();
//!
//! let mut file = PngFile::new();
//! file.add(header);
//! file.add(data);
//! file.add(IendChunk);
//!
//! let mut sink = vec![];
//! file.write(&mut sink).unwrap();
//! ```
//!
//! # Color models
//! Headers for every color model can be written, but the data chunk
//! only accepts truecolor rows (`RGB` or `RGBA`, 8 or 16 bits per sample).
//! Other models are rejected when the data chunk is created.
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
extern crate alloc;

pub use adler::{adler32, Adler32};
pub use chunks::{write_chunk, Chunk, IdatChunk, IendChunk, IhdrChunk};
pub use container::{PngFile, PngWriter, WriterState};
pub use encoder::PngEncoder;
pub use enums::{ColorModel, FilterType};
pub use error::PngEncodeErrors;
pub use options::{CompressionLevel, EncoderOptions};
pub use pingu_core;
pub use scanlines::{PackedScanlines, ScanlineEncoder, ScanlineSource};

mod adler;
mod chunks;
pub mod constants;
mod container;
pub mod crc;
mod encoder;
mod enums;
pub mod error;
pub mod filters;
mod options;
mod scanlines;
