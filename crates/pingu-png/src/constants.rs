/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The eight bytes every png file starts with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest width or height the format can describe, `2^31 - 1`
pub const MAX_DIMENSION: usize = (1 << 31) - 1;

/// Zlib compression method and window byte, DEFLATE with a 32KB window
pub const ZLIB_CMF: u8 = 0x78;

/// Modulus of the rolling checksum, the largest prime below `2^16`
pub const ADLER_MODULUS: u32 = 65521;

/// Largest number of bytes that can be summed before
/// `b` may overflow a `u32`, so we can defer the modulo until then
pub const ADLER_NMAX: usize = 5552;

/// Bit depths the header may carry
pub const VALID_BIT_DEPTHS: [u8; 5] = [1, 2, 4, 8, 16];

/// Largest payload a single chunk may carry, `2^31 - 1`
pub const MAX_CHUNK_LENGTH: usize = (1 << 31) - 1;
