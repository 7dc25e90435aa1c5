/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec::Vec;

use log::debug;
use pingu_core::bytestream::{ByteWriter, ByteWriterTrait};

use crate::chunks::Chunk;
use crate::constants::MAX_CHUNK_LENGTH;
use crate::crc::ChunkCrc;
use crate::error::PngEncodeErrors;

/// Frame `chunk` and write it to `writer`
///
/// Writes the length, chunk name, payload and the crc of name and payload.
///
/// The payload is produced and checked against the declared length
/// before anything reaches the writer, so if they don't match (or
/// producing it fails) nothing is written.
///
/// # Returns
/// Number of bytes written, payload plus 12 bytes of framing
pub fn write_chunk<T: ByteWriterTrait, C: Chunk + ?Sized>(
    chunk: &C, writer: &mut ByteWriter<T>
) -> Result<usize, PngEncodeErrors> {
    let name = chunk.name();
    let declared = chunk.length()?;

    if declared > MAX_CHUNK_LENGTH {
        return Err(PngEncodeErrors::Generic(
            "Chunk payload is larger than 2^31-1 bytes"
        ));
    }
    // grows with what the chunk actually produces
    let mut payload = Vec::new();
    chunk.write_payload(&mut payload)?;

    if payload.len() != declared {
        return Err(PngEncodeErrors::LengthMismatch {
            chunk: name,
            declared,
            actual: payload.len()
        });
    }
    // crc covers the name and the data but not the length
    let mut crc = ChunkCrc::new(&name);
    crc.update(&payload);

    // format
    // length - chunk type - [data] -  crc chunk
    writer.write_u32_be_err(declared as u32)?;
    writer.write_const_bytes(&name)?;
    writer.write_all(&payload)?;
    writer.write_u32_be_err(crc.finish())?;

    debug!(
        "Wrote {} chunk, {} bytes of payload",
        core::str::from_utf8(&name).unwrap_or("XXXX"),
        declared
    );
    Ok(declared + 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::IendChunk;

    struct BadChunk;

    impl Chunk for BadChunk {
        fn name(&self) -> [u8; 4] {
            *b"ibad"
        }

        fn length(&self) -> Result<usize, PngEncodeErrors> {
            Ok(10)
        }

        fn write_payload(&self, _: &mut Vec<u8>) -> Result<(), PngEncodeErrors> {
            Ok(())
        }
    }

    #[test]
    fn test_length_mismatch_writes_nothing() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        let err = write_chunk(&BadChunk, &mut writer).unwrap_err();

        assert!(matches!(
            err,
            PngEncodeErrors::LengthMismatch {
                declared: 10,
                actual: 0,
                ..
            }
        ));
        assert_eq!(writer.bytes_written(), 0);
        assert!(sink.is_empty());
    }

    struct HugeClaimChunk;

    impl Chunk for HugeClaimChunk {
        fn name(&self) -> [u8; 4] {
            *b"huGe"
        }

        fn length(&self) -> Result<usize, PngEncodeErrors> {
            Ok(MAX_CHUNK_LENGTH)
        }

        fn write_payload(&self, out: &mut Vec<u8>) -> Result<(), PngEncodeErrors> {
            out.extend_from_slice(b"tiny");
            Ok(())
        }
    }

    #[test]
    fn test_large_claim_rejected_from_payload() {
        let mut storage = [0_u8; 32];
        let mut writer = ByteWriter::new(&mut storage[..]);
        let err = write_chunk(&HugeClaimChunk, &mut writer).unwrap_err();

        assert!(matches!(
            err,
            PngEncodeErrors::LengthMismatch {
                declared: MAX_CHUNK_LENGTH,
                actual: 4,
                ..
            }
        ));
        assert_eq!(writer.bytes_written(), 0);
    }

    #[test]
    fn test_crc_covers_name_and_payload() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        let header = crate::chunks::IhdrChunk::new(1, 1, 8, crate::ColorModel::Truecolor).unwrap();
        assert_eq!(write_chunk(&header, &mut writer).unwrap(), 25);

        let crc = u32::from_be_bytes(sink[21..25].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&sink[4..21]));
        assert_eq!(&sink[..8], &[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    }

    #[test]
    fn test_iend_framing() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        assert_eq!(write_chunk(&IendChunk, &mut writer).unwrap(), 12);
        assert_eq!(
            sink,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }
}
