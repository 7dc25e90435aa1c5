/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Scanline filters
//!
//! Every filter predicts a byte from bytes already known to a decoder
//! and stores the residual, all arithmetic wrapping modulo 256.
//!
//! For a byte at `x` with `bpp` bytes per pixel
//! - `a` is `raw[x-bpp]`, the byte one pixel to the left
//! - `b` is `previous[x]`, the byte above
//! - `c` is `previous[x-bpp]`, the byte above and to the left
//!
//! and any of them reads as zero when it falls outside the image.
//!
//! The first row of an image has no previous row, the filters
//! have dedicated routines for it which give the same bytes as
//! running the general routines against a row of zeroes.
pub use dynamic::{score_scanline, select_and_filter, FilterSelector};

use crate::enums::FilterType;
use crate::error::PngEncodeErrors;

mod dynamic;

/// Filter `raw` into `target` using `filter`
///
/// `target` must be at least as long as `raw`, only the first `raw.len()`
/// bytes are written, the filter type byte is not.
/// `previous` is the unfiltered row above, or `None` for the first row.
///
/// [`FilterType::Dynamic`] is rejected, use a [`FilterSelector`] to resolve it
pub fn filter_scanline(
    filter: FilterType, target: &mut [u8], raw: &[u8], previous: Option<&[u8]>,
    bytes_per_pixel: usize
) -> Result<(), PngEncodeErrors> {
    if bytes_per_pixel == 0 {
        return Err(PngEncodeErrors::InvalidBytesPerPixel(bytes_per_pixel));
    }
    if target.len() < raw.len() {
        return Err(PngEncodeErrors::ScanlineLengthMismatch(raw.len(), target.len()));
    }
    if let Some(prev) = previous {
        if prev.len() != raw.len() {
            return Err(PngEncodeErrors::ScanlineLengthMismatch(raw.len(), prev.len()));
        }
    }
    let out = &mut target[..raw.len()];
    // a pixel wider than the row only has left neighbours outside the image
    let bpp = bytes_per_pixel.min(raw.len());

    match (filter, previous) {
        (FilterType::None, _) | (FilterType::Up, None) => out.copy_from_slice(raw),
        // without a row above, paeth always picks the left byte
        (FilterType::Sub, _) | (FilterType::Paeth, None) => filter_sub(raw, out, bpp),
        (FilterType::Up, Some(prev)) => filter_up(prev, raw, out),
        (FilterType::Average, Some(prev)) => filter_avg(prev, raw, out, bpp),
        (FilterType::Average, None) => filter_avg_first(raw, out, bpp),
        (FilterType::Paeth, Some(prev)) => filter_paeth(prev, raw, out, bpp),
        (FilterType::Dynamic, _) => {
            return Err(PngEncodeErrors::Generic(
                "Dynamic filtering must be resolved through a FilterSelector"
            ))
        }
    }
    Ok(())
}

fn filter_sub(raw: &[u8], out: &mut [u8], bpp: usize) {
    out[..bpp].copy_from_slice(&raw[..bpp]);

    for ((filt, x), a) in out[bpp..].iter_mut().zip(&raw[bpp..]).zip(raw) {
        *filt = x.wrapping_sub(*a);
    }
}

fn filter_up(prev_row: &[u8], raw: &[u8], out: &mut [u8]) {
    for ((filt, x), b) in out.iter_mut().zip(raw).zip(prev_row) {
        *filt = x.wrapping_sub(*b);
    }
}

fn filter_avg(prev_row: &[u8], raw: &[u8], out: &mut [u8], bpp: usize) {
    // handle leftmost pixel explicitly, a is zero there
    for ((filt, x), b) in out[..bpp].iter_mut().zip(raw).zip(prev_row) {
        *filt = x.wrapping_sub(b >> 1);
    }

    for (((filt, x), a), b) in out[bpp..]
        .iter_mut()
        .zip(&raw[bpp..])
        .zip(raw)
        .zip(&prev_row[bpp..])
    {
        // The addition needs 9 bits, so bump it up to 16.
        let avg = ((u16::from(*a) + u16::from(*b)) >> 1) as u8;
        *filt = x.wrapping_sub(avg);
    }
}

fn filter_avg_first(raw: &[u8], out: &mut [u8], bpp: usize) {
    out[..bpp].copy_from_slice(&raw[..bpp]);

    for ((filt, x), a) in out[bpp..].iter_mut().zip(&raw[bpp..]).zip(raw) {
        *filt = x.wrapping_sub(a >> 1);
    }
}

fn filter_paeth(prev_row: &[u8], raw: &[u8], out: &mut [u8], bpp: usize) {
    // handle leftmost pixel explicitly, paeth(0,b,0) is always b
    for ((filt, x), b) in out[..bpp].iter_mut().zip(raw).zip(prev_row) {
        *filt = x.wrapping_sub(paeth(0, *b, 0));
    }

    for ((((filt, x), a), b), c) in out[bpp..]
        .iter_mut()
        .zip(&raw[bpp..])
        .zip(raw)
        .zip(&prev_row[bpp..])
        .zip(prev_row)
    {
        *filt = x.wrapping_sub(paeth(*a, *b, *c));
    }
}

/// The paeth predictor, returns whichever of `a`, `b`, `c`
/// is closest to `a + b - c`, preferring `a` then `b` on ties
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        return a as u8;
    }
    if pb <= pc {
        return b as u8;
    }
    c as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paeth_tie_breaks() {
        // all distances equal, a wins
        assert_eq!(paeth(7, 7, 7), 7);
        // p = b, so pb is zero
        assert_eq!(paeth(0, 9, 0), 9);
        // p = 10 + 20 - 15 = 15, pa = 5, pb = 5, pc = 0
        assert_eq!(paeth(10, 20, 15), 15);
        // p = 20 + 10 - 15 = 15, pa = 5, pb = 5, pc = 0 picks c
        assert_eq!(paeth(20, 10, 15), 15);
        // p = 5 + 10 - 0 = 15, pa = 10, pb = 5, pc = 15
        assert_eq!(paeth(5, 10, 0), 10);
    }

    #[test]
    fn test_rejects_zero_bpp() {
        let mut out = [0; 4];
        let err = filter_scanline(FilterType::Sub, &mut out, &[1, 2, 3, 4], None, 0).unwrap_err();
        assert_eq!(err.parameter(), Some("bytes_per_pixel"));
    }

    #[test]
    fn test_rejects_dynamic() {
        let mut out = [0; 4];
        assert!(filter_scanline(FilterType::Dynamic, &mut out, &[1, 2, 3, 4], None, 1).is_err());
    }

    #[test]
    fn test_previous_length_checked() {
        let mut out = [0; 4];
        let err = filter_scanline(FilterType::Up, &mut out, &[1, 2, 3, 4], Some(&[1, 2]), 1);
        assert!(matches!(err, Err(PngEncodeErrors::ScanlineLengthMismatch(4, 2))));
    }

    #[test]
    fn test_pixel_wider_than_row() {
        let mut out = [0; 3];
        filter_scanline(FilterType::Paeth, &mut out, &[5, 6, 7], Some(&[1, 1, 1]), 4).unwrap();
        assert_eq!(out, [4, 5, 6]);
    }
}
