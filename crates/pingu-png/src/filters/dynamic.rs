/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Per row filter selection
//!
//! Runs every filter on a row and keeps the one whose output has the
//! smallest sum of absolute values when bytes are read as signed.
//! This is the usual stand in for "compresses best" used by png encoders.
use alloc::vec::Vec;

use log::trace;

use crate::enums::FilterType;
use crate::error::PngEncodeErrors;
use crate::filters::filter_scanline;

/// Cost of a filtered row, lower is better
pub fn score_scanline(filtered: &[u8]) -> u64 {
    filtered
        .iter()
        .map(|x| u64::from((*x as i8).unsigned_abs()))
        .sum()
}

/// Chooses the best filter for each row
///
/// Holds two scratch rows which are reused across calls, so one
/// selector should live as long as the image being encoded.
#[derive(Default)]
pub struct FilterSelector {
    best:      Vec<u8>,
    candidate: Vec<u8>
}

impl FilterSelector {
    pub fn new() -> FilterSelector {
        FilterSelector::default()
    }

    /// Filter `raw` with the cheapest filter, writing the filter type
    /// to `target[0]` and the filtered bytes after it
    ///
    /// `target` must hold at least `raw.len() + 1` bytes.
    ///
    /// Ties go to the filter declared first (`None`, `Sub`, `Up`, `Average`, `Paeth`)
    ///
    /// # Returns
    /// The filter that was chosen
    pub fn filter_into(
        &mut self, target: &mut [u8], raw: &[u8], previous: Option<&[u8]>, bytes_per_pixel: usize
    ) -> Result<FilterType, PngEncodeErrors> {
        if target.len() <= raw.len() {
            return Err(PngEncodeErrors::ScanlineLengthMismatch(
                raw.len() + 1,
                target.len()
            ));
        }
        self.best.resize(raw.len(), 0);
        self.candidate.resize(raw.len(), 0);

        let mut best_filter = FilterType::None;
        let mut best_score = u64::MAX;

        for filter in FilterType::CONCRETE {
            filter_scanline(filter, &mut self.candidate, raw, previous, bytes_per_pixel)?;

            let score = score_scanline(&self.candidate);

            if score < best_score {
                best_score = score;
                best_filter = filter;
                core::mem::swap(&mut self.best, &mut self.candidate);
            }
            if best_score == 0 {
                // nothing later can be strictly better
                break;
            }
        }
        trace!("Chose {:?} filter with score {}", best_filter, best_score);

        target[0] = best_filter.to_int();
        target[1..=raw.len()].copy_from_slice(&self.best);

        Ok(best_filter)
    }
}

/// Filter a single row with the cheapest filter
///
/// Allocates scratch space on every call, prefer a [`FilterSelector`]
/// when filtering many rows.
pub fn select_and_filter(
    target: &mut [u8], raw: &[u8], previous: Option<&[u8]>, bytes_per_pixel: usize
) -> Result<FilterType, PngEncodeErrors> {
    FilterSelector::new().filter_into(target, raw, previous, bytes_per_pixel)
}
