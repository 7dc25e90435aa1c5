/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::error::PngEncodeErrors;

/// Scanline filter strategies
///
/// The first five map to the filter type byte written in front of
/// every scanline. [`FilterType::Dynamic`] is a meta strategy which
/// tries all five on every row and keeps the cheapest one, it never
/// appears in the output.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
    #[default]
    Dynamic
}

impl FilterType {
    /// The five concrete strategies in declaration order,
    /// which is also the tie break order for dynamic selection
    pub const CONCRETE: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth
    ];

    pub const fn to_int(self) -> u8 {
        match self {
            FilterType::None => 0,
            FilterType::Sub => 1,
            FilterType::Up => 2,
            FilterType::Average => 3,
            FilterType::Paeth => 4,
            FilterType::Dynamic => 255
        }
    }

    pub const fn from_int(int: u8) -> Option<FilterType> {
        match int {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            255 => Some(FilterType::Dynamic),
            _ => None
        }
    }
}

impl TryFrom<u8> for FilterType {
    type Error = PngEncodeErrors;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FilterType::from_int(value).ok_or(PngEncodeErrors::UnknownFilter(value))
    }
}

/// Color models a png header can describe
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorModel {
    Grayscale,
    Truecolor,
    Indexed,
    GrayscaleAlpha,
    TruecolorAlpha
}

impl ColorModel {
    pub const fn to_int(self) -> u8 {
        match self {
            ColorModel::Grayscale => 0,
            ColorModel::Truecolor => 2,
            ColorModel::Indexed => 3,
            ColorModel::GrayscaleAlpha => 4,
            ColorModel::TruecolorAlpha => 6
        }
    }

    pub const fn from_int(int: u8) -> Option<ColorModel> {
        match int {
            0 => Some(ColorModel::Grayscale),
            2 => Some(ColorModel::Truecolor),
            3 => Some(ColorModel::Indexed),
            4 => Some(ColorModel::GrayscaleAlpha),
            6 => Some(ColorModel::TruecolorAlpha),
            _ => None
        }
    }

    pub const fn num_components(self) -> usize {
        match self {
            ColorModel::Grayscale | ColorModel::Indexed => 1,
            ColorModel::GrayscaleAlpha => 2,
            ColorModel::Truecolor => 3,
            ColorModel::TruecolorAlpha => 4
        }
    }

    /// Bit depths this color model may be stored with
    pub const fn allowed_bit_depths(self) -> &'static [u8] {
        match self {
            ColorModel::Grayscale => &[1, 2, 4, 8, 16],
            ColorModel::Indexed => &[1, 2, 4, 8],
            ColorModel::Truecolor | ColorModel::GrayscaleAlpha | ColorModel::TruecolorAlpha => {
                &[8, 16]
            }
        }
    }

    pub fn supports_bit_depth(self, depth: u8) -> bool {
        self.allowed_bit_depths().contains(&depth)
    }
}

impl TryFrom<u8> for ColorModel {
    type Error = PngEncodeErrors;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ColorModel::from_int(value).ok_or(PngEncodeErrors::UnknownColorModel(value))
    }
}

#[test]
fn test_filter_tags_round_trip() {
    for filter in FilterType::CONCRETE {
        assert_eq!(FilterType::from_int(filter.to_int()), Some(filter));
    }
    assert_eq!(FilterType::from_int(255), Some(FilterType::Dynamic));
    assert!(FilterType::try_from(5).is_err());
}
