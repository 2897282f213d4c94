// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `paint` module exposes the styling state that applies to a just-closed path.

use crate::color::{Color, Palette};
use crate::geometry::Matrix2x3;

/// The type of a paint: a flat color or a gradient.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaintType {
    FlatColor,
    LinearGradient,
    RadialGradient,
    /// The paint register holds bytes that are neither a well-formed premultiplied color nor a
    /// gradient descriptor.
    Invalid,
}

/// How a gradient repeats outside of its nominal bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GradientSpread {
    None,
    Pad,
    Reflect,
    Repeat,
}

/// `Paint` is the styling state as of a path's close: the selected paint register plus
/// read-only views of the color and number register files that a gradient descriptor refers
/// into.
///
/// A `Paint` is only valid for the duration of the [`Sink::end_drawing`](crate::sink::Sink)
/// call that carries it.
pub struct Paint<'a> {
    rgba: [u8; 4],
    creg: &'a Palette,
    nreg: &'a [f32; 64],
}

impl<'a> Paint<'a> {
    pub fn new(rgba: [u8; 4], creg: &'a Palette, nreg: &'a [f32; 64]) -> Paint<'a> {
        Paint { rgba, creg, nreg }
    }

    /// Classifies the paint.
    ///
    /// A well-formed premultiplied color is a flat color. A gradient is signalled by bytes that
    /// no well-formed premultiplied color can have: an alpha of zero together with a blue value
    /// of at least 0x80, whose 0x40 bit selects radial over linear.
    pub fn paint_type(&self) -> PaintType {
        let [r, g, b, a] = self.rgba;
        if (r <= a) && (g <= a) && (b <= a) {
            PaintType::FlatColor
        }
        else if (a == 0x00) && (b >= 0x80) {
            if b & 0x40 != 0 {
                PaintType::RadialGradient
            }
            else {
                PaintType::LinearGradient
            }
        }
        else {
            PaintType::Invalid
        }
    }

    /// Returns the flat color, alpha-premultiplied.
    pub fn flat_color_as_premul_color(&self) -> Color {
        Color { rgba: self.rgba }
    }

    /// Returns the flat color as non-premultiplied RGBA bytes.
    pub fn flat_color_as_nonpremul_rgba(&self) -> [u8; 4] {
        nonpremul(self.rgba)
    }

    /// Returns the gradient's spread.
    pub fn gradient_spread(&self) -> GradientSpread {
        match self.rgba[1] >> 6 {
            0 => GradientSpread::None,
            1 => GradientSpread::Pad,
            2 => GradientSpread::Reflect,
            _ => GradientSpread::Repeat,
        }
    }

    /// Returns the number of gradient stops.
    pub fn gradient_number_of_stops(&self) -> u32 {
        u32::from(self.rgba[0] & 0x3F)
    }

    /// Returns the given gradient stop's color, alpha-premultiplied. Stop indices wrap around
    /// the 64-entry color register file.
    pub fn gradient_stop_color_as_premul_color(&self, which_stop: u32) -> Color {
        self.creg.colors[self.stop_color_index(which_stop)]
    }

    /// Returns the given gradient stop's color as non-premultiplied RGBA bytes.
    pub fn gradient_stop_color_as_nonpremul_rgba(&self, which_stop: u32) -> [u8; 4] {
        nonpremul(self.creg.colors[self.stop_color_index(which_stop)].rgba)
    }

    /// Returns the given gradient stop's offset. Stop indices wrap around the 64-entry number
    /// register file.
    pub fn gradient_stop_offset(&self, which_stop: u32) -> f32 {
        let nbase = u32::from(self.rgba[2]);
        self.nreg[(0x3F & nbase.wrapping_add(which_stop)) as usize]
    }

    /// Returns the matrix that transforms viewbox (graphic) co-ordinates to pattern
    /// co-ordinates, assembled from the six number registers below the gradient's NBASE.
    ///
    /// Pattern co-ordinate space (also known as paint or gradient co-ordinate space) is where
    /// linear gradients always range from x=0 to x=1 and radial gradients always have
    /// centre=(0,0) and radius=1.
    pub fn gradient_transformation_matrix(&self) -> Matrix2x3 {
        let nbase = u32::from(self.rgba[2]);
        let nreg = |delta: u32| f64::from(self.nreg[(0x3F & nbase.wrapping_sub(delta)) as usize]);
        Matrix2x3::new(nreg(6), nreg(5), nreg(4), nreg(3), nreg(2), nreg(1))
    }

    fn stop_color_index(&self, which_stop: u32) -> usize {
        let cbase = u32::from(self.rgba[1]);
        (0x3F & cbase.wrapping_add(which_stop)) as usize
    }
}

fn nonpremul(rgba: [u8; 4]) -> [u8; 4] {
    let a = u32::from(rgba[3]);
    if a == 0x00 {
        [0x00; 4]
    }
    else if a == 0xFF {
        rgba
    }
    else {
        [
            (u32::from(rgba[0]) * 0xFF / a) as u8,
            (u32::from(rgba[1]) * 0xFF / a) as u8,
            (u32::from(rgba[2]) * 0xFF / a) as u8,
            a as u8,
        ]
    }
}
