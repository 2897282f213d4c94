// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `color` module provides alpha-premultiplied colors, palettes, and the built-in one-byte
//! color table.

/// `Color` is an alpha-premultiplied RGBA color. Alpha-premultiplication means that
/// `[0x00, 0xC0, 0x00, 0xC0]` represents a 75%-opaque, fully saturated green.
///
/// A well-formed premultiplied color has each of its red, green and blue values less than or
/// equal to its alpha value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Red, green, blue and alpha values, in that order.
    pub rgba: [u8; 4],
}

impl Color {
    pub const TRANSPARENT: Color = Color { rgba: [0x00, 0x00, 0x00, 0x00] };
    pub const OPAQUE_BLACK: Color = Color { rgba: [0x00, 0x00, 0x00, 0xFF] };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { rgba: [r, g, b, a] }
    }

    /// Returns true if each of the red, green and blue values does not exceed the alpha value.
    pub fn is_well_formed(&self) -> bool {
        let [r, g, b, a] = self.rgba;
        (r <= a) && (g <= a) && (b <= a)
    }
}

/// `Palette` is an ordered sequence of 64 colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Color; 64],
}

impl Default for Palette {
    /// The default palette is 64 opaque black colors.
    fn default() -> Self {
        Palette { colors: [Color::OPAQUE_BLACK; 64] }
    }
}

/// The 128 built-in one-byte colors.
///
/// Offsets 0, 1 and 2 are transparent, 50% gray and 75% gray. Offsets 3 ..= 127 are opaque
/// colors whose red, green and blue channels are sampled on a five-level axis
/// (0x00, 0x40, 0x80, 0xC0, 0xFF), red varying fastest.
pub const ONE_BYTE_COLORS: [Color; 128] = build_one_byte_colors();

const fn build_one_byte_colors() -> [Color; 128] {
    const LEVELS: [u8; 5] = [0x00, 0x40, 0x80, 0xC0, 0xFF];

    let mut table = [Color::TRANSPARENT; 128];
    table[1] = Color::new(0x80, 0x80, 0x80, 0x80);
    table[2] = Color::new(0xC0, 0xC0, 0xC0, 0xC0);

    let mut i = 0;
    while i < 125 {
        let r = LEVELS[i % 5];
        let g = LEVELS[(i / 5) % 5];
        let b = LEVELS[i / 25];
        table[3 + i] = Color::new(r, g, b, 0xFF);
        i += 1;
    }
    table
}

/// Resolves a one-byte color code.
///
/// Codes below 0x80 name the built-in [`ONE_BYTE_COLORS`]. Codes 0x80 ..= 0xBF name an entry of
/// the custom palette, and codes 0xC0 ..= 0xFF name an entry of the color register file, in
/// both cases keyed by the code's low six bits.
pub fn one_byte_color(code: u8, custom: &Palette, creg: &Palette) -> Color {
    if code < 0x80 {
        ONE_BYTE_COLORS[usize::from(code)]
    }
    else if code < 0xC0 {
        custom.colors[usize::from(code & 0x3F)]
    }
    else {
        creg.colors[usize::from(code & 0x3F)]
    }
}

/// Blends two colors, channel by channel: `((255 - t) * c0 + t * c1 + 128) / 255`.
///
/// With `t == 0` the result is `c0`; with `t == 255` it is `c1`. Blending two well-formed
/// premultiplied colors yields a well-formed premultiplied color.
pub fn blend(t: u8, c0: Color, c1: Color) -> Color {
    let p = 255 - u32::from(t);
    let q = u32::from(t);
    let mut rgba = [0u8; 4];
    for (i, v) in rgba.iter_mut().enumerate() {
        let c0 = u32::from(c0.rgba[i]);
        let c1 = u32::from(c1.rgba[i]);
        *v = ((p * c0 + q * c1 + 128) / 255) as u8;
    }
    Color { rgba }
}
