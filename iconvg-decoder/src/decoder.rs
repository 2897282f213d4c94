// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `decoder` module executes IconVG bytecode against a rendering sink.

use iconvg_core::arc;
use iconvg_core::color::{blend, one_byte_color, Color, Palette};
use iconvg_core::errors::{Error, Result};
use iconvg_core::geometry::Rect;
use iconvg_core::io::Cursor;
use iconvg_core::paint::Paint;
use iconvg_core::sink::Sink;

use log::debug;

use crate::meta::{self, MetadataChunks, DEFAULT_VIEWBOX, MID_SUGGESTED_PALETTE, MID_VIEWBOX};
use crate::number::ReadNumbers;

/// The ADJ register adjustment per opcode's low three bits. The value 7 adjusts by zero but
/// post-increments the selector instead.
const ADJUSTMENTS: [u32; 8] = [0, 1, 2, 3, 4, 5, 6, 0];

/// `DecodeOptions` is a common set of options for a decode.
#[derive(Copy, Clone, Debug, Default)]
pub struct DecodeOptions {
    /// The custom palette that one-byte color codes 0x80 ..= 0xBF name, and the initial
    /// contents of the color register file. When absent, a suggested palette from the
    /// source's metadata applies instead, and failing that, the 64-entry opaque black
    /// palette.
    pub palette: Option<Palette>,
}

/// The interpreter's two disjoint states. Styling opcodes mutate registers; drawing opcodes
/// emit path geometry.
enum Mode {
    Styling,
    Drawing,
}

/// `Decoder` is the fixed-size interpreter frame: the color and number register files, the
/// selector registers, and the level-of-detail bounds.
///
/// A decode never allocates; all of its state lives here or in the caller's sink. The frame
/// may be reused across decodes, each of which starts from a freshly reset state.
pub struct Decoder {
    custom: Palette,
    creg: Palette,
    nreg: [f32; 64],
    csel: u32,
    nsel: u32,
    lod: [f32; 2],
}

impl Decoder {
    pub fn new() -> Decoder {
        Decoder {
            custom: Palette::default(),
            creg: Palette::default(),
            nreg: [0.0; 64],
            csel: 0,
            nsel: 0,
            lod: [0.0; 2],
        }
    }

    /// Decodes the IconVG-formatted `src`, calling `sink`'s callbacks to paint the decoded
    /// vector graphic.
    ///
    /// The call sequence always begins with exactly one `begin_decode` and ends with exactly
    /// one `end_decode`. If `src` holds well-formed IconVG data and none of the callbacks
    /// returns an error, then the error argument to `end_decode` is `None`. Otherwise, the
    /// call sequence stops as soon as an error is encountered, whether a file format error or
    /// a callback error. That error becomes the argument to `end_decode`, and this function
    /// returns whatever `end_decode` returns.
    ///
    /// `dst_rect` is the destination rectangle the caller intends to render into. It is
    /// reported to the sink and does not affect the emitted geometry, which is always in
    /// viewbox (graphic) co-ordinates.
    pub fn decode<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        dst_rect: Rect,
        src: &[u8],
        options: &DecodeOptions,
    ) -> Result<()> {
        let res = match sink.begin_decode(dst_rect) {
            Ok(()) => self.run(sink, src, options),
            Err(err) => Err(err),
        };
        sink.end_decode(res.err())
    }

    fn run<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        src: &[u8],
        options: &DecodeOptions,
    ) -> Result<()> {
        self.custom = options.palette.unwrap_or_default();
        self.nreg = [0.0; 64];
        self.csel = 0;
        self.nsel = 0;
        self.lod = [0.0; 2];

        let mut cur = Cursor::new(src);
        let mut chunks = MetadataChunks::read_header(&mut cur)?;

        let mut use_default_viewbox = true;
        while let Some((metadata_id, mut chunk)) = chunks.next(&mut cur)? {
            if metadata_id == MID_VIEWBOX {
                use_default_viewbox = false;
                let viewbox = meta::read_viewbox(&mut chunk)?;
                sink.on_metadata_viewbox(viewbox)?;
            }
            else {
                // The strictly increasing ID order means no viewbox chunk can follow, so the
                // default applies from here on.
                if use_default_viewbox {
                    use_default_viewbox = false;
                    sink.on_metadata_viewbox(DEFAULT_VIEWBOX)?;
                }
                if metadata_id == MID_SUGGESTED_PALETTE {
                    let suggested = meta::read_suggested_palette(&mut chunk)?;
                    sink.on_metadata_suggested_palette(&suggested)?;
                    if options.palette.is_none() {
                        self.custom = suggested;
                    }
                }
                else {
                    debug!("ignoring metadata chunk with id {}", metadata_id);
                }
            }
        }
        if use_default_viewbox {
            sink.on_metadata_viewbox(DEFAULT_VIEWBOX)?;
        }

        // The color registers start out as the custom palette.
        self.creg = self.custom;
        self.execute(sink, &mut cur)
    }

    fn execute<S: Sink + ?Sized>(&mut self, sink: &mut S, cur: &mut Cursor<'_>) -> Result<()> {
        let mut mode = Mode::Styling;

        // Drawing opcodes keep the current point up to date. They also track the previous
        // opcode's last explicit control point, one per curve family, in case the subsequent
        // opcode is smooth and needs an implicit control point. Non-curve opcodes, and curve
        // opcodes of the other family, reset a control point to the current point.
        let mut curr = (0.0f32, 0.0f32);
        let mut quad_ctrl = (0.0f32, 0.0f32);
        let mut cube_ctrl = (0.0f32, 0.0f32);
        let mut paint_rgba = [0u8; 4];

        loop {
            let opcode = match cur.read_u8() {
                Some(opcode) => opcode,
                None => {
                    return match mode {
                        Mode::Styling => Ok(()),
                        Mode::Drawing => Err(Error::BadPathUnfinished),
                    };
                }
            };

            match mode {
                Mode::Styling => match opcode {
                    0x00..=0x3F => self.csel = u32::from(opcode & 0x3F),

                    0x40..=0x7F => self.nsel = u32::from(opcode & 0x3F),

                    // Set CREG[etc]; 1 byte color.
                    0x80..=0x87 => {
                        let code = cur.read_u8().ok_or(Error::BadColor)?;
                        let color = one_byte_color(code, &self.custom, &self.creg);
                        self.set_creg(opcode, color);
                    }

                    // Set CREG[etc]; 2 byte color, each nibble expanded.
                    0x88..=0x8F => {
                        let bytes = cur.read_bytes(2).ok_or(Error::BadColor)?;
                        let color = Color::new(
                            0x11 * (bytes[0] >> 4),
                            0x11 * (bytes[0] & 0x0F),
                            0x11 * (bytes[1] >> 4),
                            0x11 * (bytes[1] & 0x0F),
                        );
                        self.set_creg(opcode, color);
                    }

                    // Set CREG[etc]; 3 byte (direct) color.
                    0x90..=0x97 => {
                        let bytes = cur.read_bytes(3).ok_or(Error::BadColor)?;
                        let color = Color::new(bytes[0], bytes[1], bytes[2], 0xFF);
                        self.set_creg(opcode, color);
                    }

                    // Set CREG[etc]; 4 byte color.
                    0x98..=0x9F => {
                        let bytes = cur.read_bytes(4).ok_or(Error::BadColor)?;
                        let color = Color::new(bytes[0], bytes[1], bytes[2], bytes[3]);
                        self.set_creg(opcode, color);
                    }

                    // Set CREG[etc]; 3 byte (indirect) color: a blend of two 1 byte colors.
                    0xA0..=0xA7 => {
                        let bytes = cur.read_bytes(3).ok_or(Error::BadColor)?;
                        let c0 = one_byte_color(bytes[1], &self.custom, &self.creg);
                        let c1 = one_byte_color(bytes[2], &self.custom, &self.creg);
                        self.set_creg(opcode, blend(bytes[0], c0, c1));
                    }

                    // Set NREG[etc]; real number.
                    0xA8..=0xAF => {
                        let value = cur.read_real().ok_or(Error::BadNumber)?;
                        self.set_nreg(opcode, value);
                    }

                    // Set NREG[etc]; coordinate number.
                    0xB0..=0xB7 => {
                        let value = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                        self.set_nreg(opcode, value);
                    }

                    // Set NREG[etc]; zero-to-one number.
                    0xB8..=0xBF => {
                        let value = cur.read_zero_to_one().ok_or(Error::BadNumber)?;
                        self.set_nreg(opcode, value);
                    }

                    // Switch to the drawing mode.
                    0xC0..=0xC6 => {
                        paint_rgba = self.creg.colors[self.creg_index(opcode)].rgba;
                        let x = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                        let y = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                        sink.begin_drawing()?;
                        sink.begin_path(x, y)?;
                        curr = (x, y);
                        quad_ctrl = curr;
                        cube_ctrl = curr;
                        mode = Mode::Drawing;
                    }

                    // Set the Level of Detail bounds.
                    0xC7 => {
                        let lod_min = cur.read_real().ok_or(Error::BadNumber)?;
                        let lod_max = cur.read_real().ok_or(Error::BadNumber)?;
                        self.lod = [lod_min, lod_max];
                    }

                    _ => return Err(Error::BadStylingOpcode),
                },

                Mode::Drawing => match opcode >> 4 {
                    // 'L' mnemonic: absolute line_to.
                    0x00 | 0x01 => {
                        for _ in 0..=(opcode & 0x1F) {
                            let x = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let y = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            curr = (x, y);
                            sink.path_line_to(curr.0, curr.1)?;
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }
                    }

                    // 'l' mnemonic: relative line_to.
                    0x02 | 0x03 => {
                        for _ in 0..=(opcode & 0x1F) {
                            let dx = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let dy = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            curr = (curr.0 + dx, curr.1 + dy);
                            sink.path_line_to(curr.0, curr.1)?;
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }
                    }

                    // 'T' and 't' mnemonics: smooth quad_to, absolute and relative.
                    0x04 | 0x05 => {
                        for _ in 0..=(opcode & 0x0F) {
                            let mut x2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            if opcode >= 0x50 {
                                x2 += curr.0;
                                y2 += curr.1;
                            }
                            let x1 = (2.0 * curr.0) - quad_ctrl.0;
                            let y1 = (2.0 * curr.1) - quad_ctrl.1;
                            sink.path_quad_to(x1, y1, x2, y2)?;
                            quad_ctrl = (x1, y1);
                            curr = (x2, y2);
                            cube_ctrl = curr;
                        }
                    }

                    // 'Q' and 'q' mnemonics: quad_to, absolute and relative.
                    0x06 | 0x07 => {
                        for _ in 0..=(opcode & 0x0F) {
                            let mut x1 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y1 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut x2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            if opcode >= 0x70 {
                                x1 += curr.0;
                                y1 += curr.1;
                                x2 += curr.0;
                                y2 += curr.1;
                            }
                            sink.path_quad_to(x1, y1, x2, y2)?;
                            quad_ctrl = (x1, y1);
                            curr = (x2, y2);
                            cube_ctrl = curr;
                        }
                    }

                    // 'S' and 's' mnemonics: smooth cube_to, absolute and relative.
                    0x08 | 0x09 => {
                        for _ in 0..=(opcode & 0x0F) {
                            let mut x2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut x3 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y3 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            if opcode >= 0x90 {
                                x2 += curr.0;
                                y2 += curr.1;
                                x3 += curr.0;
                                y3 += curr.1;
                            }
                            let x1 = (2.0 * curr.0) - cube_ctrl.0;
                            let y1 = (2.0 * curr.1) - cube_ctrl.1;
                            sink.path_cube_to(x1, y1, x2, y2, x3, y3)?;
                            cube_ctrl = (x2, y2);
                            curr = (x3, y3);
                            quad_ctrl = curr;
                        }
                    }

                    // 'C' and 'c' mnemonics: cube_to, absolute and relative.
                    0x0A | 0x0B => {
                        for _ in 0..=(opcode & 0x0F) {
                            let mut x1 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y1 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut x2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y2 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut x3 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y3 = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            if opcode >= 0xB0 {
                                x1 += curr.0;
                                y1 += curr.1;
                                x2 += curr.0;
                                y2 += curr.1;
                                x3 += curr.0;
                                y3 += curr.1;
                            }
                            sink.path_cube_to(x1, y1, x2, y2, x3, y3)?;
                            cube_ctrl = (x2, y2);
                            curr = (x3, y3);
                            quad_ctrl = curr;
                        }
                    }

                    // 'A' and 'a' mnemonics: arc_to, absolute and relative, lowered to cubic
                    // Bézier curves.
                    0x0C | 0x0D => {
                        for _ in 0..=(opcode & 0x0F) {
                            let rx = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let ry = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let rot = cur.read_zero_to_one().ok_or(Error::BadCoordinate)?;
                            let flags = cur.read_natural().ok_or(Error::BadCoordinate)?;
                            let mut x = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let mut y = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            if opcode >= 0xD0 {
                                x += curr.0;
                                y += curr.1;
                            }
                            arc::path_arc_to(
                                sink,
                                curr.0,
                                curr.1,
                                rx,
                                ry,
                                rot,
                                flags & 0x01 != 0,
                                flags & 0x02 != 0,
                                x,
                                y,
                            )?;
                            curr = (x, y);
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }
                    }

                    _ => match opcode {
                        // 'z' mnemonic: close_path. The styled path is complete; paint it.
                        0xE1 => {
                            sink.end_path()?;
                            let paint = Paint::new(paint_rgba, &self.creg, &self.nreg);
                            sink.end_drawing(&paint)?;
                            mode = Mode::Styling;
                        }

                        // 'z; M' mnemonics: close_path; absolute move_to.
                        0xE2 => {
                            sink.end_path()?;
                            let x = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let y = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            sink.begin_path(x, y)?;
                            curr = (x, y);
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }

                        // 'z; m' mnemonics: close_path; relative move_to.
                        0xE3 => {
                            sink.end_path()?;
                            let dx = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            let dy = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            curr = (curr.0 + dx, curr.1 + dy);
                            sink.begin_path(curr.0, curr.1)?;
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }

                        // 'H' and 'h' mnemonics: horizontal line_to.
                        0xE6 | 0xE7 => {
                            let x = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            curr.0 = if opcode == 0xE6 { x } else { curr.0 + x };
                            sink.path_line_to(curr.0, curr.1)?;
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }

                        // 'V' and 'v' mnemonics: vertical line_to.
                        0xE8 | 0xE9 => {
                            let y = cur.read_coordinate().ok_or(Error::BadCoordinate)?;
                            curr.1 = if opcode == 0xE8 { y } else { curr.1 + y };
                            sink.path_line_to(curr.0, curr.1)?;
                            quad_ctrl = curr;
                            cube_ctrl = curr;
                        }

                        _ => return Err(Error::BadDrawingOpcode),
                    },
                },
            }
        }
    }

    /// Returns the level-of-detail bounds most recently set by a decode. Renderers whose
    /// device scale falls outside these bounds may skip the graphic.
    pub fn lod_bounds(&self) -> (f32, f32) {
        (self.lod[0], self.lod[1])
    }

    /// The CREG slot named by an opcode's ADJ bits: `CREG[(CSEL - ADJ) & 0x3F]`.
    fn creg_index(&self, opcode: u8) -> usize {
        (self.csel.wrapping_sub(ADJUSTMENTS[usize::from(opcode & 0x07)]) & 0x3F) as usize
    }

    fn set_creg(&mut self, opcode: u8, color: Color) {
        let index = self.creg_index(opcode);
        self.creg.colors[index] = color;
        if opcode & 0x07 == 0x07 {
            self.csel = self.csel.wrapping_add(1);
        }
    }

    fn set_nreg(&mut self, opcode: u8, value: f32) {
        let index =
            (self.nsel.wrapping_sub(ADJUSTMENTS[usize::from(opcode & 0x07)]) & 0x3F) as usize;
        self.nreg[index] = value;
        if opcode & 0x07 == 0x07 {
            self.nsel = self.nsel.wrapping_add(1);
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

/// Decodes the IconVG-formatted `src` with a fresh [`Decoder`] frame. See [`Decoder::decode`].
pub fn decode<S: Sink + ?Sized>(
    sink: &mut S,
    dst_rect: Rect,
    src: &[u8],
    options: &DecodeOptions,
) -> Result<()> {
    Decoder::new().decode(sink, dst_rect, src, options)
}
