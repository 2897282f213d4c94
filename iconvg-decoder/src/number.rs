// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `number` module decodes IconVG's four self-describing number kinds.
//!
//! All four kinds share one variable-length prefix encoding, keyed on the low bits of the
//! first byte:
//!
//! - a clear bit 0 marks a one-byte encoding carrying a 7-bit payload (`byte >> 1`),
//! - a set bit 0 with a clear bit 1 marks a two-byte encoding carrying a 14-bit payload
//!   (`u16le >> 2`),
//! - both bits set mark a four-byte encoding carrying a 30-bit payload in the high bits of a
//!   `u32le`.
//!
//! The kinds differ in how the payload is interpreted. Naturals are unsigned integers. Reals,
//! co-ordinates and zero-to-one numbers interpret the four-byte payload as an IEEE-754 float32
//! whose two low mantissa bits are zeroed, and bias or scale the shorter payloads as
//! documented on each method.

use iconvg_core::io::Cursor;

/// Reads IconVG self-describing numbers from a byte cursor.
///
/// Each method returns `None`, without consuming anything, when too few bytes remain for the
/// encoding that the first byte declares. The caller maps that shortfall to the diagnostic
/// appropriate for its context.
pub trait ReadNumbers {
    /// Reads a natural number: the payload as an unsigned integer.
    fn read_natural(&mut self) -> Option<u32>;

    /// Reads a real number: a one- or two-byte payload as a (non-negative, integral) float,
    /// or a four-byte bit-reinterpreted float32.
    fn read_real(&mut self) -> Option<f32>;

    /// Reads a co-ordinate number: a one-byte payload biased by −64, a two-byte payload biased
    /// by −8192 and scaled by 1/64, or a four-byte bit-reinterpreted float32.
    fn read_coordinate(&mut self) -> Option<f32>;

    /// Reads a zero-to-one number: a one-byte payload scaled by 1/120, a two-byte payload
    /// scaled by 1/15120, or a four-byte bit-reinterpreted float32.
    fn read_zero_to_one(&mut self) -> Option<f32>;
}

/// Zeroes the payload's spent low two bits before reinterpreting it as a float32.
#[inline(always)]
fn reinterpret_f32(bits: u32) -> f32 {
    f32::from_bits(bits & 0xFFFF_FFFC)
}

impl ReadNumbers for Cursor<'_> {
    fn read_natural(&mut self) -> Option<u32> {
        let v = self.peek_u8()?;
        if v & 0x01 == 0 {
            self.advance(1);
            Some(u32::from(v >> 1))
        }
        else if v & 0x02 == 0 {
            let x = self.peek_u16le()?;
            self.advance(2);
            Some(u32::from(x >> 2))
        }
        else {
            let x = self.peek_u32le()?;
            self.advance(4);
            Some(x >> 2)
        }
    }

    fn read_real(&mut self) -> Option<f32> {
        let v = self.peek_u8()?;
        if v & 0x01 == 0 {
            self.advance(1);
            Some(f32::from(v >> 1))
        }
        else if v & 0x02 == 0 {
            let x = self.peek_u16le()?;
            self.advance(2);
            Some(f32::from(x >> 2))
        }
        else {
            let x = self.peek_u32le()?;
            self.advance(4);
            Some(reinterpret_f32(x))
        }
    }

    fn read_coordinate(&mut self) -> Option<f32> {
        let v = self.peek_u8()?;
        if v & 0x01 == 0 {
            self.advance(1);
            Some(f32::from(i16::from(v >> 1) - 64))
        }
        else if v & 0x02 == 0 {
            let x = self.peek_u16le()?;
            self.advance(2);
            Some(((i32::from(x >> 2) - (128 * 64)) as f32) / 64.0)
        }
        else {
            let x = self.peek_u32le()?;
            self.advance(4);
            Some(reinterpret_f32(x))
        }
    }

    fn read_zero_to_one(&mut self) -> Option<f32> {
        let v = self.peek_u8()?;
        if v & 0x01 == 0 {
            self.advance(1);
            Some((f64::from(v >> 1) / 120.0) as f32)
        }
        else if v & 0x02 == 0 {
            let x = self.peek_u16le()?;
            self.advance(2);
            Some((f64::from(x >> 2) / 15120.0) as f32)
        }
        else {
            let x = self.peek_u32le()?;
            self.advance(4);
            Some(reinterpret_f32(x))
        }
    }
}
