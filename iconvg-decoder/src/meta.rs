// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `meta` module reads the IconVG header: the magic identifier and the ordered metadata
//! chunks.

use iconvg_core::color::{one_byte_color, Color, Palette};
use iconvg_core::errors::{Error, Result};
use iconvg_core::geometry::Rect;
use iconvg_core::io::Cursor;

use log::debug;

use crate::number::ReadNumbers;

/// The IconVG magic identifier: `0x89` then ASCII "IVG".
const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

/// Metadata ID 0: the graphic's viewbox.
pub(crate) const MID_VIEWBOX: u32 = 0;
/// Metadata ID 1: the graphic's suggested palette.
pub(crate) const MID_SUGGESTED_PALETTE: u32 = 1;

/// The viewbox assumed when the source does not declare one.
pub const DEFAULT_VIEWBOX: Rect = Rect { min_x: -32.0, min_y: -32.0, max_x: 32.0, max_y: 32.0 };

/// Consumes the 4-byte magic identifier.
fn read_magic(cur: &mut Cursor<'_>) -> Result<()> {
    match cur.read_bytes(4) {
        Some(magic) if magic == MAGIC => Ok(()),
        _ => Err(Error::BadMagicIdentifier),
    }
}

/// `MetadataChunks` iterates the declared number of metadata chunks, enforcing the framing
/// invariants: each chunk's length fits the remaining source, and metadata IDs are strictly
/// increasing.
pub(crate) struct MetadataChunks {
    remaining: u32,
    previous_id: i64,
}

impl MetadataChunks {
    /// Consumes the chunk count from the cursor and prepares to iterate that many chunks.
    pub(crate) fn read_header(cur: &mut Cursor<'_>) -> Result<Self> {
        read_magic(cur)?;
        let num_chunks = cur.read_natural().ok_or(Error::BadMetadata)?;
        Ok(MetadataChunks { remaining: num_chunks, previous_id: -1 })
    }

    /// Returns the next chunk's metadata ID and a child cursor over exactly its payload, or
    /// `None` when all declared chunks have been read. The parent cursor is advanced past the
    /// whole chunk regardless of how much of the child is consumed.
    pub(crate) fn next<'a>(&mut self, cur: &mut Cursor<'a>) -> Result<Option<(u32, Cursor<'a>)>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let chunk_length = cur.read_natural().ok_or(Error::BadMetadata)?;
        if (chunk_length as usize) > cur.remaining_len() {
            return Err(Error::BadMetadata);
        }
        let mut chunk = cur.limit(chunk_length as usize);
        cur.advance(chunk_length as usize);

        let metadata_id = chunk.read_natural().ok_or(Error::BadMetadata)?;
        if self.previous_id >= i64::from(metadata_id) {
            return Err(Error::BadMetadataIdOrder);
        }
        self.previous_id = i64::from(metadata_id);

        Ok(Some((metadata_id, chunk)))
    }
}

/// Reads a viewbox payload: four co-ordinate numbers consuming the whole chunk.
pub(crate) fn read_viewbox(chunk: &mut Cursor<'_>) -> Result<Rect> {
    let viewbox = (|| {
        let min_x = chunk.read_coordinate()?;
        let min_y = chunk.read_coordinate()?;
        let max_x = chunk.read_coordinate()?;
        let max_y = chunk.read_coordinate()?;
        Some(Rect::new(min_x, min_y, max_x, max_y))
    })()
    .ok_or(Error::BadMetadataViewbox)?;

    if chunk.remaining_len() != 0 {
        return Err(Error::BadMetadataViewbox);
    }
    Ok(viewbox)
}

/// Reads a suggested palette payload, consuming the whole chunk.
///
/// The first byte's low six bits give the number of colors minus one, and its high two bits
/// give each color's byte length minus one. Palette entries beyond those listed stay opaque
/// black. One-byte color codes that name the custom palette or the color registers have
/// nothing to refer to yet and also resolve to opaque black.
pub(crate) fn read_suggested_palette(chunk: &mut Cursor<'_>) -> Result<Palette> {
    let header = chunk.read_u8().ok_or(Error::BadMetadataSuggestedPalette)?;
    let num_colors = 1 + usize::from(header & 0x3F);
    let color_length = 1 + usize::from(header >> 6);

    let black = Palette::default();
    let mut palette = Palette::default();
    for color in palette.colors.iter_mut().take(num_colors) {
        let bytes = chunk.read_bytes(color_length).ok_or(Error::BadMetadataSuggestedPalette)?;
        *color = match *bytes {
            [code] => one_byte_color(code, &black, &black),
            [lo, hi] => Color::new(
                0x11 * (lo >> 4),
                0x11 * (lo & 0x0F),
                0x11 * (hi >> 4),
                0x11 * (hi & 0x0F),
            ),
            [r, g, b] => Color::new(r, g, b, 0xFF),
            [r, g, b, a] => Color::new(r, g, b, a),
            _ => return Err(Error::BadMetadataSuggestedPalette),
        };
    }

    if chunk.remaining_len() != 0 {
        return Err(Error::BadMetadataSuggestedPalette);
    }
    Ok(palette)
}

/// Returns the viewbox declared by the source's metadata, or the default viewbox if none is
/// declared, after validating the magic identifier and the metadata framing.
///
/// Chunks other than the viewbox are skipped over by their declared length, without validating
/// their payloads.
pub fn decode_viewbox(src: &[u8]) -> Result<Rect> {
    let mut cur = Cursor::new(src);
    let mut chunks = MetadataChunks::read_header(&mut cur)?;

    let mut viewbox = None;
    while let Some((metadata_id, mut chunk)) = chunks.next(&mut cur)? {
        if metadata_id == MID_VIEWBOX {
            viewbox = Some(read_viewbox(&mut chunk)?);
        }
        else {
            debug!("skipping metadata chunk with id {}", metadata_id);
        }
    }

    Ok(viewbox.unwrap_or(DEFAULT_VIEWBOX))
}
