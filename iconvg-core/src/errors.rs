// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported while decoding IconVG data.
///
/// The `bad_etc` variants indicate a file format error: the source bytes are not IconVG. The
/// other variants (`invalid_etc`, `null_etc`, `unsupported_etc`) are typically programming
/// errors instead of file format errors. [`Error::is_file_format_error`] distinguishes the two.
///
/// Each variant displays as a stable, human-readable but non-localized message. Callers that
/// need to classify an error should match on the variant, not on the message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A color operand was malformed or truncated.
    BadColor,
    /// A coordinate number was malformed or truncated.
    BadCoordinate,
    /// An opcode byte is not a valid drawing-mode opcode.
    BadDrawingOpcode,
    /// The source does not start with the IconVG magic identifier.
    BadMagicIdentifier,
    /// The metadata framing (chunk count, chunk length, or metadata ID) was malformed.
    BadMetadata,
    /// Metadata IDs were not strictly increasing.
    BadMetadataIdOrder,
    /// A suggested palette metadata chunk was malformed.
    BadMetadataSuggestedPalette,
    /// A viewbox metadata chunk was malformed.
    BadMetadataViewbox,
    /// A real, natural or zero-to-one number was malformed or truncated.
    BadNumber,
    /// The source ended inside drawing mode, before the path was closed.
    BadPathUnfinished,
    /// An opcode byte is not a valid styling-mode opcode.
    BadStylingOpcode,

    /// A required argument was absent.
    NullArgument,
    /// A rendering sink was absent.
    NullVtable,
    /// A rendering sink does not implement the expected protocol.
    UnsupportedVtable,
    /// A rendering backend was asked for but not compiled in.
    InvalidBackendNotEnabled,
    /// A constructor was called with an unusable argument.
    InvalidConstructorArgument,
    /// A paint was queried in a way that does not match its type.
    InvalidPaintType,

    /// The system could not allocate memory.
    OutOfMemory,

    /// An internal invariant was broken. Reaching this is a bug in this library.
    InternalErrorUnreachable,

    /// An error defined by a rendering sink rather than by this library.
    Other(&'static str),
}

impl Error {
    /// Returns true if the error indicates that the source bytes are not IconVG, as opposed to
    /// a programming error or a sink-defined error.
    pub fn is_file_format_error(&self) -> bool {
        matches!(
            self,
            Error::BadColor
                | Error::BadCoordinate
                | Error::BadDrawingOpcode
                | Error::BadMagicIdentifier
                | Error::BadMetadata
                | Error::BadMetadataIdOrder
                | Error::BadMetadataSuggestedPalette
                | Error::BadMetadataViewbox
                | Error::BadNumber
                | Error::BadPathUnfinished
                | Error::BadStylingOpcode
        )
    }

    fn as_str(&self) -> &'static str {
        match *self {
            Error::BadColor => "iconvg: bad color",
            Error::BadCoordinate => "iconvg: bad coordinate",
            Error::BadDrawingOpcode => "iconvg: bad drawing opcode",
            Error::BadMagicIdentifier => "iconvg: bad magic identifier",
            Error::BadMetadata => "iconvg: bad metadata",
            Error::BadMetadataIdOrder => "iconvg: bad metadata ID order",
            Error::BadMetadataSuggestedPalette => "iconvg: bad metadata (suggested palette)",
            Error::BadMetadataViewbox => "iconvg: bad metadata (viewbox)",
            Error::BadNumber => "iconvg: bad number",
            Error::BadPathUnfinished => "iconvg: bad path (unfinished)",
            Error::BadStylingOpcode => "iconvg: bad styling opcode",
            Error::NullArgument => "iconvg: null argument",
            Error::NullVtable => "iconvg: null vtable",
            Error::UnsupportedVtable => "iconvg: unsupported vtable",
            Error::InvalidBackendNotEnabled => "iconvg: invalid backend (not enabled)",
            Error::InvalidConstructorArgument => "iconvg: invalid constructor argument",
            Error::InvalidPaintType => "iconvg: invalid paint type",
            Error::OutOfMemory => "iconvg: system failure: out of memory",
            Error::InternalErrorUnreachable => "iconvg: internal error: unreachable",
            Error::Other(msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
