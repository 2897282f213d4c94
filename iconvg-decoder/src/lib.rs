// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A streaming, allocation-free decoder for the IconVG compact binary vector graphics format.
//!
//! The decoder validates an IconVG byte stream and translates it into calls on a caller-provided
//! rendering [`Sink`](iconvg_core::sink::Sink). It performs no heap allocation of its own: all
//! decode state lives in a fixed-size [`Decoder`] frame that callers may reuse across decodes.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all IconVG crates. Please see the workspace Cargo.toml
// for their justification.
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

mod decoder;
mod meta;
mod number;

pub use decoder::{decode, DecodeOptions, Decoder};
pub use meta::{decode_viewbox, DEFAULT_VIEWBOX};
pub use number::ReadNumbers;
