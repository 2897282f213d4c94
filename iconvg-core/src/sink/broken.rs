// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::color::Palette;
use crate::errors::{Error, Result};
use crate::geometry::Rect;
use crate::paint::Paint;
use crate::sink::Sink;

/// A `BrokenSink` fails every callback with a preset error.
///
/// The one exception is `end_decode`, which passes an already-present error through unchanged,
/// so that the original cause of a failed decode is not masked.
pub struct BrokenSink {
    err: Error,
}

impl BrokenSink {
    pub fn new(err: Error) -> Self {
        BrokenSink { err }
    }

    /// Instantiates a `BrokenSink` whose preset error wraps the given message.
    pub fn with_message(err_msg: &'static str) -> Self {
        BrokenSink { err: Error::Other(err_msg) }
    }
}

impl Sink for BrokenSink {
    fn begin_decode(&mut self, _dst_rect: Rect) -> Result<()> {
        Err(self.err)
    }

    fn end_decode(&mut self, err: Option<Error>) -> Result<()> {
        Err(err.unwrap_or(self.err))
    }

    fn on_metadata_viewbox(&mut self, _viewbox: Rect) -> Result<()> {
        Err(self.err)
    }

    fn on_metadata_suggested_palette(&mut self, _suggested_palette: &Palette) -> Result<()> {
        Err(self.err)
    }

    fn begin_drawing(&mut self) -> Result<()> {
        Err(self.err)
    }

    fn end_drawing(&mut self, _paint: &Paint<'_>) -> Result<()> {
        Err(self.err)
    }

    fn begin_path(&mut self, _x0: f32, _y0: f32) -> Result<()> {
        Err(self.err)
    }

    fn end_path(&mut self) -> Result<()> {
        Err(self.err)
    }

    fn path_line_to(&mut self, _x1: f32, _y1: f32) -> Result<()> {
        Err(self.err)
    }

    fn path_quad_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) -> Result<()> {
        Err(self.err)
    }

    fn path_cube_to(
        &mut self,
        _x1: f32,
        _y1: f32,
        _x2: f32,
        _y2: f32,
        _x3: f32,
        _y3: f32,
    ) -> Result<()> {
        Err(self.err)
    }

    fn path_arc_to(
        &mut self,
        _radius_x: f32,
        _radius_y: f32,
        _x_axis_rotation: f32,
        _large_arc: bool,
        _sweep: bool,
        _final_x: f32,
        _final_y: f32,
    ) -> Result<()> {
        Err(self.err)
    }
}
