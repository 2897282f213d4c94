// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `sink` module defines the rendering contract between the decoder and its backends.
//!
//! A [`Sink`] is conceptually a virtual super-class with e.g. Cairo-backed or Skia-backed
//! sub-classes, expressed as a trait. The decoder drives exactly one `begin_decode` and exactly
//! one `end_decode` per decode, with metadata and per-path drawing callbacks in between. Any
//! callback may return an error, which aborts the decode; the decoder still delivers that error
//! to `end_decode`, whose return value becomes the decode's final result.

use crate::color::Palette;
use crate::errors::{Error, Result};
use crate::geometry::Rect;
use crate::paint::Paint;

mod broken;
mod debug;

pub use broken::BrokenSink;
pub use debug::DebugSink;

/// The rendering contract driven by an IconVG decode.
///
/// All path geometry is expressed in viewbox (graphic) co-ordinates. Elliptical arcs are
/// lowered to cubic Bézier curves before they reach the sink, so a decode never invokes
/// [`Sink::path_arc_to`]; the method exists for callers that drive a sink as a path builder
/// directly, and such sinks may lower arcs themselves with
/// [`arc::path_arc_to`](crate::arc::path_arc_to).
pub trait Sink {
    /// Called exactly once, before anything else. `dst_rect` is the destination rectangle the
    /// caller intends to render into; it may be empty.
    fn begin_decode(&mut self, dst_rect: Rect) -> Result<()>;

    /// Called exactly once, after everything else, with the first error the decode encountered
    /// or `None` on success. The return value becomes the decode's final result.
    fn end_decode(&mut self, err: Option<Error>) -> Result<()>;

    /// Reports the graphic's viewbox. Called exactly once per decode, before any drawing, with
    /// the default viewbox if the source does not declare one.
    fn on_metadata_viewbox(&mut self, viewbox: Rect) -> Result<()>;

    /// Reports the graphic's suggested palette. Called at most once per decode, after
    /// `on_metadata_viewbox` and before any drawing.
    fn on_metadata_suggested_palette(&mut self, _suggested_palette: &Palette) -> Result<()> {
        Ok(())
    }

    /// Scopes one styled path: called before the path's first `begin_path`.
    fn begin_drawing(&mut self) -> Result<()>;

    /// Scopes one styled path: called after the path's final `end_path`, with the paint to
    /// apply to the accumulated geometry.
    fn end_drawing(&mut self, paint: &Paint<'_>) -> Result<()>;

    /// Starts a sub-path at `(x0, y0)`.
    fn begin_path(&mut self, x0: f32, y0: f32) -> Result<()>;

    /// Closes the current sub-path.
    fn end_path(&mut self) -> Result<()>;

    fn path_line_to(&mut self, x1: f32, y1: f32) -> Result<()>;

    fn path_quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()>;

    fn path_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32)
        -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn path_arc_to(
        &mut self,
        radius_x: f32,
        radius_y: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        final_x: f32,
        final_y: f32,
    ) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn begin_decode(&mut self, dst_rect: Rect) -> Result<()> {
        (**self).begin_decode(dst_rect)
    }

    fn end_decode(&mut self, err: Option<Error>) -> Result<()> {
        (**self).end_decode(err)
    }

    fn on_metadata_viewbox(&mut self, viewbox: Rect) -> Result<()> {
        (**self).on_metadata_viewbox(viewbox)
    }

    fn on_metadata_suggested_palette(&mut self, suggested_palette: &Palette) -> Result<()> {
        (**self).on_metadata_suggested_palette(suggested_palette)
    }

    fn begin_drawing(&mut self) -> Result<()> {
        (**self).begin_drawing()
    }

    fn end_drawing(&mut self, paint: &Paint<'_>) -> Result<()> {
        (**self).end_drawing(paint)
    }

    fn begin_path(&mut self, x0: f32, y0: f32) -> Result<()> {
        (**self).begin_path(x0, y0)
    }

    fn end_path(&mut self) -> Result<()> {
        (**self).end_path()
    }

    fn path_line_to(&mut self, x1: f32, y1: f32) -> Result<()> {
        (**self).path_line_to(x1, y1)
    }

    fn path_quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        (**self).path_quad_to(x1, y1, x2, y2)
    }

    fn path_cube_to(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
    ) -> Result<()> {
        (**self).path_cube_to(x1, y1, x2, y2, x3, y3)
    }

    fn path_arc_to(
        &mut self,
        radius_x: f32,
        radius_y: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        final_x: f32,
        final_y: f32,
    ) -> Result<()> {
        (**self).path_arc_to(radius_x, radius_y, x_axis_rotation, large_arc, sweep, final_x, final_y)
    }
}
