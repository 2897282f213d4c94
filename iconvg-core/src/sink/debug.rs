// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;

use crate::color::Palette;
use crate::errors::{Error, Result};
use crate::geometry::Rect;
use crate::paint::Paint;
use crate::sink::Sink;

/// A `DebugSink` writes a prefixed, human-readable record of every callback to an output
/// stream before forwarding the call to a wrapped sink.
///
/// The output stream may be absent, in which case nothing is written. The wrapped sink may
/// also be absent, in which case every callback succeeds, except that `end_decode` reports its
/// (possibly present) error argument unchanged.
pub struct DebugSink<'a, W: Write> {
    out: Option<W>,
    message_prefix: &'a str,
    wrapped: Option<&'a mut dyn Sink>,
}

impl<'a, W: Write> DebugSink<'a, W> {
    pub fn new(
        out: Option<W>,
        message_prefix: &'a str,
        wrapped: Option<&'a mut dyn Sink>,
    ) -> Self {
        DebugSink { out, message_prefix, wrapped }
    }

    // Tracing is best effort: a full or closed output stream does not fail the decode.
    fn log(&mut self, args: std::fmt::Arguments<'_>) {
        if let Some(out) = &mut self.out {
            let _ = writeln!(out, "{}{}", self.message_prefix, args);
        }
    }
}

impl<W: Write> Sink for DebugSink<'_, W> {
    fn begin_decode(&mut self, dst_rect: Rect) -> Result<()> {
        self.log(format_args!(
            "begin_decode({{{}, {}, {}, {}}})",
            dst_rect.min_x, dst_rect.min_y, dst_rect.max_x, dst_rect.max_y
        ));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.begin_decode(dst_rect),
            None => Ok(()),
        }
    }

    fn end_decode(&mut self, err: Option<Error>) -> Result<()> {
        match err {
            Some(err) => self.log(format_args!("end_decode(\"{}\")", err)),
            None => self.log(format_args!("end_decode(none)")),
        }
        match &mut self.wrapped {
            Some(wrapped) => wrapped.end_decode(err),
            None => err.map_or(Ok(()), Err),
        }
    }

    fn on_metadata_viewbox(&mut self, viewbox: Rect) -> Result<()> {
        self.log(format_args!(
            "on_metadata_viewbox({{{}, {}, {}, {}}})",
            viewbox.min_x, viewbox.min_y, viewbox.max_x, viewbox.max_y
        ));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.on_metadata_viewbox(viewbox),
            None => Ok(()),
        }
    }

    fn on_metadata_suggested_palette(&mut self, suggested_palette: &Palette) -> Result<()> {
        self.log(format_args!("on_metadata_suggested_palette(...)"));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.on_metadata_suggested_palette(suggested_palette),
            None => Ok(()),
        }
    }

    fn begin_drawing(&mut self) -> Result<()> {
        self.log(format_args!("begin_drawing()"));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.begin_drawing(),
            None => Ok(()),
        }
    }

    fn end_drawing(&mut self, paint: &Paint<'_>) -> Result<()> {
        let rgba = paint.flat_color_as_premul_color().rgba;
        self.log(format_args!(
            "end_drawing(0x{:02X}{:02X}{:02X}{:02X})",
            rgba[0], rgba[1], rgba[2], rgba[3]
        ));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.end_drawing(paint),
            None => Ok(()),
        }
    }

    fn begin_path(&mut self, x0: f32, y0: f32) -> Result<()> {
        self.log(format_args!("begin_path({}, {})", x0, y0));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.begin_path(x0, y0),
            None => Ok(()),
        }
    }

    fn end_path(&mut self) -> Result<()> {
        self.log(format_args!("end_path()"));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.end_path(),
            None => Ok(()),
        }
    }

    fn path_line_to(&mut self, x1: f32, y1: f32) -> Result<()> {
        self.log(format_args!("path_line_to({}, {})", x1, y1));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.path_line_to(x1, y1),
            None => Ok(()),
        }
    }

    fn path_quad_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        self.log(format_args!("path_quad_to({}, {}, {}, {})", x1, y1, x2, y2));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.path_quad_to(x1, y1, x2, y2),
            None => Ok(()),
        }
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
        self.log(format_args!(
            "path_cube_to({}, {}, {}, {}, {}, {})",
            x1, y1, x2, y2, x3, y3
        ));
        match &mut self.wrapped {
            Some(wrapped) => wrapped.path_cube_to(x1, y1, x2, y2, x3, y3),
            None => Ok(()),
        }
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
        self.log(format_args!(
            "path_arc_to({}, {}, {}, {}, {}, {}, {})",
            radius_x, radius_y, x_axis_rotation, large_arc, sweep, final_x, final_y
        ));
        match &mut self.wrapped {
            Some(wrapped) => wrapped
                .path_arc_to(radius_x, radius_y, x_axis_rotation, large_arc, sweep, final_x, final_y),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DebugSink;
    use crate::errors::Error;
    use crate::geometry::Rect;
    use crate::sink::Sink;

    #[test]
    fn verify_log_format() {
        let mut out = Vec::new();
        let mut sink: DebugSink<'_, &mut Vec<u8>> = DebugSink::new(Some(&mut out), "debug: ", None);

        sink.begin_decode(Rect::new(0.0, 0.0, 64.0, 64.0)).unwrap();
        sink.begin_path(-32.0, -32.0).unwrap();
        sink.path_line_to(0.5, -0.5).unwrap();
        sink.end_path().unwrap();
        sink.end_decode(None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "debug: begin_decode({0, 0, 64, 64})\n\
             debug: begin_path(-32, -32)\n\
             debug: path_line_to(0.5, -0.5)\n\
             debug: end_path()\n\
             debug: end_decode(none)\n"
        );
    }

    #[test]
    fn verify_forwarding_to_a_wrapped_sink() {
        use super::super::BrokenSink;

        let mut inner = BrokenSink::with_message("inner says no");
        let mut out = Vec::new();
        let mut sink = DebugSink::new(Some(&mut out), "x: ", Some(&mut inner));

        // The record is written before the wrapped sink is consulted, and the wrapped sink's
        // result is passed through.
        let err = sink.begin_decode(Rect::default()).unwrap_err();
        assert_eq!(err, Error::Other("inner says no"));
        let err = sink.end_decode(Some(err)).unwrap_err();
        assert_eq!(err, Error::Other("inner says no"));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "x: begin_decode({0, 0, 0, 0})\n\
             x: end_decode(\"inner says no\")\n"
        );
    }

    #[test]
    fn verify_unwrapped_end_decode_propagates() {
        let mut sink: DebugSink<'_, std::io::Sink> = DebugSink::new(None, "", None);
        assert_eq!(sink.end_decode(Some(Error::BadNumber)).unwrap_err(), Error::BadNumber);
        assert!(sink.end_decode(None).is_ok());
    }
}
