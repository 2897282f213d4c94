// IconVG
// Copyright (c) 2025 The Project IconVG Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `arc` module approximates elliptical arcs with cubic Bézier curves.

use crate::errors::Result;
use crate::sink::Sink;

const PI: f64 = 3.1415926535897932384626433832795028841972; // π = τ/2
const TAU: f64 = 6.2831853071795864769252867665590057683943; // τ = 2*π

/// Returns the angle between two vectors u and v.
fn angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let u_norm = ((ux * ux) + (uy * uy)).sqrt();
    let v_norm = ((vx * vx) + (vy * vy)).sqrt();
    let norm = u_norm * v_norm;
    let cosine = (ux * vx + uy * vy) / norm;
    let ret = if cosine <= -1.0 {
        PI
    }
    else if cosine >= 1.0 {
        0.0
    }
    else {
        cosine.acos()
    };
    if (ux * vy) < (uy * vx) {
        -ret
    }
    else {
        ret
    }
}

#[allow(clippy::too_many_arguments)]
fn arc_segment_to<S: Sink + ?Sized>(
    sink: &mut S,
    cx: f64,
    cy: f64,
    theta1: f64,
    theta2: f64,
    rx: f64,
    ry: f64,
    cos_phi: f64,
    sin_phi: f64,
) -> Result<()> {
    let half_delta_theta = (theta2 - theta1) * 0.5;
    let q = (half_delta_theta * 0.5).sin();
    let t = (8.0 * q * q) / (3.0 * half_delta_theta.sin());
    let (sin1, cos1) = theta1.sin_cos();
    let (sin2, cos2) = theta2.sin_cos();

    let ix1 = rx * (cos1 - (t * sin1));
    let iy1 = ry * (sin1 + (t * cos1));
    let ix2 = rx * (cos2 + (t * sin2));
    let iy2 = ry * (sin2 - (t * cos2));
    let ix3 = rx * cos2;
    let iy3 = ry * sin2;

    sink.path_cube_to(
        (cx + (cos_phi * ix1) - (sin_phi * iy1)) as f32,
        (cy + (sin_phi * ix1) + (cos_phi * iy1)) as f32,
        (cx + (cos_phi * ix2) - (sin_phi * iy2)) as f32,
        (cy + (sin_phi * ix2) + (cos_phi * iy2)) as f32,
        (cx + (cos_phi * ix3) - (sin_phi * iy3)) as f32,
        (cy + (sin_phi * ix3) + (cos_phi * iy3)) as f32,
    )
}

/// Approximates an SVG-style endpoint-parameterized elliptical arc with one or more cubic
/// Bézier curves, emitted through the sink's `path_cube_to`.
///
/// `(initial_x, initial_y)` is the arc's starting point and `x_axis_rotation` is expressed as
/// a fraction of a full turn, in `0 ..= 1`. If either radius is non-positive or NaN, the arc
/// degenerates to a single straight `path_line_to` towards the end point. All co-ordinates are
/// in viewbox (graphic) space.
#[allow(clippy::too_many_arguments)]
pub fn path_arc_to<S: Sink + ?Sized>(
    sink: &mut S,
    initial_x: f32,
    initial_y: f32,
    radius_x: f32,
    radius_y: f32,
    x_axis_rotation: f32,
    large_arc: bool,
    sweep: bool,
    final_x: f32,
    final_y: f32,
) -> Result<()> {
    // "Conversion from endpoint to center parameterization" per
    // https://www.w3.org/TR/SVG/implnote.html#ArcConversionEndpointToCenter
    //
    // There seems to be a bug in the spec's "implementation notes". Actual implementations,
    // such as librsvg and Batik, do something slightly different (marked with a †).

    // (†) The abs isn't part of the spec. Neither is checking that rx and ry are non-zero (and
    // non-NaN).
    let mut rx = f64::from(radius_x).abs();
    let mut ry = f64::from(radius_y).abs();
    if !(rx > 0.0) || !(ry > 0.0) {
        return sink.path_line_to(final_x, final_y);
    }

    let x1 = f64::from(initial_x);
    let y1 = f64::from(initial_y);
    let x2 = f64::from(final_x);
    let y2 = f64::from(final_y);
    let phi = TAU * f64::from(x_axis_rotation);

    // Step 1: Compute (x1′, y1′).

    let half_dx = (x1 - x2) / 2.0;
    let half_dy = (y1 - y2) / 2.0;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let x1_prime = (cos_phi * half_dx) + (sin_phi * half_dy);
    let y1_prime = -(sin_phi * half_dx) + (cos_phi * half_dy);

    // Step 2: Compute (cx′, cy′).

    let mut rx_sq = rx * rx;
    let mut ry_sq = ry * ry;
    let x1_prime_sq = x1_prime * x1_prime;
    let y1_prime_sq = y1_prime * y1_prime;

    // (†) Check that the radii are large enough.
    let radii_check = (x1_prime_sq / rx_sq) + (y1_prime_sq / ry_sq);
    if radii_check > 1.0 {
        let s = radii_check.sqrt();
        rx *= s;
        ry *= s;
        rx_sq = rx * rx;
        ry_sq = ry * ry;
    }

    let denom = (rx_sq * y1_prime_sq) + (ry_sq * x1_prime_sq);
    let a = ((rx_sq * ry_sq) / denom) - 1.0;
    let mut step2 = if a > 0.0 { a.sqrt() } else { 0.0 };
    if large_arc == sweep {
        step2 = -step2;
    }
    let cx_prime = (step2 * rx * y1_prime) / ry;
    let cy_prime = -(step2 * ry * x1_prime) / rx;

    // Step 3: Compute (cx, cy) from (cx′, cy′).

    let cx = (cos_phi * cx_prime) - (sin_phi * cy_prime) + ((x1 + x2) / 2.0);
    let cy = (sin_phi * cx_prime) + (cos_phi * cy_prime) + ((y1 + y2) / 2.0);

    // Step 4: Compute θ1 and Δθ.

    let ax = (x1_prime - cx_prime) / rx;
    let ay = (y1_prime - cy_prime) / ry;
    let bx = (-x1_prime - cx_prime) / rx;
    let by = (-y1_prime - cy_prime) / ry;
    let theta1 = angle(1.0, 0.0, ax, ay);
    let mut delta_theta = angle(ax, ay, bx, by);
    if sweep {
        if delta_theta < 0.0 {
            delta_theta += TAU;
        }
    }
    else if delta_theta > 0.0 {
        delta_theta -= TAU;
    }

    // This ends the endpoint-to-center conversion. What follows is specific to this
    // implementation: the arc is split into equal segments, each covering less than a quarter
    // turn, and each approximated by one cubic Bézier curve.
    let n = (delta_theta.abs() / ((PI / 2.0) + 0.001)).ceil() as i32;
    let inv_n = 1.0 / f64::from(n);
    for i in 0..n {
        arc_segment_to(
            sink,
            cx,
            cy,
            theta1 + (delta_theta * f64::from(i) * inv_n),
            theta1 + (delta_theta * f64::from(i + 1) * inv_n),
            rx,
            ry,
            cos_phi,
            sin_phi,
        )?;
    }
    Ok(())
}
