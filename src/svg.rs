//! SVG path generation for cell outlines and label arcs.
//!
//! Pure string builders over [`CellBounds`] data; the host renderer decides
//! what to do with the `d` attributes. Sweep direction follows the crate's
//! y-inverted angle convention: counter-clockwise in math space renders as
//! sweep flag 0 on screen.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use crate::geometry::{CellBounds, Point2d, polar_to_point, sweep_degrees};

/// Path for a cell: a full circle for the center cell, an annular wedge for
/// a sector cell (or a pie wedge when the inner radius collapses to zero).
#[must_use]
pub fn cell_path(bounds: &CellBounds) -> String {
    match *bounds {
        CellBounds::Circle { center, radius } => circle_path(center, radius),
        CellBounds::Sector { center, inner_radius, outer_radius, start_angle, end_angle, .. } => {
            sector_path(center, inner_radius, outer_radius, start_angle, end_angle)
        }
    }
}

fn circle_path(center: Point2d, radius: f64) -> String {
    // Two half-arcs; a single 360 arc degenerates in SVG.
    let left = Point2d::new(center.x - radius, center.y);
    let right = Point2d::new(center.x + radius, center.y);
    format!(
        "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {} Z",
        left.x, left.y, right.x, right.y, left.x, left.y,
        r = radius,
    )
}

fn sector_path(
    center: Point2d,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let sweep = sweep_degrees(start_angle, end_angle);
    let large_arc = u8::from(sweep > 180.0);
    let end = start_angle + sweep;

    let outer_start = polar_to_point(center, outer_radius, start_angle);
    let outer_end = polar_to_point(center, outer_radius, end);

    if inner_radius <= 0.0 {
        return format!(
            "M {} {} A {r} {r} 0 {large_arc} 0 {} {} L {} {} Z",
            outer_start.x, outer_start.y, outer_end.x, outer_end.y, center.x, center.y,
            r = outer_radius,
        );
    }

    let inner_start = polar_to_point(center, inner_radius, end);
    let inner_end = polar_to_point(center, inner_radius, start_angle);
    format!(
        "M {} {} A {or} {or} 0 {large_arc} 0 {} {} L {} {} A {ir} {ir} 0 {large_arc} 1 {} {} Z",
        outer_start.x, outer_start.y, outer_end.x, outer_end.y,
        inner_start.x, inner_start.y, inner_end.x, inner_end.y,
        or = outer_radius,
        ir = inner_radius,
    )
}

/// Open arc at radius `r` spanning a slice's angular range, for `textPath`
/// labels. `flip` reverses the arc direction so bottom-half labels read
/// left-to-right instead of upside down.
#[must_use]
pub fn text_arc_path(
    center: Point2d,
    r: f64,
    start_angle: f64,
    end_angle: f64,
    flip: bool,
) -> String {
    let sweep = sweep_degrees(start_angle, end_angle);
    let large_arc = u8::from(sweep > 180.0);
    let end = start_angle + sweep;

    let (from, to, sweep_flag) = if flip {
        (polar_to_point(center, r, end), polar_to_point(center, r, start_angle), 1)
    } else {
        (polar_to_point(center, r, start_angle), polar_to_point(center, r, end), 0)
    };

    format!("M {} {} A {r} {r} 0 {large_arc} {sweep_flag} {} {}", from.x, from.y, to.x, to.y)
}
