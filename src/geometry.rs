//! Geometry engine: pure functions from a map definition plus a concrete
//! pixel center and outer radius to cell lookups, centers, and bounds.
//!
//! Angle convention: degrees, 0° along +x, increasing counter-clockwise in
//! math space. The canvas y axis grows downward, so every conversion to a
//! screen point inverts the vertical term (`y = cy - r * sin(theta)`).
//! Angle ranges where `start >= end` wrap through 0°.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{LABEL_PADDING_RATIO, MIN_LABEL_PADDING};
use crate::map::MapDefinition;

/// A point in the diagram's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn dist_sq(self, other: Point2d) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Concrete bounds of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellBounds {
    /// The center region.
    Circle { center: Point2d, radius: f64 },
    /// An annular wedge belonging to a slice.
    Sector {
        /// Mandala center, the origin of the polar coordinate system.
        center: Point2d,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        /// Wrap-corrected angular midpoint, normalized to [0, 360).
        mid_angle: f64,
    },
}

/// Normalize an angle in degrees to [0, 360).
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Whether `angle` lies in `[start, end)`, wrap-aware.
#[must_use]
pub fn is_angle_in_range(angle: f64, start: f64, end: f64) -> bool {
    let a = normalize_angle(angle);
    let s = normalize_angle(start);
    let e = normalize_angle(end);
    if s < e { a >= s && a < e } else { a >= s || a < e }
}

/// Angular sweep from `start` to `end` in degrees, wrap-corrected to (0, 360].
#[must_use]
pub fn sweep_degrees(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep <= 0.0 { sweep + 360.0 } else { sweep }
}

/// Convert polar coordinates (degrees) at `center` to a screen point.
#[must_use]
pub fn polar_to_point(center: Point2d, radius: f64, angle_deg: f64) -> Point2d {
    let rad = angle_deg.to_radians();
    Point2d { x: center.x + radius * rad.cos(), y: center.y - radius * rad.sin() }
}

/// Find which cell (if any) contains `point`.
///
/// Returns `None` for points outside the outer radius, and for angular or
/// radial gaps. Gaps cannot occur for a definition satisfying the partition
/// invariant, but are answered as "no hit" rather than a panic. A point on a
/// shared ring edge resolves to the outer cell; a point exactly on a slice
/// boundary resolves to the slice whose start it equals.
#[must_use]
pub fn cell_at_point<'a>(
    map: &'a MapDefinition,
    center: Point2d,
    outer_radius: f64,
    point: Point2d,
) -> Option<&'a str> {
    let dx = point.x - center.x;
    let dy = center.y - point.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > outer_radius {
        return None;
    }
    let ratio = distance / outer_radius;

    if ratio <= map.center.radius_ratio {
        return Some(&map.center.id);
    }

    let angle = normalize_angle(dy.atan2(dx).to_degrees());
    for slice in &map.slices {
        if is_angle_in_range(angle, slice.start_angle, slice.end_angle) {
            // Cells are declared outer-to-inner; inclusive bounds mean a
            // shared edge goes to the first (outer) match.
            return slice
                .cells
                .iter()
                .find(|c| ratio >= c.inner_ratio && ratio <= c.outer_ratio)
                .map(|c| c.id.as_str());
        }
    }

    None
}

/// Representative center point of a cell: the mandala center for the center
/// cell, otherwise the mid-ratio radius at the slice's angular midpoint.
#[must_use]
pub fn cell_center(
    map: &MapDefinition,
    center: Point2d,
    outer_radius: f64,
    cell_id: &str,
) -> Option<Point2d> {
    if cell_id == map.center.id {
        return Some(center);
    }

    let (slice, cell) = map.find_cell(cell_id)?;
    let mid_radius = (cell.inner_ratio + cell.outer_ratio) / 2.0 * outer_radius;
    let mid_angle = slice.start_angle + sweep_degrees(slice.start_angle, slice.end_angle) / 2.0;
    Some(polar_to_point(center, mid_radius, mid_angle))
}

/// Concrete bounds of a cell, or `None` for an unknown id.
#[must_use]
pub fn cell_bounds(
    map: &MapDefinition,
    center: Point2d,
    outer_radius: f64,
    cell_id: &str,
) -> Option<CellBounds> {
    if cell_id == map.center.id {
        return Some(CellBounds::Circle {
            center,
            radius: map.center.radius_ratio * outer_radius,
        });
    }

    let (slice, cell) = map.find_cell(cell_id)?;
    let sweep = sweep_degrees(slice.start_angle, slice.end_angle);
    Some(CellBounds::Sector {
        center,
        inner_radius: cell.inner_ratio * outer_radius,
        outer_radius: cell.outer_ratio * outer_radius,
        start_angle: slice.start_angle,
        end_angle: slice.end_angle,
        mid_angle: normalize_angle(slice.start_angle + sweep / 2.0),
    })
}

/// Whether `point` lands in the cell named `cell_id`.
#[must_use]
pub fn is_point_in_cell(
    map: &MapDefinition,
    center: Point2d,
    outer_radius: f64,
    cell_id: &str,
    point: Point2d,
) -> bool {
    cell_at_point(map, center, outer_radius, point) == Some(cell_id)
}

/// Outer radius of a diagram fitted into a `w` x `h` bounding box, reserving
/// a ring of space outside the diagram for slice labels.
#[must_use]
pub fn compute_outer_radius(w: f64, h: f64) -> f64 {
    let size = w.min(h);
    let label_padding = MIN_LABEL_PADDING.max(size * LABEL_PADDING_RATIO);
    (size - label_padding * 2.0) / 2.0
}
