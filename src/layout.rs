//! Cell content layout engine: packs `n` circular content items into a cell
//! without overlap.
//!
//! Center (circle) cells pack on a square-ish grid inscribed in the circle.
//! Sector cells try 1 to 3 concentric bands and keep whichever band count
//! maximizes the minimum item diameter. Item sizing inside a band uses the
//! chord distance between adjacent slot centers, not the arc length; two
//! circles at the same radius touch along the chord.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{EDGE_PAD, ITEM_GAP, MAX_BANDS, SINGLE_ITEM_FILL};
use crate::geometry::{CellBounds, Point2d, sweep_degrees};

/// One content item's computed placement slot within a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    pub center: Point2d,
    pub diameter: f64,
}

/// Compute non-overlapping slots for `item_count` items inside `bounds`.
///
/// Deterministic and pure. Returns exactly `item_count` items, or an empty
/// vector when `item_count` is zero or the cell is too small to hold
/// anything after padding.
#[must_use]
pub fn compute_cell_content_layout(bounds: &CellBounds, item_count: usize) -> Vec<LayoutItem> {
    if item_count == 0 {
        return Vec::new();
    }

    match *bounds {
        CellBounds::Circle { center, radius } => layout_circle_cell(center, radius, item_count),
        CellBounds::Sector { .. } => layout_sector_cell(bounds, item_count),
    }
}

fn layout_circle_cell(center: Point2d, radius: f64, item_count: usize) -> Vec<LayoutItem> {
    let usable_radius = radius - EDGE_PAD;
    if usable_radius <= 0.0 {
        return Vec::new();
    }

    if item_count == 1 {
        return vec![LayoutItem { center, diameter: usable_radius * 2.0 * SINGLE_ITEM_FILL }];
    }

    // Grid inscribed in the circle: the grid square's half-diagonal must not
    // exceed the usable radius.
    let inscribed_half = usable_radius / std::f64::consts::SQRT_2;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cols = (item_count as f64).sqrt().ceil() as usize;
    let rows = item_count.div_ceil(cols);

    #[allow(clippy::cast_precision_loss)]
    let (cols_f, rows_f) = (cols as f64, rows as f64);
    let cell_w = (inscribed_half * 2.0 - ITEM_GAP * (cols_f - 1.0)) / cols_f;
    let cell_h = (inscribed_half * 2.0 - ITEM_GAP * (rows_f - 1.0)) / rows_f;
    let diameter = cell_w.min(cell_h).max(1.0);

    let grid_w = cols_f * diameter + (cols_f - 1.0) * ITEM_GAP;
    let grid_h = rows_f * diameter + (rows_f - 1.0) * ITEM_GAP;
    let start_x = center.x - grid_w / 2.0;
    let start_y = center.y - grid_h / 2.0;

    (0..item_count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (col, row) = ((i % cols) as f64, (i / cols) as f64);
            LayoutItem {
                center: Point2d {
                    x: start_x + col * (diameter + ITEM_GAP) + diameter / 2.0,
                    y: start_y + row * (diameter + ITEM_GAP) + diameter / 2.0,
                },
                diameter,
            }
        })
        .collect()
}

fn layout_sector_cell(bounds: &CellBounds, item_count: usize) -> Vec<LayoutItem> {
    let CellBounds::Sector { start_angle, end_angle, .. } = *bounds else {
        return Vec::new();
    };
    let sweep_rad = sweep_degrees(start_angle, end_angle).to_radians();

    let max_bands = MAX_BANDS.min(item_count);
    let mut best_items = Vec::new();
    let mut best_min_diameter = 0.0;

    for band_count in 1..=max_bands {
        let (items, min_diameter) = try_band_layout(bounds, item_count, band_count, sweep_rad);
        if min_diameter > best_min_diameter {
            best_min_diameter = min_diameter;
            best_items = items;
        }
    }

    best_items
}

/// Lay `item_count` items into `band_count` concentric bands. Returns the
/// items plus the smallest diameter achieved, 0.0 when the configuration is
/// geometrically infeasible.
fn try_band_layout(
    bounds: &CellBounds,
    item_count: usize,
    band_count: usize,
    sweep_rad: f64,
) -> (Vec<LayoutItem>, f64) {
    let CellBounds::Sector { center, inner_radius, outer_radius, start_angle, .. } = *bounds else {
        return (Vec::new(), 0.0);
    };
    let radial_depth = outer_radius - inner_radius;

    #[allow(clippy::cast_precision_loss)]
    let bands_f = band_count as f64;
    let available_radial = radial_depth - 2.0 * EDGE_PAD - (bands_f - 1.0).max(0.0) * ITEM_GAP;
    if available_radial <= 0.0 {
        return (Vec::new(), 0.0);
    }
    let band_height = available_radial / bands_f;

    let items_per_band = distribute_items_across_bands(item_count, band_count);

    let mut min_diameter = f64::INFINITY;
    let mut items = Vec::with_capacity(item_count);

    for (b, &n) in items_per_band.iter().enumerate() {
        if n == 0 {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let band_center_r =
            inner_radius + EDGE_PAD + band_height / 2.0 + b as f64 * (band_height + ITEM_GAP);

        // A fixed linear edge inset, converted to an angular inset at this
        // band's radius.
        let edge_angular_pad = EDGE_PAD / band_center_r;
        let effective_sweep = sweep_rad - 2.0 * edge_angular_pad;
        if effective_sweep <= 0.0 {
            return (Vec::new(), 0.0);
        }

        #[allow(clippy::cast_precision_loss)]
        let slot_angle = effective_sweep / n as f64;

        let angular_limit = if n > 1 {
            2.0 * band_center_r * (slot_angle / 2.0).sin() - ITEM_GAP
        } else {
            band_center_r * effective_sweep
        };

        let diameter = band_height.min(angular_limit).max(1.0);
        min_diameter = min_diameter.min(diameter);

        let first_slot_start = start_angle.to_radians() + edge_angular_pad;
        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let angle = first_slot_start + (i as f64 + 0.5) * slot_angle;
            items.push(LayoutItem {
                center: Point2d {
                    x: center.x + band_center_r * angle.cos(),
                    y: center.y - band_center_r * angle.sin(),
                },
                diameter,
            });
        }
    }

    (items, min_diameter)
}

/// Split `item_count` across `band_count` bands as evenly as possible, with
/// the remainder going to the later-indexed (outer) bands.
fn distribute_items_across_bands(item_count: usize, band_count: usize) -> Vec<usize> {
    let base = item_count / band_count;
    let remainder = item_count % band_count;
    (0..band_count)
        .map(|i| base + usize::from(i >= band_count - remainder))
        .collect()
}
