use super::*;

fn sector(inner: f64, outer: f64, start: f64, end: f64) -> CellBounds {
    CellBounds::Sector {
        center: Point2d::new(500.0, 500.0),
        inner_radius: inner,
        outer_radius: outer,
        start_angle: start,
        end_angle: end,
        mid_angle: 0.0,
    }
}

// --- cell_path ---

#[test]
fn circle_path_uses_two_half_arcs() {
    let bounds = CellBounds::Circle { center: Point2d::new(500.0, 500.0), radius: 135.0 };
    let d = cell_path(&bounds);
    assert!(d.starts_with("M 365 500"), "{d}");
    assert_eq!(d.matches("A 135 135").count(), 2);
    assert!(d.ends_with('Z'), "{d}");
}

#[test]
fn annular_sector_path_has_both_arcs() {
    let d = cell_path(&sector(292.5, 450.0, 150.0, 270.0));
    assert!(d.starts_with("M "), "{d}");
    assert!(d.contains("A 450 450"), "{d}");
    assert!(d.contains("A 292.5 292.5"), "{d}");
    assert!(d.contains("L "), "{d}");
    assert!(d.ends_with('Z'), "{d}");
}

#[test]
fn sector_path_starts_on_the_outer_arc_at_the_start_angle() {
    let d = cell_path(&sector(292.5, 450.0, 150.0, 270.0));
    let p = polar_to_point(Point2d::new(500.0, 500.0), 450.0, 150.0);
    assert!(d.starts_with(&format!("M {} {}", p.x, p.y)), "{d}");
}

#[test]
fn narrow_sweep_uses_small_arc_flag() {
    let d = cell_path(&sector(292.5, 450.0, 150.0, 270.0));
    assert!(d.contains("A 450 450 0 0 0"), "{d}");
}

#[test]
fn wide_sweep_uses_large_arc_flag() {
    let d = cell_path(&sector(292.5, 450.0, 0.0, 240.0));
    assert!(d.contains("A 450 450 0 1 0"), "{d}");
}

#[test]
fn wrapping_sweep_is_measured_forward() {
    // 270 -> 30 is a 120-degree sweep, not 240.
    let d = cell_path(&sector(292.5, 450.0, 270.0, 30.0));
    assert!(d.contains("A 450 450 0 0 0"), "{d}");
}

#[test]
fn zero_inner_radius_degenerates_to_a_pie_wedge() {
    let d = cell_path(&sector(0.0, 450.0, 0.0, 90.0));
    assert_eq!(d.matches('A').count(), 1, "{d}");
    assert!(d.contains("L 500 500"), "{d}");
    assert!(d.ends_with('Z'), "{d}");
}

// --- text_arc_path ---

#[test]
fn text_arc_is_open() {
    let d = text_arc_path(Point2d::new(500.0, 500.0), 470.0, 30.0, 150.0, false);
    assert!(d.starts_with("M "), "{d}");
    assert!(!d.contains('Z'), "{d}");
    assert_eq!(d.matches('A').count(), 1);
}

#[test]
fn text_arc_runs_from_start_to_end() {
    let center = Point2d::new(500.0, 500.0);
    let d = text_arc_path(center, 470.0, 30.0, 150.0, false);
    let from = polar_to_point(center, 470.0, 30.0);
    assert!(d.starts_with(&format!("M {} {}", from.x, from.y)), "{d}");
    assert!(d.contains(" 0 "), "{d}");
}

#[test]
fn flipped_text_arc_reverses_direction() {
    let center = Point2d::new(500.0, 500.0);
    let d = text_arc_path(center, 470.0, 30.0, 150.0, true);
    let from = polar_to_point(center, 470.0, 150.0);
    assert!(d.starts_with(&format!("M {} {}", from.x, from.y)), "{d}");
    // Reversed arcs flip the sweep flag so the curve stays on the same side.
    assert!(d.ends_with(&{
        let to = polar_to_point(center, 470.0, 30.0);
        format!("{} {}", to.x, to.y)
    }), "{d}");
}

#[test]
fn long_text_arc_sets_the_large_arc_flag() {
    let d = text_arc_path(Point2d::new(0.0, 0.0), 100.0, 0.0, 240.0, false);
    assert!(d.contains("A 100 100 0 1 0"), "{d}");
}
