#![allow(clippy::float_cmp)]

use super::*;

use crate::geometry::{Point2d, cell_at_point, is_angle_in_range, polar_to_point, sweep_degrees};

// --- Structure ---

#[test]
fn definition_is_valid() {
    assert_eq!(emotions_map().validate(), Ok(()));
}

#[test]
fn has_seven_cells_in_declaration_order() {
    let map = emotions_map();
    assert_eq!(
        map.all_cell_ids(),
        vec![
            "evidence",
            "past-events",
            "past-beliefs",
            "future-events",
            "future-beliefs",
            "present-events",
            "present-beliefs",
        ]
    );
}

#[test]
fn center_is_evidence() {
    let map = emotions_map();
    assert_eq!(map.center.id, "evidence");
    assert_eq!(map.center.radius_ratio, CENTER_RATIO);
}

#[test]
fn slices_sweep_120_degrees_each() {
    let map = emotions_map();
    for slice in &map.slices {
        assert_eq!(sweep_degrees(slice.start_angle, slice.end_angle), 120.0, "{}", slice.id);
    }
}

#[test]
fn rings_split_at_expected_ratios() {
    let map = emotions_map();
    for slice in &map.slices {
        assert_eq!(slice.cells[0].outer_ratio, 1.0);
        assert_eq!(slice.cells[0].inner_ratio, RING_SPLIT_RATIO);
        assert_eq!(slice.cells[1].outer_ratio, RING_SPLIT_RATIO);
        assert_eq!(slice.cells[1].inner_ratio, CENTER_RATIO);
    }
}

#[test]
fn every_cell_has_prompt_text() {
    let map = emotions_map();
    assert!(!map.center.question.is_empty());
    assert!(!map.center.guidance.is_empty());
    assert!(!map.center.examples.is_empty());
    for slice in &map.slices {
        for cell in &slice.cells {
            assert!(!cell.question.is_empty(), "{}", cell.id);
            assert!(!cell.guidance.is_empty(), "{}", cell.id);
            assert!(!cell.examples.is_empty(), "{}", cell.id);
        }
    }
}

// --- Angular assignment ---

#[test]
fn angle_ranges_match_time_orientation() {
    let map = emotions_map();
    let find = |id: &str| map.slices.iter().find(|s| s.id == id).unwrap();
    assert!(is_angle_in_range(200.0, find("past").start_angle, find("past").end_angle));
    assert!(is_angle_in_range(90.0, find("future").start_angle, find("future").end_angle));
    assert!(is_angle_in_range(330.0, find("present").start_angle, find("present").end_angle));
    assert!(is_angle_in_range(0.0, find("present").start_angle, find("present").end_angle));
}

#[test]
fn shared_boundary_angles_belong_to_the_starting_slice() {
    let map = emotions_map();
    let find = |id: &str| map.slices.iter().find(|s| s.id == id).unwrap();
    // 270 ends past and starts present; half-open ranges give it to present.
    assert!(!is_angle_in_range(270.0, find("past").start_angle, find("past").end_angle));
    assert!(is_angle_in_range(270.0, find("present").start_angle, find("present").end_angle));
    assert!(is_angle_in_range(150.0, find("past").start_angle, find("past").end_angle));
    assert!(is_angle_in_range(30.0, find("future").start_angle, find("future").end_angle));
}

// --- Partition coverage ---

#[test]
fn every_interior_point_resolves_to_a_cell() {
    let map = emotions_map();
    let center = Point2d::new(0.0, 0.0);
    let outer_radius = 450.0;

    for angle in 0..360 {
        for frac in [0.01, 0.15, 0.29, 0.31, 0.5, 0.64, 0.66, 0.8, 0.999] {
            let p = polar_to_point(center, frac * outer_radius, f64::from(angle));
            assert!(
                cell_at_point(&map, center, outer_radius, p).is_some(),
                "gap at angle {angle} ratio {frac}"
            );
        }
    }
}
