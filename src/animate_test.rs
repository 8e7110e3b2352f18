#![allow(clippy::float_cmp)]

use super::*;

use crate::editor::{PageStore, ParentId, Shape, ShapeKind};
use uuid::Uuid;

fn store_with_note(x: f64, y: f64, scale: f64) -> (PageStore, ShapeId) {
    let mut store = PageStore::new();
    let id = Uuid::new_v4();
    store.create_shape(Shape {
        id,
        parent: ParentId::Page,
        kind: ShapeKind::Note,
        x,
        y,
        props: serde_json::json!({ "scale": scale }),
    });
    (store, id)
}

fn scale_of(store: &PageStore, id: ShapeId) -> f64 {
    NoteProps::new(&store.shape(id).unwrap().props).scale()
}

// --- Easing helpers ---

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn ease_out_cubic_midpoint() {
    assert_eq!(ease_out_cubic(0.5), 0.875);
}

#[test]
fn ease_out_cubic_decelerates() {
    let first_half = ease_out_cubic(0.5) - ease_out_cubic(0.0);
    let second_half = ease_out_cubic(1.0) - ease_out_cubic(0.5);
    assert!(first_half > second_half);
}

#[test]
fn clamp01_bounds() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(0.3), 0.3);
    assert_eq!(clamp01(1.5), 1.0);
}

#[test]
fn lerp_interpolates() {
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert_eq!(lerp(20.0, 10.0, 0.5), 15.0);
}

// --- Animator ---

#[test]
fn zero_duration_applies_immediately() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    let target = TweenTarget { id, x: 100.0, y: 200.0, scale: 0.5 };

    animator.start(&mut store, &[target], 0.0, ease_out_cubic, 0.0);

    assert!(!animator.is_running());
    let shape = store.shape(id).unwrap();
    assert_eq!(shape.x, 100.0);
    assert_eq!(shape.y, 200.0);
    assert_eq!(scale_of(&store, id), 0.5);
}

#[test]
fn tick_interpolates_with_the_easing_curve() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    let target = TweenTarget { id, x: 100.0, y: 200.0, scale: 0.5 };

    // Linear easing makes midpoints exact.
    animator.start(&mut store, &[target], 100.0, clamp01, 1000.0);
    assert!(animator.is_running());

    assert!(animator.tick(&mut store, 1050.0));
    let shape = store.shape(id).unwrap();
    assert_eq!(shape.x, 50.0);
    assert_eq!(shape.y, 100.0);
    assert_eq!(scale_of(&store, id), 0.75);
}

#[test]
fn tick_finishes_at_the_deadline() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    let target = TweenTarget { id, x: 100.0, y: 200.0, scale: 0.5 };
    animator.start(&mut store, &[target], 100.0, ease_out_cubic, 0.0);

    assert!(!animator.tick(&mut store, 100.0));
    assert!(!animator.is_running());
    let shape = store.shape(id).unwrap();
    assert_eq!(shape.x, 100.0);
    assert_eq!(scale_of(&store, id), 0.5);
}

#[test]
fn late_tick_clamps_past_the_deadline() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    let target = TweenTarget { id, x: 100.0, y: 0.0, scale: 1.0 };
    animator.start(&mut store, &[target], 100.0, ease_out_cubic, 0.0);

    assert!(!animator.tick(&mut store, 5000.0));
    assert_eq!(store.shape(id).unwrap().x, 100.0);
}

#[test]
fn tick_without_a_batch_is_inert() {
    let (mut store, _) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    assert!(!animator.tick(&mut store, 123.0));
}

#[test]
fn new_batch_supersedes_the_old_one() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();

    let first = animator.start(
        &mut store,
        &[TweenTarget { id, x: 100.0, y: 0.0, scale: 1.0 }],
        100.0,
        clamp01,
        0.0,
    );
    let second = animator.start(
        &mut store,
        &[TweenTarget { id, x: -50.0, y: 0.0, scale: 1.0 }],
        100.0,
        clamp01,
        0.0,
    );
    assert!(second > first);

    assert!(!animator.tick(&mut store, 100.0));
    assert_eq!(store.shape(id).unwrap().x, -50.0);
}

#[test]
fn missing_shapes_are_skipped() {
    let (mut store, id) = store_with_note(0.0, 0.0, 1.0);
    let mut animator = Animator::new();
    let ghost = Uuid::new_v4();

    animator.start(
        &mut store,
        &[
            TweenTarget { id: ghost, x: 9.0, y: 9.0, scale: 1.0 },
            TweenTarget { id, x: 100.0, y: 0.0, scale: 1.0 },
        ],
        100.0,
        clamp01,
        0.0,
    );
    assert!(animator.tick(&mut store, 50.0));
    assert_eq!(store.shape(id).unwrap().x, 50.0);
    assert!(store.shape(ghost).is_none());
}

#[test]
fn batch_of_only_missing_shapes_never_starts() {
    let mut store = PageStore::new();
    let mut animator = Animator::new();
    animator.start(
        &mut store,
        &[TweenTarget { id: Uuid::new_v4(), x: 0.0, y: 0.0, scale: 1.0 }],
        100.0,
        ease_out_cubic,
        0.0,
    );
    assert!(!animator.is_running());
}

#[test]
fn interpolation_starts_from_current_state() {
    let (mut store, id) = store_with_note(40.0, 60.0, 0.2);
    let mut animator = Animator::new();
    animator.start(
        &mut store,
        &[TweenTarget { id, x: 140.0, y: 160.0, scale: 0.4 }],
        100.0,
        clamp01,
        0.0,
    );
    animator.tick(&mut store, 50.0);
    let shape = store.shape(id).unwrap();
    assert_eq!(shape.x, 90.0);
    assert_eq!(shape.y, 110.0);
    assert!((scale_of(&store, id) - 0.3).abs() < 1e-12);
}
