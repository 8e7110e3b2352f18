//! Snap/drop coordinator: watches note move/create events, reassigns cell
//! membership, and animates affected cells back into tidy layouts.
//!
//! The coordinator owns no durable state. Membership and slot order live in
//! the mandala shape's own `MandalaState`; the coordinator reads the latest
//! state, computes a full next-state value on a working copy, and commits it
//! as one update per processing pass. Its only transient state is the
//! debounce bookkeeping, the recently-snapped suppression set, and the
//! in-flight animation batch.
//!
//! Hosts wire editor events to [`SnapCoordinator::note_moved`] /
//! [`SnapCoordinator::note_created`] and call [`SnapCoordinator::tick`]
//! once per frame with the current timestamp.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::animate::{Animator, TweenTarget, ease_out_cubic};
use crate::consts::{
    CREATE_DEBOUNCE_MS, HIT_SAMPLE_RADII, HIT_SAMPLE_STEPS, NOTE_BASE_SIZE, RECENT_SNAP_GRACE_MS,
    SNAP_ANIMATION_MS,
};
use crate::editor::{
    BoundingBox, EditorPort, MandalaProps, ParentId, Shape, ShapeId, ShapeKind,
    mandala_state_patch,
};
use crate::geometry::{Point2d, cell_at_point, cell_bounds, compute_outer_radius};
use crate::layout::{LayoutItem, compute_cell_content_layout};
use crate::map::{CellState, CellStatus, MandalaState, MapDefinition};

/// Observes content-note lifecycle events and keeps notes snapped to cells.
pub struct SnapCoordinator {
    map: MapDefinition,
    /// Moved/created ids awaiting the debounce deadline, in event order.
    pending: Vec<ShapeId>,
    debounce_deadline_ms: Option<f64>,
    /// Just-animated ids mapped to the timestamp their grace period ends.
    /// Synthetic position updates from the coordinator's own animation must
    /// not re-trigger move detection.
    recently_snapped: HashMap<ShapeId, f64>,
    animator: Animator,
}

impl SnapCoordinator {
    /// Create a coordinator for `map` and run the one-time migration pass:
    /// any note listed in the mandala's state but still parented to the page
    /// is reparented into the mandala.
    pub fn new<E: EditorPort>(map: MapDefinition, editor: &mut E) -> Self {
        let coordinator = Self {
            map,
            pending: Vec::new(),
            debounce_deadline_ms: None,
            recently_snapped: HashMap::new(),
            animator: Animator::new(),
        };
        coordinator.migrate(editor);
        coordinator
    }

    fn migrate<E: EditorPort>(&self, editor: &mut E) {
        let Some(mandala) = find_mandala(editor) else {
            return;
        };
        let state = MandalaProps::new(&mandala.props).state();

        let mut to_reparent = Vec::new();
        for cell_state in state.values() {
            for &id in &cell_state.content_shape_ids {
                if let Some(shape) = editor.shape(id)
                    && shape.parent != ParentId::Shape(mandala.id)
                {
                    to_reparent.push(id);
                }
            }
        }

        if !to_reparent.is_empty() {
            debug!(count = to_reparent.len(), "migrating tracked notes into mandala container");
            editor.reparent_shapes(&to_reparent, ParentId::Shape(mandala.id));
        }
    }

    /// Record a user move of a note. Coalesced by the debounce timer.
    pub fn note_moved(&mut self, id: ShapeId, now_ms: f64) {
        self.enqueue(id, now_ms);
    }

    /// Record a user-created (or duplicated) note. Coalesced by the debounce
    /// timer.
    pub fn note_created(&mut self, id: ShapeId, now_ms: f64) {
        self.enqueue(id, now_ms);
    }

    fn enqueue(&mut self, id: ShapeId, now_ms: f64) {
        if self.recently_snapped.contains_key(&id) {
            return;
        }
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
        // Re-triggering replaces the pending deadline.
        self.debounce_deadline_ms = Some(now_ms + CREATE_DEBOUNCE_MS);
    }

    /// Advance time: fire the debounce pass when due, expire the suppression
    /// set, and step the snap animation.
    pub fn tick<E: EditorPort>(&mut self, editor: &mut E, now_ms: f64) {
        self.recently_snapped.retain(|_, expires| *expires > now_ms);

        if let Some(deadline) = self.debounce_deadline_ms
            && now_ms >= deadline
        {
            self.debounce_deadline_ms = None;
            let ids = std::mem::take(&mut self.pending);
            self.process(editor, &ids, now_ms);
        }

        self.animator.tick(editor, now_ms);
    }

    /// Process a batch immediately, bypassing the debounce. For hosts with a
    /// definitive drag-ended signal.
    pub fn process_now<E: EditorPort>(&mut self, editor: &mut E, ids: &[ShapeId], now_ms: f64) {
        self.pending.retain(|id| !ids.contains(id));
        self.process(editor, ids, now_ms);
    }

    #[allow(clippy::too_many_lines)]
    fn process<E: EditorPort>(&mut self, editor: &mut E, ids: &[ShapeId], now_ms: f64) {
        let Some(mandala) = find_mandala(editor) else {
            return;
        };
        let props = MandalaProps::new(&mandala.props);
        let (w, h) = (props.w(), props.h());
        let outer_radius = compute_outer_radius(w, h);
        let page_center = Point2d::new(mandala.x + w / 2.0, mandala.y + h / 2.0);
        let local_center = Point2d::new(w / 2.0, h / 2.0);

        let mut state: MandalaState = props.state();
        let mut state_changed = false;
        let mut cells_to_relayout: Vec<String> = Vec::new();
        let mut reparent_to_mandala: Vec<ShapeId> = Vec::new();
        let mut reparent_to_page: Vec<ShapeId> = Vec::new();

        for &shape_id in ids {
            let Some(shape) = editor.shape(shape_id) else {
                continue;
            };
            if shape.kind != ShapeKind::Note {
                continue;
            }
            let Some(page_bounds) = editor.shape_page_bounds(shape_id) else {
                continue;
            };

            let hit = best_cell_hit(&self.map, &page_bounds, page_center, outer_radius);
            let (target_cell, hit_point) = match &hit {
                Some((cell, point)) => (Some(cell.as_str()), *point),
                None => (None, Point2d::new(page_bounds.mid_x(), page_bounds.mid_y())),
            };

            let source_cell = state
                .iter()
                .find(|(_, cs)| cs.content_shape_ids.contains(&shape_id))
                .map(|(id, _)| id.clone());

            if target_cell == source_cell.as_deref() {
                // Same cell (or still outside): at most a reorder.
                let Some(cell_id) = target_cell else {
                    continue;
                };
                let existing = state
                    .entry(cell_id.to_owned())
                    .or_insert_with(CellState::empty)
                    .content_shape_ids
                    .clone();
                if existing.is_empty() {
                    continue;
                }

                let local_drop =
                    Point2d::new(hit_point.x - mandala.x, hit_point.y - mandala.y);
                let Some(bounds) = cell_bounds(&self.map, local_center, outer_radius, cell_id)
                else {
                    push_unique(&mut cells_to_relayout, cell_id);
                    continue;
                };

                let slot = find_closest_slot(
                    &compute_cell_content_layout(&bounds, existing.len()),
                    local_drop,
                );
                let mut reordered: Vec<ShapeId> =
                    existing.iter().copied().filter(|id| *id != shape_id).collect();
                reordered.insert(slot.min(reordered.len()), shape_id);

                if reordered != existing {
                    trace!(%shape_id, cell = cell_id, slot, "reordered within cell");
                    if let Some(cs) = state.get_mut(cell_id) {
                        cs.status = CellStatus::Filled;
                        cs.content_shape_ids = reordered;
                    }
                    state_changed = true;
                }
                push_unique(&mut cells_to_relayout, cell_id);
                continue;
            }

            if let Some(source) = &source_cell
                && let Some(cs) = state.get_mut(source)
            {
                cs.content_shape_ids.retain(|id| *id != shape_id);
                if cs.content_shape_ids.is_empty() {
                    cs.status = CellStatus::Empty;
                }
                push_unique(&mut cells_to_relayout, source);
                state_changed = true;
            }

            if let Some(cell_id) = target_cell {
                let existing = state
                    .entry(cell_id.to_owned())
                    .or_insert_with(CellState::empty)
                    .content_shape_ids
                    .clone();

                let local_drop =
                    Point2d::new(hit_point.x - mandala.x, hit_point.y - mandala.y);
                let insert_idx = cell_bounds(&self.map, local_center, outer_radius, cell_id)
                    .map_or(existing.len(), |bounds| {
                        find_closest_slot(
                            &compute_cell_content_layout(&bounds, existing.len() + 1),
                            local_drop,
                        )
                    });

                let mut ordered = existing;
                ordered.insert(insert_idx.min(ordered.len()), shape_id);

                debug!(
                    %shape_id,
                    from = source_cell.as_deref().unwrap_or("outside"),
                    to = cell_id,
                    "note snapped to cell"
                );
                if let Some(cs) = state.get_mut(cell_id) {
                    cs.status = CellStatus::Filled;
                    cs.content_shape_ids = ordered;
                }
                push_unique(&mut cells_to_relayout, cell_id);
                state_changed = true;

                if shape.parent != ParentId::Shape(mandala.id) {
                    reparent_to_mandala.push(shape_id);
                }
            } else if shape.parent == ParentId::Shape(mandala.id) {
                debug!(%shape_id, from = ?source_cell, "note dropped outside diagram");
                reparent_to_page.push(shape_id);
            }
        }

        if !reparent_to_mandala.is_empty() {
            editor.reparent_shapes(&reparent_to_mandala, ParentId::Shape(mandala.id));
        }
        if !reparent_to_page.is_empty() {
            editor.reparent_shapes(&reparent_to_page, ParentId::Page);
        }

        if cells_to_relayout.is_empty() && !state_changed {
            return;
        }

        // One animation batch covering every affected cell.
        let mut targets: Vec<TweenTarget> = Vec::new();
        for cell_id in &cells_to_relayout {
            let Some(cell_state) = state.get(cell_id) else {
                continue;
            };
            if cell_state.content_shape_ids.is_empty() {
                continue;
            }
            let Some(bounds) = cell_bounds(&self.map, local_center, outer_radius, cell_id) else {
                continue;
            };

            let layout = compute_cell_content_layout(&bounds, cell_state.content_shape_ids.len());
            for (i, &id) in cell_state.content_shape_ids.iter().enumerate() {
                // Deleted shapes stay in state until a later transition
                // corrects them; skip them here.
                let (Some(item), Some(_)) = (layout.get(i), editor.shape(id)) else {
                    continue;
                };
                targets.push(TweenTarget {
                    id,
                    x: item.center.x - item.diameter / 2.0,
                    y: item.center.y - item.diameter / 2.0,
                    scale: item.diameter / NOTE_BASE_SIZE,
                });
            }
        }

        if !targets.is_empty() {
            self.animator.start(editor, &targets, SNAP_ANIMATION_MS, ease_out_cubic, now_ms);
            for t in &targets {
                self.recently_snapped.insert(t.id, now_ms + RECENT_SNAP_GRACE_MS);
            }
        }

        if state_changed {
            editor.update_shape(mandala.id, &mandala_state_patch(&state));
        }
    }
}

/// The single mandala shape on the current page, if any.
fn find_mandala<E: EditorPort>(editor: &E) -> Option<Shape> {
    editor.current_page_shapes().into_iter().find(|s| s.kind == ShapeKind::Mandala)
}

fn push_unique(cells: &mut Vec<String>, cell_id: &str) {
    if !cells.iter().any(|c| c == cell_id) {
        cells.push(cell_id.to_owned());
    }
}

/// Pick the cell a dragged note belongs to by sampling its circular extent.
///
/// A single center-point test is unreliable: cells near the hub can be
/// smaller than the note itself. Probe the bounds center first (cheap,
/// covers the common case), then the box corners/edges plus rings of samples
/// at several radii; the cell with the most sample hits wins, ties broken by
/// the sample nearest the note's center. Returns the winning cell id and the
/// sample point that chose it.
fn best_cell_hit(
    map: &MapDefinition,
    page_bounds: &BoundingBox,
    page_center: Point2d,
    outer_radius: f64,
) -> Option<(String, Point2d)> {
    let bounds_center = Point2d::new(page_bounds.mid_x(), page_bounds.mid_y());
    if let Some(hit) = cell_at_point(map, page_center, outer_radius, bounds_center) {
        return Some((hit.to_owned(), bounds_center));
    }

    let r = (page_bounds.width().min(page_bounds.height()) / 2.0).max(1.0);

    let mut samples = vec![
        bounds_center,
        Point2d::new(page_bounds.min_x, page_bounds.min_y),
        Point2d::new(page_bounds.max_x, page_bounds.min_y),
        Point2d::new(page_bounds.min_x, page_bounds.max_y),
        Point2d::new(page_bounds.max_x, page_bounds.max_y),
        Point2d::new(bounds_center.x, page_bounds.min_y),
        Point2d::new(bounds_center.x, page_bounds.max_y),
        Point2d::new(page_bounds.min_x, bounds_center.y),
        Point2d::new(page_bounds.max_x, bounds_center.y),
    ];
    for fraction in HIT_SAMPLE_RADII {
        let rr = r * fraction;
        for i in 0..HIT_SAMPLE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let a = (i as f64 / HIT_SAMPLE_STEPS as f64) * std::f64::consts::TAU;
            samples.push(Point2d::new(
                bounds_center.x + rr * a.cos(),
                bounds_center.y + rr * a.sin(),
            ));
        }
    }

    // Bucket hits per cell, preserving first-hit order for determinism.
    let mut buckets: Vec<(&str, Vec<Point2d>)> = Vec::new();
    for point in samples {
        let Some(cell_id) = cell_at_point(map, page_center, outer_radius, point) else {
            continue;
        };
        match buckets.iter_mut().find(|(id, _)| *id == cell_id) {
            Some((_, points)) => points.push(point),
            None => buckets.push((cell_id, vec![point])),
        }
    }

    let mut best: Option<(&str, usize, f64, Point2d)> = None;
    for (cell_id, points) in &buckets {
        let (nearest, dist) = points
            .iter()
            .map(|p| (*p, p.dist_sq(bounds_center)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let wins = match &best {
            None => true,
            Some((_, count, best_dist, _)) => {
                points.len() > *count || (points.len() == *count && dist < *best_dist)
            }
        };
        if wins {
            best = Some((cell_id, points.len(), dist, nearest));
        }
    }

    best.map(|(cell_id, _, _, point)| (cell_id.to_owned(), point))
}

/// Index of the layout slot nearest to `drop_point`, defaulting to the last
/// slot for an empty layout. Deterministic: strict-less comparison keeps the
/// earliest of equally distant slots.
#[must_use]
pub fn find_closest_slot(layout: &[LayoutItem], drop_point: Point2d) -> usize {
    let mut best = layout.len().saturating_sub(1);
    let mut best_dist = f64::INFINITY;
    for (i, item) in layout.iter().enumerate() {
        let dist = item.center.dist_sq(drop_point);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
