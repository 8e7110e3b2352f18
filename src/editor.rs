//! Editor capability port: the narrow interface the snap coordinator and
//! action handlers need from the host drawing-editor SDK.
//!
//! The geometry and layout engines are pure and take no dependency on this
//! module. Everything that touches live shapes goes through [`EditorPort`],
//! implemented by an adapter over the concrete editor. [`PageStore`] is the
//! in-memory implementation used in tests and by hosts that mirror the
//! editor's document.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::NOTE_BASE_SIZE;
use crate::map::MandalaState;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The kind of a shape, as far as this crate cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// The radial diagram container.
    Mandala,
    /// A circular content note placed inside a cell.
    Note,
    /// A connector between two content shapes.
    Arrow,
}

/// Parent of a shape: the page root or another shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentId {
    Page,
    Shape(ShapeId),
}

/// A shape as stored in the editor's document.
///
/// `x`/`y` are the top-left corner in the parent's coordinate space; a shape
/// parented to a mandala has coordinates local to that mandala. `props` is
/// the editor's open-ended JSON bag, read through [`NoteProps`] and
/// [`MandalaProps`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub parent: ParentId,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub props: serde_json::Value,
}

/// Sparse update for a shape. Only present fields are applied; props keys
/// merge, with null values deleting keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

/// Axis-aligned bounding box in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn mid_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Typed access to a note shape's `props`.
pub struct NoteProps<'a> {
    value: &'a serde_json::Value,
}

impl<'a> NoteProps<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Scale factor applied to the note's base size. Defaults to `1.0`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.value.get("scale").and_then(serde_json::Value::as_f64).unwrap_or(1.0)
    }

    /// Fill color as a CSS color string. Defaults to `"yellow"`.
    #[must_use]
    pub fn color(&self) -> &str {
        self.value.get("color").and_then(|v| v.as_str()).unwrap_or("yellow")
    }

    /// Note text. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.value.get("text").and_then(|v| v.as_str()).unwrap_or("")
    }
}

/// Typed access to a mandala shape's `props`.
pub struct MandalaProps<'a> {
    value: &'a serde_json::Value,
}

impl<'a> MandalaProps<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Width of the mandala's bounding box. Defaults to `0.0`.
    #[must_use]
    pub fn w(&self) -> f64 {
        self.value.get("w").and_then(serde_json::Value::as_f64).unwrap_or(0.0)
    }

    /// Height of the mandala's bounding box. Defaults to `0.0`.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.value.get("h").and_then(serde_json::Value::as_f64).unwrap_or(0.0)
    }

    /// The per-cell runtime state stored on the shape. Missing or malformed
    /// state reads as empty.
    #[must_use]
    pub fn state(&self) -> MandalaState {
        self.value
            .get("state")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Build the `props` patch that replaces a mandala's stored state.
#[must_use]
pub fn mandala_state_patch(state: &MandalaState) -> ShapePatch {
    ShapePatch {
        props: Some(serde_json::json!({
            "state": serde_json::to_value(state).unwrap_or_default(),
        })),
        ..Default::default()
    }
}

/// The operations this crate needs from the host editor.
pub trait EditorPort {
    /// Look up a shape by id.
    fn shape(&self, id: ShapeId) -> Option<Shape>;

    /// Insert a new shape. An existing shape with the same id is replaced.
    fn create_shape(&mut self, shape: Shape);

    /// Apply a sparse update. Returns false if the shape doesn't exist.
    fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> bool;

    /// Remove a shape, returning it if it was present.
    fn delete_shape(&mut self, id: ShapeId) -> Option<Shape>;

    /// Apply several sparse updates as one batch.
    fn update_shapes(&mut self, patches: &[(ShapeId, ShapePatch)]) {
        for (id, patch) in patches {
            self.update_shape(*id, patch);
        }
    }

    /// Page-space bounding box of a shape, or `None` if it doesn't exist.
    fn shape_page_bounds(&self, id: ShapeId) -> Option<BoundingBox>;

    /// All shapes on the current page, in insertion order.
    fn current_page_shapes(&self) -> Vec<Shape>;

    /// Move shapes under a new parent, preserving their page-space position.
    fn reparent_shapes(&mut self, ids: &[ShapeId], new_parent: ParentId);
}

/// In-memory shape store implementing [`EditorPort`].
#[derive(Default)]
pub struct PageStore {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl PageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Page-space origin of a shape's parent.
    fn parent_origin(&self, shape: &Shape) -> (f64, f64) {
        match shape.parent {
            ParentId::Page => (0.0, 0.0),
            ParentId::Shape(pid) => self
                .shapes
                .get(&pid)
                .map_or((0.0, 0.0), |p| {
                    let (px, py) = self.parent_origin(p);
                    (px + p.x, py + p.y)
                }),
        }
    }

    /// Extent of a shape in its own coordinate space.
    fn shape_extent(shape: &Shape) -> (f64, f64) {
        match shape.kind {
            ShapeKind::Note => {
                let size = NOTE_BASE_SIZE * NoteProps::new(&shape.props).scale();
                (size, size)
            }
            ShapeKind::Mandala => {
                let props = MandalaProps::new(&shape.props);
                (props.w(), props.h())
            }
            ShapeKind::Arrow => (0.0, 0.0),
        }
    }
}

impl EditorPort for PageStore {
    fn shape(&self, id: ShapeId) -> Option<Shape> {
        self.shapes.get(&id).cloned()
    }

    fn create_shape(&mut self, shape: Shape) {
        if !self.shapes.contains_key(&shape.id) {
            self.order.push(shape.id);
        }
        self.shapes.insert(shape.id, shape);
    }

    fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        if let Some(x) = patch.x {
            shape.x = x;
        }
        if let Some(y) = patch.y {
            shape.y = y;
        }
        if let Some(ref props) = patch.props {
            let Some(incoming) = props.as_object() else {
                return false;
            };
            if !shape.props.is_object() {
                shape.props = serde_json::json!({});
            }
            if let Some(existing) = shape.props.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }

    fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|&sid| sid != id);
        self.shapes.remove(&id)
    }

    fn shape_page_bounds(&self, id: ShapeId) -> Option<BoundingBox> {
        let shape = self.shapes.get(&id)?;
        let (ox, oy) = self.parent_origin(shape);
        let (w, h) = Self::shape_extent(shape);
        Some(BoundingBox {
            min_x: ox + shape.x,
            min_y: oy + shape.y,
            max_x: ox + shape.x + w,
            max_y: oy + shape.y + h,
        })
    }

    fn current_page_shapes(&self) -> Vec<Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id).cloned()).collect()
    }

    fn reparent_shapes(&mut self, ids: &[ShapeId], new_parent: ParentId) {
        for &id in ids {
            let Some(shape) = self.shapes.get(&id) else {
                continue;
            };
            if shape.parent == new_parent {
                continue;
            }
            let (old_ox, old_oy) = self.parent_origin(shape);
            let new_origin = match new_parent {
                ParentId::Page => (0.0, 0.0),
                ParentId::Shape(pid) => match self.shapes.get(&pid) {
                    Some(p) => {
                        let (px, py) = self.parent_origin(p);
                        (px + p.x, py + p.y)
                    }
                    None => continue,
                },
            };
            if let Some(shape) = self.shapes.get_mut(&id) {
                shape.x += old_ox - new_origin.0;
                shape.y += old_oy - new_origin.1;
                shape.parent = new_parent;
            }
        }
    }
}
