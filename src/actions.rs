//! Agent action objects: the validated commands the LLM layer issues
//! against a mandala, and their application through the editor port.
//!
//! Actions arrive as JSON discriminated unions, are deserialized into
//! [`AgentAction`], validated against the map definition and the live
//! document, and applied. Failures are typed and local; a bad action is a
//! no-op, never a crash.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::consts::NOTE_BASE_SIZE;
use crate::editor::{
    EditorPort, MandalaProps, ParentId, Shape, ShapeId, ShapeKind, ShapePatch,
    mandala_state_patch,
};
use crate::geometry::{Point2d, cell_bounds, cell_center, compute_outer_radius};
use crate::layout::compute_cell_content_layout;
use crate::map::{CellState, CellStatus, MapDefinition};

/// A structured action produced by the agent layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentAction {
    /// Add a content note with `content` to a cell.
    FillCell {
        mandala_id: ShapeId,
        cell_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Mark a cell as the one currently being worked.
    HighlightCell { mandala_id: ShapeId, cell_id: String },
    /// Mark a set of cells as holding contradicting content and draw a
    /// connector between the first content shapes of the first two cells.
    DetectConflict { mandala_id: ShapeId, cell_ids: Vec<String>, description: String },
    /// Draw an arrow between two existing content shapes.
    CreateArrow {
        mandala_id: ShapeId,
        source_element_id: ShapeId,
        target_element_id: ShapeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

/// Why an action could not be applied.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("mandala shape {0} not found")]
    MandalaNotFound(ShapeId),
    #[error("unknown cell id {0:?}")]
    UnknownCell(String),
    #[error("element shape {0} not found")]
    ElementNotFound(ShapeId),
    #[error("detect_conflict needs at least two cells, got {0}")]
    NotEnoughCells(usize),
}

/// Validate and apply one action. Returns the id of the shape the action
/// created, if any.
pub fn apply_action<E: EditorPort>(
    editor: &mut E,
    map: &MapDefinition,
    action: &AgentAction,
) -> Result<Option<ShapeId>, ActionError> {
    match action {
        AgentAction::FillCell { mandala_id, cell_id, content, color } => {
            fill_cell(editor, map, *mandala_id, cell_id, content, color.as_deref()).map(Some)
        }
        AgentAction::HighlightCell { mandala_id, cell_id } => {
            highlight_cell(editor, map, *mandala_id, cell_id)?;
            Ok(None)
        }
        AgentAction::DetectConflict { mandala_id, cell_ids, description } => {
            detect_conflict(editor, map, *mandala_id, cell_ids, description).map(Some)
        }
        AgentAction::CreateArrow { mandala_id, source_element_id, target_element_id, color } => {
            create_arrow(editor, *mandala_id, *source_element_id, *target_element_id, color.as_deref())
                .map(Some)
        }
    }
}

fn require_mandala<E: EditorPort>(editor: &E, id: ShapeId) -> Result<Shape, ActionError> {
    editor
        .shape(id)
        .filter(|s| s.kind == ShapeKind::Mandala)
        .ok_or(ActionError::MandalaNotFound(id))
}

fn require_cell<'a>(map: &MapDefinition, cell_id: &'a str) -> Result<&'a str, ActionError> {
    if map.is_valid_cell_id(cell_id) {
        Ok(cell_id)
    } else {
        Err(ActionError::UnknownCell(cell_id.to_owned()))
    }
}

fn fill_cell<E: EditorPort>(
    editor: &mut E,
    map: &MapDefinition,
    mandala_id: ShapeId,
    cell_id: &str,
    content: &str,
    color: Option<&str>,
) -> Result<ShapeId, ActionError> {
    let mandala = require_mandala(editor, mandala_id)?;
    require_cell(map, cell_id)?;

    let props = MandalaProps::new(&mandala.props);
    let outer_radius = compute_outer_radius(props.w(), props.h());
    let local_center = Point2d::new(props.w() / 2.0, props.h() / 2.0);

    let mut state = props.state();
    let cell_state = state.entry(cell_id.to_owned()).or_insert_with(CellState::empty);
    let new_count = cell_state.content_shape_ids.len() + 1;

    let layout = cell_bounds(map, local_center, outer_radius, cell_id)
        .map(|bounds| compute_cell_content_layout(&bounds, new_count))
        .unwrap_or_default();

    let note_id = Uuid::new_v4();
    let (slot_center, diameter) = layout.last().map_or_else(
        // A cell too small to lay out still takes the note, at its center.
        || {
            let center = cell_center(map, local_center, outer_radius, cell_id)
                .unwrap_or(local_center);
            (center, NOTE_BASE_SIZE)
        },
        |item| (item.center, item.diameter),
    );

    // Existing occupants shift to their new, smaller slots in the same pass.
    let restack: Vec<(ShapeId, ShapePatch)> = cell_state
        .content_shape_ids
        .iter()
        .zip(layout.iter())
        .map(|(&id, item)| {
            (
                id,
                ShapePatch {
                    x: Some(item.center.x - item.diameter / 2.0),
                    y: Some(item.center.y - item.diameter / 2.0),
                    props: Some(serde_json::json!({ "scale": item.diameter / NOTE_BASE_SIZE })),
                },
            )
        })
        .collect();
    editor.update_shapes(&restack);

    editor.create_shape(Shape {
        id: note_id,
        parent: ParentId::Shape(mandala_id),
        kind: ShapeKind::Note,
        x: slot_center.x - diameter / 2.0,
        y: slot_center.y - diameter / 2.0,
        props: serde_json::json!({
            "text": content,
            "color": color.unwrap_or("yellow"),
            "scale": diameter / NOTE_BASE_SIZE,
        }),
    });

    cell_state.status = CellStatus::Filled;
    cell_state.content_shape_ids.push(note_id);
    editor.update_shape(mandala_id, &mandala_state_patch(&state));

    debug!(cell = cell_id, %note_id, "filled cell");
    Ok(note_id)
}

fn highlight_cell<E: EditorPort>(
    editor: &mut E,
    map: &MapDefinition,
    mandala_id: ShapeId,
    cell_id: &str,
) -> Result<(), ActionError> {
    let mandala = require_mandala(editor, mandala_id)?;
    require_cell(map, cell_id)?;

    let mut state = MandalaProps::new(&mandala.props).state();
    let cell_state = state.entry(cell_id.to_owned()).or_insert_with(CellState::empty);
    // Filled cells stay filled; the renderer shows the highlight separately.
    if cell_state.status == CellStatus::Empty {
        cell_state.status = CellStatus::Active;
    }
    editor.update_shape(mandala_id, &mandala_state_patch(&state));
    Ok(())
}

fn detect_conflict<E: EditorPort>(
    editor: &mut E,
    map: &MapDefinition,
    mandala_id: ShapeId,
    cell_ids: &[String],
    description: &str,
) -> Result<ShapeId, ActionError> {
    let mandala = require_mandala(editor, mandala_id)?;
    if cell_ids.len() < 2 {
        return Err(ActionError::NotEnoughCells(cell_ids.len()));
    }
    for cell_id in cell_ids {
        require_cell(map, cell_id)?;
    }

    let props = MandalaProps::new(&mandala.props);
    let outer_radius = compute_outer_radius(props.w(), props.h());
    let local_center = Point2d::new(props.w() / 2.0, props.h() / 2.0);

    let mut state = props.state();
    for cell_id in cell_ids {
        let cell_state = state.entry(cell_id.clone()).or_insert_with(CellState::empty);
        if cell_state.status == CellStatus::Empty {
            cell_state.status = CellStatus::Active;
        }
    }
    editor.update_shape(mandala_id, &mandala_state_patch(&state));

    // Anchor on the cell's first content shape; an empty cell anchors at its
    // geometric center.
    let anchor = |cell_id: &str| {
        state
            .get(cell_id)
            .and_then(|cs| cs.content_shape_ids.first())
            .and_then(|&id| editor.shape_page_bounds(id))
            .map_or_else(
                || cell_center(map, local_center, outer_radius, cell_id).unwrap_or(local_center),
                |b| Point2d::new(b.mid_x() - mandala.x, b.mid_y() - mandala.y),
            )
    };
    let a = anchor(&cell_ids[0]);
    let b = anchor(&cell_ids[1]);

    let arrow_id = Uuid::new_v4();
    editor.create_shape(Shape {
        id: arrow_id,
        parent: ParentId::Shape(mandala_id),
        kind: ShapeKind::Arrow,
        x: a.x,
        y: a.y,
        props: serde_json::json!({
            "end": { "x": b.x - a.x, "y": b.y - a.y },
            "label": description,
            "color": "red",
        }),
    });

    debug!(cells = ?cell_ids, "marked conflicting cells");
    Ok(arrow_id)
}

fn create_arrow<E: EditorPort>(
    editor: &mut E,
    mandala_id: ShapeId,
    source_element_id: ShapeId,
    target_element_id: ShapeId,
    color: Option<&str>,
) -> Result<ShapeId, ActionError> {
    require_mandala(editor, mandala_id)?;
    let source = editor
        .shape_page_bounds(source_element_id)
        .ok_or(ActionError::ElementNotFound(source_element_id))?;
    let target = editor
        .shape_page_bounds(target_element_id)
        .ok_or(ActionError::ElementNotFound(target_element_id))?;

    let arrow_id = Uuid::new_v4();
    editor.create_shape(Shape {
        id: arrow_id,
        parent: ParentId::Page,
        kind: ShapeKind::Arrow,
        x: source.mid_x(),
        y: source.mid_y(),
        props: serde_json::json!({
            "end": { "x": target.mid_x() - source.mid_x(), "y": target.mid_y() - source.mid_y() },
            "color": color.unwrap_or("black"),
        }),
    });
    Ok(arrow_id)
}
