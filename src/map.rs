//! Map model: the static radial-diagram definition and its runtime state.
//!
//! A `MapDefinition` describes a mandala as a center circle plus angular
//! slices, each slice holding one or more ring-cells ordered outer-to-inner.
//! It is built once at startup and never mutated. `MandalaState` is the
//! mutable per-instance companion: one `CellState` per cell id, tracking
//! which content shapes currently live in each cell and in what slot order.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::editor::ShapeId;

/// The center region of a mandala.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterDef {
    /// Cell id of the center region.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Radius of the center circle as a fraction of the outer radius, in (0, 1).
    pub radius_ratio: f64,
    /// Reflection question shown to the user for this cell.
    pub question: String,
    /// Guidance text for the agent when working this cell.
    pub guidance: String,
    /// Example answers.
    pub examples: Vec<String>,
}

/// One ring-cell within a slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDef {
    /// Unique cell id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Inner edge of the cell as a fraction of the outer radius.
    pub inner_ratio: f64,
    /// Outer edge of the cell as a fraction of the outer radius. Always
    /// greater than `inner_ratio`.
    pub outer_ratio: f64,
    /// Reflection question shown to the user for this cell.
    pub question: String,
    /// Guidance text for the agent when working this cell.
    pub guidance: String,
    /// Example answers.
    pub examples: Vec<String>,
}

/// One angular wedge of the mandala.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceDef {
    /// Unique slice id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Start angle in degrees (math convention, counter-clockwise from +x).
    pub start_angle: f64,
    /// End angle in degrees. May be numerically below `start_angle`, in
    /// which case the slice wraps through 0°.
    pub end_angle: f64,
    /// Cells ordered outer-to-inner with contiguous ratio ranges.
    pub cells: Vec<CellDef>,
}

/// Immutable declarative description of a radial diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub center: CenterDef,
    pub slices: Vec<SliceDef>,
}

/// Fill status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    /// No content yet.
    Empty,
    /// Currently highlighted by the agent.
    Active,
    /// Holds at least one content shape.
    Filled,
}

/// Runtime state of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub status: CellStatus,
    /// Content shapes assigned to this cell. Order is meaningful: it is the
    /// layout slot order.
    pub content_shape_ids: Vec<ShapeId>,
}

impl CellState {
    #[must_use]
    pub fn empty() -> Self {
        Self { status: CellStatus::Empty, content_shape_ids: Vec::new() }
    }
}

/// Runtime state of a mandala instance: one entry per cell id, center included.
pub type MandalaState = HashMap<String, CellState>;

impl MapDefinition {
    /// All cell ids: center first, then each slice's cells in declaration
    /// order. Deterministic and total.
    #[must_use]
    pub fn all_cell_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.center.id.as_str()];
        for slice in &self.slices {
            for cell in &slice.cells {
                ids.push(cell.id.as_str());
            }
        }
        ids
    }

    /// Whether `cell_id` names the center or any slice-cell.
    #[must_use]
    pub fn is_valid_cell_id(&self, cell_id: &str) -> bool {
        cell_id == self.center.id
            || self.slices.iter().any(|s| s.cells.iter().any(|c| c.id == cell_id))
    }

    /// Look up a slice-cell definition together with its slice.
    #[must_use]
    pub fn find_cell(&self, cell_id: &str) -> Option<(&SliceDef, &CellDef)> {
        self.slices
            .iter()
            .find_map(|s| s.cells.iter().find(|c| c.id == cell_id).map(|c| (s, c)))
    }

    /// Fresh state with every cell empty.
    #[must_use]
    pub fn empty_state(&self) -> MandalaState {
        self.all_cell_ids()
            .into_iter()
            .map(|id| (id.to_owned(), CellState::empty()))
            .collect()
    }

    /// Check the structural invariants of this definition.
    ///
    /// This is a construction-time / test-time check; the geometry engine
    /// assumes a valid definition and never re-validates on the hot path.
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.center.radius_ratio) || self.center.radius_ratio <= 0.0 {
            return Err(format!("center radius_ratio {} not in (0, 1)", self.center.radius_ratio));
        }

        let ids = self.all_cell_ids();
        let mut seen = std::collections::HashSet::new();
        for id in &ids {
            if !seen.insert(*id) {
                return Err(format!("duplicate cell id {id:?}"));
            }
        }

        let mut total_sweep = 0.0;
        for slice in &self.slices {
            let sweep = (slice.end_angle - slice.start_angle).rem_euclid(360.0);
            let sweep = if sweep == 0.0 { 360.0 } else { sweep };
            total_sweep += sweep;

            if slice.cells.is_empty() {
                return Err(format!("slice {:?} has no cells", slice.id));
            }
            for cell in &slice.cells {
                if cell.outer_ratio <= cell.inner_ratio {
                    return Err(format!(
                        "cell {:?} outer_ratio {} <= inner_ratio {}",
                        cell.id, cell.outer_ratio, cell.inner_ratio
                    ));
                }
                if cell.outer_ratio > 1.0 || cell.inner_ratio < 0.0 {
                    return Err(format!("cell {:?} ratios out of range", cell.id));
                }
            }
            // Outer-to-inner contiguity, ending at the center circle.
            for pair in slice.cells.windows(2) {
                if (pair[0].inner_ratio - pair[1].outer_ratio).abs() > 1e-9 {
                    return Err(format!(
                        "cells {:?} and {:?} are not contiguous",
                        pair[0].id, pair[1].id
                    ));
                }
            }
            let innermost = &slice.cells[slice.cells.len() - 1];
            if (innermost.inner_ratio - self.center.radius_ratio).abs() > 1e-9 {
                return Err(format!(
                    "innermost cell {:?} inner_ratio {} does not meet center radius_ratio {}",
                    innermost.id, innermost.inner_ratio, self.center.radius_ratio
                ));
            }
        }

        if (total_sweep - 360.0).abs() > 1e-9 {
            return Err(format!("slice sweeps sum to {total_sweep}, expected 360"));
        }

        Ok(())
    }
}
