//! Shared numeric constants for the mandala crate.

// ── Layout ──────────────────────────────────────────────────────

/// Linear inset from a cell boundary to the nearest content item, in
/// diagram units. Cell boundaries already provide visual separation,
/// so this stays small.
pub const EDGE_PAD: f64 = 14.0;

/// Gap between adjacent content items within a cell.
pub const ITEM_GAP: f64 = 2.0;

/// Fraction of the usable center-cell diameter given to a lone item.
pub const SINGLE_ITEM_FILL: f64 = 0.95;

/// Maximum number of concentric bands tried when packing a sector cell.
pub const MAX_BANDS: usize = 3;

// ── Diagram sizing ──────────────────────────────────────────────

/// Minimum ring of space reserved outside the diagram for slice labels.
pub const MIN_LABEL_PADDING: f64 = 20.0;

/// Label padding as a fraction of the diagram's smaller bounding-box side.
pub const LABEL_PADDING_RATIO: f64 = 0.05;

// ── Content items ───────────────────────────────────────────────

/// Unscaled side length of a note shape; layout scale = diameter / this.
pub const NOTE_BASE_SIZE: f64 = 200.0;

// ── Snap coordinator ────────────────────────────────────────────

/// Quiet period that coalesces a burst of move/create events into one
/// processing pass.
pub const CREATE_DEBOUNCE_MS: f64 = 150.0;

/// Duration of the snap-into-slot animation.
pub const SNAP_ANIMATION_MS: f64 = 300.0;

/// How long a just-animated item is exempt from re-triggering move
/// detection on the coordinator's own synthetic position updates.
pub const RECENT_SNAP_GRACE_MS: f64 = 400.0;

/// Sample count per ring when probing a dragged item's circular extent.
pub const HIT_SAMPLE_STEPS: usize = 24;

/// Radii fractions of the item's half-extent at which sample rings are laid.
pub const HIT_SAMPLE_RADII: [f64; 3] = [0.25, 0.55, 0.85];
