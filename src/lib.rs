//! Geometry and layout engine for mandala-style radial diagrams.
//!
//! A mandala divides a circle into a central hub plus angular slices, each
//! slice stacked with annular ring cells. This crate owns the math and the
//! document mutations behind that picture: resolving pointer positions to
//! cells, packing content notes inside cell interiors, snapping dragged
//! notes into cells with a debounced coordinator, and applying structured
//! agent actions against the diagram. The host embedder supplies the shape
//! store behind [`editor::EditorPort`] and drives time by calling the tick
//! methods with its own clock.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`map`] | Map definitions, cell state, and validation |
//! | [`emotions_map`] | The built-in CBT Emotions Map |
//! | [`geometry`] | Angle math, hit-testing, and cell bounds |
//! | [`layout`] | Packing content items inside cell interiors |
//! | [`editor`] | Shape document port and the in-memory [`editor::PageStore`] |
//! | [`snap`] | Debounced drag-to-cell snap coordination |
//! | [`animate`] | Host-driven tween batches for note movement |
//! | [`actions`] | Agent action validation and application |
//! | [`svg`] | SVG path strings for cell outlines and label arcs |
//! | [`consts`] | Shared numeric constants (padding, gaps, timings) |

pub mod actions;
pub mod animate;
pub mod consts;
pub mod editor;
pub mod emotions_map;
pub mod geometry;
pub mod layout;
pub mod map;
pub mod snap;
pub mod svg;
