//! Animation primitive: tween a batch of shapes toward target position and
//! scale over a fixed duration.
//!
//! The host drives time: it calls [`Animator::tick`] once per frame with the
//! current timestamp. Starting a new batch supersedes any in-flight batch
//! via a monotonically increasing generation token.

#[cfg(test)]
#[path = "animate_test.rs"]
mod animate_test;

use crate::editor::{EditorPort, NoteProps, ShapeId, ShapePatch};

/// Target end state for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenTarget {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// An easing curve mapping t in [0, 1] to an interpolation factor.
pub type Easing = fn(f64) -> f64;

/// Cubic ease-out: fast start, gentle settle.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[must_use]
pub fn clamp01(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Debug, Clone, Copy)]
struct TweenSpan {
    id: ShapeId,
    start_x: f64,
    start_y: f64,
    start_scale: f64,
    end_x: f64,
    end_y: f64,
    end_scale: f64,
}

struct ActiveBatch {
    generation: u64,
    started_ms: f64,
    duration_ms: f64,
    easing: Easing,
    spans: Vec<TweenSpan>,
}

/// Drives at most one tween batch at a time.
#[derive(Default)]
pub struct Animator {
    generation: u64,
    active: Option<ActiveBatch>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a batch is currently in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Begin animating `targets` toward their end states.
    ///
    /// Current x/y/scale are captured from the editor as interpolation
    /// starts; targets whose shapes no longer exist are skipped. When
    /// `duration_ms <= 0` the end state is applied immediately. Returns the
    /// new generation token; any previous batch is invalidated.
    pub fn start<E: EditorPort>(
        &mut self,
        editor: &mut E,
        targets: &[TweenTarget],
        duration_ms: f64,
        easing: Easing,
        now_ms: f64,
    ) -> u64 {
        self.generation += 1;
        self.active = None;

        let spans: Vec<TweenSpan> = targets
            .iter()
            .filter_map(|t| {
                let shape = editor.shape(t.id)?;
                Some(TweenSpan {
                    id: t.id,
                    start_x: shape.x,
                    start_y: shape.y,
                    start_scale: NoteProps::new(&shape.props).scale(),
                    end_x: t.x,
                    end_y: t.y,
                    end_scale: t.scale,
                })
            })
            .collect();

        if spans.is_empty() {
            return self.generation;
        }

        if duration_ms <= 0.0 {
            Self::apply(editor, &spans, 1.0);
            return self.generation;
        }

        self.active = Some(ActiveBatch {
            generation: self.generation,
            started_ms: now_ms,
            duration_ms,
            easing,
            spans,
        });
        self.generation
    }

    /// Advance the active batch to `now_ms`. Returns true while a batch is
    /// still in flight after this frame.
    pub fn tick<E: EditorPort>(&mut self, editor: &mut E, now_ms: f64) -> bool {
        let Some(batch) = &self.active else {
            return false;
        };
        // A superseded batch never writes again.
        if batch.generation != self.generation {
            self.active = None;
            return false;
        }

        let t = clamp01((now_ms - batch.started_ms) / batch.duration_ms);
        let k = (batch.easing)(t);
        Self::apply(editor, &batch.spans, k);

        if t >= 1.0 {
            self.active = None;
            return false;
        }
        true
    }

    fn apply<E: EditorPort>(editor: &mut E, spans: &[TweenSpan], k: f64) {
        let patches: Vec<(ShapeId, ShapePatch)> = spans
            .iter()
            .map(|s| {
                (
                    s.id,
                    ShapePatch {
                        x: Some(lerp(s.start_x, s.end_x, k)),
                        y: Some(lerp(s.start_y, s.end_y, k)),
                        props: Some(serde_json::json!({
                            "scale": lerp(s.start_scale, s.end_scale, k),
                        })),
                    },
                )
            })
            .collect();
        editor.update_shapes(&patches);
    }
}
