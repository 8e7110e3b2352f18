//! The built-in CBT "Emotions Map": a mandala for exploring a topic across
//! past, future, and present, with observable experiences in the outer ring,
//! beliefs in the inner ring, and supporting evidence collected at the hub.

#[cfg(test)]
#[path = "emotions_map_test.rs"]
mod emotions_map_test;

use crate::map::{CellDef, CenterDef, MapDefinition, SliceDef};

/// Radius of the central evidence circle, as a fraction of the outer radius.
const CENTER_RATIO: f64 = 0.3;
/// Boundary between the beliefs ring and the experiences ring.
const RING_SPLIT_RATIO: f64 = 0.65;

/// Build the Emotions Map definition. Construct once at startup; the result
/// always satisfies [`MapDefinition::validate`].
#[must_use]
pub fn emotions_map() -> MapDefinition {
    MapDefinition {
        id: "emotions-map".into(),
        name: "Emotions Map".into(),
        description: "A therapeutic mandala for exploring emotions across past, present, \
                      and future, through lived experiences, beliefs, and evidence."
            .into(),
        center: CenterDef {
            id: "evidence".into(),
            label: "Evidence".into(),
            radius_ratio: CENTER_RATIO,
            question: "What evidence supports or contradicts the beliefs around this circle?"
                .into(),
            guidance: "Encourage objective evaluation. Look for both confirming and \
                       disconfirming evidence, and connect it back to specific beliefs."
                .into(),
            examples: vec![
                "My friend stayed by my side through it all".into(),
                "I handled a difficult situation well last week".into(),
                "My colleagues gave me positive feedback".into(),
            ],
        },
        slices: vec![
            SliceDef {
                id: "past".into(),
                label: "Past".into(),
                start_angle: 150.0,
                end_angle: 270.0,
                cells: vec![
                    events_cell(
                        "past",
                        "What significant events happened in your past related to this topic?",
                        "Help the user recall concrete events without judgment. Focus on \
                         observable facts and how they reacted at the time.",
                        &[
                            "I lost my job last year",
                            "My parents divorced when I was 10",
                            "I withdrew from friends",
                        ],
                    ),
                    beliefs_cell(
                        "past",
                        "What beliefs about yourself or the world formed from those experiences?",
                        "Identify core beliefs. These often start with \"I am...\", \
                         \"People are...\", \"The world is...\".",
                        &[
                            "I believed I was unlovable",
                            "I thought success required suffering",
                            "I felt the world was unsafe",
                        ],
                    ),
                ],
            },
            SliceDef {
                id: "future".into(),
                label: "Future".into(),
                start_angle: 30.0,
                end_angle: 150.0,
                cells: vec![
                    events_cell(
                        "future",
                        "What events or changes do you anticipate or hope for in the future?",
                        "Explore aspirations and fears about the future. Keep it concrete \
                         and connect desired behaviors to current patterns.",
                        &[
                            "I want to build a stable career",
                            "I hope to have a family",
                            "I plan to practice self-care regularly",
                        ],
                    ),
                    beliefs_cell(
                        "future",
                        "What beliefs would you like to hold about yourself and your future?",
                        "Help formulate empowering but authentic beliefs. Build on present \
                         evidence rather than idealized thinking.",
                        &[
                            "I want to believe I am resilient",
                            "I would like to trust that I am enough",
                            "I want to believe in my capacity to grow",
                        ],
                    ),
                ],
            },
            SliceDef {
                id: "present".into(),
                label: "Present".into(),
                start_angle: 270.0,
                end_angle: 30.0,
                cells: vec![
                    events_cell(
                        "present",
                        "What is currently happening in your life related to this topic?",
                        "Ground the user in the present moment. Focus on current \
                         circumstances and notice if past patterns are repeating.",
                        &[
                            "I am starting a new relationship",
                            "I just got promoted at work",
                            "I am seeking help for the first time",
                        ],
                    ),
                    beliefs_cell(
                        "present",
                        "What do you currently believe about yourself and this situation?",
                        "Explore how beliefs may have evolved. Notice any cognitive \
                         dissonance between old beliefs and new experiences.",
                        &[
                            "I am starting to believe I deserve good things",
                            "I still struggle with feeling worthy",
                            "I believe change is possible",
                        ],
                    ),
                ],
            },
        ],
    }
}

fn events_cell(slice: &str, question: &str, guidance: &str, examples: &[&str]) -> CellDef {
    CellDef {
        id: format!("{slice}-events"),
        label: "Events".into(),
        inner_ratio: RING_SPLIT_RATIO,
        outer_ratio: 1.0,
        question: question.into(),
        guidance: guidance.into(),
        examples: examples.iter().map(|&s| s.into()).collect(),
    }
}

fn beliefs_cell(slice: &str, question: &str, guidance: &str, examples: &[&str]) -> CellDef {
    CellDef {
        id: format!("{slice}-beliefs"),
        label: "Beliefs".into(),
        inner_ratio: CENTER_RATIO,
        outer_ratio: RING_SPLIT_RATIO,
        question: question.into(),
        guidance: guidance.into(),
        examples: examples.iter().map(|&s| s.into()).collect(),
    }
}
