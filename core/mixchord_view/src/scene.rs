use crate::encoder::{EncoderConfig, VisualAttributes, VisualEncoder};
use crate::filter::{Emphasis, FilterConfig, SelectionState};
use log::debug;
use mixchord_layout::{Chord, ChordLayout};
use mixchord_matrix::IngredientMatrix;
use mixchord_traits::{Category, ChordResult, IngredientIndex, Rgb};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub index: IngredientIndex,
    pub label: String,
    pub category: Category,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
    pub emphasis: Emphasis,
    pub attributes: VisualAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneChord {
    pub chord: Chord,
    pub emphasis: Emphasis,
    pub attributes: VisualAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCategoryArc {
    pub category: Category,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Everything a surface needs to draw the diagram: no geometry decision is
/// left to the renderer besides the radius.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordScene {
    pub selection: SelectionState,
    pub groups: Vec<SceneGroup>,
    /// Hidden chords are left out; dimmed chords come first so that primary
    /// chords are painted over them.
    pub chords: Vec<SceneChord>,
    pub category_arcs: Vec<SceneCategoryArc>,
}

impl ChordScene {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn primary_chords(&self) -> impl Iterator<Item = &SceneChord> {
        self.chords.iter().filter(|c| c.emphasis == Emphasis::Primary)
    }
}

/// A drawing surface (SVG, canvas, terminal...). Every surface consumes the
/// same scene.
pub trait Renderer {
    type Output;

    fn render(&mut self, scene: &ChordScene) -> ChordResult<Self::Output>;
}

pub fn compose_scene(
    matrix: &IngredientMatrix,
    layout: &ChordLayout,
    selection: &SelectionState,
    filter: FilterConfig,
    encoder: EncoderConfig,
) -> ChordScene {
    let encoder = VisualEncoder::new(layout, matrix.colors(), filter, encoder);
    let view = encoder.filter().classify(selection);

    let groups = layout
        .groups
        .iter()
        .zip(&view.groups)
        .filter_map(|(group, &emphasis)| {
            let attributes = encoder.encode_group(group, selection)?;
            Some(SceneGroup {
                index: group.index,
                label: matrix.name(group.index).to_string(),
                category: group.category,
                start_angle: group.start_angle,
                end_angle: group.end_angle,
                color: matrix.colors().color(group.category),
                emphasis,
                attributes,
            })
        })
        .collect();

    let mut chords: Vec<SceneChord> = layout
        .chords
        .iter()
        .zip(&view.chords)
        .filter_map(|(chord, &emphasis)| {
            let attributes = encoder.encode_chord(chord, selection)?;
            Some(SceneChord {
                chord: *chord,
                emphasis,
                attributes,
            })
        })
        .collect();
    chords.sort_by_key(|c| c.emphasis);

    let category_arcs = layout
        .category_arcs
        .iter()
        .map(|arc| SceneCategoryArc {
            category: arc.category,
            start_angle: arc.start_angle,
            end_angle: arc.end_angle,
            color: matrix.colors().color(arc.category),
            opacity: encoder.category_arc_opacity(arc, selection),
        })
        .collect();

    debug!(
        "Composed scene: {} of {} chords drawn",
        chords.len(),
        layout.chords.len()
    );
    ChordScene {
        selection: *selection,
        groups,
        chords,
        category_arcs,
    }
}
