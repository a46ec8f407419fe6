//! From a [`mixchord_layout::ChordLayout`] and the current selection to what
//! a surface draws: which chords are primary, dimmed or hidden, their
//! opacity, stroke width and gradient, gathered in a [`ChordScene`] that any
//! [`Renderer`] consumes.

mod encoder;
mod filter;
mod scene;

pub use encoder::{
    opacity, EncodeItem, EncoderConfig, GradientStop, VisualAttributes, VisualEncoder,
    DEFAULT_MAX_STROKE_WIDTH, DEFAULT_MIN_STROKE_WIDTH, DIMMED_OPACITY, EVEN_SPLIT,
    NEUTRAL_OPACITY, PRIMARY_OPACITY, SOURCE_BIASED_SPLIT, TARGET_BIASED_SPLIT,
};
pub use filter::{
    visible_chords, Emphasis, FilterConfig, FilteredView, SelectionFilter, SelectionState,
    DEFAULT_MIN_WEIGHT_THRESHOLD,
};
pub use scene::{
    compose_scene, ChordScene, Renderer, SceneCategoryArc, SceneChord, SceneGroup,
};
