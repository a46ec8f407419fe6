use crate::filter::{Emphasis, FilterConfig, SelectionFilter, SelectionState};
use mixchord_layout::{CategoryArc, Chord, ChordLayout, Group};
use mixchord_traits::{Palette, Rgb};
use serde::{Deserialize, Serialize};

/// Opacity of highlighted items while something is selected.
pub const PRIMARY_OPACITY: f64 = 0.9;
/// Opacity of visible items while nothing is selected.
pub const NEUTRAL_OPACITY: f64 = 0.6;
/// Opacity of items outside the selection.
pub const DIMMED_OPACITY: f64 = 0.1;

pub const DEFAULT_MIN_STROKE_WIDTH: f64 = 0.5;
pub const DEFAULT_MAX_STROKE_WIDTH: f64 = 4.0;

/// Position of the source/target blend along a ribbon gradient.
pub const EVEN_SPLIT: f64 = 0.5;
/// The selected category is the source: the source color dominates.
pub const SOURCE_BIASED_SPLIT: f64 = 0.75;
/// The selected category is the target: the target color dominates.
pub const TARGET_BIASED_SPLIT: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Lower clamp so light chords stay perceptible.
    pub min_stroke_width: f64,
    /// Width of the heaviest item.
    pub max_stroke_width: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            min_stroke_width: DEFAULT_MIN_STROKE_WIDTH,
            max_stroke_width: DEFAULT_MAX_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// 0 at the source end, 1 at the target end.
    pub offset: f64,
    pub color: Rgb,
}

/// Render-ready attributes of one chord or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAttributes {
    pub opacity: f64,
    pub stroke_width: f64,
    pub gradient: Vec<GradientStop>,
}

#[derive(Debug, Clone, Copy)]
pub enum EncodeItem<'a> {
    Chord(&'a Chord),
    Group(&'a Group),
}

/// Maps chords and groups plus a selection to [`VisualAttributes`].
#[derive(Debug, Clone)]
pub struct VisualEncoder<'a> {
    filter: SelectionFilter<'a>,
    palette: &'a Palette,
    config: EncoderConfig,
    max_chord_weight: u32,
    max_group_value: u64,
}

impl<'a> VisualEncoder<'a> {
    pub fn new(
        layout: &'a ChordLayout,
        palette: &'a Palette,
        filter: FilterConfig,
        config: EncoderConfig,
    ) -> Self {
        Self {
            filter: SelectionFilter::new(layout, filter),
            palette,
            config,
            max_chord_weight: layout.max_chord_weight(),
            max_group_value: layout.max_group_value(),
        }
    }

    pub fn filter(&self) -> &SelectionFilter<'a> {
        &self.filter
    }

    /// `None` for hidden items.
    pub fn encode(&self, item: EncodeItem<'_>, selection: &SelectionState) -> Option<VisualAttributes> {
        match item {
            EncodeItem::Chord(chord) => self.encode_chord(chord, selection),
            EncodeItem::Group(group) => self.encode_group(group, selection),
        }
    }

    pub fn encode_chord(&self, chord: &Chord, selection: &SelectionState) -> Option<VisualAttributes> {
        let emphasis = self.filter.chord_emphasis(chord, selection);
        let opacity = opacity(emphasis, selection)?;
        let layout = self.filter.layout();
        let source = layout.category_of(chord.source.index)?;
        let target = layout.category_of(chord.target.index)?;
        let source_color = self.palette.color(source);
        let target_color = self.palette.color(target);
        let split = match selection.category {
            None => EVEN_SPLIT,
            Some(selected) => match (source == selected, target == selected) {
                (true, false) => SOURCE_BIASED_SPLIT,
                (false, true) => TARGET_BIASED_SPLIT,
                // both ends or neither end in the category
                _ => EVEN_SPLIT,
            },
        };
        Some(VisualAttributes {
            opacity,
            stroke_width: self.stroke_width(chord.weight() as f64, self.max_chord_weight as f64),
            gradient: vec![
                GradientStop {
                    offset: 0.0,
                    color: source_color,
                },
                GradientStop {
                    offset: split,
                    color: source_color.lerp(target_color, 0.5),
                },
                GradientStop {
                    offset: 1.0,
                    color: target_color,
                },
            ],
        })
    }

    pub fn encode_group(&self, group: &Group, selection: &SelectionState) -> Option<VisualAttributes> {
        let emphasis = self.filter.group_emphasis(group.index, selection);
        let color = self.palette.color(group.category);
        Some(VisualAttributes {
            opacity: opacity(emphasis, selection)?,
            stroke_width: self.stroke_width(group.value as f64, self.max_group_value as f64),
            gradient: vec![
                GradientStop { offset: 0.0, color },
                GradientStop { offset: 1.0, color },
            ],
        })
    }

    /// Category ring opacity: the selected category (or the category of the
    /// selected ingredient) stands out, other categories are dimmed only when a
    /// category is selected.
    pub fn category_arc_opacity(&self, arc: &CategoryArc, selection: &SelectionState) -> f64 {
        let layout = self.filter.layout();
        match (selection.category, selection.ingredient) {
            (Some(category), _) if category == arc.category => PRIMARY_OPACITY,
            (Some(_), _) => DIMMED_OPACITY,
            (None, Some(index)) if layout.category_of(index) == Some(arc.category) => PRIMARY_OPACITY,
            (None, _) => NEUTRAL_OPACITY,
        }
    }

    /// Proportional to `value / max`, never below the configured minimum.
    pub fn stroke_width(&self, value: f64, max: f64) -> f64 {
        let ratio = if max > 0.0 { value / max } else { 0.0 };
        (self.config.max_stroke_width * ratio).max(self.config.min_stroke_width)
    }
}

/// Opacity tier of an emphasis, `None` when hidden.
pub fn opacity(emphasis: Emphasis, selection: &SelectionState) -> Option<f64> {
    match emphasis {
        Emphasis::Hidden => None,
        Emphasis::Dimmed => Some(DIMMED_OPACITY),
        Emphasis::Primary if selection.is_empty() => Some(NEUTRAL_OPACITY),
        Emphasis::Primary => Some(PRIMARY_OPACITY),
    }
}
