use mixchord_layout::{Chord, ChordLayout};
use mixchord_traits::{Category, IngredientIndex};
use serde::{Deserialize, Serialize};

/// Chords at or below this weight are hidden while nothing is selected.
pub const DEFAULT_MIN_WEIGHT_THRESHOLD: u32 = 1;

/// What the user currently focuses on. Both parts are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    pub ingredient: Option<IngredientIndex>,
    pub category: Option<Category>,
}

impl SelectionState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ingredient(index: IngredientIndex) -> Self {
        Self {
            ingredient: Some(index),
            category: None,
        }
    }

    pub fn category(category: Category) -> Self {
        Self {
            ingredient: None,
            category: Some(category),
        }
    }

    pub fn with_ingredient(mut self, index: Option<IngredientIndex>) -> Self {
        self.ingredient = index;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ingredient.is_none() && self.category.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_weight_threshold: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_weight_threshold: DEFAULT_MIN_WEIGHT_THRESHOLD,
        }
    }
}

/// How prominently an item is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Emphasis {
    /// Not drawn at all.
    Hidden,
    /// Drawn faintly to keep the spatial context.
    Dimmed,
    Primary,
}

/// Emphasis of every chord and group of a layout for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredView {
    /// Parallel to `ChordLayout::chords`.
    pub chords: Vec<Emphasis>,
    /// Parallel to `ChordLayout::groups`.
    pub groups: Vec<Emphasis>,
}

/// Decides, for a given selection, which chords are primary, dimmed or hidden.
///
/// - nothing selected: chords heavier than the threshold are primary, the
///   others are hidden,
/// - only a category: chords touching the category are primary whatever their
///   weight, the others dimmed,
/// - an ingredient: chords touching it are primary, restricted to partners of
///   the selected category when there is one; the others are dimmed.
#[derive(Debug, Clone)]
pub struct SelectionFilter<'a> {
    layout: &'a ChordLayout,
    config: FilterConfig,
}

impl<'a> SelectionFilter<'a> {
    pub fn new(layout: &'a ChordLayout, config: FilterConfig) -> Self {
        Self { layout, config }
    }

    pub fn layout(&self) -> &'a ChordLayout {
        self.layout
    }

    pub fn chord_emphasis(&self, chord: &Chord, selection: &SelectionState) -> Emphasis {
        match (selection.ingredient, selection.category) {
            (None, None) => {
                if chord.weight() > self.config.min_weight_threshold {
                    Emphasis::Primary
                } else {
                    Emphasis::Hidden
                }
            }
            (None, Some(category)) => {
                let touches = [chord.source.index, chord.target.index]
                    .iter()
                    .any(|&i| self.layout.category_of(i) == Some(category));
                if touches {
                    Emphasis::Primary
                } else {
                    Emphasis::Dimmed
                }
            }
            (Some(selected), category) => match (chord.other(selected), category) {
                (None, _) => Emphasis::Dimmed,
                (Some(_), None) => Emphasis::Primary,
                (Some(partner), Some(category)) => {
                    if self.layout.category_of(partner) == Some(category) {
                        Emphasis::Primary
                    } else {
                        Emphasis::Dimmed
                    }
                }
            },
        }
    }

    /// Groups are never hidden.
    pub fn group_emphasis(&self, index: IngredientIndex, selection: &SelectionState) -> Emphasis {
        match (selection.ingredient, selection.category) {
            (None, None) => Emphasis::Primary,
            (None, Some(category)) => {
                if self.layout.category_of(index) == Some(category) {
                    Emphasis::Primary
                } else {
                    Emphasis::Dimmed
                }
            }
            (Some(selected), _) => {
                let linked = index == selected
                    || self.layout.chords.iter().any(|c| {
                        c.other(selected) == Some(index)
                            && self.chord_emphasis(c, selection) == Emphasis::Primary
                    });
                if linked {
                    Emphasis::Primary
                } else {
                    Emphasis::Dimmed
                }
            }
        }
    }

    pub fn classify(&self, selection: &SelectionState) -> FilteredView {
        FilteredView {
            chords: self
                .layout
                .chords
                .iter()
                .map(|c| self.chord_emphasis(c, selection))
                .collect(),
            groups: (0..self.layout.groups.len())
                .map(|i| self.group_emphasis(i, selection))
                .collect(),
        }
    }

    /// The primary chords, in layout order.
    pub fn visible_chords(&self, selection: &SelectionState) -> Vec<&'a Chord> {
        self.layout
            .chords
            .iter()
            .filter(|c| self.chord_emphasis(c, selection) == Emphasis::Primary)
            .collect()
    }
}

/// Primary chords of `layout` for `selection` with the given weight threshold.
pub fn visible_chords<'a>(
    layout: &'a ChordLayout,
    selection: &SelectionState,
    min_weight_threshold: u32,
) -> Vec<&'a Chord> {
    SelectionFilter::new(layout, FilterConfig { min_weight_threshold }).visible_chords(selection)
}
