use crate::config::LayoutConfig;
use crate::layout::{ChordLayout, ChordLayoutEngine};
use log::debug;
use mixchord_matrix::IngredientMatrix;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    fingerprint: u64,
    config: LayoutConfig,
}

impl LayoutKey {
    fn new(matrix: &IngredientMatrix, config: &LayoutConfig) -> Self {
        let mut hasher = DefaultHasher::new();
        matrix.ingredients().hash(&mut hasher);
        matrix.weights().hash(&mut hasher);
        matrix.categories().hash(&mut hasher);
        Self {
            fingerprint: hasher.finish(),
            config: config.clone(),
        }
    }
}

/// Remembers the last layout computed, keyed by matrix contents and config.
/// Selection changes re-run the filter on every interaction, the layout only
/// changes with the data or the config.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(LayoutKey, ChordLayout)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, matrix: &IngredientMatrix, config: &LayoutConfig) -> &ChordLayout {
        let key = LayoutKey::new(matrix, config);
        if matches!(&self.entry, Some((cached, _)) if *cached == key) {
            self.hits += 1;
            debug!("Layout cache hit ({} hits so far)", self.hits);
        } else {
            self.entry = None;
        }
        let (_, layout) = self.entry.get_or_insert_with(|| {
            self.misses += 1;
            (key, ChordLayoutEngine::new(config.clone()).layout(matrix))
        });
        layout
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
