//! A chord diagram session: one matrix, one configuration and the selection
//! the user is currently exploring.

use crate::config::MixChordConfig;
use log::{debug, info};
use mixchord_layout::{Chord, ChordLayout, LayoutCache};
use mixchord_matrix::{BuildDiagnostics, IngredientMatrix};
use mixchord_traits::{Category, ChordResult, IngredientIndex};
use mixchord_view::{compose_scene, visible_chords, ChordScene, SelectionState};

pub struct ChordSession {
    config: MixChordConfig,
    matrix: IngredientMatrix,
    diagnostics: BuildDiagnostics,
    cache: LayoutCache,
    selection: SelectionState,
}

impl ChordSession {
    /// Builds the matrix from a raw table with the source, classifier and
    /// palette sections of `config`.
    pub fn from_raw(raw: &str, config: MixChordConfig) -> ChordResult<Self> {
        let built = config.matrix_builder().build(raw)?;
        let mut session = Self::from_matrix(built.matrix, config);
        session.diagnostics = built.diagnostics;
        Ok(session)
    }

    /// Wraps an already built matrix, which keeps its own categories and
    /// colors.
    pub fn from_matrix(matrix: IngredientMatrix, config: MixChordConfig) -> Self {
        info!("New session over {} ingredients", matrix.len());
        Self {
            config,
            matrix,
            diagnostics: BuildDiagnostics::default(),
            cache: LayoutCache::new(),
            selection: SelectionState::none(),
        }
    }

    /// Loads a matrix baked with [`IngredientMatrix::to_bytes`].
    pub fn from_baked(bytes: &[u8], config: MixChordConfig) -> ChordResult<Self> {
        Ok(Self::from_matrix(IngredientMatrix::from_bytes(bytes)?, config))
    }

    pub fn config(&self) -> &MixChordConfig {
        &self.config
    }

    pub fn matrix(&self) -> &IngredientMatrix {
        &self.matrix
    }

    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.diagnostics
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Replaces the matrix; the layout is recomputed on next use.
    pub fn set_matrix(&mut self, matrix: IngredientMatrix) {
        self.matrix = matrix;
        self.diagnostics = BuildDiagnostics::default();
        self.selection = SelectionState::none();
    }

    pub fn set_config(&mut self, config: MixChordConfig) {
        self.config = config;
    }

    /// Selects an ingredient by exact name, falling back to a case
    /// insensitive match. The category selection is kept.
    pub fn select_ingredient(&mut self, name: &str) -> ChordResult<IngredientIndex> {
        let index = self.matrix.find(name)?;
        debug!("Selected ingredient {index} ({})", self.matrix.name(index));
        self.selection = self.selection.with_ingredient(Some(index));
        Ok(index)
    }

    /// Ingredients whose name contains `query`, ignoring case, in
    /// declaration order. Leaves the selection alone.
    pub fn search(&self, query: &str) -> Vec<IngredientIndex> {
        self.matrix.search(query)
    }

    pub fn select_category(&mut self, category: Category) {
        debug!("Selected category {category}");
        self.selection = self.selection.with_category(Some(category));
    }

    pub fn set_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::none();
    }

    pub fn layout(&mut self) -> &ChordLayout {
        self.cache.get_or_compute(&self.matrix, &self.config.layout)
    }

    /// Chords drawn as primary for the current selection.
    pub fn visible_chords(&mut self) -> Vec<Chord> {
        let threshold = self.config.filter.min_weight_threshold;
        let layout = self.cache.get_or_compute(&self.matrix, &self.config.layout);
        visible_chords(layout, &self.selection, threshold)
            .into_iter()
            .copied()
            .collect()
    }

    pub fn scene(&mut self) -> ChordScene {
        let layout = self.cache.get_or_compute(&self.matrix, &self.config.layout);
        compose_scene(
            &self.matrix,
            layout,
            &self.selection,
            self.config.filter.clone(),
            self.config.encoder.clone(),
        )
    }

    pub fn layout_cache(&self) -> &LayoutCache {
        &self.cache
    }
}
