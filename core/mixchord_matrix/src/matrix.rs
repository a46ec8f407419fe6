use crate::classifier::CategoryClassifier;
use bincode::config::standard;
use bincode::{Decode, Encode};
use mixchord_traits::{Category, ChordError, ChordResult, IngredientIndex, Palette, Rgb};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upper bound on a baked matrix, both on disk and for any length it claims.
pub const MAX_BAKED_BYTES: usize = 64 * 1024 * 1024;

/// Rounded mean of the two directions of a pair, rounding halves up.
///
/// This is the only place where weights are rounded: `(3 + 4) / 2` gives 4.
/// The mean of two equal weights is the weight itself, which makes
/// [`WeightMatrix::symmetrize`] idempotent.
pub fn symmetric_average(a: u32, b: u32) -> u32 {
    ((a as u64 + b as u64 + 1) / 2) as u32
}

/// Dense square matrix of non-negative co-occurrence weights, row major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode)]
pub struct WeightMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl WeightMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn from_rows(rows: &[Vec<u32>]) -> ChordResult<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(ChordError::NotSquare {
                    rows: size,
                    columns: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.size + j]
    }

    pub fn set(&mut self, i: usize, j: usize, weight: u32) {
        self.cells[i * self.size + j] = weight;
    }

    pub fn row(&self, i: usize) -> &[u32] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn set_row(&mut self, i: usize, row: &[u32]) {
        self.cells[i * self.size..(i + 1) * self.size].copy_from_slice(row);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks(0) panics, an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Total connection weight of an ingredient.
    pub fn row_sum(&self, i: usize) -> u64 {
        self.row(i).iter().map(|&w| w as u64).sum()
    }

    pub fn max_weight(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn clear_diagonal(&mut self) {
        for i in 0..self.size {
            self.set(i, i, 0);
        }
    }

    /// Replaces both cells of every pair by their rounded mean.
    pub fn symmetrize(&mut self) {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let avg = symmetric_average(self.get(i, j), self.get(j, i));
                self.set(i, j, avg);
                self.set(j, i, avg);
            }
        }
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// Fails on the first name seen twice. Names are compared as given.
pub(crate) fn check_unique_names<S: AsRef<str>>(names: &[S]) -> ChordResult<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for (column, name) in names.iter().enumerate() {
        if let Some(&first) = seen.get(name.as_ref()) {
            return Err(ChordError::DuplicateIngredient {
                name: name.as_ref().to_string(),
                first,
                second: column,
            });
        }
        seen.insert(name.as_ref(), column);
    }
    Ok(())
}

/// The immutable co-occurrence model: ingredient names, their symmetric weight
/// matrix with an empty diagonal, one category per ingredient and the display
/// color of every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct IngredientMatrix {
    ingredients: Vec<String>,
    weights: WeightMatrix,
    categories: Vec<Category>,
    colors: Palette,
}

impl IngredientMatrix {
    /// Assembles a matrix, enforcing the invariants: unique names, square,
    /// zero diagonal and symmetric weights.
    pub fn new(
        ingredients: Vec<String>,
        mut weights: WeightMatrix,
        classifier: &CategoryClassifier,
        colors: Palette,
    ) -> ChordResult<Self> {
        check_unique_names(&ingredients)?;
        if weights.size() != ingredients.len() {
            return Err(ChordError::NotSquare {
                rows: ingredients.len(),
                columns: weights.size(),
            });
        }
        weights.clear_diagonal();
        weights.symmetrize();
        let categories = ingredients.iter().map(|name| classifier.classify(name)).collect();
        Ok(Self {
            ingredients,
            weights,
            categories,
            colors,
        })
    }

    /// Convenience constructor with the stock classifier and palette.
    pub fn from_rows(names: &[&str], rows: &[Vec<u32>]) -> ChordResult<Self> {
        check_unique_names(names)?;
        let weights = WeightMatrix::from_rows(rows)?;
        Self::new(
            names.iter().map(|n| n.to_string()).collect(),
            weights,
            &CategoryClassifier::default(),
            Palette::default(),
        )
    }

    pub fn empty(colors: Palette) -> Self {
        Self {
            ingredients: Vec::new(),
            weights: WeightMatrix::zeros(0),
            categories: Vec::new(),
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn name(&self, index: IngredientIndex) -> &str {
        &self.ingredients[index]
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn weight(&self, i: IngredientIndex, j: IngredientIndex) -> u32 {
        self.weights.get(i, j)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: IngredientIndex) -> Category {
        self.categories[index]
    }

    pub fn colors(&self) -> &Palette {
        &self.colors
    }

    /// Color of an ingredient, always derived from its stored category.
    pub fn color(&self, index: IngredientIndex) -> Rgb {
        self.colors.color(self.categories[index])
    }

    pub fn index_of(&self, name: &str) -> Option<IngredientIndex> {
        self.ingredients.iter().position(|n| n == name)
    }

    /// Exact lookup first, then an ASCII case-insensitive one.
    pub fn find(&self, name: &str) -> ChordResult<IngredientIndex> {
        self.index_of(name)
            .or_else(|| {
                self.ingredients
                    .iter()
                    .position(|n| n.eq_ignore_ascii_case(name.trim()))
            })
            .ok_or_else(|| ChordError::UnknownIngredient(name.to_string()))
    }

    /// Ingredients whose name contains `query`, case-insensitive, in
    /// declaration order. An empty query finds nothing.
    pub fn search(&self, query: &str) -> Vec<IngredientIndex> {
        if query.is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        self.ingredients
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn to_bytes(&self) -> ChordResult<Vec<u8>> {
        bincode::encode_to_vec(self, standard().with_limit::<MAX_BAKED_BYTES>())
            .map_err(|e| ChordError::Encode(e.to_string()))
    }

    /// Loads a matrix baked with [`IngredientMatrix::to_bytes`]. The invariants
    /// are checked again since the bytes may come from anywhere.
    pub fn from_bytes(bytes: &[u8]) -> ChordResult<Self> {
        if bytes.len() > MAX_BAKED_BYTES {
            return Err(ChordError::Decode(format!(
                "baked matrix of {} bytes is over the {MAX_BAKED_BYTES} bytes limit",
                bytes.len()
            )));
        }
        // the limit also bounds the lengths claimed inside the bytes
        let (matrix, _): (IngredientMatrix, usize) =
            bincode::decode_from_slice(bytes, standard().with_limit::<MAX_BAKED_BYTES>())
                .map_err(|e| ChordError::Decode(e.to_string()))?;
        check_unique_names(&matrix.ingredients)?;
        if matrix.weights.size() != matrix.ingredients.len()
            || matrix.categories.len() != matrix.ingredients.len()
            || matrix.weights.cells.len() != matrix.weights.size * matrix.weights.size
        {
            return Err(ChordError::Decode(
                "baked matrix dimensions do not agree".to_string(),
            ));
        }
        if !matrix.weights.is_symmetric() || (0..matrix.len()).any(|i| matrix.weight(i, i) != 0) {
            return Err(ChordError::Decode(
                "baked matrix is not symmetric with an empty diagonal".to_string(),
            ));
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(symmetric_average(3, 4), 4);
        assert_eq!(symmetric_average(0, 1), 1);
        assert_eq!(symmetric_average(2, 2), 2);
        assert_eq!(symmetric_average(0, 0), 0);
        assert_eq!(symmetric_average(u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = WeightMatrix::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, ChordError::NotSquare { rows: 2, columns: 1 }));
    }

    #[test]
    fn symmetrize_and_diagonal() {
        let mut m = WeightMatrix::from_rows(&[vec![7, 1, 0], vec![4, 3, 2], vec![0, 2, 9]]).unwrap();
        m.clear_diagonal();
        m.symmetrize();
        assert_eq!(m.to_rows(), vec![vec![0, 3, 0], vec![3, 0, 2], vec![0, 2, 0]]);
        assert!(m.is_symmetric());
        assert_eq!(m.row_sum(1), 5);
        assert_eq!(m.max_weight(), 3);
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let m = WeightMatrix::zeros(0);
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.max_weight(), 0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn ingredient_matrix_classifies_and_colors() {
        let m = IngredientMatrix::from_rows(
            &["Vodka", "Juice", "Mint"],
            &[vec![0, 5, 1], vec![5, 0, 3], vec![1, 3, 0]],
        )
        .unwrap();
        assert_eq!(m.categories(), &[Category::Alcoholic, Category::Nonalcoholic, Category::Spices]);
        assert_eq!(m.color(0), Palette::default().color(Category::Alcoholic));
        assert_eq!(m.find("mint").unwrap(), 2);
        assert!(matches!(m.find("Rum"), Err(ChordError::UnknownIngredient(_))));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = IngredientMatrix::from_rows(&["Gin", "Gin"], &[vec![0, 1], vec![1, 0]]).unwrap_err();
        assert!(matches!(err, ChordError::DuplicateIngredient { first: 0, second: 1, .. }));
    }

    #[test]
    fn bake_and_load() {
        let m = IngredientMatrix::from_rows(
            &["Gin", "Tonic water"],
            &[vec![0, 4], vec![2, 0]],
        )
        .unwrap();
        assert_eq!(m.weight(0, 1), 3);
        let bytes = m.to_bytes().unwrap();
        assert_eq!(IngredientMatrix::from_bytes(&bytes).unwrap(), m);
        assert!(IngredientMatrix::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn corrupt_lengths_are_refused() {
        // varint u64 marker then a length of 2^40 ingredient names
        let mut bytes = vec![0xFD];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        assert!(matches!(
            IngredientMatrix::from_bytes(&bytes),
            Err(ChordError::Decode(_))
        ));
    }

    #[test]
    fn search_is_a_case_insensitive_substring_filter() {
        let m = IngredientMatrix::from_rows(
            &["Lime Juice", "Gin", "Lime", "Sublime Syrup"],
            &[vec![0; 4], vec![0; 4], vec![0; 4], vec![0; 4]],
        )
        .unwrap();
        assert_eq!(m.search("LIME"), vec![0, 2, 3]);
        assert_eq!(m.search("gin"), vec![1]);
        assert!(m.search("").is_empty());
        assert!(m.search("rum").is_empty());
    }
}
