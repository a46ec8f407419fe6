//! The ingredient co-occurrence model.
//!
//! [`MatrixBuilder`] turns a delimited text table into an [`IngredientMatrix`]
//! whose weights are symmetric with a zero diagonal and where every
//! ingredient carries exactly one [`mixchord_traits::Category`] assigned by a
//! [`CategoryClassifier`].

mod builder;
mod classifier;
mod matrix;

pub use builder::{
    build_matrix, BuildDiagnostics, BuiltMatrix, MalformedRow, MatrixBuilder, RowDefect,
    SourceConfig,
};
pub use classifier::{default_named, default_rules, CategoryClassifier, KeywordRule};
pub use matrix::{symmetric_average, IngredientMatrix, WeightMatrix, MAX_BAKED_BYTES};
