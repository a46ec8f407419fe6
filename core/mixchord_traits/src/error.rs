use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    #[error("Ingredient '{name}' is declared twice (columns {first} and {second})")]
    DuplicateIngredient {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Ingredient name in header column {column} is empty")]
    EmptyIngredientName { column: usize },

    #[error("Matrix is not square: {rows} rows but a row of {columns} columns")]
    NotSquare { rows: usize, columns: usize },

    #[error("Ingredient '{0}' does not exist")]
    UnknownIngredient(String),

    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),

    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("Rendering error: {0}")]
    Render(String),
}

impl ChordError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChordError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Generic Result type for mixchord.
pub type ChordResult<T> = Result<T, ChordError>;
