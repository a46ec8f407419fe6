//! Parsing of the delimited co-occurrence table.
//!
//! The first non blank line is the header and defines the ingredient order.
//! Data rows come in one of two shapes:
//! - a single row of counts against a fixed reference, which becomes the row
//!   of every ingredient,
//! - up to N rows of pairwise counts, assigned to ingredients in order (or by
//!   their leading label when the table carries row labels).
//!
//! Rows that do not fit are skipped and reported, never fatal.

use crate::classifier::CategoryClassifier;
use crate::matrix::{check_unique_names, IngredientMatrix, WeightMatrix};
use log::{debug, info, warn};
use mixchord_traits::{ChordError, ChordResult, Palette};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How the raw table is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub delimiter: char,
    /// The first header cell is a corner label and every data row starts with
    /// the name of the ingredient it belongs to.
    pub row_labels: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            row_labels: false,
        }
    }
}

/// Why a data row was left out of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowDefect {
    ColumnCount { expected: usize, found: usize },
    InvalidWeight { column: usize, token: String },
    UnknownLabel(String),
    DuplicateLabel(String),
    /// More data rows than ingredients.
    ExtraRow,
}

impl Display for RowDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RowDefect::ColumnCount { expected, found } => {
                write!(f, "expected {expected} values, found {found}")
            }
            RowDefect::InvalidWeight { column, token } => {
                write!(f, "'{token}' in column {column} is not a non-negative integer")
            }
            RowDefect::UnknownLabel(label) => write!(f, "unknown row label '{label}'"),
            RowDefect::DuplicateLabel(label) => write!(f, "row label '{label}' seen twice"),
            RowDefect::ExtraRow => write!(f, "more data rows than ingredients"),
        }
    }
}

/// A skipped data row. `line` is 1-based in the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedRow {
    pub line: usize,
    pub defect: RowDefect,
}

/// Non fatal findings of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostics {
    /// Data rows that made it into the matrix.
    pub data_rows: usize,
    pub skipped: Vec<MalformedRow>,
}

impl BuildDiagnostics {
    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }

    fn skip(&mut self, line: usize, defect: RowDefect) {
        warn!("Skipping malformed row at line {line}: {defect}");
        self.skipped.push(MalformedRow { line, defect });
    }
}

#[derive(Debug, Clone)]
pub struct BuiltMatrix {
    pub matrix: IngredientMatrix,
    pub diagnostics: BuildDiagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    classifier: CategoryClassifier,
    palette: Palette,
    source: SourceConfig,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(mut self, classifier: CategoryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    pub fn build(&self, raw: &str) -> ChordResult<BuiltMatrix> {
        let delimiter = self.source.delimiter;
        let mut lines = raw
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            debug!("Empty matrix source, building an empty matrix");
            return Ok(BuiltMatrix {
                matrix: IngredientMatrix::empty(self.palette.clone()),
                diagnostics: BuildDiagnostics::default(),
            });
        };

        let mut names: Vec<&str> = header.split(delimiter).map(str::trim).collect();
        if self.source.row_labels {
            names.remove(0);
        }
        if let Some(column) = names.iter().position(|name| name.is_empty()) {
            return Err(ChordError::EmptyIngredientName { column });
        }
        check_unique_names(&names)?;
        let n = names.len();

        let mut diagnostics = BuildDiagnostics::default();
        let mut positional: Vec<(usize, Vec<u32>)> = Vec::new();
        let mut labelled: Vec<Option<Vec<u32>>> = vec![None; n];

        for (index, line) in lines {
            let line_no = index + 1;
            let mut tokens: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            let label = if self.source.row_labels {
                Some(tokens.remove(0))
            } else {
                None
            };
            if tokens.len() != n {
                diagnostics.skip(
                    line_no,
                    RowDefect::ColumnCount {
                        expected: n,
                        found: tokens.len(),
                    },
                );
                continue;
            }
            let row = match parse_weights(&tokens) {
                Ok(row) => row,
                Err(defect) => {
                    diagnostics.skip(line_no, defect);
                    continue;
                }
            };
            match label {
                None => positional.push((line_no, row)),
                Some(label) => match names.iter().position(|name| *name == label) {
                    None => diagnostics.skip(line_no, RowDefect::UnknownLabel(label.to_string())),
                    Some(i) if labelled[i].is_some() => {
                        diagnostics.skip(line_no, RowDefect::DuplicateLabel(label.to_string()))
                    }
                    Some(i) => labelled[i] = Some(row),
                },
            }
        }

        let mut weights = WeightMatrix::zeros(n);
        if self.source.row_labels {
            for (i, row) in labelled.iter().enumerate() {
                if let Some(row) = row {
                    weights.set_row(i, row);
                    diagnostics.data_rows += 1;
                }
            }
        } else if positional.len() == 1 {
            // reference profile: every ingredient gets the same counts
            let (_, profile) = &positional[0];
            for i in 0..n {
                weights.set_row(i, profile);
            }
            diagnostics.data_rows = 1;
        } else {
            for (k, (line_no, row)) in positional.into_iter().enumerate() {
                if k < n {
                    weights.set_row(k, &row);
                    diagnostics.data_rows += 1;
                } else {
                    diagnostics.skip(line_no, RowDefect::ExtraRow);
                }
            }
        }

        let matrix = IngredientMatrix::new(
            names.iter().map(|name| name.to_string()).collect(),
            weights,
            &self.classifier,
            self.palette.clone(),
        )?;
        info!(
            "Built a {n}x{n} ingredient matrix from {} data rows ({} skipped)",
            diagnostics.data_rows,
            diagnostics.skipped_rows()
        );
        Ok(BuiltMatrix {
            matrix,
            diagnostics,
        })
    }
}

/// Builds with the stock classifier, palette and a comma delimiter.
pub fn build_matrix(raw: &str) -> ChordResult<BuiltMatrix> {
    MatrixBuilder::new().build(raw)
}

fn parse_weights(tokens: &[&str]) -> Result<Vec<u32>, RowDefect> {
    tokens
        .iter()
        .enumerate()
        .map(|(column, token)| {
            if token.is_empty() {
                Ok(0)
            } else {
                token.parse::<u32>().map_err(|_| RowDefect::InvalidWeight {
                    column,
                    token: token.to_string(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixchord_traits::Category;

    #[test]
    fn full_table() {
        let built = build_matrix("Vodka,Juice,Mint\n0,5,1\n5,0,3\n1,3,0\n").unwrap();
        let m = &built.matrix;
        assert_eq!(m.ingredients(), &["Vodka", "Juice", "Mint"]);
        assert_eq!(m.weights().to_rows(), vec![vec![0, 5, 1], vec![5, 0, 3], vec![1, 3, 0]]);
        assert_eq!(built.diagnostics.data_rows, 3);
        assert_eq!(built.diagnostics.skipped_rows(), 0);
    }

    #[test]
    fn single_profile_row_is_broadcast() {
        let built = build_matrix("Gin,Lime,Sugar\n2,4,0").unwrap();
        // every row is [2,4,0] before the diagonal is cleared and averaged
        assert_eq!(
            built.matrix.weights().to_rows(),
            vec![vec![0, 3, 1], vec![3, 0, 2], vec![1, 2, 0]]
        );
        assert_eq!(built.diagnostics.data_rows, 1);
    }

    #[test]
    fn skips_short_row_and_reports_it() {
        let raw = "Gin,Vodka,Lime,Mint\n0,1,2,3\n1,2,3\n";
        let built = build_matrix(raw).unwrap();
        assert_eq!(built.diagnostics.skipped_rows(), 1);
        assert_eq!(
            built.diagnostics.skipped[0],
            MalformedRow {
                line: 3,
                defect: RowDefect::ColumnCount {
                    expected: 4,
                    found: 3
                }
            }
        );
        let w = built.matrix.weights();
        assert_eq!(w.size(), 4);
        assert!(w.is_symmetric());
        assert!((0..4).all(|i| w.get(i, i) == 0));
    }

    #[test]
    fn invalid_tokens_skip_the_row() {
        let raw = "A,B\n0,x\n0,-1\n0,2\n2,0";
        let built = build_matrix(raw).unwrap();
        assert_eq!(built.diagnostics.skipped_rows(), 2);
        assert!(matches!(
            &built.diagnostics.skipped[0].defect,
            RowDefect::InvalidWeight { column: 1, token } if token == "x"
        ));
        assert_eq!(built.matrix.weight(0, 1), 2);
    }

    #[test]
    fn empty_cells_are_zero_filled() {
        let built = build_matrix("A,B,C\n,2,\n2,,\n,,").unwrap();
        assert_eq!(built.matrix.weight(0, 1), 2);
        assert_eq!(built.matrix.weight(0, 2), 0);
        assert_eq!(built.diagnostics.skipped_rows(), 0);
    }

    #[test]
    fn extra_rows_are_skipped() {
        let built = build_matrix("A,B\n0,1\n1,0\n0,9").unwrap();
        assert_eq!(built.diagnostics.skipped_rows(), 1);
        assert_eq!(built.diagnostics.skipped[0].defect, RowDefect::ExtraRow);
        assert_eq!(built.matrix.weight(0, 1), 1);
    }

    #[test]
    fn duplicate_header_is_fatal() {
        let err = build_matrix("Gin,Vodka,Gin\n0,1,2").unwrap_err();
        assert!(matches!(
            err,
            ChordError::DuplicateIngredient { ref name, first: 0, second: 2 } if name == "Gin"
        ));
    }

    #[test]
    fn names_are_case_sensitive() {
        let built = build_matrix("gin,Gin\n0,1\n1,0").unwrap();
        assert_eq!(built.matrix.len(), 2);
    }

    #[test]
    fn empty_header_cell_is_fatal() {
        let err = build_matrix("Gin,,Lime\n").unwrap_err();
        assert!(matches!(err, ChordError::EmptyIngredientName { column: 1 }));
    }

    #[test]
    fn empty_source_gives_empty_matrix() {
        let built = build_matrix("\n  \n").unwrap();
        assert!(built.matrix.is_empty());
        assert_eq!(built.diagnostics, BuildDiagnostics::default());
    }

    #[test]
    fn labelled_rows_and_custom_delimiter() {
        let raw = "source;vodka;lime juice;mint\n\
                   mint;0;1;0\n\
                   vodka;0;1;0\n\
                   rum;1;1;1\n\
                   vodka;0;0;0\n";
        let built = MatrixBuilder::new()
            .with_source(SourceConfig {
                delimiter: ';',
                row_labels: true,
            })
            .build(raw)
            .unwrap();
        let m = &built.matrix;
        assert_eq!(m.ingredients(), &["vodka", "lime juice", "mint"]);
        assert_eq!(m.category(1), Category::Nonalcoholic);
        assert_eq!(built.diagnostics.data_rows, 2);
        assert_eq!(built.diagnostics.skipped_rows(), 2);
        assert_eq!(
            built.diagnostics.skipped[0].defect,
            RowDefect::UnknownLabel("rum".to_string())
        );
        assert_eq!(
            built.diagnostics.skipped[1].defect,
            RowDefect::DuplicateLabel("vodka".to_string())
        );
        // vodka -> lime juice is 1 one way and 0 the other, rounded up
        assert_eq!(m.weight(0, 1), 1);
        // mint -> lime juice is 1 one way only
        assert_eq!(m.weight(2, 1), 1);
        assert_eq!(m.weight(0, 2), 0);
    }

    #[test]
    fn windows_line_endings() {
        let built = build_matrix("A,B\r\n0,3\r\n3,0\r\n").unwrap();
        assert_eq!(built.matrix.weight(1, 0), 3);
    }
}
