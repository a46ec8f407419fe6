//! Types shared by every mixchord crate: the error type, the closed set of
//! ingredient categories and their display colors.

mod color;
mod error;

pub use color::{Palette, Rgb};
pub use error::{ChordError, ChordResult};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Position of an ingredient in the header row. This is the identity of an
/// ingredient everywhere downstream.
pub type IngredientIndex = usize;

/// Ingredient category.
///
/// The declaration order is the priority order: keyword classification tests
/// categories in this order and the category group ordering lays buckets out
/// in this order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Alcoholic,
    Nonalcoholic,
    Mixers,
    Spices,
    Fruits,
    Other,
}

impl Category {
    pub const COUNT: usize = 6;

    pub const PRIORITY: [Category; Category::COUNT] = [
        Category::Alcoholic,
        Category::Nonalcoholic,
        Category::Mixers,
        Category::Spices,
        Category::Fruits,
        Category::Other,
    ];

    /// Position in [`Category::PRIORITY`].
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Alcoholic => "alcoholic",
            Category::Nonalcoholic => "nonalcoholic",
            Category::Mixers => "mixers",
            Category::Spices => "spices",
            Category::Fruits => "fruits",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ChordError;

    fn from_str(s: &str) -> ChordResult<Self> {
        let wanted = s.trim();
        Category::PRIORITY
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ChordError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_matches_rank() {
        for (i, c) in Category::PRIORITY.iter().enumerate() {
            assert_eq!(c.rank(), i);
        }
        assert!(Category::Alcoholic < Category::Other);
    }

    #[test]
    fn category_round_trips_through_text() {
        for c in Category::PRIORITY {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
        assert_eq!("Fruits".parse::<Category>().unwrap(), Category::Fruits);
        assert!(matches!(
            "garnish".parse::<Category>(),
            Err(ChordError::UnknownCategory(_))
        ));
    }
}
