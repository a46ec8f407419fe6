//! Chord diagram geometry.
//!
//! The circle (2π) minus one pad per group is shared between ingredients in
//! proportion to their total connection weight. Inside every group arc each
//! connected partner gets a sub-span proportional to the pair weight; the two
//! sub-spans of a pair are the ends of its ribbon.

mod cache;
mod config;
mod layout;

pub use cache::LayoutCache;
pub use config::{
    GroupOrder, GroupSizing, LayoutConfig, SortSubgroups, DEFAULT_MIN_GROUP_ANGLE,
    DEFAULT_PAD_ANGLE,
};
pub use layout::{
    layout, CategoryArc, Chord, ChordEndpoint, ChordLayout, ChordLayoutEngine, Group,
};
