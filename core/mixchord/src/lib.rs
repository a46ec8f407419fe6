#![doc = include_str!("../README.md")]

pub mod app;
pub mod config;

pub use bincode;
pub use config::{read_configuration, read_configuration_str, MixChordConfig};
pub use mixchord_helpers as helpers;
pub use mixchord_layout as layout;
pub use mixchord_matrix as matrix;
pub use mixchord_traits::*;
pub use mixchord_view as view;

pub mod prelude {
    pub use crate::app::*;
    pub use crate::config::*;
    pub use mixchord_helpers::*;
    pub use mixchord_layout::*;
    pub use mixchord_matrix::*;
    pub use mixchord_traits::*;
    pub use mixchord_view::*;
}
