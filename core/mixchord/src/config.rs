//! Configuration of a mixchord session.
//! The configuration is serialized in the RON format and every section has
//! defaults, so `()` is a complete configuration.

use mixchord_helpers::LoggingConfig;
use mixchord_layout::LayoutConfig;
use mixchord_matrix::{default_named, default_rules, CategoryClassifier, KeywordRule, MatrixBuilder, SourceConfig};
use mixchord_traits::{Category, ChordError, ChordResult, Palette, Rgb};
use mixchord_view::{EncoderConfig, FilterConfig};
use ron::extensions::Extensions;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixChordConfig {
    pub source: SourceConfig,
    pub layout: LayoutConfig,
    pub filter: FilterConfig,
    pub encoder: EncoderConfig,
    /// Recolored categories, the others keep their stock color.
    pub palette: BTreeMap<Category, Rgb>,
    /// Replaces the stock keyword table when set.
    pub classifier: Option<Vec<KeywordRule>>,
    /// Exact ingredient names added to the stock table of known names, taking
    /// precedence over it and over the keywords.
    pub categories: BTreeMap<String, Category>,
    pub logging: LoggingConfig,
}

impl MixChordConfig {
    fn get_options() -> Options {
        Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn serialize_ron(&self) -> ChordResult<String> {
        let ron = Self::get_options();
        let pretty = ron::ser::PrettyConfig::default();
        ron.to_string_pretty(&self, pretty)
            .map_err(|e| ChordError::Config(e.to_string()))
    }

    pub fn deserialize_ron(ron: &str) -> ChordResult<Self> {
        Self::get_options()
            .from_str(ron)
            .map_err(|e| ChordError::Config(format!("Syntax Error in config: {e}")))
    }

    pub fn classifier(&self) -> CategoryClassifier {
        let rules = match &self.classifier {
            Some(rules) => rules.clone(),
            None => default_rules(),
        };
        CategoryClassifier::new(rules)
            .with_named(default_named())
            .with_named(self.categories.iter().map(|(name, category)| (name, *category)))
    }

    pub fn palette(&self) -> Palette {
        Palette::with_overrides(&self.palette)
    }

    /// A matrix builder wired with the source, classifier and palette sections.
    pub fn matrix_builder(&self) -> MatrixBuilder {
        MatrixBuilder::new()
            .with_source(self.source.clone())
            .with_classifier(self.classifier())
            .with_palette(self.palette())
    }
}

/// Read a mixchord configuration from a file.
pub fn read_configuration(config_filename: impl AsRef<Path>) -> ChordResult<MixChordConfig> {
    let path = config_filename.as_ref();
    let config_content = read_to_string(path).map_err(|e| ChordError::io(path, e))?;
    read_configuration_str(&config_content)
}

/// Read a mixchord configuration from a string.
pub fn read_configuration_str(config_content: &str) -> ChordResult<MixChordConfig> {
    MixChordConfig::deserialize_ron(config_content)
}

// tests
#[cfg(test)]
mod tests {
    use super::*;
    use mixchord_layout::{GroupOrder, SortSubgroups};

    #[test]
    fn test_unit_config_is_default() {
        let config = read_configuration_str("()").unwrap();
        assert_eq!(config, MixChordConfig::default());
        assert_eq!(config.filter.min_weight_threshold, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let txt = r##"
        (
            source: (delimiter: ';'),
            layout: (pad_angle: 0.04, group_order: Declaration),
            filter: (min_weight_threshold: 2),
            palette: { fruits: "#FFA500" },
            logging: (level: "debug", file: "mixchord.log"),
        )
        "##;
        let config = read_configuration_str(txt).unwrap();
        assert_eq!(config.source.delimiter, ';');
        assert!(!config.source.row_labels);
        assert_eq!(config.layout.pad_angle, 0.04);
        assert_eq!(config.layout.group_order, GroupOrder::Declaration);
        assert_eq!(config.layout.sort_subgroups, SortSubgroups::Descending);
        assert_eq!(config.filter.min_weight_threshold, 2);
        assert_eq!(
            config.palette().color(Category::Fruits),
            Rgb::new(0xFF, 0xA5, 0x00)
        );
        assert_eq!(
            config.palette().color(Category::Alcoholic),
            Palette::default().color(Category::Alcoholic)
        );
        assert_eq!(
            config.logging.file.as_deref(),
            Some(Path::new("mixchord.log"))
        );
    }

    #[test]
    fn test_custom_classifier() {
        let txt = r#"
        (
            classifier: [
                (category: fruits, keywords: ["Passion"]),
                (category: alcoholic, keywords: ["passion liqueur"]),
            ],
        )
        "#;
        let classifier = read_configuration_str(txt).unwrap().classifier();
        assert_eq!(classifier.classify("Passion Liqueur"), Category::Alcoholic);
        assert_eq!(classifier.classify("passion fruit"), Category::Fruits);
        assert_eq!(classifier.classify("Vodka"), Category::Other);
        // known names still apply
        assert_eq!(classifier.classify("Triple Sec"), Category::Alcoholic);
    }

    #[test]
    fn test_named_categories() {
        let txt = r#"(categories: { "Tonic Water": mixers, "Triple Sec": other })"#;
        let classifier = read_configuration_str(txt).unwrap().classifier();
        assert_eq!(classifier.classify("tonic water"), Category::Mixers);
        assert_eq!(classifier.classify("Triple Sec"), Category::Other);
        assert_eq!(classifier.classify("Cointreau"), Category::Alcoholic);
    }

    #[test]
    fn test_bad_color_and_syntax() {
        assert!(matches!(
            read_configuration_str(r#"(palette: { fruits: "orange" })"#),
            Err(ChordError::Config(_))
        ));
        assert!(matches!(
            read_configuration_str("(layout: "),
            Err(ChordError::Config(_))
        ));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut config = MixChordConfig::default();
        config.layout.pad_angle = 0.02;
        config.palette.insert(Category::Spices, Rgb::new(1, 2, 3));
        config.classifier = Some(vec![KeywordRule::new(Category::Mixers, &["tonic"])]);
        config.categories.insert("Kahlua".to_string(), Category::Other);
        config.logging.file = Some("out.log".into());
        let serialized = config.serialize_ron().unwrap();
        let deserialized = read_configuration_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_file() {
        let err = read_configuration("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ChordError::Io { .. }));
    }
}
