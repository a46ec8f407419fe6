use clap::{Parser, Subcommand};
use log::{info, warn};
use mixchord::helpers::basic_mixchord_setup;
use mixchord::prelude::*;
use mixchord_svg::SvgRenderer;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about)]
pub struct MixChordCli {
    /// RON configuration file, stock defaults when absent.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// The matrix file was produced by `bake` instead of being a raw table.
    #[arg(long, global = true)]
    pub baked: bool,

    /// Overrides the log level of the configuration (off, error, warn, info, debug, trace).
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the chord diagram as SVG
    Render {
        matrix: PathBuf,
        /// Ingredient to focus on, case insensitive.
        #[arg(short, long)]
        ingredient: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        /// Chords at or below this weight are hidden while nothing is selected.
        #[arg(short, long)]
        threshold: Option<u32>,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
        #[arg(long)]
        title: Option<String>,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the chord layout as RON
    Layout { matrix: PathBuf },
    /// Parse a raw table once and store the matrix in binary form
    Bake {
        matrix: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the category of every name
    Classify { names: Vec<String> },
    /// Print the ingredients whose name contains the query, ignoring case
    Search { matrix: PathBuf, query: String },
}

/// Reads the configuration and applies the global flags. Terminal logs go to
/// stderr since stdout carries the SVG or RON output.
pub fn load_config(cli: &MixChordCli) -> ChordResult<MixChordConfig> {
    let mut config = match &cli.config {
        Some(path) => read_configuration(path)?,
        None => MixChordConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.logging.terminal = TerminalOutput::Stderr;
    Ok(config)
}

/// Loads the configuration, installs the logger and runs the command.
pub fn run_cli(cli: MixChordCli) -> ChordResult<()> {
    let config = load_config(&cli)?;
    basic_mixchord_setup(&config.logging)?;
    if let Some(text) = execute(&cli, config)? {
        print!("{text}");
    }
    Ok(())
}

/// Runs the command, returning what goes to stdout.
pub fn execute(cli: &MixChordCli, mut config: MixChordConfig) -> ChordResult<Option<String>> {
    match &cli.command {
        Command::Render {
            matrix,
            ingredient,
            category,
            threshold,
            width,
            height,
            title,
            output,
        } => {
            if let Some(threshold) = threshold {
                config.filter.min_weight_threshold = *threshold;
            }
            let mut session = load_session(matrix, cli.baked, config)?;
            if let Some(name) = ingredient {
                session.select_ingredient(name)?;
            }
            if let Some(category) = category {
                session.select_category(*category);
            }
            let mut renderer = SvgRenderer::new(*width, *height);
            if let Some(title) = title {
                renderer = renderer.with_title(title.as_str());
            }
            let svg = renderer.render(&session.scene())?;
            match output {
                Some(path) => {
                    fs::write(path, svg).map_err(|e| ChordError::io(path, e))?;
                    info!("Wrote {}", path.display());
                    Ok(None)
                }
                None => Ok(Some(svg)),
            }
        }
        Command::Layout { matrix } => {
            let mut session = load_session(matrix, cli.baked, config)?;
            let pretty = ron::ser::PrettyConfig::default();
            let text = ron::ser::to_string_pretty(session.layout(), pretty)
                .map_err(|e| ChordError::Encode(e.to_string()))?;
            Ok(Some(text + "\n"))
        }
        Command::Bake { matrix, output } => {
            let session = load_session(matrix, cli.baked, config)?;
            let bytes = session.matrix().to_bytes()?;
            fs::write(output, &bytes).map_err(|e| ChordError::io(output, e))?;
            info!(
                "Baked {} ingredients into {} ({} bytes)",
                session.matrix().len(),
                output.display(),
                bytes.len()
            );
            Ok(None)
        }
        Command::Classify { names } => {
            let classifier = config.classifier();
            let text = names
                .iter()
                .map(|name| format!("{name}: {}\n", classifier.classify(name)))
                .collect();
            Ok(Some(text))
        }
        Command::Search { matrix, query } => {
            let session = load_session(matrix, cli.baked, config)?;
            let hits = session.search(query);
            info!("{} ingredients match {query:?}", hits.len());
            let text = hits
                .into_iter()
                .map(|index| format!("{}\n", session.matrix().name(index)))
                .collect();
            Ok(Some(text))
        }
    }
}

fn load_session(path: &Path, baked: bool, config: MixChordConfig) -> ChordResult<ChordSession> {
    if baked {
        let bytes = fs::read(path).map_err(|e| ChordError::io(path, e))?;
        return ChordSession::from_baked(&bytes, config);
    }
    let raw = fs::read_to_string(path).map_err(|e| ChordError::io(path, e))?;
    let session = ChordSession::from_raw(&raw, config)?;
    let skipped = session.diagnostics().skipped_rows();
    if skipped > 0 {
        warn!("{skipped} rows of {} were skipped", path.display());
    }
    Ok(session)
}
