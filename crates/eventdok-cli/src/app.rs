//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use tracing::{info, warn};

use eventdok_core::{
    generate_report, EventDetails, OfflineCollaborator, ReportCollaborator, ReportStructurer,
    Settings, ThemeDescriptor, ThemeRegistry,
};
use eventdok_ooxml::DocxWriter;

#[derive(Parser)]
#[command(name = "eventdok")]
#[command(author, version, about = "Formatted event reports from structured details", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a DOCX event report
    Generate {
        /// Event details file (.json or .toml)
        #[arg(short, long)]
        details: PathBuf,

        /// Theme name (see `eventdok themes`)
        #[arg(short, long)]
        theme: Option<String>,

        /// Event photo path or glob pattern (repeatable)
        #[arg(short, long = "photo")]
        photos: Vec<String>,

        /// Output file name or path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the AI provider and use the template report
        #[arg(long)]
        offline: bool,
    },

    /// Print the AI prompt built from event details
    Prompt {
        /// Event details file (.json or .toml)
        #[arg(short, long)]
        details: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the block structure of report text as JSON
    Structure {
        /// Report text file
        input: PathBuf,

        /// Event details file (.json or .toml)
        #[arg(short, long)]
        details: Option<PathBuf>,

        /// Theme name
        #[arg(short, long)]
        theme: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List available themes
    Themes,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            details,
            theme,
            photos,
            output,
            config,
            offline,
        } => {
            let path = generate_command(
                &details,
                theme.as_deref(),
                &photos,
                output.as_deref(),
                config.as_deref(),
                offline,
            )?;
            println!("{}", path.display());
        }
        Commands::Prompt { details, config } => {
            print!("{}", prompt_command(&details, config.as_deref())?);
        }
        Commands::Structure {
            input,
            details,
            theme,
            config,
        } => {
            println!(
                "{}",
                structure_command(
                    &input,
                    details.as_deref(),
                    theme.as_deref(),
                    config.as_deref()
                )?
            );
        }
        Commands::Themes => {
            for name in themes_command() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Execute the generate command and return the saved report path
pub fn generate_command(
    details_path: &Path,
    theme: Option<&str>,
    photos: &[String],
    output: Option<&Path>,
    config: Option<&Path>,
    offline: bool,
) -> Result<PathBuf> {
    let settings = load_settings(config)?;
    let details = load_details(details_path, &settings)?;

    let registry = ThemeRegistry::builtin();
    let theme = resolve_theme(&registry, theme, &settings)?;

    let prompts = settings
        .prompt_builder()
        .context("Failed to load prompt template")?;
    let collaborator = collaborator_for(&settings, offline);
    info!("Generating report text with {}", collaborator.name());
    let text = generate_report(collaborator.as_ref(), &prompts, &details)
        .context("Failed to build prompt")?;

    let photos = expand_photo_args(photos);
    let blocks = ReportStructurer::new(theme)
        .with_banner(&settings.paths.banner)
        .structure(&details, &text, &photos);

    let output_name = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_output_name(&details)),
    };
    let path = DocxWriter::save(&blocks, &output_name, &settings.paths.output_dir)
        .with_context(|| format!("Failed to write report: {}", output_name.display()))?;

    Ok(path)
}

/// Execute the prompt command and return the substituted prompt
pub fn prompt_command(details_path: &Path, config: Option<&Path>) -> Result<String> {
    let settings = load_settings(config)?;
    let details = load_details(details_path, &settings)?;

    let prompt = settings
        .prompt_builder()
        .context("Failed to load prompt template")?
        .build(&details)
        .context("Failed to build prompt")?;

    Ok(prompt)
}

/// Execute the structure command and return the blocks as pretty JSON
pub fn structure_command(
    input: &Path,
    details_path: Option<&Path>,
    theme: Option<&str>,
    config: Option<&Path>,
) -> Result<String> {
    let settings = load_settings(config)?;
    let details = match details_path {
        Some(path) => load_details(path, &settings)?,
        None => EventDetails::default(),
    };

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read report text: {}", input.display()))?;

    let registry = ThemeRegistry::builtin();
    let theme = resolve_theme(&registry, theme, &settings)?;
    let blocks = ReportStructurer::new(theme).structure(&details, &text, &[]);

    serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")
}

/// Execute the themes command
pub fn themes_command() -> Vec<String> {
    ThemeRegistry::builtin()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Expand photo arguments as glob patterns
///
/// A pattern matching nothing is kept literally, so the report notes it as
/// a missing photo instead of failing.
pub fn expand_photo_args(args: &[String]) -> Vec<PathBuf> {
    let mut photos = Vec::new();

    for arg in args {
        let matches: Vec<PathBuf> = glob(arg)
            .map(|paths| paths.filter_map(|p| p.ok()).collect())
            .unwrap_or_default();

        if matches.is_empty() {
            photos.push(PathBuf::from(arg));
        } else {
            photos.extend(matches);
        }
    }

    photos
}

/// File name derived from the event title, e.g. `AI_Workshop_report.docx`
pub fn default_output_name(details: &EventDetails) -> String {
    let title = details.get_or("event_title", "Event");
    let mut stem: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    // collapse runs of separators
    while stem.contains("__") {
        stem = stem.replace("__", "_");
    }
    let stem = stem.trim_matches('_');

    if stem.is_empty() {
        "Event_report.docx".to_string()
    } else {
        format!("{}_report.docx", stem)
    }
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    Settings::discover(config).with_context(|| match config {
        Some(path) => format!("Failed to load config: {}", path.display()),
        None => "Failed to load eventdok.toml".to_string(),
    })
}

fn load_details(path: &Path, settings: &Settings) -> Result<EventDetails> {
    let details = EventDetails::load(path)
        .with_context(|| format!("Failed to read event details: {}", path.display()))?;
    Ok(details.with_defaults(&settings.defaults.college, &settings.defaults.department))
}

fn resolve_theme<'a>(
    registry: &'a ThemeRegistry,
    theme: Option<&str>,
    settings: &Settings,
) -> Result<&'a ThemeDescriptor> {
    let name = theme.unwrap_or(&settings.defaults.theme);
    registry
        .get(name)
        .with_context(|| format!("Available themes: {}", registry.names().join(", ")))
}

#[cfg(feature = "gemini")]
fn collaborator_for(settings: &Settings, offline: bool) -> Box<dyn ReportCollaborator> {
    if offline {
        return Box::new(OfflineCollaborator);
    }

    match eventdok_core::GeminiClient::from_settings(&settings.provider) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!("Gemini client unavailable: {}", e);
            Box::new(OfflineCollaborator)
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn collaborator_for(_settings: &Settings, offline: bool) -> Box<dyn ReportCollaborator> {
    if !offline {
        warn!("Built without the gemini feature; using the template report");
    }
    Box::new(OfflineCollaborator)
}
