//! Verse Weave Pipeline
//!
//! Weaves a Hebrew source text and its English translation into one
//! bilingual document and repairs verse markers and separators on the way.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use verse_weave::annotate::{add_verse_notes, trim_chapter_heading};
use verse_weave::filename::sanitize;
use verse_weave::merge::merge_verse_paragraphs;
use verse_weave::models::{DocumentPair, FilenamePolicy, Paragraph, WeaveParams, WeaveResult};
use verse_weave::output::{
    output_path, print_paragraphs, print_summary, read_json_file, write_html_file,
    write_json_file,
};
use verse_weave::punctuation::normalize_document;
use verse_weave::source::load_paragraphs;
use verse_weave::weave::{weave, weave_batch};

#[derive(Parser)]
#[command(name = "verse-weave")]
#[command(about = "Weave Hebrew verse text with its English translation")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for woven documents
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// JSON document with paragraphs, runs and summary
    Json,
    /// Self-contained HTML preview
    Html,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

/// Weaving options shared by `weave` and `batch`.
///
/// Valued flags are Options so an unset flag inherits from the style file
/// or from WeaveParams::default().
#[derive(Args)]
struct WeaveArgs {
    /// JSON file with a full WeaveParams policy
    #[arg(long)]
    style: Option<PathBuf>,

    /// Font for Hebrew paragraphs [default: Frank Ruehl]
    #[arg(long)]
    source_font: Option<String>,

    /// Font size for Hebrew paragraphs in points [default: 16]
    #[arg(long)]
    source_size: Option<f32>,

    /// Font for English paragraphs [default: Times New Roman]
    #[arg(long)]
    target_font: Option<String>,

    /// Font size for English paragraphs in points [default: 12]
    #[arg(long)]
    target_size: Option<f32>,

    /// Sheet to read from .xlsx inputs [default: first sheet]
    #[arg(long)]
    sheet: Option<String>,

    /// Leave embedded verse markers where they are
    #[arg(long)]
    no_reposition: bool,

    /// Leave doubled separators in English paragraphs
    #[arg(long)]
    no_collapse: bool,

    /// Merge English continuation paragraphs into their verse first
    #[arg(long)]
    merge_verses: bool,

    /// Insert a notes placeholder after every English verse
    #[arg(long)]
    notes: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Suppress progress output
    #[arg(long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Weave one Hebrew file with its English translation
    Weave {
        /// Hebrew paragraphs (.json, .txt or .xlsx)
        #[arg(long)]
        source: PathBuf,

        /// English paragraphs (.json, .txt or .xlsx)
        #[arg(long)]
        target: PathBuf,

        /// Directory for the woven document
        #[arg(long)]
        output_dir: PathBuf,

        /// File name prefix [default: combined]
        #[arg(long)]
        prefix: Option<String>,

        #[command(flatten)]
        options: WeaveArgs,

        /// Print first N woven paragraphs to console
        #[arg(long)]
        show: Option<usize>,
    },

    /// Weave every pair of same-named files in two directories
    Batch {
        /// Directory of Hebrew files
        #[arg(long)]
        source_dir: PathBuf,

        /// Directory of English files with the same names
        #[arg(long)]
        target_dir: PathBuf,

        /// Directory for the woven documents
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        options: WeaveArgs,
    },

    /// Normalize separators, markers and the chapter heading of a woven JSON document
    Normalize {
        /// Woven JSON document
        #[arg(long)]
        input: PathBuf,

        /// Output path [default: overwrite input]
        #[arg(long)]
        output: Option<PathBuf>,

        /// JSON file with a full WeaveParams policy; its source style is
        /// applied to Hebrew paragraphs
        #[arg(long)]
        style: Option<PathBuf>,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Print the sanitized form of a file name
    Sanitize {
        /// Raw file name
        raw: String,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Load a WeaveParams policy file, or the library defaults without one.
fn load_policy(path: Option<&Path>) -> Result<WeaveParams, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            debug!("loading style policy from {}", path.display());
            Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
        }
        None => Ok(WeaveParams::default()),
    }
}

/// Build params by overlaying user-specified values onto the style file or
/// the library defaults.
fn build_params(
    options: &WeaveArgs,
    prefix: Option<String>,
) -> Result<WeaveParams, Box<dyn std::error::Error>> {
    let defaults = load_policy(options.style.as_deref())?;

    let mut params = defaults.clone();
    params.style.source.font_family = options
        .source_font
        .clone()
        .unwrap_or(defaults.style.source.font_family);
    params.style.source.font_size = options.source_size.unwrap_or(defaults.style.source.font_size);
    params.style.target.font_family = options
        .target_font
        .clone()
        .unwrap_or(defaults.style.target.font_family);
    params.style.target.font_size = options.target_size.unwrap_or(defaults.style.target.font_size);
    params.filename.prefix = prefix.unwrap_or(defaults.filename.prefix);
    params.reposition_markers = defaults.reposition_markers && !options.no_reposition;
    params.collapse_separators = defaults.collapse_separators && !options.no_collapse;

    Ok(params)
}

fn load_target(path: &Path, options: &WeaveArgs) -> Result<Vec<Paragraph>, Box<dyn std::error::Error>> {
    let paragraphs = load_paragraphs(path, options.sheet.as_deref())?;
    if options.merge_verses {
        let merged = merge_verse_paragraphs(&paragraphs);
        debug!(
            "merged {} English paragraphs into {}",
            paragraphs.len(),
            merged.len()
        );
        Ok(merged)
    } else {
        Ok(paragraphs)
    }
}

/// Apply post-weave options and write the result. Returns the output path.
fn finish_and_write(
    mut result: WeaveResult,
    output_dir: &Path,
    filename: &FilenamePolicy,
    options: &WeaveArgs,
) -> Result<(WeaveResult, PathBuf), Box<dyn std::error::Error>> {
    if options.notes {
        result.paragraphs = add_verse_notes(&result.paragraphs)?;
    }

    let output = output_path(
        output_dir,
        &result.filename,
        filename,
        options.format.extension(),
    );

    match options.format {
        OutputFormat::Json => write_json_file(&result, &output)?,
        OutputFormat::Html => write_html_file(&result, &output)?,
    }

    Ok((result, output))
}

fn is_supported_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "json" | "txt" | "xlsx"))
}

/// Pair same-named files of the two directories, sorted by name.
fn collect_pairs(
    source_dir: &Path,
    target_dir: &Path,
    options: &WeaveArgs,
) -> Result<Vec<DocumentPair>, Box<dyn std::error::Error>> {
    let mut names: Vec<PathBuf> = std::fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_source(path))
        .collect();
    names.sort();

    let mut pairs = Vec::new();
    for source_path in names {
        let Some(name) = source_path.file_name() else {
            continue;
        };
        let target_path = target_dir.join(name);
        if !target_path.is_file() {
            warn!("no translation for {}, skipping", source_path.display());
            continue;
        }

        pairs.push(DocumentPair {
            prefix: source_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
            source: load_paragraphs(&source_path, options.sheet.as_deref())?,
            target: load_target(&target_path, options)?,
        });
    }

    Ok(pairs)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Weave {
            source,
            target,
            output_dir,
            prefix,
            options,
            show,
        } => {
            let params = build_params(&options, prefix)?;

            let source_paragraphs = load_paragraphs(&source, options.sheet.as_deref())?;
            let target_paragraphs = load_target(&target, &options)?;

            if !options.quiet {
                eprintln!(
                    "Weaving {} Hebrew and {} English paragraphs...",
                    source_paragraphs.len(),
                    target_paragraphs.len()
                );
            }

            let result = weave(&source_paragraphs, &target_paragraphs, &params);
            if result.summary.dropped_target > 0 {
                warn!(
                    "{} English paragraphs have no Hebrew partner and were dropped",
                    result.summary.dropped_target
                );
            }

            std::fs::create_dir_all(&output_dir)?;
            let (result, output) =
                finish_and_write(result, &output_dir, &params.filename, &options)?;

            // Print summary
            if !options.quiet {
                print_summary(&result);
                eprintln!("\nOutput: {}", output.display());
            }

            // Show paragraphs if requested
            if let Some(limit) = show {
                println!("\n=== Woven Paragraphs ===");
                print_paragraphs(&result.paragraphs, Some(limit));
            }
        }

        Commands::Batch {
            source_dir,
            target_dir,
            output_dir,
            options,
        } => {
            let params = build_params(&options, None)?;
            let pairs = collect_pairs(&source_dir, &target_dir, &options)?;

            std::fs::create_dir_all(&output_dir)?;
            let results = weave_batch(&pairs, &params, !options.quiet);

            for result in results {
                let (_, output) =
                    finish_and_write(result, &output_dir, &params.filename, &options)?;
                if !options.quiet {
                    eprintln!("Output: {}", output.display());
                }
            }
        }

        Commands::Normalize {
            input,
            output,
            style,
            quiet,
        } => {
            let policy = load_policy(style.as_deref())?;
            let mut result = read_json_file(&input)?;

            let report = normalize_document(&mut result.paragraphs, &policy.style.source);
            let heading_trimmed = trim_chapter_heading(&mut result.paragraphs);

            let output = output.unwrap_or(input);
            write_json_file(&result, &output)?;

            if !quiet {
                eprintln!("Paragraphs: {}", report.paragraphs);
                eprintln!("  Hebrew paragraphs restyled: {}", report.hebrew_paragraphs);
                eprintln!("  Separator runs collapsed: {}", report.separators_collapsed);
                eprintln!("  Markers repositioned: {}", report.markers_repositioned);
                eprintln!("  Chapter heading trimmed: {}", heading_trimmed);
                eprintln!("\nOutput: {}", output.display());
            }
        }

        Commands::Sanitize { raw } => {
            println!("{}", sanitize(&raw));
        }
    }

    Ok(())
}
