//! # CLI Module
//!
//! Command-line interface for the EXIF remover.
//!
//! ## Usage
//! ```bash
//! # Strip a folder of photos into a clean copy
//! exif-remover strip ~/Photos/trip -o ~/Exports/clean
//!
//! # Reuse the last output folder and randomize file names
//! exif-remover strip IMG_0001.jpg IMG_0002.png --rename
//!
//! # JSON summary for scripting
//! exif-remover strip ~/Photos/trip --format json
//!
//! # Remember an output folder without stripping anything
//! exif-remover config set-output ~/Exports/clean
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use exif_remover::core::batch::{BatchProcessor, JobResult};
use exif_remover::core::selection::{FileSelection, ImageFilter};
use exif_remover::core::settings::{
    self, default_settings_path, InMemorySettings, SettingsStore, SqliteSettings, APP_ID,
};
use exif_remover::core::stripper::{PixelStripper, StripOptions, DEFAULT_JPEG_QUALITY};
use exif_remover::error::{ConfigError, ExifRemoverError, Result};
use exif_remover::events::{BatchEvent, Event, EventChannel};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// EXIF Remover - Strip every bit of metadata from your photos
#[derive(Parser, Debug)]
#[command(name = "exif-remover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings database path
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Strip metadata from images and write clean copies
    Strip {
        /// Images or folders to strip (.jpg, .jpeg, .png, .tiff)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output folder (defaults to the last one used)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Give every output file a random name
        #[arg(short, long)]
        rename: bool,

        /// JPEG quality for re-encoded JPEGs (1-100)
        #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
        jpeg_quality: u8,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,

        /// Include hidden files when walking folders
        #[arg(long)]
        include_hidden: bool,

        /// Do not remember --output for future runs
        #[arg(long)]
        no_remember: bool,
    },
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the saved settings
    Show,
    /// Save the default output folder
    SetOutput {
        /// Existing folder to write clean images to
        dir: PathBuf,
    },
    /// Forget the saved output folder
    ClearOutput,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (failed paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    exif_remover::init_tracing(cli.verbose);
    exif_remover::log_panics();

    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let store = open_settings(&settings_path);

    match cli.command {
        Commands::Strip {
            paths,
            output,
            rename,
            jpeg_quality,
            format,
            include_hidden,
            no_remember,
        } => run_strip(
            store.as_ref(),
            StripArgs {
                paths,
                output,
                rename,
                options: StripOptions::new().jpeg_quality(jpeg_quality),
                format,
                include_hidden,
                remember: !no_remember,
                verbose: cli.verbose,
            },
        ),
        Commands::Config { action } => run_config(store.as_ref(), &settings_path, action),
    }
}

/// A broken settings file must not stop anyone from stripping photos.
fn open_settings(path: &Path) -> Box<dyn SettingsStore> {
    match SqliteSettings::open(path, APP_ID) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "settings unavailable, continuing without them");
            Box::new(InMemorySettings::new())
        }
    }
}

struct StripArgs {
    paths: Vec<PathBuf>,
    output: Option<PathBuf>,
    rename: bool,
    options: StripOptions,
    format: OutputFormat,
    include_hidden: bool,
    remember: bool,
    verbose: bool,
}

fn run_strip(store: &dyn SettingsStore, args: StripArgs) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(args.format, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("EXIF Remover").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    args.options.validate()?;

    let filter = ImageFilter::new().with_hidden(args.include_hidden);
    let mut selection = FileSelection::with_filter(filter);
    let change = selection.add_paths(args.paths);
    for ignored in &change.ignored {
        warn!(path = %ignored.display(), "not a supported image, skipping");
    }

    let explicit_output = args.output.is_some();
    let output_dir = match args.output {
        Some(dir) => Some(dir),
        None => settings::last_output_dir(store).unwrap_or_else(|e| {
            warn!(error = %e, "could not read saved output folder");
            None
        }),
    };

    let job = selection.to_job(output_dir.as_deref(), args.rename)?;

    if explicit_output && args.remember {
        if let Err(e) = settings::remember_output_dir(store, &job.output_dir) {
            warn!(error = %e, "could not save output folder");
        }
    }

    let processor = BatchProcessor::new(Arc::new(PixelStripper::new(args.options)));
    let (sender, receiver) = EventChannel::new();
    let handle = processor.start(job, sender)?;

    let progress = if pretty {
        let pb = ProgressBar::new(100);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    // The worker drops its sender when it exits, which ends this loop.
    for event in receiver.iter() {
        match event {
            Event::Batch(BatchEvent::Progress(p)) => {
                if let Some(ref pb) = progress {
                    pb.set_position(u64::from(p.percent));
                    pb.set_message(
                        p.current_path
                            .file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .into_owned(),
                    );
                }
            }
            Event::Batch(BatchEvent::FileFailed { path, message }) => {
                if args.verbose {
                    let line = format!("{} {}: {}", style("✗").red(), display_path(&path), message);
                    match progress {
                        Some(ref pb) => pb.println(line),
                        None => {
                            term.write_line(&line).ok();
                        }
                    }
                }
            }
            Event::Batch(BatchEvent::Completed { .. }) => {
                if let Some(ref pb) = progress {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }

    let result = handle.join()?;

    match args.format {
        OutputFormat::Pretty => print_pretty_results(&term, &result, args.verbose),
        OutputFormat::Json => print_json_results(&result)?,
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn run_config(store: &dyn SettingsStore, settings_path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let output = settings::last_output_dir(store)?;
            println!("settings file: {}", settings_path.display());
            match output {
                Some(dir) => println!("output folder: {}", dir.display()),
                None => println!("output folder: not selected"),
            }
        }
        ConfigAction::SetOutput { dir } => {
            if !dir.is_dir() {
                return Err(ConfigError::OutputDirectoryMissing { path: dir }.into());
            }
            settings::remember_output_dir(store, &dir)?;
            println!("output folder: {}", dir.display());
        }
        ConfigAction::ClearOutput => {
            settings::forget_output_dir(store)?;
            println!("output folder: not selected");
        }
    }
    Ok(())
}

fn print_pretty_results(term: &Term, result: &JobResult, verbose: bool) {
    let heading = if result.cancelled {
        format!("{} Process Cancelled", style("!").yellow().bold())
    } else {
        format!("{} Process Complete", style("✓").green().bold())
    };
    term.write_line(&heading).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} image(s) stripped in {:.1}s",
        style(result.success_count).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} failed",
        if result.failed_count() > 0 {
            style(result.failed_count()).red()
        } else {
            style(result.failed_count()).dim()
        }
    ))
    .ok();

    if result.skipped() > 0 {
        term.write_line(&format!(
            "  {} not attempted",
            style(result.skipped()).yellow()
        ))
        .ok();
    }

    term.write_line(&format!(
        "  Output folder: {}",
        style(display_path(&result.output_dir)).bold()
    ))
    .ok();

    if !result.failed_paths.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Failed images:").bold().underlined()))
            .ok();
        for path in &result.failed_paths {
            term.write_line(&format!("    {} {}", style("○").dim(), display_path(path)))
                .ok();
        }
        if !verbose {
            term.write_line("").ok();
            term.write_line(&format!(
                "{}",
                style("Run with --verbose to see why each image failed.").dim()
            ))
            .ok();
        }
    }
}

fn print_json_results(result: &JobResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| ExifRemoverError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_minimal_results(result: &JobResult) {
    for path in &result.failed_paths {
        println!("{}", path.display());
    }
}

/// Show paths under the home folder as `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
