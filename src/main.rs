use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use rendify::config::{self, UploadConfig};
use rendify::imaging::{FitMode, RenditionService};
use rendify::naming::{mime_for_extension, Rendition};
use rendify::store::UploadedFile;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "rendify")]
#[command(about = "Catalog image rendition generator")]
#[command(long_about = "\
Catalog image rendition generator

Validates an image against a MIME allow-list, plans an aspect-ratio-aware
resize into one of three configured boxes, and writes the result into a flat
storage directory. Small sources are copied byte-for-byte (never upscaled).

Generated names follow one convention:

  uploads/
  ├── image_{base}.jpeg   # default rendition
  ├── small_{base}.jpeg   # small rendition
  └── big_{base}.jpeg     # big rendition

where {base} is --name when given, or a fresh unique id. Renditions of one
source share the base, so the whole set can be addressed from one name.

Fit modes:
  contain  scale so the source fits entirely inside the box
  cover    scale so the source fills the box on the priority axis
           (best-fit: the other axis may overflow, nothing is cropped)

Run 'rendify gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Path to config.toml (stock defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the storage directory from config
    #[arg(long, global = true)]
    target_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate renditions for one image
    Generate(GenerateArgs),
    /// Generate all renditions for every image in a directory
    Batch(BatchArgs),
    /// Remove a generated file from the storage directory
    Delete {
        /// File name as returned by generate (not a path)
        file_name: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Source image file
    file: PathBuf,

    /// Which rendition to generate
    #[arg(long, value_enum, default_value = "all")]
    rendition: RenditionArg,

    /// Fit mode for a single rendition (all-renditions runs use contain)
    #[arg(long, value_enum, default_value = "contain")]
    mode: ModeArg,

    /// Base name for the generated files (a fresh unique id when omitted)
    #[arg(long)]
    name: Option<String>,
}

#[derive(clap::Args)]
struct BatchArgs {
    /// Directory to sweep for images
    dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenditionArg {
    All,
    Default,
    Small,
    Big,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Contain,
    Cover,
}

impl From<ModeArg> for FitMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Contain => FitMode::Contain,
            ModeArg::Cover => FitMode::Cover,
        }
    }
}

/// Per-source outcome recorded in the batch report.
#[derive(Serialize)]
struct BatchEntry {
    source: String,
    renditions: [String; 3],
}

#[derive(Serialize)]
struct BatchFailure {
    source: String,
    error: String,
}

#[derive(Serialize)]
struct BatchReport {
    generated: Vec<BatchEntry>,
    failed: Vec<BatchFailure>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Generate(args) => {
            let service = RenditionService::open(&config)?;
            println!("==> Generating renditions for {}", args.file.display());
            let file = UploadedFile::from_path(&args.file);
            let name = args.name.as_deref();
            let written: Vec<String> = match args.rendition {
                RenditionArg::All => service.create_all(&file, name)?.into(),
                RenditionArg::Default => {
                    vec![service.create_rendition(&file, Rendition::Default, args.mode.into(), name)?]
                }
                RenditionArg::Small => {
                    vec![service.create_rendition(&file, Rendition::Small, args.mode.into(), name)?]
                }
                RenditionArg::Big => {
                    vec![service.create_rendition(&file, Rendition::Big, args.mode.into(), name)?]
                }
            };
            for file_name in &written {
                println!("    {}", file_name);
            }
            println!("==> Wrote {} file(s) to {}", written.len(), service.target_directory().display());
        }
        Command::Batch(args) => {
            let service = RenditionService::open(&config)?;
            batch(&service, &config, &args.dir)?;
        }
        Command::Delete { file_name } => {
            let service = RenditionService::open(&config)?;
            service.delete(&file_name)?;
            println!("==> Deleted {} (if present)", file_name);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<UploadConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => UploadConfig::load(path)?,
        None => UploadConfig::default(),
    };
    if let Some(dir) = &cli.target_dir {
        config.target_directory = dir.to_string_lossy().into_owned();
    }
    Ok(config)
}

/// Sweep a directory, generate all renditions for every allowed image in
/// parallel, and drop a `manifest.json` report into the storage directory.
fn batch(
    service: &RenditionService,
    config: &UploadConfig,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .and_then(mime_for_extension)
                .is_some_and(|mime| config.allowed_mime_types.iter().any(|m| m == mime))
        })
        .map(|entry| entry.into_path())
        .collect();

    println!("==> Processing {} image(s) from {}", files.len(), dir.display());

    let results: Vec<(PathBuf, Result<[String; 3], _>)> = files
        .par_iter()
        .map(|path| {
            let outcome = service.create_all(&UploadedFile::from_path(path), None);
            (path.clone(), outcome)
        })
        .collect();

    let mut report = BatchReport {
        generated: Vec::new(),
        failed: Vec::new(),
    };
    for (path, outcome) in results {
        match outcome {
            Ok(renditions) => {
                println!("    {} → {}", path.display(), renditions.join(", "));
                report.generated.push(BatchEntry {
                    source: path.display().to_string(),
                    renditions,
                });
            }
            Err(e) => {
                println!("    {} → FAILED: {}", path.display(), e);
                report.failed.push(BatchFailure {
                    source: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    let report_path = service.target_directory().join("manifest.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
    println!(
        "==> Batch complete: {} generated, {} failed ({})",
        report.generated.len(),
        report.failed.len(),
        report_path.display()
    );

    if !report.failed.is_empty() {
        return Err(format!("{} image(s) failed", report.failed.len()).into());
    }
    Ok(())
}
