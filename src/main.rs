use clap::{Parser, Subcommand};
use pixpress::compress::RustCompressor;
use pixpress::config::AppConfig;
use pixpress::metadata::{CodecError, ExifCodec, RustCodec};
use pixpress::output::CompressionReport;
use pixpress::pipeline::{self, PipelineConfig, SourceImage};
use pixpress::settings::CompressionLevel;
use pixpress::{budget, inputs, naming, output};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixpress")]
#[command(about = "Compress images without losing their EXIF metadata")]
#[command(long_about = "\
Compress images without losing their EXIF metadata

Each input is re-encoded under a size budget derived from its own size and
the chosen level, downscaled to at most 1280 px on the longest edge, and —
when the source carries EXIF — the metadata is spliced back into the
compressed output. Outputs are written as compressed-<name> next to each
source (or into --out-dir).

  pixpress compress photo.jpg                # level 90, metadata kept
  pixpress compress --level 30 shots/        # whole directory, aggressive
  pixpress compress --strip-metadata *.jpg   # privacy mode
  pixpress inspect photo.jpg                 # what metadata is in there?

Run 'pixpress gen-config' to generate a documented pixpress.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: pixpress.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress images or directories of images
    Compress {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Compression level, 10-90 in steps of 5 (default from config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(10..=90))]
        level: Option<u8>,

        /// Write outputs here instead of next to each source
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Do not carry EXIF metadata into the outputs
        #[arg(long)]
        strip_metadata: bool,

        /// Emit a JSON report instead of human-readable lines
        #[arg(long)]
        json: bool,
    },
    /// Print the EXIF tag map of an image
    Inspect {
        /// Image file to inspect
        file: PathBuf,
    },
    /// Print a stock pixpress.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Compress {
            inputs,
            level,
            out_dir,
            strip_metadata,
            json,
        } => run_compress(&config, &inputs, level, out_dir, strip_metadata, json),
        Command::Inspect { file } => run_inspect(&file),
        Command::GenConfig => {
            print!("{}", AppConfig::stock_toml());
            Ok(())
        }
    }
}

fn run_compress(
    config: &AppConfig,
    cli_inputs: &[PathBuf],
    level: Option<u8>,
    out_dir: Option<PathBuf>,
    strip_metadata: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let images = inputs::collect_images(cli_inputs)?;
    if let Some(dir) = &out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let level = level
        .map(CompressionLevel::new)
        .unwrap_or_else(|| config.default_level());
    let pipeline_config = PipelineConfig {
        level,
        keep_metadata: config.keep_metadata && !strip_metadata,
    };

    let compressor = RustCompressor::new();
    let codec = RustCodec::new();

    let outcomes: Vec<Result<CompressionReport, (PathBuf, String)>> = images
        .par_iter()
        .map(|path| {
            compress_one(
                &compressor,
                &codec,
                path,
                &pipeline_config,
                &config.output_prefix,
                out_dir.as_deref(),
            )
            .map_err(|e| (path.clone(), e))
        })
        .collect();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(failure) => failures.push(failure),
        }
    }

    if json {
        println!("{}", output::json_report(&reports)?);
    } else {
        for report in &reports {
            for line in report.human_lines() {
                println!("{line}");
            }
        }
    }

    for (path, error) in &failures {
        eprintln!("failed: {}: {error}", path.display());
    }
    if !failures.is_empty() {
        return Err(format!(
            "{} of {} image(s) failed",
            failures.len(),
            images.len()
        )
        .into());
    }
    Ok(())
}

fn compress_one(
    compressor: &RustCompressor,
    codec: &RustCodec,
    path: &Path,
    pipeline_config: &PipelineConfig,
    prefix: &str,
    out_dir: Option<&Path>,
) -> Result<CompressionReport, String> {
    let source = SourceImage::from_path(path).map_err(|e| e.to_string())?;
    let result = pipeline::run_with(compressor, codec, &source, pipeline_config)
        .map_err(|e| e.to_string())?;

    let container = image::guess_format(result.bytes()).map_err(|e| e.to_string())?;
    let filename = naming::output_filename(source.filename(), prefix, container);
    let dest = match out_dir {
        Some(dir) => dir.join(&filename),
        None => path.parent().unwrap_or(Path::new(".")).join(&filename),
    };
    std::fs::write(&dest, result.bytes()).map_err(|e| e.to_string())?;

    Ok(CompressionReport {
        input: path.display().to_string(),
        output: dest.display().to_string(),
        original_bytes: source.size(),
        compressed_bytes: result.size(),
        level: pipeline_config.level.percent(),
        size_budget_mb: budget::size_budget_mb(source.size(), pipeline_config.level.percent()),
        metadata: result.metadata(),
    })
}

fn run_inspect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    match RustCodec::new().decode(&bytes) {
        Ok(tags) => {
            println!("{} field(s):", tags.len());
            for entry in tags.entries() {
                println!("  {:<10} {:<28} {}", entry.ifd, entry.tag, entry.value);
            }
            Ok(())
        }
        Err(CodecError::Absent) => {
            println!("no EXIF metadata");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
