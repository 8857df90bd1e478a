//! CLI tool for converting osu! beatmaps into tau beatmaps

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

use tau_converter::{
    BeatmapConverter, CancellationToken, ConvertError, ConverterConfig, RotationDirection,
};

#[derive(Parser, Debug)]
#[command(name = "tau-convert")]
#[command(about = "Convert osu! beatmaps into tau beatmaps")]
struct Args {
    /// Path to a .osu file or a folder searched recursively for .osu files
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory for converted beatmaps
    #[arg(short, long)]
    output: PathBuf,

    /// JSON converter configuration, flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Convert finish-accented objects into plain beats
    #[arg(long)]
    no_hard_beats: bool,

    /// Convert every slider into a beat
    #[arg(long)]
    no_sliders: bool,

    /// Keep sliders that turn too fast to follow
    #[arg(long)]
    impossible_sliders: bool,

    /// Divisor for the minimum slider duration
    #[arg(long)]
    slider_divisor: Option<u32>,

    /// Force all rotation into one direction
    #[arg(long, value_enum)]
    lock_direction: Option<Direction>,

    /// Number of parallel threads
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Direction {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

impl From<Direction> for RotationDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Cw => RotationDirection::Clockwise,
            Direction::Ccw => RotationDirection::CounterClockwise,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if !args.input.exists() {
        anyhow::bail!("Input not found: {}", args.input.display());
    }

    let config = build_config(&args)?;
    log::debug!("Converter config: {:?}", config);

    let files = collect_osu_files(&args.input)?;
    if files.is_empty() {
        println!("No .osu files found in {}", args.input.display());
        return Ok(());
    }

    println!("=== tau converter ===");
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());
    println!("Beatmaps: {}", files.len());
    println!("Threads: {}", args.threads);

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .ok();

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output folder: {}", args.output.display()))?;

    // Set up graceful shutdown
    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        println!("\n⏳ Ctrl+C received! Stopping after the current objects...");
        handler_token.cancel();
    })
    .context("Failed to set Ctrl+C handler")?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);

    files.par_iter().for_each(|osu_path| {
        if cancel.is_cancelled() {
            skipped.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let out_path = output_path(&args.input, &args.output, osu_path);
        match convert_file(osu_path, &out_path, &config, &cancel, args.pretty) {
            Ok(()) => {
                success.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) if matches!(e.downcast_ref::<ConvertError>(), Some(ConvertError::Cancelled)) => {
                skipped.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                pb.println(format!("  ✗ {}: {:#}", osu_path.display(), e));
            }
        }
        pb.inc(1);
    });

    pb.finish_with_message("Conversion complete!");

    println!("\n=== Summary ===");
    println!("Converted: {}", success.load(Ordering::Relaxed));
    println!("Failed: {}", failed.load(Ordering::Relaxed));
    let skipped = skipped.load(Ordering::Relaxed);
    if skipped > 0 {
        println!("Skipped: {}", skipped);
        println!("⚠ Run was interrupted by Ctrl+C");
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<ConverterConfig> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::from_path(path)?,
        None => ConverterConfig::default(),
    };

    if args.no_hard_beats {
        config.allow_hard_beats = false;
    }
    if args.no_sliders {
        config.allow_sliders = false;
    }
    if args.impossible_sliders {
        config.allow_impossible_sliders = true;
    }
    if let Some(divisor) = args.slider_divisor {
        config.slider_sample_divisor = divisor;
    }
    if let Some(direction) = args.lock_direction {
        config.locked_direction = Some(direction.into());
    }

    config.validate()?;
    Ok(config)
}

fn is_osu_file(path: &Path) -> bool {
    path.extension().map_or(false, |e| e.eq_ignore_ascii_case("osu"))
}

fn collect_osu_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if !is_osu_file(input) {
            anyhow::bail!("File must have .osu extension");
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
        if entry.file_type().is_file() && is_osu_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Mirror the input folder layout under the output directory
fn output_path(input: &Path, output: &Path, osu_path: &Path) -> PathBuf {
    let relative = osu_path
        .strip_prefix(input)
        .ok()
        .filter(|r| !r.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(osu_path.file_name().unwrap_or_default()));

    output.join(relative).with_extension("tau.json")
}

fn convert_file(
    osu_path: &Path,
    out_path: &Path,
    config: &ConverterConfig,
    cancel: &CancellationToken,
    pretty: bool,
) -> Result<()> {
    log::info!("Loading beatmap: {}", osu_path.display());
    let beatmap = BeatmapConverter::load(osu_path)?;
    let tau = BeatmapConverter::convert(beatmap, config, cancel)?;

    let json = tau.to_json(pretty).context("Failed to serialize beatmap")?;
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create folder: {}", parent.display()))?;
    }
    fs::write(out_path, json)
        .with_context(|| format!("Failed to write beatmap: {}", out_path.display()))?;

    Ok(())
}
