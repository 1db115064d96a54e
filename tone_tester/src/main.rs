use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tone_vision::core_modules::utils::image_helper::image_helper;
use tone_vision::decode::decode_image_async;
use tone_vision::{AnalyzerConfig, ColorEntry, ToneAnalyzer, ToneReport};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tone_tester")]
#[command(about = "Estimate the skin tone of a photo and print colour recommendations")]
struct Args {
    /// Path to the input image.
    image_path: PathBuf,

    /// JSON analyzer configuration (region shape and size).
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// Write a PNG with everything outside the sampled region dimmed.
    #[arg(long = "mask-out")]
    mask_path: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Logging & Argument Parsing ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // --- 2. Analyzer Initialization ---
    let config = match &args.config_path {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = ToneAnalyzer::new(config);

    // --- 3. Decode & Analyse ---
    let bytes = tokio::fs::read(&args.image_path)
        .await
        .with_context(|| format!("reading {}", args.image_path.display()))?;
    let buffer = decode_image_async(bytes)
        .await
        .with_context(|| format!("decoding {}", args.image_path.display()))?;
    let report = analyzer.analyze(&buffer).context("analysing capture")?;

    // --- 4. Optional Region Mask ---
    if let Some(mask_path) = &args.mask_path {
        let mask = image_helper::region_mask(&buffer, &report.region, image_helper::OUTSIDE_REGION_DIM);
        image_helper::save(mask_path, &mask)
            .with_context(|| format!("writing {}", mask_path.display()))?;
        tracing::info!(path = %mask_path.display(), "region mask saved");
    }

    // --- 5. Output ---
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ToneReport) {
    println!("Average color: {} ({})", report.average, report.average.to_hex());
    println!("Skin tone: {}", report.category);
    println!("Recommendations:");
    print_entries("Lip", report.recommendations.lip);
    print_entries("Foundation", report.recommendations.foundation);
    print_entries("Eyeshadow", report.recommendations.eyeshadow);
}

fn print_entries(heading: &str, entries: &[ColorEntry<'_>]) {
    println!("  {heading}:");
    for entry in entries {
        println!("    {entry}");
    }
}
