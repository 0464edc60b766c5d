//! Batch annotation pipeline.
//!
//! Reads exported wall-photo records, resolves the nearest catalog
//! location for each geotagged record, and writes the annotated export.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use banyan::catalog::{load_catalog, LocationIndex};
use banyan::models::{AnnotatedRecord, WallRecord};

#[derive(Parser, Debug)]
#[command(name = "annotate")]
#[command(about = "Annotate exported wall records with their nearest catalog location")]
struct Args {
    /// Exported wall records (JSON array)
    #[arg(short, long)]
    file: PathBuf,

    /// Location catalog artifact (JSON, TOML, or CSV)
    #[arg(long, default_value = "location.json")]
    locations: PathBuf,

    /// Output path for the annotated export
    #[arg(short, long, default_value = "annotated.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Banyan Annotation Pipeline");
    info!("File: {}", args.file.display());

    let locations = load_catalog(&args.locations)
        .with_context(|| format!("Failed to load catalog from {}", args.locations.display()))?;
    let index = LocationIndex::new(locations);

    let content = fs::read_to_string(&args.file).context("Failed to read records export")?;
    let records: Vec<WallRecord> =
        serde_json::from_str(&content).context("Failed to parse records export")?;
    info!("Loaded {} wall records", records.len());

    // Create progress bar
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut annotated_count = 0usize;
    let mut unlocated_count = 0usize;
    let mut unmatched_count = 0usize;

    let mut annotated = Vec::with_capacity(records.len());
    for record in records {
        let entry = annotate_record(&index, record);
        match (&entry.nearest, &entry.record.location) {
            (Some(_), _) => annotated_count += 1,
            (None, None) => unlocated_count += 1,
            (None, Some(_)) => unmatched_count += 1,
        }
        annotated.push(entry);
        pb.inc(1);
    }
    pb.finish();

    info!(
        "Annotated {} records ({} without location, {} without match)",
        annotated_count, unlocated_count, unmatched_count
    );

    let out = serde_json::to_string_pretty(&annotated)?;
    fs::write(&args.out, out)
        .with_context(|| format!("Failed to write annotated export to {}", args.out.display()))?;
    info!("Wrote {}", args.out.display());

    Ok(())
}

/// Resolve one record against the catalog.
///
/// Each record resolves against its own coordinates; records without a
/// geolocation carry through unannotated.
fn annotate_record(index: &LocationIndex, record: WallRecord) -> AnnotatedRecord {
    let nearest = record
        .location
        .and_then(|pos| index.find_nearest(pos.lat, pos.long));

    AnnotatedRecord {
        record,
        nearest,
        annotated_at: Utc::now(),
    }
}
