//! vcollide CLI - batch collision geometry extraction.
//!
//! Usage: vcollide <COMMAND> [OPTIONS]
//!
//! Run `vcollide --help` for available commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use rayon::prelude::*;

use vcollide::extract::{extract_from_str, DocumentReport};
use vcollide::io::tri;

#[derive(Parser)]
#[command(name = "vcollide")]
#[command(author, version, about = "Collision geometry extraction from .vphys documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every .vphys document in a directory to .tri dumps
    Extract {
        /// Directory scanned (non-recursively) for .vphys documents
        #[arg(short, long, default_value = "input")]
        input: PathBuf,

        /// Directory receiving one .tri file per document
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Display what one document would extract, without writing anything
    Info {
        /// Input .vphys document
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Extract {
            input,
            output,
            sequential,
        } => cmd_extract(&input, &output, sequential)?,
        Commands::Info { input } => cmd_info(&input)?,
    }

    Ok(())
}

/// Per-document outcome, aggregated for the batch summary.
struct FileSummary {
    triangles: usize,
    hulls: usize,
    meshes: usize,
    written: bool,
}

fn cmd_extract(input: &Path, output: &Path, sequential: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        fs::create_dir_all(input)?;
        println!(
            "Created {} — place your .vphys documents there and rerun.",
            input.display()
        );
        return Ok(());
    }

    let documents = discover_documents(input)?;
    if documents.is_empty() {
        println!("No .vphys documents found in {}", input.display());
        return Ok(());
    }

    fs::create_dir_all(output)?;

    let mode = if sequential { "sequential" } else { "parallel" };
    println!(
        "Extracting {} document(s) from {} ({})...",
        documents.len(),
        input.display(),
        mode
    );

    let start = Instant::now();
    let process = |path: &PathBuf| match process_document(path, output) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            None
        }
    };
    // Documents are independent; nothing is shared beyond the output dir.
    let outcomes: Vec<Option<FileSummary>> = if sequential {
        documents.iter().map(process).collect()
    } else {
        documents.par_iter().map(process).collect()
    };
    let elapsed = start.elapsed();

    let done: Vec<FileSummary> = outcomes.into_iter().flatten().collect();
    let failed = documents.len() - done.len();
    let written = done.iter().filter(|s| s.written).count();
    let triangles: usize = done.iter().map(|s| s.triangles).sum();
    let hulls: usize = done.iter().map(|s| s.hulls).sum();
    let meshes: usize = done.iter().map(|s| s.meshes).sum();

    println!(
        "Done: {} document(s), {} hulls, {} meshes, {} triangles, {} file(s) written ({:.2?})",
        done.len(),
        hulls,
        meshes,
        triangles,
        written,
        elapsed
    );
    if failed > 0 {
        println!("{} document(s) failed; see warnings above.", failed);
    }

    Ok(())
}

fn process_document(path: &Path, output: &Path) -> vcollide::error::Result<FileSummary> {
    let text = fs::read_to_string(path)?;
    let report = extract_from_str(&text)?;

    log_report(path, &report);

    if report.triangles.is_empty() {
        log::info!("{}: no triangles, skipping write", path.display());
        return Ok(FileSummary {
            triangles: 0,
            hulls: report.hulls_extracted,
            meshes: report.meshes_extracted,
            written: false,
        });
    }

    let stem = path.file_stem().unwrap_or(path.as_os_str());
    let out_path = output.join(stem).with_extension("tri");
    tri::save(&report.triangles, &out_path)?;

    println!(
        "{} -> {} ({} triangles)",
        path.display(),
        out_path.display(),
        report.triangles.len()
    );

    Ok(FileSummary {
        triangles: report.triangles.len(),
        hulls: report.hulls_extracted,
        meshes: report.meshes_extracted,
        written: true,
    })
}

fn log_report(path: &Path, report: &DocumentReport) {
    log::info!(
        "{}: {}/{} hulls, {}/{} meshes, {} triangles",
        path.display(),
        report.hulls_extracted,
        report.hulls_seen,
        report.meshes_extracted,
        report.meshes_seen,
        report.triangles.len()
    );
    if report.entries_skipped > 0 {
        log::warn!(
            "{}: skipped {} shape entries ({} malformed blobs)",
            path.display(),
            report.entries_skipped,
            report.blob_errors
        );
    }
    if report.walk.walks_truncated > 0 {
        log::warn!(
            "{}: {} face walks truncated by the safety bound",
            path.display(),
            report.walk.walks_truncated
        );
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let report = extract_from_str(&text)?;

    println!("File: {}", input.display());
    println!("Accepted attribute indices: {:?}", report.accepted_attributes);
    println!(
        "Hulls: {} seen, {} extracted",
        report.hulls_seen, report.hulls_extracted
    );
    println!(
        "Meshes: {} seen, {} extracted",
        report.meshes_seen, report.meshes_extracted
    );
    println!("Triangles: {}", report.triangles.len());
    println!(
        "Output size: {} bytes",
        report.triangles.len() * vcollide::geom::Triangle::ENCODED_SIZE
    );
    println!(
        "Skipped entries: {} ({} malformed blobs)",
        report.entries_skipped, report.blob_errors
    );
    println!("Rejected index triples: {}", report.rejected_triples);
    println!(
        "Face walks: {} starts skipped, {} abandoned, {} truncated",
        report.walk.faces_skipped, report.walk.walks_abandoned, report.walk.walks_truncated
    );

    Ok(())
}

/// Non-recursive scan for `.vphys` documents, sorted for stable output.
fn discover_documents(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut documents: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("vphys"))
        })
        .collect();
    documents.sort();
    Ok(documents)
}
