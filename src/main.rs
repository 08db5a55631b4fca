use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use plagscan::{checker_from_config, CandidateSource, PlagscanConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Check a document for phrase overlap against local reference files.
#[derive(Debug, Parser)]
#[command(name = "plagscan", version, about)]
struct Args {
    /// The document to check.
    original: PathBuf,

    /// A reference document; repeat for several. The file name is the source id.
    #[arg(short, long = "source", required = true)]
    sources: Vec<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlagscanConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlagscanConfig::default(),
    };
    let checker = checker_from_config(&config)?;

    let original = fs::read_to_string(&args.original)
        .with_context(|| format!("reading {}", args.original.display()))?;
    let sources: Vec<CandidateSource> = args.sources.iter().map(|p| load_source(p)).collect();

    let result = checker.check(&original, &sources);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Overall similarity: {:.1}%", result.overall_similarity);
    for (rank, m) in result.matches.iter().enumerate() {
        println!(
            "{:>3}. {:>5.1}%  [{}] {}",
            rank + 1,
            m.similarity,
            m.source,
            m.matched_text.trim()
        );
    }
    Ok(())
}

/// Unreadable files become unavailable sources rather than aborting the run.
fn load_source(path: &Path) -> CandidateSource {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match fs::read_to_string(path) {
        Ok(text) => CandidateSource::new(id, text).with_url(format!("file://{}", path.display())),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "source_unreadable");
            CandidateSource::unavailable(id)
        }
    }
}
