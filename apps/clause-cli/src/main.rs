//! Clause segmentation CLI
//!
//! Reads extracted contract text and prints the segmented clauses as JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clause_engine::{ClauseSegmenter, SegmenterConfig};
use shared_types::{ContractDocument, SegmentationReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "clause-cli")]
#[command(version, about = "Segment contract text into classified clauses")]
struct Args {
    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Treat the input as a JSON ContractDocument with per-page text
    #[arg(long)]
    document: bool,

    /// JSON file overriding segmenter limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the full report (document id and counters) instead of just clauses
    #[arg(long)]
    report: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries JSON, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let segmenter = match &args.config {
        Some(path) => load_segmenter(path)?,
        None => ClauseSegmenter::new(),
    };

    let raw = read_input(args.input.as_deref())?;
    let document = if args.document {
        serde_json::from_str::<ContractDocument>(&raw).context("parsing ContractDocument JSON")?
    } else {
        ContractDocument {
            id: input_name(args.input.as_deref()),
            filename: input_name(args.input.as_deref()),
            pages: 1,
            text_content: vec![raw],
        }
    };

    let report = segmenter.segment_document(&document);
    tracing::info!(
        "Segmented {} into {} clauses ({} raw matches)",
        report.document_id,
        report.clauses.len(),
        report.stats.raw_matches
    );
    if report.clauses.is_empty() {
        tracing::warn!("No clauses produced; input is empty or too short");
    } else if report.stats.fallback_used {
        tracing::warn!("No structural markers found; emitted the whole text as one clause");
    }

    println!("{}", render(&report, args.report, args.pretty)?);
    Ok(())
}

fn load_segmenter(path: &Path) -> Result<ClauseSegmenter> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = SegmenterConfig::from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(ClauseSegmenter::with_config(config)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn input_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdin".to_string())
}

fn render(report: &SegmentationReport, full: bool, pretty: bool) -> Result<String> {
    let json = match (full, pretty) {
        (true, true) => serde_json::to_string_pretty(report)?,
        (true, false) => serde_json::to_string(report)?,
        (false, true) => serde_json::to_string_pretty(&report.clauses)?,
        (false, false) => serde_json::to_string(&report.clauses)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_name_defaults_to_stdin() {
        assert_eq!(input_name(None), "stdin");
        assert_eq!(input_name(Some(Path::new("/tmp/facility.txt"))), "facility.txt");
    }

    #[test]
    fn test_config_errors_name_the_file() {
        let path = std::env::temp_dir().join(format!("clause-cli-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, "{\"max_clause_chars\": 5}").unwrap();

        let err = load_segmenter(&path).unwrap_err();
        let message = format!("{:#}", err);
        std::fs::remove_file(&path).ok();

        assert!(message.contains("parsing config"), "{}", message);
        assert!(message.contains(&path.display().to_string()), "{}", message);
        assert!(message.contains("max_clause_chars"), "{}", message);
    }

    #[test]
    fn test_render_clauses_or_report() {
        let document = ContractDocument {
            id: "loan".to_string(),
            filename: "loan.txt".to_string(),
            pages: 1,
            text_content: vec!["1. Events of Default\n(a) non-payment of any sum due\n".to_string()],
        };
        let report = ClauseSegmenter::new().segment_document(&document);

        let clauses: serde_json::Value =
            serde_json::from_str(&render(&report, false, false).unwrap()).unwrap();
        assert_eq!(clauses.as_array().map(Vec::len), Some(2));
        assert_eq!(clauses[0]["type"], "default");

        let full: serde_json::Value =
            serde_json::from_str(&render(&report, true, true).unwrap()).unwrap();
        assert_eq!(full["document_id"], "loan");
        assert_eq!(full["stats"]["raw_matches"], 2);
    }
}
