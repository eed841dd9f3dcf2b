//! pptx-inventory - report the content elements of every slide in a .pptx file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pptx_inventory::{analyze_file, AnalysisReport, AnalyzerConfig};

#[derive(Parser)]
#[command(name = "pptx-inventory")]
#[command(version, about = "Inventory the slides of a PowerPoint file", long_about = None)]
#[command(after_help = "EXAMPLES:
    pptx-inventory -i deck.pptx                  Write ../analysis/deck.json next to the input's folder
    pptx-inventory -i deck.pptx -o report.json   Write the report to report.json")]
struct Cli {
    /// Presentation to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Where to write the JSON report
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Directory name used for the default output path
    #[arg(long, value_name = "DIR", env = "PPT_ANALYSIS_DIR", default_value = "analysis")]
    analysis_dir: String,

    /// Inventory slides one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .canonicalize()
        .with_context(|| format!("PPTX file not found: {}", cli.input.display()))?;

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(&input, &cli.analysis_dir),
    };

    log::info!("Parsing PPTX file: {}", input.display());
    log::info!("Output will be saved to: {}", output.display());

    let config = AnalyzerConfig::builder().parallel(!cli.sequential).build();
    let report = analyze_file(&input, &config)?;

    let partial = report.partial_slides().count();
    if partial > 0 {
        log::warn!("{partial} of {} slides have no content part", report.total_slides);
    }

    write_report(&report, &output)?;
    log::info!("Analysis completed successfully. Results saved to: {}", output.display());
    Ok(())
}

/// Single-line failure text, including the whole context chain.
fn error_message(e: &anyhow::Error) -> String {
    format!("Error: {e:#}")
}

/// `<input dir>/../<analysis dir>/<input stem>.json`
fn default_output_path(input: &Path, analysis_dir: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_os_string()).unwrap_or_else(|| "report".into());
    let mut file_name = stem;
    file_name.push(".json");

    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("..")
        .join(analysis_dir)
        .join(file_name)
}

fn write_report(report: &AnalysisReport, output: &Path) -> Result<()> {
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
