use clap::{Parser, ValueEnum};
use kensa::prelude::*;
use std::process;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CATALOG_PATH: &str = "src/blockDefinitions.json";

/// Output format for the validation report.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Validates a block definition catalog for correctness and consistency
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the block definitions JSON file
    #[arg(default_value = DEFAULT_CATALOG_PATH)]
    catalog_path: String,

    /// How to print the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fail when the catalog has warnings, not only errors
    #[arg(long)]
    deny_warnings: bool,

    /// Warn about block and property keys that are not lowercase slugs
    #[arg(long)]
    check_slugs: bool,

    /// Additional SQL keyword to reject in dropdown queries (repeatable)
    #[arg(long = "forbid", value_name = "KEYWORD")]
    forbidden_keywords: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let passed = run_validation(&cli);
    process::exit(if passed { 0 } else { 1 });
}

fn run_validation(cli: &Cli) -> bool {
    let start = Instant::now();
    let text_output = matches!(cli.format, OutputFormat::Text);

    if text_output {
        println!("\n━━━ Block Definitions Validator ━━━");
        println!("ℹ Validating: {}", cli.catalog_path);
    }

    let document = load_document(&cli.catalog_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    if text_output {
        println!("✓ JSON syntax is valid");
    }

    let mut builder = Validator::builder().with_slug_checks(cli.check_slugs);
    for keyword in &cli.forbidden_keywords {
        builder = builder.with_forbidden_keyword(keyword);
    }
    let validator = builder.build();
    debug!(keywords = ?validator.forbidden_keywords(), "validator configured");

    if text_output {
        println!("\n━━━ Structure Validation ━━━");
        if let Some(count) = document
            .get("blockTypes")
            .and_then(|b| b.as_object())
            .map(|b| b.len())
        {
            println!("✓ Found {} block type(s)", count);
        }
    }

    let report = validator.validate(&document);
    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        elapsed = ?start.elapsed(),
        "validation finished"
    );

    match cli.format {
        OutputFormat::Text => print!("{}", ReportFormatter::format_text(&report)),
        OutputFormat::Json => {
            let json = ReportFormatter::format_json(&report)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to render report: {}", e)));
            println!("{}", json);
        }
    }

    let passed = report.is_acceptable() && !(cli.deny_warnings && !report.warnings.is_empty());
    if text_output && report.is_acceptable() && !passed {
        println!("✗ Warnings are denied (--deny-warnings)");
    }
    passed
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\n✗ ERROR: {}", message);
    process::exit(1);
}
