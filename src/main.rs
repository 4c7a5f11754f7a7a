//! Image-Survey main entry point
//!
//! This is the command-line interface for the Image-Survey page image surveyor.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use image_survey::config::{load_config_or_default, Config};
use image_survey::crawler::survey;
use image_survey::output::print_statistics;
use image_survey::source::read_url_list;
use image_survey::url::parse_page_url;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Image-Survey: find the large images embedded in a list of webpages
///
/// Fetches every page in URL_LIST, probes each image it embeds, and writes
/// images of at least 100 KiB to image_report.csv and unreachable pages to
/// failed_websites.csv.
#[derive(Parser, Debug)]
#[command(name = "image-survey")]
#[command(version = "1.0.0")]
#[command(about = "Find the large images embedded in a list of webpages", long_about = None)]
struct Cli {
    /// Text file with one page URL per line
    #[arg(value_name = "URL_LIST")]
    url_list: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for report files with relative paths
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Read and normalize the URL list without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(url_list) = cli.url_list.as_deref() else {
        // A missing list is a usage hint, not an error
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    setup_logging(cli.verbose, cli.quiet);

    let config =
        load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Default configuration is invalid".to_string(),
        })?;

    if cli.dry_run {
        return handle_dry_run(&config, url_list, cli.output_dir.as_deref());
    }

    handle_survey(&config, url_list, cli.output_dir.as_deref(), cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("image_survey=info,warn"),
            1 => EnvFilter::new("image_survey=debug,info"),
            2 => EnvFilter::new("image_survey=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be surveyed
fn handle_dry_run(
    config: &Config,
    url_list: &Path,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let targets = read_url_list(url_list)?;
    let (image_report, failed_websites) = config.report.paths_in(output_dir);

    println!("=== Image-Survey Dry Run ===\n");

    println!("HTTP:");
    println!("  User-Agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Max redirects: {}", config.http.max_redirects);

    println!("\nReports:");
    println!(
        "  Images >= {} bytes: {}",
        config.report.min_image_bytes,
        image_report.display()
    );
    println!("  Failed websites: {}", failed_websites.display());

    println!("\nPages ({}):", targets.len());
    for target in &targets {
        match parse_page_url(target.as_str()) {
            Ok(url) => println!("  - {} -> {}", target, url),
            Err(e) => println!("  - {} (will fail: {})", target, e),
        }
    }

    Ok(())
}

/// Handles the main survey operation
async fn handle_survey(
    config: &Config,
    url_list: &Path,
    output_dir: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let stats = match survey(config, url_list, output_dir).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Survey failed: {}", e);
            return Err(e.into());
        }
    };

    let (image_report, failed_websites) = config.report.paths_in(output_dir);
    if !quiet {
        print_statistics(&stats);
    }
    println!(
        "Reports generated: {} and {}",
        image_report.display(),
        failed_websites.display()
    );

    Ok(())
}
