mod bookmarks;
mod catalog;
mod config;
mod exporter;
mod http_client;
mod models;
mod status;

use crate::config::Config;
use crate::exporter::ExportOutcome;
use crate::status::StatusLine;
use clap::Parser;
use log::{error, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookmark-exporter")]
#[command(about = "Export natomanga bookmarks with latest chapter dates from MangaDex")]
struct Cli {
    /// Path to config.toml (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file, overriding the configured filename
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Suppress the progress status line
    #[arg(long)]
    quiet: bool,
}

fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("stdout")
                .build(log::LevelFilter::Info),
        )
        .expect("default logging config");
    let _ = log4rs::init_config(config);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let client = match config.http.create_http_client() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.output_file));

    let status = StatusLine::new(!cli.quiet);
    status.set("Starting export...");

    let result = exporter::export(&client, &config, &output_path, &status).await;
    status.finish();

    match result {
        Ok(ExportOutcome::Exported { path, count }) => {
            info!("Wrote {} bookmarks to {}", count, path.display());
        }
        Ok(ExportOutcome::NoBookmarks) => {
            error!("No bookmarks found; nothing exported");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}
