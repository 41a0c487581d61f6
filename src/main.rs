use clap::{Parser, Subcommand};
use review_analyzer::commands;
use review_analyzer::core::config::{self, AnalyzerConfig};
use review_analyzer::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "review-analyzer",
    about = "Sentiment and key points for customer reviews"
)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one review and print the result
    Analyze {
        /// Product the review is about
        #[arg(short, long)]
        product: String,
        /// Full review text
        #[arg(short, long)]
        review: String,
    },
    /// List previously analyzed reviews
    History,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to review-analyzer.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = std::env::var("REVIEW_ANALYZER_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Debug);

    if let Ok(log_file) = File::create("review-analyzer.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config error, using defaults: {}", e);
        AnalyzerConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Review Analyzer starting up against {}", resolved.base_url);

    match args.command {
        None => tui::run(resolved),
        Some(Command::Analyze { product, review }) => {
            let ok = commands::analyze(&resolved, product, review).await?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::History) => commands::history(&resolved).await,
    }
}
