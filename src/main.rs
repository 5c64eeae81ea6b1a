use clap::Parser;
use newsdesk::core::config::{load_config, resolve};
use newsdesk::news::Category;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "newsdesk", about = "Browse top headlines from the terminal")]
struct Args {
    /// Category to open with (business, technology, entertainment)
    #[arg(short, long)]
    category: Option<Category>,

    /// Two-letter country code for headlines
    #[arg(long)]
    country: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to newsdesk.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("newsdesk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Default::default()
    });
    let config = resolve(&config, args.category, args.country.as_deref());

    log::info!(
        "Newsdesk starting up: category={}, country={}",
        config.category,
        config.country
    );

    newsdesk::tui::run(config)
}
