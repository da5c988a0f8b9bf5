use clap::Parser;
use coinlist::core::config::{self, CliOverrides, CoinlistConfig};
use coinlist::core::theme::AppThemes;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "coinlist", about = "Cryptocurrency market list in the terminal")]
struct Args {
    /// Quote currency for prices (e.g. usd, eur)
    #[arg(short, long)]
    currency: Option<String>,

    /// Initial theme when none has been saved yet
    #[arg(short, long, value_enum)]
    theme: Option<AppThemes>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to coinlist.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("coinlist.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        CoinlistConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            vs_currency: args.currency,
            theme: args.theme,
        },
    );

    log::info!(
        "Coinlist starting up (api: {}, currency: {}, theme: {})",
        resolved.api_base_url,
        resolved.vs_currency,
        resolved.default_theme.label()
    );

    coinlist::tui::run(resolved)
}
