use kurs_sniper::analyzer::RecordBuilder;
use kurs_sniper::config::load_config;
use kurs_sniper::notifier::TelegramNotifier;
use kurs_sniper::pipeline;
use kurs_sniper::scraper::ScraperImpl;
use kurs_sniper::utils::{is_weekend, today_wib};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let mut config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_overrides(|key| std::env::var(key).ok());

    let today = today_wib();
    if config.skip_weekends && is_weekend(today) {
        info!("📅 {} is a weekend, nothing to broadcast", today);
        return ExitCode::SUCCESS;
    }

    let builder = match RecordBuilder::new(&config.extraction) {
        Ok(builder) => builder,
        Err(e) => {
            error!("Rule table error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let scraper = match ScraperImpl::new(&config.site) {
        Ok(scraper) => scraper,
        Err(e) => {
            error!("Failed to initialize scraper: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let notifier = match TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
    ) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("Failed to initialize notifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("🚀 kurs-sniper run for {}", today);
    let summary = pipeline::run(&config, &scraper, &notifier, &builder, today).await;

    if summary.any_sent() {
        ExitCode::SUCCESS
    } else {
        error!("No message was delivered");
        ExitCode::FAILURE
    }
}
