use std::fs::{self, File};
use std::sync::Arc;

use campus_lib::CampusClient;
use campus_tui::app::App;
use campus_tui::config::{self, Config, LOG_LEVEL_ENV};
use campus_tui::credentials::StoredTokenProvider;
use campus_tui::error::AppError;
use campus_tui::paths;
use campus_tui::store::{SqliteBackend, Store};
use log::{error, info, warn};
use simplelog::{Config as LogConfig, WriteLogger};
use tablekit::terminal::Terminal;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    init_logging()?;
    info!("Starting campus console");

    let store = open_store().await?;
    let config = Config::resolve(&store).await?;
    info!("API at {} (timeout {:?})", config.api_url, config.timeout);

    let credentials = Arc::new(StoredTokenProvider::new(store.clone()));
    let client = CampusClient::builder()
        .url(config.api_url)
        .shared_token_provider(credentials.clone())
        .timeout(config.timeout)
        .build()?;

    let (app, completions) = App::new(store, credentials, client).await;
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal, completions).await
}

/// Log to `<cache>/latest.log`, archiving the previous run's log.
fn init_logging() -> Result<(), AppError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let level = config::log_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    WriteLogger::init(level, LogConfig::default(), File::create(path)?)?;
    Ok(())
}

async fn open_store() -> Result<Store, AppError> {
    let Some(path) = paths::settings_db() else {
        warn!("No data directory, settings will not be saved");
        return Ok(Store::in_memory());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(Store::new(SqliteBackend::open(&path).await?))
}
