// src/main.rs
use crate::config::AppConfig;
use crate::connectors::sheets::GoogleSheetsClient;
use crate::pipeline::engine::DataAutomation;
use crate::strategies::rolling_average::PaddedRollingAverage;
use anyhow::Context;
use dotenvy::dotenv;
use tokio::io::{self, BufReader};
use tracing::{error, info};

mod config;
mod connectors;
mod error;
mod logging;
mod pipeline;
mod strategies;
mod types;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Load Configuration
    let config = AppConfig::new().context("failed to load configuration")?;
    let _log_guard = logging::init(&config.logging)?;

    println!("Welcome to Love Sandwiches Data Automation");
    info!(
        "Starting cycle against '{}' (sheets: {:?})",
        config.spreadsheet.name, config.worksheets
    );

    // 2. Initialize Components
    let client = GoogleSheetsClient::connect(&config.spreadsheet)
        .await
        .with_context(|| format!("failed to open spreadsheet '{}'", config.spreadsheet.name))?;
    info!("Connected to spreadsheet {}", client.spreadsheet_id());

    let strategy = PaddedRollingAverage::from_config(&config.forecast, &config.worksheets.sales);

    // 3. Run one market cycle
    let automation = DataAutomation::new(config, client, strategy);
    let mut stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    if let Err(e) = automation.run(&mut stdin, &mut stdout).await {
        error!("Cycle failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
