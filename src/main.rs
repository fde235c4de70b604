use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod controller;
mod models;
mod services;
mod utils;

use api::rates::RatesClient;
use config::Config;
use controller::UiController;
use services::{ChartRenderer, ChartSurface, PngPainter, RangeSelector, RenderOutcome};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("interbank_chart=debug".parse().expect("valid directive"))
            .add_directive("reqwest=warn".parse().expect("valid directive")))
        .with_target(true)
        .init();

    info!("📈 Starting interbank rate chart...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let client = match RatesClient::new(config.request_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create rates client: {}", e);
            return;
        }
    };

    let surface = ChartSurface::new(&config.chart_output, config.chart_width, config.chart_height);
    let renderer = Arc::new(ChartRenderer::new(Arc::new(client), Arc::new(PngPainter), surface));
    let mut controller = UiController::new(RangeSelector::new(), renderer, config.base_url.clone());

    info!("Drawing into {} ({}x{})", config.chart_output.display(), config.chart_width, config.chart_height);
    controller.on_ready();
    println!("Type `help` for the list of triggers.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if !commands::handle_line(&mut controller, &line).await {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read trigger: {}", e);
                break;
            }
        }
    }

    info!("Waiting for pending charts...");
    for result in controller.settle().await {
        match result {
            Ok(RenderOutcome::Drawn { ticket, points, .. }) => {
                info!("Chart for ticket {} finished with {} points", ticket, points)
            }
            Ok(RenderOutcome::Superseded { .. }) => {}
            Err(e) => warn!("Chart failed: {}", e),
        }
    }
    info!("Bye");
}
