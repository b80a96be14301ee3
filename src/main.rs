//! Sales Dashboard - interactive retail sales analysis
//!
//! Loads a CSV of order line items once, then filters and aggregates it for
//! four pages (Home, Revenue Trends, Best-Selling Products, Regional Analysis).

mod charts;
mod config;
mod data;
mod format;
mod gui;
mod pages;
mod stats;

use anyhow::{anyhow, Context, Result};
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let config = DashboardConfig::load().context("failed to read dashboard configuration")?;

    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!(data = %config.data_path.display(), "startup");

    // Without data there is nothing to show, so a failed load ends the process
    let mut loader = DataLoader::new();
    let table = loader
        .load(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    let app = DashboardApp::new(loader, table, &config.data_path)
        .context("failed to prepare filters")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Superstore Sales Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Superstore Sales Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
