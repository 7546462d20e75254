//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use shelter_core::events::EventBus;
use shelter_data::{DocumentStore, MemoryStore, ShelterGateway, SqliteStore};
use tracing::info;

mod app;
mod config;
mod seed;

use app::ShelterDashApp;
use config::{DashboardConfig, StoreBackend};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref())?;
    info!(backend = ?config.backend, collection = %config.collection, "starting rescue dashboard");

    let runtime = tokio::runtime::Runtime::new()?;

    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(&config.store_path)?),
    };
    let events = Arc::new(EventBus::new());
    let gateway = Arc::new(ShelterGateway::new(store, config.collection.clone()));

    runtime.block_on(seed::seed_if_empty(&gateway, &events, config.seed_csv.as_deref()))?;

    let window_title = config.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |cc| Box::new(ShelterDashApp::new(cc, config, gateway, events, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {e}"))?;

    Ok(())
}
