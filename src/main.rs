//! CYD Panel - Main Entry Point
//!
//! Starts the host worker and opens the panel window.

use std::time::Duration;

use anyhow::Context as _;
use cyd_panel::{
    backend::{ConfigHost, HostWorker},
    config::{self, AppState, OptionsExt},
    frontend::PanelApp,
    ConfigOptions,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();

    tracing::info!("Starting CYD Panel");

    let app_state = AppState::load_or_default();
    cyd_panel::i18n::set_language(app_state.ui_preferences.language);

    let host = build_host(&app_state)?;
    let refresh = Duration::from_secs(u64::from(ConfigOptions::new().update_interval()));
    let (bridge, worker) = HostWorker::spawn(host, refresh)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 520.0])
            .with_title("CYD Panel"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "CYD Panel",
        native_options,
        Box::new(move |cc| Ok(Box::new(PanelApp::new(cc, bridge, Some(worker), app_state)))),
    );

    tracing::info!("Shutting down...");
    result.map_err(|e| anyhow::anyhow!("UI terminated with an error: {e}"))
}

/// Console logging plus a daily log file in the app data directory
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cyd_panel=debug"));

    let file = config::app_data_dir().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir.join("logs"), "cyd-panel.log");
        tracing_appender::non_blocking(appender)
    });

    match file {
        Some((writer, guard)) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

#[cfg(feature = "demo-host")]
fn build_host(_app_state: &AppState) -> anyhow::Result<Box<dyn ConfigHost>> {
    tracing::info!("Using the demo host");
    Ok(Box::new(cyd_panel::backend::DemoHost::new()))
}

#[cfg(not(feature = "demo-host"))]
fn build_host(app_state: &AppState) -> anyhow::Result<Box<dyn ConfigHost>> {
    let dir = app_state
        .resolved_host_dir()
        .context("Could not determine the host directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create host directory {}", dir.display()))?;
    tracing::info!("Using file host at {}", dir.display());
    Ok(Box::new(cyd_panel::backend::FileHost::new(dir)))
}
