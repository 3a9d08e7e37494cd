mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use sim_core::content::{PRODUCT_NAME, PRODUCT_TAGLINE};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{StartupConfig, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::controller::events::UiEvent;
use crate::ui::{widgets::ArboardClipboard, DashboardApp};

fn main() -> anyhow::Result<()> {
    let startup = StartupConfig::parse();
    let loaded = config::load_settings(&startup);
    let settings = loaded.settings;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for warning in &loaded.warnings {
        warn!("{warning}");
    }
    if let Some(path) = &loaded.source {
        info!(path = %path.display(), "loaded settings file");
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let backend = backend_bridge::runtime::launch(cmd_rx, ui_tx, &settings);
    let teardown_tx = cmd_tx.clone();

    let title = format!("{PRODUCT_NAME} | {PRODUCT_TAGLINE}");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            ui::theme::install(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(
                cmd_tx,
                ui_rx,
                Box::new(ArboardClipboard),
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("dashboard window failed: {err}"))?;

    // The app may still hold its sender here.
    let _ = teardown_tx.try_send(BackendCommand::Shutdown);
    drop(teardown_tx);
    if backend.join().is_err() {
        error!("simulation backend thread panicked");
    }
    Ok(())
}
