mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    config::{DEFAULT_API_BASE, DEFAULT_COHORT},
    ApiConfig,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{PartyPlannerApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Desktop client for the party planner events API")]
struct Args {
    /// Base URL of the events API.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Cohort path segment appended to the base URL.
    #[arg(long, default_value = DEFAULT_COHORT)]
    cohort: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let startup = StartupConfig {
        api: ApiConfig::new(args.api_base, args.cohort),
    };
    let api_root = startup.api.api_root()?;
    tracing::info!(%api_root, "starting party planner");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.api.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Party Planner")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Party Planner",
        options,
        Box::new(|_cc| Ok(Box::new(PartyPlannerApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("gui exited with error: {err}"))
}
