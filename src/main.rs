mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod summary;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::VolcanoApp;
use clap::Parser;
use config::{Args, APP_TITLE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.summary {
        return print_summary(&args.csv);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(args.csv, args.mode);
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(VolcanoApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}

fn print_summary(path: &Path) -> Result<()> {
    let report = data::load_clean(path, data::clean::current_year())
        .with_context(|| format!("loading {}", path.display()))?;
    log::debug!("{} exclusions recorded", report.exclusions.len());
    print!("{}", summary::format_summary(path, &report));
    Ok(())
}
