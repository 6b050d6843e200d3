use std::time::Duration;

use eframe::egui::{self, Ui};

use crate::config::{APP_TITLE, CAPTION};
use crate::data::filter::View;
use crate::render::{render, Mode, Output};
use crate::state::AppState;
use crate::ui::{map, panels, plot, table};

/// How often the source file is re-checked while the window is idle.
const FILE_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VolcanoApp {
    pub state: AppState,
}

impl VolcanoApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for VolcanoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.refresh();
        ctx.request_repaint_after(FILE_POLL_INTERVAL);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- A load failure replaces everything else ----
        if let Some(message) = self.state.error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_panel(ui, &message);
            });
            return;
        }

        // ---- Left side panel: exhibit selector and filters ----
        let before = self.state.criteria.clone();
        egui::SidePanel::left("exhibit_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });
        if self.state.criteria != before {
            self.state.recenter_map = true;
        }

        // ---- Bottom panel: caption ----
        egui::TopBottomPanel::bottom("caption").show(ctx, |ui| {
            ui.label(CAPTION);
        });

        // ---- Central panel: active exhibit ----
        egui::CentralPanel::default().show(ctx, |ui| {
            exhibit(ui, &mut self.state);
        });
    }
}

/// Filter, render and paint the active exhibit.
fn exhibit(ui: &mut Ui, state: &mut AppState) {
    ui.heading(APP_TITLE);

    let Some(report) = state.report.clone() else {
        return;
    };
    let indices = state.visible_indices();
    let view = View {
        table: &report.table,
        indices: &indices,
    };

    match state.mode {
        Mode::FilteredData => {
            ui.strong("Filtered Volcanoes Data");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Search for a Volcano:");
                ui.text_edit_singleline(&mut state.search);
            });
        }
        Mode::Charts => {}
        Mode::Map => {
            ui.strong("Interactive Map");
        }
    }

    match render(&view, state.mode, &state.search) {
        Output::Table(rows) => table::volcano_table(ui, &report.table, &rows),
        Output::Charts(set) => plot::charts(ui, &set),
        Output::Map(m) => map::volcano_map(ui, &m, &mut state.recenter_map),
    }
}
