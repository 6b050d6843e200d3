use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::ElevationRange;
use crate::render::Mode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – exhibit selector and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Exhibits");
    ui.separator();

    ui.label("Choose an exhibit:");
    let mut mode = state.mode;
    for m in Mode::ALL {
        ui.radio_value(&mut mode, m, m.label());
    }
    state.set_mode(mode);
    ui.separator();

    // Keep the table alive independently of `state` so filters can be mutated.
    let Some(report) = state.report.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    let table = &report.table;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, "Select Country:", &table.countries, &mut state.criteria.countries);
            ui.separator();

            elevation_range(ui, table.elevation_bounds, state);
            ui.separator();

            multi_select(ui, "Select Volcano Type:", &table.types, &mut state.criteria.types);
        });
}

/// Collapsible checkbox list. Nothing checked means no filtering.
fn multi_select(ui: &mut Ui, title: &str, options: &BTreeSet<String>, selected: &mut BTreeSet<String>) {
    let header_text = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                selected.clear();
            }
            for value in options {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    AppState::toggle(selected, value);
                }
            }
        });
}

fn elevation_range(ui: &mut Ui, bounds: Option<(f64, f64)>, state: &mut AppState) {
    ui.strong("Select Elevation Range (m):");
    let Some((min, max)) = bounds else {
        ui.label("No elevation data.");
        return;
    };

    let ElevationRange { mut lo, mut hi } = state.criteria.elevation;
    let lo_changed = ui
        .add(Slider::new(&mut lo, min..=max).text("from").fixed_decimals(0))
        .changed();
    let hi_changed = ui
        .add(Slider::new(&mut hi, min..=max).text("to").fixed_decimals(0))
        .changed();
    if lo_changed || hi_changed {
        state.set_elevation(lo, hi);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.cache.path().display().to_string());

        if let Some(report) = &state.report {
            ui.separator();
            ui.label(format!(
                "{} volcanoes loaded, {} visible",
                report.table.len(),
                state.visible_indices().len()
            ));
        }
    });
}

/// Replaces every exhibit while the source file is unusable.
pub fn error_panel(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(message).color(Color32::RED).heading());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open volcano list")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
