use eframe::egui::epaint::Mesh;
use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Pos2, ScrollArea, Sense, Shape, Ui};
use egui_plot::{Bar, BarChart, Line, MarkerShape, Plot, Points};

use crate::color::{ColorMap, BAR_COLOR, LINE_COLOR};
use crate::render::{ChartSet, TallBar, TypeShare};

const CHART_HEIGHT: f32 = 300.0;
const PIE_SIZE: f32 = 320.0;

/// Slices thinner than this get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.02;

// ---------------------------------------------------------------------------
// Charts exhibit (central panel)
// ---------------------------------------------------------------------------

/// Render the three charts, top to bottom.
pub fn charts(ui: &mut Ui, set: &ChartSet) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Top 10 Tallest Volcanoes");
            tallest_chart(ui, &set.tallest);
            ui.add_space(16.0);

            ui.heading("Volcano Types Distribution");
            type_pie(ui, &set.type_shares);
            ui.add_space(16.0);

            ui.heading("Volcano Eruptions by Year");
            eruption_line(ui, &set.eruptions_by_year);
        });
}

fn tallest_chart(ui: &mut Ui, bars: &[TallBar]) {
    let chart = BarChart::new(
        bars.iter()
            .enumerate()
            .map(|(i, b)| Bar::new(i as f64 + 1.0, b.elevation).name(&b.name).width(0.6))
            .collect(),
    )
    .color(BAR_COLOR)
    .name("Elevation (m)");

    Plot::new("tallest_volcanoes")
        .height(CHART_HEIGHT)
        .x_axis_label("Volcano Name")
        .y_axis_label("Elevation (m)")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));

    // Bars are numbered by rank; names are listed underneath.
    egui::Grid::new("tallest_names")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (i, b) in bars.iter().enumerate() {
                ui.label(format!("{}.", i + 1));
                ui.label(b.name.as_str());
                ui.label(format!("{:.0} m", b.elevation));
                ui.end_row();
            }
        });
}

fn type_pie(ui: &mut Ui, shares: &[TypeShare]) {
    if shares.is_empty() {
        ui.label("No volcano types in the current selection.");
        return;
    }
    let colors = ColorMap::new(shares.iter().map(|s| s.label.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(PIE_SIZE, PIE_SIZE), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = PIE_SIZE * 0.45;

        for share in shares {
            let mesh = slice_mesh(center, radius, share, colors.color_for(&share.label));
            painter.add(Shape::mesh(mesh));
        }
        for share in shares.iter().filter(|s| s.fraction >= MIN_LABELLED_FRACTION) {
            painter.text(
                polar(center, radius * 0.65, share.mid_deg()),
                Align2::CENTER_CENTER,
                share.percent_label(),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }

        ui.vertical(|ui: &mut Ui| {
            for share in shares {
                ui.horizontal(|ui: &mut Ui| {
                    ui.colored_label(colors.color_for(&share.label), "■");
                    ui.label(format!("{} ({})", share.label, share.count));
                });
            }
        });
    });
}

fn eruption_line(ui: &mut Ui, counts: &[(i32, usize)]) {
    let series: Vec<[f64; 2]> = counts
        .iter()
        .map(|&(year, n)| [f64::from(year), n as f64])
        .collect();

    Plot::new("eruptions_by_year")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Number of Eruptions")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(series.clone()).color(LINE_COLOR).width(1.5).name("Eruptions"));
            plot_ui.points(
                Points::new(series)
                    .color(LINE_COLOR)
                    .radius(3.0)
                    .shape(MarkerShape::Circle),
            );
        });
}

// -- Pie geometry --

/// Screen point at `deg` (counter-clockwise from +x) on a circle.
fn polar(center: Pos2, radius: f32, deg: f64) -> Pos2 {
    let a = deg.to_radians() as f32;
    pos2(center.x + radius * a.cos(), center.y - radius * a.sin())
}

/// Triangle fan for one slice, about one segment per two degrees.
fn slice_mesh(center: Pos2, radius: f32, share: &TypeShare, color: Color32) -> Mesh {
    let steps = ((share.sweep_deg / 2.0).ceil() as u32).max(1);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let deg = share.start_deg + share.sweep_deg * f64::from(i) / f64::from(steps);
        mesh.colored_vertex(polar(center, radius, deg), color);
    }
    for i in 1..=steps {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}
