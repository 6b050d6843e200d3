use eframe::egui::Ui;
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoint, Points};

use crate::color::MARKER_COLOR;
use crate::config::NO_MAP_DATA;
use crate::render::MapView;

/// Pointer distance (screen points) within which a marker counts as hovered.
const PICK_RADIUS: f32 = 8.0;

/// Render volcano markers on a lon/lat plane, or the fallback text.
///
/// When `recenter` is set the view jumps to the markers' mean coordinate at
/// the map's initial zoom; the flag is cleared afterwards so the user can pan.
pub fn volcano_map(ui: &mut Ui, map: &MapView, recenter: &mut bool) {
    let MapView::Points {
        center: (lat, lon),
        zoom,
        markers,
    } = map
    else {
        ui.label(NO_MAP_DATA);
        return;
    };

    let lon_span = MapView::lon_span(*zoom);
    let bounds = PlotBounds::from_min_max(
        [lon - lon_span / 2.0, lat - lon_span / 4.0],
        [lon + lon_span / 2.0, lat + lon_span / 4.0],
    );
    let reset = std::mem::take(recenter);
    let positions: Vec<[f64; 2]> = markers.iter().map(|m| [m.lon, m.lat]).collect();

    let response = Plot::new("volcano_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| -> Option<String> {
            if reset {
                plot_ui.set_plot_bounds(bounds);
            }
            plot_ui.points(
                Points::new(positions)
                    .radius(4.0)
                    .color(MARKER_COLOR)
                    .shape(MarkerShape::Circle)
                    .filled(true),
            );

            let pointer = plot_ui.pointer_coordinate()?;
            let nearest = map.nearest(pointer.y, pointer.x)?;
            let at = plot_ui.screen_from_plot(PlotPoint::new(nearest.lon, nearest.lat));
            let cursor = plot_ui.screen_from_plot(pointer);
            (at.distance(cursor) <= PICK_RADIUS).then(|| nearest.name.clone())
        });

    if let Some(name) = response.inner {
        response.response.on_hover_text_at_pointer(name);
    }
}
