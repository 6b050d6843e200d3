use std::collections::BTreeMap;

use crate::config::{MAP_ZOOM, PIE_START_ANGLE, TOP_N_TALLEST};
use crate::data::filter::View;

// ---------------------------------------------------------------------------
// Mode – which exhibit consumes the filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    #[default]
    FilteredData,
    Charts,
    Map,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::FilteredData, Mode::Charts, Mode::Map];

    pub fn label(self) -> &'static str {
        match self {
            Mode::FilteredData => "Filtered Data",
            Mode::Charts => "Charts",
            Mode::Map => "Map",
        }
    }
}

// ---------------------------------------------------------------------------
// Output – what the front end has to draw
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Row indices into the base table, after the name search.
    Table(Vec<usize>),
    Charts(ChartSet),
    Map(MapView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TallBar {
    pub name: String,
    pub elevation: f64,
}

/// One pie slice. Angles are in degrees, counter-clockwise from +x.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeShare {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl TypeShare {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    /// Highest first.
    pub tallest: Vec<TallBar>,
    /// Most frequent type first.
    pub type_shares: Vec<TypeShare>,
    /// `(year, eruptions)`, ascending by year.
    pub eruptions_by_year: Vec<(i32, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapView {
    NoData,
    Points {
        /// `(lat, lon)` mean of the markers.
        center: (f64, f64),
        zoom: u32,
        markers: Vec<Marker>,
    },
}

impl MapView {
    /// Degrees of longitude visible across the map at `zoom`.
    pub fn lon_span(zoom: u32) -> f64 {
        360.0 / f64::from(1u32 << zoom.min(20))
    }

    /// Marker closest to `(lat, lon)` in degree space.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<&Marker> {
        let MapView::Points { markers, .. } = self else {
            return None;
        };
        markers.iter().min_by(|a, b| {
            let da = (a.lat - lat).powi(2) + (a.lon - lon).powi(2);
            let db = (b.lat - lat).powi(2) + (b.lon - lon).powi(2);
            da.total_cmp(&db)
        })
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Produce the output for `mode`. The query only affects the table.
pub fn render(view: &View<'_>, mode: Mode, query: &str) -> Output {
    match mode {
        Mode::FilteredData => Output::Table(search(view, query)),
        Mode::Charts => Output::Charts(charts(view)),
        Mode::Map => Output::Map(map(view)),
    }
}

/// Case-insensitive substring match on the name. An empty query keeps all rows.
pub fn search(view: &View<'_>, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return view.indices.to_vec();
    }
    let needle = query.to_lowercase();
    view.records()
        .filter(|(_, r)| {
            r.name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

pub fn charts(view: &View<'_>) -> ChartSet {
    ChartSet {
        tallest: tallest(view, TOP_N_TALLEST),
        type_shares: type_shares(view),
        eruptions_by_year: eruptions_by_year(view),
    }
}

/// The `n` highest rows by elevation; ties keep view order.
pub fn tallest(view: &View<'_>, n: usize) -> Vec<TallBar> {
    let mut bars: Vec<TallBar> = view
        .records()
        .filter_map(|(_, r)| {
            r.elevation.map(|elevation| TallBar {
                name: r.display_name().to_string(),
                elevation,
            })
        })
        .collect();
    bars.sort_by(|a, b| b.elevation.total_cmp(&a.elevation));
    bars.truncate(n);
    bars
}

/// Row counts per type, most frequent first, with pie angles filled in.
pub fn type_shares(view: &View<'_>) -> Vec<TypeShare> {
    // label → (first position, count)
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (pos, (_, r)) in view.records().enumerate() {
        if let Some(t) = r.volcano_type.as_deref() {
            counts.entry(t).or_insert((pos, 0)).1 += 1;
        }
    }

    let mut ordered: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(label, (first, count))| (label, first, count))
        .collect();
    ordered.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

    let total: usize = ordered.iter().map(|(_, _, c)| c).sum();
    let mut start = PIE_START_ANGLE;
    ordered
        .into_iter()
        .map(|(label, _, count)| {
            let fraction = count as f64 / total as f64;
            let share = TypeShare {
                label: label.to_string(),
                count,
                fraction,
                start_deg: start,
                sweep_deg: fraction * 360.0,
            };
            start += share.sweep_deg;
            share
        })
        .collect()
}

pub fn eruptions_by_year(view: &View<'_>) -> Vec<(i32, usize)> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for (_, r) in view.records() {
        *by_year.entry(r.eruption_year).or_default() += 1;
    }
    by_year.into_iter().collect()
}

/// Named, located rows as markers, centred on their mean coordinate.
pub fn map(view: &View<'_>) -> MapView {
    if view.is_empty() {
        return MapView::NoData;
    }
    let markers: Vec<Marker> = view
        .records()
        .filter(|(_, r)| r.latitude.is_finite() && r.longitude.is_finite())
        .filter_map(|(_, r)| {
            Some(Marker {
                lat: r.latitude,
                lon: r.longitude,
                name: r.name.clone()?,
            })
        })
        .collect();

    if markers.is_empty() {
        return MapView::NoData;
    }

    let n = markers.len() as f64;
    let lat = markers.iter().map(|m| m.lat).sum::<f64>() / n;
    let lon = markers.iter().map(|m| m.lon).sum::<f64>() / n;
    MapView::Points {
        center: (lat, lon),
        zoom: MAP_ZOOM,
        markers,
    }
}
