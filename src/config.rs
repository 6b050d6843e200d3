use std::path::PathBuf;

use clap::Parser;

use crate::render::Mode;

// ---------------------------------------------------------------------------
// Fixed settings
// ---------------------------------------------------------------------------

/// Default location of the volcano export, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "volcanoes.csv";

pub const APP_TITLE: &str = "Volcanoes of the World";

/// Shown beneath every exhibit.
pub const CAPTION: &str =
    "Explore and analyze the dataset using the interactive filters and visualizations above!";

/// Map-mode fallback when the filtered view has no plottable rows.
pub const NO_MAP_DATA: &str = "No data available for the selected filters.";

/// Initial map zoom, in web-map zoom levels (0 = whole world).
pub const MAP_ZOOM: u32 = 3;

/// Number of bars in the "tallest volcanoes" chart.
pub const TOP_N_TALLEST: usize = 10;

/// Start angle (degrees, counter-clockwise from +x) of the first pie slice.
pub const PIE_START_ANGLE: f64 = 140.0;

/// Cell values read as "missing", in addition to the empty string.
pub const NA_VALUES: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

/// Source header → semantic field name.
pub const COLUMN_MAP: &[(&str, &str)] = &[
    ("Volcano Number", "Volcano_ID"),
    ("Volcano Name", "Name"),
    ("Country", "Country"),
    ("Volcanic Region", "Region"),
    ("Volcanic Province", "Province"),
    ("Volcano Landform", "Landform"),
    ("Primary Volcano Type", "Type"),
    ("Activity Evidence", "Activity_Evidence"),
    ("Last Known Eruption", "Last_Eruption"),
    ("Latitude", "Latitude"),
    ("Longitude", "Longitude"),
    ("Elevation (m)", "Elevation"),
    ("Tectonic Setting", "Tectonic_Setting"),
    ("Dominant Rock Type", "Rock_Type"),
];

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Browse, filter and chart the global volcano list.
#[derive(Debug, Parser)]
#[command(name = "volcano-explorer", version, about)]
pub struct Args {
    /// Path to the volcano CSV export (Latin-1, title line then header line)
    #[arg(default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// Exhibit shown at start-up
    #[arg(long, value_enum, default_value_t = Mode::FilteredData)]
    pub mode: Mode,

    /// Print a cleaning summary and exit without opening a window
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_csv_and_table_mode() {
        let args = Args::parse_from(["volcano-explorer"]);
        assert_eq!(args.csv, PathBuf::from(DEFAULT_CSV_PATH));
        assert_eq!(args.mode, Mode::FilteredData);
        assert!(!args.summary);
    }

    #[test]
    fn parses_mode_and_summary_flags() {
        let args = Args::parse_from(["volcano-explorer", "data/gvp.csv", "--mode", "map", "--summary"]);
        assert_eq!(args.csv, PathBuf::from("data/gvp.csv"));
        assert_eq!(args.mode, Mode::Map);
        assert!(args.summary);
    }

    #[test]
    fn column_map_targets_are_unique() {
        let mut targets: Vec<&str> = COLUMN_MAP.iter().map(|(_, t)| *t).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), COLUMN_MAP.len());
    }
}
