use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// VolcanoRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A single volcano that survived cleaning.
///
/// Coordinates and eruption year are not optional: a row lacking either is
/// dropped during cleaning, so every record here is plottable.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoRecord {
    pub volcano_id: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub province: Option<String>,
    pub landform: Option<String>,
    pub volcano_type: Option<String>,
    pub activity_evidence: Option<String>,
    pub last_eruption: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level; missing when the source cell was not numeric.
    pub elevation: Option<f64>,
    pub tectonic_setting: Option<String>,
    pub rock_type: Option<String>,
    /// First four-digit year found in `last_eruption`.
    pub eruption_year: i32,
}

impl VolcanoRecord {
    /// Display name, falling back to a placeholder for unnamed rows.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Cell values in [`TABLE_COLUMNS`] order, for the table view.
    pub fn cells(&self) -> [String; 15] {
        fn text(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        [
            text(&self.volcano_id),
            text(&self.name),
            text(&self.country),
            text(&self.region),
            text(&self.province),
            text(&self.landform),
            text(&self.volcano_type),
            text(&self.activity_evidence),
            text(&self.last_eruption),
            format!("{:.3}", self.latitude),
            format!("{:.3}", self.longitude),
            self.elevation.map(|e| format!("{e:.0}")).unwrap_or_default(),
            text(&self.tectonic_setting),
            text(&self.rock_type),
            self.eruption_year.to_string(),
        ]
    }
}

/// Column headings of the table view, matching [`VolcanoRecord::cells`].
pub const TABLE_COLUMNS: [&str; 15] = [
    "Volcano_ID",
    "Name",
    "Country",
    "Region",
    "Province",
    "Landform",
    "Type",
    "Activity_Evidence",
    "Last_Eruption",
    "Latitude",
    "Longitude",
    "Elevation",
    "Tectonic_Setting",
    "Rock_Type",
    "Eruption_Year",
];

// ---------------------------------------------------------------------------
// Exclusions – why a raw row did not make it into the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExclusionReason {
    /// No four-digit run in the last-eruption text.
    MissingYear,
    /// Year outside `0..=current_year`.
    YearOutOfRange(i32),
    MissingLatitude,
    MissingLongitude,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::MissingYear => write!(f, "no eruption year"),
            ExclusionReason::YearOutOfRange(y) => write!(f, "eruption year {y} out of range"),
            ExclusionReason::MissingLatitude => write!(f, "missing latitude"),
            ExclusionReason::MissingLongitude => write!(f, "missing longitude"),
        }
    }
}

/// A dropped row, identified by its 1-based physical line in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub line: u64,
    pub reason: ExclusionReason,
}

// ---------------------------------------------------------------------------
// CleanTable – the immutable base table
// ---------------------------------------------------------------------------

/// Cleaned records plus the option lists the filter controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTable {
    pub records: Vec<VolcanoRecord>,
    /// Sorted distinct countries (missing values omitted).
    pub countries: BTreeSet<String>,
    /// Sorted distinct volcano types (missing values omitted).
    pub types: BTreeSet<String>,
    /// `(min, max)` over non-missing elevations.
    pub elevation_bounds: Option<(f64, f64)>,
}

impl CleanTable {
    /// Build option lists from the cleaned records.
    pub fn from_records(records: Vec<VolcanoRecord>) -> Self {
        let countries = records.iter().filter_map(|r| r.country.clone()).collect();
        let types = records.iter().filter_map(|r| r.volcano_type.clone()).collect();
        let elevation_bounds = records
            .iter()
            .filter_map(|r| r.elevation)
            .fold(None, |acc: Option<(f64, f64)>, e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            });

        CleanTable {
            records,
            countries,
            types,
            elevation_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The cleaned table together with the audit trail of dropped rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    pub table: CleanTable,
    pub exclusions: Vec<Exclusion>,
}
