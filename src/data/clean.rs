use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Deserialize;

use crate::config::{COLUMN_MAP, NA_VALUES};

use super::loader::{LoadError, RawTable};
use super::model::{CleanReport, CleanTable, Exclusion, ExclusionReason, VolcanoRecord};

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"));

// ---------------------------------------------------------------------------
// Projection: source columns → typed fields
// ---------------------------------------------------------------------------

/// The projected source columns, still as text. Columns not listed here are
/// ignored; presence of every listed column is checked before deserializing.
#[derive(Debug, Deserialize)]
struct RawVolcano {
    #[serde(rename = "Volcano Number")]
    volcano_number: Option<String>,
    #[serde(rename = "Volcano Name")]
    name: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Volcanic Region")]
    region: Option<String>,
    #[serde(rename = "Volcanic Province")]
    province: Option<String>,
    #[serde(rename = "Volcano Landform")]
    landform: Option<String>,
    #[serde(rename = "Primary Volcano Type")]
    volcano_type: Option<String>,
    #[serde(rename = "Activity Evidence")]
    activity_evidence: Option<String>,
    #[serde(rename = "Last Known Eruption")]
    last_eruption: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: Option<String>,
    #[serde(rename = "Longitude")]
    longitude: Option<String>,
    #[serde(rename = "Elevation (m)")]
    elevation: Option<String>,
    #[serde(rename = "Tectonic Setting")]
    tectonic_setting: Option<String>,
    #[serde(rename = "Dominant Rock Type")]
    rock_type: Option<String>,
}

impl RawVolcano {
    /// Coerce and validate one row. Year is checked before coordinates.
    fn into_record(self, current_year: i32) -> Result<VolcanoRecord, ExclusionReason> {
        let last_eruption = missing_as_none(self.last_eruption);
        let eruption_year = last_eruption
            .as_deref()
            .and_then(extract_year)
            .ok_or(ExclusionReason::MissingYear)?;
        if !(0..=current_year).contains(&eruption_year) {
            return Err(ExclusionReason::YearOutOfRange(eruption_year));
        }

        let latitude = to_numeric(self.latitude).ok_or(ExclusionReason::MissingLatitude)?;
        let longitude = to_numeric(self.longitude).ok_or(ExclusionReason::MissingLongitude)?;

        Ok(VolcanoRecord {
            volcano_id: missing_as_none(self.volcano_number),
            name: missing_as_none(self.name),
            country: missing_as_none(self.country),
            region: missing_as_none(self.region),
            province: missing_as_none(self.province),
            landform: missing_as_none(self.landform),
            volcano_type: missing_as_none(self.volcano_type),
            activity_evidence: missing_as_none(self.activity_evidence),
            last_eruption,
            latitude,
            longitude,
            elevation: to_numeric(self.elevation),
            tectonic_setting: missing_as_none(self.tectonic_setting),
            rock_type: missing_as_none(self.rock_type),
            eruption_year,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Calendar year used for the eruption-year plausibility check.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Turn a raw table into the cleaned base table.
///
/// Fails only when a required column is absent. Rows that cannot be used are
/// dropped and listed in [`CleanReport::exclusions`].
pub fn clean(raw: &RawTable, current_year: i32) -> Result<CleanReport, LoadError> {
    check_columns(raw)?;

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut exclusions = Vec::new();

    for row in &raw.rows {
        let parsed: RawVolcano = row.record.deserialize(Some(&raw.headers))?;
        match parsed.into_record(current_year) {
            Ok(record) => records.push(record),
            Err(reason) => exclusions.push(Exclusion {
                line: row.line,
                reason,
            }),
        }
    }

    Ok(CleanReport {
        table: CleanTable::from_records(records),
        exclusions,
    })
}

/// First run of four ASCII digits in `text`, as a year.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Lossy numeric coercion: anything that is not a finite number is missing.
pub fn to_numeric(cell: Option<String>) -> Option<f64> {
    missing_as_none(cell)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn missing_as_none(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.is_empty() && !NA_VALUES.contains(&s.as_str()))
}

fn check_columns(raw: &RawTable) -> Result<(), LoadError> {
    let missing: Vec<String> = COLUMN_MAP
        .iter()
        .map(|(source, _)| *source)
        .filter(|source| !raw.headers.iter().any(|h| h == *source))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::data::loader::from_reader;

    pub const HEADER: &str = "Volcano Number,Volcano Name,Country,Volcanic Region,Volcanic Province,\
Volcano Landform,Primary Volcano Type,Activity Evidence,Last Known Eruption,Latitude,Longitude,\
Elevation (m),Tectonic Setting,Dominant Rock Type";

    /// A two-line-header export with the given data lines.
    pub fn export(rows: &[&str]) -> String {
        let mut text = format!("Volcano List\n{HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    fn row(name: &str, eruption: &str, lat: &str, lon: &str, elev: &str) -> String {
        format!(
            "1,{name},Italy,Europe,Province,Mountain,Stratovolcano,Eruption Observed,{eruption},{lat},{lon},{elev},Subduction Zone,Andesite"
        )
    }

    fn clean_rows(rows: &[String]) -> CleanReport {
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let raw = from_reader(Cursor::new(export(&refs))).unwrap();
        clean(&raw, 2024).unwrap()
    }

    #[test]
    fn year_is_first_four_digit_run() {
        assert_eq!(extract_year("1991 CE"), Some(1991));
        assert_eq!(extract_year("Unknown"), None);
        assert_eq!(extract_year("Evidence Credible, 1050 BCE"), Some(1050));
        assert_eq!(extract_year("12345"), Some(1234));
        assert_eq!(extract_year("around 950 CE"), None);
    }

    #[test]
    fn numeric_coercion_is_lossy() {
        assert_eq!(to_numeric(Some(" 3357 ".into())), Some(3357.0));
        assert_eq!(to_numeric(Some("-12.5".into())), Some(-12.5));
        assert_eq!(to_numeric(Some("abc".into())), None);
        assert_eq!(to_numeric(Some("NaN".into())), None);
        assert_eq!(to_numeric(Some("inf".into())), None);
        assert_eq!(to_numeric(None), None);
    }

    #[test]
    fn keeps_dated_rows_and_drops_unknown_years() {
        let report = clean_rows(&[
            row("Pinatubo", "1991 CE", "15.13", "120.35", "1486"),
            row("Mystery", "Unknown", "1.0", "2.0", "100"),
        ]);

        assert_eq!(report.table.len(), 1);
        let kept = &report.table.records[0];
        assert_eq!(kept.name.as_deref(), Some("Pinatubo"));
        assert_eq!(kept.eruption_year, 1991);
        assert_eq!(
            report.exclusions,
            vec![Exclusion {
                line: 4,
                reason: ExclusionReason::MissingYear
            }]
        );
    }

    #[test]
    fn future_years_are_dropped() {
        let report = clean_rows(&[
            row("Now", "2024 CE", "1", "1", "1"),
            row("Later", "2999 CE", "1", "1", "1"),
        ]);
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.exclusions[0].reason, ExclusionReason::YearOutOfRange(2999));
    }

    #[test]
    fn rows_without_coordinates_are_dropped() {
        let report = clean_rows(&[
            row("NoLat", "1900 CE", "", "10", "1"),
            row("NoLon", "1900 CE", "10", "n/a", "1"),
            row("Ok", "1900 CE", "10", "10", "1"),
        ]);
        let reasons: Vec<_> = report.exclusions.iter().map(|e| e.reason).collect();
        assert_eq!(
            reasons,
            vec![ExclusionReason::MissingLatitude, ExclusionReason::MissingLongitude]
        );
        assert_eq!(report.table.len(), 1);
    }

    #[test]
    fn bad_elevation_becomes_missing_not_an_error() {
        let report = clean_rows(&[row("Odd", "1900 CE", "10", "10", "abc")]);
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.records[0].elevation, None);
        assert_eq!(report.table.elevation_bounds, None);
    }

    #[test]
    fn missing_tokens_become_none() {
        let text = export(&[
            "NA,,Iceland,Europe,,,,,1947 CE,63.98,-19.67,1490,Rift Zone,Basalt",
        ]);
        let raw = from_reader(Cursor::new(text)).unwrap();
        let report = clean(&raw, 2024).unwrap();
        let r = &report.table.records[0];
        assert_eq!(r.volcano_id, None);
        assert_eq!(r.name, None);
        assert_eq!(r.country.as_deref(), Some("Iceland"));
    }

    #[test]
    fn every_kept_row_satisfies_invariants() {
        let report = clean_rows(&[
            row("A", "2010 CE", "1", "2", "3"),
            row("B", "0000", "1", "2", "3"),
            row("C", "9999", "1", "2", "3"),
            row("D", "1500", "x", "2", "3"),
            row("E", "", "1", "2", "3"),
        ]);
        for r in &report.table.records {
            assert!(r.latitude.is_finite() && r.longitude.is_finite());
            assert!((0..=2024).contains(&r.eruption_year));
        }
        assert_eq!(report.table.len() + report.exclusions.len(), 5);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let text = export(&[
            row("A", "2010 CE", "1", "2", "3").as_str(),
            row("B", "Unknown", "1", "2", "3").as_str(),
        ]);
        let raw = from_reader(Cursor::new(text)).unwrap();
        assert_eq!(clean(&raw, 2024).unwrap(), clean(&raw, 2024).unwrap());
    }

    #[test]
    fn missing_columns_fail_fast() {
        let raw = from_reader(Cursor::new("Title\nVolcano Name,Country\nEtna,Italy\n")).unwrap();
        match clean(&raw, 2024) {
            Err(LoadError::MissingColumns(cols)) => {
                assert!(cols.contains(&"Latitude".to_string()));
                assert!(!cols.contains(&"Country".to_string()));
                assert_eq!(cols.len(), COLUMN_MAP.len() - 2);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn extra_source_columns_are_ignored() {
        let text = format!(
            "Title\nExtra,{HEADER}\nx,{}\n",
            row("Etna", "2023 CE", "37.75", "14.99", "3357")
        );
        let raw = from_reader(Cursor::new(text)).unwrap();
        let report = clean(&raw, 2024).unwrap();
        assert_eq!(report.table.records[0].name.as_deref(), Some("Etna"));
    }
}
