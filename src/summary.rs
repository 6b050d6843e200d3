use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use crate::data::model::{CleanReport, ExclusionReason};

/// Dropped line numbers listed before the list is cut short.
const MAX_LISTED_LINES: usize = 20;

/// Plain-text report of what cleaning kept and dropped.
pub fn format_summary(path: &Path, report: &CleanReport) -> String {
    let table = &report.table;
    let mut out = String::new();

    let _ = writeln!(out, "Source:        {}", path.display());
    let _ = writeln!(out, "Volcanoes:     {}", table.len());
    let _ = writeln!(out, "Rows dropped:  {}", report.exclusions.len());

    let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
    for exclusion in &report.exclusions {
        *by_reason.entry(reason_kind(exclusion.reason)).or_default() += 1;
    }
    for (reason, count) in by_reason {
        let _ = writeln!(out, "  {reason}: {count}");
    }
    if !report.exclusions.is_empty() {
        let lines: Vec<String> = report
            .exclusions
            .iter()
            .take(MAX_LISTED_LINES)
            .map(|e| e.line.to_string())
            .collect();
        let more = if report.exclusions.len() > MAX_LISTED_LINES { ", …" } else { "" };
        let _ = writeln!(out, "  lines: {}{more}", lines.join(", "));
    }
    if table.is_empty() {
        let _ = writeln!(out, "No volcanoes survived cleaning.");
    }

    match table.elevation_bounds {
        Some((lo, hi)) => {
            let _ = writeln!(out, "Elevation:     {lo:.0} to {hi:.0} m");
        }
        None => {
            let _ = writeln!(out, "Elevation:     no data");
        }
    }
    let _ = writeln!(out, "Countries:     {}", table.countries.len());
    let _ = writeln!(out, "Volcano types: {}", table.types.len());
    out
}

fn reason_kind(reason: ExclusionReason) -> &'static str {
    match reason {
        ExclusionReason::MissingYear => "no eruption year",
        ExclusionReason::YearOutOfRange(_) => "eruption year out of range",
        ExclusionReason::MissingLatitude => "missing latitude",
        ExclusionReason::MissingLongitude => "missing longitude",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;
    use crate::data::model::{CleanTable, Exclusion};

    #[test]
    fn groups_drops_by_reason() {
        let report = CleanReport {
            table: CleanTable::from_records(vec![
                record("Etna", "Italy", "Stratovolcano", Some(3357.0)),
                record("Aso", "Japan", "Caldera", Some(1592.0)),
            ]),
            exclusions: vec![
                Exclusion {
                    line: 3,
                    reason: ExclusionReason::YearOutOfRange(2999),
                },
                Exclusion {
                    line: 4,
                    reason: ExclusionReason::YearOutOfRange(3100),
                },
                Exclusion {
                    line: 5,
                    reason: ExclusionReason::MissingYear,
                },
            ],
        };

        let text = format_summary(Path::new("volcanoes.csv"), &report);
        assert!(text.contains("Volcanoes:     2"));
        assert!(text.contains("Rows dropped:  3"));
        assert!(text.contains("  eruption year out of range: 2"));
        assert!(text.contains("  no eruption year: 1"));
        assert!(text.contains("  lines: 3, 4, 5\n"));
        assert!(text.contains("Elevation:     1592 to 3357 m"));
        assert!(text.contains("Countries:     2"));
    }
}
