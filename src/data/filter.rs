use std::collections::BTreeSet;

use super::model::{CleanTable, VolcanoRecord};

// ---------------------------------------------------------------------------
// Filter criteria: the three sidebar controls
// ---------------------------------------------------------------------------

/// Inclusive elevation bounds in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    pub lo: f64,
    pub hi: f64,
}

impl ElevationRange {
    /// Empty range, used when the table has no elevations at all.
    pub const EMPTY: ElevationRange = ElevationRange {
        lo: f64::INFINITY,
        hi: f64::NEG_INFINITY,
    };

    /// Missing elevations never fall inside a range.
    pub fn contains(&self, elevation: Option<f64>) -> bool {
        elevation.is_some_and(|e| self.lo <= e && e <= self.hi)
    }
}

/// Selections from the filter controls.
///
/// An empty country or type set means "no constraint" (show all).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub countries: BTreeSet<String>,
    pub elevation: ElevationRange,
    pub types: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that let every row with an elevation through.
    pub fn for_table(table: &CleanTable) -> Self {
        let elevation = table
            .elevation_bounds
            .map(|(lo, hi)| ElevationRange { lo, hi })
            .unwrap_or(ElevationRange::EMPTY);
        FilterCriteria {
            countries: BTreeSet::new(),
            elevation,
            types: BTreeSet::new(),
        }
    }

    fn country_matches(&self, r: &VolcanoRecord) -> bool {
        set_matches(&self.countries, r.country.as_deref())
    }

    fn type_matches(&self, r: &VolcanoRecord) -> bool {
        set_matches(&self.types, r.volcano_type.as_deref())
    }

    /// Whether `record` passes all three filters.
    pub fn matches(&self, record: &VolcanoRecord) -> bool {
        self.country_matches(record)
            && self.elevation.contains(record.elevation)
            && self.type_matches(record)
    }
}

fn set_matches(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.contains(v))
}

// ---------------------------------------------------------------------------
// View: rows of the base table that passed the filters
// ---------------------------------------------------------------------------

/// A filtered view borrowing the base table.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub table: &'a CleanTable,
    /// Row indices into `table.records`, in table order.
    pub indices: &'a [usize],
}

impl<'a> View<'a> {
    pub fn records(&self) -> impl Iterator<Item = (usize, &'a VolcanoRecord)> + '_ {
        let records = &self.table.records;
        self.indices.iter().map(move |&i| (i, &records[i]))
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return indices of records that pass all active filters.
pub fn filtered_indices(table: &CleanTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    fn table() -> CleanTable {
        CleanTable::from_records(vec![
            record("Etna", "Italy", "Stratovolcano", Some(3357.0)),
            record("Vesuvius", "Italy", "Stratovolcano", Some(1281.0)),
            record("Stromboli", "Italy", "Stratovolcano", None),
            record("Fuji", "Japan", "Stratovolcano", Some(3776.0)),
            record("Aso", "Japan", "Caldera", Some(1592.0)),
            record("Kilauea", "United States", "Shield", Some(1222.0)),
        ])
    }

    fn names(table: &CleanTable, idx: &[usize]) -> Vec<String> {
        idx.iter()
            .map(|&i| table.records[i].display_name().to_string())
            .collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_criteria_only_drop_missing_elevation() {
        let t = table();
        let idx = filtered_indices(&t, &FilterCriteria::for_table(&t));
        assert_eq!(idx, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn empty_selection_equals_selecting_everything() {
        let t = table();
        let empty = FilterCriteria::for_table(&t);
        let all = FilterCriteria {
            countries: t.countries.clone(),
            types: t.types.clone(),
            ..empty.clone()
        };
        assert_eq!(filtered_indices(&t, &empty), filtered_indices(&t, &all));
    }

    #[test]
    fn filters_compose_with_and() {
        let t = table();
        let criteria = FilterCriteria {
            countries: set(&["Japan", "United States"]),
            elevation: ElevationRange { lo: 1200.0, hi: 2000.0 },
            types: set(&["Caldera", "Shield"]),
        };
        assert_eq!(names(&t, &filtered_indices(&t, &criteria)), vec!["Aso", "Kilauea"]);
    }

    #[test]
    fn filter_order_does_not_matter() {
        let t = table();
        let criteria = FilterCriteria {
            countries: set(&["Italy", "Japan"]),
            elevation: ElevationRange { lo: 1500.0, hi: 4000.0 },
            types: set(&["Stratovolcano"]),
        };
        let all: Vec<&VolcanoRecord> = t.records.iter().collect();

        let a: Vec<_> = all
            .iter()
            .filter(|r| criteria.country_matches(r))
            .filter(|r| criteria.elevation.contains(r.elevation))
            .filter(|r| criteria.type_matches(r))
            .map(|r| r.display_name())
            .collect();
        let b: Vec<_> = all
            .iter()
            .filter(|r| criteria.type_matches(r))
            .filter(|r| criteria.elevation.contains(r.elevation))
            .filter(|r| criteria.country_matches(r))
            .map(|r| r.display_name())
            .collect();

        assert_eq!(a, b);
        assert_eq!(a, vec!["Etna", "Fuji"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = table();
        let criteria = FilterCriteria {
            elevation: ElevationRange { lo: 1281.0, hi: 3357.0 },
            ..FilterCriteria::for_table(&t)
        };
        assert_eq!(
            names(&t, &filtered_indices(&t, &criteria)),
            vec!["Etna", "Vesuvius", "Aso"]
        );
    }

    #[test]
    fn missing_elevation_is_excluded_by_any_range() {
        let wide = ElevationRange {
            lo: f64::MIN,
            hi: f64::MAX,
        };
        assert!(!wide.contains(None));
        assert!(!ElevationRange::EMPTY.contains(Some(0.0)));
    }

    #[test]
    fn missing_country_never_matches_a_selection() {
        let mut r = record("Nowhere", "x", "Shield", Some(1.0));
        r.country = None;
        let t = CleanTable::from_records(vec![r]);
        let mut criteria = FilterCriteria::for_table(&t);
        assert_eq!(filtered_indices(&t, &criteria), vec![0]);
        criteria.countries = set(&["Italy"]);
        assert!(filtered_indices(&t, &criteria).is_empty());
    }

    #[test]
    fn view_yields_records_by_index() {
        let t = table();
        let idx = vec![4, 0];
        let view = View {
            table: &t,
            indices: &idx,
        };
        let got: Vec<usize> = view.records().map(|(i, _)| i).collect();
        assert_eq!(got, vec![4, 0]);
        assert!(!view.is_empty());
    }
}
