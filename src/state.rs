use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, ElevationRange, FilterCriteria};
use crate::data::model::CleanReport;
use crate::render::Mode;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source of the cleaned base table.
    pub cache: DatasetCache,

    /// Table seen at the last refresh (None while the file is unusable).
    pub report: Option<Arc<CleanReport>>,

    /// Sidebar filter selections.
    pub criteria: FilterCriteria,

    /// Active exhibit.
    pub mode: Mode,

    /// Name search, only used by the table exhibit.
    pub search: String,

    /// Fatal load error shown instead of any exhibit.
    pub error: Option<String>,

    /// Set when the map should jump back to the centre of the visible markers.
    pub recenter_map: bool,
}

impl AppState {
    pub fn new(path: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            cache: DatasetCache::new(path),
            report: None,
            criteria: FilterCriteria {
                countries: BTreeSet::new(),
                elevation: ElevationRange::EMPTY,
                types: BTreeSet::new(),
            },
            mode,
            search: String::new(),
            error: None,
            recenter_map: true,
        }
    }

    /// Pull the current table from the cache. A newly loaded table resets
    /// the filters to their pass-through defaults.
    pub fn refresh(&mut self) {
        match self.cache.get() {
            Ok(report) => {
                let is_new = self
                    .report
                    .as_ref()
                    .map_or(true, |old| !Arc::ptr_eq(old, &report));
                if is_new {
                    self.criteria = FilterCriteria::for_table(&report.table);
                    self.recenter_map = true;
                }
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                if self.error.is_none() {
                    log::error!("Failed to load {}: {e}", self.cache.path().display());
                }
                self.error = Some(e.to_string());
                self.report = None;
            }
        }
    }

    /// Switch to another source file.
    pub fn open_path(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.cache.set_path(path);
        self.report = None;
        self.refresh();
    }

    /// Indices of rows passing the current filters, recomputed on each call.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.report
            .as_ref()
            .map(|r| filtered_indices(&r.table, &self.criteria))
            .unwrap_or_default()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.recenter_map = true;
        }
    }

    /// Toggle one value in a multi-select.
    pub fn toggle(selection: &mut BTreeSet<String>, value: &str) {
        if !selection.remove(value) {
            selection.insert(value.to_string());
        }
    }

    /// Set the elevation bounds, keeping `lo <= hi`.
    pub fn set_elevation(&mut self, lo: f64, hi: f64) {
        self.criteria.elevation = ElevationRange {
            lo: lo.min(hi),
            hi: hi.max(lo),
        };
    }
}
