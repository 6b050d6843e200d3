//! Data layer: record types, loading, cleaning, and filtering.
//!
//! Architecture:
//! ```text
//!   volcanoes.csv (Latin-1, title line + header line)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read file → RawTable (text cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  project, coerce, extract year → CleanReport
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cache    │  Arc<CleanReport>, reloaded when the file's mtime changes
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  country / elevation / type predicates → row indices
//!   └──────────┘
//! ```

use std::path::Path;

pub mod cache;
pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;

use loader::LoadError;
use model::CleanReport;

/// Load and clean the export at `path` in one step.
pub fn load_clean(path: &Path, current_year: i32) -> Result<CleanReport, LoadError> {
    let raw = loader::load(path)?;
    clean::clean(&raw, current_year)
}
