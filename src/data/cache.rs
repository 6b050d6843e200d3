use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::clean::current_year;
use super::load_clean;
use super::loader::LoadError;
use super::model::CleanReport;

struct Loaded {
    modified: SystemTime,
    report: Arc<CleanReport>,
}

/// Holds the cleaned table for one source file.
///
/// [`DatasetCache::get`] re-reads the file only when its modification time
/// differs from the one seen at the last load, or when the path changes.
pub struct DatasetCache {
    path: PathBuf,
    loaded: Option<Loaded>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the cache at another file. The next [`get`](Self::get) reloads.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.loaded = None;
    }

    /// Return the cleaned report, reloading if the file changed.
    ///
    /// A failed load drops any previously cached table so a vanished file
    /// halts the views instead of showing stale data.
    pub fn get(&mut self) -> Result<Arc<CleanReport>, LoadError> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok();

        if let (Some(loaded), Some(modified)) = (&self.loaded, modified) {
            if loaded.modified == modified {
                return Ok(Arc::clone(&loaded.report));
            }
            log::debug!("{} changed on disk, reloading", self.path.display());
        }

        self.loaded = None;
        let report = Arc::new(load_clean(&self.path, current_year())?);
        log::info!(
            "Loaded {} volcanoes from {} ({} rows dropped)",
            report.table.len(),
            self.path.display(),
            report.exclusions.len()
        );

        if let Some(modified) = modified {
            self.loaded = Some(Loaded {
                modified,
                report: Arc::clone(&report),
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{File, OpenOptions};
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::data::clean::tests::export;

    const ETNA: &str = "1,Etna,Italy,Europe,Sicily,Mountain,Stratovolcano,Eruption Observed,2023 CE,37.75,14.99,3357,Subduction Zone,Basalt";
    const FUJI: &str = "2,Fuji,Japan,Japan,Honshu,Mountain,Stratovolcano,Eruption Observed,1707 CE,35.36,138.73,3776,Subduction Zone,Basalt";

    fn write(path: &Path, rows: &[&str]) {
        let mut file = File::create(path).unwrap();
        file.write_all(export(rows).as_bytes()).unwrap();
    }

    fn bump_mtime(path: &Path, secs: u64) {
        let file = OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn unchanged_file_returns_same_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcanoes.csv");
        write(&path, &[ETNA]);

        let mut cache = DatasetCache::new(&path);
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.table.len(), 1);
    }

    #[test]
    fn modified_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcanoes.csv");
        write(&path, &[ETNA]);

        let mut cache = DatasetCache::new(&path);
        let first = cache.get().unwrap();

        write(&path, &[ETNA, FUJI]);
        bump_mtime(&path, 60);
        let second = cache.get().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.table.len(), 2);
    }

    #[test]
    fn vanished_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcanoes.csv");
        write(&path, &[ETNA]);

        let mut cache = DatasetCache::new(&path);
        assert!(cache.get().is_ok());
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(cache.get(), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn changing_path_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write(&a, &[ETNA]);
        write(&b, &[ETNA, FUJI]);

        let mut cache = DatasetCache::new(&a);
        assert_eq!(cache.get().unwrap().table.len(), 1);
        cache.set_path(&b);
        assert_eq!(cache.path(), b.as_path());
        assert_eq!(cache.get().unwrap().table.len(), 2);
    }
}
