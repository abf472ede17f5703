use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataError;
use super::loader::load_file;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// DatasetCache – one cleaned dataset per source path, for the session
// ---------------------------------------------------------------------------

/// Session-lifetime cache of loaded datasets keyed by source path.
///
/// Contract: an entry is populated on first access and **never invalidated**.
/// A file that changes on disk after loading is not detected; the stale
/// dataset keeps being served until the process exits.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: BTreeMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, loading it on first access.
    /// A failed load caches nothing; a later call retries.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, DataError> {
        if let Some(dataset) = self.entries.get(path) {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(load_file(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn second_access_returns_the_cached_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl\nA1,1.0,2.0\n")
            .unwrap();
        let path = file.into_temp_path();

        let mut cache = DatasetCache::default();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn stale_file_is_not_detected() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl\nA1,1.0,2.0\n")
            .unwrap();
        let path = file.into_temp_path();

        let mut cache = DatasetCache::default();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);

        std::fs::write(
            &path,
            "Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl\nA1,1.0,2.0\nB2,3.0,4.0\n",
        )
        .unwrap();
        // Still the session's first dataset.
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let mut cache = DatasetCache::default();
        let missing = Path::new("/nonexistent/fleet.csv");
        assert!(cache.get_or_load(missing).is_err());
        assert!(cache.get_or_load(missing).is_err());
    }
}
