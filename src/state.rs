use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::color::VehicleColors;
use crate::data::cache::DatasetCache;
use crate::data::filter::{filter_selection, FilteredView};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session cache of loaded datasets, keyed by source path.
    pub cache: DatasetCache,

    /// Current dataset (None until the user loads a file).
    pub dataset: Option<Arc<Dataset>>,

    /// Vehicle identifiers currently selected in the side panel.
    pub selected: BTreeSet<String>,

    /// Outcome of the current selection (cached; recomputed on change).
    pub view: FilteredView,

    /// Per-vehicle series colours for the current dataset.
    pub colors: VehicleColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::default(),
            dataset: None,
            selected: BTreeSet::new(),
            view: FilteredView::NoSelection,
            colors: VehicleColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a file through the cache and make it the current dataset.
    /// The selection resets: identifiers from a previous dataset must not
    /// leak into the new one.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records for {} vehicles from {}",
                    dataset.len(),
                    dataset.vehicle_ids.len(),
                    path.display()
                );
                self.colors = VehicleColors::new(&dataset.vehicle_ids);
                self.selected.clear();
                self.dataset = Some(dataset);
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute the filtered view after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = filter_selection(ds, &self.selected);
        }
    }

    /// Toggle a single vehicle in the selection.
    pub fn toggle_vehicle(&mut self, vehicle_id: &str) {
        if !self.selected.remove(vehicle_id) {
            self.selected.insert(vehicle_id.to_string());
        }
        self.refilter();
    }

    /// Select every vehicle in the dataset.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected = ds.vehicle_ids.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Clear the selection.
    pub fn select_none(&mut self) {
        self.selected.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn state_with_dataset() -> AppState {
        let records = vec![
            Record {
                vehicle_id: "A1".to_string(),
                fuel_consumed: 12.5,
                kmpl: 3.2,
                created_at: None,
            },
            Record {
                vehicle_id: "B2".to_string(),
                fuel_consumed: 9.0,
                kmpl: 2.1,
                created_at: None,
            },
        ];
        let mut state = AppState::default();
        state.dataset = Some(Arc::new(Dataset::from_records(records)));
        state.refilter();
        state
    }

    #[test]
    fn toggling_updates_the_view() {
        let mut state = state_with_dataset();
        assert_eq!(state.view, FilteredView::NoSelection);

        state.toggle_vehicle("A1");
        assert_eq!(state.view.indices(), &[0]);

        state.toggle_vehicle("A1");
        assert_eq!(state.view, FilteredView::NoSelection);
    }

    #[test]
    fn select_all_then_none() {
        let mut state = state_with_dataset();
        state.select_all();
        assert_eq!(state.view.indices(), &[0, 1]);

        state.select_none();
        assert_eq!(state.view, FilteredView::NoSelection);
    }

    #[test]
    fn stale_selection_yields_no_matches() {
        let mut state = state_with_dataset();
        state.selected.insert("Z9".to_string());
        state.refilter();
        assert_eq!(state.view, FilteredView::NoMatches);
    }
}
