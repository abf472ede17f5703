use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// FilteredView – the outcome of applying a vehicle selection
// ---------------------------------------------------------------------------

/// Result of filtering the dataset by the user's vehicle selection.  The
/// presentation layer must distinguish "nothing selected yet" from "selection
/// made but nothing matched"; they carry different messaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredView {
    /// The selection set is empty; prompt the user to pick vehicles.
    NoSelection,
    /// A selection was made but no record matched it.  Can only happen when
    /// the selection is out of sync with the dataset; handled defensively.
    NoMatches,
    /// Indices into `Dataset::records`, ordered for stable chart rendering.
    Rows(Vec<usize>),
}

impl FilteredView {
    /// Row indices, empty for the two no-data states.
    pub fn indices(&self) -> &[usize] {
        match self {
            FilteredView::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Retain the records whose `vehicle_id` is in `selected` (exact match on
/// the normalized string), ordered by vehicle id ascending, then
/// `created_at` ascending with missing timestamps last, then source row
/// order.  Pure function of its inputs.
pub fn filter_selection(dataset: &Dataset, selected: &BTreeSet<String>) -> FilteredView {
    if selected.is_empty() {
        return FilteredView::NoSelection;
    }

    let mut rows: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selected.contains(&r.vehicle_id))
        .map(|(i, _)| i)
        .collect();

    if rows.is_empty() {
        return FilteredView::NoMatches;
    }

    // Stable sort keeps source row order as the final tie-break; None
    // timestamps compare greater so they land at the end of each group.
    rows.sort_by(|&a, &b| {
        let ra = &dataset.records[a];
        let rb = &dataset.records[b];
        ra.vehicle_id
            .cmp(&rb.vehicle_id)
            .then_with(|| match (ra.created_at, rb.created_at) {
                (Some(ta), Some(tb)) => ta.cmp(&tb),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    FilteredView::Rows(rows)
}
