use std::collections::BTreeSet;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Source column names – a fixed contract with the file producer
// ---------------------------------------------------------------------------

pub mod columns {
    pub const VEHICLE_NO: &str = "Vehicle_no";
    pub const EST_FUEL_CONSUMED: &str = "Est_fuel_Consumed";
    pub const LAST_TNX_KMPL: &str = "Last_Tnx_Kmpl";
    /// Optional; when absent every record's `created_at` is `None`.
    pub const CREATED_DATE: &str = "Created_date";
}

// ---------------------------------------------------------------------------
// Record – one fuel-transaction observation
// ---------------------------------------------------------------------------

/// One retained row of the source table.  Construction goes through the
/// loader, which guarantees the cleaning invariant: `vehicle_id` is trimmed,
/// uppercased and non-empty, and both numeric fields parsed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Normalized vehicle identifier (uppercase, trimmed).  Non-unique.
    pub vehicle_id: String,
    /// Estimated fuel consumption for the transaction.
    pub fuel_consumed: f64,
    /// Kilometers-per-liter of the most recent transaction.
    pub kmpl: f64,
    /// Transaction creation time; `None` when the source column is absent
    /// or the cell did not parse.
    pub created_at: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Dataset – the cleaned, immutable collection for a session
// ---------------------------------------------------------------------------

/// All retained records in source row order, plus the sorted set of vehicle
/// identifiers that drives the selection widget.  Never mutated after
/// construction; shared as `Arc<Dataset>` across filter invocations.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Sorted, deduplicated normalized vehicle identifiers.
    pub vehicle_ids: Vec<String>,
}

impl Dataset {
    /// Build the vehicle-id index from cleaned records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let ids: BTreeSet<&str> = records.iter().map(|r| r.vehicle_id.as_str()).collect();
        let vehicle_ids = ids.into_iter().map(str::to_owned).collect();
        Dataset {
            records,
            vehicle_ids,
        }
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str) -> Record {
        Record {
            vehicle_id: id.to_string(),
            fuel_consumed: 1.0,
            kmpl: 1.0,
            created_at: None,
        }
    }

    #[test]
    fn vehicle_ids_are_sorted_and_unique() {
        let ds = Dataset::from_records(vec![rec("B2"), rec("A1"), rec("B2"), rec("C3")]);
        assert_eq!(ds.vehicle_ids, vec!["A1", "B2", "C3"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.vehicle_ids.is_empty());
    }
}
