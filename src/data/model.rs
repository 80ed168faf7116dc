use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one row of the business-performance table
// ---------------------------------------------------------------------------

/// A single business-performance observation (one row of the source table).
///
/// Records are immutable once loaded; the dashboard only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Reporting month (first of the month in well-formed data).
    pub month: NaiveDate,
    pub region: String,
    pub product_category: String,
    pub revenue: f64,
    pub units_sold: f64,
    pub inventory_turnover: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed distinct-value indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source row order.
    pub records: Vec<Record>,
    /// Sorted distinct `region` values.
    pub regions: Vec<String>,
    /// Sorted distinct `product_category` values.
    pub categories: Vec<String>,
    /// Earliest month present in the table.
    pub month_min: NaiveDate,
    /// Latest month present in the table.
    pub month_max: NaiveDate,
}

impl Dataset {
    /// Build the distinct-value indices from loaded records.
    ///
    /// Returns `None` for an empty row set: a `Dataset` is non-empty by
    /// construction, so `month_min`/`month_max` are always meaningful.
    pub fn from_records(records: Vec<Record>) -> Option<Self> {
        let first_month = records.first()?.month;

        let mut region_set: BTreeSet<&str> = BTreeSet::new();
        let mut category_set: BTreeSet<&str> = BTreeSet::new();
        let mut month_min = first_month;
        let mut month_max = first_month;

        for rec in &records {
            region_set.insert(&rec.region);
            category_set.insert(&rec.product_category);
            month_min = month_min.min(rec.month);
            month_max = month_max.max(rec.month);
        }

        let regions: Vec<String> = region_set.into_iter().map(str::to_owned).collect();
        let categories: Vec<String> = category_set.into_iter().map(str::to_owned).collect();

        Some(Dataset {
            records,
            regions,
            categories,
            month_min,
            month_max,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty (never true for a constructed `Dataset`).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(month: NaiveDate, region: &str, category: &str) -> Record {
        Record {
            month,
            region: region.to_string(),
            product_category: category.to_string(),
            revenue: 100.0,
            units_sold: 10.0,
            inventory_turnover: 4.0,
        }
    }

    #[test]
    fn from_records_builds_sorted_distinct_indices() {
        let dataset = Dataset::from_records(vec![
            record(ymd(2024, 3, 1), "West", "Apparel"),
            record(ymd(2024, 1, 1), "East", "Footwear"),
            record(ymd(2024, 2, 1), "West", "Footwear"),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.regions, vec!["East", "West"]);
        assert_eq!(dataset.categories, vec!["Apparel", "Footwear"]);
        assert_eq!(dataset.month_min, ymd(2024, 1, 1));
        assert_eq!(dataset.month_max, ymd(2024, 3, 1));
    }

    #[test]
    fn from_records_rejects_empty_table() {
        assert!(Dataset::from_records(Vec::new()).is_none());
    }
}
