use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Dataset, Record};

/// Current filter choices: which regions and categories are ticked plus the
/// inclusive month range.
///
/// Set semantics are strict containment: a record passes only if its region
/// and its category are both selected and its month falls inside the range.
/// Clearing a set therefore empties the dashboard instead of showing
/// everything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub start_month: NaiveDate,
    pub end_month: NaiveDate,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            regions: BTreeSet::new(),
            categories: BTreeSet::new(),
            start_month: NaiveDate::MIN,
            end_month: NaiveDate::MAX,
        }
    }
}

impl FilterSelection {
    /// Selection matching every record of `dataset`: all regions, all
    /// categories, the full month span.
    pub fn select_all(dataset: &Dataset) -> Self {
        Self {
            regions: dataset.regions.iter().cloned().collect(),
            categories: dataset.categories.iter().cloned().collect(),
            start_month: dataset.month_min,
            end_month: dataset.month_max,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.regions.contains(&record.region)
            && self.categories.contains(&record.product_category)
            && record.month >= self.start_month
            && record.month <= self.end_month
    }
}

/// Indices into `dataset.records` of the rows matching `selection`, in
/// original row order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.matches(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(month: NaiveDate, region: &str, category: &str, revenue: f64) -> Record {
        Record {
            month,
            region: region.to_string(),
            product_category: category.to_string(),
            revenue,
            units_sold: revenue / 10.0,
            inventory_turnover: 4.0,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(ymd(2024, 1, 1), "East", "Footwear", 100.0),
            record(ymd(2024, 1, 1), "West", "Apparel", 200.0),
            record(ymd(2024, 2, 1), "East", "Apparel", 50.0),
            record(ymd(2024, 2, 1), "West", "Footwear", 75.0),
        ])
        .unwrap()
    }

    #[test]
    fn select_all_matches_every_record() {
        let dataset = sample_dataset();
        let selection = FilterSelection::select_all(&dataset);
        assert_eq!(filtered_indices(&dataset, &selection), vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_region_keeps_only_that_region() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.regions = BTreeSet::from(["East".to_string()]);

        let indices = filtered_indices(&dataset, &selection);
        assert_eq!(indices, vec![0, 2]);

        let revenue: f64 = indices.iter().map(|&i| dataset.records[i].revenue).sum();
        assert_eq!(revenue, 150.0);
    }

    #[test]
    fn empty_region_selection_matches_nothing() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.regions.clear();

        assert!(filtered_indices(&dataset, &selection).is_empty());
    }

    #[test]
    fn empty_category_selection_matches_nothing() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.categories.clear();

        assert!(filtered_indices(&dataset, &selection).is_empty());
    }

    #[test]
    fn month_range_bounds_are_inclusive() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.start_month = ymd(2024, 2, 1);
        selection.end_month = ymd(2024, 2, 1);

        assert_eq!(filtered_indices(&dataset, &selection), vec![2, 3]);
    }

    #[test]
    fn months_outside_range_are_dropped() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.end_month = ymd(2024, 1, 31);

        assert_eq!(filtered_indices(&dataset, &selection), vec![0, 1]);
    }

    #[test]
    fn category_filter_composes_with_region() {
        let dataset = sample_dataset();
        let mut selection = FilterSelection::select_all(&dataset);
        selection.regions = BTreeSet::from(["East".to_string()]);
        selection.categories = BTreeSet::from(["Apparel".to_string()]);

        assert_eq!(filtered_indices(&dataset, &selection), vec![2]);
    }
}
