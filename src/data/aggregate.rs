use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::Dataset;

/// Aggregates feeding the dashboard, recomputed whenever the filter changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    /// Total revenue per region, sorted by region name.
    pub revenue_by_region: Vec<(String, f64)>,
    /// Total revenue per product category, sorted by category name.
    pub revenue_by_category: Vec<(String, f64)>,
    /// Total revenue per month, chronological.
    pub revenue_by_month: Vec<(NaiveDate, f64)>,
    /// Mean revenue over the matching rows, `None` when nothing matches.
    pub mean_revenue: Option<f64>,
    pub mean_units_sold: Option<f64>,
    pub mean_inventory_turnover: Option<f64>,
    pub row_count: usize,
}

impl DashboardSummary {
    /// Grand total over the per-region sums. Equal to the per-category and
    /// per-month totals by construction.
    pub fn total_revenue(&self) -> f64 {
        self.revenue_by_region.iter().map(|(_, v)| v).sum()
    }
}

/// Aggregate the `indices` rows of `dataset` into the dashboard summary.
///
/// Group keys absent from the filtered rows do not appear in the groupings;
/// an empty index list yields empty groupings and `None` means.
pub fn summarize(dataset: &Dataset, indices: &[usize]) -> DashboardSummary {
    let mut by_region: BTreeMap<&str, f64> = BTreeMap::new();
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    let mut revenue_sum = 0.0;
    let mut units_sum = 0.0;
    let mut turnover_sum = 0.0;

    for &i in indices {
        let record = &dataset.records[i];
        *by_region.entry(&record.region).or_insert(0.0) += record.revenue;
        *by_category.entry(&record.product_category).or_insert(0.0) += record.revenue;
        *by_month.entry(record.month).or_insert(0.0) += record.revenue;

        revenue_sum += record.revenue;
        units_sum += record.units_sold;
        turnover_sum += record.inventory_turnover;
    }

    let row_count = indices.len();
    let mean = |sum: f64| (row_count > 0).then(|| sum / row_count as f64);

    DashboardSummary {
        revenue_by_region: by_region
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        revenue_by_category: by_category
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        revenue_by_month: by_month.into_iter().collect(),
        mean_revenue: mean(revenue_sum),
        mean_units_sold: mean(units_sum),
        mean_inventory_turnover: mean(turnover_sum),
        row_count,
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::Record;
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
    fn summarize_sums_and_means_single_region() {
        let dataset = sample_dataset();
        let summary = summarize(&dataset, &[0, 2]);

        assert_eq!(summary.revenue_by_region, vec![("East".to_string(), 150.0)]);
        assert_eq!(summary.mean_revenue, Some(75.0));
        assert_eq!(summary.mean_units_sold, Some(7.5));
        assert_eq!(summary.mean_inventory_turnover, Some(4.0));
        assert_eq!(summary.row_count, 2);
    }

    #[test]
    fn groupings_partition_the_same_total() {
        let dataset = sample_dataset();
        let indices: Vec<usize> = (0..dataset.len()).collect();
        let summary = summarize(&dataset, &indices);

        let total = summary.total_revenue();
        let by_category: f64 = summary.revenue_by_category.iter().map(|(_, v)| v).sum();
        let by_month: f64 = summary.revenue_by_month.iter().map(|(_, v)| v).sum();

        assert_eq!(total, 425.0);
        assert_eq!(by_category, total);
        assert_eq!(by_month, total);
    }

    #[test]
    fn monthly_revenue_is_chronological() {
        // Rows arrive newest-first; the grouping must still come out sorted.
        let dataset = Dataset::from_records(vec![
            record(ymd(2024, 3, 1), "East", "Footwear", 30.0),
            record(ymd(2024, 1, 1), "East", "Footwear", 10.0),
            record(ymd(2024, 2, 1), "East", "Footwear", 20.0),
            record(ymd(2024, 1, 1), "West", "Footwear", 5.0),
        ])
        .unwrap();
        let indices: Vec<usize> = (0..dataset.len()).collect();
        let summary = summarize(&dataset, &indices);

        assert_eq!(
            summary.revenue_by_month,
            vec![
                (ymd(2024, 1, 1), 15.0),
                (ymd(2024, 2, 1), 20.0),
                (ymd(2024, 3, 1), 30.0),
            ]
        );
    }

    #[test]
    fn unmatched_group_keys_are_absent() {
        let dataset = sample_dataset();
        let summary = summarize(&dataset, &[1, 3]);

        assert_eq!(summary.revenue_by_region, vec![("West".to_string(), 275.0)]);
        assert_eq!(
            summary.revenue_by_category,
            vec![
                ("Apparel".to_string(), 200.0),
                ("Footwear".to_string(), 75.0),
            ]
        );
    }

    #[test]
    fn empty_selection_yields_empty_summary() {
        let dataset = sample_dataset();
        let summary = summarize(&dataset, &[]);

        assert!(summary.revenue_by_region.is_empty());
        assert!(summary.revenue_by_month.is_empty());
        assert_eq!(summary.mean_revenue, None);
        assert_eq!(summary.mean_units_sold, None);
        assert_eq!(summary.mean_inventory_turnover, None);
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.total_revenue(), 0.0);
    }
}
