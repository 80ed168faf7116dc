use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::aggregate::{DashboardSummary, summarize};
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Dataset>,

    /// Current region / category / month-range selection.
    pub filter: FilterSelection,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the visible records (cached).
    pub summary: DashboardSummary,

    /// Region → colour, built from the full dataset.
    pub region_colors: ColorMap,

    /// Product category → colour, built from the full dataset.
    pub category_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: FilterSelection::default(),
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            region_colors: ColorMap::default(),
            category_colors: ColorMap::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select everything, rebuild the colour
    /// maps, recompute the aggregates.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filter = FilterSelection::select_all(&dataset);
        self.region_colors = ColorMap::new(&dataset.regions);
        self.category_colors = ColorMap::new(&dataset.categories);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.recompute();
    }

    /// Recompute `visible_indices` and `summary` after a filter change.
    pub fn recompute(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filter);
            self.summary = summarize(ds, &self.visible_indices);
        }
    }

    /// Toggle a single region in the selection.
    pub fn toggle_region(&mut self, region: &str) {
        if self.filter.regions.contains(region) {
            self.filter.regions.remove(region);
        } else {
            self.filter.regions.insert(region.to_string());
        }
        self.recompute();
    }

    /// Toggle a single product category in the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if self.filter.categories.contains(category) {
            self.filter.categories.remove(category);
        } else {
            self.filter.categories.insert(category.to_string());
        }
        self.recompute();
    }

    pub fn select_all_regions(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.regions = ds.regions.iter().cloned().collect();
            self.recompute();
        }
    }

    pub fn select_no_regions(&mut self) {
        self.filter.regions.clear();
        self.recompute();
    }

    pub fn select_all_categories(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.categories = ds.categories.iter().cloned().collect();
            self.recompute();
        }
    }

    pub fn select_no_categories(&mut self) {
        self.filter.categories.clear();
        self.recompute();
    }

    /// Move the start of the month range. Clamped to the dataset span; if it
    /// passes the current end, the end is dragged along so the range stays
    /// well-formed.
    pub fn set_start_month(&mut self, month: NaiveDate) {
        if let Some(ds) = &self.dataset {
            let month = month.clamp(ds.month_min, ds.month_max);
            self.filter.start_month = month;
            if self.filter.end_month < month {
                self.filter.end_month = month;
            }
            self.recompute();
        }
    }

    /// Move the end of the month range, symmetric to [`Self::set_start_month`].
    pub fn set_end_month(&mut self, month: NaiveDate) {
        if let Some(ds) = &self.dataset {
            let month = month.clamp(ds.month_min, ds.month_max);
            self.filter.end_month = month;
            if self.filter.start_month > month {
                self.filter.start_month = month;
            }
            self.recompute();
        }
    }

    /// Restore the month range to the full dataset span.
    pub fn reset_month_range(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.start_month = ds.month_min;
            self.filter.end_month = ds.month_max;
            self.recompute();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

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

    fn loaded_state() -> AppState {
        let dataset = Dataset::from_records(vec![
            record(ymd(2024, 1, 1), "East", "Footwear", 100.0),
            record(ymd(2024, 2, 1), "West", "Apparel", 200.0),
            record(ymd(2024, 3, 1), "East", "Apparel", 50.0),
        ])
        .unwrap();

        let mut state = AppState::default();
        state.set_dataset(dataset);
        state
    }

    #[test]
    fn set_dataset_selects_everything() {
        let state = loaded_state();

        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summary.row_count, 3);
        assert_eq!(state.filter.start_month, ymd(2024, 1, 1));
        assert_eq!(state.filter.end_month, ymd(2024, 3, 1));
    }

    #[test]
    fn toggle_region_updates_visible_and_summary() {
        let mut state = loaded_state();

        state.toggle_region("West");
        assert_eq!(state.visible_indices, vec![0, 2]);
        assert_eq!(state.summary.mean_revenue, Some(75.0));

        state.toggle_region("West");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn deselecting_all_categories_empties_the_dashboard() {
        let mut state = loaded_state();

        state.select_no_categories();
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary.mean_revenue, None);

        state.select_all_categories();
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn start_month_is_clamped_to_dataset_span() {
        let mut state = loaded_state();

        state.set_start_month(ymd(2020, 1, 1));
        assert_eq!(state.filter.start_month, ymd(2024, 1, 1));

        state.set_start_month(ymd(2030, 1, 1));
        assert_eq!(state.filter.start_month, ymd(2024, 3, 1));
    }

    #[test]
    fn start_month_past_end_drags_end_along() {
        let mut state = loaded_state();

        state.set_end_month(ymd(2024, 2, 1));
        state.set_start_month(ymd(2024, 3, 1));

        assert_eq!(state.filter.start_month, ymd(2024, 3, 1));
        assert_eq!(state.filter.end_month, ymd(2024, 3, 1));
        assert_eq!(state.visible_indices, vec![2]);
    }

    #[test]
    fn end_month_before_start_drags_start_back() {
        let mut state = loaded_state();

        state.set_start_month(ymd(2024, 2, 1));
        state.set_end_month(ymd(2024, 1, 1));

        assert_eq!(state.filter.start_month, ymd(2024, 1, 1));
        assert_eq!(state.filter.end_month, ymd(2024, 1, 1));
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn reset_month_range_restores_full_span() {
        let mut state = loaded_state();

        state.set_end_month(ymd(2024, 1, 1));
        state.reset_month_range();

        assert_eq!(state.filter.start_month, ymd(2024, 1, 1));
        assert_eq!(state.filter.end_month, ymd(2024, 3, 1));
        assert_eq!(state.visible_indices.len(), 3);
    }
}
