use eframe::egui::{Frame, RichText, ScrollArea, Ui};

use crate::data::aggregate::DashboardSummary;
use crate::format;
use crate::state::AppState;

use super::charts;

// ---------------------------------------------------------------------------
// Central panel – metric cards + charts
// ---------------------------------------------------------------------------

/// Render the dashboard body: three headline cards, then the charts.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a business metrics file  (File → Open…)");
        });
        return;
    }

    let summary = &state.summary;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_cards(ui, summary);
            ui.add_space(16.0);

            ui.heading("Revenue by Region");
            charts::region_bar_chart(ui, summary, &state.region_colors);
            ui.add_space(16.0);

            ui.heading("Revenue by Product Category");
            charts::category_donut(ui, summary, &state.category_colors);
            ui.add_space(16.0);

            ui.heading("Monthly Revenue Trend");
            charts::monthly_trend(ui, summary);
        });
}

/// Three equal-width cards: average revenue, units sold, inventory turnover
/// over the filtered rows. Empty selections show a dash instead of a number.
fn metric_cards(ui: &mut Ui, summary: &DashboardSummary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "📈 Avg Revenue",
            &format::maybe_currency(summary.mean_revenue),
        );
        metric_card(
            &mut cols[1],
            "📦 Avg Units Sold",
            &format::maybe_count(summary.mean_units_sold),
        );
        metric_card(
            &mut cols[2],
            "🔄 Avg Inventory Turnover",
            &format::maybe_ratio(summary.mean_inventory_turnover),
        );
    });
}

fn metric_card(ui: &mut Ui, title: &str, value: &str) {
    Frame::group(ui.style()).inner_margin(12).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).size(13.0));
        ui.label(RichText::new(value).size(22.0).strong());
    });
}
