use eframe::egui::{self, Color32, Pos2, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::DashboardSummary;
use crate::format;

const CHART_HEIGHT: f32 = 260.0;
const TREND_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Revenue by region – bar chart
// ---------------------------------------------------------------------------

/// Bar chart of total revenue per region, one bar per region in name order.
pub fn region_bar_chart(ui: &mut Ui, summary: &DashboardSummary, colors: &ColorMap) {
    if summary.revenue_by_region.is_empty() {
        empty_chart_placeholder(ui);
        return;
    }

    let labels: Vec<String> = summary
        .revenue_by_region
        .iter()
        .map(|(region, _)| region.clone())
        .collect();

    let bars: Vec<Bar> = summary
        .revenue_by_region
        .iter()
        .enumerate()
        .map(|(i, (region, revenue))| {
            Bar::new(i as f64, *revenue)
                .width(0.6)
                .fill(colors.color_for(region))
                .name(region)
        })
        .collect();

    Plot::new("region_revenue")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0)
        .y_axis_label("Revenue")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format::compact_currency(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Revenue by category – donut chart
// ---------------------------------------------------------------------------

/// Donut chart of the revenue share per product category.
///
/// `egui_plot` has no pie type, so the ring is painted directly: each slice
/// is approximated by a fan of convex quads between the inner and outer
/// radii. Only positive slices are drawn; shares are computed over their sum.
pub fn category_donut(ui: &mut Ui, summary: &DashboardSummary, colors: &ColorMap) {
    let slices: Vec<(String, f64)> = summary
        .revenue_by_category
        .iter()
        .filter(|(_, revenue)| *revenue > 0.0)
        .cloned()
        .collect();
    let total: f64 = slices.iter().map(|(_, revenue)| revenue).sum();

    if slices.is_empty() || total <= 0.0 {
        empty_chart_placeholder(ui);
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        draw_donut(ui, &slices, total, colors);
        ui.add_space(8.0);
        donut_legend(ui, &slices, total, colors);
    });
}

fn draw_donut(ui: &mut Ui, slices: &[(String, f64)], total: f64, colors: &ColorMap) {
    let size = CHART_HEIGHT * 0.85;
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let outer = size * 0.45;
    // hole = 0.4 × outer, matching the classic donut proportions.
    let inner = outer * 0.4;

    // Start at 12 o'clock and sweep clockwise (screen y points down).
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (label, revenue) in slices {
        let sweep = revenue / total * std::f64::consts::TAU;
        paint_ring_segment(
            &painter,
            center,
            inner,
            outer,
            angle,
            angle + sweep,
            colors.color_for(label),
        );
        angle += sweep;
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format::compact_currency(total),
        egui::FontId::proportional(16.0),
        ui.visuals().strong_text_color(),
    );
}

/// Fill one angular span of the ring with small convex quads.
fn paint_ring_segment(
    painter: &egui::Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f64,
    end: f64,
    color: Color32,
) {
    // ~2° per quad keeps the ring smooth without flooding the tessellator.
    const STEP: f64 = 0.035;

    let mut a0 = start;
    while a0 < end {
        let a1 = (a0 + STEP).min(end);
        let quad = vec![
            point_at(center, inner, a0),
            point_at(center, outer, a0),
            point_at(center, outer, a1),
            point_at(center, inner, a1),
        ];
        painter.add(egui::Shape::convex_polygon(quad, color, Stroke::NONE));
        a0 = a1;
    }
}

fn point_at(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    center + Vec2::new(angle.cos() as f32, angle.sin() as f32) * radius
}

fn donut_legend(ui: &mut Ui, slices: &[(String, f64)], total: f64, colors: &ColorMap) {
    ui.vertical(|ui: &mut Ui| {
        for (label, revenue) in slices {
            ui.horizontal(|ui: &mut Ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(rect, 2, colors.color_for(label));
                ui.label(format!(
                    "{label}  {} ({:.1}%)",
                    format::currency(*revenue),
                    revenue / total * 100.0
                ));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Monthly revenue trend – line chart
// ---------------------------------------------------------------------------

/// Line chart of total revenue per month, chronological, with point markers.
pub fn monthly_trend(ui: &mut Ui, summary: &DashboardSummary) {
    if summary.revenue_by_month.is_empty() {
        empty_chart_placeholder(ui);
        return;
    }

    let labels: Vec<String> = summary
        .revenue_by_month
        .iter()
        .map(|(month, _)| month.format("%b %Y").to_string())
        .collect();

    let values: Vec<[f64; 2]> = summary
        .revenue_by_month
        .iter()
        .enumerate()
        .map(|(i, (_, revenue))| [i as f64, *revenue])
        .collect();

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0)
        .y_axis_label("Revenue")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format::compact_currency(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(values.iter().copied()))
                    .color(TREND_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(values.iter().copied()))
                    .radius(3.0)
                    .color(TREND_COLOR),
            );
        });
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Label for integer positions on a categorical axis. Grid marks between
/// positions stay blank so labels do not repeat.
fn index_label(labels: &[String], value: f64) -> String {
    let idx = value.round() as usize;
    if (value - idx as f64).abs() < 0.25 && idx < labels.len() {
        labels[idx].clone()
    } else {
        String::new()
    }
}

/// Shown in place of a chart when the filter matches nothing.
fn empty_chart_placeholder(ui: &mut Ui) {
    ui.allocate_ui(Vec2::new(ui.available_width(), CHART_HEIGHT * 0.4), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for the current filter");
        });
    });
}
