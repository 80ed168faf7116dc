use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::color::ColorMap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the label lists so we can mutate state inside the closures.
    let regions = dataset.regions.clone();
    let categories = dataset.categories.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            match checkbox_section(
                ui,
                "Region",
                &regions,
                &state.filter.regions,
                &state.region_colors,
            ) {
                SetAction::All => state.select_all_regions(),
                SetAction::Clear => state.select_no_regions(),
                SetAction::Toggle(label) => state.toggle_region(&label),
                SetAction::None => {}
            }

            ui.separator();

            match checkbox_section(
                ui,
                "Product Category",
                &categories,
                &state.filter.categories,
                &state.category_colors,
            ) {
                SetAction::All => state.select_all_categories(),
                SetAction::Clear => state.select_no_categories(),
                SetAction::Toggle(label) => state.toggle_category(&label),
                SetAction::None => {}
            }

            ui.separator();

            month_range_section(ui, state);
        });
}

/// What the user did in a checkbox section this frame.
enum SetAction {
    None,
    All,
    Clear,
    Toggle(String),
}

/// One collapsible set-filter section: All/None buttons plus a checkbox per
/// label, tinted with the label's chart colour.
fn checkbox_section(
    ui: &mut Ui,
    title: &str,
    labels: &[String],
    selected: &BTreeSet<String>,
    colors: &ColorMap,
) -> SetAction {
    let mut action = SetAction::None;

    let header = format!("{title}  ({}/{})", selected.len(), labels.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    action = SetAction::All;
                }
                if ui.small_button("None").clicked() {
                    action = SetAction::Clear;
                }
            });

            for label in labels {
                let mut checked = selected.contains(label);
                let text = RichText::new(label).color(colors.color_for(label));
                if ui.checkbox(&mut checked, text).changed() {
                    action = SetAction::Toggle(label.clone());
                }
            }
        });

    action
}

/// Inclusive month-range pickers. The pickers always hold concrete dates;
/// out-of-order or out-of-span picks are corrected by the state setters.
fn month_range_section(ui: &mut Ui, state: &mut AppState) {
    let mut start = state.filter.start_month;
    let mut end = state.filter.end_month;

    ui.strong("Date range");
    ui.add_space(2.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        if ui
            .add(DatePickerButton::new(&mut start).id_salt("start_month"))
            .changed()
        {
            state.set_start_month(start);
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        if ui
            .add(DatePickerButton::new(&mut end).id_salt("end_month"))
            .changed()
        {
            state.set_end_month(end);
        }
    });

    if ui.small_button("Full range").clicked() {
        state.reset_month_range();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open business metrics")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} to {}",
                    dataset.len(),
                    dataset.month_min,
                    dataset.month_max
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
