use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::ContentType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (ratings, year_bounds, rating_mode) = match &state.catalog {
        Some(catalog) => (
            catalog.ratings().to_vec(),
            catalog.year_bounds(),
            catalog.rating_mode().to_string(),
        ),
        None => {
            ui.label("No catalog loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Title search ----
            ui.strong("Search title");
            let mut query = state.filters.title_query.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut query).hint_text("any title"))
                .changed()
            {
                state.set_title_query(query);
            }
            ui.separator();

            // ---- Content type ----
            ui.strong("Content type");
            for kind in [ContentType::Movie, ContentType::TvShow] {
                let mut checked = state.filters.types.contains(&kind);
                if ui.checkbox(&mut checked, kind.as_str()).changed() {
                    state.toggle_type(kind);
                }
            }
            ui.separator();

            year_range(ui, state);
            ui.separator();

            duration_range(ui, state);
            ui.separator();

            // ---- Rating multi-select ----
            let n_selected = state.filters.ratings.len();
            let header_text = format!("Rating  ({n_selected}/{})", ratings.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("rating_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_ratings();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_ratings();
                        }
                    });

                    for rating in &ratings {
                        let mut checked = state.filters.ratings.contains(rating);
                        let mut text = RichText::new(rating);
                        if let Some(cm) = &state.rating_colors {
                            text = text.color(cm.color_for(rating));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_rating(rating);
                        }
                    }
                });

            ui.separator();
            if let Some((first, last)) = year_bounds {
                ui.small(format!("Titles added {first}–{last}"));
            }
            ui.small(format!("Missing ratings filled with {rating_mode}"));
        });
}

fn year_range(ui: &mut Ui, state: &mut AppState) {
    let (min, max) = state.settings.filters.year_bounds;
    let (mut lo, mut hi) = state.filters.year_range;

    ui.strong("Year added");
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("from"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).text("to"))
        .changed();
    if lo_changed || hi_changed {
        state.set_year_range(lo, hi);
    }
}

fn duration_range(ui: &mut Ui, state: &mut AppState) {
    let (min, max) = state.settings.filters.duration_bounds;
    let (mut lo, mut hi) = state.filters.duration_range;

    ui.strong("Duration");
    ui.label(RichText::new("minutes for movies, seasons for shows").small());
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("from"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).text("to"))
        .changed();
    if lo_changed || hi_changed {
        state.set_duration_range(lo, hi);
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
            let can_export = state.catalog.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(catalog), Some(source)) = (&state.catalog, &state.source) {
            ui.label(format!(
                "{}: {} titles loaded, {} match",
                source.display(),
                catalog.len(),
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
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered titles")
        .set_file_name(&state.settings.data.export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    match state.export_filtered(&path) {
        Ok(()) => {
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
