use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Method;
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – method selector and dataset metrics
// ---------------------------------------------------------------------------

/// Render the left panel: the clustering-method selector plus the headline
/// numbers for the current selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Clustering");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.strong("Method");
    for method in Method::ALL {
        if ui
            .radio(state.method == method, method.display_name())
            .clicked()
        {
            state.set_method(method);
        }
    }

    ui.separator();

    let Some(views) = &state.views else {
        // Label column missing for this method; the status line has details.
        return;
    };

    ui.strong("Overview");
    ui.label(format!("Songs: {}", views.filtered.len()));
    ui.label(format!(
        "Clusters: {}",
        views.filtered.cluster_labels().len()
    ));
    ui.label(format!("Genres: {}", views.filtered.genre_count()));

    if views.filtered.dropped > 0 {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("{} unlabelled rows hidden", views.filtered.dropped)).weak(),
        );
    }

    if let Some(projection) = &views.projection {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "PCA variance: {:.0}% / {:.0}%",
                projection.explained[0] * 100.0,
                projection.explained[1] * 100.0
            ))
            .weak(),
        );
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
            if ui
                .add_enabled(state.views.is_some(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(views)) = (&state.dataset, &state.views) {
            ui.label(format!(
                "{} tracks loaded, {} labelled under {}",
                ds.len(),
                views.filtered.len(),
                state.method
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
        .set_title("Open clustered tracks")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} tracks with columns {:?}",
                    table.len(),
                    table.columns
                );
                state.set_dataset(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Ask for a destination and write the current method's filtered table,
/// projection columns included when available.
pub fn save_export_dialog(state: &mut AppState) {
    let Some(views) = &state.views else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered cluster data")
        .set_file_name(export::export_file_name(state.method))
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    match export::export_to_path(&path, &views.filtered, views.projection.as_ref()) {
        Ok(()) => {
            log::info!(
                "Exported {} rows to {}",
                views.filtered.len(),
                path.display()
            );
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
