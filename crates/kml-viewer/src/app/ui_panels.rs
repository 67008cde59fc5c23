//! UI panels for the application
//!
//! Header with file actions and status, view tabs, the two statistics tables
//! and drag-and-drop handling.

use crate::APP_NAME;
use crate::app::state::{AppState, TilesProvider};
use egui::{Color32, RichText, Ui};
use kml_analyzer_lib::presentation::{EMPTY_DETAIL_MESSAGE, EMPTY_SUMMARY_MESSAGE};
use kml_analyzer_lib::{LoadedDocument, ViewMode};
use std::path::{Path, PathBuf};

/// Render the header panel: title, file actions, status and view tabs
pub fn render_header(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading(RichText::new(APP_NAME).strong());
            ui.label(
                RichText::new("Feature counts and path lengths for KML files")
                    .small()
                    .weak(),
            );
        });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    !state.file_loader.is_busy(),
                    egui::Button::new("📂 Upload KML File"),
                )
                .clicked()
            {
                state.file_loader.show_picker = true;
            }

            if state.document.is_some() && ui.button("🗑 Reset").clicked() {
                state.reset();
            }

            if state.file_loader.is_busy() {
                ui.spinner();
                ui.label(
                    RichText::new("Processing KML file...").color(ui.visuals().warn_fg_color),
                );
            } else if let Some(document) = &state.document {
                ui.label(
                    RichText::new(format!(
                        "📄 {} ({} features)",
                        document.source_name(),
                        document.collection().len()
                    ))
                    .small(),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                render_map_settings(ui, state);
            });
        });

        if let Some(error) = &state.file_loader.error {
            ui.add_space(4.0);
            ui.label(RichText::new(format!("⚠ {}", error)).color(Color32::RED));
        }

        if state.visible_document().is_some() {
            ui.add_space(4.0);
            render_tabs(ui, state);
        }
        ui.add_space(4.0);
    });
}

/// Tile provider and line width controls
fn render_map_settings(ui: &mut Ui, state: &mut AppState) {
    ui.add(
        egui::Slider::new(&mut state.ui_settings.line_width, 0.5..=8.0)
            .suffix(" px")
            .step_by(0.5),
    );
    ui.label("Line Width:");

    ui.separator();

    egui::ComboBox::from_id_salt("tiles_provider")
        .selected_text(state.ui_settings.tiles_provider.name())
        .show_ui(ui, |ui| {
            for provider in TilesProvider::all() {
                ui.selectable_value(&mut state.ui_settings.tiles_provider, *provider, provider.name());
            }
        });
    ui.label("🗺 Tiles:");
}

/// View mode tabs; only shown while a document is loaded and no load is in flight
fn render_tabs(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        for mode in ViewMode::all() {
            if ui
                .selectable_label(state.view_mode == *mode, mode.title())
                .clicked()
            {
                state.select_view(*mode);
            }
        }
    });
}

/// Summary table: one row per geometry kind
pub fn render_summary(ui: &mut Ui, document: &LoadedDocument) {
    ui.heading("KML Element Summary");
    ui.add_space(8.0);

    let rows = document.summary_rows();
    if rows.is_empty() {
        ui.label(RichText::new(EMPTY_SUMMARY_MESSAGE).italics().weak());
        return;
    }

    egui::Grid::new("summary_grid")
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Element Type").strong());
            ui.label(RichText::new("Count").strong());
            ui.end_row();

            for row in rows {
                ui.label(row.label);
                ui.label(row.count.to_string());
                ui.end_row();
            }
        });
}

/// Detail table: one row per feature in document order
pub fn render_detail(ui: &mut Ui, document: &LoadedDocument) {
    ui.heading("Detailed KML Element Information");
    ui.add_space(8.0);

    let rows = document.detail_rows();
    if rows.is_empty() {
        ui.label(RichText::new(EMPTY_DETAIL_MESSAGE).italics().weak());
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("detail_grid")
                .num_columns(3)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").strong());
                    ui.label(RichText::new("Type").strong());
                    ui.label(RichText::new("Length (km)").strong());
                    ui.end_row();

                    for row in rows {
                        ui.label(row.name);
                        ui.label(row.kind);
                        ui.label(row.length);
                        ui.end_row();
                    }
                });
        });
}

/// Hint shown over the map while nothing is loaded
pub fn render_empty_hint(ui: &mut Ui) {
    let rect = ui.max_rect();
    let size = egui::vec2(360.0, 60.0);
    let hint_rect = egui::Rect::from_center_size(rect.center(), size);
    ui.painter()
        .rect_filled(hint_rect, 10.0, Color32::from_black_alpha(150));
    ui.painter().text(
        hint_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Upload or drop a KML file to get started",
        egui::FontId::proportional(16.0),
        Color32::WHITE,
    );
}

/// Tile attribution at the bottom of the map
pub fn render_attribution(ui: &Ui, tiles_provider: TilesProvider) {
    let screen_rect = ui.max_rect();
    ui.painter().text(
        screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
        egui::Align2::CENTER_BOTTOM,
        tiles_provider.attribution(),
        egui::FontId::proportional(10.0),
        Color32::from_black_alpha(180),
    );
}

/// Show file picker dialog
pub fn show_file_picker(state: &mut AppState) {
    if state.file_loader.show_picker {
        state.file_loader.show_picker = false;

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("KML Files", &["kml"])
            .add_filter("GeoJSON Files", &["geojson", "json"])
            .set_title("Select a KML File")
            .pick_file()
        {
            state.start_load(path);
        }
    }
}

/// Handle drag and drop of KML files
pub fn handle_drag_and_drop(ctx: &egui::Context, state: &mut AppState) {
    // Only read input state inside ctx.input
    let hovered_files = ctx.input(|i| !i.raw.hovered_files.is_empty());
    let dropped_paths: Vec<PathBuf> = ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|file| file.path.clone())
            .collect()
    });

    if hovered_files {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_preview"),
        ));
        let screen_rect = ctx.content_rect();
        let bg_size = egui::vec2(340.0, 80.0);
        let bg_rect = egui::Rect::from_center_size(screen_rect.center(), bg_size);
        painter.rect_filled(bg_rect, 16.0, Color32::from_black_alpha(180));
        painter.text(
            screen_rect.center(),
            egui::Align2::CENTER_CENTER,
            "📂 Drop KML file here",
            egui::FontId::proportional(32.0),
            Color32::WHITE,
        );
    }

    // One document at a time: the first supported file wins
    if let Some(path) = dropped_paths.into_iter().find(|path| is_supported_file(path)) {
        state.start_load(path);
    }
}

/// Whether `path` has an extension the loader understands
fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "kml" | "geojson" | "json")
        })
        .unwrap_or(false)
}
