//! Application module
//!
//! This module provides the main application structure:
//! - Header with file upload, reset, loading indicator and error banner
//! - Map view with the loaded features and hover labels
//! - Summary and detail tables
//! - Drag-and-drop support for KML files

mod plugin;
pub(crate) mod settings;
pub(crate) mod state;
mod ui_panels;

use crate::app::plugin::FeaturePlugin;
use crate::app::settings::Settings;
use crate::app::state::{AppState, TilesProvider};
use eframe::egui;
use geo::Rect;
use kml_analyzer_lib::ViewMode;
use walkers::{
    HttpTiles, Map, MapMemory, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Storage key for [`PersistedSettings`]
const PERSISTED_SETTINGS_KEY: &str = "persisted_settings";

/// Zoom level of the initial world view
const INITIAL_ZOOM: f64 = 2.0;

/// Custom OpenTopoMap tile source
pub struct OpenTopoMap;

impl TileSource for OpenTopoMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.opentopomap.org/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenTopoMap (CC-BY-SA)",
            url: "https://opentopomap.org/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        17
    }
}

/// Persisted settings (UI only, never the loaded document)
#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct PersistedSettings {
    line_width: f32,
    tiles_provider: TilesProvider,
}

impl PersistedSettings {
    fn apply(self, state: &mut AppState) {
        state.ui_settings.line_width = self.line_width;
        state.ui_settings.tiles_provider = self.tiles_provider;
    }
}

/// Main application structure
pub struct KmlViewerApp {
    /// Application state (document, view mode, UI settings, loading)
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles_osm: HttpTiles,

    /// Map tiles provider (OpenTopoMap)
    tiles_otm: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,
}

impl KmlViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut state = AppState::new(&settings);

        if settings.ignore_persisted {
            tracing::info!("Ignoring persisted state (--ignore-persisted flag)");
        } else if let Some(storage) = cc.storage {
            Self::restore_persisted_settings(storage, &mut state);
        }

        if let Some(path) = &settings.kml_file {
            state.start_load(path.clone());
        }

        let tiles_osm = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let tiles_otm = HttpTiles::new(OpenTopoMap, cc.egui_ctx.clone());

        let mut map_memory = MapMemory::default();
        let _ = map_memory.set_zoom(INITIAL_ZOOM);

        Self {
            state,
            tiles_osm,
            tiles_otm,
            map_memory,
        }
    }

    /// Restore UI settings from storage, keeping CLI values if nothing usable is stored
    fn restore_persisted_settings(storage: &dyn eframe::Storage, state: &mut AppState) {
        if let Some(json) = storage.get_string(PERSISTED_SETTINGS_KEY)
            && !json.is_empty()
        {
            match serde_json::from_str::<PersistedSettings>(&json) {
                Ok(settings) => {
                    tracing::debug!("Restored settings: {:?}", settings);
                    settings.apply(state);
                    return;
                }
                Err(e) => tracing::warn!("Discarding unreadable persisted settings: {}", e),
            }
        }

        tracing::debug!("No persisted settings found, starting fresh");
    }

    /// Fit the map view to the bounding box of the loaded document
    fn fit_to_bounds(&mut self) {
        let Some(bounds) = self.state.document.as_ref().and_then(|d| d.bounding_box()) else {
            return;
        };

        let (center_lat, center_lon, zoom) = fit_view(bounds);
        self.map_memory
            .center_at(walkers::lat_lon(center_lat, center_lon));
        let _ = self.map_memory.set_zoom(zoom);

        tracing::trace!(
            "Auto-zoomed to bounds: ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom: {:.1}",
            bounds.min().y,
            bounds.min().x,
            bounds.max().y,
            bounds.max().x,
            zoom
        );
    }

    fn show_map(&mut self, ui: &mut egui::Ui) {
        profiling::scope!("map_panel");

        let line_width = self.state.ui_settings.line_width;
        let tiles_provider = self.state.ui_settings.tiles_provider;

        let tiles: &mut HttpTiles = match tiles_provider {
            TilesProvider::OpenStreetMap => &mut self.tiles_osm,
            TilesProvider::OpenTopoMap => &mut self.tiles_otm,
        };

        let mut map = Map::new(
            Some(tiles),
            &mut self.map_memory,
            walkers::lat_lon(0.0, 0.0),
        );
        if let Some(document) = self.state.visible_document() {
            map = map.with_plugin(FeaturePlugin::new(document.clone(), line_width));
        }
        ui.add(map);

        if self.state.document.is_none() && !self.state.file_loader.is_busy() {
            ui_panels::render_empty_hint(ui);
        }
        ui_panels::render_attribution(ui, tiles_provider);
    }
}

/// Center (lat, lon) and zoom level showing all of `bounds`
fn fit_view(bounds: Rect<f64>) -> (f64, f64, f64) {
    let center = bounds.center();

    let lat_span = bounds.height().abs();
    let lon_span = bounds.width().abs();
    let max_span = lat_span.max(lon_span);

    let zoom = if max_span > 0.0 {
        let zoom_estimate = (4.0 * 360.0 / max_span).log2();
        (zoom_estimate - 0.5).clamp(1.0, 18.0)
    } else {
        12.0
    };

    (center.y, center.x, zoom)
}

#[profiling::all_functions]
impl eframe::App for KmlViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll_load() {
            ctx.request_repaint();
        }
        if self.state.file_loader.is_busy() {
            // Keep polling until the load task delivers
            ctx.request_repaint();
        }

        if self.state.pending_fit_bounds {
            self.state.pending_fit_bounds = false;
            self.fit_to_bounds();
        }

        ui_panels::handle_drag_and_drop(ctx, &mut self.state);
        ui_panels::show_file_picker(&mut self.state);
        ui_panels::render_header(ctx, &mut self.state);

        let document = self.state.visible_document().cloned();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| match (self.state.view_mode, document) {
                (ViewMode::Summary, Some(document)) => {
                    egui::Frame::central_panel(ui.style()).show(ui, |ui| {
                        ui_panels::render_summary(ui, &document);
                    });
                }
                (ViewMode::Detail, Some(document)) => {
                    egui::Frame::central_panel(ui.style()).show(ui, |ui| {
                        ui_panels::render_detail(ui, &document);
                    });
                }
                _ => self.show_map(ui),
            });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            line_width: self.state.ui_settings.line_width,
            tiles_provider: self.state.ui_settings.tiles_provider,
        };

        match serde_json::to_string(&settings) {
            Ok(json) => {
                storage.set_string(PERSISTED_SETTINGS_KEY, json);
                tracing::debug!("Saved settings on exit");
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_fit_view_centers_on_bounds() {
        let bounds = Rect::new(
            geo::Coord { x: -1.0, y: 50.0 },
            geo::Coord { x: 1.0, y: 52.0 },
        );
        let (lat, lon, zoom) = fit_view(bounds);
        assert!((lat - 51.0).abs() < 1e-9);
        assert!(lon.abs() < 1e-9);
        // log2(720) - 0.5
        assert!((zoom - 8.99).abs() < 0.01);
    }

    #[test]
    fn test_fit_view_single_point() {
        let bounds = Rect::new(geo::Coord { x: 2.0, y: 3.0 }, geo::Coord { x: 2.0, y: 3.0 });
        assert_eq!(fit_view(bounds), (3.0, 2.0, 12.0));
    }

    #[test]
    fn test_fit_view_whole_world_is_clamped() {
        let bounds = Rect::new(
            geo::Coord { x: -180.0, y: -85.0 },
            geo::Coord { x: 180.0, y: 85.0 },
        );
        let (_, _, zoom) = fit_view(bounds);
        assert_eq!(zoom, 1.5);
    }

    #[test]
    fn test_persisted_settings_json() {
        let json = r#"{"line_width":3.5,"tiles_provider":"OpenTopoMap"}"#;
        let settings: PersistedSettings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings,
            PersistedSettings {
                line_width: 3.5,
                tiles_provider: TilesProvider::OpenTopoMap,
            }
        );
        assert_eq!(serde_json::to_string(&settings).unwrap(), json);

        let mut state = AppState::new(&Settings::parse_from(["kml-viewer"]));
        settings.apply(&mut state);
        assert_eq!(state.ui_settings.line_width, 3.5);
        assert_eq!(state.ui_settings.tiles_provider, TilesProvider::OpenTopoMap);
    }
}
