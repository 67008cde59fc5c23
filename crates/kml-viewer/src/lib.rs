//! KML Viewer & Analyzer - Application Library
//!
//! Desktop front end for `kml-analyzer-lib`: loads one KML document at a time,
//! draws its features on a slippy map and shows the summary and detail tables.

mod app;
pub mod logging;
pub mod report;

pub use app::KmlViewerApp;
pub use app::settings::Settings;
pub use app::state::TilesProvider;

/// Application name, used for the window title and storage key
pub const APP_NAME: &str = "KML Viewer & Analyzer";

/// Open the viewer window and block until it is closed
///
/// Must be called from within a Tokio runtime; file loads are spawned on it.
pub fn run_native(settings: Settings) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(APP_NAME)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(KmlViewerApp::new(cc, settings)))),
    )
}
