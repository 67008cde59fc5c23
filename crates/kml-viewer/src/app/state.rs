//! Application state management
//!
//! The loaded document is an immutable snapshot (`Arc<LoadedDocument>`) that is
//! swapped as a whole when a load finishes and dropped on failure or reset.

use crate::app::settings::Settings;
use kml_analyzer_lib::{DataError, LoadedDocument, ViewMode, display_name, source_for_path};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Outcome of one file load, delivered from the loading task
type LoadOutcome = Result<LoadedDocument, DataError>;

/// Main application state
pub struct AppState {
    /// Snapshot of the current document (None until a load succeeds)
    pub document: Option<Arc<LoadedDocument>>,

    /// Active display mode; only meaningful while a document is loaded
    pub view_mode: ViewMode,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// File loading state
    pub file_loader: FileLoader,

    /// Fit the map to the document on the next frame
    pub pending_fit_bounds: bool,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone, Debug, PartialEq)]
pub struct UiSettings {
    /// Feature line width in pixels
    pub line_width: f32,

    /// Map tiles provider
    pub tiles_provider: TilesProvider,
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum TilesProvider {
    OpenStreetMap,
    OpenTopoMap,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::OpenTopoMap => "© OpenTopoMap (CC-BY-SA)",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::OpenStreetMap, Self::OpenTopoMap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }
}

/// File loading state and operations
#[derive(Default)]
pub struct FileLoader {
    /// File whose load is in flight
    pub loading_file: Option<PathBuf>,

    /// Receiver for the in-flight load
    pending: Option<oneshot::Receiver<LoadOutcome>>,

    /// Message of the last failed load
    pub error: Option<String>,

    /// Show file picker dialog
    pub show_picker: bool,
}

impl FileLoader {
    /// Whether a load is in flight
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

impl AppState {
    /// Create new application state from CLI settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            document: None,
            view_mode: ViewMode::Map,
            ui_settings: UiSettings {
                line_width: settings.line_width,
                tiles_provider: settings.tiles,
            },
            file_loader: FileLoader::default(),
            pending_fit_bounds: false,
        }
    }

    /// Start loading `path`, replacing any load already in flight
    ///
    /// The file is read and parsed on the Tokio runtime when one is running,
    /// otherwise synchronously. Either way the outcome is picked up by
    /// [`AppState::poll_load`].
    pub fn start_load(&mut self, path: PathBuf) {
        tracing::info!("Loading {}", path.display());

        let (tx, rx) = oneshot::channel();
        self.file_loader.loading_file = Some(path.clone());
        self.file_loader.error = None;
        self.file_loader.pending = Some(rx);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let outcome = match tokio::fs::read_to_string(&path).await {
                        Ok(text) => LoadedDocument::from_text(
                            display_name(&path),
                            &text,
                            source_for_path(&path).as_ref(),
                        ),
                        Err(source) => Err(DataError::Read { path, source }),
                    };
                    // The receiver is gone if another load replaced this one
                    let _ = tx.send(outcome);
                });
            }
            Err(_) => {
                let _ = tx.send(LoadedDocument::load(&path));
            }
        }
    }

    /// Pick up the result of the in-flight load, if it has finished
    ///
    /// Returns true when a load completed (successfully or not) during this call.
    pub fn poll_load(&mut self) -> bool {
        let Some(receiver) = self.file_loader.pending.as_mut() else {
            return false;
        };

        match receiver.try_recv() {
            Ok(outcome) => {
                self.file_loader.pending = None;
                self.finish_load(outcome);
                true
            }
            Err(oneshot::error::TryRecvError::Empty) => false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.file_loader.pending = None;
                self.file_loader.loading_file = None;
                self.clear_document();
                self.file_loader.error = Some("Error reading file".to_string());
                true
            }
        }
    }

    /// Apply a load outcome: all derived state is replaced, or all of it is dropped
    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        profiling::scope!("finish_load");

        let path = self.file_loader.loading_file.take();
        match outcome {
            Ok(document) => {
                tracing::info!(
                    "Loaded {}: {} features",
                    document.source_name(),
                    document.collection().len()
                );
                self.document = Some(Arc::new(document));
                self.view_mode = ViewMode::Map;
                self.file_loader.error = None;
                self.pending_fit_bounds = true;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load {}: {}",
                    path.as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    e
                );
                self.clear_document();
                self.file_loader.error = Some(error_message(&e));
            }
        }
    }

    /// Forget the loaded document and return to the initial mode
    pub fn reset(&mut self) {
        self.clear_document();
        self.file_loader = FileLoader::default();
    }

    /// Document whose results are shown; hidden while a new load is in flight
    pub fn visible_document(&self) -> Option<&Arc<LoadedDocument>> {
        if self.file_loader.is_busy() {
            None
        } else {
            self.document.as_ref()
        }
    }

    /// Switch display mode; ignored while nothing is loaded
    pub fn select_view(&mut self, mode: ViewMode) {
        if self.document.is_some() {
            self.view_mode = mode;
        }
    }

    fn clear_document(&mut self) {
        self.document = None;
        self.view_mode = ViewMode::Map;
        self.pending_fit_bounds = false;
    }
}

/// User-facing message for a failed load
pub fn error_message(error: &DataError) -> String {
    if error.is_read_failure() {
        format!("Error reading file: {}", error)
    } else {
        format!("Error processing KML file: {}", error)
    }
}
