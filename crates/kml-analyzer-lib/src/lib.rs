//! KML Analyzer Library - Core Data Structures for KML Feature Statistics
//!
//! This library turns a KML (or GeoJSON) document into an ordered collection of
//! features and derives the statistics shown by the viewer: how many features of
//! each geometry kind the document holds, and how long each line is when measured
//! along great circles.
//!
//! # Architecture
//!
//! - **[`utils`]**: Haversine distance and bounding box helpers
//! - **[`length`]**: Path length accumulation over lines and multi-lines
//! - **[`Feature`] / [`FeatureCollection`]**: Source-independent feature model
//! - **[`summarize`]**: Per-kind counts and per-feature records
//! - **[`presentation`]**: Table rows, map labels and view modes
//! - **[`FeatureSource`]**: Narrow parsing interface with KML and GeoJSON implementations
//! - **[`LoadedDocument`]**: Immutable snapshot produced by a single load
//!
//! All computation is synchronous and pure. The only fallible steps are reading
//! and parsing, which are reported through [`DataError`].

mod document;
mod feature;
pub mod length;
pub mod presentation;
mod source;
mod summary;
pub mod utils;

// Public API exports
pub use document::{LoadedDocument, display_name};
pub use feature::{Feature, FeatureCollection, GeometryKind};
pub use length::path_length;
pub use presentation::{DetailRow, FeatureLabel, SummaryRow, ViewMode, label_for};
pub use source::{FeatureSource, GeoJsonSource, KmlSource, source_for_path, to_geojson};
pub use summary::{CountSummary, FeatureRecord, Length, UNNAMED_FEATURE, summarize};

/// Error types for loading and converting documents
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Invalid KML file: {0}")]
    InvalidDocument(String),

    #[error("KML parsing error: {0}")]
    KmlParse(#[from] kml::Error),

    #[error("GeoJSON parsing error: {0}")]
    GeoJsonParse(#[from] geojson::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// Whether the error happened before any content could be parsed
    pub fn is_read_failure(&self) -> bool {
        matches!(self, DataError::Read { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
