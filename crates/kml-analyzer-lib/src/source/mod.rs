//! Feature sources: turning document text into a [`FeatureCollection`]
//!
//! The rest of the library only sees the [`FeatureSource`] trait, so the
//! summarizer and its tests never depend on a markup parser.

mod geojson_source;
mod kml_source;

pub use geojson_source::{GeoJsonSource, to_geojson};
pub use kml_source::KmlSource;

use crate::{FeatureCollection, Result};
use std::path::Path;

/// Parses raw document text into features
pub trait FeatureSource: Send + Sync {
    /// Short format name used in logs
    fn format_name(&self) -> &'static str;

    fn parse(&self, text: &str) -> Result<FeatureCollection>;
}

/// Pick a source by file extension: `.geojson`/`.json` are GeoJSON, anything else is KML
pub fn source_for_path(path: &Path) -> Box<dyn FeatureSource> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("geojson") | Some("json") => Box::new(GeoJsonSource),
        _ => Box::new(KmlSource),
    }
}
