//! Loaded document snapshot
//!
//! A [`LoadedDocument`] holds everything derived from one load. It is built in
//! one go and never mutated, so callers replace it wholesale on the next load
//! and a failed load leaves nothing half-updated.

use crate::presentation::{self, DetailRow, SummaryRow};
use crate::source::{FeatureSource, source_for_path};
use crate::{CountSummary, DataError, FeatureCollection, FeatureRecord, Result, summarize};
use geo::Rect;
use std::path::Path;

/// Features of one document together with their derived statistics
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// File name (or other label) the document was loaded from
    source_name: String,
    collection: FeatureCollection,
    counts: CountSummary,
    records: Vec<FeatureRecord>,
    /// WGS84 extent of all features (None if no feature has coordinates)
    bounding_box: Option<Rect<f64>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl LoadedDocument {
    /// Derive counts, records and extent from an already parsed collection
    pub fn from_collection(source_name: impl Into<String>, collection: FeatureCollection) -> Self {
        let (counts, records) = summarize(&collection);
        let bounding_box = collection.bounding_box();
        Self {
            source_name: source_name.into(),
            collection,
            counts,
            records,
            bounding_box,
        }
    }

    /// Parse `text` with `source` and derive the snapshot
    pub fn from_text(
        source_name: impl Into<String>,
        text: &str,
        source: &dyn FeatureSource,
    ) -> Result<Self> {
        let source_name = source_name.into();
        let collection = source.parse(text)?;
        tracing::info!(
            "Loaded {} {} features from {}",
            collection.len(),
            source.format_name(),
            source_name
        );
        Ok(Self::from_collection(source_name, collection))
    }

    /// Read and parse a file, picking the source from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(display_name(path), &text, source_for_path(path).as_ref())
    }

    #[inline]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[inline]
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    #[inline]
    pub fn counts(&self) -> &CountSummary {
        &self.counts
    }

    #[inline]
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.bounding_box
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        presentation::summary_rows(&self.counts)
    }

    pub fn detail_rows(&self) -> Vec<DetailRow> {
        presentation::detail_rows(&self.records)
    }
}

/// File name of `path` for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
