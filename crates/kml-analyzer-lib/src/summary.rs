//! Feature classification and summarization
//!
//! [`summarize`] walks a collection once, tallying features per geometry kind
//! and building one [`FeatureRecord`] per feature in input order.

use crate::length::{format_km, path_length_km};
use crate::{Feature, FeatureCollection, GeometryKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display name used for features without a name
pub const UNNAMED_FEATURE: &str = "Unnamed Feature";

/// Number of features per geometry kind
///
/// Iterates in alphabetical order of the kind label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountSummary {
    counts: BTreeMap<GeometryKind, usize>,
}

impl CountSummary {
    /// Count one more feature of `kind`
    pub fn increment(&mut self, kind: GeometryKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Count for `kind` (0 when absent)
    pub fn get(&self, kind: GeometryKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeometryKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Number of distinct kinds
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of features counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Length of a feature as shown in the detail view
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Length {
    Kilometers(f64),
    /// The feature is not a line
    NotApplicable,
}

impl Length {
    pub fn km(&self) -> Option<f64> {
        match self {
            Length::Kilometers(km) => Some(*km),
            Length::NotApplicable => None,
        }
    }
}

/// `"12.34"` for kilometers, `"N/A"` otherwise
impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Kilometers(km) => f.write_str(&format_km(*km)),
            Length::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Derived description of one feature
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureRecord {
    pub kind: GeometryKind,
    pub name: String,
    pub description: String,
    pub length: Length,
}

impl FeatureRecord {
    /// Build the record for a single feature
    pub fn from_feature(feature: &Feature) -> Self {
        let kind = feature.kind();
        let length = if kind.is_line() {
            path_length_km(&feature.geometry)
                .map(Length::Kilometers)
                .unwrap_or(Length::NotApplicable)
        } else {
            Length::NotApplicable
        };

        Self {
            kind,
            name: feature.display_name().unwrap_or(UNNAMED_FEATURE).to_string(),
            description: feature.description.clone().unwrap_or_default(),
            length,
        }
    }
}

/// Count features per kind and describe each one, preserving input order
pub fn summarize(collection: &FeatureCollection) -> (CountSummary, Vec<FeatureRecord>) {
    #[cfg(feature = "profiling")]
    profiling::scope!("summary::summarize");

    let mut counts = CountSummary::default();
    let mut records = Vec::with_capacity(collection.len());

    for feature in collection {
        let record = FeatureRecord::from_feature(feature);
        counts.increment(record.kind);
        records.push(record);
    }

    tracing::debug!(
        "Summarized {} features into {} kinds",
        records.len(),
        counts.len()
    );

    (counts, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiLineString, point, polygon};

    fn line_feature(name: &str, lat_end: f64) -> Feature {
        Feature::new(LineString::from(vec![(0.0, 0.0), (0.0, lat_end)])).with_name(name)
    }

    fn create_test_collection() -> FeatureCollection {
        FeatureCollection::new(vec![
            line_feature("Trail A", 1.0),
            Feature::new(point!(x: 10.0, y: 10.0)).with_name("Camp"),
            line_feature("Trail B", 2.0),
            Feature::new(point!(x: 11.0, y: 11.0)),
            line_feature("Trail C", 0.5).with_description("Short loop"),
        ])
    }

    #[test]
    fn test_counts_by_kind() {
        let (counts, records) = summarize(&create_test_collection());
        assert_eq!(counts.get(GeometryKind::LineString), 3);
        assert_eq!(counts.get(GeometryKind::Point), 2);
        assert_eq!(counts.get(GeometryKind::Polygon), 0);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 5);
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_lengths_only_for_lines() {
        let (_, records) = summarize(&create_test_collection());
        for record in &records {
            match record.kind {
                GeometryKind::LineString => assert!(record.length.km().is_some()),
                _ => assert_eq!(record.length, Length::NotApplicable),
            }
        }
        assert_eq!(records[0].length.to_string(), "111.19");
        assert_eq!(records[1].length.to_string(), "N/A");
    }

    #[test]
    fn test_polygons_report_no_length() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0)
        ];
        let collection = FeatureCollection::new(vec![Feature::new(square)]);
        let (counts, records) = summarize(&collection);
        assert_eq!(counts.get(GeometryKind::Polygon), 1);
        assert_eq!(records[0].length, Length::NotApplicable);
    }

    #[test]
    fn test_multi_line_length() {
        let lines = MultiLineString::new(vec![
            LineString::from(vec![(0.0, 0.0), (0.0, 1.0)]),
            LineString::from(vec![(5.0, 0.0), (5.0, 1.0)]),
        ]);
        let (counts, records) = summarize(&FeatureCollection::new(vec![Feature::new(lines)]));
        assert_eq!(counts.get(GeometryKind::MultiLineString), 1);
        assert_eq!(records[0].length.to_string(), "222.39");
    }

    #[test]
    fn test_preserves_input_order() {
        let collection = create_test_collection();
        let (_, records) = summarize(&collection);
        for (feature, record) in collection.iter().zip(&records) {
            assert_eq!(feature.kind(), record.kind);
        }
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Trail A", "Camp", "Trail B", UNNAMED_FEATURE, "Trail C"]
        );
    }

    #[test]
    fn test_name_and_description_fallbacks() {
        let (_, records) = summarize(&create_test_collection());
        assert_eq!(records[3].name, "Unnamed Feature");
        assert_eq!(records[3].description, "");
        assert_eq!(records[4].description, "Short loop");
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let collection = create_test_collection();
        let before = collection.clone();
        let first = summarize(&collection);
        let second = summarize(&collection);
        assert_eq!(first, second);
        assert_eq!(collection, before);
    }

    #[test]
    fn test_empty_collection() {
        let (counts, records) = summarize(&FeatureCollection::default());
        assert!(counts.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn test_counts_iterate_alphabetically() {
        let mut counts = CountSummary::default();
        counts.increment(GeometryKind::Point);
        counts.increment(GeometryKind::Polygon);
        counts.increment(GeometryKind::LineString);
        counts.increment(GeometryKind::Point);
        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(
            entries,
            [
                (GeometryKind::LineString, 1),
                (GeometryKind::Point, 2),
                (GeometryKind::Polygon, 1),
            ]
        );
    }
}
