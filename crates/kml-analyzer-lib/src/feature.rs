//! Source-independent feature model
//!
//! A [`FeatureCollection`] is what every [`FeatureSource`](crate::FeatureSource)
//! produces: an ordered list of geometries with optional name and description.

use geo::{Geometry, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discriminator of a feature's geometry
///
/// Variants are declared in alphabetical order of their label, so the derived
/// `Ord` sorts kinds the way the summary table lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeometryKind {
    GeometryCollection,
    LineString,
    MultiLineString,
    MultiPoint,
    MultiPolygon,
    Point,
    Polygon,
}

impl GeometryKind {
    /// Classify a geometry
    ///
    /// Two-point `Line`s count as line strings; `Rect` and `Triangle` count as polygons.
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => Self::Point,
            Geometry::Line(_) | Geometry::LineString(_) => Self::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => Self::Polygon,
            Geometry::MultiPoint(_) => Self::MultiPoint,
            Geometry::MultiLineString(_) => Self::MultiLineString,
            Geometry::MultiPolygon(_) => Self::MultiPolygon,
            Geometry::GeometryCollection(_) => Self::GeometryCollection,
        }
    }

    /// GeoJSON type name
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeometryCollection => "GeometryCollection",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPoint => "MultiPoint",
            Self::MultiPolygon => "MultiPolygon",
            Self::Point => "Point",
            Self::Polygon => "Polygon",
        }
    }

    /// Whether features of this kind get a path length
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineString | Self::MultiLineString)
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A geometry with its optional metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    /// Geometry in WGS84 degrees (x = longitude, y = latitude)
    pub geometry: Geometry<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: geometry.into(),
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> GeometryKind {
        GeometryKind::of(&self.geometry)
    }

    /// Name, if present and not empty
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Ordered sequence of features, in document order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    #[inline]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounding box of all features in WGS84 degrees
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        crate::utils::bounding_box(self.features.iter().map(|feature| &feature.geometry))
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiLineString, Rect, coord, point, polygon};

    #[test]
    fn test_kind_classification() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(GeometryKind::of(&point!(x: 1.0, y: 2.0).into()), GeometryKind::Point);
        assert_eq!(GeometryKind::of(&line.clone().into()), GeometryKind::LineString);
        assert_eq!(
            GeometryKind::of(&MultiLineString::new(vec![line]).into()),
            GeometryKind::MultiLineString
        );
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(GeometryKind::of(&square.into()), GeometryKind::Polygon);
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        assert_eq!(GeometryKind::of(&rect.into()), GeometryKind::Polygon);
    }

    #[test]
    fn test_kind_order_is_alphabetical() {
        let mut kinds = vec![
            GeometryKind::Polygon,
            GeometryKind::Point,
            GeometryKind::MultiPolygon,
            GeometryKind::MultiPoint,
            GeometryKind::MultiLineString,
            GeometryKind::LineString,
            GeometryKind::GeometryCollection,
        ];
        kinds.sort();
        let labels: Vec<_> = kinds.iter().map(|kind| kind.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_only_lines_have_length() {
        assert!(GeometryKind::LineString.is_line());
        assert!(GeometryKind::MultiLineString.is_line());
        assert!(!GeometryKind::Polygon.is_line());
        assert!(!GeometryKind::Point.is_line());
        assert!(!GeometryKind::GeometryCollection.is_line());
    }

    #[test]
    fn test_display_name_ignores_empty() {
        let feature = Feature::new(point!(x: 0.0, y: 0.0));
        assert_eq!(feature.display_name(), None);
        assert_eq!(feature.clone().with_name("").display_name(), None);
        assert_eq!(feature.with_name("Summit").display_name(), Some("Summit"));
    }

    #[test]
    fn test_collection_preserves_order() {
        let collection: FeatureCollection = (0..5)
            .map(|i| Feature::new(point!(x: i as f64, y: 0.0)).with_name(format!("p{i}")))
            .collect();
        assert_eq!(collection.len(), 5);
        let names: Vec<_> = collection.iter().filter_map(|f| f.name.as_deref()).collect();
        assert_eq!(names, ["p0", "p1", "p2", "p3", "p4"]);
    }
}
