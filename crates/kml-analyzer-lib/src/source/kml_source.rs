//! KML documents via the `kml` crate
//!
//! Placemarks are collected depth-first through `Document` and `Folder`
//! containers, in document order. Placemarks without a usable geometry are
//! skipped; `gx:Track` placemarks are read as lines.

use super::FeatureSource;
use crate::{DataError, Feature, FeatureCollection, Result};
use geo::{Coord, Geometry, LineString, Point, Polygon};
use kml::Kml;
use kml::types::{Element, Geometry as KmlGeometry, MultiGeometry, Placemark};

/// Reads KML text; the document must have a `<kml>` root element
#[derive(Debug, Clone, Copy, Default)]
pub struct KmlSource;

impl FeatureSource for KmlSource {
    fn format_name(&self) -> &'static str {
        "KML"
    }

    fn parse(&self, text: &str) -> Result<FeatureCollection> {
        #[cfg(feature = "profiling")]
        profiling::scope!("kml_source::parse");

        if !text.contains("<kml") {
            return Err(missing_root());
        }
        let kml: Kml = text.parse()?;
        let Kml::KmlDocument(document) = &kml else {
            return Err(missing_root());
        };

        let mut collection = FeatureCollection::default();
        for element in &document.elements {
            collect_placemarks(element, &mut collection);
        }
        Ok(collection)
    }
}

fn missing_root() -> DataError {
    DataError::InvalidDocument("missing <kml> root element".to_string())
}

fn collect_placemarks(element: &Kml, collection: &mut FeatureCollection) {
    match element {
        Kml::KmlDocument(document) => {
            for child in &document.elements {
                collect_placemarks(child, collection);
            }
        }
        Kml::Document { elements, .. } => {
            for child in elements {
                collect_placemarks(child, collection);
            }
        }
        Kml::Folder(folder) => {
            for child in &folder.elements {
                collect_placemarks(child, collection);
            }
        }
        Kml::Placemark(placemark) => {
            if let Some(feature) = placemark_to_feature(placemark) {
                collection.push(feature);
            }
        }
        _ => {}
    }
}

fn placemark_to_feature(placemark: &Placemark) -> Option<Feature> {
    let geometry = match &placemark.geometry {
        Some(geometry) => convert_geometry(geometry),
        None => placemark.children.iter().find_map(convert_track),
    };
    let Some(geometry) = geometry else {
        tracing::debug!(
            "Skipping placemark without geometry: {}",
            placemark.name.as_deref().unwrap_or("<unnamed>")
        );
        return None;
    };

    Some(Feature {
        geometry,
        name: non_empty(placemark.name.as_deref()),
        description: non_empty(placemark.description.as_deref()),
    })
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[inline]
fn coord(c: &kml::types::Coord) -> Coord<f64> {
    Coord { x: c.x, y: c.y }
}

fn line(coords: &[kml::types::Coord]) -> LineString<f64> {
    coords.iter().map(coord).collect()
}

fn convert_geometry(geometry: &KmlGeometry) -> Option<Geometry<f64>> {
    match geometry {
        KmlGeometry::Point(point) => Some(Geometry::Point(Point::from(coord(&point.coord)))),
        KmlGeometry::LineString(line_string) => {
            Some(Geometry::LineString(line(&line_string.coords)))
        }
        KmlGeometry::LinearRing(ring) => Some(Geometry::LineString(line(&ring.coords))),
        KmlGeometry::Polygon(polygon) => Some(Geometry::Polygon(Polygon::new(
            line(&polygon.outer.coords),
            polygon.inner.iter().map(|ring| line(&ring.coords)).collect(),
        ))),
        KmlGeometry::MultiGeometry(multi) => convert_multi_geometry(multi),
        _ => {
            tracing::warn!("Skipping unsupported KML geometry");
            None
        }
    }
}

/// A single member stands for itself, anything more is a geometry collection
fn convert_multi_geometry(multi: &MultiGeometry) -> Option<Geometry<f64>> {
    let mut members: Vec<Geometry<f64>> =
        multi.geometries.iter().filter_map(convert_geometry).collect();

    if members.len() <= 1 {
        return members.pop();
    }
    Some(Geometry::GeometryCollection(geo::GeometryCollection(members)))
}

/// `gx:Track` becomes a line through its `gx:coord` positions; `gx:MultiTrack`
/// follows the MultiGeometry rules over its tracks
fn convert_track(element: &Element) -> Option<Geometry<f64>> {
    match element.name.trim_start_matches("gx:") {
        "Track" => {
            let line: LineString<f64> = element
                .children
                .iter()
                .filter(|child| child.name.trim_start_matches("gx:") == "coord")
                .filter_map(|child| child.content.as_deref().and_then(parse_track_coord))
                .collect();
            if line.0.is_empty() {
                tracing::warn!("Skipping gx:Track without coordinates");
                return None;
            }
            Some(Geometry::LineString(line))
        }
        "MultiTrack" => {
            let mut tracks: Vec<Geometry<f64>> =
                element.children.iter().filter_map(convert_track).collect();
            if tracks.len() <= 1 {
                return tracks.pop();
            }
            Some(Geometry::GeometryCollection(geo::GeometryCollection(tracks)))
        }
        _ => None,
    }
}

/// `"lon lat [alt]"`, whitespace separated
fn parse_track_coord(text: &str) -> Option<Coord<f64>> {
    let mut parts = text.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some(Coord { x, y })
}
