//! GeoJSON input and export via the `geojson` crate
//!
//! `name` and `description` string properties map to the feature metadata in
//! both directions.

use super::FeatureSource;
use crate::{DataError, Feature, FeatureCollection, Result};
use geojson::GeoJson;

/// Reads a GeoJSON `FeatureCollection`, `Feature` or bare `Geometry`
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonSource;

impl FeatureSource for GeoJsonSource {
    fn format_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn parse(&self, text: &str) -> Result<FeatureCollection> {
        #[cfg(feature = "profiling")]
        profiling::scope!("geojson_source::parse");

        match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .filter_map(|feature| convert_feature(feature).transpose())
                .collect::<Result<Vec<_>>>()
                .map(FeatureCollection::new),
            GeoJson::Feature(feature) => Ok(convert_feature(feature)?.into_iter().collect()),
            GeoJson::Geometry(geometry) => {
                let geometry = convert_geometry(geometry)?;
                Ok(FeatureCollection::new(vec![Feature::new(geometry)]))
            }
        }
    }
}

fn convert_feature(feature: geojson::Feature) -> Result<Option<Feature>> {
    let string_property = |key: &str| {
        feature
            .property(key)
            .and_then(|value| value.as_str())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    let name = string_property("name");
    let description = string_property("description");

    let Some(geometry) = feature.geometry else {
        tracing::debug!(
            "Skipping GeoJSON feature without geometry: {}",
            name.as_deref().unwrap_or("<unnamed>")
        );
        return Ok(None);
    };

    Ok(Some(Feature {
        geometry: convert_geometry(geometry)?,
        name,
        description,
    }))
}

fn convert_geometry(geometry: geojson::Geometry) -> Result<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry).map_err(|e| DataError::InvalidGeometry(e.to_string()))
}

/// Export a collection as GeoJSON, carrying names and descriptions as properties
pub fn to_geojson(collection: &FeatureCollection) -> geojson::FeatureCollection {
    let features = collection
        .iter()
        .map(|feature| {
            let mut properties = geojson::JsonObject::new();
            if let Some(name) = &feature.name {
                properties.insert("name".to_string(), name.clone().into());
            }
            if let Some(description) = &feature.description {
                properties.insert("description".to_string(), description.clone().into());
            }

            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.geometry,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
