//! Utility functions for great-circle distances and spatial extents

use geo::{BoundingRect, Coord, Geometry, Point, Rect};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 points in kilometers
///
/// Points are `(x = longitude, y = latitude)` in degrees. Uses the haversine
/// formula on a sphere of radius [`EARTH_RADIUS_KM`]. Coordinates are not
/// validated; out-of-range input yields a finite but meaningless result.
#[inline(always)]
pub fn haversine_distance_km(p1: Point<f64>, p2: Point<f64>) -> f64 {
    let lat1 = p1.y().to_radians();
    let lat2 = p2.y().to_radians();
    let delta_lat = (p2.y() - p1.y()).to_radians();
    let delta_lon = (p2.x() - p1.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Bounding box of a set of geometries in WGS84 degrees
///
/// Returns `None` when no geometry has any coordinate.
pub fn bounding_box<'a>(geometries: impl IntoIterator<Item = &'a Geometry<f64>>) -> Option<Rect<f64>> {
    geometries
        .into_iter()
        .filter_map(|geometry| geometry.bounding_rect())
        .reduce(|acc, rect| {
            Rect::new(
                Coord {
                    x: acc.min().x.min(rect.min().x),
                    y: acc.min().y.min(rect.min().y),
                },
                Coord {
                    x: acc.max().x.max(rect.max().x),
                    y: acc.max().y.max(rect.max().y),
                },
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, point};

    #[test]
    fn test_identical_points_are_zero() {
        let p = point!(x: 12.5, y: 41.9);
        assert!(haversine_distance_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let london = point!(x: -0.1278, y: 51.5074);
        let paris = point!(x: 2.3522, y: 48.8566);
        let there = haversine_distance_km(london, paris);
        let back = haversine_distance_km(paris, london);
        assert!((there - back).abs() < 1e-9);
        // Roughly 344 km
        assert!((there - 343.5).abs() < 1.0);
    }

    #[test]
    fn test_antipodal_points() {
        let distance = haversine_distance_km(point!(x: 0.0, y: 0.0), point!(x: 180.0, y: 0.0));
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
        assert!((distance - 20015.09).abs() < 0.01);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let distance = haversine_distance_km(point!(x: 0.0, y: 0.0), point!(x: 0.0, y: 1.0));
        assert!((distance - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_bounding_box_spans_all_geometries() {
        let geometries = vec![
            Geometry::Point(point!(x: -3.0, y: 40.0)),
            Geometry::LineString(LineString::from(vec![(2.0, 41.0), (5.0, 43.5)])),
        ];
        let bbox = bounding_box(&geometries).unwrap();
        assert_eq!(bbox.min(), Coord { x: -3.0, y: 40.0 });
        assert_eq!(bbox.max(), Coord { x: 5.0, y: 43.5 });
    }

    #[test]
    fn test_bounding_box_empty() {
        let geometries: Vec<Geometry<f64>> = Vec::new();
        assert!(bounding_box(&geometries).is_none());
        let empty_line = [Geometry::LineString(LineString::<f64>::new(Vec::new()))];
        assert!(bounding_box(&empty_line).is_none());
    }
}
