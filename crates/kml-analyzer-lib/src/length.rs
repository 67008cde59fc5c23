//! Path length accumulation along great circles
//!
//! Lengths are the sum of haversine distances between consecutive points.
//! Constituents of a multi-line are measured independently; nothing joins the
//! end of one line to the start of the next.

use crate::utils::haversine_distance_km;
use geo::{Geometry, LineString, MultiLineString};

/// Length of a simple line in kilometers (0 for fewer than two points)
pub fn line_length_km(line: &LineString<f64>) -> f64 {
    line.lines()
        .map(|segment| haversine_distance_km(segment.start_point(), segment.end_point()))
        .sum()
}

/// Length of a multi-line in kilometers, summing each constituent line
pub fn multi_line_length_km(lines: &MultiLineString<f64>) -> f64 {
    lines.iter().map(line_length_km).sum()
}

/// Length in kilometers for line geometries, `None` for every other kind
pub fn path_length_km(geometry: &Geometry<f64>) -> Option<f64> {
    match geometry {
        Geometry::LineString(line) => Some(line_length_km(line)),
        Geometry::MultiLineString(lines) => Some(multi_line_length_km(lines)),
        Geometry::Line(segment) => Some(haversine_distance_km(
            segment.start_point(),
            segment.end_point(),
        )),
        _ => None,
    }
}

/// Length formatted as kilometers with two decimals
///
/// Geometries that are not lines contribute no segments and yield `"0.00"`.
pub fn path_length(geometry: &Geometry<f64>) -> String {
    format_km(path_length_km(geometry).unwrap_or(0.0))
}

/// Two-decimal kilometer formatting used by every length display
#[inline]
pub fn format_km(km: f64) -> String {
    format!("{km:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    fn line(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(coords.to_vec())
    }

    #[test]
    fn test_one_degree_north() {
        let geometry = Geometry::LineString(line(&[(0.0, 0.0), (0.0, 1.0)]));
        assert_eq!(path_length(&geometry), "111.19");
    }

    #[test]
    fn test_short_lines_are_zero() {
        assert_eq!(path_length(&Geometry::LineString(line(&[]))), "0.00");
        assert_eq!(path_length(&Geometry::LineString(line(&[(5.0, 5.0)]))), "0.00");
        assert_eq!(line_length_km(&line(&[(5.0, 5.0)])), 0.0);
    }

    #[test]
    fn test_accumulates_consecutive_pairs() {
        let two_hops = line(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        let one_hop = line(&[(0.0, 0.0), (0.0, 2.0)]);
        assert!((line_length_km(&two_hops) - line_length_km(&one_hop)).abs() < 1e-9);
        assert!((line_length_km(&two_hops) - 222.39).abs() < 0.01);
    }

    #[test]
    fn test_multi_line_does_not_join_constituents() {
        let lines = MultiLineString::new(vec![
            line(&[(0.0, 0.0), (0.0, 1.0)]),
            // Far away from the end of the first line
            line(&[(90.0, 0.0), (90.0, 1.0)]),
        ]);
        let total = multi_line_length_km(&lines);
        assert!((total - 2.0 * 111.19).abs() < 0.02);
        assert_eq!(path_length(&Geometry::MultiLineString(lines)), "222.39");
    }

    #[test]
    fn test_non_lines_have_no_length() {
        let geometry = Geometry::Point(point!(x: 1.0, y: 1.0));
        assert_eq!(path_length_km(&geometry), None);
        assert_eq!(path_length(&geometry), "0.00");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let geometry = Geometry::LineString(line(&[(10.0, 10.0), (10.5, 10.5)]));
        let before = geometry.clone();
        let first = path_length(&geometry);
        let second = path_length(&geometry);
        assert_eq!(first, second);
        assert_eq!(geometry, before);
    }

    #[test]
    fn test_format_km_rounds_to_two_decimals() {
        assert_eq!(format_km(0.0), "0.00");
        assert_eq!(format_km(12.345678), "12.35");
        assert_eq!(format_km(3.0), "3.00");
    }
}
