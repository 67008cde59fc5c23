//! Walkers plugin for drawing the loaded features on the map
//!
//! Points are drawn as markers, lines as polylines and polygons as ring
//! outlines. Hovering a named feature shows its name and description.

use egui::{Color32, Pos2, Stroke};
use geo::{Contains, Geometry, LineString, Polygon};
use kml_analyzer_lib::{Feature, FeatureLabel, LoadedDocument};
use std::sync::Arc;
use walkers::{Plugin, Projector};

const LINE_COLOR: Color32 = Color32::from_rgb(70, 130, 220);
const POLYGON_COLOR: Color32 = Color32::from_rgb(40, 160, 90);
const POINT_COLOR: Color32 = Color32::from_rgb(220, 60, 60);
const POINT_RADIUS: f32 = 5.0;

/// Extra pixels around a shape that still count as hovering it
const HOVER_TOLERANCE: f32 = 4.0;

/// Plugin for rendering document features on the map
pub struct FeaturePlugin {
    document: Arc<LoadedDocument>,
    /// Line width for rendering lines and polygon outlines
    width: f32,
}

impl FeaturePlugin {
    pub fn new(document: Arc<LoadedDocument>, width: f32) -> Self {
        Self { document, width }
    }

    fn draw_geometry(&self, geometry: &Geometry<f64>, projector: &Projector, painter: &egui::Painter) {
        match geometry {
            Geometry::Point(point) => {
                let pos = project(projector, point.x(), point.y());
                painter.circle(pos, POINT_RADIUS, POINT_COLOR, Stroke::new(1.5, Color32::WHITE));
            }
            Geometry::MultiPoint(points) => {
                for point in points {
                    self.draw_geometry(&Geometry::Point(*point), projector, painter);
                }
            }
            Geometry::Line(line) => {
                let points = vec![
                    project(projector, line.start.x, line.start.y),
                    project(projector, line.end.x, line.end.y),
                ];
                painter.add(egui::Shape::line(points, Stroke::new(self.width, LINE_COLOR)));
            }
            Geometry::LineString(line) => self.draw_line(line, projector, painter),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.draw_line(line, projector, painter);
                }
            }
            Geometry::Polygon(polygon) => self.draw_polygon(polygon, projector, painter),
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    self.draw_polygon(polygon, projector, painter);
                }
            }
            Geometry::Rect(rect) => self.draw_polygon(&rect.to_polygon(), projector, painter),
            Geometry::Triangle(triangle) => {
                self.draw_polygon(&triangle.to_polygon(), projector, painter)
            }
            Geometry::GeometryCollection(collection) => {
                for member in collection {
                    self.draw_geometry(member, projector, painter);
                }
            }
        }
    }

    fn draw_line(&self, line: &LineString<f64>, projector: &Projector, painter: &egui::Painter) {
        let screen_points = project_line(projector, line);
        if screen_points.len() >= 2 {
            painter.add(egui::Shape::line(screen_points, Stroke::new(self.width, LINE_COLOR)));
        }
    }

    fn draw_polygon(&self, polygon: &Polygon<f64>, projector: &Projector, painter: &egui::Painter) {
        let stroke = Stroke::new(self.width, POLYGON_COLOR);
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let screen_points = project_line(projector, ring);
            if screen_points.len() >= 3 {
                painter.add(egui::Shape::closed_line(screen_points, stroke));
            }
        }
    }

    /// Topmost (last drawn) feature under the pointer
    fn hovered_feature(&self, pointer: Pos2, projector: &Projector) -> Option<&Feature> {
        let location = projector.unproject(pointer.to_vec2());
        let location = geo::Point::new(location.x(), location.y());
        let tolerance = self.width / 2.0 + HOVER_TOLERANCE;

        self.document
            .collection()
            .iter()
            .rev()
            .find(|feature| hits(&feature.geometry, pointer, location, projector, tolerance))
    }
}

impl Plugin for FeaturePlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("FeaturePlugin::run");

        let painter = ui.painter();
        {
            profiling::scope!("draw_features");
            for feature in self.document.collection() {
                self.draw_geometry(&feature.geometry, projector, painter);
            }
        }

        let Some(pointer) = response.hover_pos() else {
            return;
        };
        let label = self
            .hovered_feature(pointer, projector)
            .and_then(FeatureLabel::of);
        if let Some(label) = label {
            response.clone().on_hover_ui_at_pointer(|ui| {
                ui.label(egui::RichText::new(label.name).strong());
                let description = label.plain_description();
                if !description.is_empty() {
                    ui.label(description);
                }
            });
        }
    }
}

#[inline]
fn project(projector: &Projector, lon: f64, lat: f64) -> Pos2 {
    let screen_vec = projector.project(walkers::lat_lon(lat, lon));
    Pos2::new(screen_vec.x, screen_vec.y)
}

fn project_line(projector: &Projector, line: &LineString<f64>) -> Vec<Pos2> {
    line.coords()
        .map(|coord| project(projector, coord.x, coord.y))
        .collect()
}

/// Whether `pointer` (screen) or `location` (WGS84) falls on `geometry`
fn hits(
    geometry: &Geometry<f64>,
    pointer: Pos2,
    location: geo::Point<f64>,
    projector: &Projector,
    tolerance: f32,
) -> bool {
    match geometry {
        Geometry::Point(point) => {
            project(projector, point.x(), point.y()).distance(pointer) <= POINT_RADIUS + tolerance
        }
        Geometry::MultiPoint(points) => points.iter().any(|point| {
            project(projector, point.x(), point.y()).distance(pointer) <= POINT_RADIUS + tolerance
        }),
        Geometry::Line(line) => {
            let a = project(projector, line.start.x, line.start.y);
            let b = project(projector, line.end.x, line.end.y);
            distance_to_segment(pointer, a, b) <= tolerance
        }
        Geometry::LineString(line) => {
            polyline_distance(&project_line(projector, line), pointer) <= tolerance
        }
        Geometry::MultiLineString(lines) => lines
            .iter()
            .any(|line| polyline_distance(&project_line(projector, line), pointer) <= tolerance),
        Geometry::Polygon(polygon) => polygon.contains(&location),
        Geometry::MultiPolygon(polygons) => polygons.contains(&location),
        Geometry::Rect(rect) => rect.contains(&location),
        Geometry::Triangle(triangle) => triangle.contains(&location),
        Geometry::GeometryCollection(collection) => collection
            .iter()
            .any(|member| hits(member, pointer, location, projector, tolerance)),
    }
}

/// Smallest screen distance from `p` to a polyline
fn polyline_distance(points: &[Pos2], p: Pos2) -> f32 {
    match points {
        [] => f32::INFINITY,
        [single] => single.distance(p),
        _ => points
            .windows(2)
            .map(|pair| distance_to_segment(p, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Screen distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end the nearest point is the endpoint
        assert_eq!(distance_to_segment(Pos2::new(13.0, 4.0), a, b), 5.0);
        // Degenerate segment
        assert_eq!(distance_to_segment(Pos2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_polyline_distance() {
        let points = [Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(10.0, 10.0)];
        assert_eq!(polyline_distance(&points, Pos2::new(12.0, 5.0)), 2.0);
        assert_eq!(polyline_distance(&[], Pos2::ZERO), f32::INFINITY);
        assert_eq!(polyline_distance(&points[..1], Pos2::new(0.0, 1.0)), 1.0);
    }
}
