//! Performance benchmarks for kml-analyzer-lib
//!
//! Run with: cargo bench --package kml-analyzer-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::{LineString, Point};
use kml_analyzer_lib::{Feature, FeatureCollection, FeatureSource, KmlSource, summarize};

/// Generate a wiggly line with the specified number of points
fn generate_line(num_points: usize, base_lat: f64, base_lon: f64) -> LineString<f64> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = base_lon + t * 0.1 + (t * 30.0).cos() * 0.001;
            (lon, lat)
        })
        .collect()
}

/// Mix of lines and points spread across an area
fn generate_collection(num_features: usize, points_per_line: usize) -> FeatureCollection {
    (0..num_features)
        .map(|i| {
            let lat = 51.5 + (i % 10) as f64 * 0.1;
            let lon = -0.1 + (i / 10) as f64 * 0.1;
            if i % 4 == 0 {
                Feature::new(Point::new(lon, lat)).with_name(format!("Point {i}"))
            } else {
                Feature::new(generate_line(points_per_line, lat, lon)).with_name(format!("Line {i}"))
            }
        })
        .collect()
}

/// KML text with `num_placemarks` line placemarks
fn generate_kml(num_placemarks: usize, points_per_line: usize) -> String {
    let mut body = String::new();
    for i in 0..num_placemarks {
        let coords: Vec<String> = generate_line(points_per_line, 40.0, -3.0)
            .points()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect();
        body.push_str(&format!(
            "<Placemark><name>Line {i}</name><LineString><coordinates>{}</coordinates></LineString></Placemark>",
            coords.join(" ")
        ));
    }
    format!(r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{body}</Document></kml>"#)
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for &num_features in &[100usize, 1_000] {
        let collection = generate_collection(num_features, 500);
        group.throughput(Throughput::Elements(num_features as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_features),
            &collection,
            |b, collection| b.iter(|| summarize(collection)),
        );
    }

    group.finish();
}

fn bench_parse_kml(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_kml");
    group.sample_size(20);

    for &num_placemarks in &[10usize, 100] {
        let text = generate_kml(num_placemarks, 200);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_placemarks),
            &text,
            |b, text| b.iter(|| KmlSource.parse(text)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_parse_kml);
criterion_main!(benches);
