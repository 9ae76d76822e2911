//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reunite_geo::{batch, calculate_distances, haversine_distance, parse_suggestions, Coordinate};

fn create_test_points(count: usize) -> Vec<Option<Coordinate>> {
    (0..count)
        .map(|i| {
            // Every tenth listing has no coordinates
            if i % 10 == 0 {
                return None;
            }
            // Grid around Manhattan
            let lat = 40.6 + (i as f64 * 0.001) % 0.3;
            let lng = -74.1 + (i as f64 * 0.001) % 0.3;
            Some(Coordinate::new(lat, lng))
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let central_park = Coordinate::new(40.7829, -73.9654);
    let times_square = Coordinate::new(40.7580, -73.9855);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&central_park), black_box(&times_square)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let center = Coordinate::new(40.7580, -73.9855);

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("all", size), size, |b, _| {
            b.iter(|| calculate_distances(black_box(&center), black_box(&points)))
        });

        group.bench_with_input(BenchmarkId::new("within_5km", size), size, |b, _| {
            b.iter(|| batch::calculate_distances_within_radius(black_box(&center), black_box(&points), 5.0))
        });
    }

    group.finish();
}

fn bench_geocode_parsing(c: &mut Criterion) {
    let response = r#"[
        {"place_id": 1, "display_name": "Central Park", "lat": "40.7829", "lon": "-73.9654",
         "address": {"city": "New York", "country": "USA"}},
        {"place_id": 2, "display_name": "Times Square", "lat": "40.7580", "lon": "-73.9855"}
    ]"#;

    c.bench_function("geocode_suggestions", |b| {
        b.iter(|| parse_suggestions(black_box(response)))
    });
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_batch_distances,
    bench_geocode_parsing
);
criterion_main!(benches);
