//! Distance helpers for lon/lat points.
//!
//! Uses the Haversine formula for distances on the Earth's surface.

use geo::{ClosestPoint, HaversineDistance, Line, LineString, Point};

/// Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Distance from a point to a path leg in meters
pub fn haversine_distance_to_line(point: Point, line: Line) -> f64 {
    let line_string = LineString::from(vec![line.start, line.end]);

    match line_string.closest_point(&point) {
        geo::Closest::Intersection(p) | geo::Closest::SinglePoint(p) => haversine_distance(point, p),
        geo::Closest::Indeterminate => f64::INFINITY,
    }
}

/// Length of a run of way points in meters
pub fn polyline_length(points: impl IntoIterator<Item = Point>) -> f64 {
    let mut points = points.into_iter();
    let Some(mut prev) = points.next() else {
        return 0.0;
    };
    points
        .map(|p| {
            let leg = haversine_distance(prev, p);
            prev = p;
            leg
        })
        .sum()
}

/// Meters to degrees of latitude (for bounding box queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}
