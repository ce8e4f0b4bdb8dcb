//! R-tree snapshot of the stops and path geometry of a [`SystemObjects`].
//!
//! ## Two-Stage Filtering
//!
//! Queries run in two passes:
//! 1. **R-tree filter**: Euclidean distance in degrees, with the radius widened
//!    for the query latitude so nothing inside the true circle is dropped
//! 2. **Haversine filter**: exact geodesic distance on the candidates
//!
//! The index holds keys, not references, so it stays valid as a value but goes
//! stale once the model is edited. Rebuild it after mutating the model.

use std::collections::HashSet;

use geo::{Line, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::identifiers::{PathKey, PointKey};
use crate::spatial::queries::{haversine_distance, haversine_distance_to_line, meters_to_degrees_approx};
use crate::system::SystemObjects;

// ============================================================================
// Stop Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: PointKey,
    pub location: Point,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: Point, stop: PointKey) -> Self {
        Self {
            stop,
            location,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Path Segment Spatial Node
// ============================================================================

/// One leg between consecutive way points of a path
#[derive(Clone, Debug)]
pub struct PathSegmentNode {
    pub path: PathKey,
    pub segment: Line,
    aabb: AABB<[f64; 2]>,
}

impl PathSegmentNode {
    pub fn new(segment: Line, path: PathKey) -> Self {
        let start = [segment.start.x, segment.start.y];
        let end = [segment.end.x, segment.end.y];

        Self {
            path,
            segment,
            aabb: AABB::from_corners(start, end),
        }
    }
}

impl RTreeObject for PathSegmentNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl PointDistance for PathSegmentNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let a = [self.segment.start.x, self.segment.start.y];
        let b = [self.segment.end.x, self.segment.end.y];

        let ab = [b[0] - a[0], b[1] - a[1]];
        let ap = [point[0] - a[0], point[1] - a[1]];

        let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];
        if ab_ab == 0.0 {
            return ap[0] * ap[0] + ap[1] * ap[1];
        }

        let t = ((ab[0] * ap[0] + ab[1] * ap[1]) / ab_ab).clamp(0.0, 1.0);
        let dx = point[0] - (a[0] + t * ab[0]);
        let dy = point[1] - (a[1] + t * ab[1]);

        dx * dx + dy * dy
    }
}

// ============================================================================
// Index
// ============================================================================

pub struct SpatialIndex {
    stop_tree: RTree<StopNode>,
    segment_tree: RTree<PathSegmentNode>,
}

impl SpatialIndex {
    /// Snapshot every stop and every path leg of the model
    pub fn build(objects: &SystemObjects) -> Self {
        let mut stops = Vec::new();
        let mut segments = Vec::new();

        for route in objects.all_routes() {
            for path in objects.paths(route.key()) {
                let points = objects.waypoints(path.key());
                stops.extend(
                    points
                        .iter()
                        .filter(|wp| wp.is_stop())
                        .map(|wp| StopNode::new(wp.location(), wp.key())),
                );
                segments.extend(points.windows(2).map(|pair| {
                    PathSegmentNode::new(Line::new(pair[0].location().0, pair[1].location().0), path.key())
                }));
            }
        }

        log::debug!("indexed {} stops and {} path segments", stops.len(), segments.len());

        Self {
            stop_tree: RTree::bulk_load(stops),
            segment_tree: RTree::bulk_load(segments),
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stop_tree.size()
    }

    /// Stops within `radius_m` meters of `point`, unordered
    pub fn stops_near(&self, point: Point, radius_m: f64) -> Vec<PointKey> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let radius = search_radius_degrees(point, radius_m);
        self.stop_tree
            .locate_within_distance([point.x(), point.y()], radius * radius)
            .filter(|node| haversine_distance(point, node.location) <= radius_m)
            .map(|node| node.stop)
            .collect()
    }

    /// Paths with a leg passing within `radius_m` meters of `point`, each once
    pub fn paths_near(&self, point: Point, radius_m: f64) -> Vec<PathKey> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let radius = search_radius_degrees(point, radius_m);
        let mut seen = HashSet::new();
        self.segment_tree
            .locate_within_distance([point.x(), point.y()], radius * radius)
            .filter(|node| haversine_distance_to_line(point, node.segment) <= radius_m)
            .filter(|node| seen.insert(node.path))
            .map(|node| node.path)
            .collect()
    }

    /// Up to `n` stops, closest first
    pub fn nearest_stops(&self, point: Point, n: usize) -> Vec<PointKey> {
        self.stop_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| node.stop)
            .collect()
    }
}

/// Radius in degrees covering `radius_m` in every direction around `point`.
/// A degree of longitude shrinks with latitude, so the longitude span wins.
fn search_radius_degrees(point: Point, radius_m: f64) -> f64 {
    let cos_lat = point.y().to_radians().cos().abs().max(0.01);
    meters_to_degrees_approx(radius_m) / cos_lat
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two parallel north-south paths about 850 m apart in Los Angeles
    fn two_lines() -> (SystemObjects, PathKey, PathKey, Vec<PointKey>) {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(10, "Blue Line");
        let west = objects.add_path(route, "Northbound", 1).unwrap();
        let east = objects.add_path(route, "Southbound", 2).unwrap();

        let mut stops = Vec::new();
        for (i, lat) in [34.05, 34.06, 34.07].into_iter().enumerate() {
            stops.push(
                objects
                    .add_stop(west, Point::new(-118.25, lat), format!("W{i}"), 100 + i as i32)
                    .unwrap(),
            );
        }
        objects.add_waypoint(east, Point::new(-118.24, 34.05)).unwrap();
        objects.add_waypoint(east, Point::new(-118.24, 34.07)).unwrap();
        (objects, west, east, stops)
    }

    #[test]
    fn test_only_stops_are_indexed() {
        let (objects, ..) = two_lines();
        let index = SpatialIndex::build(&objects);
        assert_eq!(index.stop_count(), 3);
    }

    #[test]
    fn test_stops_near() {
        let (objects, _, _, stops) = two_lines();
        let index = SpatialIndex::build(&objects);

        // 1.11 km between consecutive stops
        let near = index.stops_near(Point::new(-118.25, 34.05), 500.0);
        assert_eq!(near, vec![stops[0]]);

        let mut wide = index.stops_near(Point::new(-118.25, 34.06), 1_200.0);
        wide.sort();
        assert_eq!(wide, stops);

        assert!(index.stops_near(Point::new(-118.25, 34.05), 0.0).is_empty());
        assert!(index.stops_near(Point::new(-118.25, 34.05), f64::NAN).is_empty());
    }

    #[test]
    fn test_longitude_radius_is_widened() {
        let (objects, ..) = two_lines();
        let index = SpatialIndex::build(&objects);

        // ~830 m due east of the middle stop; beyond 830/111320 degrees of
        // latitude-scale radius but inside the corrected one
        let probe = Point::new(-118.241, 34.06);
        assert_eq!(index.stops_near(probe, 900.0).len(), 1);
    }

    #[test]
    fn test_paths_near() {
        let (objects, west, east, _) = two_lines();
        let index = SpatialIndex::build(&objects);

        // between the two lines, nearer the east one
        let probe = Point::new(-118.2415, 34.06);
        assert_eq!(index.paths_near(probe, 300.0), vec![east]);

        let mut both = index.paths_near(probe, 1_000.0);
        both.sort();
        let mut expected = vec![west, east];
        expected.sort();
        assert_eq!(both, expected);
    }

    #[test]
    fn test_nearest_stops() {
        let (objects, _, _, stops) = two_lines();
        let index = SpatialIndex::build(&objects);
        let nearest = index.nearest_stops(Point::new(-118.25, 34.071), 2);
        assert_eq!(nearest, vec![stops[2], stops[1]]);
    }
}
