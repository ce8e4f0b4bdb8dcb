//! Route path and way point operations on [`SystemObjects`].

use geo::Point;

use crate::identifiers::*;
use crate::models::data::{find_max_data, find_min_data, DataType};
use crate::models::{route::*, types::*};
use crate::system::objects::SystemObjects;

impl SystemObjects {
    // ---- Path lookups ----

    pub fn path(&self, key: PathKey) -> Option<&RoutePath> {
        self.path_store.get(key)
    }

    /// First path of `route` with the given path id
    pub fn route_path(&self, route: RouteKey, path_id: PathId) -> Option<&RoutePath> {
        self.paths(route).find(|p| p.path_id == path_id)
    }

    /// Paths of a route in name order
    pub fn paths(&self, route: RouteKey) -> impl Iterator<Item = &RoutePath> + '_ {
        self.route(route)
            .into_iter()
            .flat_map(|r| r.paths.iter())
            .filter_map(|k| self.path_store.get(*k))
    }

    /// The route owning a way point, through its path
    pub fn route_for_point(&self, point: PointKey) -> Option<&Route> {
        let point = self.point_store.get(point)?;
        let path = self.path_store.get(point.path)?;
        self.route(path.route)
    }

    // ---- Path mutation ----

    /// Add an empty path to `route`, keeping the route's paths sorted by name
    pub fn add_path(&mut self, route: RouteKey, name: impl Into<String>, path_id: impl Into<PathId>) -> Result<PathKey> {
        if !self.route_store.contains(route) {
            return Err(TransitError::RouteNotFound(route));
        }
        let name = name.into();
        let path_id = path_id.into();
        let key = self.path_store.insert_with(|key| RoutePath {
            key,
            route,
            name,
            path_id,
            points: Vec::new(),
            services: Vec::new(),
        });
        self.route_mut(route)?.paths.push(key);
        self.sort_paths(route);
        Ok(key)
    }

    /// Detach a path from its route and drop its way points and services
    pub fn remove_path(&mut self, path: PathKey) -> Result<RoutePath> {
        let route = self.path_ref(path)?.route;
        if let Some(r) = self.route_store.get_mut(route) {
            r.paths.retain(|k| *k != path);
        }
        self.drop_path_subtree(path)
            .ok_or(TransitError::PathNotFound(path))
    }

    pub fn set_path_name(&mut self, path: PathKey, name: impl Into<String>) -> Result<()> {
        let p = self.path_mut(path)?;
        p.name = name.into();
        let route = p.route;
        self.sort_paths(route);
        Ok(())
    }

    pub(crate) fn drop_path_subtree(&mut self, path: PathKey) -> Option<RoutePath> {
        let removed = self.path_store.remove(path)?;
        for point in &removed.points {
            self.point_store.remove(*point);
        }
        for service in &removed.services {
            self.service_store.remove(*service);
        }
        Some(removed)
    }

    pub(crate) fn path_ref(&self, path: PathKey) -> Result<&RoutePath> {
        self.path_store.get(path).ok_or(TransitError::PathNotFound(path))
    }

    pub(crate) fn path_mut(&mut self, path: PathKey) -> Result<&mut RoutePath> {
        self.path_store
            .get_mut(path)
            .ok_or(TransitError::PathNotFound(path))
    }

    fn sort_paths(&mut self, route: RouteKey) {
        let store = &self.path_store;
        if let Some(r) = self.route_store.get_mut(route) {
            r.paths
                .sort_by(|a, b| {
                    let a = store.get(*a).map(|p| p.name.as_str());
                    let b = store.get(*b).map(|p| p.name.as_str());
                    a.cmp(&b)
                });
        }
    }

    // ---- Way point lookups ----

    pub fn waypoint(&self, key: PointKey) -> Option<&WayPoint> {
        self.point_store.get(key)
    }

    /// All way points of a path in geometry order
    pub fn waypoints(&self, path: PathKey) -> Vec<&WayPoint> {
        self.path(path)
            .map(|p| self.resolve_points(&p.points))
            .unwrap_or_default()
    }

    /// First stop on the path with the given station id
    pub fn stop(&self, path: PathKey, station_id: StationId) -> Option<&WayPoint> {
        self.waypoints(path)
            .into_iter()
            .find(|wp| wp.station_id() == Some(station_id))
    }

    /// The stops of a path in order, skipping plain way points
    pub fn stops(&self, path: PathKey) -> Vec<&WayPoint> {
        self.waypoints(path)
            .into_iter()
            .filter(|wp| wp.is_stop())
            .collect()
    }

    /// The way points from `start` to `end` inclusive.
    ///
    /// Fails with [`TransitError::InvalidRange`] when either end is not on
    /// the path or `start` comes after `end`.
    pub fn sub_path(&self, path: PathKey, start: PointKey, end: PointKey) -> Result<Vec<&WayPoint>> {
        let p = self.path_ref(path)?;
        let range = p
            .position_of(start)
            .zip(p.position_of(end))
            .filter(|(s, e)| s <= e)
            .ok_or(TransitError::InvalidRange { path, start, end })?;
        log::debug!("sub-path of {} from index {} to {}", path, range.0, range.1);
        Ok(self.resolve_points(&p.points[range.0..=range.1]))
    }

    /// The stops of [`sub_path`](Self::sub_path)
    pub fn stops_in_between(&self, path: PathKey, start: PointKey, end: PointKey) -> Result<Vec<&WayPoint>> {
        let mut points = self.sub_path(path, start, end)?;
        points.retain(|wp| wp.is_stop());
        Ok(points)
    }

    fn resolve_points(&self, keys: &[PointKey]) -> Vec<&WayPoint> {
        keys.iter()
            .filter_map(|k| self.point_store.get(*k))
            .collect()
    }

    // ---- Way point mutation ----

    /// Append a plain way point to the end of a path
    pub fn add_waypoint(&mut self, path: PathKey, location: Point) -> Result<PointKey> {
        self.push_point(path, location, WayPointKind::Plain)
    }

    /// Append a stop to the end of a path
    pub fn add_stop(
        &mut self,
        path: PathKey,
        location: Point,
        name: impl Into<String>,
        station_id: impl Into<StationId>,
    ) -> Result<PointKey> {
        self.push_point(path, location, WayPointKind::stop(name, station_id))
    }

    pub fn push_point(&mut self, path: PathKey, location: Point, kind: WayPointKind) -> Result<PointKey> {
        let len = self.path_ref(path)?.points.len();
        self.place_point(path, len, location, kind)
    }

    /// Insert a new point directly after `after`
    pub fn insert_waypoint_after(
        &mut self,
        path: PathKey,
        after: PointKey,
        location: Point,
        kind: WayPointKind,
    ) -> Result<PointKey> {
        let index = self.index_on_path(path, after)?;
        self.place_point(path, index + 1, location, kind)
    }

    /// Put a new point at `old`'s position and drop `old`.
    ///
    /// Services keep their stops by station id, so a replaced origin or
    /// destination no longer resolves to a way point.
    pub fn replace_waypoint(
        &mut self,
        path: PathKey,
        old: PointKey,
        location: Point,
        kind: WayPointKind,
    ) -> Result<PointKey> {
        let index = self.index_on_path(path, old)?;
        let key = self.point_store.insert_with(|key| WayPoint {
            key,
            path,
            location,
            kind,
        });
        self.path_mut(path)?.points[index] = key;
        self.point_store.remove(old);
        Ok(key)
    }

    pub fn delete_waypoint(&mut self, path: PathKey, point: PointKey) -> Result<WayPoint> {
        let index = self.index_on_path(path, point)?;
        self.path_mut(path)?.points.remove(index);
        self.point_store
            .remove(point)
            .ok_or(TransitError::PointNotFound(point))
    }

    pub fn delete_all_waypoints(&mut self, path: PathKey) -> Result<()> {
        let points = std::mem::take(&mut self.path_mut(path)?.points);
        for point in points {
            self.point_store.remove(point);
        }
        Ok(())
    }

    fn place_point(&mut self, path: PathKey, index: usize, location: Point, kind: WayPointKind) -> Result<PointKey> {
        // validate before allocating a key
        self.path_ref(path)?;
        let key = self.point_store.insert_with(|key| WayPoint {
            key,
            path,
            location,
            kind,
        });
        self.path_mut(path)?.points.insert(index, key);
        Ok(key)
    }

    fn index_on_path(&self, path: PathKey, point: PointKey) -> Result<usize> {
        self.path_ref(path)?
            .position_of(point)
            .ok_or(TransitError::PointNotOnPath { point, path })
    }

    // ---- Aggregates ----

    /// Smallest value of `data_type` over every service of the path
    pub fn path_min_data(&self, path: PathKey, data_type: DataType) -> Option<i32> {
        find_min_data(data_type, self.services(path))
    }

    /// Largest value of `data_type` over every service of the path
    pub fn path_max_data(&self, path: PathKey, data_type: DataType) -> Option<i32> {
        find_max_data(data_type, self.services(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Blue line northbound: A(stop 1), B(way point), C(stop 2), D(stop 3)
    fn blue_line() -> (SystemObjects, PathKey, [PointKey; 4]) {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(10, "Blue Line");
        let path = objects.add_path(route, "Northbound", 1).unwrap();
        let a = objects.add_stop(path, Point::new(-118.25, 34.05), "A", 1).unwrap();
        let b = objects.add_waypoint(path, Point::new(-118.25, 34.06)).unwrap();
        let c = objects.add_stop(path, Point::new(-118.25, 34.07), "C", 2).unwrap();
        let d = objects.add_stop(path, Point::new(-118.25, 34.08), "D", 3).unwrap();
        (objects, path, [a, b, c, d])
    }

    fn keys(points: &[&WayPoint]) -> Vec<PointKey> {
        points.iter().map(|wp| wp.key()).collect()
    }

    #[test]
    fn test_paths_sorted_by_name() {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(10, "Blue Line");
        objects.add_path(route, "Southbound", 2).unwrap();
        objects.add_path(route, "Northbound", 1).unwrap();
        objects.add_path(route, "Express", 3).unwrap();

        let names: Vec<_> = objects.paths(route).map(|p| p.name().to_owned()).collect();
        assert_eq!(names, vec!["Express", "Northbound", "Southbound"]);
        assert_eq!(
            objects.route_path(route, PathId::new(2)).map(RoutePath::name),
            Some("Southbound")
        );
        assert!(objects.route_path(route, PathId::new(9)).is_none());
    }

    #[test]
    fn test_rename_path_resorts() {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(10, "Blue Line");
        let a = objects.add_path(route, "Alpha", 1).unwrap();
        objects.add_path(route, "Beta", 2).unwrap();
        objects.set_path_name(a, "Gamma").unwrap();

        let ids: Vec<_> = objects.paths(route).map(|p| p.path_id().value()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_path_to_missing_route() {
        let mut objects = SystemObjects::new();
        let route = objects.add_route(1, "A");
        objects.remove_route(route).unwrap();
        assert!(matches!(
            objects.add_path(route, "x", 1),
            Err(TransitError::RouteNotFound(_))
        ));
        assert_eq!(objects.path_count(), 0);
    }

    #[test]
    fn test_sub_path_includes_plain_points() {
        let (objects, path, [a, b, c, d]) = blue_line();
        let sub = objects.sub_path(path, a, d).unwrap();
        assert_eq!(keys(&sub), vec![a, b, c, d]);

        let single = objects.sub_path(path, c, c).unwrap();
        assert_eq!(keys(&single), vec![c]);
    }

    #[test]
    fn test_stops_in_between_skips_plain_points() {
        let (objects, path, [a, _, c, d]) = blue_line();
        let stops = objects.stops_in_between(path, a, d).unwrap();
        assert_eq!(keys(&stops), vec![a, c, d]);
        assert_eq!(keys(&objects.stops(path)), vec![a, c, d]);
    }

    #[test]
    fn test_sub_path_rejects_bad_ranges() {
        let (mut objects, path, [a, _, _, d]) = blue_line();
        assert!(matches!(
            objects.sub_path(path, d, a),
            Err(TransitError::InvalidRange { .. })
        ));

        let route = objects.add_route(20, "Red Line");
        let other = objects.add_path(route, "Eastbound", 1).unwrap();
        let stray = objects.add_waypoint(other, Point::new(0.0, 0.0)).unwrap();
        assert!(matches!(
            objects.sub_path(path, a, stray),
            Err(TransitError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_stop_lookup() {
        let (objects, path, [_, _, c, _]) = blue_line();
        assert_eq!(objects.stop(path, StationId::new(2)).map(WayPoint::key), Some(c));
        assert!(objects.stop(path, StationId::new(42)).is_none());
        assert_eq!(objects.route_for_point(c).map(|r| r.route_id()), Some(RouteId::new(10)));
    }

    #[test]
    fn test_insert_replace_delete() {
        let (mut objects, path, [a, b, c, d]) = blue_line();

        let e = objects
            .insert_waypoint_after(path, a, Point::new(-118.25, 34.055), WayPointKind::Plain)
            .unwrap();
        assert_eq!(keys(&objects.waypoints(path)), vec![a, e, b, c, d]);

        let f = objects
            .replace_waypoint(path, b, Point::new(-118.26, 34.06), WayPointKind::stop("B", 9))
            .unwrap();
        assert_eq!(keys(&objects.waypoints(path)), vec![a, e, f, c, d]);
        assert!(objects.waypoint(b).is_none());
        assert_eq!(objects.waypoint(f).and_then(WayPoint::station_id), Some(StationId::new(9)));

        let removed = objects.delete_waypoint(path, e).unwrap();
        assert_eq!(removed.key(), e);
        assert_eq!(keys(&objects.waypoints(path)), vec![a, f, c, d]);

        assert!(matches!(
            objects.delete_waypoint(path, e),
            Err(TransitError::PointNotOnPath { .. })
        ));

        objects.delete_all_waypoints(path).unwrap();
        assert!(objects.waypoints(path).is_empty());
        assert_eq!(objects.point_count(), 0);
    }

    #[test]
    fn test_remove_path_cascades() {
        let (mut objects, path, _) = blue_line();
        let route = objects.path(path).unwrap().route();

        objects.remove_path(path).unwrap();
        assert_eq!(objects.point_count(), 0);
        assert!(objects.route(route).unwrap().paths().is_empty());
        assert!(matches!(objects.remove_path(path), Err(TransitError::PathNotFound(_))));
    }

    #[test]
    fn test_remove_route_cascades() {
        let (mut objects, _, _) = blue_line();
        let route = objects.route_keys()[0];
        objects.remove_route(route).unwrap();
        assert_eq!(objects.path_count(), 0);
        assert_eq!(objects.point_count(), 0);
    }
}
