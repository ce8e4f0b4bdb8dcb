//! The in-memory database of routes and everything they own.
//!
//! All entities live in per-kind arenas and refer to each other by key. The
//! ownership tree is `SystemObjects -> Route -> RoutePath -> {WayPoint,
//! Service -> ServiceStop -> Data}`; removing a node removes its subtree.
//!
//! This file holds the route-level operations. Path, way point and service
//! operations are in the sibling modules.

use crate::identifiers::*;
use crate::models::{period::Period, route::*, service::Service, types::*};
use crate::system::arena::Arena;

/// Root of the transit data model.
///
/// Plain owned data with no interior mutability: every mutation takes
/// `&mut self`, so sharing across threads needs an external lock.
#[derive(Clone, Debug)]
pub struct SystemObjects {
    /// Sorted by route id
    routes: Vec<RouteKey>,

    pub(crate) route_store: Arena<RouteKey, Route>,
    pub(crate) path_store: Arena<PathKey, RoutePath>,
    pub(crate) point_store: Arena<PointKey, WayPoint>,
    pub(crate) service_store: Arena<ServiceKey, Service>,
}

impl SystemObjects {
    /// Create an empty database
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            route_store: Arena::new(RouteKey::from_raw),
            path_store: Arena::new(PathKey::from_raw),
            point_store: Arena::new(PointKey::from_raw),
            service_store: Arena::new(ServiceKey::from_raw),
        }
    }

    // ---- Lookups ----

    pub fn route(&self, key: RouteKey) -> Option<&Route> {
        self.route_store.get(key)
    }

    /// First route (in id order) with the given id
    pub fn route_by_id(&self, route_id: RouteId) -> Option<&Route> {
        self.all_routes().find(|r| r.route_id == route_id)
    }

    pub fn route_exists(&self, route_id: RouteId) -> bool {
        self.route_by_id(route_id).is_some()
    }

    /// Whether a route *other than* `route` carries the same route id.
    ///
    /// Used to reject an edit that would duplicate an id; `route` itself never
    /// counts as a duplicate. Unknown keys report `false`.
    pub fn check_other_routes_for_id(&self, route: RouteKey) -> bool {
        let Some(candidate) = self.route(route) else {
            return false;
        };
        self.all_routes()
            .any(|r| r.key != route && r.route_id == candidate.route_id)
    }

    /// All routes in ascending route id order
    pub fn all_routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter_map(|k| self.route_store.get(*k))
    }

    pub fn route_keys(&self) -> &[RouteKey] {
        &self.routes
    }

    /// Every service of every path, in route then path order
    pub fn all_services(&self) -> Vec<&Service> {
        self.all_routes()
            .flat_map(|r| r.paths.iter())
            .filter_map(|p| self.path_store.get(*p))
            .flat_map(|p| p.services.iter())
            .filter_map(|s| self.service_store.get(*s))
            .collect()
    }

    /// Services whose path is in `paths` and whose period equals `period`.
    ///
    /// Either constraint missing yields nothing.
    pub fn services_with_constraint(&self, paths: Option<&[PathKey]>, period: Option<&Period>) -> Vec<&Service> {
        let (Some(paths), Some(period)) = (paths, period) else {
            return Vec::new();
        };

        self.all_services()
            .into_iter()
            .filter(|s| paths.contains(&s.path) && s.period == *period)
            .collect()
    }

    pub fn route_count(&self) -> usize {
        self.route_store.len()
    }

    pub fn path_count(&self) -> usize {
        self.path_store.len()
    }

    pub fn point_count(&self) -> usize {
        self.point_store.len()
    }

    pub fn service_count(&self) -> usize {
        self.service_store.len()
    }

    // ---- Mutation ----

    /// Add a new, empty route and keep the route list sorted by id.
    ///
    /// Id uniqueness is not checked here; see [`route_exists`](Self::route_exists)
    /// and [`check_other_routes_for_id`](Self::check_other_routes_for_id).
    pub fn add_route(&mut self, route_id: impl Into<RouteId>, name: impl Into<String>) -> RouteKey {
        let route_id = route_id.into();
        let name = name.into();
        let key = self.route_store.insert_with(|key| Route {
            key,
            route_id,
            name,
            paths: Vec::new(),
        });
        self.routes.push(key);
        self.sort_routes();
        key
    }

    /// Remove a route together with its paths, way points and services
    pub fn remove_route(&mut self, route: RouteKey) -> Result<Route> {
        let removed = self
            .route_store
            .remove(route)
            .ok_or(TransitError::RouteNotFound(route))?;
        self.routes.retain(|k| *k != route);
        for path in &removed.paths {
            self.drop_path_subtree(*path);
        }
        log::debug!("removed route {} with {} paths", removed.route_id, removed.paths.len());
        Ok(removed)
    }

    /// Change the route number. The route list is re-sorted; uniqueness is
    /// the caller's concern.
    pub fn set_route_number(&mut self, route: RouteKey, route_id: impl Into<RouteId>) -> Result<()> {
        self.route_mut(route)?.route_id = route_id.into();
        self.sort_routes();
        Ok(())
    }

    pub fn set_route_name(&mut self, route: RouteKey, name: impl Into<String>) -> Result<()> {
        self.route_mut(route)?.name = name.into();
        Ok(())
    }

    pub(crate) fn route_mut(&mut self, route: RouteKey) -> Result<&mut Route> {
        self.route_store
            .get_mut(route)
            .ok_or(TransitError::RouteNotFound(route))
    }

    fn sort_routes(&mut self) {
        let store = &self.route_store;
        self.routes
            .sort_by_key(|k| store.get(*k).map(|r| r.route_id));
    }
}

impl Default for SystemObjects {
    fn default() -> Self {
        Self::new()
    }
}
