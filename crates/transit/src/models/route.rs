//! Routes, their path variants and the way points that shape each path.
//!
//! These are plain records owned by [`SystemObjects`](crate::system::SystemObjects).
//! Children are listed by key and parents are referenced by key, so the
//! ownership graph stays a tree while every level can still find its parent.

use std::fmt;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Way points
// ============================================================================

/// Passenger-facing details of a stop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopInfo {
    pub name: String,
    /// Unique within the owning path only
    pub station_id: StationId,
}

/// Whether a way point is pure geometry or a place passengers use
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WayPointKind {
    Plain,
    Stop(StopInfo),
}

impl WayPointKind {
    pub fn stop(name: impl Into<String>, station_id: impl Into<StationId>) -> Self {
        WayPointKind::Stop(StopInfo {
            name: name.into(),
            station_id: station_id.into(),
        })
    }
}

/// A vertex of a route path. Coordinates are `x = longitude`, `y = latitude`.
#[derive(Clone, Debug)]
pub struct WayPoint {
    pub(crate) key: PointKey,
    pub(crate) path: PathKey,
    pub(crate) location: Point,
    pub(crate) kind: WayPointKind,
}

impl WayPoint {
    pub fn key(&self) -> PointKey {
        self.key
    }

    /// The path this point belongs to
    pub fn path(&self) -> PathKey {
        self.path
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn lat(&self) -> f64 {
        self.location.y()
    }

    pub fn lon(&self) -> f64 {
        self.location.x()
    }

    pub fn kind(&self) -> &WayPointKind {
        &self.kind
    }

    pub fn as_stop(&self) -> Option<&StopInfo> {
        match &self.kind {
            WayPointKind::Stop(info) => Some(info),
            WayPointKind::Plain => None,
        }
    }

    pub fn is_stop(&self) -> bool {
        self.as_stop().is_some()
    }

    pub fn station_id(&self) -> Option<StationId> {
        self.as_stop().map(|s| s.station_id)
    }

    pub fn name(&self) -> Option<&str> {
        self.as_stop().map(|s| s.name.as_str())
    }
}

impl fmt::Display for WayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WayPointKind::Plain => write!(f, "WayPoint"),
            WayPointKind::Stop(info) => write!(f, "Stop {} ({})", info.name, info.station_id),
        }
    }
}

// ============================================================================
// Routes and paths
// ============================================================================

/// A numbered, named transit line (e.g., "10 Blue Line")
#[derive(Clone, Debug)]
pub struct Route {
    pub(crate) key: RouteKey,
    pub(crate) route_id: RouteId,
    pub(crate) name: String,
    /// Sorted by path name
    pub(crate) paths: Vec<PathKey>,
}

impl Route {
    pub fn key(&self) -> RouteKey {
        self.key
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &[PathKey] {
        &self.paths
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route_id)
    }
}

/// One directional variant or alignment of a route (e.g., "Northbound")
#[derive(Clone, Debug)]
pub struct RoutePath {
    pub(crate) key: PathKey,
    pub(crate) route: RouteKey,
    pub(crate) name: String,
    pub(crate) path_id: PathId,
    /// Geometry order
    pub(crate) points: Vec<PointKey>,
    pub(crate) services: Vec<ServiceKey>,
}

impl RoutePath {
    pub fn key(&self) -> PathKey {
        self.key
    }

    /// The route this path belongs to
    pub fn route(&self) -> RouteKey {
        self.route
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    pub fn points(&self) -> &[PointKey] {
        &self.points
    }

    pub fn services(&self) -> &[ServiceKey] {
        &self.services
    }

    pub(crate) fn position_of(&self, point: PointKey) -> Option<usize> {
        self.points.iter().position(|p| *p == point)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
