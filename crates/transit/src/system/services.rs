//! Service operations on [`SystemObjects`].

use crate::identifiers::*;
use crate::models::{period::Period, route::WayPoint, service::*, types::*};
use crate::system::objects::SystemObjects;

impl SystemObjects {
    pub fn service(&self, key: ServiceKey) -> Option<&Service> {
        self.service_store.get(key)
    }

    /// Mutable access, e.g. to attach data to its service stops
    pub fn service_mut(&mut self, key: ServiceKey) -> Option<&mut Service> {
        self.service_store.get_mut(key)
    }

    /// Services of a path in insertion order
    pub fn services(&self, path: PathKey) -> impl Iterator<Item = &Service> + '_ {
        self.path(path)
            .into_iter()
            .flat_map(|p| p.services.iter())
            .filter_map(|k| self.service_store.get(*k))
    }

    pub fn service_by_id(&self, path: PathKey, service_id: ServiceId) -> Option<&Service> {
        self.services(path).find(|s| s.service_id == service_id)
    }

    /// First service of the path running in `period`
    pub fn service_with_period(&self, path: PathKey, period: &Period) -> Option<&Service> {
        self.services(path).find(|s| s.period == *period)
    }

    /// Create a service on `path` between two of its stops.
    ///
    /// One empty [`ServiceStop`] is created for every stop from `origin` to
    /// `destination` inclusive; plain way points in between are skipped.
    pub fn add_service(
        &mut self,
        path: PathKey,
        service_id: impl Into<ServiceId>,
        period: Period,
        origin: PointKey,
        destination: PointKey,
    ) -> Result<ServiceKey> {
        self.require_stop_on(path, origin)?;
        self.require_stop_on(path, destination)?;

        let stops: Vec<ServiceStop> = self
            .stops_in_between(path, origin, destination)?
            .into_iter()
            .filter_map(|wp| wp.station_id().map(|id| ServiceStop::new(wp.key(), id)))
            .collect();

        let service_id = service_id.into();
        let key = self.service_store.insert_with(|key| Service {
            key,
            service_id,
            period,
            origin,
            destination,
            path,
            stops,
        });
        self.path_mut(path)?.services.push(key);
        Ok(key)
    }

    pub fn remove_service(&mut self, service: ServiceKey) -> Result<Service> {
        let removed = self
            .service_store
            .remove(service)
            .ok_or(TransitError::ServiceNotFound(service))?;
        if let Ok(path) = self.path_mut(removed.path) {
            path.services.retain(|k| *k != service);
        }
        Ok(removed)
    }

    /// Every way point the service travels over, stops and plain points alike
    pub fn service_path(&self, service: ServiceKey) -> Result<Vec<&WayPoint>> {
        let svc = self
            .service(service)
            .ok_or(TransitError::ServiceNotFound(service))?;
        self.sub_path(svc.path, svc.origin, svc.destination)
    }

    fn require_stop_on(&self, path: PathKey, point: PointKey) -> Result<()> {
        let wp = self
            .waypoint(point)
            .filter(|wp| wp.path() == path)
            .ok_or(TransitError::PointNotOnPath { point, path })?;
        if wp.is_stop() {
            Ok(())
        } else {
            Err(TransitError::NotAStop(point))
        }
    }
}
