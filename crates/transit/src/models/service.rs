//! Services (scheduled runs over part of a route path) and the per-stop
//! measurement records they own.

use std::fmt;

use crate::identifiers::*;
use crate::models::data::{find_max_data, find_min_data, Data, DataExtent, DataType};
use crate::models::period::Period;

/// Ridership recorded for one service at one stop
#[derive(Clone, Debug)]
pub struct ServiceStop {
    pub(crate) stop: PointKey,
    pub(crate) station_id: StationId,
    pub(crate) data: Vec<Data>,
}

impl ServiceStop {
    pub(crate) fn new(stop: PointKey, station_id: StationId) -> Self {
        Self {
            stop,
            station_id,
            data: Vec::new(),
        }
    }

    pub fn stop(&self) -> PointKey {
        self.stop
    }

    pub fn station_id(&self) -> StationId {
        self.station_id
    }

    /// Appends a value. An existing value of the same type is kept and keeps
    /// winning in [`data`](Self::data).
    pub fn add_data(&mut self, data: Data) {
        self.data.push(data);
    }

    /// First value of the given type in insertion order
    pub fn data(&self, data_type: DataType) -> Option<&Data> {
        self.data.iter().find(|d| d.data_type() == data_type)
    }

    pub fn all_data(&self) -> &[Data] {
        &self.data
    }

    pub fn find_min_data<'a>(data_type: DataType, stops: impl IntoIterator<Item = &'a ServiceStop>) -> Option<i32> {
        find_min_data(data_type, stops)
    }

    pub fn find_max_data<'a>(data_type: DataType, stops: impl IntoIterator<Item = &'a ServiceStop>) -> Option<i32> {
        find_max_data(data_type, stops)
    }
}

impl DataExtent for ServiceStop {
    fn min_data(&self, data_type: DataType) -> Option<i32> {
        self.data(data_type).map(Data::value)
    }

    fn max_data(&self, data_type: DataType) -> Option<i32> {
        self.data(data_type).map(Data::value)
    }
}

/// One scheduled operating pattern of a route path during a [`Period`]
#[derive(Clone, Debug)]
pub struct Service {
    pub(crate) key: ServiceKey,
    pub(crate) service_id: ServiceId,
    pub(crate) period: Period,
    pub(crate) origin: PointKey,
    pub(crate) destination: PointKey,
    pub(crate) path: PathKey,
    /// The stops from origin to destination in path order
    pub(crate) stops: Vec<ServiceStop>,
}

impl Service {
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn origin(&self) -> PointKey {
        self.origin
    }

    pub fn destination(&self) -> PointKey {
        self.destination
    }

    /// The path this service runs on
    pub fn path(&self) -> PathKey {
        self.path
    }

    pub fn service_stops(&self) -> &[ServiceStop] {
        &self.stops
    }

    pub fn service_stops_mut(&mut self) -> &mut [ServiceStop] {
        &mut self.stops
    }

    /// Stop points served, in path order
    pub fn stops(&self) -> impl Iterator<Item = PointKey> + '_ {
        self.stops.iter().map(|s| s.stop)
    }

    pub fn service_stop(&self, station_id: StationId) -> Option<&ServiceStop> {
        self.stops.iter().find(|s| s.station_id == station_id)
    }

    pub fn service_stop_mut(&mut self, station_id: StationId) -> Option<&mut ServiceStop> {
        self.stops.iter_mut().find(|s| s.station_id == station_id)
    }

    pub fn service_stop_at(&self, stop: PointKey) -> Option<&ServiceStop> {
        self.stops.iter().find(|s| s.stop == stop)
    }

    pub fn service_stop_at_mut(&mut self, stop: PointKey) -> Option<&mut ServiceStop> {
        self.stops.iter_mut().find(|s| s.stop == stop)
    }

    pub fn find_min_data<'a>(data_type: DataType, services: impl IntoIterator<Item = &'a Service>) -> Option<i32> {
        find_min_data(data_type, services)
    }

    pub fn find_max_data<'a>(data_type: DataType, services: impl IntoIterator<Item = &'a Service>) -> Option<i32> {
        find_max_data(data_type, services)
    }
}

impl DataExtent for Service {
    fn min_data(&self, data_type: DataType) -> Option<i32> {
        find_min_data(data_type, &self.stops)
    }

    fn max_data(&self, data_type: DataType) -> Option<i32> {
        find_max_data(data_type, &self.stops)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.period)
    }
}
