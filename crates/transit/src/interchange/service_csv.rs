//! Service ridership files: one row per (service, stop).
//!
//! ```text
//! routeId,pathId,serviceId,origin,destination,days,time,stopId,boardings,alightings,load
//! 10,1,1,100,102,WK,BS,100,5,0,5
//! ```
//!
//! `origin`, `destination` and `stopId` are station ids on the path; `days`
//! and `time` are the two-letter period codes of [`Period::from_codes`].

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::interchange::{reader, require_columns, ImportReport};
use crate::models::data::{Data, DataType};
use crate::models::period::Period;
use crate::models::service::ServiceStop;
use crate::models::types::*;
use crate::system::SystemObjects;

pub const SERVICE_COLUMNS: [&str; 11] = [
    "routeId",
    "pathId",
    "serviceId",
    "origin",
    "destination",
    "days",
    "time",
    "stopId",
    "boardings",
    "alightings",
    "load",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRow {
    pub route_id: i32,
    pub path_id: i32,
    pub service_id: i32,
    pub origin: i32,
    pub destination: i32,
    pub days: String,
    pub time: String,
    pub stop_id: i32,
    pub boardings: i32,
    pub alightings: i32,
    pub load: i32,
}

impl ServiceRow {
    fn group(&self) -> (i32, i32, i32) {
        (self.route_id, self.path_id, self.service_id)
    }
}

/// Write one row per service stop that carries all three values
pub fn export_services<W: Write>(objects: &SystemObjects, output: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(SERVICE_COLUMNS)?;
    let mut rows = 0;

    for route in objects.all_routes() {
        for path in objects.paths(route.key()) {
            for service in objects.services(path.key()) {
                let Some((days, time)) = service.period().codes() else {
                    log::warn!("service {} has no period code for {}, not exported", service.service_id(), service.period());
                    continue;
                };
                let endpoints = (
                    objects.waypoint(service.origin()).and_then(|wp| wp.station_id()),
                    objects.waypoint(service.destination()).and_then(|wp| wp.station_id()),
                );
                let (Some(origin), Some(destination)) = endpoints else {
                    log::warn!("service {} has lost its origin or destination, not exported", service.service_id());
                    continue;
                };

                for stop in service.service_stops() {
                    let Some([boardings, alightings, load]) = values(stop) else {
                        continue;
                    };
                    writer.serialize(ServiceRow {
                        route_id: route.route_id().value(),
                        path_id: path.path_id().value(),
                        service_id: service.service_id().value(),
                        origin: origin.value(),
                        destination: destination.value(),
                        days: days.to_string(),
                        time: time.to_string(),
                        stop_id: stop.station_id().value(),
                        boardings,
                        alightings,
                        load,
                    })?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush()?;
    log::info!("exported {rows} service stop rows");
    Ok(rows)
}

fn values(stop: &ServiceStop) -> Option<[i32; 3]> {
    Some([
        stop.data(DataType::Boardings)?.value(),
        stop.data(DataType::Alightings)?.value(),
        stop.data(DataType::Load)?.value(),
    ])
}

/// Load ridership onto existing routes.
///
/// Consecutive rows with the same (routeId, pathId, serviceId) form one
/// service. The first row of a group resolves the path and either reuses the
/// path's service with that id or creates it from the row's period codes and
/// endpoints. Every row then adds Boardings, Alightings and Load to the
/// service stop for its `stopId`. When a group's first row cannot be resolved
/// the whole group is skipped.
pub fn import_services<R: Read>(objects: &mut SystemObjects, input: R) -> Result<ImportReport> {
    let mut reader = reader(input);
    let headers = reader.headers()?.clone();
    require_columns(&headers, &SERVICE_COLUMNS)?;

    let mut report = ImportReport::default();
    // None inside the option marks a group whose first row failed
    let mut current: Option<((i32, i32, i32), Option<ServiceKey>)> = None;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        report.rows += 1;
        let line = record.position().map(|p| p.line());

        let row: ServiceRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                report.skip(line, err);
                continue;
            }
        };

        let service = match current {
            Some((group, service)) if group == row.group() => service,
            _ => {
                let service = match open_service(objects, &row) {
                    Ok(key) => {
                        report.groups += 1;
                        Some(key)
                    }
                    Err(err) => {
                        log::warn!("service {} of route {} path {}: {err}", row.service_id, row.route_id, row.path_id);
                        None
                    }
                };
                current = Some((row.group(), service));
                service
            }
        };

        let Some(service) = service else {
            report.skip(line, "service could not be created");
            continue;
        };
        let Some(stop) = objects
            .service_mut(service)
            .and_then(|s| s.service_stop_mut(StationId::new(row.stop_id)))
        else {
            report.skip(line, TransitError::InvalidData(format!("stop {} is not served", row.stop_id)));
            continue;
        };
        stop.add_data(Data::boardings(row.boardings));
        stop.add_data(Data::alightings(row.alightings));
        stop.add_data(Data::load(row.load));
    }

    log::info!("service import: {report}");
    Ok(report)
}

fn open_service(objects: &mut SystemObjects, row: &ServiceRow) -> Result<ServiceKey> {
    let invalid = |reason: String| TransitError::InvalidData(reason);
    let route = objects
        .route_by_id(RouteId::new(row.route_id))
        .ok_or_else(|| invalid(format!("unknown route {}", row.route_id)))?
        .key();
    let path = objects
        .route_path(route, PathId::new(row.path_id))
        .ok_or_else(|| invalid(format!("unknown path {}", row.path_id)))?
        .key();

    if let Some(existing) = objects.service_by_id(path, ServiceId::new(row.service_id)) {
        return Ok(existing.key());
    }

    let period = Period::from_codes(&row.days, &row.time)
        .ok_or_else(|| invalid(format!("unknown period codes {:?}/{:?}", row.days, row.time)))?;
    let origin = objects
        .stop(path, StationId::new(row.origin))
        .ok_or_else(|| invalid(format!("unknown origin stop {}", row.origin)))?
        .key();
    let destination = objects
        .stop(path, StationId::new(row.destination))
        .ok_or_else(|| invalid(format!("unknown destination stop {}", row.destination)))?
        .key();

    objects.add_service(path, row.service_id, period, origin, destination)
}
