//! Route geometry files: one row per way point.
//!
//! ```text
//! routeId,routeName,pathId,pathSeq,pathName,wayPointType,pointLat,pointLon,stopName,stopId
//! 10,Blue Line,1,1,Northbound,1,34.05,-118.25,S1,100
//! 10,Blue Line,1,2,Northbound,0,34.055,-118.25,WAYPOINT,WAYPOINT
//! ```

use std::io::{Read, Write};

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::interchange::{reader, require_columns, ImportReport};
use crate::legacy::WAYPOINT_PLACEHOLDER;
use crate::models::route::{WayPoint, WayPointKind};
use crate::models::types::*;
use crate::system::SystemObjects;

pub const ROUTE_COLUMNS: [&str; 10] = [
    "routeId",
    "routeName",
    "pathId",
    "pathSeq",
    "pathName",
    "wayPointType",
    "pointLat",
    "pointLon",
    "stopName",
    "stopId",
];

const TYPE_WAYPOINT: u8 = 0;
const TYPE_STOP: u8 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRow {
    pub route_id: i32,
    pub route_name: String,
    pub path_id: i32,
    /// 1-based position on the path; informational only, so a blank or
    /// unreadable value is ignored on import
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub path_seq: Option<u32>,
    pub path_name: String,
    pub way_point_type: u8,
    pub point_lat: f64,
    pub point_lon: f64,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub stop_id: String,
}

impl RouteRow {
    fn kind(&self) -> Result<WayPointKind> {
        match self.way_point_type {
            TYPE_WAYPOINT => Ok(WayPointKind::Plain),
            TYPE_STOP => self
                .stop_id
                .parse::<i32>()
                .map(|id| WayPointKind::stop(self.stop_name.clone(), id))
                .map_err(|_| TransitError::InvalidData(format!("stop id {:?} is not a number", self.stop_id))),
            other => Err(TransitError::InvalidData(format!("unknown way point type {other}"))),
        }
    }

    fn location(&self) -> Point {
        Point::new(self.point_lon, self.point_lat)
    }
}

/// Write every way point of every path, routes in id order and paths in name
/// order
pub fn export_routes<W: Write>(objects: &SystemObjects, output: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(ROUTE_COLUMNS)?;
    let mut rows = 0;

    for route in objects.all_routes() {
        for path in objects.paths(route.key()) {
            for (seq, wp) in objects.waypoints(path.key()).into_iter().enumerate() {
                writer.serialize(RouteRow {
                    route_id: route.route_id().value(),
                    route_name: route.name().to_string(),
                    path_id: path.path_id().value(),
                    path_seq: Some(seq as u32 + 1),
                    path_name: path.name().to_string(),
                    way_point_type: if wp.is_stop() { TYPE_STOP } else { TYPE_WAYPOINT },
                    point_lat: wp.lat(),
                    point_lon: wp.lon(),
                    stop_name: stop_name(wp),
                    stop_id: stop_id(wp),
                })?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    log::info!("exported {} routes, {rows} way points", objects.route_count());
    Ok(rows)
}

fn stop_name(wp: &WayPoint) -> String {
    wp.name().unwrap_or(WAYPOINT_PLACEHOLDER).to_string()
}

fn stop_id(wp: &WayPoint) -> String {
    wp.station_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| WAYPOINT_PLACEHOLDER.to_string())
}

/// Load route geometry.
///
/// Consecutive rows with the same (routeId, pathId) form one group. For each
/// group the route and path are looked up by id and created when missing,
/// then the path's way points are replaced by the group's rows in file order.
pub fn import_routes<R: Read>(objects: &mut SystemObjects, input: R) -> Result<ImportReport> {
    let mut reader = reader(input);
    let headers = reader.headers()?.clone();
    require_columns(&headers, &ROUTE_COLUMNS)?;

    let mut report = ImportReport::default();
    let mut current: Option<(RouteId, PathId, PathKey)> = None;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        report.rows += 1;
        let line = record.position().map(|p| p.line());

        let row: RouteRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                report.skip(line, err);
                continue;
            }
        };
        let kind = match row.kind() {
            Ok(kind) => kind,
            Err(err) => {
                report.skip(line, err);
                continue;
            }
        };

        let route_id = RouteId::new(row.route_id);
        let path_id = PathId::new(row.path_id);
        let path = match current {
            Some((r, p, key)) if r == route_id && p == path_id => key,
            _ => {
                let key = reset_path(objects, &row)?;
                report.groups += 1;
                current = Some((route_id, path_id, key));
                key
            }
        };
        objects.push_point(path, row.location(), kind)?;
    }

    log::info!("route import: {report}");
    Ok(report)
}

/// Find or create the row's route and path and clear the path's way points
fn reset_path(objects: &mut SystemObjects, row: &RouteRow) -> Result<PathKey> {
    let route_id = RouteId::new(row.route_id);
    let route = match objects.route_by_id(route_id) {
        Some(route) => route.key(),
        None => {
            log::debug!("creating route {route_id} {:?}", row.route_name);
            objects.add_route(route_id, row.route_name.clone())
        }
    };

    let path_id = PathId::new(row.path_id);
    let path = match objects.route_path(route, path_id) {
        Some(path) => path.key(),
        None => objects.add_path(route, row.path_name.clone(), path_id)?,
    };
    objects.delete_all_waypoints(path)?;
    Ok(path)
}
