//! # metro-transit
//!
//! In-memory data model for transit ridership analysis.
//!
//! ## Features
//!
//! - **Route network**: routes, their paths, and the way points and stops
//!   along each path, kept in arenas and addressed by typed keys
//! - **Services**: operating patterns of a path during a [`Period`], with
//!   boardings, alightings and load recorded per stop
//! - **Aggregates**: min/max of any data type over stops, services and paths
//! - **Color scale**: values mapped onto a green to red ramp for map display
//! - **Spatial queries**: R-tree lookup of stops and paths near a point
//! - **CSV interchange**: route and service files (feature `interchange`)
//!
//! ## Example
//!
//! ```
//! use metro_transit::prelude::*;
//! use geo::Point;
//!
//! # fn main() -> std::result::Result<(), TransitError> {
//! let mut objects = SystemObjects::new();
//! let route = objects.add_route(10, "Blue Line");
//! let path = objects.add_path(route, "Northbound", 1)?;
//!
//! let s1 = objects.add_stop(path, Point::new(-118.25, 34.05), "S1", 100)?;
//! objects.add_stop(path, Point::new(-118.25, 34.06), "S2", 101)?;
//! let s3 = objects.add_stop(path, Point::new(-118.25, 34.07), "S3", 102)?;
//!
//! let service = objects.add_service(path, 1, Period::WEEKDAY_BASE, s1, s3)?;
//! objects
//!     .service_mut(service)
//!     .and_then(|s| s.service_stop_mut(StationId::new(100)))
//!     .ok_or(TransitError::ServiceNotFound(service))?
//!     .add_data(Data::boardings(5));
//!
//! assert_eq!(objects.path_max_data(path, DataType::Boardings), Some(5));
//! assert_eq!(objects.path_max_data(path, DataType::Load), None);
//! # Ok(())
//! # }
//! ```

pub mod identifiers;
pub mod legacy;
pub mod models;
pub mod scale;
pub mod spatial;
pub mod system;

#[cfg(feature = "interchange")]
pub mod interchange;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::scale::{Color, ColorScale, DataScale, SELECTED_STOP_COLOR};
    pub use crate::spatial::SpatialIndex;
    pub use crate::system::SystemObjects;

    #[cfg(feature = "interchange")]
    pub use crate::interchange::{export_routes, export_services, import_routes, import_services, ImportReport};
}

pub use prelude::*;
