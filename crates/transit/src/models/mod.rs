//! Transit data models, value types and errors.

pub mod calendar;
pub mod data;
pub mod period;
pub mod route;
pub mod service;
pub mod types;

// Re-exports for convenience
pub use calendar::{Day, DaySet, Nesting, Time, TimePeriod};
pub use data::{find_max_data, find_min_data, Data, DataExtent, DataShape, DataType};
pub use period::Period;
pub use route::{Route, RoutePath, StopInfo, WayPoint, WayPointKind};
pub use service::{Service, ServiceStop};
pub use types::{Result, TransitError};
