//! Spatial indexing and distance helpers over way point coordinates.

pub mod index;
pub mod queries;

pub use index::SpatialIndex;
pub use queries::{haversine_distance, haversine_distance_to_line};
