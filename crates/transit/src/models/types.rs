//! Error type shared by the whole crate.

use crate::identifiers::*;

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Route not found: {0}")]
    RouteNotFound(RouteKey),

    #[error("Route path not found: {0}")]
    PathNotFound(PathKey),

    #[error("Way point not found: {0}")]
    PointNotFound(PointKey),

    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceKey),

    #[error("{point} is not part of {path}")]
    PointNotOnPath { point: PointKey, path: PathKey },

    #[error("{0} is not a stop")]
    NotAStop(PointKey),

    /// `start` or `end` missing from the path, or `start` after `end`
    #[error("Invalid range on {path}: {start} to {end}")]
    InvalidRange {
        path: PathKey,
        start: PointKey,
        end: PointKey,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[cfg(feature = "interchange")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransitError>;
